use clasp::{
    Collection, CommandLineParser, ExclusionGroup, GeneralParser, Parameter, ParseError, Parsed,
    Switch,
};

#[derive(Debug, PartialEq, Eq)]
struct Params {
    verbose: bool,
    quiet: bool,
    items: Vec<u32>,
}

impl Params {
    fn init() -> Self {
        Self {
            verbose: false,
            quiet: false,
            items: Vec::default(),
        }
    }
}

fn main() {
    let params = match parse() {
        Ok(params) => params,
        Err(error) => {
            eprintln!("{error}");
            std::process::exit(1);
        }
    };

    let sum: u32 = params.items.iter().sum();
    if params.verbose {
        println!("Summing {:?}.", params.items);
    }
    if !params.quiet {
        println!("Sum: {sum}");
    }
}

// Configure and execute the parser against `env::args`.
fn parse() -> Result<Params, ParseError> {
    parse_tokens(|parser: GeneralParser| parser.parse())
}

// Unit-testable function to configure the parser and execute it against the specified tokens.
fn parse_tokens(
    parse_fn: impl FnOnce(GeneralParser) -> Result<Parsed, ParseError>,
) -> Result<Params, ParseError> {
    let mut params = Params::init();

    let chatter = ExclusionGroup::either_of()
        .add(
            Parameter::option(Switch::new(&mut params.verbose), "verbose", Some('V'))
                .description("Print the items before summing."),
        )
        .and_then(|group| {
            group.add(
                Parameter::option(Switch::new(&mut params.quiet), "quiet", Some('q'))
                    .description("Print nothing."),
            )
        })
        .expect("Invalid argument parser configuration");

    let parser = CommandLineParser::new("summer")
        .group(chatter)
        .and_then(|clp| {
            clp.add(
                Parameter::argument(Collection::new(&mut params.items), "item")
                    .required()
                    .meta("ITEM")
                    .description("The items to sum."),
            )
        })
        .expect("Invalid argument parser configuration")
        .build();

    parse_fn(parser)?;
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_empty() {
        // Setup
        let tokens = vec![];

        // Execute
        let result = parse_tokens(|parser| parser.parse_tokens(tokens.as_slice()));

        // Verify
        assert_eq!(
            result,
            Err(ParseError::MissingRequiredArgument {
                missing: vec!["item".to_string()],
            })
        );
    }

    #[test]
    fn parse() {
        // Setup
        let tokens = vec!["5", "-V", "6"];

        // Execute
        let result = parse_tokens(|parser| parser.parse_tokens(tokens.as_slice()));

        // Verify
        assert_eq!(
            result,
            Ok(Params {
                verbose: true,
                quiet: false,
                items: vec![5, 6],
            })
        );
    }

    #[test]
    fn parse_chatter_exclusive() {
        // Setup
        let tokens = vec!["-Vq", "5"];

        // Execute
        let result = parse_tokens(|parser| parser.parse_tokens(tokens.as_slice()));

        // Verify
        assert!(matches!(
            result,
            Err(ParseError::ExclusivityViolation { .. })
        ));
    }
}
