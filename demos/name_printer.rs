use clasp::{Action, CommandLineParser, Parameter, Scalar, Switch};

fn main() {
    let mut name: String = String::default();
    let mut reverse: bool = false;

    let parser = CommandLineParser::new("name_printer")
        .add(
            Parameter::option(Scalar::new(&mut name), "name", Some('n'))
                .required()
                .meta("string")
                .description("Name to print."),
        )
        .and_then(|clp| {
            clp.add(
                Parameter::option(Switch::new(&mut reverse), "reverse", Some('r'))
                    .description("Print name backwards."),
            )
        })
        .expect("Invalid argument parser configuration")
        .build();
    let usage = parser.usage();
    let descriptions = parser.descriptions();

    let parsed = match parser.parse() {
        Ok(parsed) => parsed,
        Err(error) => {
            eprintln!("{error}");
            eprintln!("usage: {usage}");
            std::process::exit(1);
        }
    };

    match parsed.action() {
        Action::Continue => {}
        Action::PrintHelp => {
            println!("usage: {usage}");
            for (id, description) in descriptions {
                println!("  {id}");
                println!("      {description}");
            }
            return;
        }
        Action::PrintVersion => {
            println!("{} {}", parsed.program(), env!("CARGO_PKG_VERSION"));
            return;
        }
    }

    if reverse {
        let backwards: String = name.chars().rev().collect();
        println!("My name (spelled backwards) is: {backwards}");
    } else {
        println!("My name is: {name}");
    }
}
