use std::env;

use crate::parser::base::*;
use crate::parser::ParseError;

/// The configured command line parser.
/// Built via [`CommandLineParser::build`](./struct.CommandLineParser.html#method.build).
#[derive(Debug)]
pub struct GeneralParser<'a> {
    program: String,
    parser: Parser<'a>,
}

impl<'a> GeneralParser<'a> {
    pub(crate) fn new(program: impl Into<String>, parser: Parser<'a>) -> Self {
        Self {
            program: program.into(),
            parser,
        }
    }

    /// The one line usage summary: the program followed by each argument's short form.
    ///
    /// ### Example
    /// ```
    /// # use clasp_builder as clasp;
    /// use clasp::{CommandLineParser, Parameter, Scalar, Settings};
    ///
    /// let mut name: String = String::default();
    /// let parser = CommandLineParser::configured("program", Settings::default().version(false))
    ///     .unwrap()
    ///     .add(Parameter::option(Scalar::new(&mut name), "name", Some('n')).required())
    ///     .unwrap()
    ///     .build();
    ///
    /// assert_eq!(parser.usage(), "program [-h] -n <val>");
    /// ```
    pub fn usage(&self) -> String {
        let settings = self.parser.settings();
        std::iter::once(self.program.clone())
            .chain(
                self.parser
                    .arguments()
                    .iter()
                    .map(|argument| argument.short_id(settings)),
            )
            .collect::<Vec<String>>()
            .join(" ")
    }

    /// Every argument's long form alongside its description, in the order the arguments are consulted.
    ///
    /// Laying these out is left to the caller.
    pub fn descriptions(&self) -> Vec<(String, String)> {
        let settings = self.parser.settings();
        self.parser
            .arguments()
            .iter()
            .map(|argument| (argument.long_id(settings), argument.full_description()))
            .collect()
    }

    /// Run the command line parser against the input tokens.
    ///
    /// Each token is offered to the labeled arguments in registration order, then to the positional arguments.
    /// Values are written into the bound variables as their tokens are matched.
    ///
    /// Parsing stops at the first error.
    /// It also stops, successfully, when the built-in help or version switch is matched; check [`Parsed::action`].
    pub fn parse_tokens(self, tokens: &[&str]) -> Result<Parsed, ParseError> {
        let GeneralParser { program, parser } = self;
        parser.consume(&program, tokens)
    }

    /// Run the command line parser against the Cli [`env::args`].
    ///
    /// See [`GeneralParser::parse_tokens`].
    /// The error is returned to the caller; nothing is printed and the process is not exited.
    pub fn parse(self) -> Result<Parsed, ParseError> {
        let command_input: Vec<String> = env::args().skip(1).collect();
        self.parse_tokens(
            command_input
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<&str>>()
                .as_slice(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Arity, Settings};
    use crate::parser::argument::{Argument, Mode};
    use crate::parser::exclusion::ExclusionHandler;
    use crate::parser::test::BlackHole;

    fn general_parser() -> GeneralParser<'static> {
        let mut switch = Argument::new(
            Mode::Labeled,
            Some('a'),
            "alpha",
            Arity::Switch,
            Box::new(BlackHole::default()),
        );
        switch.description = "The alpha.".to_string();
        let mut positional = Argument::new(
            Mode::Positional,
            None,
            "items",
            Arity::Multiple,
            Box::new(BlackHole::default()),
        );
        positional.required = true;
        positional.meta = "item".to_string();
        positional.description = "The items.".to_string();

        GeneralParser::new(
            "program",
            Parser::new(
                Settings::default(),
                vec![switch, positional],
                ExclusionHandler::new(Vec::default()),
            ),
        )
    }

    #[test]
    fn usage() {
        assert_eq!(general_parser().usage(), "program [-a] <item> ...");
    }

    #[test]
    fn descriptions() {
        assert_eq!(
            general_parser().descriptions(),
            vec![
                ("-a,  --alpha".to_string(), "The alpha.".to_string()),
                (
                    "<item>  (accepted multiple times)".to_string(),
                    "(required)  The items.".to_string()
                ),
            ]
        );
    }

    #[test]
    fn parse_tokens() {
        let parsed = general_parser()
            .parse_tokens(&["x", "-a", "y"])
            .unwrap();
        assert_eq!(parsed.program(), "program");
        assert_eq!(parsed.action(), Action::Continue);
        assert!(parsed.is_set("alpha"));
        assert!(parsed.is_set("items"));
    }

    #[test]
    fn parse_tokens_error() {
        assert_matches!(
            general_parser().parse_tokens(&["-a"]),
            Err(ParseError::MissingRequiredArgument { missing }) if missing == vec!["items".to_string()]
        );
    }
}
