#[cfg(feature = "tracing_debug")]
use tracing::debug;

use crate::model::Settings;
use crate::parser::argument::*;
use crate::parser::exclusion::ExclusionHandler;
use crate::parser::ParseError;

/// What the caller should do after a successful parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Every token was consumed and every required argument was satisfied.
    Continue,
    /// The built-in help switch was matched; parsing stopped at that point.
    PrintHelp,
    /// The built-in version switch was matched; parsing stopped at that point.
    PrintVersion,
}

/// The result of a successful parse.
///
/// The parsed values themselves are written straight into the variables bound to each [`Parameter`](./struct.Parameter.html).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parsed {
    program: String,
    action: Action,
    set: Vec<(Option<char>, String)>,
}

impl Parsed {
    fn new(program: impl Into<String>, action: Action, arguments: &[Argument]) -> Self {
        Self {
            program: program.into(),
            action,
            set: arguments
                .iter()
                .filter(|argument| argument.already_set())
                .map(|argument| (argument.flag(), argument.name().to_string()))
                .collect(),
        }
    }

    /// The program name the parser was configured with.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// What the caller should do next.
    pub fn action(&self) -> Action {
        self.action
    }

    /// Whether the argument addressed by `key` (its flag, name, or positional name) was matched on the command line.
    ///
    /// ### Example
    /// ```
    /// # use clasp_builder as clasp;
    /// use clasp::{CommandLineParser, Parameter, Switch};
    ///
    /// let mut verbose: bool = false;
    /// let parsed = CommandLineParser::new("program")
    ///     .add(Parameter::option(Switch::new(&mut verbose), "verbose", Some('V')))
    ///     .unwrap()
    ///     .build()
    ///     .parse_tokens(vec!["-V"].as_slice())
    ///     .unwrap();
    ///
    /// assert!(parsed.is_set("V"));
    /// assert!(parsed.is_set("verbose"));
    /// assert!(!parsed.is_set("help"));
    /// ```
    pub fn is_set(&self, key: &str) -> bool {
        self.set.iter().any(|(flag, name)| {
            (!name.is_empty() && name == key)
                || flag.map_or(false, |flag| {
                    let mut characters = key.chars();
                    characters.next() == Some(flag) && characters.next().is_none()
                })
        })
    }
}

/// The transient state of one parse: the tokens, a cursor, and the ignore-rest mode.
pub(crate) struct ParseState<'s> {
    settings: &'s Settings,
    tokens: Vec<String>,
    // The token under the cursor before any combined switch blanked part of it.
    original: String,
    cursor: usize,
    ignoring: bool,
    satisfied: usize,
}

impl<'s> ParseState<'s> {
    pub(crate) fn new(settings: &'s Settings, tokens: &[&str]) -> Self {
        Self {
            settings,
            tokens: tokens.iter().map(|token| token.to_string()).collect(),
            original: tokens.first().map(|token| token.to_string()).unwrap_or_default(),
            cursor: 0,
            ignoring: false,
            satisfied: 0,
        }
    }

    pub(crate) fn settings(&self) -> &'s Settings {
        self.settings
    }

    fn has_current(&self) -> bool {
        self.cursor < self.tokens.len()
    }

    pub(crate) fn current(&self) -> &str {
        match self.tokens.get(self.cursor) {
            Some(token) => token,
            None => unreachable!("internal error - cursor moved past the tokens"),
        }
    }

    pub(crate) fn original(&self) -> &str {
        &self.original
    }

    pub(crate) fn ignoring(&self) -> bool {
        self.ignoring
    }

    pub(crate) fn ignore(&mut self) {
        self.ignoring = true;
    }

    /// Move the cursor to the next unconsumed token.
    pub(crate) fn advance(&mut self) {
        self.cursor += 1;

        if let Some(token) = self.tokens.get(self.cursor) {
            self.original = token.clone();
        }
    }

    /// Consume the token after the cursor as the value of the current token.
    pub(crate) fn take_value(&mut self) -> Option<String> {
        if self.cursor + 1 < self.tokens.len() {
            self.cursor += 1;
            Some(self.tokens[self.cursor].clone())
        } else {
            None
        }
    }

    /// Overwrite `found`, at byte offset `position` of the current token, with the blank placeholder.
    pub(crate) fn blank(&mut self, position: usize, found: char) {
        let blank = self.settings.blank_char().to_string();
        match self.tokens.get_mut(self.cursor) {
            Some(token) => token.replace_range(position..position + found.len_utf8(), &blank),
            None => unreachable!("internal error - cursor moved past the tokens"),
        }
    }
}

pub(crate) struct Parser<'a> {
    settings: Settings,
    // Labeled arguments first, then positional arguments, each in registration order.
    arguments: Vec<Argument<'a>>,
    exclusion: ExclusionHandler,
}

impl<'a> std::fmt::Debug for Parser<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parser{..}").finish()
    }
}

impl<'a> Parser<'a> {
    pub(crate) fn new(
        settings: Settings,
        arguments: Vec<Argument<'a>>,
        exclusion: ExclusionHandler,
    ) -> Self {
        Self {
            settings,
            arguments,
            exclusion,
        }
    }

    pub(crate) fn settings(&self) -> &Settings {
        &self.settings
    }

    pub(crate) fn arguments(&self) -> &[Argument<'a>] {
        &self.arguments
    }

    pub(crate) fn consume(self, program: &str, tokens: &[&str]) -> Result<Parsed, ParseError> {
        let Parser {
            settings,
            mut arguments,
            mut exclusion,
        } = self;
        let required = exclusion.required_slots(&arguments);
        let mut state = ParseState::new(&settings, tokens);

        while state.has_current() {
            if !state.ignoring() && settings.is_sentinel(state.current()) {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Ignoring the rest of the tokens after '{}'.", state.current());
                }

                state.ignore();
                state.advance();
                continue;
            }

            let mut claimed = false;

            for index in 0..arguments.len() {
                let was_required = arguments[index].is_required();
                let matched = arguments[index].process(&mut state)?;

                if matched == Matched::No {
                    continue;
                }

                let gain = exclusion.check(index, was_required, state.original(), &mut arguments);
                state.satisfied += gain;

                #[cfg(feature = "tracing_debug")]
                {
                    debug!(
                        "Token '{}' {matched:?} matched {:?}, satisfying {gain}.",
                        state.original(),
                        arguments[index]
                    );
                }

                if let Some(action) = arguments[index].shortcut {
                    return Ok(Parsed::new(program, action, &arguments));
                }

                if matched == Matched::Fully {
                    claimed = true;
                    break;
                }
            }

            if !claimed
                && !settings.is_empty_combined(state.current())
                && !state.ignoring()
            {
                return Err(ParseError::UnknownArgument {
                    token: state.original().to_string(),
                });
            }

            state.advance();
        }

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Satisfied {} of {required} required slots.", state.satisfied);
        }

        if state.satisfied < required {
            Err(ParseError::MissingRequiredArgument {
                missing: exclusion.missing(&arguments, &settings),
            })
        } else if state.satisfied > required {
            Err(ParseError::TooManyArguments {
                satisfied: state.satisfied,
                required,
            })
        } else {
            Ok(Parsed::new(program, Action::Continue, &arguments))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{AnonymousCapture, Collection, Scalar, Switch};
    use crate::model::Arity;
    use crate::parser::test::BlackHole;
    use rstest::rstest;

    fn switch(flag: char) -> Argument<'static> {
        Argument::new(
            Mode::Labeled,
            Some(flag),
            "",
            Arity::Switch,
            Box::new(BlackHole::default()),
        )
    }

    fn parser(arguments: Vec<Argument>) -> Parser {
        Parser::new(
            Settings::default(),
            arguments,
            ExclusionHandler::new(Vec::default()),
        )
    }

    #[test]
    fn parse_state() {
        let settings = Settings::default();
        let mut state = ParseState::new(&settings, &["-ab", "c", "d"]);
        assert!(state.has_current());
        assert_eq!(state.current(), "-ab");

        state.blank(1, 'a');
        assert_eq!(state.current(), "-*b");
        assert_eq!(state.original(), "-ab");

        assert_eq!(state.take_value(), Some("c".to_string()));
        state.advance();
        assert_eq!(state.current(), "d");
        assert_eq!(state.original(), "d");
        assert_eq!(state.take_value(), None);

        state.advance();
        assert!(!state.has_current());
    }

    #[test]
    fn parse_state_empty() {
        let settings = Settings::default();
        let state = ParseState::new(&settings, empty::slice());
        assert!(!state.has_current());
        assert_eq!(state.original(), "");
    }

    #[test]
    fn empty() {
        let parsed = parser(Vec::default())
            .consume("program", empty::slice())
            .unwrap();
        assert_eq!(parsed.action(), Action::Continue);
        assert_eq!(parsed.program(), "program");
    }

    #[rstest]
    #[case(vec!["-abc"])]
    #[case(vec!["-cba"])]
    #[case(vec!["-a", "-bc"])]
    #[case(vec!["-ca", "-b"])]
    #[case(vec!["-a", "-b", "-c"])]
    fn combined_switches(#[case] tokens: Vec<&str>) {
        let parsed = parser(vec![switch('a'), switch('b'), switch('c')])
            .consume("program", tokens.as_slice())
            .unwrap();
        assert!(parsed.is_set("a"));
        assert!(parsed.is_set("b"));
        assert!(parsed.is_set("c"));
    }

    #[rstest]
    #[case(vec!["-az"], "-az")]
    #[case(vec!["-z"], "-z")]
    #[case(vec!["-a", "--z"], "--z")]
    #[case(vec!["z"], "z")]
    fn unknown(#[case] tokens: Vec<&str>, #[case] token: &str) {
        let error = parser(vec![switch('a')])
            .consume("program", tokens.as_slice())
            .unwrap_err();
        assert_eq!(
            error,
            ParseError::UnknownArgument {
                token: token.to_string()
            }
        );
    }

    #[rstest]
    #[case(vec!["--"])]
    #[case(vec!["--", "-z", "x"])]
    #[case(vec!["--ignore_rest", "-a"])]
    #[case(vec!["-a", "--", "-a", "--"])]
    fn ignore_rest(#[case] tokens: Vec<&str>) {
        parser(vec![switch('a')])
            .consume("program", tokens.as_slice())
            .unwrap();
    }

    #[test]
    fn ignore_rest_positional() {
        // Setup
        let mut items: Vec<String> = Vec::default();
        let mut flag = false;
        let arguments = vec![
            Argument::new(
                Mode::Labeled,
                Some('a'),
                "",
                Arity::Switch,
                Box::new(AnonymousCapture::bind(Switch::new(&mut flag))),
            ),
            Argument::new(
                Mode::Positional,
                None,
                "items",
                Arity::Multiple,
                Box::new(AnonymousCapture::bind(Collection::new(&mut items))),
            ),
        ];

        // Execute
        parser(arguments)
            .consume("program", &["x", "--", "-a", "--", "y"])
            .unwrap();

        // Verify
        assert!(!flag);
        assert_eq!(items, vec!["x", "-a", "--", "y"]);
    }

    #[test]
    fn missing_required() {
        let mut a = switch('a');
        a.required = true;
        let mut b = switch('b');
        b.required = true;
        let error = parser(vec![a, b])
            .consume("program", &["-b"])
            .unwrap_err();
        assert_eq!(
            error,
            ParseError::MissingRequiredArgument {
                missing: vec!["-a".to_string()],
            }
        );
    }

    #[test]
    fn required_positional() {
        let mut value: u32 = 0;
        let mut argument = Argument::new(
            Mode::Positional,
            None,
            "value",
            Arity::Single,
            Box::new(AnonymousCapture::bind(Scalar::new(&mut value))),
        );
        argument.required = true;

        let error = parser(vec![argument])
            .consume("program", empty::slice())
            .unwrap_err();
        assert_eq!(
            error,
            ParseError::MissingRequiredArgument {
                missing: vec!["value".to_string()],
            }
        );
    }

    #[rstest]
    #[case(Action::PrintHelp, vec!["-a", "-h", "-z"])]
    #[case(Action::PrintVersion, vec!["-ah", "-z"])]
    fn shortcut(#[case] action: Action, #[case] tokens: Vec<&str>) {
        // Setup
        let mut shortcut = switch('h');
        shortcut.shortcut = Some(action);
        let mut a = switch('a');
        a.required = true;
        let mut b = switch('b');
        b.required = true;

        // Execute
        let parsed = parser(vec![a, b, shortcut])
            .consume("program", tokens.as_slice())
            .unwrap();

        // Verify
        assert_eq!(parsed.action(), action);
        assert!(parsed.is_set("a"));
        assert!(parsed.is_set("h"));
        assert!(!parsed.is_set("b"));
    }

    #[test]
    fn is_set() {
        let mut argument = Argument::new(
            Mode::Labeled,
            Some('n'),
            "name",
            Arity::Switch,
            Box::new(BlackHole::default()),
        );
        argument.aliases.push((Some('N'), "nick".to_string()));
        let parsed = parser(vec![argument])
            .consume("program", &["-N"])
            .unwrap();

        assert!(parsed.is_set("n"));
        assert!(parsed.is_set("name"));
        assert!(!parsed.is_set("nick"));
        assert!(!parsed.is_set("na"));
        assert!(!parsed.is_set(""));
    }

    #[test]
    fn is_set_flag_only() {
        let parsed = parser(vec![switch('a'), switch('b')])
            .consume("program", &["-a"])
            .unwrap();

        assert!(parsed.is_set("a"));
        assert!(!parsed.is_set("b"));
        assert!(!parsed.is_set(""));
    }

    #[test]
    fn blank_remainder_inert() {
        let parsed = parser(vec![switch('a')])
            .consume("program", &["-**", "-a"])
            .unwrap();

        assert_eq!(parsed.action(), Action::Continue);
        assert!(parsed.is_set("a"));
    }

    #[test]
    fn blank_remainder_unknown() {
        let error = parser(vec![switch('a')])
            .consume("program", &["-*z"])
            .unwrap_err();

        assert_eq!(
            error,
            ParseError::UnknownArgument {
                token: "-*z".to_string()
            }
        );
    }

    #[test]
    fn ignore_rest_ignoreable_positional() {
        // Setup
        let mut items: Vec<String> = Vec::default();
        let mut argument = Argument::new(
            Mode::Positional,
            None,
            "items",
            Arity::Multiple,
            Box::new(AnonymousCapture::bind(Collection::new(&mut items))),
        );
        argument.ignoreable = true;

        // Execute
        parser(vec![argument])
            .consume("program", &["x", "--", "y"])
            .unwrap();

        // Verify
        assert_eq!(items, vec!["x"]);
    }
}
