use std::str::FromStr;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

use crate::api::{ExclusionGroup, InvalidCapture, Parameter};
use crate::constant::*;
use crate::model::{Arity, Settings};
use crate::parser::{
    Action, AnonymousCapturable, Argument, ExclusionHandler, GeneralParser, Mode, Parser,
    SpecificationError,
};

// Captures nothing; the built-in switches only report an `Action`.
struct Inert;

impl AnonymousCapturable for Inert {
    fn matched(&mut self) {
        // Do nothing.
    }

    fn capture(&mut self, _token: &str) -> Result<(), InvalidCapture> {
        unreachable!("internal error - must not capture on a built-in switch");
    }
}

fn built_in<'a>(flag: char, name: &str, description: &str, action: Action) -> Argument<'a> {
    let mut argument = Argument::new(Mode::Labeled, Some(flag), name, Arity::Switch, Box::new(Inert));
    argument.description = description.to_string();
    argument.shortcut = Some(action);
    argument
}

/// The base command line parser.
///
/// ### Example
/// ```
/// # use clasp_builder as clasp;
/// use clasp::{CommandLineParser};
///
/// let parser = CommandLineParser::new("program")
///     // Configure with CommandLineParser::add and CommandLineParser::group.
///     .build();
/// parser.parse_tokens(empty::slice()).unwrap();
/// ```
#[derive(Debug)]
pub struct CommandLineParser<'a> {
    program: String,
    settings: Settings,
    labeled: Vec<Argument<'a>>,
    positional: Vec<Argument<'a>>,
    // Indices into `labeled`, and whether the group is required.
    groups: Vec<(Vec<usize>, bool)>,
}

impl<'a> CommandLineParser<'a> {
    /// Create a command line parser with the default [`Settings`].
    ///
    /// ### Example
    /// ```
    /// # use clasp_builder as clasp;
    /// use clasp::CommandLineParser;
    ///
    /// let parser = CommandLineParser::new("program")
    ///     .build();
    ///
    /// parser.parse_tokens(vec![].as_slice()).unwrap();
    /// ```
    pub fn new(program: impl Into<String>) -> Self {
        Self::with_settings(program, Settings::default())
    }

    /// Create a command line parser with custom [`Settings`].
    /// Fails if the settings are inconsistent (ex: equal flag and name prefixes).
    ///
    /// ### Example
    /// ```
    /// # use clasp_builder as clasp;
    /// use clasp::{CommandLineParser, Parameter, Scalar, Settings};
    ///
    /// let mut count: u32 = 0;
    /// let parser = CommandLineParser::configured("program", Settings::default().prefixes("/", "//"))
    ///     .unwrap()
    ///     .add(Parameter::option(Scalar::new(&mut count), "count", Some('c')))
    ///     .unwrap()
    ///     .build();
    ///
    /// parser.parse_tokens(vec!["/c", "3"].as_slice()).unwrap();
    /// assert_eq!(count, 3);
    /// ```
    pub fn configured(
        program: impl Into<String>,
        settings: Settings,
    ) -> Result<Self, SpecificationError> {
        settings.validate()?;
        Ok(Self::with_settings(program, settings))
    }

    fn with_settings(program: impl Into<String>, settings: Settings) -> Self {
        let mut labeled = Vec::default();

        if settings.has_help() {
            labeled.push(built_in(
                HELP_SHORT,
                HELP_NAME,
                HELP_DESCRIPTION,
                Action::PrintHelp,
            ));
        }

        if settings.has_version() {
            labeled.push(built_in(
                VERSION_SHORT,
                VERSION_NAME,
                VERSION_DESCRIPTION,
                Action::PrintVersion,
            ));
        }

        Self {
            program: program.into(),
            settings,
            labeled,
            positional: Vec::default(),
            groups: Vec::default(),
        }
    }

    /// Add a parameter to the command line parser.
    ///
    /// The order of positional parameters corresponds to their positional order during parsing.
    /// Labeled parameters are always consulted before positional ones.
    ///
    /// Fails if the parameter is malformed, or duplicates the flag, name, or description of an existing parameter
    /// (see [`DuplicateCheck`](./enum.DuplicateCheck.html)).
    ///
    /// ### Example
    /// ```
    /// # use clasp_builder as clasp;
    /// use clasp::{CommandLineParser, Parameter, Scalar};
    ///
    /// let mut a: u32 = 0;
    /// let mut b: u32 = 0;
    /// let parser = CommandLineParser::new("program")
    ///     .add(Parameter::argument(Scalar::new(&mut a), "a"))
    ///     .unwrap()
    ///     .add(Parameter::argument(Scalar::new(&mut b), "b"))
    ///     .unwrap()
    ///     .build();
    ///
    /// parser.parse_tokens(vec!["1", "2"].as_slice()).unwrap();
    ///
    /// assert_eq!(a, 1);
    /// assert_eq!(b, 2);
    /// ```
    pub fn add<T: FromStr + PartialEq + 'a>(
        mut self,
        parameter: Parameter<'a, T>,
    ) -> Result<Self, SpecificationError> {
        self.register(parameter.consume())?;
        Ok(self)
    }

    /// Add an exclusion group to the command line parser.
    ///
    /// Members of a [`ExclusionGroup::one_of`] group are marked required (labelled `OR required`), while
    /// members of an [`ExclusionGroup::either_of`] group are made optional.
    ///
    /// ### Example
    /// ```
    /// # use clasp_builder as clasp;
    /// use clasp::{CommandLineParser, ExclusionGroup, Parameter, Switch};
    ///
    /// let mut tcp: bool = false;
    /// let mut udp: bool = false;
    /// let parser = CommandLineParser::new("program")
    ///     .group(
    ///         ExclusionGroup::one_of()
    ///             .add(Parameter::option(Switch::new(&mut tcp), "tcp", Some('t')))
    ///             .unwrap()
    ///             .add(Parameter::option(Switch::new(&mut udp), "udp", Some('u')))
    ///             .unwrap(),
    ///     )
    ///     .unwrap()
    ///     .build();
    ///
    /// let error = parser.parse_tokens(vec![].as_slice()).unwrap_err();
    /// assert_eq!(error.to_string(), "Parse error: required argument(s) missing: {-t | -u}.");
    /// ```
    pub fn group(mut self, group: ExclusionGroup<'a>) -> Result<Self, SpecificationError> {
        let (members, required) = group.consume();

        if members.is_empty() {
            return Err(SpecificationError::InvalidGroup(
                "exclusion group must have at least one member".to_string(),
            ));
        }

        let mut indices = Vec::default();

        for mut member in members {
            member.required = required;

            if required {
                member.require_label = ONE_OF_REQUIRE_LABEL.to_string();
            }

            indices.push(self.register(member)?);
        }

        self.groups.push((indices, required));
        Ok(self)
    }

    fn register(&mut self, argument: Argument<'a>) -> Result<usize, SpecificationError> {
        argument.validate(&self.settings)?;

        if let Some(existing) = self
            .labeled
            .iter()
            .chain(self.positional.iter())
            .find(|existing| existing.collides(&argument, self.settings.duplicate_check()))
        {
            return Err(SpecificationError::Duplicate {
                existing: existing.id(&self.settings),
                candidate: argument.id(&self.settings),
            });
        }

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Registering {argument:?}.");
        }

        match argument.mode() {
            Mode::Labeled => {
                self.labeled.push(argument);
                Ok(self.labeled.len() - 1)
            }
            Mode::Positional => {
                self.positional.push(argument);
                Ok(self.positional.len() - 1)
            }
        }
    }

    /// Build the command line parser.
    /// This finalizes the configuration; every check already happened as the parameters were added.
    pub fn build(self) -> GeneralParser<'a> {
        let CommandLineParser {
            program,
            settings,
            mut labeled,
            positional,
            groups,
        } = self;
        // Labeled arguments go first, so the group indices stay valid.
        labeled.extend(positional);
        GeneralParser::new(
            program,
            Parser::new(settings, labeled, ExclusionHandler::new(groups)),
        )
    }
}
