use thiserror::Error;

/// A programming error in the configuration of the command line parser.
///
/// These are raised at registration time, before any parsing happens.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SpecificationError {
    /// Two arguments share a flag, name, or description (see [`DuplicateCheck`](./enum.DuplicateCheck.html)).
    #[error("Config error: argument '{candidate}' duplicates the flag/name/description of '{existing}'.")]
    Duplicate {
        /// The argument already registered.
        existing: String,
        /// The argument being registered.
        candidate: String,
    },

    /// A labeled argument has neither a flag nor a name, or a positional argument has no name.
    #[error("Config error: argument must have a non-empty flag or name.")]
    Unidentified,

    /// The flag is not usable as a short label.
    #[error("Config error: flag '{flag}' {reason}.")]
    MalformedFlag {
        /// The offending flag.
        flag: char,
        /// Why the flag was rejected.
        reason: String,
    },

    /// The name is not usable as a long label.
    #[error("Config error: name '{name}' {reason}.")]
    MalformedName {
        /// The offending name.
        name: String,
        /// Why the name was rejected.
        reason: String,
    },

    /// An exclusion group cannot be satisfied or holds an argument it cannot hold.
    #[error("Config error: {0}.")]
    InvalidGroup(String),

    /// The parser [`Settings`](./struct.Settings.html) are inconsistent.
    #[error("Config error: {0}.")]
    InvalidSettings(String),
}

impl SpecificationError {
    /// The identity of the offending argument, when there is one.
    pub fn argument(&self) -> Option<&str> {
        match self {
            SpecificationError::Duplicate { candidate, .. } => Some(candidate),
            SpecificationError::MalformedName { name, .. } => Some(name),
            _ => None,
        }
    }
}

/// A failure to parse the input tokens.
///
/// Parsing stops at the first error; there is no partial recovery.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// A value-requiring argument matched at the end of the input.
    #[error("Parse error: missing a value for argument '{argument}'.")]
    MissingValue {
        /// The offending argument.
        argument: String,
    },

    /// A token could not be converted into the argument's type, or held more than one value.
    #[error("Parse error: argument '{argument}' {reason}.")]
    InvalidValue {
        /// The offending argument.
        argument: String,
        /// The token which failed to convert.
        token: String,
        /// What went wrong with the conversion.
        reason: String,
    },

    /// The converted value is not in the argument's allow-list.
    #[error("Parse error: argument '{argument}' does not allow '{token}' (allowed: {allowed}).")]
    NotAllowed {
        /// The offending argument.
        argument: String,
        /// The token carrying the rejected value.
        token: String,
        /// The allow-list, rendered `a|b|c`.
        allowed: String,
    },

    /// A single-value argument or switch matched a second time.
    #[error("Parse error: argument '{argument}' is already set.")]
    AlreadySet {
        /// The offending argument.
        argument: String,
    },

    /// Two different members of one exclusion group were matched.
    #[error("Parse error: mutually exclusive argument '{argument}' already set; only one is allowed: '{first}' AND '{second}' provided.")]
    ExclusivityViolation {
        /// The argument matched second.
        argument: String,
        /// The token which matched the first member.
        first: String,
        /// The token which matched the second member.
        second: String,
    },

    /// A token matched no argument.
    #[error("Parse error: couldn't find a match for argument '{token}'.")]
    UnknownArgument {
        /// The unmatched token, as it was provided.
        token: String,
    },

    /// Fewer required arguments were provided than declared.
    #[error("Parse error: required argument(s) missing: {}.", .missing.join(", "))]
    MissingRequiredArgument {
        /// Every required argument (or exclusion group) left unsatisfied.
        missing: Vec<String>,
    },

    /// More required slots were satisfied than declared.
    #[error("Parse error: too many arguments ({satisfied} required slots satisfied, {required} declared).")]
    TooManyArguments {
        /// The satisfied count.
        satisfied: usize,
        /// The declared count.
        required: usize,
    },
}

impl ParseError {
    /// The identity of the offending argument, or the offending token when no argument claimed it.
    pub fn argument(&self) -> Option<&str> {
        match self {
            ParseError::MissingValue { argument }
            | ParseError::InvalidValue { argument, .. }
            | ParseError::NotAllowed { argument, .. }
            | ParseError::AlreadySet { argument }
            | ParseError::ExclusivityViolation { argument, .. } => Some(argument),
            ParseError::UnknownArgument { token } => Some(token),
            ParseError::MissingRequiredArgument { missing } => missing.first().map(String::as_str),
            ParseError::TooManyArguments { .. } => None,
        }
    }
}
