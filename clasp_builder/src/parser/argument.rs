use crate::api::InvalidCapture;
use crate::constant::*;
use crate::model::{Arity, DuplicateCheck, Settings};
use crate::parser::base::ParseState;
use crate::parser::{Action, ParseError, SpecificationError};

/// Behaviour to capture an implicit generic type T from an input `&str`.
///
/// We use this at the middle/top of the command line parser object graph so that arguments of varying types `T` may all be held by one parser.
pub(crate) trait AnonymousCapturable {
    /// Declare that the argument has been matched.
    fn matched(&mut self);

    /// Convert and capture a value anonymously for this argument.
    fn capture(&mut self, token: &str) -> Result<(), InvalidCapture>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mode {
    Labeled,
    Positional,
}

/// The outcome of offering a token to an argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Matched {
    No,
    // A switch consumed its character from a combined token; other switches may still claim the rest.
    Partially,
    Fully,
}

pub(crate) struct Argument<'a> {
    mode: Mode,
    flag: Option<char>,
    name: String,
    arity: Arity,
    capture: Box<dyn AnonymousCapturable + 'a>,
    pub(crate) aliases: Vec<(Option<char>, String)>,
    pub(crate) description: String,
    pub(crate) required: bool,
    pub(crate) require_label: String,
    pub(crate) ignoreable: bool,
    pub(crate) meta: String,
    pub(crate) shortcut: Option<Action>,
    already_set: bool,
    xor_set: Option<String>,
    values_read: usize,
}

impl<'a> std::fmt::Debug for Argument<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Argument")
            .field("mode", &self.mode)
            .field("flag", &self.flag)
            .field("name", &self.name)
            .field("arity", &self.arity)
            .field("required", &self.required)
            .field("already_set", &self.already_set)
            .finish()
    }
}

impl<'a> Argument<'a> {
    pub(crate) fn new(
        mode: Mode,
        flag: Option<char>,
        name: impl Into<String>,
        arity: Arity,
        capture: Box<dyn AnonymousCapturable + 'a>,
    ) -> Self {
        Self {
            mode,
            flag,
            name: name.into(),
            arity,
            capture,
            aliases: Vec::default(),
            description: String::default(),
            required: false,
            require_label: REQUIRE_LABEL.to_string(),
            ignoreable: mode == Mode::Labeled,
            meta: VALUE_ID.to_string(),
            shortcut: None,
            already_set: false,
            xor_set: None,
            values_read: 0,
        }
    }

    pub(crate) fn mode(&self) -> Mode {
        self.mode
    }

    pub(crate) fn flag(&self) -> Option<char> {
        self.flag
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn already_set(&self) -> bool {
        self.already_set
    }

    /// Whether this argument still counts towards the required total.
    /// A required multi-value argument stops counting once it has read a value.
    pub(crate) fn is_required(&self) -> bool {
        match self.arity {
            Arity::Multiple => self.required && self.values_read == 0,
            Arity::Switch | Arity::Single => self.required,
        }
    }

    pub(crate) fn is_missing(&self) -> bool {
        self.is_required() && !self.already_set
    }

    /// Every short flag of this argument, primary first.
    pub(crate) fn flags(&self) -> impl Iterator<Item = char> + '_ {
        self.flag
            .into_iter()
            .chain(self.aliases.iter().filter_map(|(flag, _)| *flag))
    }

    /// Every non-empty long name of this argument, primary first.
    pub(crate) fn names(&self) -> impl Iterator<Item = &str> + '_ {
        std::iter::once(self.name.as_str())
            .chain(self.aliases.iter().map(|(_, name)| name.as_str()))
            .filter(|name| !name.is_empty())
    }

    /// Mark this argument as excluded by the match of another member of its group.
    pub(crate) fn exclude(&mut self, token: &str) {
        if self.xor_set.is_none() {
            self.xor_set.replace(token.to_string());
        }
    }

    /// Whether `label` is exactly one of this argument's flags or names, including the prefix.
    pub(crate) fn arg_matches(&self, label: &str, settings: &Settings) -> bool {
        if self.mode == Mode::Positional {
            return false;
        }

        if let Some(rest) = label.strip_prefix(settings.name_prefix()) {
            if self.names().any(|name| name == rest) {
                return true;
            }
        }

        if let Some(rest) = label.strip_prefix(settings.flag_prefix()) {
            let mut characters = rest.chars();
            if let (Some(character), None) = (characters.next(), characters.next()) {
                return self.flags().any(|flag| flag == character);
            }
        }

        false
    }

    /// The identity used in diagnostics: `-f (--name)`, `-f`, `(--name)`, or the bare positional name.
    pub(crate) fn id(&self, settings: &Settings) -> String {
        match self.mode {
            Mode::Positional => self.name.clone(),
            Mode::Labeled => match (self.flag, self.name.is_empty()) {
                (Some(flag), false) => format!(
                    "{} ({})",
                    settings.flag_label(flag),
                    settings.name_label(&self.name)
                ),
                (Some(flag), true) => settings.flag_label(flag),
                (None, _) => format!("({})", settings.name_label(&self.name)),
            },
        }
    }

    /// The description, led by the require label when required: `(required)  The name.`
    pub(crate) fn full_description(&self) -> String {
        if self.required {
            format!("({})  {}", self.require_label, self.description)
        } else {
            self.description.clone()
        }
    }

    /// Usage form: `[-f <val>]`, `--name <val> ...`, `<val>`.
    pub(crate) fn short_id(&self, settings: &Settings) -> String {
        let id = match self.mode {
            Mode::Positional => format!("<{}>", self.meta),
            Mode::Labeled => {
                let mut id = match self.flag {
                    Some(flag) => settings.flag_label(flag),
                    None => settings.name_label(&self.name),
                };

                if self.arity.value_required() {
                    id.push(settings.delimiter_char());
                    id.push_str(&format!("<{}>", self.meta));
                }

                if self.required {
                    id
                } else {
                    format!("[{id}]")
                }
            }
        };

        match self.arity {
            Arity::Multiple => format!("{id} ..."),
            Arity::Switch | Arity::Single => id,
        }
    }

    /// Listing form: `-f <val>,  --name <val>`.
    pub(crate) fn long_id(&self, settings: &Settings) -> String {
        let id = match self.mode {
            Mode::Positional => format!("<{}>", self.meta),
            Mode::Labeled => {
                let value = if self.arity.value_required() {
                    format!("{}<{}>", settings.delimiter_char(), self.meta)
                } else {
                    String::default()
                };
                let mut labels = Vec::default();

                if let Some(flag) = self.flag {
                    labels.push(format!("{}{value}", settings.flag_label(flag)));
                }

                if !self.name.is_empty() {
                    labels.push(format!("{}{value}", settings.name_label(&self.name)));
                }

                labels.join(",  ")
            }
        };

        match self.arity {
            Arity::Multiple => format!("{id}  (accepted multiple times)"),
            Arity::Switch | Arity::Single => id,
        }
    }

    /// Check the flags and names of this argument against the lexical settings.
    pub(crate) fn validate(&self, settings: &Settings) -> Result<(), SpecificationError> {
        match self.mode {
            Mode::Positional => {
                if self.name.is_empty() {
                    return Err(SpecificationError::Unidentified);
                }

                check_name(&self.name, settings)
            }
            Mode::Labeled => {
                if self.flag.is_none() && self.name.is_empty() {
                    return Err(SpecificationError::Unidentified);
                }

                if self
                    .aliases
                    .iter()
                    .any(|(flag, name)| flag.is_none() && name.is_empty())
                {
                    return Err(SpecificationError::Unidentified);
                }

                for flag in self.flags() {
                    check_flag(flag, settings)?;
                }

                for name in self.names() {
                    check_name(name, settings)?;

                    if name == settings.ignore_name() {
                        return Err(SpecificationError::MalformedName {
                            name: name.to_string(),
                            reason: "is reserved for ignoring the rest of the arguments"
                                .to_string(),
                        });
                    }
                }

                Ok(())
            }
        }
    }

    /// Whether registering both `self` and `other` with one parser would be ambiguous.
    pub(crate) fn collides(&self, other: &Argument, check: DuplicateCheck) -> bool {
        let flags = self.flags().any(|flag| other.flags().any(|o| o == flag));
        let names = self.names().any(|name| other.names().any(|o| o == name));
        let descriptions = match check {
            DuplicateCheck::Loose => {
                !self.description.is_empty() && self.description == other.description
            }
            DuplicateCheck::Labels => false,
        };

        flags || names || descriptions
    }

    /// Offer the token under the cursor to this argument.
    pub(crate) fn process(&mut self, state: &mut ParseState) -> Result<Matched, ParseError> {
        if self.ignoreable && state.ignoring() {
            return Ok(Matched::No);
        }

        match (self.mode, self.arity) {
            (Mode::Positional, _) => self.process_positional(state),
            (Mode::Labeled, Arity::Switch) => self.process_switch(state),
            (Mode::Labeled, Arity::Single) | (Mode::Labeled, Arity::Multiple) => {
                self.process_value(state)
            }
        }
    }

    fn process_value(&mut self, state: &mut ParseState) -> Result<Matched, ParseError> {
        let settings = state.settings();

        if settings.has_blanks(state.current()) {
            return Ok(Matched::No);
        }

        let (label, embedded) = settings.split_delimiter(state.current());

        if !self.arg_matches(label, settings) {
            return Ok(Matched::No);
        }

        let embedded = embedded.map(str::to_string);
        self.check_exclusive(state)?;

        if self.already_set && self.arity != Arity::Multiple {
            return Err(ParseError::AlreadySet {
                argument: self.id(settings),
            });
        }

        let value = match embedded {
            Some(value) => value,
            None => state.take_value().ok_or_else(|| ParseError::MissingValue {
                argument: self.id(settings),
            })?,
        };
        self.extract(&value, settings)?;
        Ok(Matched::Fully)
    }

    fn process_switch(&mut self, state: &mut ParseState) -> Result<Matched, ParseError> {
        let settings = state.settings();

        if self.arg_matches(state.current(), settings) {
            self.toggle(state)?;
            return Ok(Matched::Fully);
        }

        if self.combined_match(state)? {
            self.toggle(state)?;

            if settings.is_empty_combined(state.current()) {
                return Ok(Matched::Fully);
            } else {
                return Ok(Matched::Partially);
            }
        }

        Ok(Matched::No)
    }

    fn process_positional(&mut self, state: &mut ParseState) -> Result<Matched, ParseError> {
        let settings = state.settings();

        if self.already_set && self.arity != Arity::Multiple {
            return Ok(Matched::No);
        }

        if settings.has_blanks(state.current()) {
            return Ok(Matched::No);
        }

        let value = state.current().to_string();
        self.extract(&value, settings)?;
        Ok(Matched::Fully)
    }

    /// Blank out this switch's character in a combined token such as `-abc`.
    fn combined_match(&self, state: &mut ParseState) -> Result<bool, ParseError> {
        let settings = state.settings();
        let found = match settings.combined_switches(state.current()) {
            Some(rest) => rest
                .char_indices()
                .find(|(_, character)| self.flags().any(|flag| flag == *character))
                .map(|(offset, character)| (settings.flag_prefix().len() + offset, character)),
            None => None,
        };

        match found {
            Some((position, character)) => {
                state.blank(position, character);

                // The same switch twice in one token, ex: `-aba`.
                if let Some(rest) = settings.combined_switches(state.current()) {
                    if rest
                        .chars()
                        .any(|character| self.flags().any(|flag| flag == character))
                    {
                        return Err(ParseError::AlreadySet {
                            argument: self.id(settings),
                        });
                    }
                }

                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn toggle(&mut self, state: &ParseState) -> Result<(), ParseError> {
        self.check_exclusive(state)?;

        if self.already_set {
            return Err(ParseError::AlreadySet {
                argument: self.id(state.settings()),
            });
        }

        self.capture.matched();
        self.already_set = true;
        Ok(())
    }

    fn check_exclusive(&self, state: &ParseState) -> Result<(), ParseError> {
        match &self.xor_set {
            Some(first) => Err(ParseError::ExclusivityViolation {
                argument: self.id(state.settings()),
                first: first.clone(),
                second: state.original().to_string(),
            }),
            None => Ok(()),
        }
    }

    fn extract(&mut self, token: &str, settings: &Settings) -> Result<(), ParseError> {
        self.capture.matched();
        self.capture
            .capture(token)
            .map_err(|error| match error {
                InvalidCapture::NotAllowed { token, allowed } => ParseError::NotAllowed {
                    argument: self.id(settings),
                    token,
                    allowed,
                },
                InvalidCapture::InvalidConversion { .. } | InvalidCapture::MultipleValues { .. } => {
                    ParseError::InvalidValue {
                        argument: self.id(settings),
                        token: token.to_string(),
                        reason: error.to_string(),
                    }
                }
            })?;
        self.already_set = true;
        self.values_read += 1;
        Ok(())
    }
}

fn check_flag(flag: char, settings: &Settings) -> Result<(), SpecificationError> {
    let reason = if flag.is_whitespace() {
        "cannot be whitespace"
    } else if settings.flag_prefix().starts_with(flag) {
        "cannot be the flag prefix"
    } else if flag == settings.blank_char() {
        "cannot be the blank placeholder"
    } else if flag == settings.delimiter_char() {
        "cannot be the delimiter"
    } else {
        return Ok(());
    };

    Err(SpecificationError::MalformedFlag {
        flag,
        reason: reason.to_string(),
    })
}

fn check_name(name: &str, settings: &Settings) -> Result<(), SpecificationError> {
    let reason = if name.starts_with(settings.flag_prefix())
        || name.starts_with(settings.name_prefix())
    {
        "cannot start with a flag or name prefix"
    } else if name.chars().any(char::is_whitespace) {
        "cannot contain whitespace"
    } else if settings.delimiter_char() != ' ' && name.contains(settings.delimiter_char()) {
        "cannot contain the delimiter"
    } else {
        return Ok(());
    };

    Err(SpecificationError::MalformedName {
        name: name.to_string(),
        reason: reason.to_string(),
    })
}
