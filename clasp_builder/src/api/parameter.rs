use std::str::FromStr;

use crate::api::capture::{convert, CliArgument, CliOption, GenericCapturable, InvalidCapture};
use crate::model::Arity;
use crate::parser::{AnonymousCapturable, Argument, Mode};

pub(crate) struct AnonymousCapture<'a, T: 'a> {
    field: Box<dyn GenericCapturable<'a, T> + 'a>,
    // The permitted values, and their rendering for diagnostics.
    allowed: Option<(Vec<T>, String)>,
}

impl<'a, T> AnonymousCapture<'a, T> {
    pub(crate) fn bind(field: impl GenericCapturable<'a, T> + 'a) -> Self {
        Self {
            field: Box::new(field),
            allowed: None,
        }
    }
}

impl<'a, T: FromStr + PartialEq> AnonymousCapturable for AnonymousCapture<'a, T> {
    fn matched(&mut self) {
        self.field.matched();
    }

    fn capture(&mut self, token: &str) -> Result<(), InvalidCapture> {
        let value: T = convert(token)?;

        if let Some((values, rendered)) = &self.allowed {
            if !values.contains(&value) {
                return Err(InvalidCapture::NotAllowed {
                    token: token.to_string(),
                    allowed: rendered.clone(),
                });
            }
        }

        self.field.capture(value);
        Ok(())
    }
}

pub(super) struct ParameterInner<'a, T> {
    mode: Mode,
    field: AnonymousCapture<'a, T>,
    arity: Arity,
    name: String,
    flag: Option<char>,
    aliases: Vec<(Option<char>, String)>,
    description: String,
    required: bool,
    require_label: Option<String>,
    ignoreable: Option<bool>,
    meta: Option<String>,
}

impl<'a, T> std::fmt::Debug for ParameterInner<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mode = match &self.mode {
            Mode::Labeled => "Labeled",
            Mode::Positional => "Positional",
        };
        let flag = match &self.flag {
            Some(flag) => format!(" -{flag},"),
            None => "".to_string(),
        };

        write!(
            f,
            "{mode}[{t}, {arity}, {name},{flag} {description}]",
            t = std::any::type_name::<T>(),
            arity = self.arity,
            name = self.name,
            description = self.description,
        )
    }
}

impl<'a, T: FromStr + PartialEq + 'a> From<ParameterInner<'a, T>> for Argument<'a> {
    fn from(value: ParameterInner<'a, T>) -> Self {
        let ParameterInner {
            mode,
            field,
            arity,
            name,
            flag,
            aliases,
            description,
            required,
            require_label,
            ignoreable,
            meta,
        } = value;
        let rendered = field.allowed.as_ref().map(|(_, rendered)| rendered.clone());
        let mut argument = Argument::new(mode, flag, name, arity, Box::new(field));
        argument.aliases = aliases;
        argument.description = description;
        argument.required = required;

        if let Some(require_label) = require_label {
            argument.require_label = require_label;
        }

        if let Some(ignoreable) = ignoreable {
            argument.ignoreable = ignoreable;
        }

        // An explicit meta wins over the allow-list, which wins over the default.
        if let Some(meta) = meta.or(rendered) {
            argument.meta = meta;
        }

        argument
    }
}

/// An argument for the command line parser, either labeled (`-f`/`--name`) or positional.
/// Used with [`CommandLineParser::add`](./struct.CommandLineParser.html#method.add) and [`ExclusionGroup::add`](./struct.ExclusionGroup.html#method.add).
pub struct Parameter<'a, T>(ParameterInner<'a, T>);

impl<'a, T: FromStr + PartialEq + 'a> Parameter<'a, T> {
    /// Create a labeled parameter, matched by `--name` or by `-flag`.
    /// Either may be left out (an empty `name` or a `None` flag), but not both.
    ///
    /// Labeled parameters are optional until marked [`Parameter::required`].
    ///
    /// ### Example
    /// ```
    /// # use clasp_builder as clasp;
    /// use clasp::{Parameter, Switch};
    ///
    /// let mut verbose: bool = false;
    /// Parameter::option(Switch::new(&mut verbose), "verbose", Some('V'));
    /// ```
    pub fn option(
        field: impl GenericCapturable<'a, T> + CliOption + 'a,
        name: impl Into<String>,
        flag: Option<char>,
    ) -> Self {
        let arity = field.arity();
        Self(ParameterInner {
            mode: Mode::Labeled,
            field: AnonymousCapture::bind(field),
            arity,
            name: name.into(),
            flag,
            aliases: Vec::default(),
            description: String::default(),
            required: false,
            require_label: None,
            ignoreable: None,
            meta: None,
        })
    }

    /// Create a positional parameter, matched by the order of the bare tokens.
    ///
    /// A [`Scalar`](./struct.Scalar.html) positional is required, claiming exactly one token.
    /// A [`Collection`](./struct.Collection.html) positional is optional, claiming every remaining unclaimed token.
    ///
    /// ### Example
    /// ```
    /// # use clasp_builder as clasp;
    /// use clasp::{Parameter, Scalar};
    ///
    /// let mut file: String = String::default();
    /// Parameter::argument(Scalar::new(&mut file), "file");
    /// ```
    pub fn argument(
        field: impl GenericCapturable<'a, T> + CliArgument + 'a,
        name: impl Into<String>,
    ) -> Self {
        let arity = field.arity();
        Self(ParameterInner {
            mode: Mode::Positional,
            field: AnonymousCapture::bind(field),
            arity,
            name: name.into(),
            flag: None,
            aliases: Vec::default(),
            description: String::default(),
            required: arity != Arity::Multiple,
            require_label: None,
            ignoreable: None,
            meta: None,
        })
    }

    /// Mark this parameter as required: parsing fails if it is not matched.
    ///
    /// ### Example
    /// ```
    /// # use clasp_builder as clasp;
    /// use clasp::{Parameter, Scalar};
    ///
    /// let mut name: String = String::default();
    /// Parameter::option(Scalar::new(&mut name), "name", Some('n'))
    ///     .required();
    /// ```
    pub fn required(self) -> Self {
        let mut inner = self.0;
        inner.required = true;
        Self(inner)
    }

    /// Document the description for this parameter.
    /// If repeated, only the final description will apply to the parameter.
    ///
    /// Descriptions are presentation only, although the default [`DuplicateCheck`](./enum.DuplicateCheck.html) also compares them.
    ///
    /// ### Example
    /// ```
    /// # use clasp_builder as clasp;
    /// use clasp::{Parameter, Scalar};
    ///
    /// let mut name: String = String::default();
    /// Parameter::option(Scalar::new(&mut name), "name", Some('n'))
    ///     .description("--this will get discarded--")
    ///     .description("The name to greet.");
    /// ```
    pub fn description(self, description: impl Into<String>) -> Self {
        let mut inner = self.0;
        inner.description = description.into();
        Self(inner)
    }

    /// Replace the label shown for a required parameter (default `required`).
    pub fn require_label(self, label: impl Into<String>) -> Self {
        let mut inner = self.0;
        inner.require_label = Some(label.into());
        Self(inner)
    }

    /// Name the value in the usage forms, ex: `-n <string>` rather than the default `-n <val>`.
    pub fn meta(self, value_id: impl Into<String>) -> Self {
        let mut inner = self.0;
        inner.meta = Some(value_id.into());
        Self(inner)
    }

    /// Whether this parameter stops matching after the ignore-rest sentinel (`--`).
    /// Labeled parameters do by default; positional parameters do not.
    pub fn ignoreable(self, ignoreable: bool) -> Self {
        let mut inner = self.0;
        inner.ignoreable = Some(ignoreable);
        Self(inner)
    }

    /// Add an alternative flag and/or name which behaves exactly like the primary ones.
    /// Only meaningful for labeled parameters; positional parameters are never matched by label.
    ///
    /// ### Example
    /// ```
    /// # use clasp_builder as clasp;
    /// use clasp::{CommandLineParser, Parameter, Scalar};
    ///
    /// let mut colour: String = String::default();
    /// let parser = CommandLineParser::new("program")
    ///     .add(Parameter::option(Scalar::new(&mut colour), "colour", Some('c')).alias(None, "color"))
    ///     .unwrap()
    ///     .build();
    ///
    /// parser.parse_tokens(vec!["--color", "red"].as_slice()).unwrap();
    /// assert_eq!(colour, "red");
    /// ```
    pub fn alias(self, flag: Option<char>, name: impl Into<String>) -> Self {
        let mut inner = self.0;
        inner.aliases.push((flag, name.into()));
        Self(inner)
    }

    pub(super) fn mode(&self) -> Mode {
        self.0.mode
    }

    pub(super) fn consume(self) -> Argument<'a> {
        Argument::from(self.0)
    }
}

impl<'a, T: FromStr + PartialEq + std::fmt::Display + 'a> Parameter<'a, T> {
    /// Restrict the values this parameter accepts.
    /// A value outside the list fails the parse with [`ParseError::NotAllowed`](./enum.ParseError.html#variant.NotAllowed).
    /// If repeated, only the final list will apply to the parameter.
    ///
    /// Unless [`Parameter::meta`] is given, the usage forms show the list: `-n <homer|marge>`.
    ///
    /// ### Example
    /// ```
    /// # use clasp_builder as clasp;
    /// use clasp::{CommandLineParser, Parameter, ParseError, Scalar};
    ///
    /// let mut name: String = String::default();
    /// let parser = CommandLineParser::new("program")
    ///     .add(
    ///         Parameter::option(Scalar::new(&mut name), "name", Some('n'))
    ///             .allowed(vec!["homer".to_string(), "marge".to_string()]),
    ///     )
    ///     .unwrap()
    ///     .build();
    ///
    /// let error = parser.parse_tokens(vec!["-n", "bart"].as_slice()).unwrap_err();
    /// assert!(matches!(error, ParseError::NotAllowed { .. }));
    /// ```
    pub fn allowed(self, values: Vec<T>) -> Self {
        let mut inner = self.0;
        let rendered = values
            .iter()
            .map(|value| value.to_string())
            .collect::<Vec<String>>()
            .join("|");
        inner.field.allowed = if values.is_empty() {
            None
        } else {
            Some((values, rendered))
        };
        Self(inner)
    }
}
