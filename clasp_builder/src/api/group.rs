use std::str::FromStr;

use crate::api::Parameter;
use crate::parser::{Argument, Mode, SpecificationError};

/// A set of mutually exclusive labeled parameters.
/// Used with [`CommandLineParser::group`](./struct.CommandLineParser.html#method.group).
///
/// Matching one member excludes every other member: a later match of any of them fails with
/// [`ParseError::ExclusivityViolation`](./enum.ParseError.html#variant.ExclusivityViolation).
///
/// ### Example
/// ```
/// # use clasp_builder as clasp;
/// use clasp::{CommandLineParser, ExclusionGroup, Parameter, ParseError, Scalar};
///
/// let mut file: String = String::default();
/// let mut url: String = String::default();
/// let parser = CommandLineParser::new("program")
///     .group(
///         ExclusionGroup::one_of()
///             .add(Parameter::option(Scalar::new(&mut file), "file", Some('f')))
///             .unwrap()
///             .add(Parameter::option(Scalar::new(&mut url), "url", Some('u')))
///             .unwrap(),
///     )
///     .unwrap()
///     .build();
///
/// let error = parser.parse_tokens(vec!["-f", "a.txt", "-u", "b.com"].as_slice()).unwrap_err();
/// assert!(matches!(error, ParseError::ExclusivityViolation { .. }));
/// ```
pub struct ExclusionGroup<'a> {
    members: Vec<Argument<'a>>,
    required: bool,
}

impl<'a> std::fmt::Debug for ExclusionGroup<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExclusionGroup")
            .field("members", &self.members)
            .field("required", &self.required)
            .finish()
    }
}

impl<'a> ExclusionGroup<'a> {
    /// Create a group of which at most one member may be matched.
    /// Members are optional, whatever their own requiredness.
    pub fn either_of() -> Self {
        Self {
            members: Vec::default(),
            required: false,
        }
    }

    /// Create a group of which exactly one member must be matched.
    /// The group counts as a single required argument; an unmatched group is reported as `{-a | -b}`.
    pub fn one_of() -> Self {
        Self {
            members: Vec::default(),
            required: true,
        }
    }

    /// Add a labeled parameter to the group.
    ///
    /// Positional parameters cannot be grouped, since they are matched by order rather than by label.
    pub fn add<T: FromStr + PartialEq + 'a>(
        mut self,
        parameter: Parameter<'a, T>,
    ) -> Result<Self, SpecificationError> {
        if parameter.mode() == Mode::Positional {
            return Err(SpecificationError::InvalidGroup(format!(
                "positional argument '{}' cannot be a member of an exclusion group",
                parameter.consume().name()
            )));
        }

        self.members.push(parameter.consume());
        Ok(self)
    }

    pub(super) fn consume(self) -> (Vec<Argument<'a>>, bool) {
        (self.members, self.required)
    }
}
