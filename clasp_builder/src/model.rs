use crate::constant::*;
use crate::parser::SpecificationError;

/// How many values an argument reads each time it is matched, and how many times it may be matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arity {
    /// No value; the argument may be matched once.
    Switch,
    /// Precisely one value; the argument may be matched once.
    Single,
    /// Precisely one value per match; the argument may be matched any number of times.
    Multiple,
}

impl Arity {
    pub(crate) fn value_required(&self) -> bool {
        !matches!(self, Arity::Switch)
    }
}

impl std::fmt::Display for Arity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// The identity check applied when registering arguments with a parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateCheck {
    /// Two arguments collide when they share a flag, a name, *or* a description.
    /// Empty names and descriptions never collide.
    Loose,
    /// Two arguments collide when they share a flag or a name.
    Labels,
}

/// Lexical configuration of a command line parser.
///
/// Settings are handed to [`CommandLineParser::configured`](./struct.CommandLineParser.html#method.configured) and are immutable afterwards.
///
/// ### Example
/// ```
/// # use clasp_builder as clasp;
/// use clasp::{CommandLineParser, Parameter, Scalar, Settings};
///
/// let mut name: String = "homer".to_string();
/// let parser = CommandLineParser::configured("program", Settings::default().delimiter('='))
///     .unwrap()
///     .add(Parameter::option(Scalar::new(&mut name), "name", Some('n')))
///     .unwrap()
///     .build();
///
/// parser.parse_tokens(vec!["--name=marge"].as_slice()).unwrap();
/// assert_eq!(name, "marge");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    flag_prefix: String,
    name_prefix: String,
    delimiter: char,
    blank: char,
    ignore_name: String,
    duplicates: DuplicateCheck,
    help: bool,
    version: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            flag_prefix: FLAG_PREFIX.to_string(),
            name_prefix: NAME_PREFIX.to_string(),
            delimiter: DELIMITER,
            blank: BLANK,
            ignore_name: IGNORE_NAME.to_string(),
            duplicates: DuplicateCheck::Loose,
            help: true,
            version: true,
        }
    }
}

impl Settings {
    /// Set the prefixes for short flags (default `-`) and long names (default `--`).
    pub fn prefixes(mut self, flag_prefix: impl Into<String>, name_prefix: impl Into<String>) -> Self {
        self.flag_prefix = flag_prefix.into();
        self.name_prefix = name_prefix.into();
        self
    }

    /// Set the character separating a label from an inline value (default `' '`).
    ///
    /// With `'='`, both `-n=homer` and `-n homer` are accepted.
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set the placeholder written over matched characters of a combined switch token (default `'*'`).
    pub fn blank(mut self, blank: char) -> Self {
        self.blank = blank;
        self
    }

    /// Set the identity check applied when registering arguments (default [`DuplicateCheck::Loose`]).
    pub fn duplicates(mut self, duplicates: DuplicateCheck) -> Self {
        self.duplicates = duplicates;
        self
    }

    /// Register the built-in `-h, --help` switch (default `true`).
    pub fn help(mut self, enabled: bool) -> Self {
        self.help = enabled;
        self
    }

    /// Register the built-in `-v, --version` switch (default `true`).
    pub fn version(mut self, enabled: bool) -> Self {
        self.version = enabled;
        self
    }

    pub(crate) fn flag_prefix(&self) -> &str {
        &self.flag_prefix
    }

    pub(crate) fn name_prefix(&self) -> &str {
        &self.name_prefix
    }

    pub(crate) fn delimiter_char(&self) -> char {
        self.delimiter
    }

    pub(crate) fn blank_char(&self) -> char {
        self.blank
    }

    pub(crate) fn ignore_name(&self) -> &str {
        &self.ignore_name
    }

    pub(crate) fn duplicate_check(&self) -> DuplicateCheck {
        self.duplicates
    }

    pub(crate) fn has_help(&self) -> bool {
        self.help
    }

    pub(crate) fn has_version(&self) -> bool {
        self.version
    }

    pub(crate) fn validate(&self) -> Result<(), SpecificationError> {
        if self.flag_prefix.is_empty() || self.name_prefix.is_empty() {
            return Err(SpecificationError::InvalidSettings(
                "prefixes cannot be empty".to_string(),
            ));
        }

        if self.flag_prefix == self.name_prefix {
            return Err(SpecificationError::InvalidSettings(format!(
                "flag prefix and name prefix cannot both be '{}'",
                self.flag_prefix
            )));
        }

        // Combined switches are recognized by the flag prefix alone.
        if self.flag_prefix.starts_with(self.name_prefix.as_str()) {
            return Err(SpecificationError::InvalidSettings(format!(
                "flag prefix '{}' cannot start with the name prefix '{}'",
                self.flag_prefix, self.name_prefix
            )));
        }

        if self
            .flag_prefix
            .chars()
            .chain(self.name_prefix.chars())
            .any(char::is_whitespace)
        {
            return Err(SpecificationError::InvalidSettings(
                "prefixes cannot contain whitespace".to_string(),
            ));
        }

        if self.blank.is_whitespace() || self.blank.is_alphanumeric() {
            return Err(SpecificationError::InvalidSettings(format!(
                "'{}' cannot be the blank placeholder",
                self.blank
            )));
        }

        if self.delimiter.is_alphanumeric() || self.delimiter == self.blank {
            return Err(SpecificationError::InvalidSettings(format!(
                "'{}' cannot be the delimiter",
                self.delimiter
            )));
        }

        Ok(())
    }

    pub(crate) fn flag_label(&self, flag: char) -> String {
        format!("{}{flag}", self.flag_prefix)
    }

    pub(crate) fn name_label(&self, name: &str) -> String {
        format!("{}{name}", self.name_prefix)
    }

    /// The token that turns on ignore-rest mode: `--` or `--ignore_rest`.
    pub(crate) fn is_sentinel(&self, token: &str) -> bool {
        token
            .strip_prefix(self.flag_prefix.as_str())
            .map_or(false, |rest| rest == self.flag_prefix)
            || token
                .strip_prefix(self.name_prefix.as_str())
                .map_or(false, |rest| rest == self.ignore_name)
    }

    /// Split `-n=homer` into (`-n`, `Some("homer")`).
    /// Only the first delimiter counts, and only when it follows at least one label character.
    pub(crate) fn split_delimiter<'t>(&self, token: &'t str) -> (&'t str, Option<&'t str>) {
        match token.find(self.delimiter) {
            Some(stop) if stop > self.flag_prefix.len() => (
                &token[..stop],
                Some(&token[stop + self.delimiter.len_utf8()..]),
            ),
            _ => (token, None),
        }
    }

    /// The characters after the flag prefix, if `token` can be a combined switch token.
    pub(crate) fn combined_switches<'t>(&self, token: &'t str) -> Option<&'t str> {
        if token.starts_with(self.name_prefix.as_str()) || token.contains(self.delimiter) {
            return None;
        }

        token
            .strip_prefix(self.flag_prefix.as_str())
            .filter(|rest| !rest.is_empty())
    }

    /// Whether part of a combined switch token has already been consumed.
    pub(crate) fn has_blanks(&self, token: &str) -> bool {
        if token.starts_with(self.name_prefix.as_str()) {
            return false;
        }

        token
            .strip_prefix(self.flag_prefix.as_str())
            .map_or(false, |rest| rest.contains(self.blank))
    }

    /// Whether every switch of a combined switch token has been consumed.
    pub(crate) fn is_empty_combined(&self, token: &str) -> bool {
        if token.starts_with(self.name_prefix.as_str()) {
            return false;
        }

        token
            .strip_prefix(self.flag_prefix.as_str())
            .map_or(false, |rest| {
                !rest.is_empty() && rest.chars().all(|c| c == self.blank)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn arity_value_required() {
        assert!(!Arity::Switch.value_required());
        assert!(Arity::Single.value_required());
        assert!(Arity::Multiple.value_required());
    }

    #[test]
    fn settings_default() {
        let settings = Settings::default();
        assert_eq!(settings.flag_prefix(), "-");
        assert_eq!(settings.name_prefix(), "--");
        assert_eq!(settings.delimiter_char(), ' ');
        assert_eq!(settings.blank_char(), '*');
        assert_eq!(settings.duplicate_check(), DuplicateCheck::Loose);
        assert!(settings.has_help());
        assert!(settings.has_version());
        settings.validate().unwrap();
    }

    #[rstest]
    #[case(Settings::default().prefixes("", "--"))]
    #[case(Settings::default().prefixes("-", ""))]
    #[case(Settings::default().prefixes("-", "-"))]
    #[case(Settings::default().prefixes("--", "-"))]
    #[case(Settings::default().prefixes("//", "/"))]
    #[case(Settings::default().prefixes("- ", "--"))]
    #[case(Settings::default().blank(' '))]
    #[case(Settings::default().blank('x'))]
    #[case(Settings::default().delimiter('a'))]
    #[case(Settings::default().delimiter('*'))]
    fn settings_invalid(#[case] settings: Settings) {
        assert_matches!(
            settings.validate(),
            Err(SpecificationError::InvalidSettings(_))
        );
    }

    #[rstest]
    #[case(Settings::default().prefixes("/", "//"))]
    #[case(Settings::default().prefixes("+", "--"))]
    fn settings_valid_prefixes(#[case] settings: Settings) {
        settings.validate().unwrap();
    }

    #[rstest]
    #[case("--", true)]
    #[case("--ignore_rest", true)]
    #[case("-", false)]
    #[case("---", false)]
    #[case("--ignore", false)]
    #[case("ignore_rest", false)]
    fn sentinel(#[case] token: &str, #[case] expected: bool) {
        assert_eq!(Settings::default().is_sentinel(token), expected);
    }

    #[test]
    fn sentinel_custom_prefixes() {
        let settings = Settings::default().prefixes("/", "//");
        assert!(settings.is_sentinel("//"));
        assert!(settings.is_sentinel("//ignore_rest"));
        assert!(!settings.is_sentinel("--"));
    }

    #[rstest]
    #[case(' ', "-n homer", "-n", Some("homer"))]
    #[case(' ', "-n", "-n", None)]
    #[case('=', "-n=homer", "-n", Some("homer"))]
    #[case('=', "--name=homer", "--name", Some("homer"))]
    #[case('=', "--name=a=b", "--name", Some("a=b"))]
    #[case('=', "-n=", "-n", Some(""))]
    #[case('=', "-=homer", "-=homer", None)]
    #[case('=', "-n", "-n", None)]
    fn split_delimiter(
        #[case] delimiter: char,
        #[case] token: &str,
        #[case] label: &str,
        #[case] value: Option<&str>,
    ) {
        let settings = Settings::default().delimiter(delimiter);
        assert_eq!(settings.split_delimiter(token), (label, value));
    }

    #[rstest]
    #[case("-abc", Some("abc"))]
    #[case("-a", Some("a"))]
    #[case("-", None)]
    #[case("--abc", None)]
    #[case("abc", None)]
    #[case("-a b", None)]
    fn combined_switches(#[case] token: &str, #[case] expected: Option<&str>) {
        assert_eq!(Settings::default().combined_switches(token), expected);
    }

    #[rstest]
    #[case("-a*c", true, false)]
    #[case("-***", true, true)]
    #[case("-*", true, true)]
    #[case("-abc", false, false)]
    #[case("-", false, false)]
    #[case("--**", false, false)]
    #[case("a*b", false, false)]
    fn blanks(#[case] token: &str, #[case] has_blanks: bool, #[case] empty: bool) {
        let settings = Settings::default();
        assert_eq!(settings.has_blanks(token), has_blanks);
        assert_eq!(settings.is_empty_combined(token), empty);
    }

    #[test]
    fn labels() {
        let settings = Settings::default();
        assert_eq!(settings.flag_label('n'), "-n");
        assert_eq!(settings.name_label("name"), "--name");
    }
}
