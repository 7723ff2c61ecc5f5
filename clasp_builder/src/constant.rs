pub(crate) const FLAG_PREFIX: &str = "-";
pub(crate) const NAME_PREFIX: &str = "--";
// A space means "the value is the next token".
pub(crate) const DELIMITER: char = ' ';
// Written over each character of a combined switch token once its switch has matched.
pub(crate) const BLANK: char = '*';
pub(crate) const IGNORE_NAME: &str = "ignore_rest";

pub(crate) const HELP_NAME: &str = "help";
pub(crate) const HELP_SHORT: char = 'h';
pub(crate) const HELP_DESCRIPTION: &str = "Displays usage information and exits.";
pub(crate) const VERSION_NAME: &str = "version";
pub(crate) const VERSION_SHORT: char = 'v';
pub(crate) const VERSION_DESCRIPTION: &str = "Displays version information and exits.";

pub(crate) const REQUIRE_LABEL: &str = "required";
pub(crate) const ONE_OF_REQUIRE_LABEL: &str = "OR required";
pub(crate) const VALUE_ID: &str = "val";
