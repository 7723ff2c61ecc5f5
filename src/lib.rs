//! `clasp` is a command line parser for Rust.
//!
//! `clasp` follows the classic flag/name style of command line parsing: short flags (`-n`), long names (`--name`), and positional values.
//! It prioritizes the following design concerns:
//! * *Type safe argument parsing*:
//! The user should not call any `&str -> T` conversion functions directly.
//! * *Declared up front, checked up front*:
//! Conflicting or malformed argument declarations are rejected when they are registered, not when the Cli is invoked.
//! * *Domain sensitive argument parsing*:
//! Values may be restricted to an allow-list, and arguments may be grouped so that only one of them is accepted.
//! * *Presentation is yours*:
//! `clasp` reports what happened (values written, help or version requested, or a [`ParseError`]).
//! It does not print, and it does not exit the process.
//!
//! # Usage
//! ```no_run
#![doc = include_str!("../demos/name_printer.rs")]
//! ```
//!
//! ```console
//! $ name_printer -n homer
//! My name is: homer
//!
//! $ name_printer -r -n homer
//! My name (spelled backwards) is: remoh
//!
//! $ name_printer -r
//! Parse error: required argument(s) missing: -n (--name).
//! usage: name_printer [-h] [-v] -n <string> [-r]
//! ```
//!
//! # Builder Api
//! Configure `clasp` by starting with a [`CommandLineParser`] and `add`ing parameters.
//! There are two classes of parameters: [`Parameter::option`] and [`Parameter::argument`].
//! Options are matched by label: a short *flag* after the flag prefix (`-n`), or a long *name* after the name prefix (`--name`).
//! Arguments are matched by position, in the order they were added.
//!
//! Each parameter takes a *field* which binds a variable of your program:
//! * [`Scalar`]: a single value, overwritten when matched (applies to both options & arguments).
//! * [`Collection`]: any number of values, each one added to a [Collectable](./prelude/trait.Collectable.html) (applies to both options & arguments).
//! `clasp` provides `Collectable` implementations for `Vec<T>` and `HashSet<T>`.
//! * [`Switch`]: no value; the `bool` is flipped when matched (options only).
//! * [`Optional`]: a single value wrapped in `Some` when matched (options only).
//!
//! All value parsing is controlled by [`std::str::FromStr`].
//! Values may be restricted further via [`Parameter::allowed`].
//!
//! Every variable keeps its initial value unless the parser writes to it.
//! A `Collection` is extended, never reset.
//!
//! ### Exclusion groups
//! An [`ExclusionGroup`] holds labeled parameters of which at most one may be matched.
//! With [`ExclusionGroup::one_of`], exactly one must be matched.
//!
//! ```no_run
#![doc = include_str!("../demos/demo_summer.rs")]
//! ```
//!
//! ### Settings
//! The prefixes, the value delimiter, the built-in `-h, --help` and `-v, --version` switches, and the duplicate check are set via [`Settings`].
//!
//! # Cli Semantics
//! * Each token is offered to the labeled parameters in the order they were added, then to the positional parameters.
//! The first parameter to claim the token consumes it.
//! * A value-taking option reads its value from the next token: `-n homer`.
//! With a non-space delimiter, the value may also be attached: `-n=homer` or `--name=homer`.
//! * Switches may be combined behind one flag prefix: `-abc` matches `-a`, `-b`, and `-c`.
//! Only switches combine; a value-taking option is always given its own token.
//! * A single-value parameter or switch matched twice is an error, including within one combined token.
//! * `--` (or `--ignore_rest`) stops the labeled parameters from matching any later token.
//! Positional parameters keep collecting the later tokens, unless marked [`Parameter::ignoreable`].
//! * Required parameters are checked once every token is consumed, and all the missing ones are reported together.
//! * Matching the built-in help or version switch stops parsing immediately and reports an [`Action`].
//!
//! # Features
//! * `tracing_debug`: Emit debug logs of the parser configuration and token matching (via `tracing`).
pub use clasp_builder::*;
