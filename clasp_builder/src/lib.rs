//! Builder module for `clasp`.
//! See [documentation root](https://docs.rs/clasp/latest/clasp/index.html) for full details.
#![deny(missing_docs)]
mod api;
mod constant;
mod model;
mod parser;
#[allow(missing_docs)]
pub mod prelude;

pub use api::*;
pub use model::*;
pub use parser::{Action, GeneralParser, ParseError, Parsed, SpecificationError};

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
