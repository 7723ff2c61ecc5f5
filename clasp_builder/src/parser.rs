mod argument;
mod base;
mod error;
mod exclusion;
mod middleware;

pub(crate) use argument::*;
pub use base::{Action, Parsed};
pub(crate) use base::{ParseState, Parser};
pub use error::*;
pub(crate) use exclusion::*;
pub use middleware::*;
