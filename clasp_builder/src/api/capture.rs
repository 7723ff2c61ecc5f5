use std::str::FromStr;
use thiserror::Error;

use crate::model::Arity;

/// Marker trait for capturable types that can formulate a labeled (`-f` / `--name`) argument in the Cli.
pub trait CliOption {}

/// Marker trait for capturable types that can formulate a positional argument in the Cli.
pub trait CliArgument {}

/// Behaviour to capture an explicit generic type T.
///
/// We use this at the bottom of the command line parser object graph so the compiler can maintain each field's type.
#[doc(hidden)]
pub trait GenericCapturable<'a, T> {
    /// Declare that the parameter has been matched.
    fn matched(&mut self);

    /// Capture a converted value into the variable behind this parameter.
    fn capture(&mut self, value: T);

    /// Get the `Arity` for this implementation.
    fn arity(&self) -> Arity;
}

#[derive(Debug, Error, PartialEq, Eq)]
#[doc(hidden)]
pub enum InvalidCapture {
    #[error("cannot convert '{token}' to {type_name}")]
    InvalidConversion {
        token: String,
        type_name: &'static str,
    },
    #[error("parsed more than one {type_name} value from '{token}'")]
    MultipleValues {
        token: String,
        type_name: &'static str,
    },
    #[error("'{token}' is not in the allowed list")]
    NotAllowed { token: String, allowed: String },
}

/// Convert a single token into `T`.
///
/// Surrounding whitespace is tolerated, but a token which splits into more than one convertible
/// value (ex: `"1 2"` for a `u32`) is rejected rather than truncated to its first value.
pub(crate) fn convert<T: FromStr>(token: &str) -> Result<T, InvalidCapture> {
    if let Ok(value) = T::from_str(token) {
        return Ok(value);
    }

    let trimmed = token.trim();
    if trimmed != token {
        if let Ok(value) = T::from_str(trimmed) {
            return Ok(value);
        }
    }

    let pieces: Vec<&str> = trimmed.split_whitespace().collect();
    if pieces.len() > 1 && pieces.iter().all(|piece| T::from_str(piece).is_ok()) {
        Err(InvalidCapture::MultipleValues {
            token: token.to_string(),
            type_name: std::any::type_name::<T>(),
        })
    } else {
        Err(InvalidCapture::InvalidConversion {
            token: token.to_string(),
            type_name: std::any::type_name::<T>(),
        })
    }
}
