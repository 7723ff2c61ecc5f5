mod capture;
mod core;
mod field;
mod group;
mod parameter;

pub use self::core::*;
pub use capture::*;
pub use field::*;
pub use group::*;
pub use parameter::*;
