//! Utility module

mod location;
mod error;
pub mod naming;

pub use location::Location;
pub use error::{Error, ErrorKind, Result};
