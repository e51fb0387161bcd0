//! Dragoman schema compiler front end
//!
//! Parses `.dgl` schema files into a validated, read-only type graph for
//! code emitters.

pub mod utils;
pub mod frontend;
pub mod types;
pub mod feedback;

pub use frontend::parser::FileEntry;
pub use frontend::{Session, SessionConfig};
pub use types::Registry;
pub use utils::{Error, ErrorKind, Location, Result};
