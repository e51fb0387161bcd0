//! Frontend module - Lexer, Parser, module loading and typo correction

pub mod token;
pub mod lexer;
pub mod parser;
pub mod module;
pub mod typo;
pub mod session;

pub use session::{Session, SessionConfig};
