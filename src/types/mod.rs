//! Type system - registry, type model, graph construction and polymorph
//! resolution

pub mod type_system;
pub mod registry;
pub mod graph;
pub mod polymorph;

pub use type_system::*;
pub use registry::{FieldRef, Registry};
