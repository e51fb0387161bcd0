//! Error handling for Dragoman

use std::path::PathBuf;

use crate::utils::Location;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Broad category of a compiler error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Unrecognized character sequence
    Lexical,
    /// Token sequence matches no grammar production
    Syntax,
    /// Unknown type, field or entry name
    Resolution,
    /// Duplicates, cross-case mismatches, bad dictionary keys, missing modules
    Consistency,
    /// File system failures
    Io,
}

/// Compiler error
#[derive(Error, Debug, Clone)]
pub enum Error {
    // ==================== Lexical Errors ====================

    #[error("Syntax error. Unexpected \"{text}\".")]
    UnrecognizedInput { text: String, location: Location },

    // ==================== Syntax Errors ====================

    #[error("Unexpected token: expected {expected}, got {got}")]
    UnexpectedToken {
        expected: String,
        got: String,
        location: Location,
    },

    // ==================== Resolution Errors ====================

    #[error("Unknown type \"{name}\".")]
    UnresolvedType { name: String, location: Location },

    #[error("Type '{type_name}' does not have entry '{field}'.")]
    UnknownField {
        field: String,
        type_name: String,
        location: Location,
    },

    #[error("The Enum type '{enum_name}' does not have any entry named '{entry}'.")]
    UnknownEnumEntry {
        enum_name: String,
        entry: String,
        location: Location,
    },

    // ==================== Consistency Errors ====================

    #[error("Name collision for types '{name}', defined at:\n- {previous}\n- {location}")]
    DuplicateType {
        name: String,
        previous: Location,
        location: Location,
    },

    #[error("Type definition '{name}' collides with base type name.")]
    BuiltinCollision { name: String, location: Location },

    #[error("Duplicate name '{name}'")]
    DuplicateEntryName { name: String, location: Location },

    #[error("Duplicate tag '{tag}'")]
    DuplicateTag { tag: String, location: Location },

    #[error("Duplicate case '{name}'")]
    DuplicateCase { name: String, location: Location },

    #[error("Duplicate shared field '{name}'")]
    DuplicateShared { name: String, location: Location },

    #[error("Enum type '{name}' must be based on a primitive type, not '{base}'.")]
    InvalidEnumBase {
        name: String,
        base: String,
        location: Location,
    },

    #[error("Invalid type '{type_name}' used for polymorph case '{case}'.")]
    InvalidCaseType {
        case: String,
        type_name: String,
        location: Location,
    },

    #[error("No cases defined in Polymorph type '{name}'.")]
    NoCases { name: String, location: Location },

    #[error(
        "Entry '{field}' of case '{case}' uses tag '{tag}', but case '{first_case}' uses tag '{first_tag}'."
    )]
    DiscriminantTagMismatch {
        field: String,
        case: String,
        tag: String,
        first_case: String,
        first_tag: String,
        location: Location,
    },

    #[error("Entry '{field}' of case '{case}' must be of an Enum type, not '{type_name}'.")]
    DiscriminantNotEnum {
        field: String,
        case: String,
        type_name: String,
        location: Location,
    },

    #[error(
        "Entry '{field}' of case '{case}' uses Enum type '{got}', but previous cases use '{expected}'."
    )]
    DiscriminantEnumMismatch {
        field: String,
        case: String,
        expected: String,
        got: String,
        location: Location,
    },

    #[error(
        "Shared entry '{field}' of case '{case}' is of type '{got}', but case '{first_case}' uses '{expected}'."
    )]
    SharedTypeMismatch {
        field: String,
        case: String,
        first_case: String,
        expected: String,
        got: String,
        location: Location,
    },

    #[error(
        "Shared entry '{field}' of case '{case}' uses tag '{tag}', but case '{first_case}' uses tag '{first_tag}'."
    )]
    SharedTagMismatch {
        field: String,
        case: String,
        tag: String,
        first_case: String,
        first_tag: String,
        location: Location,
    },

    #[error("Type '{type_name}' has no entries to use as dictionary key '{field}'.")]
    NotKeyable {
        field: String,
        type_name: String,
        location: Location,
    },

    #[error(
        "Entry '{field}' of type '{type_name}' cannot be used as a dictionary key: '{key_type}' is neither a primitive nor an Enum."
    )]
    InvalidKeyType {
        field: String,
        type_name: String,
        key_type: String,
        location: Location,
    },

    #[error("Module '{name}' not found. Searched in: {searched:?}")]
    MissingModule {
        name: String,
        searched: Vec<PathBuf>,
        location: Location,
    },

    #[error("Circular module dependency detected: {chain}")]
    CircularRequire { chain: String, location: Location },

    // ==================== IO Errors ====================

    #[error("IO error on {path:?}: {message}")]
    Io { path: PathBuf, message: String },
}

impl Error {
    /// Get the location associated with this error
    pub fn location(&self) -> Option<&Location> {
        match self {
            Self::UnrecognizedInput { location, .. }
            | Self::UnexpectedToken { location, .. }
            | Self::UnresolvedType { location, .. }
            | Self::UnknownField { location, .. }
            | Self::UnknownEnumEntry { location, .. }
            | Self::DuplicateType { location, .. }
            | Self::BuiltinCollision { location, .. }
            | Self::DuplicateEntryName { location, .. }
            | Self::DuplicateTag { location, .. }
            | Self::DuplicateCase { location, .. }
            | Self::DuplicateShared { location, .. }
            | Self::InvalidEnumBase { location, .. }
            | Self::InvalidCaseType { location, .. }
            | Self::NoCases { location, .. }
            | Self::DiscriminantTagMismatch { location, .. }
            | Self::DiscriminantNotEnum { location, .. }
            | Self::DiscriminantEnumMismatch { location, .. }
            | Self::SharedTypeMismatch { location, .. }
            | Self::SharedTagMismatch { location, .. }
            | Self::NotKeyable { location, .. }
            | Self::InvalidKeyType { location, .. }
            | Self::MissingModule { location, .. }
            | Self::CircularRequire { location, .. } => Some(location),
            Self::Io { .. } => None,
        }
    }

    /// Get the category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnrecognizedInput { .. } => ErrorKind::Lexical,
            Self::UnexpectedToken { .. } => ErrorKind::Syntax,
            Self::UnresolvedType { .. }
            | Self::UnknownField { .. }
            | Self::UnknownEnumEntry { .. } => ErrorKind::Resolution,
            Self::DuplicateType { .. }
            | Self::BuiltinCollision { .. }
            | Self::DuplicateEntryName { .. }
            | Self::DuplicateTag { .. }
            | Self::DuplicateCase { .. }
            | Self::DuplicateShared { .. }
            | Self::InvalidEnumBase { .. }
            | Self::InvalidCaseType { .. }
            | Self::NoCases { .. }
            | Self::DiscriminantTagMismatch { .. }
            | Self::DiscriminantNotEnum { .. }
            | Self::DiscriminantEnumMismatch { .. }
            | Self::SharedTypeMismatch { .. }
            | Self::SharedTagMismatch { .. }
            | Self::NotKeyable { .. }
            | Self::InvalidKeyType { .. }
            | Self::MissingModule { .. }
            | Self::CircularRequire { .. } => ErrorKind::Consistency,
            Self::Io { .. } => ErrorKind::Io,
        }
    }

    /// Wrap a `std::io::Error` raised while touching `path`
    pub fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        let loc = Location::dummy();
        let err = Error::UnresolvedType { name: "intger".into(), location: loc.clone() };
        assert_eq!(err.kind(), ErrorKind::Resolution);
        assert_eq!(err.location(), Some(&loc));

        let err = Error::DuplicateTag { tag: "f0".into(), location: loc };
        assert_eq!(err.kind(), ErrorKind::Consistency);

        let err = Error::io("missing.dgl", std::io::Error::from(std::io::ErrorKind::NotFound));
        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(err.location().is_none());
    }
}
