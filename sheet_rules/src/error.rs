//! Error taxonomy for sheet operations.
//!
//! Every rejected operation leaves the character untouched and reports one of
//! these errors so the caller can show a notice and carry on.

use thiserror::Error;

/// Errors returned by character operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SheetError {
    /// A precondition on the character was not met (unspent points, empty required text).
    #[error("{0}")]
    Validation(String),

    /// A feature with the same name (case-insensitive) is already attached.
    #[error("the feature '{name}' has already been added")]
    Duplicate { name: String },

    /// The referenced feature, resource, or selection does not exist.
    #[error("{what} '{name}' was not found")]
    NotFound { what: &'static str, name: String },

    /// Malformed or missing user input.
    #[error("{0}")]
    Input(String),
}

impl SheetError {
    pub fn validation(message: impl Into<String>) -> Self {
        SheetError::Validation(message.into())
    }

    pub fn input(message: impl Into<String>) -> Self {
        SheetError::Input(message.into())
    }

    pub fn not_found(what: &'static str, name: impl Into<String>) -> Self {
        SheetError::NotFound {
            what,
            name: name.into(),
        }
    }

    /// The category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SheetError::Validation(_) => ErrorKind::Validation,
            SheetError::Duplicate { .. } => ErrorKind::Duplicate,
            SheetError::NotFound { .. } => ErrorKind::NotFound,
            SheetError::Input(_) => ErrorKind::Input,
        }
    }
}

/// Error categories, used to title user-facing notices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    Duplicate,
    NotFound,
    Input,
}

impl ErrorKind {
    /// Short heading for a notice about this kind of error.
    pub fn title(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "Validation Error",
            ErrorKind::Duplicate => "Duplicate Feature",
            ErrorKind::NotFound => "Not Found",
            ErrorKind::Input => "Input Error",
        }
    }
}

/// Errors raised while loading a feature catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to parse feature catalog: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("feature '{0}' is defined more than once")]
    DuplicateName(String),

    #[error("feature '{0}' lists no stats to increase")]
    EmptyStatList(String),

    #[error("feature catalog entries need a name")]
    EmptyName,
}
