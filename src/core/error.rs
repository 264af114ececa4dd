//! Typed error handling for link records
//!
//! Only genuinely invalid states surface here. Normal absence of data (an
//! empty email, an unsaved record) is represented by [`ResolvedUrl`] and
//! empty strings, and a dangling reference is the `Broken` sentinel rather
//! than an error.
//!
//! # Error Categories
//!
//! - [`LinkableError::ConstraintViolation`]: a write was blocked by validation
//! - [`LinkableError::NotFound`]: no record with the requested id
//! - [`LinkableError::Storage`]: the persistence layer failed (propagated unchanged)
//! - [`LinkableError::Config`]: configuration could not be loaded or is inconsistent
//!
//! [`ResolvedUrl`]: crate::core::link::ResolvedUrl

use thiserror::Error;

/// The main error type for link operations
#[derive(Debug, Error)]
pub enum LinkableError {
    /// Validation failed; the write did not happen
    #[error("Link {id} failed validation: {message}")]
    ConstraintViolation { id: u64, message: String },

    /// No record with this id exists in the store
    #[error("Link {id} not found")]
    NotFound { id: u64 },

    /// The persistence layer reported a failure
    #[error("Storage error: {0}")]
    Storage(#[source] anyhow::Error),

    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl LinkableError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            LinkableError::ConstraintViolation { .. } => "CONSTRAINT_VIOLATION",
            LinkableError::NotFound { .. } => "LINK_NOT_FOUND",
            LinkableError::Storage(_) => "STORAGE_ERROR",
            LinkableError::Config(e) => e.error_code(),
        }
    }

    /// Whether this error carries a message meant for an editor
    pub fn is_user_facing(&self) -> bool {
        matches!(self, LinkableError::ConstraintViolation { .. })
    }
}

/// Errors related to configuration and the link type registry
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration
    #[error("Failed to parse config{}: {message}", .file.as_ref().map(|f| format!(" file '{}'", f)).unwrap_or_default())]
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// Configuration file could not be read
    #[error("IO error reading '{path}': {message}")]
    IoError { path: String, message: String },

    /// Invalid value in configuration
    #[error("Invalid value '{value}' for field '{field}': {message}")]
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },

    /// A link type key was registered twice
    #[error("Link type '{key}' is already registered")]
    DuplicateLinkType { key: String },

    /// A provider was bound to a key that is not registered
    #[error("Link type '{key}' is not registered")]
    UnknownLinkType { key: String },

    /// A provider was bound to a type that links to a raw value
    #[error("Link type '{key}' does not reference another entity")]
    NotAReferenceType { key: String },

    /// The process-wide registry was initialized twice
    #[error("The global link type registry is already initialized")]
    AlreadyInitialized,
}

impl ConfigError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ConfigError::ParseError { .. } => "CONFIG_PARSE_ERROR",
            ConfigError::IoError { .. } => "CONFIG_IO_ERROR",
            ConfigError::InvalidValue { .. } => "CONFIG_INVALID_VALUE",
            ConfigError::DuplicateLinkType { .. } => "DUPLICATE_LINK_TYPE",
            ConfigError::UnknownLinkType { .. } => "UNKNOWN_LINK_TYPE",
            ConfigError::NotAReferenceType { .. } => "NOT_A_REFERENCE_TYPE",
            ConfigError::AlreadyInitialized => "REGISTRY_ALREADY_INITIALIZED",
        }
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError {
            file: None,
            message: err.to_string(),
        }
    }
}

/// A specialized Result type for link operations
pub type LinkableResult<T> = Result<T, LinkableError>;
