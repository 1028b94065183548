//! Error types for metadata resolution.

/// Errors that can occur while loading configuration or resolving tables.
///
/// Absence is never an error here: unset attributes and column lookup misses
/// are expressed with `Option`. Only inconsistent configuration and I/O
/// problems surface as a [`GenError`].
#[derive(Debug, thiserror::Error)]
pub enum GenError {
    /// A model type selector names no known rule variant.
    #[error("Unknown model type '{0}' (expected conditional, flat, hierarchical or multiCrud)")]
    UnknownModelType(String),

    /// A target runtime name is not recognised.
    #[error("Unknown target runtime '{0}' (expected MyBatis3 or Ibatis2)")]
    UnknownTargetRuntime(String),

    /// A column type is not a JDBC type name.
    #[error("Unknown JDBC type '{0}'")]
    UnknownJdbcType(String),

    /// A domain object renaming rule does not compile.
    #[error("Invalid domain object renaming rule '{pattern}': {source}")]
    InvalidRenamingRule {
        /// The offending search pattern.
        pattern: String,
        /// The regex compilation error.
        source: regex::Error,
    },

    /// The introspector has no metadata for a configured table.
    #[error("No column metadata found for table '{0}'")]
    MissingTableMetadata(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error (reading configuration or writing output).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for resolution operations.
pub type Result<T> = std::result::Result<T, GenError>;
