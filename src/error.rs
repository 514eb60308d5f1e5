//! Error types for write-job configuration

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors raised while configuring or validating a write job.
///
/// Every variant is fatal: the job is aborted before any file is opened.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Unsupported HDFS file type: {0}")]
    UnsupportedFormat(String),

    #[error("The charset {0} is not supported.")]
    UnsupportedCharset(String),

    #[error("No {0} supplied.")]
    MissingField(&'static str),

    #[error("defaultFS should start with {prefix}, got: {default_fs}")]
    InvalidScheme {
        default_fs: String,
        prefix: &'static str,
    },

    #[error("Unsupported write mode: {0} (expected APPEND or OVERWRITE)")]
    InvalidWriteMode(String),

    #[error("{field} has {names} names but {types} types")]
    ColumnCountMismatch {
        field: &'static str,
        names: usize,
        types: usize,
    },

    #[error("rowGroupSize must be positive")]
    InvalidRowGroupSize,

    #[error("Unsupported column type: {0}")]
    UnsupportedColumnType(String),

    #[error("Unsupported {format} compression: {codec}")]
    UnsupportedCompression {
        format: &'static str,
        codec: String,
    },
}

impl ConfigError {
    /// Name of the field the error refers to, when there is one.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::MissingField(field) => Some(field),
            Self::InvalidScheme { .. } => Some("defaultFS"),
            Self::UnsupportedCharset(_) => Some("charsetName"),
            Self::InvalidWriteMode(_) => Some("writeMode"),
            Self::ColumnCountMismatch { field, .. } => Some(field),
            Self::InvalidRowGroupSize => Some("rowGroupSize"),
            Self::UnsupportedCompression { .. } => Some("compress"),
            Self::UnsupportedFormat(_) | Self::UnsupportedColumnType(_) => None,
        }
    }
}
