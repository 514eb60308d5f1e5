use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::{ConfigError, Result};
use crate::writer::WriterDescriptor;

pub mod orc;
pub mod parquet;
pub mod text;

pub use self::orc::{OrcCompression, OrcOptions};
pub use self::parquet::ParquetOptions;
pub use self::text::{TextCompression, TextOptions};

/// File formats an HDFS write job can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FormatKind {
    /// Delimited text
    Text,
    /// Columnar binary (ORC stripes)
    Orc,
    /// Row-group binary (Parquet)
    Parquet,
}

/// Dispatch table keyed by the upper-cased type name.
/// Adding a format means adding a row here and a variant above.
const FORMAT_TABLE: &[(&str, FormatKind)] = &[
    ("TEXT", FormatKind::Text),
    ("ORC", FormatKind::Orc),
    ("PARQUET", FormatKind::Parquet),
];

impl FormatKind {
    /// Look up a format by type name, ignoring case
    pub fn from_type_name(type_name: &str) -> Result<Self> {
        let normalized = type_name.to_uppercase();
        FORMAT_TABLE
            .iter()
            .find(|(name, _)| *name == normalized)
            .map(|(_, kind)| *kind)
            .ok_or_else(|| ConfigError::UnsupportedFormat(type_name.to_string()))
    }

    pub fn name(&self) -> &'static str {
        match self {
            FormatKind::Text => "TEXT",
            FormatKind::Orc => "ORC",
            FormatKind::Parquet => "PARQUET",
        }
    }

    pub fn all() -> impl Iterator<Item = FormatKind> {
        FORMAT_TABLE.iter().map(|(_, kind)| *kind)
    }
}

impl FromStr for FormatKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_type_name(s)
    }
}

impl fmt::Display for FormatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Format-specific settings resolved from a validated descriptor.
///
/// This is what the format writer for each kind actually consumes; the
/// variant always matches the descriptor's [`FormatKind`].
#[derive(Debug, Clone)]
pub enum FormatOptions {
    Text(TextOptions),
    Orc(OrcOptions),
    Parquet(ParquetOptions),
}

impl FormatOptions {
    pub fn resolve(descriptor: &WriterDescriptor) -> Result<Self> {
        Ok(match descriptor.format_kind() {
            FormatKind::Text => FormatOptions::Text(TextOptions::from_descriptor(descriptor)?),
            FormatKind::Orc => FormatOptions::Orc(OrcOptions::from_descriptor(descriptor)?),
            FormatKind::Parquet => {
                FormatOptions::Parquet(ParquetOptions::from_descriptor(descriptor)?)
            }
        })
    }

    pub fn kind(&self) -> FormatKind {
        match self {
            FormatOptions::Text(_) => FormatKind::Text,
            FormatOptions::Orc(_) => FormatKind::Orc,
            FormatOptions::Parquet(_) => FormatKind::Parquet,
        }
    }

    /// Extension appended to generated file names, if any
    pub fn file_extension(&self) -> Option<&'static str> {
        match self {
            FormatOptions::Text(options) => options.file_extension(),
            FormatOptions::Orc(options) => Some(options.file_extension()),
            FormatOptions::Parquet(options) => Some(options.file_extension()),
        }
    }
}

/// Upper-cased codec name, or `None` when no codec was requested
pub(crate) fn normalize_codec(compress: Option<&str>) -> Option<String> {
    compress
        .map(str::trim)
        .filter(|codec| !codec.is_empty())
        .map(str::to_uppercase)
}
