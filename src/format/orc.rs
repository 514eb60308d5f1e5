use super::normalize_codec;
use crate::error::{ConfigError, Result};
use crate::writer::WriterDescriptor;

/// ORC stripe compression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrcCompression {
    None,
    Zlib,
    Snappy,
    Lzo,
    Lz4,
    Zstd,
}

impl OrcCompression {
    fn from_codec(compress: Option<&str>) -> Result<Self> {
        match normalize_codec(compress).as_deref() {
            // ORC's own default
            None | Some("ZLIB") => Ok(OrcCompression::Zlib),
            Some("NONE") => Ok(OrcCompression::None),
            Some("SNAPPY") => Ok(OrcCompression::Snappy),
            Some("LZO") => Ok(OrcCompression::Lzo),
            Some("LZ4") => Ok(OrcCompression::Lz4),
            Some("ZSTD") => Ok(OrcCompression::Zstd),
            Some(_) => Err(ConfigError::UnsupportedCompression {
                format: "ORC",
                codec: compress.unwrap_or_default().to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct OrcOptions {
    compression: OrcCompression,
}

impl OrcOptions {
    pub fn from_descriptor(descriptor: &WriterDescriptor) -> Result<Self> {
        Ok(Self {
            compression: OrcCompression::from_codec(descriptor.compress())?,
        })
    }

    pub fn compression(&self) -> OrcCompression {
        self.compression
    }

    pub fn file_extension(&self) -> &'static str {
        "orc"
    }
}
