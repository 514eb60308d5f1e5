use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;

use super::normalize_codec;
use crate::error::{ConfigError, Result};
use crate::writer::WriterDescriptor;

/// Settings for the row-group (Parquet) writer
#[derive(Debug, Clone)]
pub struct ParquetOptions {
    compression: Compression,
    max_row_group_size: usize,
}

impl ParquetOptions {
    pub fn from_descriptor(descriptor: &WriterDescriptor) -> Result<Self> {
        Ok(Self {
            compression: compression_from_codec(descriptor.compress())?,
            max_row_group_size: descriptor.row_group_size(),
        })
    }

    pub fn compression(&self) -> Compression {
        self.compression
    }

    /// Records buffered per row group before it is flushed
    pub fn max_row_group_size(&self) -> usize {
        self.max_row_group_size
    }

    pub fn writer_properties(&self) -> WriterProperties {
        WriterProperties::builder()
            .set_compression(self.compression)
            .set_max_row_group_size(self.max_row_group_size)
            .build()
    }

    pub fn file_extension(&self) -> &'static str {
        "parquet"
    }
}

fn compression_from_codec(compress: Option<&str>) -> Result<Compression> {
    match normalize_codec(compress).as_deref() {
        None | Some("SNAPPY") => Ok(Compression::SNAPPY),
        Some("NONE") | Some("UNCOMPRESSED") => Ok(Compression::UNCOMPRESSED),
        Some("GZIP") => Ok(Compression::GZIP),
        Some("LZO") => Ok(Compression::LZO),
        Some("BROTLI") => Ok(Compression::BROTLI),
        Some("LZ4") => Ok(Compression::LZ4),
        Some("ZSTD") => Ok(Compression::ZSTD),
        Some(_) => Err(ConfigError::UnsupportedCompression {
            format: "PARQUET",
            codec: compress.unwrap_or_default().to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snappy_by_default() {
        assert_eq!(compression_from_codec(None).unwrap(), Compression::SNAPPY);
    }

    #[test]
    fn uncompressed_aliases() {
        assert_eq!(
            compression_from_codec(Some("none")).unwrap(),
            Compression::UNCOMPRESSED
        );
        assert_eq!(
            compression_from_codec(Some("UNCOMPRESSED")).unwrap(),
            Compression::UNCOMPRESSED
        );
    }

    #[test]
    fn unknown_codec_is_rejected() {
        assert!(matches!(
            compression_from_codec(Some("bzip2")),
            Err(ConfigError::UnsupportedCompression {
                format: "PARQUET",
                ..
            })
        ));
    }
}
