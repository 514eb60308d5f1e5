use std::collections::HashMap;

use super::descriptor::{WriteMode, WriterDescriptor};
use crate::charset::{self, DEFAULT_CHARSET};
use crate::error::{ConfigError, Result};
use crate::format::text::DEFAULT_FIELD_DELIMITER;
use crate::format::FormatKind;

pub const HDFS_SCHEME_PREFIX: &str = "hdfs://";

/// Matches Parquet's default block size
pub const DEFAULT_ROW_GROUP_SIZE: usize = 128 * 1024 * 1024;

const DEFAULT_WRITE_MODE: &str = "APPEND";

/// Accumulates the settings of one HDFS write job.
///
/// The format kind is fixed by [`HdfsWriterBuilder::new`]; every other field
/// is set through the `set_*` methods in any order. [`validate`] consumes the
/// builder, so a descriptor can no longer be changed once it exists.
///
/// [`validate`]: HdfsWriterBuilder::validate
#[derive(Debug, Clone)]
pub struct HdfsWriterBuilder {
    format_kind: FormatKind,
    column_names: Vec<String>,
    column_types: Vec<String>,
    full_column_names: Vec<String>,
    full_column_types: Vec<String>,
    hadoop_config: HashMap<String, String>,
    delimiter: String,
    row_group_size: usize,
    default_fs: Option<String>,
    path: Option<String>,
    file_name: Option<String>,
    write_mode: String,
    compress: Option<String>,
    charset_name: String,
}

impl HdfsWriterBuilder {
    /// Select the writer for `file_type` (`text`, `orc` or `parquet`, any case)
    pub fn new(file_type: &str) -> Result<Self> {
        let format_kind = FormatKind::from_type_name(file_type)?;
        tracing::debug!(file_type, %format_kind, "selected HDFS writer");

        Ok(Self {
            format_kind,
            column_names: Vec::new(),
            column_types: Vec::new(),
            full_column_names: Vec::new(),
            full_column_types: Vec::new(),
            hadoop_config: HashMap::new(),
            delimiter: DEFAULT_FIELD_DELIMITER.to_string(),
            row_group_size: DEFAULT_ROW_GROUP_SIZE,
            default_fs: None,
            path: None,
            file_name: None,
            write_mode: DEFAULT_WRITE_MODE.to_string(),
            compress: None,
            charset_name: DEFAULT_CHARSET.to_string(),
        })
    }

    pub fn format_kind(&self) -> FormatKind {
        self.format_kind
    }

    pub fn set_column_names(&mut self, column_names: Vec<String>) -> &mut Self {
        self.column_names = column_names;
        self
    }

    pub fn set_column_types(&mut self, column_types: Vec<String>) -> &mut Self {
        self.column_types = column_types;
        self
    }

    pub fn set_full_column_names(&mut self, full_column_names: Vec<String>) -> &mut Self {
        self.full_column_names = full_column_names;
        self
    }

    pub fn set_full_column_types(&mut self, full_column_types: Vec<String>) -> &mut Self {
        self.full_column_types = full_column_types;
        self
    }

    pub fn set_hadoop_config(&mut self, hadoop_config: HashMap<String, String>) -> &mut Self {
        self.hadoop_config = hadoop_config;
        self
    }

    pub fn set_delimiter(&mut self, delimiter: impl Into<String>) -> &mut Self {
        self.delimiter = delimiter.into();
        self
    }

    pub fn set_row_group_size(&mut self, row_group_size: usize) -> &mut Self {
        self.row_group_size = row_group_size;
        self
    }

    pub fn set_default_fs(&mut self, default_fs: impl Into<String>) -> &mut Self {
        self.default_fs = Some(default_fs.into());
        self
    }

    pub fn set_path(&mut self, path: impl Into<String>) -> &mut Self {
        self.path = Some(path.into());
        self
    }

    pub fn set_file_name(&mut self, file_name: impl Into<String>) -> &mut Self {
        self.file_name = Some(file_name.into());
        self
    }

    pub fn set_compress(&mut self, compress: impl Into<String>) -> &mut Self {
        self.compress = Some(compress.into());
        self
    }

    /// Missing or blank modes become `APPEND`; anything else is upper-cased.
    /// Whether the result is a known mode is checked by [`Self::validate`].
    pub fn set_write_mode(&mut self, write_mode: Option<&str>) -> &mut Self {
        self.write_mode = match write_mode {
            Some(mode) if !mode.trim().is_empty() => mode.to_uppercase(),
            _ => {
                tracing::debug!("no write mode given, using {DEFAULT_WRITE_MODE}");
                DEFAULT_WRITE_MODE.to_string()
            }
        };
        self
    }

    /// An empty name keeps the current charset. An unsupported name fails
    /// and also keeps it.
    pub fn set_charset_name(&mut self, charset_name: &str) -> Result<&mut Self> {
        if charset_name.is_empty() {
            return Ok(self);
        }
        if !charset::is_supported(charset_name) {
            tracing::warn!(charset_name, "rejecting unsupported charset");
            return Err(ConfigError::UnsupportedCharset(charset_name.to_string()));
        }
        self.charset_name = charset_name.to_string();
        Ok(self)
    }

    pub fn charset_name(&self) -> &str {
        &self.charset_name
    }

    pub fn write_mode(&self) -> &str {
        &self.write_mode
    }

    /// Check the job and freeze it into a [`WriterDescriptor`].
    ///
    /// Rules are checked in a fixed order and the first failure is returned:
    /// path present, defaultFS present, defaultFS scheme, write mode, column
    /// alignment, then row group size.
    pub fn validate(self) -> Result<WriterDescriptor> {
        let path = match self.path {
            Some(path) if !path.is_empty() => path,
            _ => return Err(ConfigError::MissingField("path")),
        };

        let default_fs = match self.default_fs {
            Some(default_fs) if !default_fs.is_empty() => default_fs,
            _ => return Err(ConfigError::MissingField("defaultFS")),
        };

        if !default_fs.starts_with(HDFS_SCHEME_PREFIX) {
            return Err(ConfigError::InvalidScheme {
                default_fs,
                prefix: HDFS_SCHEME_PREFIX,
            });
        }

        let write_mode: WriteMode = self.write_mode.parse()?;

        check_aligned("column", &self.column_names, &self.column_types)?;
        check_aligned("fullColumn", &self.full_column_names, &self.full_column_types)?;

        if self.format_kind == FormatKind::Parquet && self.row_group_size == 0 {
            return Err(ConfigError::InvalidRowGroupSize);
        }

        let descriptor = WriterDescriptor {
            format_kind: self.format_kind,
            column_names: self.column_names,
            column_types: self.column_types,
            full_column_names: self.full_column_names,
            full_column_types: self.full_column_types,
            hadoop_config: self.hadoop_config,
            delimiter: self.delimiter,
            row_group_size: self.row_group_size,
            default_fs,
            path,
            file_name: self.file_name,
            write_mode,
            compress: self.compress,
            charset_name: self.charset_name,
        };

        tracing::info!(
            format = %descriptor.format_kind,
            default_fs = %descriptor.default_fs,
            path = %descriptor.path,
            write_mode = %descriptor.write_mode,
            "validated HDFS write job"
        );

        Ok(descriptor)
    }
}

fn check_aligned(field: &'static str, names: &[String], types: &[String]) -> Result<()> {
    if names.len() != types.len() {
        return Err(ConfigError::ColumnCountMismatch {
            field,
            names: names.len(),
            types: types.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder(file_type: &str) -> HdfsWriterBuilder {
        let mut builder = HdfsWriterBuilder::new(file_type).unwrap();
        builder.set_path("/out").set_default_fs("hdfs://nn:8020");
        builder
    }

    #[test]
    fn defaults_before_any_setter() {
        let descriptor = builder("text").validate().unwrap();
        assert_eq!(descriptor.write_mode(), WriteMode::Append);
        assert_eq!(descriptor.charset_name(), "UTF-8");
        assert_eq!(descriptor.delimiter(), "\u{1}");
        assert_eq!(descriptor.row_group_size(), DEFAULT_ROW_GROUP_SIZE);
        assert_eq!(descriptor.file_name(), None);
        assert_eq!(descriptor.compress(), None);
        assert!(descriptor.column_names().is_empty());
        assert!(descriptor.hadoop_config().is_empty());
    }

    #[test]
    fn write_mode_normalization() {
        let mut b = builder("orc");
        assert_eq!(b.set_write_mode(None).write_mode(), "APPEND");
        assert_eq!(b.set_write_mode(Some("")).write_mode(), "APPEND");
        assert_eq!(b.set_write_mode(Some("   ")).write_mode(), "APPEND");
        assert_eq!(b.set_write_mode(Some("overwrite")).write_mode(), "OVERWRITE");
        assert_eq!(b.set_write_mode(Some("Append")).write_mode(), "APPEND");
    }

    #[test]
    fn empty_charset_keeps_default() {
        let mut b = builder("text");
        b.set_charset_name("").unwrap();
        assert_eq!(b.charset_name(), "UTF-8");
    }

    #[test]
    fn rejected_charset_keeps_previous_value() {
        let mut b = builder("text");
        b.set_charset_name("GBK").unwrap();
        let err = b.set_charset_name("klingon").unwrap_err();
        assert_eq!(err, ConfigError::UnsupportedCharset("klingon".to_string()));
        assert_eq!(err.to_string(), "The charset klingon is not supported.");
        assert_eq!(b.charset_name(), "GBK");
    }

    #[test]
    fn zero_row_group_size_only_matters_for_parquet() {
        let mut parquet = builder("parquet");
        parquet.set_row_group_size(0);
        assert_eq!(parquet.validate().unwrap_err(), ConfigError::InvalidRowGroupSize);

        let mut text = builder("text");
        text.set_row_group_size(0);
        assert!(text.validate().is_ok());
    }

    #[test]
    fn misaligned_full_columns_are_rejected() {
        let mut b = builder("orc");
        b.set_full_column_names(vec!["a".into(), "b".into()])
            .set_full_column_types(vec!["int".into()]);
        assert_eq!(
            b.validate().unwrap_err(),
            ConfigError::ColumnCountMismatch {
                field: "fullColumn",
                names: 2,
                types: 1
            }
        );
    }

    #[test]
    fn whitespace_path_is_not_missing() {
        let mut b = builder("text");
        b.set_path(" ");
        assert_eq!(b.validate().unwrap().path(), " ");
    }
}
