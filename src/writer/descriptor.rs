use arrow::datatypes::Schema;
use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use super::HDFS_SCHEME_PREFIX;
use crate::error::{ConfigError, Result};
use crate::format::{FormatKind, FormatOptions};
use crate::schema;

/// How the writer treats files already present under the target path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WriteMode {
    Append,
    Overwrite,
}

impl WriteMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            WriteMode::Append => "APPEND",
            WriteMode::Overwrite => "OVERWRITE",
        }
    }
}

impl FromStr for WriteMode {
    type Err = ConfigError;

    /// Expects an already-normalized (upper-case) mode
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "APPEND" => Ok(WriteMode::Append),
            "OVERWRITE" => Ok(WriteMode::Overwrite),
            other => Err(ConfigError::InvalidWriteMode(other.to_string())),
        }
    }
}

impl fmt::Display for WriteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated configuration handed to a format writer.
///
/// Only [`super::HdfsWriterBuilder::validate`] creates one, and nothing can
/// change it afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WriterDescriptor {
    pub(super) format_kind: FormatKind,
    pub(super) column_names: Vec<String>,
    pub(super) column_types: Vec<String>,
    pub(super) full_column_names: Vec<String>,
    pub(super) full_column_types: Vec<String>,
    #[serde(serialize_with = "sorted_map")]
    pub(super) hadoop_config: HashMap<String, String>,
    pub(super) delimiter: String,
    pub(super) row_group_size: usize,
    #[serde(rename = "defaultFS")]
    pub(super) default_fs: String,
    pub(super) path: String,
    pub(super) file_name: Option<String>,
    pub(super) write_mode: WriteMode,
    pub(super) compress: Option<String>,
    pub(super) charset_name: String,
}

impl WriterDescriptor {
    pub fn format_kind(&self) -> FormatKind {
        self.format_kind
    }

    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    pub fn column_types(&self) -> &[String] {
        &self.column_types
    }

    pub fn full_column_names(&self) -> &[String] {
        &self.full_column_names
    }

    pub fn full_column_types(&self) -> &[String] {
        &self.full_column_types
    }

    /// Passed through untouched to the filesystem client
    pub fn hadoop_config(&self) -> &HashMap<String, String> {
        &self.hadoop_config
    }

    /// Field separator as configured; see [`crate::format::TextOptions`] for
    /// the resolved character
    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    pub fn row_group_size(&self) -> usize {
        self.row_group_size
    }

    pub fn default_fs(&self) -> &str {
        &self.default_fs
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn write_mode(&self) -> WriteMode {
        self.write_mode
    }

    pub fn compress(&self) -> Option<&str> {
        self.compress.as_deref()
    }

    pub fn charset_name(&self) -> &str {
        &self.charset_name
    }

    pub fn format_options(&self) -> Result<FormatOptions> {
        FormatOptions::resolve(self)
    }

    /// Arrow schema of the columns being written
    pub fn arrow_schema(&self) -> Result<Schema> {
        schema::arrow_schema("column", &self.column_names, &self.column_types)
    }

    /// Arrow schema of the complete source table
    pub fn full_arrow_schema(&self) -> Result<Schema> {
        schema::arrow_schema("fullColumn", &self.full_column_names, &self.full_column_types)
    }

    /// Position of each full-schema column among the written columns
    pub fn column_indices(&self) -> Vec<Option<usize>> {
        schema::column_indices(&self.full_column_names, &self.column_names)
    }

    /// Fully qualified output directory
    pub fn output_dir(&self) -> String {
        if self.path.starts_with(HDFS_SCHEME_PREFIX) {
            return self.path.clone();
        }
        format!(
            "{}/{}",
            self.default_fs.trim_end_matches('/'),
            self.path.trim_start_matches('/')
        )
    }

    /// Name of the file produced by one writer task
    pub fn output_file_name(&self, task_index: usize) -> Result<String> {
        let base = self.file_name.as_deref().unwrap_or("part");
        let name = format!("{base}-{task_index:05}");
        Ok(match self.format_options()?.file_extension() {
            Some(ext) => format!("{name}.{ext}"),
            None => name,
        })
    }
}

fn sorted_map<S: Serializer>(
    map: &HashMap<String, String>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    map.iter().collect::<BTreeMap<_, _>>().serialize(serializer)
}
