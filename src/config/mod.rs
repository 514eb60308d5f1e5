use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use crate::writer::{HdfsWriterBuilder, WriterDescriptor};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobConfig {
    #[serde(default = "default_job_name")]
    pub name: String,
    pub writer: WriterParameters,
}

/// The `writer` section of a job description
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WriterParameters {
    pub file_type: String,
    pub path: Option<String>,
    #[serde(rename = "defaultFS")]
    pub default_fs: Option<String>,
    #[serde(default)]
    pub column: Vec<ColumnConfig>,
    #[serde(default)]
    pub full_column_name: Vec<String>,
    #[serde(default)]
    pub full_column_type: Vec<String>,
    #[serde(default)]
    pub hadoop_config: HashMap<String, serde_yaml::Value>,
    pub field_delimiter: Option<String>,
    pub file_name: Option<String>,
    pub write_mode: Option<String>,
    pub compress: Option<String>,
    pub encoding: Option<String>,
    pub row_group_size: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnConfig {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: String,
}

fn default_job_name() -> String {
    "hdfs-write".to_string()
}

impl JobConfig {
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read job file: {:?}", path.as_ref()))?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: JobConfig =
            serde_yaml::from_str(content).context("Failed to parse YAML job description")?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let mut names = HashSet::new();
        for column in &self.writer.column {
            if !names.insert(&column.name) {
                anyhow::bail!("Duplicate column name: {}", column.name);
            }
        }

        let mut full_names = HashSet::new();
        for name in &self.writer.full_column_name {
            if !full_names.insert(name) {
                anyhow::bail!("Duplicate fullColumnName: {}", name);
            }
        }
        Ok(())
    }

    /// Run the writer section through the builder and validate it
    pub fn descriptor(&self) -> Result<WriterDescriptor> {
        let descriptor = self
            .writer
            .to_builder()?
            .validate()
            .with_context(|| format!("Invalid writer configuration in job '{}'", self.name))?;
        Ok(descriptor)
    }
}

impl WriterParameters {
    /// Apply every parameter to a fresh builder for `file_type`.
    ///
    /// When neither full column list is given, the written columns are the
    /// full schema. Otherwise both lists pass through as written.
    pub fn to_builder(&self) -> Result<HdfsWriterBuilder> {
        let mut builder = HdfsWriterBuilder::new(&self.file_type)?;

        let column_names: Vec<String> = self.column.iter().map(|c| c.name.clone()).collect();
        let column_types: Vec<String> =
            self.column.iter().map(|c| c.column_type.clone()).collect();

        if self.full_column_name.is_empty() && self.full_column_type.is_empty() {
            builder
                .set_full_column_names(column_names.clone())
                .set_full_column_types(column_types.clone());
        } else {
            builder
                .set_full_column_names(self.full_column_name.clone())
                .set_full_column_types(self.full_column_type.clone());
        }

        builder
            .set_column_names(column_names)
            .set_column_types(column_types)
            .set_hadoop_config(hadoop_config_strings(&self.hadoop_config)?)
            .set_write_mode(self.write_mode.as_deref());

        if let Some(path) = &self.path {
            builder.set_path(path);
        }
        if let Some(default_fs) = &self.default_fs {
            builder.set_default_fs(default_fs);
        }
        if let Some(delimiter) = &self.field_delimiter {
            builder.set_delimiter(delimiter);
        }
        if let Some(file_name) = &self.file_name {
            builder.set_file_name(file_name);
        }
        if let Some(compress) = &self.compress {
            builder.set_compress(compress);
        }
        if let Some(row_group_size) = self.row_group_size {
            builder.set_row_group_size(row_group_size);
        }
        if let Some(encoding) = &self.encoding {
            builder.set_charset_name(encoding)?;
        }

        Ok(builder)
    }
}

/// Hadoop settings are plain strings; YAML numbers and booleans are
/// accepted and rendered as written.
fn hadoop_config_strings(
    values: &HashMap<String, serde_yaml::Value>,
) -> Result<HashMap<String, String>> {
    values
        .iter()
        .map(|(key, value)| {
            let rendered = match value {
                serde_yaml::Value::String(s) => s.clone(),
                serde_yaml::Value::Number(n) => n.to_string(),
                serde_yaml::Value::Bool(b) => b.to_string(),
                _ => anyhow::bail!("hadoopConfig value for '{}' must be a scalar", key),
            };
            Ok((key.clone(), rendered))
        })
        .collect()
}
