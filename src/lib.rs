//! Configuration and validation of HDFS write jobs.
//!
//! A job picks a file format (text, ORC or Parquet), receives its settings
//! through [`HdfsWriterBuilder`], and is checked by
//! [`HdfsWriterBuilder::validate`] before any file handle is opened. The
//! resulting [`WriterDescriptor`] is what a format writer consumes.

pub mod charset;
pub mod config;
pub mod error;
pub mod format;
pub mod schema;
pub mod writer;

pub use config::JobConfig;
pub use error::{ConfigError, Result};
pub use format::{FormatKind, FormatOptions};
pub use writer::{HdfsWriterBuilder, WriteMode, WriterDescriptor};
