//! Write-job configuration: a builder that accumulates settings for one
//! HDFS write job and a descriptor that is frozen once validation passes.

pub mod builder;
pub mod descriptor;

pub use builder::{HdfsWriterBuilder, DEFAULT_ROW_GROUP_SIZE, HDFS_SCHEME_PREFIX};
pub use descriptor::{WriteMode, WriterDescriptor};
