//! Dispatch, setter, and validation behavior of the write-job builder

use std::collections::HashMap;

use hdfs_writer_config::{ConfigError, FormatKind, HdfsWriterBuilder, WriteMode};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[rstest]
#[case("text", FormatKind::Text)]
#[case("TEXT", FormatKind::Text)]
#[case("orc", FormatKind::Orc)]
#[case("oRc", FormatKind::Orc)]
#[case("parquet", FormatKind::Parquet)]
#[case("Parquet", FormatKind::Parquet)]
fn selects_writer_for_any_casing(#[case] file_type: &str, #[case] expected: FormatKind) {
    let builder = HdfsWriterBuilder::new(file_type).unwrap();
    assert_eq!(builder.format_kind(), expected);
}

#[rstest]
#[case("csv")]
#[case("avro")]
#[case("")]
#[case("parquet2")]
fn unknown_file_type_is_unsupported(#[case] file_type: &str) {
    let err = HdfsWriterBuilder::new(file_type).unwrap_err();
    assert_eq!(err, ConfigError::UnsupportedFormat(file_type.to_string()));
}

#[rstest]
#[case(None, "APPEND")]
#[case(Some(""), "APPEND")]
#[case(Some("   "), "APPEND")]
#[case(Some("overwrite"), "OVERWRITE")]
#[case(Some("append"), "APPEND")]
fn write_mode_is_normalized(#[case] input: Option<&str>, #[case] expected: &str) {
    let mut builder = HdfsWriterBuilder::new("text").unwrap();
    builder.set_write_mode(input);
    assert_eq!(builder.write_mode(), expected);
}

#[test]
fn unknown_write_mode_is_rejected_at_validation() {
    let mut builder = HdfsWriterBuilder::new("text").unwrap();
    builder
        .set_path("/out")
        .set_default_fs("hdfs://nn:8020")
        .set_write_mode(Some("upsert"));
    // stored upper-cased without complaint until validation
    assert_eq!(builder.write_mode(), "UPSERT");
    assert_eq!(
        builder.validate().unwrap_err(),
        ConfigError::InvalidWriteMode("UPSERT".to_string())
    );
}

#[rstest]
#[case("no-such-charset")]
#[case("UTF-9")]
#[case("ebcdic-xyz")]
#[case("  gbk ")]
#[case("UTF-16")]
#[case("UTF-16BE")]
fn unsupported_charset_fails_and_keeps_default(#[case] name: &str) {
    let mut builder = HdfsWriterBuilder::new("text").unwrap();
    let err = builder.set_charset_name(name).unwrap_err();
    assert_eq!(err, ConfigError::UnsupportedCharset(name.to_string()));
    assert_eq!(builder.charset_name(), "UTF-8");
}

#[rstest]
#[case("GBK")]
#[case("utf-8")]
#[case("ISO-8859-1")]
fn supported_charset_is_stored_as_given(#[case] name: &str) {
    let mut builder = HdfsWriterBuilder::new("text").unwrap();
    builder.set_charset_name(name).unwrap();
    assert_eq!(builder.charset_name(), name);
}

#[rstest]
#[case(None, None, ConfigError::MissingField("path"))]
#[case(Some(""), Some(""), ConfigError::MissingField("path"))]
#[case(None, Some("file:///tmp/out"), ConfigError::MissingField("path"))]
#[case(Some(""), Some("hdfs://nn:8020"), ConfigError::MissingField("path"))]
#[case(Some("/out"), None, ConfigError::MissingField("defaultFS"))]
#[case(Some("/out"), Some(""), ConfigError::MissingField("defaultFS"))]
fn first_violated_rule_wins(
    #[case] path: Option<&str>,
    #[case] default_fs: Option<&str>,
    #[case] expected: ConfigError,
) {
    let mut builder = HdfsWriterBuilder::new("parquet").unwrap();
    // misaligned columns would also fail, but later
    builder
        .set_column_names(strings(&["a", "b"]))
        .set_column_types(strings(&["int"]))
        .set_write_mode(Some("bogus"));
    if let Some(path) = path {
        builder.set_path(path);
    }
    if let Some(default_fs) = default_fs {
        builder.set_default_fs(default_fs);
    }
    assert_eq!(builder.validate().unwrap_err(), expected);
}

#[rstest]
#[case("file:///tmp/out")]
#[case("s3://bucket/out")]
#[case("HDFS://nn:8020")]
#[case("nn:8020")]
fn wrong_scheme_is_rejected(#[case] default_fs: &str) {
    let mut builder = HdfsWriterBuilder::new("orc").unwrap();
    builder
        .set_path("/out")
        .set_default_fs(default_fs)
        .set_write_mode(Some("bogus"));
    let err = builder.validate().unwrap_err();
    assert_eq!(
        err,
        ConfigError::InvalidScheme {
            default_fs: default_fs.to_string(),
            prefix: "hdfs://",
        }
    );
    assert_eq!(err.field(), Some("defaultFS"));
}

#[test]
fn hdfs_scheme_passes() {
    let mut builder = HdfsWriterBuilder::new("text").unwrap();
    builder.set_path("/out").set_default_fs("hdfs://nn:8020");
    let descriptor = builder.validate().unwrap();
    assert_eq!(descriptor.default_fs(), "hdfs://nn:8020");
    assert_eq!(descriptor.path(), "/out");
}

#[test]
fn misaligned_write_columns_are_rejected() {
    let mut builder = HdfsWriterBuilder::new("text").unwrap();
    builder
        .set_path("/out")
        .set_default_fs("hdfs://nn:8020")
        .set_column_names(strings(&["id", "name", "ts"]))
        .set_column_types(strings(&["int", "string"]));
    assert_eq!(
        builder.validate().unwrap_err(),
        ConfigError::ColumnCountMismatch {
            field: "column",
            names: 3,
            types: 2,
        }
    );
}

#[test]
fn every_setter_round_trips() {
    let hadoop_config: HashMap<String, String> = [
        ("dfs.replication", "3"),
        ("dfs.client.failover.proxy.provider.ns", "ConfiguredFailoverProxyProvider"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    let mut builder = HdfsWriterBuilder::new("text").unwrap();
    builder
        .set_column_names(strings(&["id", "name"]))
        .set_column_types(strings(&["bigint", "string"]))
        .set_full_column_names(strings(&["id", "name", "age"]))
        .set_full_column_types(strings(&["bigint", "string", "int"]))
        .set_hadoop_config(hadoop_config.clone())
        .set_delimiter("\\t")
        .set_row_group_size(42)
        .set_default_fs("hdfs://ns1")
        .set_path("/user/hive/warehouse/t")
        .set_file_name("batch")
        .set_compress("gzip")
        .set_write_mode(Some("Overwrite"));
    builder.set_charset_name("GBK").unwrap();

    let descriptor = builder.validate().unwrap();
    assert_eq!(descriptor.format_kind(), FormatKind::Text);
    assert_eq!(descriptor.column_names(), strings(&["id", "name"]).as_slice());
    assert_eq!(descriptor.column_types(), strings(&["bigint", "string"]).as_slice());
    assert_eq!(
        descriptor.full_column_names(),
        strings(&["id", "name", "age"]).as_slice()
    );
    assert_eq!(
        descriptor.full_column_types(),
        strings(&["bigint", "string", "int"]).as_slice()
    );
    assert_eq!(descriptor.hadoop_config(), &hadoop_config);
    assert_eq!(descriptor.delimiter(), "\\t");
    assert_eq!(descriptor.row_group_size(), 42);
    assert_eq!(descriptor.default_fs(), "hdfs://ns1");
    assert_eq!(descriptor.path(), "/user/hive/warehouse/t");
    assert_eq!(descriptor.file_name(), Some("batch"));
    assert_eq!(descriptor.compress(), Some("gzip"));
    assert_eq!(descriptor.write_mode(), WriteMode::Overwrite);
    assert_eq!(descriptor.charset_name(), "GBK");
}

#[test]
fn parquet_job_end_to_end() {
    let mut builder = HdfsWriterBuilder::new("parquet").unwrap();
    builder
        .set_path("/data/out")
        .set_default_fs("hdfs://nn1:8020")
        .set_row_group_size(5000);

    let descriptor = builder.validate().unwrap();
    assert_eq!(descriptor.format_kind(), FormatKind::Parquet);
    assert_eq!(descriptor.row_group_size(), 5000);
    assert_eq!(descriptor.write_mode().as_str(), "APPEND");
    assert_eq!(descriptor.output_dir(), "hdfs://nn1:8020/data/out");
}

#[test]
fn validation_errors_name_the_field() {
    let builder = HdfsWriterBuilder::new("text").unwrap();
    let err = builder.validate().unwrap_err();
    assert_eq!(err.field(), Some("path"));
    assert_eq!(err.to_string(), "No path supplied.");
}
