//! Column type names and their Arrow equivalents.

use arrow::datatypes::{DataType, Field, Schema, TimeUnit};
use regex::Regex;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::error::{ConfigError, Result};

/// Hive's precision limit for decimals
const MAX_DECIMAL_PRECISION: usize = 38;
const DEFAULT_DECIMAL_PRECISION: usize = 10;

/// A Hive-style column type as written in a job description
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    TinyInt,
    SmallInt,
    Int,
    BigInt,
    Float,
    Double,
    Decimal { precision: usize, scale: usize },
    String,
    Varchar(usize),
    Char(usize),
    Boolean,
    Date,
    Timestamp,
    Binary,
}

fn parameterized_type() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?i)(decimal|varchar|char)\s*\(\s*(\d+)\s*(?:,\s*(\d+)\s*)?\)$")
            .expect("valid regex")
    })
}

impl FromStr for ColumnType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim();
        let unsupported = || ConfigError::UnsupportedColumnType(s.to_string());

        let simple = match name.to_lowercase().as_str() {
            "tinyint" => Some(ColumnType::TinyInt),
            "smallint" => Some(ColumnType::SmallInt),
            "int" | "integer" => Some(ColumnType::Int),
            "bigint" => Some(ColumnType::BigInt),
            "float" => Some(ColumnType::Float),
            "double" => Some(ColumnType::Double),
            "decimal" => Some(ColumnType::Decimal {
                precision: DEFAULT_DECIMAL_PRECISION,
                scale: 0,
            }),
            "string" => Some(ColumnType::String),
            "boolean" => Some(ColumnType::Boolean),
            "date" => Some(ColumnType::Date),
            "timestamp" => Some(ColumnType::Timestamp),
            "binary" => Some(ColumnType::Binary),
            _ => None,
        };
        if let Some(column_type) = simple {
            return Ok(column_type);
        }

        let caps = parameterized_type().captures(name).ok_or_else(unsupported)?;
        let first: usize = caps[2].parse().map_err(|_| unsupported())?;
        let second = caps
            .get(3)
            .map(|m| m.as_str().parse::<usize>())
            .transpose()
            .map_err(|_| unsupported())?;

        match (caps[1].to_lowercase().as_str(), second) {
            ("decimal", scale) => {
                let scale = scale.unwrap_or(0);
                if first == 0 || first > MAX_DECIMAL_PRECISION || scale > first {
                    return Err(unsupported());
                }
                Ok(ColumnType::Decimal {
                    precision: first,
                    scale,
                })
            }
            ("varchar", None) => Ok(ColumnType::Varchar(first)),
            ("char", None) => Ok(ColumnType::Char(first)),
            _ => Err(unsupported()),
        }
    }
}

impl ColumnType {
    pub fn to_arrow(&self) -> DataType {
        match self {
            ColumnType::TinyInt => DataType::Int8,
            ColumnType::SmallInt => DataType::Int16,
            ColumnType::Int => DataType::Int32,
            ColumnType::BigInt => DataType::Int64,
            ColumnType::Float => DataType::Float32,
            ColumnType::Double => DataType::Float64,
            ColumnType::Decimal { precision, scale } => DataType::Decimal(*precision, *scale),
            ColumnType::String | ColumnType::Varchar(_) | ColumnType::Char(_) => DataType::Utf8,
            ColumnType::Boolean => DataType::Boolean,
            ColumnType::Date => DataType::Date32,
            ColumnType::Timestamp => DataType::Timestamp(TimeUnit::Millisecond, None),
            ColumnType::Binary => DataType::Binary,
        }
    }
}

/// Build a nullable Arrow schema from positionally aligned names and types.
/// `field` names the column list in errors (`column` or `fullColumn`).
pub fn arrow_schema(field: &'static str, names: &[String], types: &[String]) -> Result<Schema> {
    if names.len() != types.len() {
        return Err(ConfigError::ColumnCountMismatch {
            field,
            names: names.len(),
            types: types.len(),
        });
    }

    let fields = names
        .iter()
        .zip(types)
        .map(|(name, type_name)| -> Result<Field> {
            let column_type: ColumnType = type_name.parse()?;
            Ok(Field::new(name, column_type.to_arrow(), true))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Schema::new(fields))
}

/// For each full-schema column, the position of the same-named write column
pub fn column_indices(full_names: &[String], names: &[String]) -> Vec<Option<usize>> {
    full_names
        .iter()
        .map(|full| names.iter().position(|name| name == full))
        .collect()
}
