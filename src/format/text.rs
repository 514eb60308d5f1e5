use encoding_rs::Encoding;

use super::normalize_codec;
use crate::charset;
use crate::error::{ConfigError, Result};
use crate::writer::WriterDescriptor;

/// Hive's default field separator (`^A`)
pub const DEFAULT_FIELD_DELIMITER: &str = "\u{1}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextCompression {
    None,
    Gzip,
    Bzip2,
}

impl TextCompression {
    fn from_codec(compress: Option<&str>) -> Result<Self> {
        match normalize_codec(compress).as_deref() {
            None | Some("NONE") => Ok(TextCompression::None),
            Some("GZIP") => Ok(TextCompression::Gzip),
            Some("BZIP2") => Ok(TextCompression::Bzip2),
            Some(_) => Err(ConfigError::UnsupportedCompression {
                format: "TEXT",
                codec: compress.unwrap_or_default().to_string(),
            }),
        }
    }

    pub fn extension(&self) -> Option<&'static str> {
        match self {
            TextCompression::None => None,
            TextCompression::Gzip => Some("gz"),
            TextCompression::Bzip2 => Some("bz2"),
        }
    }
}

/// Settings for the delimited-text writer
#[derive(Debug, Clone)]
pub struct TextOptions {
    delimiter: String,
    encoding: &'static Encoding,
    compression: TextCompression,
}

impl TextOptions {
    pub fn from_descriptor(descriptor: &WriterDescriptor) -> Result<Self> {
        let delimiter = if descriptor.delimiter().is_empty() {
            DEFAULT_FIELD_DELIMITER.to_string()
        } else {
            unescape_delimiter(descriptor.delimiter())
        };

        // The builder only stores supported names, so this only fails for
        // descriptors assembled some other way.
        let encoding = charset::lookup(descriptor.charset_name())
            .ok_or_else(|| ConfigError::UnsupportedCharset(descriptor.charset_name().to_string()))?;

        Ok(Self {
            delimiter,
            encoding,
            compression: TextCompression::from_codec(descriptor.compress())?,
        })
    }

    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    pub fn compression(&self) -> TextCompression {
        self.compression
    }

    pub fn file_extension(&self) -> Option<&'static str> {
        self.compression.extension()
    }
}

/// Turn escape sequences typed into a job file into the characters they name.
///
/// Supports `\t`, `\n`, `\r`, `\\`, three-digit octal (`\001`) and
/// `\uXXXX`. Anything else is kept as written.
fn unescape_delimiter(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.peek().copied() {
            Some('t') => {
                chars.next();
                out.push('\t');
            }
            Some('n') => {
                chars.next();
                out.push('\n');
            }
            Some('r') => {
                chars.next();
                out.push('\r');
            }
            Some('\\') => {
                chars.next();
                out.push('\\');
            }
            Some('u') => {
                let hex: String = chars.clone().skip(1).take(4).collect();
                match decode_code_point(&hex, 16) {
                    Some(decoded) if hex.len() == 4 => {
                        for _ in 0..5 {
                            chars.next();
                        }
                        out.push(decoded);
                    }
                    _ => out.push('\\'),
                }
            }
            Some(d) if d.is_digit(8) => {
                let octal: String = chars.clone().take(3).collect();
                match decode_code_point(&octal, 8) {
                    Some(decoded) if octal.len() == 3 => {
                        for _ in 0..3 {
                            chars.next();
                        }
                        out.push(decoded);
                    }
                    _ => out.push('\\'),
                }
            }
            _ => out.push('\\'),
        }
    }

    out
}

fn decode_code_point(digits: &str, radix: u32) -> Option<char> {
    if !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    u32::from_str_radix(digits, radix)
        .ok()
        .and_then(char::from_u32)
}
