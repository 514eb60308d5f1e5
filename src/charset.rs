//! Character set lookup for text output.
//!
//! Names are resolved through the WHATWG label registry, which accepts the
//! common aliases (`UTF-8`, `utf8`, `GBK`, `ISO-8859-1`, `Shift_JIS`, ...)
//! case-insensitively.

use encoding_rs::Encoding;

pub const DEFAULT_CHARSET: &str = "UTF-8";

/// Resolve a charset name to its encoding.
///
/// Names must be legal charset names: a leading letter or digit followed by
/// letters, digits, `-`, `+`, `:`, `_` or `.`. Labels that only map to the
/// replacement encoding (e.g. `iso-2022-kr`) and encodings that encode as
/// something else (UTF-16LE/BE encode as UTF-8) are unsupported.
pub fn lookup(name: &str) -> Option<&'static Encoding> {
    if !is_legal_name(name) {
        return None;
    }
    Encoding::for_label_no_replacement(name.as_bytes())
        .filter(|encoding| encoding.output_encoding() == *encoding)
}

fn is_legal_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphanumeric() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '+' | ':' | '_' | '.'))
}

pub fn is_supported(name: &str) -> bool {
    lookup(name).is_some()
}
