//! JSON rendering for document outlines.

use std::io::Write;

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::error::{Error, Result};
use crate::model::DocumentOutline;

/// Indentation used for pretty output.
const PRETTY_INDENT: &[u8] = b"    ";

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with four-space indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert an outline to JSON.
///
/// Non-ASCII text is written as-is, not escaped.
pub fn to_json(outline: &DocumentOutline, format: JsonFormat) -> Result<String> {
    let mut buf = Vec::new();
    write_json(&mut buf, outline, format)?;
    String::from_utf8(buf).map_err(|e| Error::Render(format!("JSON encoding error: {}", e)))
}

/// Write an outline as JSON to any writer.
pub fn write_json<W: Write>(writer: W, outline: &DocumentOutline, format: JsonFormat) -> Result<()> {
    let result = match format {
        JsonFormat::Pretty => {
            let formatter = PrettyFormatter::with_indent(PRETTY_INDENT);
            let mut ser = Serializer::with_formatter(writer, formatter);
            outline.serialize(&mut ser)
        }
        JsonFormat::Compact => serde_json::to_writer(writer, outline),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}
