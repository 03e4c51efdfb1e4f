//! Purpose: Encode conversion results for stdout in a selectable layout.
//! Exports: `OutputLayout`, `write_results`, `to_string`.
//! Role: Output boundary; the default layout matches the historical `["a", "b"]` spacing.
//! Invariants: The `Python` layout escapes every non-ASCII character as `\uXXXX`.
//! Invariants: No layout appends a trailing newline.

use std::io;

use serde::Serialize;
use serde_json::ser::{CompactFormatter, Formatter, PrettyFormatter, Serializer};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum OutputLayout {
    /// `["2", "ValueError"]`
    #[default]
    Python,
    /// `["2","ValueError"]`
    Compact,
    Pretty,
}

pub fn write_results<W, T>(writer: W, value: &T, layout: OutputLayout) -> serde_json::Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    match layout {
        OutputLayout::Python => {
            value.serialize(&mut Serializer::with_formatter(writer, SpacedAsciiFormatter))
        }
        OutputLayout::Compact => {
            value.serialize(&mut Serializer::with_formatter(writer, CompactFormatter))
        }
        OutputLayout::Pretty => {
            value.serialize(&mut Serializer::with_formatter(writer, PrettyFormatter::new()))
        }
    }
}

pub fn to_string<T>(value: &T, layout: OutputLayout) -> serde_json::Result<String>
where
    T: ?Sized + Serialize,
{
    let mut buf = Vec::new();
    write_results(&mut buf, value, layout)?;
    // Every layout emits ASCII or serde_json-validated UTF-8.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Single-line layout with `", "` and `": "` separators and ASCII-only strings.
struct SpacedAsciiFormatter;

impl Formatter for SpacedAsciiFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if fragment.is_ascii() {
            return writer.write_all(fragment.as_bytes());
        }
        let mut units = [0u16; 2];
        for c in fragment.chars() {
            if c.is_ascii() {
                writer.write_all(&[c as u8])?;
                continue;
            }
            for unit in c.encode_utf16(&mut units) {
                write!(writer, "\\u{unit:04x}")?;
            }
        }
        Ok(())
    }
}
