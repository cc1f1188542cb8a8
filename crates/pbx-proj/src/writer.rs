//! The pbxproj writer.
//!
//! Serializes a document into the exact byte dialect the external tool
//! produces: fixed header comment, tab indentation, isa-grouped object
//! sections in ascending isa order with entries in ascending uuid order,
//! single-line rendering for build-file and file-reference entries, and
//! `/* ... */` annotation comments after annotated values.
//!
//! Quoting: a string is written bare when non-empty and composed only of
//! alphanumerics, `_`, `.`, and `/`; anything else is double-quoted.
//! Inside quotes, `\a \b \v \f \n`, `\"`, and `\\` cover the control
//! set; non-ASCII codepoints below 0xFF become 3-digit octal escapes and
//! codepoints at or above 0xFF become 4-digit decimal escapes, matching
//! the external dialect byte for byte.

use std::cmp::Ordering;
use std::fmt::Write as _;

use pbx_plist::{Dictionary, Value};

use crate::error::{ProjError, Result};
use crate::objects::{Object, ObjectKind};
use crate::proj::PbxProj;

/// The fixed first line of every project file.
pub const ASCII_HEADER: &str = "// !$*UTF8*$!\n";

/// Whether a string must be double-quoted in output.
pub fn needs_quoting(string: &str) -> bool {
    if string.is_empty() {
        return true;
    }
    !string
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '/'))
}

/// Render a string for output: bare when possible, quoted and escaped
/// otherwise.
pub fn escape_string(string: &str) -> Result<String> {
    if needs_quoting(string) {
        quote_bytes(string.as_bytes())
    } else {
        Ok(string.to_owned())
    }
}

/// Quote and escape raw bytes, decoding them as UTF-8. An invalid
/// sequence aborts with an encode error.
pub fn quote_bytes(bytes: &[u8]) -> Result<String> {
    let mut out = String::with_capacity(bytes.len() + 2);
    out.push('"');
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if b < 0x80 {
            match b {
                0x07 => out.push_str("\\a"),
                0x08 => out.push_str("\\b"),
                0x0B => out.push_str("\\v"),
                0x0C => out.push_str("\\f"),
                b'\n' => out.push_str("\\n"),
                b'"' => out.push_str("\\\""),
                b'\\' => out.push_str("\\\\"),
                _ => out.push(b as char),
            }
            i += 1;
        } else {
            let (codepoint, width) = decode_utf8(bytes, i)?;
            if codepoint < 0xFF {
                let _ = write!(out, "\\{codepoint:03o}");
            } else {
                let _ = write!(out, "\\{codepoint:04}");
            }
            i += width;
        }
    }
    out.push('"');
    Ok(out)
}

/// Decode one UTF-8 sequence starting at `offset`.
fn decode_utf8(bytes: &[u8], offset: usize) -> Result<(u32, usize)> {
    let invalid = || ProjError::InvalidUtf8 { offset };
    let first = bytes[offset];
    let (len, mut codepoint) = if first & 0xE0 == 0xC0 {
        (2, u32::from(first & 0x1F))
    } else if first & 0xF0 == 0xE0 {
        (3, u32::from(first & 0x0F))
    } else if first & 0xF8 == 0xF0 {
        (4, u32::from(first & 0x07))
    } else {
        return Err(invalid());
    };
    if offset + len > bytes.len() {
        return Err(invalid());
    }
    for &next in &bytes[offset + 1..offset + len] {
        if next & 0xC0 != 0x80 {
            return Err(invalid());
        }
        codepoint = (codepoint << 6) | u32::from(next & 0x3F);
    }
    Ok((codepoint, len))
}

/// Ordering for the keys of an object dictionary: `isa` first, the rest
/// ascending.
fn object_key_order(a: &str, b: &str) -> Ordering {
    match (a == "isa", b == "isa") {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => a.cmp(b),
    }
}

/// Entry kinds the external tool renders on a single line.
fn single_line_isa(kind: ObjectKind) -> bool {
    matches!(kind, ObjectKind::BuildFile | ObjectKind::FileReference)
}

pub struct PbxWriter<'a> {
    proj: &'a PbxProj,
    out: String,
    indent: usize,
}

impl<'a> PbxWriter<'a> {
    pub fn new(proj: &'a PbxProj) -> Self {
        Self {
            proj,
            out: String::new(),
            indent: 0,
        }
    }

    /// Serialize the whole document.
    pub fn write(mut self) -> Result<Vec<u8>> {
        self.out.push_str(ASCII_HEADER);
        self.out.push_str("{\n");
        self.indent = 1;

        self.write_pair_integer("archiveVersion", self.proj.archive_version())?;
        // `classes` is always present and always empty.
        self.write_indent();
        self.out.push_str("classes = {\n");
        self.write_indent();
        self.out.push_str("};\n");
        self.write_pair_integer("objectVersion", self.proj.object_version())?;

        self.write_objects()?;

        self.write_indent();
        let root_uuid = self.proj.root_object_uuid().to_owned();
        let annotation = self
            .proj
            .object(&root_uuid)
            .map(|object| object.annotation(self.proj))
            .unwrap_or_default();
        self.out.push_str("rootObject = ");
        self.out.push_str(&escape_string(&root_uuid)?);
        self.push_annotation(&annotation);
        self.out.push_str(";\n");

        self.out.push_str("}\n");
        Ok(self.out.into_bytes())
    }

    fn write_objects(&mut self) -> Result<()> {
        self.write_indent();
        self.out.push_str("objects = {\n");

        for (isa, objects) in self.proj.objects_grouped_by_isa() {
            self.out.push('\n');
            let _ = writeln!(self.out, "/* Begin {isa} section */");
            for object in objects {
                self.write_object_entry(object)?;
            }
            let _ = writeln!(self.out, "/* End {isa} section */");
        }

        self.write_indent();
        self.out.push_str("};\n");
        Ok(())
    }

    fn write_object_entry(&mut self, object: &Object) -> Result<()> {
        let single_line = single_line_isa(object.kind());
        self.indent = 2;
        self.write_indent();
        self.out.push_str(&escape_string(object.uuid())?);
        let annotation = object.annotation(self.proj);
        self.push_annotation(&annotation);
        self.out.push_str(" = ");

        let dict = object.to_plist(self.proj);
        let mut entries: Vec<(&str, &Value)> = dict.iter().collect();
        entries.sort_by(|a, b| object_key_order(a.0, b.0));
        self.write_dictionary_entries(&entries, single_line)?;

        self.out.push_str(";\n");
        Ok(())
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent {
            self.out.push('\t');
        }
    }

    fn push_annotation(&mut self, annotation: &str) {
        if !annotation.is_empty() {
            let _ = write!(self.out, " /* {annotation} */");
        }
    }

    fn write_pair_integer(&mut self, key: &str, value: i64) -> Result<()> {
        self.write_indent();
        self.out.push_str(&escape_string(key)?);
        let _ = writeln!(self.out, " = {value};");
        Ok(())
    }

    fn write_value(&mut self, value: &Value, single_line: bool) -> Result<()> {
        match value {
            Value::Dictionary(dict) => {
                let entries: Vec<(&str, &Value)> = dict.iter().collect();
                self.write_dictionary_entries(&entries, single_line)
            }
            Value::Array(array) => self.write_array(array.iter(), single_line),
            Value::String(s) => {
                self.out.push_str(&escape_string(s.value())?);
                if let Some(annotation) = s.annotation() {
                    self.push_annotation(annotation);
                }
                Ok(())
            }
            Value::Integer(n) => {
                let _ = write!(self.out, "{n}");
                Ok(())
            }
            Value::Real(r) => {
                let _ = write!(self.out, "{r}");
                Ok(())
            }
            Value::Boolean(b) => {
                self.out.push_str(if *b { "YES" } else { "NO" });
                Ok(())
            }
            Value::Data(bytes) => {
                let _ = write!(self.out, "<{}>", hex::encode(bytes));
                Ok(())
            }
            Value::Date(date) => {
                let formatted = date.format("%Y-%m-%d %H:%M:%S %z").to_string();
                self.out.push_str(&escape_string(&formatted)?);
                Ok(())
            }
            Value::Uid(uid) => {
                // Rendered as the keyed-archive dictionary form.
                let mut dict = Dictionary::new();
                dict.set("CF$UID", Value::Integer(*uid as i64));
                let entries: Vec<(&str, &Value)> = dict.iter().collect();
                self.write_dictionary_entries(&entries, single_line)
            }
        }
    }

    fn write_dictionary_entries(
        &mut self,
        entries: &[(&str, &Value)],
        single_line: bool,
    ) -> Result<()> {
        if single_line {
            self.out.push('{');
            for (key, value) in entries {
                self.out.push_str(&escape_string(key)?);
                self.out.push_str(" = ");
                self.write_value(value, true)?;
                self.out.push_str("; ");
            }
            self.out.push('}');
            return Ok(());
        }

        self.out.push_str("{\n");
        self.indent += 1;
        for (key, value) in entries {
            self.write_indent();
            self.out.push_str(&escape_string(key)?);
            self.out.push_str(" = ");
            self.write_value(value, false)?;
            self.out.push_str(";\n");
        }
        self.indent -= 1;
        self.write_indent();
        self.out.push('}');
        Ok(())
    }

    fn write_array<'v>(
        &mut self,
        values: impl Iterator<Item = &'v Value>,
        single_line: bool,
    ) -> Result<()> {
        if single_line {
            self.out.push('(');
            for value in values {
                self.write_value(value, true)?;
                self.out.push_str(", ");
            }
            self.out.push(')');
            return Ok(());
        }

        self.out.push_str("(\n");
        self.indent += 1;
        for value in values {
            self.write_indent();
            self.write_value(value, false)?;
            self.out.push_str(",\n");
        }
        self.indent -= 1;
        self.write_indent();
        self.out.push(')');
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoting_rules() {
        assert!(!needs_quoting("main.m"));
        assert!(!needs_quoting("Sources/lib_a"));
        assert!(!needs_quoting("0123ABC"));
        assert!(needs_quoting(""));
        assert!(needs_quoting("has space"));
        assert!(needs_quoting("<group>"));
        assert!(needs_quoting("semi;colon"));
        assert!(needs_quoting("Frühstück"));
    }

    #[test]
    fn escape_leaves_identifiers_bare() {
        assert_eq!(escape_string("main.m").unwrap(), "main.m");
        assert_eq!(escape_string("a b").unwrap(), "\"a b\"");
        assert_eq!(escape_string("").unwrap(), "\"\"");
    }

    #[test]
    fn escape_control_characters() {
        assert_eq!(
            quote_bytes(b"a\x07\x08\x0b\x0c\n\"\\z").unwrap(),
            "\"a\\a\\b\\v\\f\\n\\\"\\\\z\""
        );
    }

    #[test]
    fn escape_non_ascii_octal_below_ff() {
        // U+00E9 is below 0xFF: three-digit octal.
        assert_eq!(quote_bytes("é".as_bytes()).unwrap(), "\"\\351\"");
    }

    #[test]
    fn escape_non_ascii_decimal_at_and_above_ff() {
        // U+00FF and U+0100 take the four-digit decimal form.
        assert_eq!(quote_bytes("ÿ".as_bytes()).unwrap(), "\"\\0255\"");
        assert_eq!(quote_bytes("Ā".as_bytes()).unwrap(), "\"\\0256\"");
    }

    #[test]
    fn escape_rejects_invalid_utf8() {
        let err = quote_bytes(&[0x61, 0xC3]).unwrap_err();
        assert!(matches!(err, ProjError::InvalidUtf8 { offset: 1 }));
        let err = quote_bytes(&[0x80]).unwrap_err();
        assert!(matches!(err, ProjError::InvalidUtf8 { offset: 0 }));
    }

    #[test]
    fn object_keys_sort_isa_first() {
        let mut keys = vec!["path", "isa", "fileRef", "settings"];
        keys.sort_by(|a, b| object_key_order(a, b));
        assert_eq!(keys, ["isa", "fileRef", "path", "settings"]);
    }
}
