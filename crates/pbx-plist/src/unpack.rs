//! Key-consumption tracking for dictionary parses.
//!
//! Every typed parse routine reads its recognized keys through an
//! [`Unpack`]; `complete` then reports any key the routine did not
//! consume. Leftover keys are diagnostics, never failures — the caller
//! decides what absence or mismatch means.

use std::collections::HashSet;

use crate::value::{Array, Dictionary, Value};

/// Tracks which keys of a dictionary have been consumed by a parse.
pub struct Unpack<'a> {
    name: &'static str,
    dict: &'a Dictionary,
    seen: HashSet<&'a str>,
}

impl<'a> Unpack<'a> {
    /// Start unpacking `dict`; `name` labels diagnostics.
    pub fn new(name: &'static str, dict: &'a Dictionary) -> Self {
        Self {
            name,
            dict,
            seen: HashSet::new(),
        }
    }

    /// The dictionary being unpacked.
    pub fn dict(&self) -> &'a Dictionary {
        self.dict
    }

    fn take(&mut self, key: &str) -> Option<&'a Value> {
        let (stored, value) = self.dict.iter().find(|(k, _)| *k == key)?;
        self.seen.insert(stored);
        Some(value)
    }

    /// Exact-type string lookup.
    pub fn cast_str(&mut self, key: &str) -> Option<&'a str> {
        self.take(key).and_then(Value::as_str)
    }

    /// Exact-type string lookup, cloned.
    pub fn cast_string(&mut self, key: &str) -> Option<String> {
        self.cast_str(key).map(str::to_owned)
    }

    /// Exact-type dictionary lookup.
    pub fn cast_dictionary(&mut self, key: &str) -> Option<&'a Dictionary> {
        self.take(key).and_then(Value::as_dictionary)
    }

    /// Exact-type array lookup.
    pub fn cast_array(&mut self, key: &str) -> Option<&'a Array> {
        self.take(key).and_then(Value::as_array)
    }

    /// Coercing integer lookup.
    pub fn coerce_integer(&mut self, key: &str) -> Option<i64> {
        self.take(key).and_then(Value::coerce_integer)
    }

    /// Coercing boolean lookup.
    pub fn coerce_boolean(&mut self, key: &str) -> Option<bool> {
        self.take(key).and_then(Value::coerce_boolean)
    }

    /// Report keys that no lookup consumed. Returns true when every key
    /// was consumed. In strict mode (the document root) leftovers are
    /// warnings; elsewhere they are debug-level noise.
    pub fn complete(&self, strict: bool) -> bool {
        let mut clean = true;
        for key in self.dict.keys() {
            if !self.seen.contains(key) {
                clean = false;
                if strict {
                    tracing::warn!(context = self.name, key, "ignored unhandled key");
                } else {
                    tracing::debug!(context = self.name, key, "ignored unhandled key");
                }
            }
        }
        clean
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dictionary {
        let mut dict = Dictionary::new();
        dict.set("isa", Value::string("PBXBuildFile"));
        dict.set("fileRef", Value::string("BBBB"));
        dict.set("mystery", Value::Integer(7));
        dict
    }

    #[test]
    fn consumed_keys_are_tracked() {
        let dict = sample();
        let mut unpack = Unpack::new("BuildFile", &dict);
        assert_eq!(unpack.cast_str("isa"), Some("PBXBuildFile"));
        assert_eq!(unpack.cast_str("fileRef"), Some("BBBB"));
        assert!(!unpack.complete(false));
    }

    #[test]
    fn complete_when_all_consumed() {
        let dict = sample();
        let mut unpack = Unpack::new("BuildFile", &dict);
        unpack.cast_str("isa");
        unpack.cast_str("fileRef");
        unpack.coerce_integer("mystery");
        assert!(unpack.complete(true));
    }

    #[test]
    fn type_mismatch_is_absent_not_fatal() {
        let dict = sample();
        let mut unpack = Unpack::new("BuildFile", &dict);
        assert_eq!(unpack.cast_dictionary("fileRef"), None);
        // The key still counts as consumed.
        unpack.cast_str("isa");
        unpack.coerce_integer("mystery");
        assert!(unpack.complete(false));
    }
}
