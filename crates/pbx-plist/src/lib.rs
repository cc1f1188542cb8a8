//! Property list value model and old-style ASCII codec.
//!
//! This crate carries the untyped half of the project-file pipeline: a
//! self-describing [`Value`] variant, the [`Unpack`] helper that typed
//! parses use to account for the keys they consume, and the parser for
//! the old-style ASCII dialect that `project.pbxproj` files are written
//! in.
//!
//! # Example
//!
//! ```
//! use pbx_plist::{Value, deserialize};
//!
//! let value = deserialize(b"{ objectVersion = 46; }").unwrap();
//! let dict = value.as_dictionary().unwrap();
//! assert_eq!(dict.coerce_integer("objectVersion"), Some(46));
//! ```

pub mod ascii;
mod error;
mod unpack;
mod value;

pub use error::{PlistError, Result};
pub use unpack::Unpack;
pub use value::{Array, Dictionary, Str, Value};

/// Magic prefix of the binary property list format.
const BINARY_MAGIC: &[u8] = b"bplist00";

/// Deserialize raw bytes into an untyped value tree.
///
/// Detects the binary plist dialect and rejects it (its decoder lives
/// outside this crate's scope); everything else parses as the old-style
/// ASCII dialect.
pub fn deserialize(bytes: &[u8]) -> Result<Value> {
    if bytes.starts_with(BINARY_MAGIC) {
        return Err(PlistError::UnsupportedFormat);
    }
    ascii::parse(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_input_is_rejected() {
        let err = deserialize(b"bplist00whatever").unwrap_err();
        assert!(matches!(err, PlistError::UnsupportedFormat));
    }

    #[test]
    fn ascii_input_parses() {
        let value = deserialize(b"// !$*UTF8*$!\n{ archiveVersion = 1; }\n").unwrap();
        assert!(value.as_dictionary().is_some());
    }
}
