//! Identifier generation for newly created objects.

use rand::Rng;

const HEX_UPPER: &[u8; 16] = b"0123456789ABCDEF";

/// Length of every object identifier in a document.
pub const UUID_LEN: usize = 24;

/// Generate a fresh 24-character uppercase-hex identifier.
///
/// Uniqueness within a document is the caller's concern; with 96 bits of
/// randomness collisions are not a practical one.
pub fn generate_uuid() -> String {
    let mut rng = rand::rng();
    (0..UUID_LEN)
        .map(|_| HEX_UPPER[rng.random_range(0..HEX_UPPER.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuids_are_24_uppercase_hex_chars() {
        let uuid = generate_uuid();
        assert_eq!(uuid.len(), UUID_LEN);
        assert!(uuid.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_lowercase()));
    }

    #[test]
    fn uuids_differ_between_calls() {
        assert_ne!(generate_uuid(), generate_uuid());
    }
}
