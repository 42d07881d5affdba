//! Composite key codec
//!
//! Row keys come in two shapes: delimited keys joining ordered components
//! with `|`, and suffix-anchored keys of the form `name_SUFFIX` where the
//! name component is unconstrained. Decoding is the strict inverse of
//! encoding; a key lacking the expected structure is a hard error.

use crate::error::{Result, XlateError};

/// Delimiter joining the components of a grouped row key
pub const KEY_DELIMITER: char = '|';

/// Separator anchoring a type suffix to a name component
pub const SUFFIX_SEPARATOR: char = '_';

/// Join components into a delimited row key
///
/// Components must not contain the delimiter; that would make the key
/// undecodable.
pub fn encode_key(parts: &[&str]) -> Result<String> {
    for part in parts {
        if part.contains(KEY_DELIMITER) {
            return Err(XlateError::MalformedKey {
                key: part.to_string(),
                reason: format!("component contains reserved delimiter {:?}", KEY_DELIMITER),
            });
        }
    }
    Ok(parts.join(&KEY_DELIMITER.to_string()))
}

/// Split a delimited row key into exactly `expected` components
pub fn decode_key(key: &str, expected: usize) -> Result<Vec<&str>> {
    let parts: Vec<&str> = key.split(KEY_DELIMITER).collect();
    if parts.len() != expected || parts.iter().any(|part| part.is_empty()) {
        return Err(XlateError::MalformedKey {
            key: key.to_string(),
            reason: format!("expected {} non-empty components", expected),
        });
    }
    Ok(parts)
}

/// Compose a suffix-anchored key, `name_SUFFIX`
pub fn encode_suffixed(name: &str, suffix: &str) -> String {
    format!("{}{}{}", name, SUFFIX_SEPARATOR, suffix)
}

/// Split a suffix-anchored key against a set of recognized suffixes
///
/// Matches on the *last* occurrence of `_SUFFIX` so that name components
/// containing the separator (or even a suffix token) decode correctly.
/// Returns the name component and the matched suffix.
pub fn split_known_suffix<'a, 'b>(key: &'a str, suffixes: &[&'b str]) -> Result<(&'a str, &'b str)> {
    for suffix in suffixes {
        let anchored = format!("{}{}", SUFFIX_SEPARATOR, suffix);
        if let Some(at) = key.rfind(&anchored) {
            // Only a match that terminates the key is a real suffix.
            if at + anchored.len() == key.len() && at > 0 {
                return Ok((&key[..at], *suffix));
            }
        }
    }
    Err(XlateError::MalformedKey {
        key: key.to_string(),
        reason: "no recognized type suffix".to_string(),
    })
}
