//! RFC 5802 wire message assembly and parsing.
//!
//! This module only knows about the three SCRAM message shapes — it has no
//! opinion on cryptography or session state. `session.rs` calls into it to
//! build/parse message fragments and then does the crypto.

use std::collections::BTreeMap;

use crate::error::{Result, ScramError};

/// Escapes a SCRAM user name: `,` becomes `=2C` and `=` becomes `=3D`; no
/// other byte is touched.
pub fn escape_user(user: &str) -> String {
    let mut out = String::with_capacity(user.len());
    for ch in user.chars() {
        match ch {
            ',' => out.push_str("=2C"),
            '=' => out.push_str("=3D"),
            other => out.push(other),
        }
    }
    out
}

/// Reverses [`escape_user`]. Used by tests to check the escape round-trip
/// property; the client itself never needs to unescape its own
/// user name.
pub fn unescape_user(escaped: &str) -> Result<String> {
    let mut out = String::with_capacity(escaped.len());
    let bytes = escaped.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'=' {
            match escaped.get(i..i + 3) {
                Some("=2C") => {
                    out.push(',');
                    i += 3;
                }
                Some("=3D") => {
                    out.push('=');
                    i += 3;
                }
                _ => {
                    return Err(ScramError::MalformedAttribute(
                        "invalid '=' escape in user name".to_string(),
                    ))
                }
            }
        } else {
            let ch_len = escaped[i..].chars().next().map(|c| c.len_utf8()).unwrap_or(1);
            out.push_str(&escaped[i..i + ch_len]);
            i += ch_len;
        }
    }
    Ok(out)
}

/// Parses a comma-separated `key=value` attribute list (a server-first or
/// server-final message). Any key not present in `allowed` is a protocol
/// error; a malformed `key=value` pair (missing `=`, or no single-char key)
/// is also a protocol error. Duplicate keys overwrite the earlier value —
/// the RFC grammar doesn't repeat a key within one message, and the session
/// layer validates presence of each *required* key itself.
pub fn parse_attributes(s: &str, allowed: &[char]) -> Result<BTreeMap<char, String>> {
    let mut map = BTreeMap::new();
    for part in s.split(',') {
        let mut chars = part.chars();
        let key = chars
            .next()
            .ok_or_else(|| ScramError::MalformedAttribute("empty attribute".to_string()))?;
        if chars.next() != Some('=') {
            return Err(ScramError::MalformedAttribute(format!(
                "attribute '{part}' is not of the form k=v"
            )));
        }
        if !allowed.contains(&key) {
            return Err(ScramError::UnknownAttribute(key));
        }
        let value: String = chars.collect();
        map.insert(key, value);
    }
    Ok(map)
}

/// Looks up a required attribute, failing with `MissingAttribute` if absent.
pub fn require_attribute(map: &BTreeMap<char, String>, key: char) -> Result<String> {
    map.get(&key)
        .cloned()
        .ok_or(ScramError::MissingAttribute(key))
}
