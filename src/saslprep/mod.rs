//! SASLprep (RFC 4013) password preparation.
//!
//! Applies the stringprep profile RFC 4013 assigns to SASL passwords: map
//! non-ASCII space to U+0020 and delete the commonly-mapped-to-nothing set,
//! normalize to NFKC, reject prohibited or unassigned output, and enforce
//! the bidirectional (RandALCat/LCat) rule. Only SCRAM-SHA-256 calls this —
//! SCRAM-SHA-1 uses the legacy MD5 presecret instead.

mod tables;

use unicode_normalization::UnicodeNormalization;

use crate::codepoint::is_in_table;
use crate::error::{Result, ScramError};

/// True iff every byte of `s` is ASCII printable (0x20..=0x7E). This is the
/// fallback predicate used when the full profile is unavailable: such
/// strings need no preparation and pass through unchanged.
pub fn is_preparation_unnecessary(s: &str) -> bool {
    s.bytes().all(|b| (0x20..=0x7E).contains(&b))
}

/// Applies the full SASLprep profile. See [`prepare_with_availability`] for
/// the degraded-availability path.
pub fn prepare(s: &str) -> Result<String> {
    prepare_with_availability(s, true)
}

/// Applies SASLprep, or — if `unicode_tables_available` is false — only
/// accepts input that is already ASCII printable and passes it through
/// unchanged. A driver built without the `unicode-normalization` tables
/// compiled in (or choosing to disable them for binary size) would call
/// this with `false`.
pub fn prepare_with_availability(s: &str, unicode_tables_available: bool) -> Result<String> {
    if !unicode_tables_available {
        return if is_preparation_unnecessary(s) {
            Ok(s.to_string())
        } else {
            Err(ScramError::PreparationUnavailable)
        };
    }

    // Step 1: map. Non-ASCII space becomes U+0020; the commonly-mapped-to-
    // nothing set is deleted outright.
    let mut mapped = String::with_capacity(s.len());
    for ch in s.chars() {
        let cp = ch as u32;
        if is_in_table(cp, tables::NON_ASCII_SPACE) {
            mapped.push(' ');
        } else if is_in_table(cp, tables::MAPPED_TO_NOTHING) {
            // deleted
        } else {
            mapped.push(ch);
        }
    }

    // Step 2: normalize to NFKC.
    let normalized: String = mapped.nfkc().collect();

    if normalized.is_empty() {
        return Ok(normalized);
    }

    // Step 3: prohibit.
    for ch in normalized.chars() {
        let cp = ch as u32;
        if is_in_table(cp, tables::PROHIBITED) {
            return Err(ScramError::SaslprepRejected(format!(
                "prohibited codepoint U+{cp:04X}"
            )));
        }
        if is_in_table(cp, tables::UNASSIGNED) {
            return Err(ScramError::SaslprepRejected(format!(
                "unassigned codepoint U+{cp:04X}"
            )));
        }
    }

    // Step 4: bidi rule (RFC 3454 §6). If any RandALCat codepoint is
    // present, no LCat codepoint may be present, and the first and last
    // codepoints must both be RandALCat.
    let mut has_rand_al_cat = false;
    let mut has_l_cat = false;
    for ch in normalized.chars() {
        let cp = ch as u32;
        if is_in_table(cp, tables::RAND_AL_CAT) {
            has_rand_al_cat = true;
        } else if is_in_table(cp, tables::L_CAT) {
            has_l_cat = true;
        }
    }
    if has_rand_al_cat {
        if has_l_cat {
            return Err(ScramError::SaslprepRejected(
                "RandALCat string must not contain an LCat character".to_string(),
            ));
        }
        let is_rand_al_cat = |c: char| is_in_table(c as u32, tables::RAND_AL_CAT);
        let first_ok = normalized.chars().next().map(is_rand_al_cat).unwrap_or(false);
        let last_ok = normalized.chars().next_back().map(is_rand_al_cat).unwrap_or(false);
        if !first_ok || !last_ok {
            return Err(ScramError::SaslprepRejected(
                "RandALCat string must start and end with a RandALCat character".to_string(),
            ));
        }
    }

    // Step 5: emit — `normalized` is already a UTF-8 `String`.
    Ok(normalized)
}
