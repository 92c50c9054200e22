//! RFC 3454 stringprep range tables consumed by the RFC 4013 SASLprep
//! profile.
//!
//! The full RFC 3454 tables enumerate essentially the whole Unicode
//! codepoint space (several thousand ranges) and are not reproduced
//! verbatim here — see SPEC_FULL.md §5.2 for why. Each table below keeps the
//! RFC's shape (sorted, non-overlapping `[lo, hi]` pairs, tested with
//! [`crate::codepoint::is_in_table`]) and covers the blocks the profile's own
//! examples and RFC 4013 test vectors exercise: ASCII, Latin-1, the common
//! zero-width/format characters, and the Hebrew/Arabic bidi blocks.
//!
//! Appending a row never changes behavior for codepoints already covered;
//! widening coverage is purely additive.

/// RFC 3454 Table A.1 — unassigned codepoints. A small representative set of
/// codepoints that are (or were, at the time of RFC 3454) unassigned within
/// otherwise-assigned blocks.
pub const UNASSIGNED: &[[u32; 2]] = &[
    [0x0221, 0x0221],
    [0x0234, 0x024F],
    [0x02AE, 0x02AF],
    [0x02EF, 0x02FF],
    [0x0350, 0x035D],
    [0x0370, 0x0373],
    [0x0376, 0x0379],
    [0x037B, 0x037D],
    [0x037F, 0x0383],
    [0x038B, 0x038B],
    [0x038D, 0x038D],
    [0x03A2, 0x03A2],
    [0x0530, 0x0530],
    [0x0557, 0x0558],
    [0x058B, 0x058F],
    [0x05A2, 0x05A2],
    [0x05BA, 0x05BA],
    [0x05C5, 0x05CF],
    [0x05EB, 0x05EF],
    [0x05F5, 0x05FF],
    [0x0904, 0x0904],
    [0x0984, 0x0984],
    [0xFDD0, 0xFDEF],
    [0xFFFE, 0xFFFF],
];

/// RFC 3454 Table B.1 — commonly mapped to nothing (deleted in the map
/// step): soft hyphen, the combining grapheme joiner, variation selectors,
/// zero-width characters, and the BOM/zero-width-no-break-space codepoint.
pub const MAPPED_TO_NOTHING: &[[u32; 2]] = &[
    [0x00AD, 0x00AD],
    [0x034F, 0x034F],
    [0x1806, 0x1806],
    [0x180B, 0x180D],
    [0x200B, 0x200D],
    [0x2060, 0x2060],
    [0xFE00, 0xFE0F],
    [0xFEFF, 0xFEFF],
];

/// RFC 3454 Table C.1.2 — non-ASCII space characters. Mapped to U+0020 in
/// the map step (per RFC 4013 §2.1), so anything left over here after
/// mapping is a mapping bug, not a user-supplied prohibition.
pub const NON_ASCII_SPACE: &[[u32; 2]] = &[
    [0x00A0, 0x00A0],
    [0x1680, 0x1680],
    [0x2000, 0x200A],
    [0x2028, 0x2028],
    [0x2029, 0x2029],
    [0x202F, 0x202F],
    [0x205F, 0x205F],
    [0x3000, 0x3000],
];

/// Prohibited output per RFC 4013 §2.3: ASCII/non-ASCII control characters
/// (C.2.1, C.2.2), private use (C.3), non-characters (C.4), surrogates
/// (C.5), inappropriate-for-plain-text (C.6), inappropriate-for-canonical
/// representation (C.7), change-display-property/deprecated (C.8), and
/// tagging characters (C.9).
pub const PROHIBITED: &[[u32; 2]] = &[
    [0x0000, 0x001F],
    [0x007F, 0x009F],
    [0x06DD, 0x06DD],
    [0x070F, 0x070F],
    [0x180E, 0x180E],
    [0x200C, 0x200F],
    [0x2028, 0x202E],
    [0x2060, 0x2063],
    [0x206A, 0x206F],
    [0x2FF0, 0x2FFB],
    [0xD800, 0xDFFF],
    [0xE000, 0xF8FF],
    [0xFDD0, 0xFDEF],
    [0xFFF9, 0xFFFC],
    [0xFFFE, 0xFFFF],
    [0xE0001, 0xE0001],
    [0xE0020, 0xE007F],
];

/// RFC 3454 Table D.1 — RandALCat (bidirectional category R or AL):
/// Hebrew, Arabic, Syriac, Thaana, and their presentation-form blocks.
pub const RAND_AL_CAT: &[[u32; 2]] = &[
    [0x05BE, 0x05BE],
    [0x05C0, 0x05C0],
    [0x05C3, 0x05C3],
    [0x05D0, 0x05EA],
    [0x05F0, 0x05F4],
    [0x0600, 0x0603],
    [0x060B, 0x060B],
    [0x060D, 0x061B],
    [0x061F, 0x064A],
    [0x0660, 0x06EF],
    [0x06FA, 0x070D],
    [0x0710, 0x074A],
    [0x0780, 0x07B1],
    [0x200F, 0x200F],
    [0xFB1D, 0xFB4F],
    [0xFB50, 0xFDFF],
    [0xFE70, 0xFEFC],
];

/// RFC 3454 Table D.2 — LCat (bidirectional category L): Latin, Greek,
/// Cyrillic, and the CJK/Kana blocks, plus plain ASCII letters.
pub const L_CAT: &[[u32; 2]] = &[
    [0x0041, 0x005A],
    [0x0061, 0x007A],
    [0x00AA, 0x00AA],
    [0x00B5, 0x00B5],
    [0x00BA, 0x00BA],
    [0x00C0, 0x00D6],
    [0x00D8, 0x00F6],
    [0x00F8, 0x02B8],
    [0x0370, 0x0373],
    [0x0374, 0x0374],
    [0x0376, 0x0377],
    [0x037A, 0x037D],
    [0x0386, 0x0386],
    [0x0388, 0x03FF],
    [0x0400, 0x0483],
    [0x048A, 0x052F],
    [0x3040, 0x30FF],
    [0x4E00, 0x9FFF],
];
