#![forbid(unsafe_code)]

//! Digit extraction and grapheme-offset helpers.
//!
//! Offsets throughout fmask are grapheme indices, the unit a user sees as
//! one character. Only ASCII `0-9` count as digits.

use unicode_segmentation::UnicodeSegmentation;

/// Strip `s` to its ordered ASCII digit sequence.
///
/// ```
/// use fmask_text::digits::extract_digits;
///
/// assert_eq!(extract_digits("(11)99999-8888"), "11999998888");
/// assert_eq!(extract_digits("15/08/2024"), "15082024");
/// assert_eq!(extract_digits(""), "");
/// ```
#[must_use]
pub fn extract_digits(s: &str) -> String {
    s.chars().filter(char::is_ascii_digit).collect()
}

/// Number of ASCII digits in `s`.
#[inline]
#[must_use]
pub fn count_digits(s: &str) -> usize {
    s.bytes().filter(u8::is_ascii_digit).count()
}

/// Number of grapheme clusters in `s`.
#[inline]
#[must_use]
pub fn grapheme_count(s: &str) -> usize {
    s.graphemes(true).count()
}

/// Byte offset of the grapheme at index `idx`, or `s.len()` past the end.
#[must_use]
pub fn grapheme_byte_offset(s: &str, idx: usize) -> usize {
    s.grapheme_indices(true)
        .nth(idx)
        .map_or(s.len(), |(offset, _)| offset)
}

/// The grapheme at index `idx`, if any.
#[inline]
#[must_use]
pub fn grapheme_at(s: &str, idx: usize) -> Option<&str> {
    s.graphemes(true).nth(idx)
}

/// Count of digits strictly before grapheme offset `offset`.
///
/// This is the "digit-index" of a cursor: a coordinate that survives
/// reformatting because literals never count.
///
/// ```
/// use fmask_text::digits::digits_before;
///
/// assert_eq!(digits_before("15/08/2024", 3), 2);
/// assert_eq!(digits_before("15/08/2024", 4), 3);
/// assert_eq!(digits_before("(11)9", 99), 3);
/// ```
#[must_use]
pub fn digits_before(s: &str, offset: usize) -> usize {
    s.graphemes(true).take(offset).map(count_digits).sum()
}
