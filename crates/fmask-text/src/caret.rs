#![forbid(unsafe_code)]

//! Caret Translator.
//!
//! Reformatting inserts and removes literals whose count does not track the
//! digit count, so raw offsets cannot survive a reformat. Cursors are
//! therefore carried across edits as a digit-index and translated back to an
//! offset in the new string.

use unicode_segmentation::UnicodeSegmentation;

use crate::digits::{count_digits, digits_before};
use crate::format::FormatDescriptor;

/// Offset immediately after the `digit_index`-th digit (1-based) of
/// `formatted`.
///
/// `digit_index == 0` lands just past the descriptor's fixed prefix (inside
/// the phone's parenthesis). An index beyond the digits present returns the
/// end of the string.
///
/// ```
/// use fmask_text::caret::offset_for_digit_index;
/// use fmask_text::{DATE, PHONE};
///
/// assert_eq!(offset_for_digit_index(&DATE, "15/08", 0), 0);
/// assert_eq!(offset_for_digit_index(&DATE, "15/08", 2), 2);
/// assert_eq!(offset_for_digit_index(&DATE, "15/08", 3), 4);
/// assert_eq!(offset_for_digit_index(&PHONE, "(11)9", 0), 1);
/// assert_eq!(offset_for_digit_index(&PHONE, "(11)9", 9), 5);
/// ```
#[must_use]
pub fn offset_for_digit_index(
    format: &FormatDescriptor,
    formatted: &str,
    digit_index: usize,
) -> usize {
    if digit_index == 0 {
        return format.fixed_prefix_len();
    }
    let mut seen = 0;
    for (i, g) in formatted.graphemes(true).enumerate() {
        seen += count_digits(g);
        if seen >= digit_index {
            return i + 1;
        }
    }
    formatted.graphemes(true).count()
}

/// Where the caret goes after a reformat.
///
/// `prev_value`/`prev_caret` come from the Edit Snapshot taken at key-down,
/// `digits` is the accepted Digit Sequence and `formatted` its rendering.
/// Only forward movement is credited: a deletion keeps the caret anchored
/// at its pre-edit digit-index.
///
/// ```
/// use fmask_text::caret::restore_caret;
/// use fmask_text::DATE;
///
/// // "15|" + '0' -> "15/0|"
/// assert_eq!(restore_caret(&DATE, "15", 2, "150", "15/0"), 4);
/// // "15/0|8" + Backspace -> "15/8": the caret keeps digit-index 3.
/// assert_eq!(restore_caret(&DATE, "15/08", 4, "158", "15/8"), 4);
/// ```
#[must_use]
pub fn restore_caret(
    format: &FormatDescriptor,
    prev_value: &str,
    prev_caret: usize,
    digits: &str,
    formatted: &str,
) -> usize {
    let before = digits_before(prev_value, prev_caret);
    let gained = count_digits(digits).saturating_sub(count_digits(prev_value));
    let target = (before + gained).min(count_digits(formatted));
    offset_for_digit_index(format, formatted, target)
}
