#![forbid(unsafe_code)]

//! Format descriptors and the Formatter.
//!
//! A [`FormatDescriptor`] lists the digit slices of a field and the literal
//! text wrapped around each slice. Formatting is a pure function of the
//! digit sequence and the descriptor; there is no hidden state.
//!
//! # Invariants
//!
//! - The digits of `format(d)`, read left to right, equal `d` (after the
//!   descriptor's length cap).
//! - Literals only ever appear in their segment's open/close slots.

use crate::digits::{count_digits, extract_digits};

/// When a segment's literals are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Emit {
    /// Always, even when the slice is empty.
    Always,
    /// Only when the slice holds at least one digit.
    NonEmpty,
}

/// One logical component of a masked value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Segment {
    /// First digit index (inclusive).
    pub start: usize,
    /// Last digit index (exclusive).
    pub end: usize,
    /// Literal written before the digits.
    pub open: &'static str,
    /// Literal written after the digits.
    pub close: &'static str,
    /// When `open`/`close` are written.
    pub emit: Emit,
}

impl Segment {
    const fn new(
        start: usize,
        end: usize,
        open: &'static str,
        close: &'static str,
        emit: Emit,
    ) -> Self {
        Self {
            start,
            end,
            open,
            close,
            emit,
        }
    }
}

/// Per-field description of a mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FormatDescriptor {
    /// Short name used in logs.
    pub name: &'static str,
    /// Segments in display order.
    pub segments: &'static [Segment],
    /// Maximum digit count; extra digits are ignored.
    pub max_digits: usize,
}

const DATE_SEGMENTS: [Segment; 3] = [
    Segment::new(0, 2, "", "", Emit::NonEmpty),
    Segment::new(2, 4, "/", "", Emit::NonEmpty),
    Segment::new(4, 8, "/", "", Emit::NonEmpty),
];

const PHONE_SEGMENTS: [Segment; 3] = [
    Segment::new(0, 2, "(", ")", Emit::Always),
    Segment::new(2, 7, "", "", Emit::NonEmpty),
    Segment::new(7, 11, "-", "", Emit::NonEmpty),
];

/// `DD/MM/YYYY`.
pub const DATE: FormatDescriptor = FormatDescriptor {
    name: "date",
    segments: &DATE_SEGMENTS,
    max_digits: 8,
};

/// `(DD)PPPPP-PPPP`. The `(` and `)` are always present.
pub const PHONE: FormatDescriptor = FormatDescriptor {
    name: "phone",
    segments: &PHONE_SEGMENTS,
    max_digits: 11,
};

impl FormatDescriptor {
    /// Render `digits` as the canonical display string.
    ///
    /// Non-digit characters are ignored and digits past
    /// [`max_digits`](Self::max_digits) are dropped, so this never fails.
    ///
    /// ```
    /// use fmask_text::{DATE, PHONE};
    ///
    /// assert_eq!(DATE.format("150820"), "15/08/20");
    /// assert_eq!(DATE.format(""), "");
    /// assert_eq!(PHONE.format(""), "()");
    /// assert_eq!(PHONE.format("11999998888"), "(11)99999-8888");
    /// ```
    #[must_use]
    pub fn format(&self, digits: &str) -> String {
        let digits = self.sequence(digits);
        let len = digits.len();
        let mut out = String::with_capacity(len + 4);
        for seg in self.segments {
            let slice = &digits[seg.start.min(len)..seg.end.min(len)];
            if slice.is_empty() && seg.emit == Emit::NonEmpty {
                continue;
            }
            out.push_str(seg.open);
            out.push_str(slice);
            out.push_str(seg.close);
        }
        out
    }

    /// Digit Sequence of `s` under this descriptor's length cap.
    #[must_use]
    pub fn sequence(&self, s: &str) -> String {
        let mut digits = extract_digits(s);
        digits.truncate(self.max_digits);
        digits
    }

    /// Whether `ch` is one of this descriptor's literals.
    #[must_use]
    pub fn is_literal(&self, ch: char) -> bool {
        self.segments
            .iter()
            .any(|seg| seg.open.contains(ch) || seg.close.contains(ch))
    }

    /// Whether a grapheme is a single literal character.
    #[must_use]
    pub fn is_literal_grapheme(&self, g: &str) -> bool {
        let mut chars = g.chars();
        matches!((chars.next(), chars.next()), (Some(ch), None) if self.is_literal(ch))
    }

    /// Number of literal characters that lead every formatted value.
    ///
    /// Zero for the date mask, one (`(`) for the phone mask. The cursor never
    /// needs to sit before this prefix and deletion may never reach into it.
    #[must_use]
    pub fn fixed_prefix_len(&self) -> usize {
        match self.segments.first() {
            Some(seg) if seg.emit == Emit::Always => seg.open.chars().count(),
            _ => 0,
        }
    }

    /// Number of literal characters in `formatted`.
    #[must_use]
    pub fn literal_count(&self, formatted: &str) -> usize {
        formatted.chars().filter(|&ch| self.is_literal(ch)).count()
    }

    /// Whether `s` is exactly the canonical rendering of its own digits.
    #[must_use]
    pub fn is_canonical(&self, s: &str) -> bool {
        count_digits(s) <= self.max_digits && self.format(s) == s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_grows_one_component_at_a_time() {
        assert_eq!(DATE.format("1"), "1");
        assert_eq!(DATE.format("15"), "15");
        assert_eq!(DATE.format("150"), "15/0");
        assert_eq!(DATE.format("1508"), "15/08");
        assert_eq!(DATE.format("15082"), "15/08/2");
        assert_eq!(DATE.format("15082024"), "15/08/2024");
    }

    #[test]
    fn date_ignores_extra_digits() {
        assert_eq!(DATE.format("1508202499"), "15/08/2024");
    }

    #[test]
    fn phone_prefix_is_unconditional() {
        assert_eq!(PHONE.format("1"), "(1)");
        assert_eq!(PHONE.format("11"), "(11)");
        assert_eq!(PHONE.format("119"), "(11)9");
        assert_eq!(PHONE.format("1199999"), "(11)99999");
        assert_eq!(PHONE.format("11999998"), "(11)99999-8");
    }

    #[test]
    fn phone_ignores_extra_digits() {
        assert_eq!(PHONE.format("119999988887"), "(11)99999-8888");
    }

    #[test]
    fn format_reads_digits_out_of_noise() {
        assert_eq!(DATE.format("15/0"), "15/0");
        assert_eq!(PHONE.format("(11)9x9"), "(11)99");
    }

    #[test]
    fn literals_per_descriptor() {
        assert!(DATE.is_literal('/'));
        assert!(!DATE.is_literal('-'));
        for ch in ['(', ')', '-'] {
            assert!(PHONE.is_literal(ch));
        }
        assert!(!PHONE.is_literal('/'));
        assert!(!PHONE.is_literal('1'));
        assert!(PHONE.is_literal_grapheme(")"));
        assert!(!PHONE.is_literal_grapheme(")1"));
        assert!(!PHONE.is_literal_grapheme(""));
    }

    #[test]
    fn fixed_prefix() {
        assert_eq!(DATE.fixed_prefix_len(), 0);
        assert_eq!(PHONE.fixed_prefix_len(), 1);
    }

    #[test]
    fn literal_count_and_canonical() {
        assert_eq!(DATE.literal_count("15/08/2024"), 2);
        assert_eq!(PHONE.literal_count("(11)99999-8888"), 3);
        assert!(DATE.is_canonical("15/08"));
        assert!(!DATE.is_canonical("1508"));
        assert!(PHONE.is_canonical("()"));
        assert!(!PHONE.is_canonical(""));
    }
}
