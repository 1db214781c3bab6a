#![forbid(unsafe_code)]

//! Caret/selection state over a field's text.

/// A selection over a field's text, as grapheme offsets.
///
/// The range is always normalized such that `start <= end`. A collapsed
/// selection (`start == end`) is a plain caret.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Selection {
    /// Start offset (inclusive).
    pub start: usize,
    /// End offset (exclusive).
    pub end: usize,
}

impl Selection {
    /// Create a selection, normalizing so `start <= end`.
    #[inline]
    #[must_use]
    pub const fn new(a: usize, b: usize) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    /// A collapsed selection (caret) at `pos`.
    #[inline]
    #[must_use]
    pub const fn caret(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// Returns `true` if the selection is a plain caret.
    #[inline]
    #[must_use]
    pub const fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    /// Number of graphemes covered.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` if no grapheme is covered.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.is_collapsed()
    }

    /// Clamp both bounds to `max`.
    #[inline]
    #[must_use]
    pub fn clamped(self, max: usize) -> Self {
        Self::new(self.start.min(max), self.end.min(max))
    }
}
