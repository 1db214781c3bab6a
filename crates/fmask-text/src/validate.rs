#![forbid(unsafe_code)]

//! Date Validator.
//!
//! Keeps a partial `DDMMYYYY` sequence inside the calendar: the month, once
//! both its digits are present, is 01-12; the day, once both its digits are
//! present, fits the month (or 31 while the month is unknown) of the year
//! (or [`DateValidator::default_year`] while the year is incomplete).
//! Rejection is silent: the offending digits simply never appear.

use crate::calendar::days_in_month;

/// Year assumed while fewer than four year digits are present.
pub const DEFAULT_YEAR: u32 = 2000;

/// How a rejected edit is rolled back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ValidationStrategy {
    /// Re-check the whole sequence on every change; on violation restore the
    /// last accepted sequence. A day accepted before its month is re-checked
    /// once the month arrives.
    #[default]
    FullSequence,
    /// Legacy behaviour: check month then day once per change, each check
    /// dropping only the last digit, with partial years parsed as numbers.
    LastKeystroke,
}

/// Validator for the date mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateValidator {
    strategy: ValidationStrategy,
    default_year: u32,
}

impl Default for DateValidator {
    fn default() -> Self {
        Self::new(ValidationStrategy::default())
    }
}

impl DateValidator {
    /// Create a validator using `strategy` and the default year 2000.
    #[must_use]
    pub const fn new(strategy: ValidationStrategy) -> Self {
        Self {
            strategy,
            default_year: DEFAULT_YEAR,
        }
    }

    /// Set the year assumed while the year is incomplete (builder).
    #[must_use]
    pub const fn with_default_year(mut self, year: u32) -> Self {
        self.default_year = year;
        self
    }

    /// The rollback strategy.
    #[inline]
    #[must_use]
    pub const fn strategy(&self) -> ValidationStrategy {
        self.strategy
    }

    /// The year assumed while the year is incomplete.
    #[inline]
    #[must_use]
    pub const fn default_year(&self) -> u32 {
        self.default_year
    }

    /// Whether a (possibly partial) Digit Sequence is acceptable as a whole.
    ///
    /// ```
    /// use fmask_text::DateValidator;
    ///
    /// let v = DateValidator::default();
    /// assert!(v.accepts("31"));
    /// assert!(!v.accepts("3102"));
    /// assert!(v.accepts("2902202"));
    /// assert!(!v.accepts("29022023"));
    /// assert!(!v.accepts("0113"));
    /// ```
    #[must_use]
    pub fn accepts(&self, digits: &str) -> bool {
        let month = number(digits, 2, 4);
        if let Some(month) = month
            && !(1..=12).contains(&month)
        {
            return false;
        }
        let Some(day) = number(digits, 0, 2) else {
            return true;
        };
        let year = number(digits, 4, 8).unwrap_or(self.default_year);
        let max_day = month.and_then(|m| days_in_month(year, m)).unwrap_or(31);
        (1..=max_day).contains(&day)
    }

    /// Settle a freshly edited sequence against the calendar.
    ///
    /// `last_valid` is the sequence the field showed before the edit. The
    /// result is always acceptable to [`accepts`](Self::accepts) under
    /// [`ValidationStrategy::FullSequence`].
    ///
    /// ```
    /// use fmask_text::DateValidator;
    ///
    /// let v = DateValidator::default();
    /// assert_eq!(v.settle("3102", Some("310")), "310");
    /// assert_eq!(v.settle("1508", Some("150")), "1508");
    /// ```
    #[must_use]
    pub fn settle(&self, candidate: &str, last_valid: Option<&str>) -> String {
        match self.strategy {
            ValidationStrategy::FullSequence => self.settle_full(candidate, last_valid),
            ValidationStrategy::LastKeystroke => self.settle_last_keystroke(candidate),
        }
    }

    fn settle_full(&self, candidate: &str, last_valid: Option<&str>) -> String {
        if self.accepts(candidate) {
            return candidate.to_owned();
        }
        if let Some(prev) = last_valid.filter(|prev| self.accepts(prev)) {
            return prev.to_owned();
        }
        let mut digits = candidate.to_owned();
        while !self.accepts(&digits) {
            digits.pop();
        }
        digits
    }

    fn settle_last_keystroke(&self, candidate: &str) -> String {
        let mut digits = candidate.to_owned();

        if let Some(month) = number(&digits, 2, 4)
            && !(1..=12).contains(&month)
        {
            digits.pop();
        }

        if let Some(day) = number(&digits, 0, 2) {
            let month = prefix_number(&digits, 2, 4).unwrap_or(0);
            let year = prefix_number(&digits, 4, 8)
                .filter(|&y| y != 0)
                .map_or(self.default_year, two_digit_century);
            let max_day = days_in_month(year, month).unwrap_or(31);
            if !(1..=max_day).contains(&day) {
                digits.pop();
            }
        }

        digits
    }
}

/// The number in `digits[start..end]`, only when every position is filled.
fn number(digits: &str, start: usize, end: usize) -> Option<u32> {
    digits.get(start..end)?.parse().ok()
}

/// The number in whatever part of `digits[start..end]` is present.
fn prefix_number(digits: &str, start: usize, end: usize) -> Option<u32> {
    let slice = digits.get(start..end.min(digits.len()))?;
    if slice.is_empty() {
        return None;
    }
    slice.parse().ok()
}

/// Legacy year mapping: years 1-99 resolve to 1901-1999.
const fn two_digit_century(year: u32) -> u32 {
    if year < 100 { 1900 + year } else { year }
}
