#![forbid(unsafe_code)]

//! Proleptic Gregorian helpers and the ISO-ordered [`NormalizedDate`].

use std::fmt;

/// Gregorian leap-year rule.
#[inline]
#[must_use]
pub const fn is_leap_year(year: u32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Days in `month` (1-12) of `year`, or `None` for an out-of-range month.
///
/// ```
/// use fmask_text::calendar::days_in_month;
///
/// assert_eq!(days_in_month(2024, 2), Some(29));
/// assert_eq!(days_in_month(2023, 2), Some(28));
/// assert_eq!(days_in_month(1900, 2), Some(28));
/// assert_eq!(days_in_month(2000, 2), Some(29));
/// assert_eq!(days_in_month(2023, 13), None);
/// ```
#[must_use]
pub const fn days_in_month(year: u32, month: u32) -> Option<u32> {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => Some(31),
        4 | 6 | 9 | 11 => Some(30),
        2 if is_leap_year(year) => Some(29),
        2 => Some(28),
        _ => None,
    }
}

/// A real calendar date in ISO order.
///
/// Only constructed from a complete, valid `DDMMYYYY` sequence or an ISO
/// `YYYY-MM-DD` string. Year 0 is rejected, matching native date controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NormalizedDate {
    year: u16,
    month: u8,
    day: u8,
}

impl NormalizedDate {
    /// Build a date, returning `None` unless it exists on the calendar.
    #[must_use]
    pub fn new(year: u32, month: u32, day: u32) -> Option<Self> {
        if !(1..=9999).contains(&year) {
            return None;
        }
        let max_day = days_in_month(year, month)?;
        if !(1..=max_day).contains(&day) {
            return None;
        }
        Some(Self {
            year: u16::try_from(year).ok()?,
            month: u8::try_from(month).ok()?,
            day: u8::try_from(day).ok()?,
        })
    }

    /// Parse an 8-digit `DDMMYYYY` Digit Sequence.
    ///
    /// ```
    /// use fmask_text::NormalizedDate;
    ///
    /// let date = NormalizedDate::from_digits("01012024").unwrap();
    /// assert_eq!(date.to_iso(), "2024-01-01");
    /// assert!(NormalizedDate::from_digits("0101202").is_none());
    /// assert!(NormalizedDate::from_digits("29022023").is_none());
    /// ```
    #[must_use]
    pub fn from_digits(digits: &str) -> Option<Self> {
        if digits.len() != 8 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let day = digits[0..2].parse().ok()?;
        let month = digits[2..4].parse().ok()?;
        let year = digits[4..8].parse().ok()?;
        Self::new(year, month, day)
    }

    /// Parse `YYYY-MM-DD`.
    ///
    /// ```
    /// use fmask_text::NormalizedDate;
    ///
    /// let date = NormalizedDate::parse_iso("2024-08-15").unwrap();
    /// assert_eq!(date.to_display(), "15/08/2024");
    /// assert!(NormalizedDate::parse_iso("15/08/2024").is_none());
    /// assert!(NormalizedDate::parse_iso("2024-02-30").is_none());
    /// ```
    #[must_use]
    pub fn parse_iso(s: &str) -> Option<Self> {
        let mut parts = s.trim().split('-');
        let (year, month, day) = (parts.next()?, parts.next()?, parts.next()?);
        if parts.next().is_some() || year.len() != 4 || month.len() != 2 || day.len() != 2 {
            return None;
        }
        let all_digits = |p: &str| p.bytes().all(|b| b.is_ascii_digit());
        if !(all_digits(year) && all_digits(month) && all_digits(day)) {
            return None;
        }
        Self::new(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
    }

    /// Year (1-9999).
    #[inline]
    #[must_use]
    pub const fn year(&self) -> u32 {
        self.year as u32
    }

    /// Month (1-12).
    #[inline]
    #[must_use]
    pub const fn month(&self) -> u32 {
        self.month as u32
    }

    /// Day of month (1-31).
    #[inline]
    #[must_use]
    pub const fn day(&self) -> u32 {
        self.day as u32
    }

    /// `YYYY-MM-DD`, zero padded.
    #[must_use]
    pub fn to_iso(&self) -> String {
        self.to_string()
    }

    /// `DD/MM/YYYY`, the masked display form.
    #[must_use]
    pub fn to_display(&self) -> String {
        format!("{:02}/{:02}/{:04}", self.day, self.month, self.year)
    }

    /// The `DDMMYYYY` Digit Sequence.
    #[must_use]
    pub fn to_digits(&self) -> String {
        format!("{:02}{:02}{:04}", self.day, self.month, self.year)
    }
}

impl fmt::Display for NormalizedDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// ISO string for the mirror field: `YYYY-MM-DD` from the first eight digits.
///
/// Written whenever the sequence is complete, without a calendar check; the
/// Validator has already run by the time a field reaches eight digits.
///
/// ```
/// use fmask_text::calendar::iso_from_digits;
///
/// assert_eq!(iso_from_digits("15082024").as_deref(), Some("2024-08-15"));
/// assert_eq!(iso_from_digits("1508202"), None);
/// ```
#[must_use]
pub fn iso_from_digits(digits: &str) -> Option<String> {
    if digits.len() < 8 || !digits.is_char_boundary(8) {
        return None;
    }
    let (day, month, year) = (&digits[0..2], &digits[2..4], &digits[4..8]);
    Some(format!("{year}-{month}-{day}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leap_years() {
        assert!(is_leap_year(2024));
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2023));
    }

    #[test]
    fn month_lengths() {
        let lengths: Vec<u32> = (1..=12).filter_map(|m| days_in_month(2023, m)).collect();
        assert_eq!(lengths, [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31]);
        assert_eq!(days_in_month(2023, 0), None);
    }

    #[test]
    fn new_rejects_impossible_dates() {
        assert!(NormalizedDate::new(2024, 2, 29).is_some());
        assert!(NormalizedDate::new(2023, 2, 29).is_none());
        assert!(NormalizedDate::new(2023, 4, 31).is_none());
        assert!(NormalizedDate::new(2023, 1, 0).is_none());
        assert!(NormalizedDate::new(0, 1, 1).is_none());
        assert!(NormalizedDate::new(10_000, 1, 1).is_none());
    }

    #[test]
    fn iso_and_display_round_trip() {
        let date = NormalizedDate::new(7, 3, 9).unwrap();
        assert_eq!(date.to_iso(), "0007-03-09");
        assert_eq!(date.to_display(), "09/03/0007");
        assert_eq!(date.to_digits(), "09030007");
        assert_eq!(NormalizedDate::parse_iso(&date.to_iso()), Some(date));
        assert_eq!(NormalizedDate::from_digits(&date.to_digits()), Some(date));
    }

    #[test]
    fn parse_iso_is_strict() {
        assert!(NormalizedDate::parse_iso("2024-8-15").is_none());
        assert!(NormalizedDate::parse_iso("2024-08-15-01").is_none());
        assert!(NormalizedDate::parse_iso("+024-08-15").is_none());
        assert!(NormalizedDate::parse_iso("").is_none());
        assert_eq!(
            NormalizedDate::parse_iso(" 2024-08-15 "),
            NormalizedDate::new(2024, 8, 15)
        );
    }

    #[test]
    fn dates_order_chronologically() {
        let a = NormalizedDate::new(2023, 12, 31).unwrap();
        let b = NormalizedDate::new(2024, 1, 1).unwrap();
        assert!(a < b);
    }
}
