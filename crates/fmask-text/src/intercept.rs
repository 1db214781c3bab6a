#![forbid(unsafe_code)]

//! Edit Interceptor: Backspace/Delete policy around literals.
//!
//! Runs at key-down, before the host applies its own edit. Deleting a literal
//! directly would leave the field off-format until the next reformat, so a
//! delete that would touch a literal is turned into a caret move or a
//! narrowed selection instead.
//!
//! # Policy
//!
//! | selection | key       | literal at edge            | outcome                           |
//! |-----------|-----------|----------------------------|-----------------------------------|
//! | caret     | Backspace | before caret               | caret moves one left              |
//! | caret     | Delete    | at caret                   | caret moves one right             |
//! | caret     | either    | caret inside fixed prefix  | cancelled                         |
//! | range     | Backspace | leading literals           | start moves past them             |
//! | range     | Delete    | trailing literals          | end moves before them             |
//! | range     | either    | only interior literals     | digits removed, literals kept     |

use fmask_core::Selection;
use unicode_segmentation::UnicodeSegmentation;

use crate::format::FormatDescriptor;

/// The deletion keys the interceptor reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditKey {
    /// Delete backwards.
    Backspace,
    /// Delete forwards.
    Delete,
}

/// What the host should do with a pending deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intercept {
    /// Let the host apply its native edit.
    Pass,
    /// Suppress the edit; nothing changes.
    Cancel,
    /// Suppress the edit and move the caret/selection instead.
    Reselect(Selection),
    /// Suppress the edit and remove only the digits inside the range
    /// (see [`remove_digits`]).
    Remove(Selection),
}

/// Decide how a Backspace/Delete on `formatted` with `selection` is handled.
///
/// ```
/// use fmask_core::Selection;
/// use fmask_text::intercept::{intercept, EditKey, Intercept};
/// use fmask_text::{DATE, PHONE};
///
/// assert_eq!(
///     intercept(&PHONE, "(11)99999-8888", Selection::caret(4), EditKey::Backspace),
///     Intercept::Reselect(Selection::caret(3)),
/// );
/// assert_eq!(
///     intercept(&DATE, "15/08", Selection::caret(2), EditKey::Delete),
///     Intercept::Reselect(Selection::caret(3)),
/// );
/// assert_eq!(
///     intercept(&DATE, "15/08", Selection::caret(5), EditKey::Backspace),
///     Intercept::Pass,
/// );
/// ```
#[must_use]
pub fn intercept(
    format: &FormatDescriptor,
    formatted: &str,
    selection: Selection,
    key: EditKey,
) -> Intercept {
    let graphemes: Vec<&str> = formatted.graphemes(true).collect();
    let selection = selection.clamped(graphemes.len());
    let prefix = format.fixed_prefix_len().min(graphemes.len());
    let is_literal = |idx: usize| {
        graphemes
            .get(idx)
            .is_some_and(|g| format.is_literal_grapheme(g))
    };

    if selection.is_collapsed() {
        let pos = selection.start;
        return match key {
            EditKey::Backspace if prefix > 0 && pos <= prefix => Intercept::Cancel,
            EditKey::Delete if pos < prefix => Intercept::Cancel,
            EditKey::Backspace if pos > 0 && is_literal(pos - 1) => {
                Intercept::Reselect(Selection::caret(pos - 1))
            }
            EditKey::Delete if is_literal(pos) => Intercept::Reselect(Selection::caret(pos + 1)),
            _ => Intercept::Pass,
        };
    }

    let start = selection.start.max(prefix);
    let end = selection.end;
    if start >= end {
        // The whole range sits inside the fixed prefix.
        return Intercept::Cancel;
    }

    let narrowed = match key {
        EditKey::Backspace => {
            let mut ns = start;
            while ns < end && is_literal(ns) {
                ns += 1;
            }
            Selection::new(ns, end)
        }
        EditKey::Delete => {
            let mut ne = end;
            while ne > start && is_literal(ne - 1) {
                ne -= 1;
            }
            Selection::new(start, ne)
        }
    };

    if narrowed != selection {
        return Intercept::Reselect(narrowed);
    }
    if (selection.start..selection.end).any(is_literal) {
        Intercept::Remove(selection)
    } else {
        Intercept::Pass
    }
}

/// `formatted` with every digit inside `selection` removed.
///
/// Literals in the range stay where they are; the next reformat
/// re-slots them.
///
/// ```
/// use fmask_core::Selection;
/// use fmask_text::intercept::remove_digits;
/// use fmask_text::DATE;
///
/// assert_eq!(remove_digits(&DATE, "15/08", Selection::new(1, 4)), "1/8");
/// ```
#[must_use]
pub fn remove_digits(format: &FormatDescriptor, formatted: &str, selection: Selection) -> String {
    let count = formatted.graphemes(true).count();
    let selection = selection.clamped(count);
    formatted
        .graphemes(true)
        .enumerate()
        .filter(|&(i, g)| {
            i < selection.start || i >= selection.end || format.is_literal_grapheme(g)
        })
        .map(|(_, g)| g)
        .collect()
}
