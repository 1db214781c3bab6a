#![forbid(unsafe_code)]

//! `(DD)PPPPP-PPPP` phone field.
//!
//! The opening parenthesis is a protected prefix: focus inserts it into an
//! empty field, clicks before it snap the caret inside, and blur removes it
//! again when no digits were typed.

use fmask_core::{Event, KeyEvent, Selection};
use fmask_text::PHONE;

use crate::masked_input::{ChangeReport, KeyDisposition, MaskedInput};

/// A masked phone field.
#[derive(Debug, Clone)]
pub struct PhoneField {
    input: MaskedInput,
}

impl Default for PhoneField {
    fn default() -> Self {
        Self::new()
    }
}

impl PhoneField {
    /// Empty phone field.
    #[must_use]
    pub fn new() -> Self {
        Self {
            input: MaskedInput::new(PHONE),
        }
    }

    /// Start with the host control's current text (builder).
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.input = self.input.with_value(value);
        self
    }

    /// Current text.
    #[must_use]
    pub fn value(&self) -> &str {
        self.input.value()
    }

    /// Current Digit Sequence.
    #[must_use]
    pub fn digits(&self) -> String {
        self.input.digits()
    }

    /// Caret position.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.input.cursor()
    }

    /// Current selection.
    #[must_use]
    pub fn selection(&self) -> Selection {
        self.input.selection()
    }

    /// The underlying masking loop.
    #[must_use]
    pub fn input(&self) -> &MaskedInput {
        &self.input
    }

    /// Handle a host event. Returns `true` if the state changed.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        match event {
            Event::Focus(true) => self.focus(),
            Event::Focus(false) => self.blur(),
            Event::Select(selection) => self.click(*selection),
            _ => return self.input.handle_event(event),
        }
        true
    }

    /// Key-down for hosts that apply edits themselves.
    pub fn key_down(&mut self, key: &KeyEvent) -> KeyDisposition {
        self.input.key_down(key)
    }

    /// Content-changed for hosts that apply edits themselves.
    pub fn host_input(&mut self, value: impl Into<String>, selection: Selection) -> ChangeReport {
        self.input.host_input(value, selection)
    }

    /// Focus: seed `()` into an empty field, keep the caret past `(`.
    pub fn focus(&mut self) {
        self.input.set_focused(true);
        if self.input.value().trim().is_empty() {
            self.input.set_value(PHONE.format(""), PHONE.fixed_prefix_len());
            return;
        }
        self.snap_past_prefix();
    }

    /// Click or selection change from the host. Any selection that starts at
    /// or before `(` collapses to a caret just past it.
    pub fn click(&mut self, selection: Selection) {
        self.input.set_selection(selection);
        self.snap_past_prefix();
    }

    /// Blur: an untouched `()` is removed.
    pub fn blur(&mut self) {
        self.input.set_focused(false);
        if self.input.digits().is_empty() && !self.input.value().is_empty() {
            tracing::trace!(value = self.input.value(), "empty phone cleared on blur");
            self.input.set_value(String::new(), 0);
        }
    }

    fn snap_past_prefix(&mut self) {
        let prefix = PHONE.fixed_prefix_len();
        let selection = self.input.selection();
        if selection.start <= prefix {
            self.input.set_selection(Selection::caret(prefix));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fmask_core::KeyCode;

    #[test]
    fn focus_seeds_prefix() {
        let mut field = PhoneField::new();
        field.handle_event(&Event::Focus(true));
        assert_eq!(field.value(), "()");
        assert_eq!(field.cursor(), 1);
    }

    #[test]
    fn focus_treats_whitespace_as_empty() {
        let mut field = PhoneField::new().with_value("  ");
        field.focus();
        assert_eq!(field.value(), "()");
    }

    #[test]
    fn focus_keeps_existing_value() {
        let mut field = PhoneField::new().with_value("(11)9");
        field.focus();
        assert_eq!(field.value(), "(11)9");
        assert_eq!(field.cursor(), 5);
    }

    #[test]
    fn click_before_prefix_snaps_inside() {
        let mut field = PhoneField::new().with_value("(11)9");
        field.handle_event(&Event::Select(Selection::caret(0)));
        assert_eq!(field.cursor(), 1);
    }

    #[test]
    fn click_on_a_range_touching_the_prefix_collapses_past_it() {
        let mut field = PhoneField::new().with_value("(11)9");
        field.click(Selection::new(0, 3));
        assert_eq!(field.selection(), Selection::caret(1));
        field.click(Selection::new(1, 4));
        assert_eq!(field.selection(), Selection::caret(1));
    }

    #[test]
    fn click_on_a_range_past_the_prefix_is_kept() {
        let mut field = PhoneField::new().with_value("(11)9");
        field.click(Selection::new(2, 5));
        assert_eq!(field.selection(), Selection::new(2, 5));
    }

    #[test]
    fn focus_collapses_a_range_starting_in_the_prefix() {
        let mut field = PhoneField::new().with_value("(11)9");
        field.input.set_selection(Selection::new(0, 5));
        field.focus();
        assert_eq!(field.selection(), Selection::caret(1));
    }

    #[test]
    fn blur_without_digits_clears() {
        let mut field = PhoneField::new();
        field.focus();
        field.blur();
        assert_eq!(field.value(), "");
    }

    #[test]
    fn blur_keeps_partial_number() {
        let mut field = PhoneField::new();
        field.focus();
        field.handle_event(&Event::Key(KeyEvent::new(KeyCode::Char('1'))));
        field.blur();
        assert_eq!(field.value(), "(1)");
    }

    #[test]
    fn delete_inside_prefix_is_cancelled() {
        let mut field = PhoneField::new().with_value("(11)");
        field.input.set_selection(Selection::caret(0));
        assert_eq!(
            field.key_down(&KeyEvent::new(KeyCode::Delete)),
            KeyDisposition::Prevented
        );
        assert_eq!(field.value(), "(11)");
    }
}
