#![forbid(unsafe_code)]

//! The masking engine loop shared by every masked field.
//!
//! One physical keystroke is handled in three steps, mirroring how a host
//! text control dispatches it:
//!
//! 1. [`MaskedInput::key_down`] snapshots the value and caret, and lets the
//!    Edit Interceptor cancel or redirect a Backspace/Delete.
//! 2. The host applies its native edit. Hosts without a native control let
//!    [`MaskedInput::handle_event`] simulate it.
//! 3. [`MaskedInput::content_changed`] extracts digits, validates, formats,
//!    and restores the caret from the snapshot.
//!
//! Hosts that own a native control call step 1, apply the edit themselves,
//! then hand the resulting text to [`MaskedInput::host_input`].

use fmask_core::{Event, KeyCode, KeyEvent, Selection};
use fmask_text::caret::restore_caret;
use fmask_text::digits::{grapheme_byte_offset, grapheme_count};
use fmask_text::intercept::{EditKey, Intercept, intercept, remove_digits};
use fmask_text::{DateValidator, FormatDescriptor};
use unicode_segmentation::UnicodeSegmentation;

/// Value and selection captured at key-down.
///
/// Lives for one key-down → content-changed cycle; the next key-down
/// overwrites it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditSnapshot {
    /// Field text before the edit.
    pub value: String,
    /// Selection before the edit.
    pub selection: Selection,
}

/// Whether the host may apply its default action for a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyDisposition {
    /// Apply the native edit.
    Default,
    /// Suppress the native edit; the field already handled the key and
    /// hosts should re-read [`MaskedInput::value`] and the selection.
    Prevented,
}

/// Result of one content-changed pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChangeReport {
    /// Digits in the accepted sequence.
    pub digit_count: usize,
    /// Whether the validator rolled back part of the edit.
    pub rejected: bool,
}

/// What a simulated native edit did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NativeEdit {
    Unchanged,
    Moved,
    Edited,
}

/// A masked single-line text field.
#[derive(Debug, Clone)]
pub struct MaskedInput {
    format: FormatDescriptor,
    validator: Option<DateValidator>,
    /// Current text, as the host shows it.
    value: String,
    /// Caret position (grapheme index).
    cursor: usize,
    /// Selection anchor (grapheme index). When set, selection spans from anchor to cursor.
    selection_anchor: Option<usize>,
    snapshot: Option<EditSnapshot>,
    /// State after the last reformat; stands in for a missing snapshot.
    rendered: EditSnapshot,
    /// Digit Sequence of the last accepted value.
    accepted: String,
    revision: u64,
    focused: bool,
}

impl MaskedInput {
    /// Create an empty field using `format`.
    #[must_use]
    pub fn new(format: FormatDescriptor) -> Self {
        Self {
            format,
            validator: None,
            value: String::new(),
            cursor: 0,
            selection_anchor: None,
            snapshot: None,
            rendered: EditSnapshot::default(),
            accepted: String::new(),
            revision: 0,
            focused: false,
        }
    }

    /// Validate digits with `validator` before formatting (builder).
    #[must_use]
    pub fn with_validator(mut self, validator: DateValidator) -> Self {
        self.validator = Some(validator);
        self
    }

    /// Start from a host-provided value, caret at the end (builder).
    ///
    /// The value is kept verbatim until the first content change.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        let value = value.into();
        let end = grapheme_count(&value);
        self.set_value(value, end);
        self
    }

    // --- Value access ---

    /// Current text.
    #[inline]
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Current Digit Sequence.
    #[must_use]
    pub fn digits(&self) -> String {
        self.format.sequence(&self.value)
    }

    /// Caret position (grapheme index).
    #[inline]
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Current selection; collapsed when there is none.
    #[must_use]
    pub fn selection(&self) -> Selection {
        match self.selection_anchor {
            Some(anchor) => Selection::new(anchor, self.cursor),
            None => Selection::caret(self.cursor),
        }
    }

    /// The field's format descriptor.
    #[inline]
    #[must_use]
    pub fn format(&self) -> &FormatDescriptor {
        &self.format
    }

    /// The snapshot taken at the last key-down, if not yet consumed.
    #[inline]
    #[must_use]
    pub fn pending_snapshot(&self) -> Option<&EditSnapshot> {
        self.snapshot.as_ref()
    }

    /// Number of content-changed passes run so far.
    #[inline]
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Whether the field has focus.
    #[inline]
    #[must_use]
    pub fn focused(&self) -> bool {
        self.focused
    }

    /// Set focus state.
    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// Replace the text and put the caret at `caret`.
    ///
    /// Used for programmatic renders (prefix insertion, committed dates);
    /// discards any pending snapshot.
    pub fn set_value(&mut self, value: impl Into<String>, caret: usize) {
        self.value = value.into();
        self.cursor = caret.min(self.grapheme_count());
        self.selection_anchor = None;
        self.snapshot = None;
        self.accepted = self.format.sequence(&self.value);
        self.rendered = self.capture();
    }

    /// Move the caret/selection, clamped to the text.
    pub fn set_selection(&mut self, selection: Selection) {
        let selection = selection.clamped(self.grapheme_count());
        self.selection_anchor = (!selection.is_collapsed()).then_some(selection.start);
        self.cursor = selection.end;
    }

    /// Select all text.
    pub fn select_all(&mut self) {
        self.selection_anchor = Some(0);
        self.cursor = self.grapheme_count();
    }

    // --- Event handling ---

    /// Handle a host event end to end.
    ///
    /// Returns `true` if the state changed.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Paste(paste) => {
                self.paste(&paste.text);
                true
            }
            Event::Select(selection) => {
                self.set_selection(*selection);
                true
            }
            Event::Focus(focused) => {
                self.focused = *focused;
                true
            }
        }
    }

    /// Run key-down, the simulated native edit and the reformat for `key`.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if !key.is_actionable() {
            return false;
        }
        if self.key_down(key) == KeyDisposition::Prevented {
            return true;
        }
        match self.apply_native_key(key) {
            NativeEdit::Edited => {
                self.content_changed();
                true
            }
            NativeEdit::Moved => true,
            NativeEdit::Unchanged => false,
        }
    }

    /// Key-down: snapshot, then intercept Backspace/Delete next to literals.
    pub fn key_down(&mut self, key: &KeyEvent) -> KeyDisposition {
        if !key.is_actionable() {
            return KeyDisposition::Default;
        }
        self.snapshot = Some(self.capture());

        let edit_key = match key.code {
            KeyCode::Backspace => EditKey::Backspace,
            KeyCode::Delete => EditKey::Delete,
            _ => return KeyDisposition::Default,
        };

        match intercept(&self.format, &self.value, self.selection(), edit_key) {
            Intercept::Pass => KeyDisposition::Default,
            Intercept::Cancel => {
                tracing::trace!(field = self.format.name, ?edit_key, "delete cancelled");
                KeyDisposition::Prevented
            }
            Intercept::Reselect(selection) => {
                tracing::trace!(
                    field = self.format.name,
                    ?edit_key,
                    start = selection.start,
                    end = selection.end,
                    "delete redirected around literal"
                );
                self.set_selection(selection);
                KeyDisposition::Prevented
            }
            Intercept::Remove(selection) => {
                tracing::trace!(
                    field = self.format.name,
                    ?edit_key,
                    start = selection.start,
                    end = selection.end,
                    "digits removed around literals"
                );
                self.value = remove_digits(&self.format, &self.value, selection);
                self.cursor = selection.start;
                self.selection_anchor = None;
                self.content_changed();
                KeyDisposition::Prevented
            }
        }
    }

    /// Content-changed from a host that applied the edit itself.
    pub fn host_input(&mut self, value: impl Into<String>, selection: Selection) -> ChangeReport {
        self.value = value.into();
        self.set_selection(selection);
        self.content_changed()
    }

    /// Insert pasted text as one edit.
    pub fn paste(&mut self, text: &str) {
        self.snapshot = Some(self.capture());
        self.delete_selection();
        self.insert_text(&sanitize_input_text(text));
        self.content_changed();
    }

    /// Content-changed: digits → validator → formatter → caret.
    pub fn content_changed(&mut self) -> ChangeReport {
        let prev = self.snapshot.take().unwrap_or_else(|| self.rendered.clone());
        let candidate = self.format.sequence(&self.value);
        let digits = match &self.validator {
            Some(validator) => validator.settle(&candidate, Some(&self.accepted)),
            None => candidate.clone(),
        };
        let rejected = digits != candidate;
        let formatted = self.format.format(&digits);
        let caret = restore_caret(
            &self.format,
            &prev.value,
            prev.selection.start,
            &digits,
            &formatted,
        );

        let _span = tracing::debug_span!(
            "mask.edit",
            field = self.format.name,
            operation = "content_changed",
            cursor_position = caret,
            digit_count = digits.len(),
            rejected
        )
        .entered();
        if rejected {
            tracing::trace!(candidate = %candidate, kept = %digits, "digits rejected");
        }

        self.value = formatted;
        self.cursor = caret;
        self.selection_anchor = None;
        self.revision = self.revision.wrapping_add(1);
        let report = ChangeReport {
            digit_count: digits.len(),
            rejected,
        };
        self.accepted = digits;
        self.rendered = self.capture();
        report
    }

    // --- Native editing ---

    fn apply_native_key(&mut self, key: &KeyEvent) -> NativeEdit {
        let ctrl = key.ctrl();
        let shift = key.shift();

        match key.code {
            KeyCode::Char('a') if ctrl => {
                self.select_all();
                NativeEdit::Moved
            }
            KeyCode::Char(c) if !ctrl && !c.is_control() => {
                self.delete_selection();
                let mut buf = [0u8; 4];
                self.insert_text(c.encode_utf8(&mut buf));
                NativeEdit::Edited
            }
            KeyCode::Backspace => {
                if self.delete_selection() || self.delete_char_back() {
                    NativeEdit::Edited
                } else {
                    NativeEdit::Unchanged
                }
            }
            KeyCode::Delete => {
                if self.delete_selection() || self.delete_char_forward() {
                    NativeEdit::Edited
                } else {
                    NativeEdit::Unchanged
                }
            }
            KeyCode::Left => {
                let target = match (shift, self.selection_anchor) {
                    (false, Some(anchor)) => anchor.min(self.cursor),
                    _ => self.cursor.saturating_sub(1),
                };
                self.move_cursor(shift, target);
                NativeEdit::Moved
            }
            KeyCode::Right => {
                let target = match (shift, self.selection_anchor) {
                    (false, Some(anchor)) => anchor.max(self.cursor),
                    _ => (self.cursor + 1).min(self.grapheme_count()),
                };
                self.move_cursor(shift, target);
                NativeEdit::Moved
            }
            KeyCode::Home => {
                self.move_cursor(shift, 0);
                NativeEdit::Moved
            }
            KeyCode::End => {
                let end = self.grapheme_count();
                self.move_cursor(shift, end);
                NativeEdit::Moved
            }
            _ => NativeEdit::Unchanged,
        }
    }

    fn move_cursor(&mut self, select: bool, target: usize) {
        if select {
            let anchor = *self.selection_anchor.get_or_insert(self.cursor);
            self.cursor = target;
            if anchor == target {
                self.selection_anchor = None;
            }
        } else {
            self.selection_anchor = None;
            self.cursor = target;
        }
    }

    fn insert_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let byte_offset = grapheme_byte_offset(&self.value, self.cursor);
        let old_count = self.grapheme_count();
        self.value.insert_str(byte_offset, text);
        let added = self.grapheme_count().saturating_sub(old_count);
        self.cursor += added;
    }

    /// Delete selected text. Returns `false` when nothing was selected.
    fn delete_selection(&mut self) -> bool {
        let Some(anchor) = self.selection_anchor.take() else {
            return false;
        };
        let selection = Selection::new(anchor, self.cursor);
        let byte_start = grapheme_byte_offset(&self.value, selection.start);
        let byte_end = grapheme_byte_offset(&self.value, selection.end);
        self.value.drain(byte_start..byte_end);
        self.cursor = selection.start;
        !selection.is_empty()
    }

    fn delete_char_back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let byte_start = grapheme_byte_offset(&self.value, self.cursor - 1);
        let byte_end = grapheme_byte_offset(&self.value, self.cursor);
        self.value.drain(byte_start..byte_end);
        self.cursor -= 1;
        true
    }

    fn delete_char_forward(&mut self) -> bool {
        if self.cursor >= self.grapheme_count() {
            return false;
        }
        let byte_start = grapheme_byte_offset(&self.value, self.cursor);
        let byte_end = grapheme_byte_offset(&self.value, self.cursor + 1);
        self.value.drain(byte_start..byte_end);
        true
    }

    fn capture(&self) -> EditSnapshot {
        EditSnapshot {
            value: self.value.clone(),
            selection: self.selection(),
        }
    }

    fn grapheme_count(&self) -> usize {
        self.value.graphemes(true).count()
    }
}

/// Map line breaks/tabs to spaces and drop other control characters.
fn sanitize_input_text(text: &str) -> String {
    text.chars()
        .map(|c| if matches!(c, '\n' | '\r' | '\t') { ' ' } else { c })
        .filter(|c| !c.is_control())
        .collect()
}
