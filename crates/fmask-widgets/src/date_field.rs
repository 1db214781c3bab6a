#![forbid(unsafe_code)]

//! `DD/MM/YYYY` date field.
//!
//! Combines the masking loop with digit validation, the [`ModeBridge`] for
//! controls that start as native date inputs, and an optional ISO mirror.

use fmask_core::{Event, KeyEvent, Selection};
use fmask_text::calendar::iso_from_digits;
use fmask_text::digits::grapheme_count;
use fmask_text::{DATE, DateValidator, NormalizedDate};

use crate::host::{InputKind, MirrorSink, PresentationHost};
use crate::masked_input::{ChangeReport, KeyDisposition, MaskedInput};
use crate::mode_bridge::{BlurOutcome, ModeBridge, PresentationMode};

/// A masked date field.
#[derive(Debug)]
pub struct DateField {
    input: MaskedInput,
    validator: DateValidator,
    bridge: ModeBridge,
    mirror: Option<Box<dyn MirrorSink>>,
}

impl DateField {
    /// A field over a native date control, starting committed.
    #[must_use]
    pub fn native(host: Box<dyn PresentationHost>) -> Self {
        Self::with_bridge(ModeBridge::native(host))
    }

    /// A field over a plain text control.
    #[must_use]
    pub fn free_text() -> Self {
        Self::with_bridge(ModeBridge::free_text())
    }

    fn with_bridge(bridge: ModeBridge) -> Self {
        let validator = DateValidator::default();
        Self {
            input: MaskedInput::new(DATE).with_validator(validator),
            validator,
            bridge,
            mirror: None,
        }
    }

    /// Use `validator` for digit validation and commits (builder).
    #[must_use]
    pub fn with_validator(mut self, validator: DateValidator) -> Self {
        self.input = self.input.with_validator(validator);
        self.validator = validator;
        self
    }

    /// Push the ISO form of complete dates into `mirror` (builder).
    #[must_use]
    pub fn with_mirror(mut self, mirror: Box<dyn MirrorSink>) -> Self {
        self.mirror = Some(mirror);
        self
    }

    /// Start with the host control's current text (builder).
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.input = self.input.with_value(value);
        self
    }

    // --- Accessors ---

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

    /// Editing or committed.
    #[must_use]
    pub fn mode(&self) -> PresentationMode {
        self.bridge.mode()
    }

    /// Kind the host control is presented as.
    #[must_use]
    pub fn presentation(&self) -> InputKind {
        self.bridge.presentation()
    }

    /// The committed (or stored) date.
    #[must_use]
    pub fn normalized(&self) -> Option<NormalizedDate> {
        self.bridge.normalized()
    }

    /// Whether a presentation switch was refused.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.bridge.is_degraded()
    }

    /// The underlying masking loop.
    #[must_use]
    pub fn input(&self) -> &MaskedInput {
        &self.input
    }

    // --- Events ---

    /// Handle a host event. Returns `true` if the state changed.
    ///
    /// Edits are ignored while committed: the host control is a native
    /// date input then and edits it itself.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        match event {
            Event::Focus(true) => {
                self.focus();
                true
            }
            Event::Focus(false) => {
                self.blur();
                true
            }
            _ if self.bridge.mode() == PresentationMode::Committed => false,
            _ => {
                let revision = self.input.revision();
                let changed = self.input.handle_event(event);
                if self.input.revision() != revision {
                    self.after_content_change();
                }
                changed
            }
        }
    }

    /// Key-down for hosts that apply edits themselves.
    ///
    /// While committed the native control edits itself and the key passes.
    pub fn key_down(&mut self, key: &KeyEvent) -> KeyDisposition {
        if self.bridge.mode() == PresentationMode::Committed {
            return KeyDisposition::Default;
        }
        let revision = self.input.revision();
        let disposition = self.input.key_down(key);
        if self.input.revision() != revision {
            self.after_content_change();
        }
        disposition
    }

    /// Content-changed for hosts that apply edits themselves.
    ///
    /// Ignored while committed: the value belongs to the native control and
    /// an empty report is returned.
    pub fn host_input(&mut self, value: impl Into<String>, selection: Selection) -> ChangeReport {
        if self.bridge.mode() == PresentationMode::Committed {
            tracing::trace!("input ignored while committed");
            return ChangeReport::default();
        }
        let report = self.input.host_input(value, selection);
        self.after_content_change();
        report
    }

    /// Focus: leave committed mode and show `DD/MM/YYYY`, caret at the end.
    pub fn focus(&mut self) {
        self.input.set_focused(true);
        match self.bridge.on_focus(self.input.value()) {
            Some(text) => {
                let end = grapheme_count(&text);
                self.input.set_value(text, end);
            }
            None => {
                let end = grapheme_count(self.input.value());
                self.input.set_selection(Selection::caret(end));
            }
        }
    }

    /// Blur: commit a complete valid date.
    pub fn blur(&mut self) -> BlurOutcome {
        self.input.set_focused(false);
        let digits = self.input.digits();
        let outcome = self.bridge.on_blur(&digits, &self.validator);
        if let BlurOutcome::Committed(date) = outcome {
            let iso = date.to_iso();
            let end = grapheme_count(&iso);
            self.input.set_value(iso, end);
        }
        if let Some(mirror) = self.mirror.as_mut() {
            match outcome {
                BlurOutcome::Committed(date) | BlurOutcome::Stored(date) => {
                    mirror.write(&date.to_iso());
                }
                BlurOutcome::Cleared => mirror.write(""),
            }
        }
        outcome
    }

    fn after_content_change(&mut self) {
        let digits = self.input.digits();
        if digits.is_empty() {
            self.bridge.clear_normalized();
        }
        if let Some(mirror) = self.mirror.as_mut() {
            let iso = iso_from_digits(&digits).unwrap_or_default();
            tracing::trace!(mirror = %iso, "mirror updated");
            mirror.write(&iso);
        }
    }

    // --- Persistence ---

    /// Snapshot the user-facing state.
    #[must_use]
    pub fn save_state(&self) -> DatePersistState {
        DatePersistState {
            value: self.input.value().to_owned(),
            mode: self.bridge.mode(),
            normalized: self.bridge.normalized(),
        }
    }

    /// Restore a snapshot taken by [`save_state`](Self::save_state).
    pub fn restore_state(&mut self, state: DatePersistState) {
        let end = grapheme_count(&state.value);
        self.input.set_value(state.value, end);
        self.bridge.restore(state.mode, state.normalized);
    }
}

/// Persistable state for a [`DateField`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "state-persistence",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct DatePersistState {
    /// Field text.
    pub value: String,
    /// Presentation mode.
    pub mode: PresentationMode,
    /// Committed date, if any.
    pub normalized: Option<NormalizedDate>,
}
