#![forbid(unsafe_code)]

//! Mode Bridge: the Editing/Committed state machine for native date fields.
//!
//! A native date control only accepts `YYYY-MM-DD`, so it cannot be edited
//! through the mask. While focused the bridge keeps it in free-text
//! presentation; on blur it commits a complete, valid date by switching the
//! control back to the date kind and storing the Normalized Value.
//!
//! ```text
//!            focus (switch → text)
//!  Committed ─────────────────────▶ Editing
//!      ▲                               │
//!      └───────────────────────────────┘
//!        blur with a valid 8-digit date (switch → date)
//! ```
//!
//! A refused switch marks the bridge degraded: the field stays a free-text
//! masked input for the rest of its life and never tries to switch again.

use fmask_text::{DateValidator, NormalizedDate};

use crate::host::{AcceptingHost, InputKind, PresentationHost};

/// Which presentation the bridge believes the control is in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "state-persistence",
    derive(serde::Serialize, serde::Deserialize)
)]
pub enum PresentationMode {
    /// Free text, masked as `DD/MM/YYYY`.
    #[default]
    Editing,
    /// Native date kind holding an ISO value.
    Committed,
}

/// Result of a blur.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlurOutcome {
    /// The date was committed; the control now shows ISO.
    Committed(NormalizedDate),
    /// The date is valid and stored, but the control stays free text.
    Stored(NormalizedDate),
    /// Nothing valid to commit; the Normalized Value was cleared.
    Cleared,
}

/// Drives presentation switches for one date field.
#[derive(Debug)]
pub struct ModeBridge {
    mode: PresentationMode,
    native: bool,
    degraded: bool,
    normalized: Option<NormalizedDate>,
    host: Box<dyn PresentationHost>,
}

impl ModeBridge {
    /// Bridge for a control that starts in the native date kind.
    #[must_use]
    pub fn native(host: Box<dyn PresentationHost>) -> Self {
        Self {
            mode: PresentationMode::Committed,
            native: true,
            degraded: false,
            normalized: None,
            host,
        }
    }

    /// Bridge for a plain text control; it never switches kinds.
    #[must_use]
    pub fn free_text() -> Self {
        Self {
            mode: PresentationMode::Editing,
            native: false,
            degraded: false,
            normalized: None,
            host: Box::new(AcceptingHost),
        }
    }

    /// Replace the presentation host (builder).
    #[must_use]
    pub fn with_host(mut self, host: Box<dyn PresentationHost>) -> Self {
        self.host = host;
        self
    }

    /// Current mode.
    #[inline]
    #[must_use]
    pub fn mode(&self) -> PresentationMode {
        self.mode
    }

    /// Kind the control is currently presented as.
    #[must_use]
    pub fn presentation(&self) -> InputKind {
        match self.mode {
            PresentationMode::Committed => InputKind::Date,
            PresentationMode::Editing => InputKind::Text,
        }
    }

    /// Whether the control started as a native date.
    #[inline]
    #[must_use]
    pub fn is_native(&self) -> bool {
        self.native
    }

    /// Whether a switch was refused and the field fell back to free text.
    #[inline]
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// The last committed or stored date.
    #[inline]
    #[must_use]
    pub fn normalized(&self) -> Option<NormalizedDate> {
        self.normalized
    }

    /// Drop the stored date.
    pub fn clear_normalized(&mut self) {
        self.normalized = None;
    }

    /// Restore a mode and stored date, e.g. from persisted state.
    ///
    /// A degraded or non-native bridge stays in [`PresentationMode::Editing`].
    pub fn restore(&mut self, mode: PresentationMode, normalized: Option<NormalizedDate>) {
        self.normalized = normalized;
        self.mode = if self.native && !self.degraded {
            mode
        } else {
            PresentationMode::Editing
        };
    }

    /// Focus: enter Editing and return the text to show, if any.
    ///
    /// The text is the stored date as `DD/MM/YYYY`, or, with nothing stored,
    /// `current_value` re-rendered when it parses as ISO.
    pub fn on_focus(&mut self, current_value: &str) -> Option<String> {
        if self.mode == PresentationMode::Committed {
            match self.host.switch_kind(InputKind::Text) {
                Ok(()) => tracing::debug!(kind = %InputKind::Text, "presentation switched"),
                Err(err) => self.degrade(&err),
            }
            self.mode = PresentationMode::Editing;
        }

        match self.normalized {
            Some(date) => Some(date.to_display()),
            None => NormalizedDate::parse_iso(current_value).map(|date| date.to_display()),
        }
    }

    /// Blur: commit a complete valid date, otherwise clear the stored one.
    pub fn on_blur(&mut self, digits: &str, validator: &DateValidator) -> BlurOutcome {
        let date = (digits.len() == 8 && validator.accepts(digits))
            .then(|| NormalizedDate::from_digits(digits))
            .flatten();
        let Some(date) = date else {
            let had_date = self.normalized.take().is_some();
            tracing::debug!(digit_count = digits.len(), had_date, "blur without commit");
            return BlurOutcome::Cleared;
        };

        self.normalized = Some(date);
        if !self.native || self.degraded {
            return BlurOutcome::Stored(date);
        }

        match self.host.switch_kind(InputKind::Date) {
            Ok(()) => {
                tracing::debug!(kind = %InputKind::Date, iso = %date, "date committed");
                self.mode = PresentationMode::Committed;
                BlurOutcome::Committed(date)
            }
            Err(err) => {
                self.degrade(&err);
                BlurOutcome::Stored(date)
            }
        }
    }

    fn degrade(&mut self, err: &crate::host::PresentationError) {
        tracing::warn!(error = %err, "presentation switch failed; falling back to free text");
        self.degraded = true;
        self.mode = PresentationMode::Editing;
    }
}
