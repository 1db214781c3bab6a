#![forbid(unsafe_code)]

//! Seams to the embedding environment.
//!
//! A host owns the real text control. Fields ask it to change the control's
//! kind ([`PresentationHost`]) and push the normalized ISO value into an
//! optional mirror element ([`MirrorSink`]). Both are fire-and-forget from
//! the field's point of view: a refused kind switch degrades the field to
//! free text, and mirror writes have no acknowledgement.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Kind of the host text control.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "state-persistence",
    derive(serde::Serialize, serde::Deserialize)
)]
pub enum InputKind {
    /// Free text; accepts any value.
    #[default]
    Text,
    /// Strict-typed date control; only accepts `YYYY-MM-DD`.
    Date,
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Date => write!(f, "date"),
        }
    }
}

/// The host refused to change a control's kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresentationError {
    /// The host rejected the switch to `kind`.
    Refused {
        /// Requested kind.
        kind: InputKind,
        /// Host-provided reason.
        reason: String,
    },
    /// The host cannot switch kinds at all.
    Unsupported,
}

impl fmt::Display for PresentationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Refused { kind, reason } => {
                write!(f, "switch to {kind} presentation refused: {reason}")
            }
            Self::Unsupported => write!(f, "presentation switching unsupported"),
        }
    }
}

impl std::error::Error for PresentationError {}

/// Changes the kind of the control a field is bound to.
pub trait PresentationHost: fmt::Debug {
    /// Switch the control to `kind`.
    fn switch_kind(&mut self, kind: InputKind) -> Result<(), PresentationError>;
}

/// A host that always accepts kind switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AcceptingHost;

impl PresentationHost for AcceptingHost {
    fn switch_kind(&mut self, _kind: InputKind) -> Result<(), PresentationError> {
        Ok(())
    }
}

/// Receives the normalized ISO value of a date field.
pub trait MirrorSink: fmt::Debug {
    /// Overwrite the mirrored value (`YYYY-MM-DD` or empty).
    fn write(&mut self, value: &str);
}

/// Shared, single-threaded mirror element.
///
/// Clones share the same slot, so several date fields bound to one page can
/// write the same mirror, and the host can read it back.
#[derive(Debug, Clone, Default)]
pub struct MirrorCell(Rc<RefCell<String>>);

impl MirrorCell {
    /// Create an empty mirror.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current mirrored value.
    #[must_use]
    pub fn get(&self) -> String {
        self.0.borrow().clone()
    }
}

impl MirrorSink for MirrorCell {
    fn write(&mut self, value: &str) {
        let mut slot = self.0.borrow_mut();
        slot.clear();
        slot.push_str(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepting_host_accepts_everything() {
        let mut host = AcceptingHost;
        assert!(host.switch_kind(InputKind::Date).is_ok());
        assert!(host.switch_kind(InputKind::Text).is_ok());
    }

    #[test]
    fn mirror_clones_share_a_slot() {
        let reader = MirrorCell::new();
        let mut writer = reader.clone();
        writer.write("2024-08-15");
        assert_eq!(reader.get(), "2024-08-15");
        writer.write("");
        assert_eq!(reader.get(), "");
    }

    #[test]
    fn presentation_error_display() {
        let err = PresentationError::Refused {
            kind: InputKind::Date,
            reason: "read-only".into(),
        };
        assert_eq!(err.to_string(), "switch to date presentation refused: read-only");
        assert_eq!(
            PresentationError::Unsupported.to_string(),
            "presentation switching unsupported"
        );
    }
}
