#![forbid(unsafe_code)]

//! Core: host events and selection types for masked text fields.
//!
//! # Role in fmask
//! `fmask-core` is the input layer. It owns the normalized event types a host
//! (browser bridge, terminal runtime, test harness) pushes into a field, and
//! the [`Selection`](selection::Selection) type every other crate speaks.
//!
//! # How it fits in the system
//! `fmask-text` builds the pure masking functions on top of [`selection`];
//! `fmask-widgets` consumes [`event::Event`] values and drives the stateful
//! field controllers.

pub mod event;
pub mod selection;

pub use event::{Event, KeyCode, KeyEvent, KeyEventKind, Modifiers, PasteEvent};
pub use selection::Selection;
