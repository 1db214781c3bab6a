#![forbid(unsafe_code)]

//! Masked field controllers.
//!
//! One controller per bound text field, each owning its own Edit Snapshot
//! and (for dates) Mode Bridge state. Nothing is shared between fields.
//!
//! - [`masked_input::MaskedInput`]: the masking engine loop shared by both
//!   fields (key-down interception, native edit, reformat, caret restore).
//! - [`date_field::DateField`]: `DD/MM/YYYY` with validation, the
//!   strict-typed/freeform [`mode_bridge::ModeBridge`] and the ISO mirror.
//! - [`phone_field::PhoneField`]: `(DD)PPPPP-PPPP` with its protected prefix.
//! - [`host`]: seams to the embedding environment.

pub mod date_field;
pub mod host;
pub mod masked_input;
pub mod mode_bridge;
pub mod phone_field;

pub use date_field::{DateField, DatePersistState};
pub use host::{
    AcceptingHost, InputKind, MirrorCell, MirrorSink, PresentationError, PresentationHost,
};
pub use masked_input::{ChangeReport, EditSnapshot, KeyDisposition, MaskedInput};
pub use mode_bridge::{BlurOutcome, ModeBridge, PresentationMode};
pub use phone_field::PhoneField;
