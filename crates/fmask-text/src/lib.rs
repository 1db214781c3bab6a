#![forbid(unsafe_code)]

//! Pure text layer for masked fields.
//!
//! Every function here is deterministic and side-effect free: given the same
//! text, selection and [`FormatDescriptor`] it returns the same answer. The
//! stateful controllers in `fmask-widgets` are thin loops around these.
//!
//! - [`digits`]: Digit Extractor and grapheme helpers.
//! - [`format`]: format descriptors and the Formatter.
//! - [`caret`]: Caret Translator and cursor restoration.
//! - [`intercept`]: Backspace/Delete policy around literals.
//! - [`calendar`] / [`validate`]: Gregorian helpers and the date Validator.

pub mod calendar;
pub mod caret;
pub mod digits;
pub mod format;
pub mod intercept;
pub mod validate;

pub use calendar::NormalizedDate;
pub use format::{DATE, FormatDescriptor, PHONE};
pub use intercept::{EditKey, Intercept};
pub use validate::{DateValidator, ValidationStrategy};
