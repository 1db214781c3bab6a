#![forbid(unsafe_code)]

//! fmask public facade crate.
//!
//! Input masks for two text fields: a `DD/MM/YYYY` date field that can
//! commit into a native date control, and a `(DD)PPPPP-PPPP` phone field.
//! This crate re-exports the field controllers, binds them to host
//! elements and carries the error model and configuration.
//!
//! ```
//! use fmask::prelude::*;
//!
//! let mut field = DateField::free_text();
//! for c in "15082024".chars() {
//!     field.handle_event(&Event::Key(KeyEvent::new(KeyCode::Char(c))));
//! }
//! assert_eq!(field.value(), "15/08/2024");
//! ```

pub mod binding;
pub mod config;
pub mod error;
#[cfg(feature = "tracing-subscriber")]
pub mod logging;

// --- Core re-exports -------------------------------------------------------

pub use fmask_core::{
    Event, KeyCode, KeyEvent, KeyEventKind, Modifiers, PasteEvent, Selection,
};

// --- Text re-exports -------------------------------------------------------

pub use fmask_text::{
    DATE, DateValidator, FormatDescriptor, NormalizedDate, PHONE, ValidationStrategy,
};

// --- Widget re-exports -----------------------------------------------------

pub use fmask_widgets::{
    AcceptingHost, BlurOutcome, ChangeReport, DateField, DatePersistState, InputKind,
    KeyDisposition, MaskedInput, MirrorCell, MirrorSink, ModeBridge, PhoneField,
    PresentationError, PresentationHost, PresentationMode,
};

pub use binding::{Bindings, BoundField, ElementDescriptor, bind, bind_with};
pub use config::MaskConfig;
pub use error::{BindingError, ConfigError, DegradationAction, Error, Result};

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Bindings, DateField, ElementDescriptor, Error, Event, InputKind, KeyCode, KeyEvent,
        MaskConfig, Modifiers, PhoneField, PresentationHost, Result, Selection, bind,
    };

    pub use crate::{core, text, widgets};
}

pub use fmask_core as core;
pub use fmask_text as text;
pub use fmask_widgets as widgets;
