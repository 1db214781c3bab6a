#![forbid(unsafe_code)]

//! fmask error model and graceful degradation.
//!
//! Masked fields never surface errors to the user: every failure maps to a
//! [`DegradationAction`] that keeps the page usable. The error types exist
//! for hosts that want to observe what was degraded and why.

use std::fmt;

pub use fmask_widgets::PresentationError;

// ── Domain-Specific Error Types ─────────────────────────────────────────

/// Problems found while binding controllers to host elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingError {
    /// The element matched no mask rule.
    Unmatched {
        /// Element index in the scanned list.
        index: usize,
    },
    /// A second element carries an id that may only be bound once.
    DuplicateId {
        /// The repeated id.
        id: String,
        /// Index of the skipped element.
        index: usize,
    },
}

/// Invalid configuration values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A selector (id, attribute or class) is empty.
    EmptySelector(&'static str),
    /// `default_year` is outside `1..=9999`.
    DefaultYearOutOfRange(u32),
    /// The phone and mirror ids are the same element.
    ConflictingIds(String),
}

// ── Unified Error ───────────────────────────────────────────────────────

/// Top-level error type for fmask.
#[derive(Debug)]
pub enum Error {
    /// The host refused a presentation switch.
    Presentation(PresentationError),
    /// An element could not be bound.
    Binding(BindingError),
    /// The configuration is invalid.
    Config(ConfigError),
    /// The logging subscriber could not be installed.
    Logging(String),
}

/// Standard result type for fmask APIs.
pub type Result<T> = std::result::Result<T, Error>;

// ── Graceful Degradation ────────────────────────────────────────────────

/// What a host should do when an error occurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegradationAction {
    /// Keep the field as a free-text masked input.
    FreeTextFallback,
    /// Leave the element unbound.
    SkipElement,
    /// Fall back to [`MaskConfig::default`](crate::config::MaskConfig).
    UseDefaults,
    /// Ignore and carry on.
    Continue,
}

impl Error {
    /// Determine the graceful degradation action for this error.
    pub fn degradation(&self) -> DegradationAction {
        match self {
            Self::Presentation(_) => DegradationAction::FreeTextFallback,
            Self::Binding(_) => DegradationAction::SkipElement,
            Self::Config(_) => DegradationAction::UseDefaults,
            Self::Logging(_) => DegradationAction::Continue,
        }
    }

    /// Error type label for tracing.
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Presentation(_) => "presentation",
            Self::Binding(_) => "binding",
            Self::Config(_) => "config",
            Self::Logging(_) => "logging",
        }
    }
}

// ── Display ─────────────────────────────────────────────────────────────

impl fmt::Display for BindingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unmatched { index } => write!(f, "element {index} matches no mask"),
            Self::DuplicateId { id, index } => {
                write!(f, "element {index} repeats id '{id}'")
            }
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySelector(name) => write!(f, "{name} must not be empty"),
            Self::DefaultYearOutOfRange(year) => {
                write!(f, "default year {year} outside 1..=9999")
            }
            Self::ConflictingIds(id) => {
                write!(f, "id '{id}' used for both phone and mirror")
            }
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Presentation(err) => write!(f, "{err}"),
            Self::Binding(err) => write!(f, "{err}"),
            Self::Config(err) => write!(f, "config: {err}"),
            Self::Logging(msg) => write!(f, "logging: {msg}"),
        }
    }
}

impl fmt::Display for DegradationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FreeTextFallback => write!(f, "free_text_fallback"),
            Self::SkipElement => write!(f, "skip_element"),
            Self::UseDefaults => write!(f, "use_defaults"),
            Self::Continue => write!(f, "continue"),
        }
    }
}

// ── std::error::Error ───────────────────────────────────────────────────

impl std::error::Error for BindingError {}
impl std::error::Error for ConfigError {}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Presentation(err) => Some(err),
            Self::Binding(err) => Some(err),
            Self::Config(err) => Some(err),
            Self::Logging(_) => None,
        }
    }
}

// ── From conversions ────────────────────────────────────────────────────

impl From<PresentationError> for Error {
    fn from(err: PresentationError) -> Self {
        Self::Presentation(err)
    }
}

impl From<BindingError> for Error {
    fn from(err: BindingError) -> Self {
        Self::Binding(err)
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

// ── Tests ───────────────────────────────────────────────────────────────
