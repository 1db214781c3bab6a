#![forbid(unsafe_code)]

//! Developer-facing log output.
//!
//! Fields log through `tracing`; this module installs a global
//! `tracing_subscriber` formatter for hosts that do not bring their own.
//! The filter is read from `FMASK_LOG` using `EnvFilter` syntax, e.g.
//! `FMASK_LOG=fmask_widgets=trace`.

use tracing_subscriber::EnvFilter;

use crate::error::{Error, Result};

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "FMASK_LOG";

/// Filter used when [`LOG_ENV`] is unset or invalid.
pub const DEFAULT_FILTER: &str = "warn";

/// Output format of the installed subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Install a global text subscriber writing to stderr.
pub fn init() -> Result<()> {
    init_with(LogFormat::Text)
}

/// Install a global subscriber writing to stderr in `format`.
///
/// Fails if a global subscriber is already set.
pub fn init_with(format: LogFormat) -> Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_target(true);

    let installed = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    installed.map_err(|err| Error::Logging(err.to_string()))
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DegradationAction;

    #[test]
    fn second_init_reports_logging_error() {
        let _ = init();
        let err = init_with(LogFormat::Json).expect_err("subscriber already set");
        assert_eq!(err.degradation(), DegradationAction::Continue);
        assert_eq!(err.error_type(), "logging");
    }

    #[test]
    fn default_format_is_text() {
        assert_eq!(LogFormat::default(), LogFormat::Text);
    }
}
