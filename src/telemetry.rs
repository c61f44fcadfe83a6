//! Log subscriber setup

use tracing_subscriber::EnvFilter;

/// Output format for log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable compact lines
    Compact,
    /// One JSON object per line, for serverless log sinks
    Json,
}

impl LogFormat {
    /// `LOG_FORMAT=json` selects JSON, anything else compact
    pub fn from_env() -> Self {
        match std::env::var("LOG_FORMAT") {
            Ok(value) if value.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Compact,
        }
    }
}

/// Install the global subscriber; `RUST_LOG` filters, default `info`
///
/// Calling this twice is harmless: the second install is ignored.
pub fn init() {
    init_with(LogFormat::from_env());
}

/// Install the global subscriber with an explicit format
pub fn init_with(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let result = match format {
        LogFormat::Json => builder.json().with_current_span(true).try_init(),
        LogFormat::Compact => builder.compact().with_target(false).try_init(),
    };
    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
