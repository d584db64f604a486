//! Log subscriber for binaries built on the engine
//!
//! Engine modules only emit `tracing` events (transitions at debug, lifecycle
//! at info). A binary calls [`LogSettings::init`] once to write them to
//! stderr. `RUST_LOG` overrides the level when set.
//!
//! ```no_run
//! use libmarquee::logging::LogSettings;
//!
//! LogSettings::from_env().verbose().init();
//! ```

use std::str::FromStr;

use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Plain lines, no target
    Text,
    /// One flattened JSON object per line
    Json,
    /// Multi-line with source locations
    Pretty,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            other => Err(format!("unknown log format '{}' (text, json, pretty)", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub format: LogFormat,
    pub level: String,
}

impl LogSettings {
    /// `MARQUEE_LOG_FORMAT` and `MARQUEE_LOG_LEVEL`, else text at warn.
    /// An unparsable format falls back to text.
    pub fn from_env() -> Self {
        let format = std::env::var("MARQUEE_LOG_FORMAT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(LogFormat::Text);
        let level = std::env::var("MARQUEE_LOG_LEVEL").unwrap_or_else(|_| "warn".to_string());

        Self { format, level }
    }

    pub fn verbose(self) -> Self {
        Self {
            level: "debug".to_string(),
            ..self
        }
    }

    /// Install the global subscriber. Returns false if one was already set.
    pub fn init(&self) -> bool {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));
        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr);

        let installed = match self.format {
            LogFormat::Text => builder.with_target(false).try_init(),
            LogFormat::Json => builder.json().flatten_event(true).try_init(),
            LogFormat::Pretty => builder.pretty().with_line_number(true).try_init(),
        };
        installed.is_ok()
    }
}
