use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

/// Delays used by the viewer to sequence its visual transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewerTimings {
    /// Wait after mounting before the content is faded in.
    pub reveal_delay: Duration,
    /// Fade-out time between `close` and the modal actually being hidden.
    pub close_delay: Duration,
    /// Wait after writing the print document before invoking print.
    pub print_delay: Duration,
}

impl Default for ViewerTimings {
    fn default() -> Self {
        Self {
            reveal_delay: Duration::from_millis(100),
            close_delay: Duration::from_millis(300),
            print_delay: Duration::from_millis(500),
        }
    }
}

impl ViewerTimings {
    /// Zero delays everywhere: every transition settles synchronously.
    pub fn immediate() -> Self {
        Self {
            reveal_delay: Duration::ZERO,
            close_delay: Duration::ZERO,
            print_delay: Duration::ZERO,
        }
    }
}

/// Application configuration loaded from environment variables.
/// Every variable has a default; only malformed values are errors.
#[derive(Debug, Clone)]
pub struct Config {
    pub content_path: PathBuf,
    pub asset_root: PathBuf,
    pub timings: ViewerTimings,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = ViewerTimings::default();
        Ok(Config {
            content_path: PathBuf::from(env_or("FOLIO_CONTENT_PATH", "content/resumes.json")),
            asset_root: PathBuf::from(env_or("FOLIO_ASSET_ROOT", ".")),
            timings: ViewerTimings {
                reveal_delay: millis_env("FOLIO_REVEAL_DELAY_MS", defaults.reveal_delay)?,
                close_delay: millis_env("FOLIO_CLOSE_DELAY_MS", defaults.close_delay)?,
                print_delay: millis_env("FOLIO_PRINT_DELAY_MS", defaults.print_delay)?,
            },
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn millis_env(key: &str, default: Duration) -> Result<Duration> {
    match std::env::var(key) {
        Ok(raw) => parse_millis(&raw)
            .with_context(|| format!("{key} must be a whole number of milliseconds")),
        Err(_) => Ok(default),
    }
}

fn parse_millis(raw: &str) -> Result<Duration> {
    let ms = raw.trim().parse::<u64>()?;
    Ok(Duration::from_millis(ms))
}
