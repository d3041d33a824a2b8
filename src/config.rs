use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::scoring::engine::DEFAULT_MAX_INPUT_CHARS;

/// Where the term catalog lives unless CINDER_CATALOG_PATH says otherwise.
pub const DEFAULT_CATALOG_PATH: &str = "./data/terms.json";

/// How long a review classifier gets before we give up and keep the FLAG.
pub const DEFAULT_REVIEW_TIMEOUT_MS: u64 = 3000;

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy. Nothing
/// here is secret; every value has a default.
#[derive(Debug, Clone)]
pub struct Config {
    /// JSON term catalog document (CINDER_CATALOG_PATH)
    pub catalog_path: PathBuf,
    /// Scoring input is clipped to this many chars (CINDER_MAX_INPUT_CHARS)
    pub max_input_chars: usize,
    /// Timeout for the external review classifier (CINDER_REVIEW_TIMEOUT_MS)
    pub review_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from(DEFAULT_CATALOG_PATH),
            max_input_chars: DEFAULT_MAX_INPUT_CHARS,
            review_timeout: Duration::from_millis(DEFAULT_REVIEW_TIMEOUT_MS),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Unset variables take their defaults. A variable that is set but not
    /// a valid number is an error rather than being silently ignored.
    pub fn load() -> Result<Self> {
        let catalog_path = env::var("CINDER_CATALOG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CATALOG_PATH));

        let max_input_chars = match env::var("CINDER_MAX_INPUT_CHARS") {
            Ok(raw) => parse_positive(&raw).with_context(|| {
                format!("CINDER_MAX_INPUT_CHARS must be a positive integer, got {raw:?}")
            })?,
            Err(_) => DEFAULT_MAX_INPUT_CHARS,
        };

        let review_timeout_ms = match env::var("CINDER_REVIEW_TIMEOUT_MS") {
            Ok(raw) => parse_positive(&raw).with_context(|| {
                format!("CINDER_REVIEW_TIMEOUT_MS must be a positive integer, got {raw:?}")
            })? as u64,
            Err(_) => DEFAULT_REVIEW_TIMEOUT_MS,
        };

        Ok(Self {
            catalog_path,
            max_input_chars,
            review_timeout: Duration::from_millis(review_timeout_ms),
        })
    }

    /// Check that the catalog file exists. The engine runs without it (on
    /// built-in terms only), but an operator usually wants to know.
    pub fn require_catalog(&self) -> Result<()> {
        if !self.catalog_path.is_file() {
            anyhow::bail!(
                "Term catalog not found at {}\n\
                 Set CINDER_CATALOG_PATH in your .env file. See .env.example.",
                self.catalog_path.display()
            );
        }
        Ok(())
    }
}

fn parse_positive(raw: &str) -> Result<usize> {
    let value: usize = raw.trim().parse()?;
    if value == 0 {
        anyhow::bail!("value must be greater than zero");
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_positive_accepts_whitespace() {
        assert_eq!(parse_positive(" 42 ").unwrap(), 42);
    }

    #[test]
    fn parse_positive_rejects_zero_and_junk() {
        assert!(parse_positive("0").is_err());
        assert!(parse_positive("-3").is_err());
        assert!(parse_positive("lots").is_err());
    }
}
