use std::env;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::info;

use crate::error::CollectorError;
use crate::types::CandidateElection;

/// Collection input, read from a JSON file matching the actor input schema.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectorInput {
    /// Work units, processed in order. Must be non-empty.
    pub candidate_elections: Vec<CandidateElection>,
    /// Per-unit cap on collected records.
    #[serde(default = "default_max_tweets")]
    pub max_tweets_per_run: u32,
    /// Forwarded to the search actor.
    #[serde(default = "default_true")]
    pub add_user_info: bool,
    /// Accepted for input-schema compatibility; nothing consults it.
    #[serde(default)]
    pub scrape_tweet_replies: bool,
    /// Multiplier applied to the cap when requesting from the provider, to
    /// absorb results the window filter will discard.
    #[serde(default = "default_fetch_inflation")]
    pub fetch_inflation: u32,
    /// Pause between work units, milliseconds. Applies after every unit
    /// except the last, whether or not the unit succeeded.
    #[serde(default = "default_unit_delay_ms")]
    pub unit_delay_ms: u64,
    /// Name of the Apify dataset to push records to. When absent, records
    /// are written to a local JSONL file instead.
    #[serde(default)]
    pub dataset: Option<String>,
}

fn default_max_tweets() -> u32 {
    5
}

fn default_true() -> bool {
    true
}

fn default_fetch_inflation() -> u32 {
    4
}

fn default_unit_delay_ms() -> u64 {
    1000
}

impl CollectorInput {
    /// Reject inputs that would make the run a no-op.
    pub fn validate(&self) -> Result<(), CollectorError> {
        if self.candidate_elections.is_empty() {
            return Err(CollectorError::Config(
                "candidateElections must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Read and validate the collection input. Any failure here is fatal and
/// happens before a single provider call.
pub fn load_input(path: &Path) -> Result<CollectorInput, CollectorError> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        CollectorError::Config(format!("cannot read input file {}: {e}", path.display()))
    })?;
    let input: CollectorInput = serde_json::from_str(&raw)
        .map_err(|e| CollectorError::Config(format!("invalid input JSON: {e}")))?;
    input.validate()?;
    Ok(input)
}

/// Process configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct EnvConfig {
    pub apify_token: String,
    pub data_dir: PathBuf,
}

impl EnvConfig {
    /// Load configuration from environment variables.
    /// Panics with a clear message if required vars are missing.
    pub fn from_env() -> Self {
        Self {
            apify_token: required_env("APIFY_API_TOKEN"),
            data_dir: PathBuf::from(env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string())),
        }
    }

    /// Log the loaded configuration with the token redacted.
    pub fn log_redacted(&self) {
        info!(
            data_dir = %self.data_dir.display(),
            apify_token = "[redacted]",
            "Environment configuration loaded"
        );
    }
}

fn required_env(key: &str) -> String {
    env::var(key).unwrap_or_else(|_| panic!("{key} environment variable is required"))
}
