//! Fixture implementations for integration testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};

use anyhow::Result;
use async_trait::async_trait;
use serde_json::json;

use apify_client::{RawTweet, TweetSearchInput};

use crate::collector::TweetFetcher;

/// Build a raw provider record in the shape the tweet actor returns.
pub fn raw_tweet(id: u64, handle: &str, created_at: &str, text: &str) -> RawTweet {
    json!({
        "id_str": id.to_string(),
        "created_at": created_at,
        "full_text": text,
        "url": format!("https://twitter.com/{handle}/status/{id}"),
    })
}

// --- FixtureFetcher ---

enum Planned {
    Batch(Vec<RawTweet>),
    Fail(String),
}

/// Canned provider keyed by the `from:` handle in the search query.
/// Handles with no plan return an empty batch.
pub struct FixtureFetcher {
    planned: HashMap<String, Planned>,
    calls: AtomicU32,
}

impl FixtureFetcher {
    pub fn new() -> Self {
        Self {
            planned: HashMap::new(),
            calls: AtomicU32::new(0),
        }
    }

    pub fn with_batch(mut self, handle: &str, tweets: Vec<RawTweet>) -> Self {
        self.planned
            .insert(handle.to_string(), Planned::Batch(tweets));
        self
    }

    pub fn with_failure(mut self, handle: &str, message: &str) -> Self {
        self.planned
            .insert(handle.to_string(), Planned::Fail(message.to_string()));
        self
    }

    /// Number of provider calls made so far.
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TweetFetcher for FixtureFetcher {
    async fn search(&self, input: &TweetSearchInput) -> Result<Vec<RawTweet>> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let query = input
            .search_terms
            .first()
            .map(String::as_str)
            .unwrap_or_default();
        let handle = query
            .strip_prefix("from:")
            .and_then(|rest| rest.split_whitespace().next())
            .unwrap_or_default();

        match self.planned.get(handle) {
            Some(Planned::Batch(tweets)) => Ok(tweets.clone()),
            Some(Planned::Fail(message)) => Err(anyhow::anyhow!("{message}")),
            None => Ok(Vec::new()),
        }
    }
}
