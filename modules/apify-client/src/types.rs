use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A raw tweet record from the actor dataset, kept as loose JSON.
///
/// The search actor has shipped more than one response schema over time
/// (snake_case and camelCase field names, string and numeric ids), so callers
/// resolve individual fields themselves instead of binding to a struct here.
pub type RawTweet = serde_json::Value;

/// Sort order accepted by the tweet search actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TweetSort {
    Latest,
}

/// Input for the apidojo/tweet-scraper actor, search-term mode.
#[derive(Debug, Clone, Serialize)]
pub struct TweetSearchInput {
    /// Twitter search expressions, e.g. `from:handle since:… until:…`.
    #[serde(rename = "searchTerms")]
    pub search_terms: Vec<String>,
    #[serde(rename = "maxItems")]
    pub max_items: u32,
    pub sort: TweetSort,
    #[serde(rename = "addUserInfo")]
    pub add_user_info: bool,
}

/// Wrapper for Apify API responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

/// Apify actor run metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct RunData {
    pub id: String,
    pub status: String,
    #[serde(rename = "defaultDatasetId")]
    pub default_dataset_id: String,
    #[serde(rename = "startedAt")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(rename = "finishedAt")]
    pub finished_at: Option<DateTime<Utc>>,
}

/// Named dataset metadata, returned by get-or-create.
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetData {
    pub id: String,
    pub name: Option<String>,
    #[serde(rename = "itemCount")]
    pub item_count: Option<u64>,
}
