//! Apify REST API client for the tweet search actor.
//!
//! A minimal client for the Apify platform API: start an actor run, long-poll
//! until it finishes, fetch the run's dataset items, and append records to a
//! named dataset.

pub mod error;
pub mod types;

pub use error::{ApifyError, Result};
pub use types::{DatasetData, RawTweet, RunData, TweetSearchInput, TweetSort};

use serde::de::DeserializeOwned;
use serde::Serialize;
use types::ApiResponse;

const BASE_URL: &str = "https://api.apify.com/v2";

/// Actor ID for apidojo/tweet-scraper.
const TWEET_SCRAPER: &str = "61RPP7dywgiy0JPD0";

#[derive(Clone)]
pub struct ApifyClient {
    token: String,
    client: reqwest::Client,
}

impl ApifyClient {
    pub fn new(token: String) -> Self {
        Self {
            token,
            client: reqwest::Client::new(),
        }
    }

    /// Attach auth, send, and map non-2xx responses to [`ApifyError::Api`].
    async fn send_checked(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response> {
        let response = request.bearer_auth(&self.token).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(ApifyError::Api {
            status: status.as_u16(),
            message,
        })
    }

    /// Start a tweet search run. Returns immediately with run metadata.
    pub async fn start_tweet_search(&self, input: &TweetSearchInput) -> Result<RunData> {
        let url = format!("{}/acts/{}/runs", BASE_URL, TWEET_SCRAPER);
        let response = self.send_checked(self.client.post(&url).json(input)).await?;
        let parsed: ApiResponse<RunData> = response.json().await?;
        Ok(parsed.data)
    }

    /// Poll until a run completes. Uses `waitForFinish=60` for efficient long-polling.
    pub async fn wait_for_run(&self, run_id: &str) -> Result<RunData> {
        let url = format!("{}/actor-runs/{}?waitForFinish=60", BASE_URL, run_id);
        loop {
            let response = self.send_checked(self.client.get(&url)).await?;
            let parsed: ApiResponse<RunData> = response.json().await?;
            let run = parsed.data;
            match run.status.as_str() {
                "SUCCEEDED" => return Ok(run),
                "FAILED" | "ABORTED" | "TIMED-OUT" => {
                    return Err(ApifyError::RunFailed {
                        run_id: run_id.to_string(),
                        status: run.status,
                    });
                }
                _ => tracing::debug!(run_id, status = %run.status, "Run still in progress"),
            }
        }
    }

    /// Fetch dataset items from a completed run.
    pub async fn get_dataset_items<T: DeserializeOwned>(&self, dataset_id: &str) -> Result<Vec<T>> {
        let url = format!("{}/datasets/{}/items?format=json", BASE_URL, dataset_id);
        let response = self.send_checked(self.client.get(&url)).await?;

        // Decode from text so that schema drift surfaces as a Parse error
        // rather than a generic network failure.
        let body = response.text().await?;
        let items: Vec<T> = serde_json::from_str(&body)?;
        Ok(items)
    }

    /// Search tweets end-to-end: start run, poll, fetch results.
    ///
    /// One attempt, no retry. Any provider-side failure (network, API status,
    /// failed run, unparseable dataset) surfaces as an [`ApifyError`].
    pub async fn search_tweets(&self, input: &TweetSearchInput) -> Result<Vec<RawTweet>> {
        tracing::info!(
            terms = input.search_terms.len(),
            max_items = input.max_items,
            "Starting tweet search"
        );

        let run = self.start_tweet_search(input).await?;
        tracing::info!(run_id = %run.id, "Run started, waiting for completion");

        let completed = self.wait_for_run(&run.id).await?;
        tracing::info!(
            run_id = %completed.id,
            dataset_id = %completed.default_dataset_id,
            "Run finished, fetching dataset"
        );

        let tweets: Vec<RawTweet> = self.get_dataset_items(&completed.default_dataset_id).await?;
        tracing::info!(count = tweets.len(), "Fetched tweets");

        Ok(tweets)
    }

    /// Look up a named dataset, creating it if absent.
    pub async fn get_or_create_dataset(&self, name: &str) -> Result<DatasetData> {
        let url = format!("{}/datasets?name={}", BASE_URL, name);
        let response = self.send_checked(self.client.post(&url)).await?;
        let parsed: ApiResponse<DatasetData> = response.json().await?;
        Ok(parsed.data)
    }

    /// Append items to a dataset.
    pub async fn push_dataset_items<T: Serialize>(
        &self,
        dataset_id: &str,
        items: &[T],
    ) -> Result<()> {
        let url = format!("{}/datasets/{}/items", BASE_URL, dataset_id);
        self.send_checked(self.client.post(&url).json(items)).await?;
        Ok(())
    }
}
