//! Collection orchestrator: plan, fetch, normalize, accumulate, one
//! candidate-election unit at a time.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use tracing::{info, warn};

use apify_client::{ApifyClient, RawTweet, TweetSearchInput};
use stumpline_common::{CollectedTweet, CollectorInput};

use crate::normalize;
use crate::planner;
use crate::run_log::{EventKind, RunLog};

/// Stats from a collection run.
#[derive(Debug, Default)]
pub struct RunStats {
    pub units_processed: u32,
    pub units_skipped: u32,
    pub tweets_fetched: u32,
    pub tweets_kept: u32,
}

impl std::fmt::Display for RunStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "\n=== Collection Run Complete ===")?;
        writeln!(f, "Units processed: {}", self.units_processed)?;
        writeln!(f, "Units skipped:   {}", self.units_skipped)?;
        writeln!(f, "Tweets fetched:  {}", self.tweets_fetched)?;
        writeln!(f, "Tweets kept:     {}", self.tweets_kept)?;
        Ok(())
    }
}

/// Everything a finished run produced: accumulated records plus counters.
pub struct RunOutcome {
    pub records: Vec<CollectedTweet>,
    pub stats: RunStats,
}

// --- TweetFetcher trait ---

#[async_trait]
pub trait TweetFetcher: Send + Sync {
    async fn search(&self, input: &TweetSearchInput) -> Result<Vec<RawTweet>>;
}

#[async_trait]
impl TweetFetcher for ApifyClient {
    async fn search(&self, input: &TweetSearchInput) -> Result<Vec<RawTweet>> {
        Ok(self.search_tweets(input).await?)
    }
}

pub struct Collector<'a> {
    fetcher: &'a dyn TweetFetcher,
    input: &'a CollectorInput,
}

impl<'a> Collector<'a> {
    pub fn new(fetcher: &'a dyn TweetFetcher, input: &'a CollectorInput) -> Self {
        Self { fetcher, input }
    }

    /// Run a full collection cycle over every configured unit.
    ///
    /// A unit whose fetch fails is logged and skipped. It never aborts the
    /// run or discards records accumulated so far.
    pub async fn run(&self, log: &mut RunLog) -> RunOutcome {
        let mut stats = RunStats::default();
        let mut records = Vec::new();

        let units = &self.input.candidate_elections;
        info!(units = units.len(), "Starting collection run");

        for (i, unit) in units.iter().enumerate() {
            let request = planner::build_request(unit, self.input);
            info!(
                candidate = unit.candidate.as_str(),
                year = unit.year.as_str(),
                query = request.search_terms[0].as_str(),
                requested = request.max_items,
                "Collecting unit"
            );

            match self.fetcher.search(&request).await {
                Ok(raw) => {
                    let fetched = raw.len() as u32;
                    let kept =
                        normalize::normalize(raw, unit, self.input.max_tweets_per_run as usize);
                    info!(
                        candidate = unit.candidate.as_str(),
                        year = unit.year.as_str(),
                        fetched,
                        kept = kept.len(),
                        "Unit collected"
                    );
                    log.log(EventKind::UnitCollected {
                        candidate: unit.candidate.clone(),
                        year: unit.year.clone(),
                        query: request.search_terms[0].clone(),
                        fetched,
                        kept: kept.len() as u32,
                    });
                    stats.units_processed += 1;
                    stats.tweets_fetched += fetched;
                    stats.tweets_kept += kept.len() as u32;
                    records.extend(kept);
                }
                Err(e) => {
                    warn!(
                        candidate = unit.candidate.as_str(),
                        year = unit.year.as_str(),
                        error = %e,
                        "Unit fetch failed, continuing with remaining units"
                    );
                    log.log(EventKind::UnitSkipped {
                        candidate: unit.candidate.clone(),
                        year: unit.year.clone(),
                        error: e.to_string(),
                    });
                    stats.units_skipped += 1;
                }
            }

            // Pace provider calls. No pause after the final unit.
            if i + 1 < units.len() {
                tokio::time::sleep(Duration::from_millis(self.input.unit_delay_ms)).await;
            }
        }

        info!("{stats}");
        RunOutcome { records, stats }
    }
}
