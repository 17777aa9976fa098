//! Provider request construction. Pure; no failure modes.

use apify_client::{TweetSearchInput, TweetSort};
use stumpline_common::{CandidateElection, CollectorInput};

/// Twitter search expression for one candidate window: author plus date
/// bounds. The provider treats this as a coarse pre-filter; the normalizer's
/// window check is authoritative.
pub fn build_query(unit: &CandidateElection) -> String {
    format!(
        "from:{} since:{} until:{}",
        unit.candidate, unit.start, unit.end
    )
}

/// Build the actor input for one unit. The requested item count is inflated
/// over the per-unit cap so that provider results falling outside the window
/// still leave enough in-window records to fill it.
pub fn build_request(unit: &CandidateElection, input: &CollectorInput) -> TweetSearchInput {
    TweetSearchInput {
        search_terms: vec![build_query(unit)],
        max_items: input.max_tweets_per_run.saturating_mul(input.fetch_inflation),
        sort: TweetSort::Latest,
        add_user_info: input.add_user_info,
    }
}
