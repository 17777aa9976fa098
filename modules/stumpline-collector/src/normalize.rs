//! Raw search results → windowed, ordered, capped records.

use chrono::{DateTime, Utc};
use serde_json::Value;

use apify_client::RawTweet;
use stumpline_common::{CandidateElection, CollectedTweet};

use crate::fields;

/// Twitter's classic timestamp format, e.g. `Tue Jan 09 14:02:11 +0000 2024`.
const TWITTER_TIME: &str = "%a %b %d %H:%M:%S %z %Y";

/// Parse a resolved timestamp. RFC 3339 first, then the classic format;
/// anything else is unparseable and the record carrying it is dropped.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    DateTime::parse_from_str(raw, TWITTER_TIME)
        .ok()
        .map(|ts| ts.with_timezone(&Utc))
}

/// Apply one unit's collection rules to a raw batch:
///
/// 1. keep records whose timestamp parses and falls inside the window
///    (inclusive; the window end is end-of-day),
/// 2. sort newest-first (stable, so equal timestamps keep fetch order),
/// 3. truncate to the per-unit cap (the most recent in-window records
///    survive, not the first fetched),
/// 4. map into the durable record shape.
pub fn normalize(
    raw: Vec<RawTweet>,
    unit: &CandidateElection,
    cap: usize,
) -> Vec<CollectedTweet> {
    let mut dated: Vec<(DateTime<Utc>, RawTweet)> = raw
        .into_iter()
        .filter_map(|record| {
            let ts = fields::resolve_str(&record, fields::TIMESTAMP_KEYS)
                .and_then(|s| parse_timestamp(&s))?;
            unit.window_contains(ts).then_some((ts, record))
        })
        .collect();

    dated.sort_by(|a, b| b.0.cmp(&a.0));
    dated.truncate(cap);

    dated
        .into_iter()
        .map(|(ts, record)| to_record(ts, &record, unit))
        .collect()
}

fn to_record(ts: DateTime<Utc>, record: &Value, unit: &CandidateElection) -> CollectedTweet {
    let text = fields::resolve_str(record, fields::TEXT_KEYS).unwrap_or_default();
    let url = match record.get("url").and_then(Value::as_str) {
        Some(u) => u.to_string(),
        None => {
            let id = fields::resolve_str(record, fields::ID_KEYS).unwrap_or_default();
            format!("https://twitter.com/{}/status/{}", unit.candidate, id)
        }
    };
    CollectedTweet {
        candidate: unit.candidate.clone(),
        year: unit.year.clone(),
        date: ts.date_naive(),
        text,
        url,
    }
}
