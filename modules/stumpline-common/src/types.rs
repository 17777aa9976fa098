use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// One unit of work: a candidate handle plus the campaign window to collect.
///
/// Windows are calendar dates, UTC. `start` opens at 00:00:00 and `end`
/// closes at 23:59:59: the end date is always treated as end-of-day, so a
/// single-day window covers the whole day. An inverted window (`start` after
/// `end`) is not rejected; it simply matches nothing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CandidateElection {
    pub candidate: String,
    /// Election year label. Upstream configs carry this as either a JSON
    /// number or a string; both forms are accepted and kept as a string.
    #[serde(rename = "electionYear", deserialize_with = "year_label")]
    pub year: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl CandidateElection {
    /// Whether a timestamp falls inside the collection window, inclusive on
    /// both bounds.
    pub fn window_contains(&self, ts: DateTime<Utc>) -> bool {
        let open = self
            .start
            .and_hms_opt(0, 0, 0)
            .expect("valid wall-clock time");
        let close = self
            .end
            .and_hms_opt(23, 59, 59)
            .expect("valid wall-clock time");
        let ts = ts.naive_utc();
        open <= ts && ts <= close
    }
}

fn year_label<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(i64),
        Text(String),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Num(n) => n.to_string(),
        Raw::Text(s) => s,
    })
}

/// A normalized, windowed tweet record, the shape pushed to the sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectedTweet {
    pub candidate: String,
    #[serde(rename = "electionYear")]
    pub year: String,
    /// Calendar date of the tweet, UTC.
    pub date: NaiveDate,
    /// Tweet body; empty when the record carried no resolvable text.
    pub text: String,
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn unit(start: (i32, u32, u32), end: (i32, u32, u32)) -> CandidateElection {
        CandidateElection {
            candidate: "alice".to_string(),
            year: "2024".to_string(),
            start: NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap(),
            end: NaiveDate::from_ymd_opt(end.0, end.1, end.2).unwrap(),
        }
    }

    #[test]
    fn window_is_inclusive_on_both_bounds() {
        let u = unit((2024, 1, 1), (2024, 1, 31));
        let first = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let last = Utc.with_ymd_and_hms(2024, 1, 31, 23, 59, 59).unwrap();
        assert!(u.window_contains(first));
        assert!(u.window_contains(last));
    }

    #[test]
    fn window_excludes_adjacent_days() {
        let u = unit((2024, 1, 1), (2024, 1, 31));
        let before = Utc.with_ymd_and_hms(2023, 12, 31, 23, 59, 59).unwrap();
        let after = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        assert!(!u.window_contains(before));
        assert!(!u.window_contains(after));
    }

    #[test]
    fn inverted_window_matches_nothing() {
        let u = unit((2024, 1, 31), (2024, 1, 1));
        let mid = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        assert!(!u.window_contains(mid));
    }

    #[test]
    fn year_label_accepts_number_or_string() {
        let from_num: CandidateElection = serde_json::from_str(
            r#"{"candidate":"alice","electionYear":2024,"start":"2024-01-01","end":"2024-01-31"}"#,
        )
        .unwrap();
        let from_str: CandidateElection = serde_json::from_str(
            r#"{"candidate":"alice","electionYear":"2024","start":"2024-01-01","end":"2024-01-31"}"#,
        )
        .unwrap();
        assert_eq!(from_num.year, "2024");
        assert_eq!(from_num, from_str);
    }

    #[test]
    fn collected_tweet_serializes_with_upstream_field_names() {
        let rec = CollectedTweet {
            candidate: "alice".to_string(),
            year: "2024".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 20).unwrap(),
            text: "good morning iowa".to_string(),
            url: "https://twitter.com/alice/status/1".to_string(),
        };
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["electionYear"], "2024");
        assert_eq!(json["date"], "2024-01-20");
    }
}
