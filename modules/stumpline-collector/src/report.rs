//! Post-run aggregation over the accumulated records.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use stumpline_common::CollectedTweet;

/// Aggregate view of a finished run. Count maps are BTreeMaps so the
/// summary iterates keys in lexicographic order.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub total: u32,
    pub by_candidate: BTreeMap<String, u32>,
    pub by_year: BTreeMap<String, u32>,
    pub earliest: Option<NaiveDate>,
    pub latest: Option<NaiveDate>,
}

impl RunSummary {
    /// Single pass over the final collected set. Date span is computed here,
    /// across all units, not per unit.
    pub fn from_records(records: &[CollectedTweet]) -> Self {
        let mut summary = Self::default();
        for record in records {
            summary.total += 1;
            *summary
                .by_candidate
                .entry(record.candidate.clone())
                .or_insert(0) += 1;
            *summary.by_year.entry(record.year.clone()).or_insert(0) += 1;
            summary.earliest = Some(match summary.earliest {
                Some(d) => d.min(record.date),
                None => record.date,
            });
            summary.latest = Some(match summary.latest {
                Some(d) => d.max(record.date),
                None => record.date,
            });
        }
        summary
    }
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "\n=== Collected Tweets ===")?;
        writeln!(f, "Total: {}", self.total)?;
        writeln!(f, "\nBy candidate:")?;
        for (candidate, count) in &self.by_candidate {
            writeln!(f, "  {}: {}", candidate, count)?;
        }
        writeln!(f, "\nBy election year:")?;
        for (year, count) in &self.by_year {
            writeln!(f, "  {}: {}", year, count)?;
        }
        if let (Some(earliest), Some(latest)) = (self.earliest, self.latest) {
            writeln!(f, "\nDate range: {} to {}", earliest, latest)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(candidate: &str, year: &str, date: &str) -> CollectedTweet {
        CollectedTweet {
            candidate: candidate.to_string(),
            year: year.to_string(),
            date: date.parse().unwrap(),
            text: "t".to_string(),
            url: "u".to_string(),
        }
    }

    #[test]
    fn counts_split_by_candidate_and_year() {
        let records = vec![
            record("alice", "2024", "2024-01-10"),
            record("alice", "2024", "2024-01-12"),
            record("alice", "2020", "2020-03-01"),
            record("bob", "2024", "2024-02-01"),
        ];
        let summary = RunSummary::from_records(&records);

        assert_eq!(summary.total, 4);
        assert_eq!(summary.by_candidate["alice"], 3);
        assert_eq!(summary.by_candidate["bob"], 1);
        assert_eq!(summary.by_year["2024"], 3);
        assert_eq!(summary.by_year["2020"], 1);
    }

    #[test]
    fn count_totals_agree() {
        let records = vec![
            record("alice", "2024", "2024-01-10"),
            record("bob", "2020", "2020-03-01"),
            record("bob", "2024", "2024-02-01"),
        ];
        let summary = RunSummary::from_records(&records);

        assert_eq!(summary.total, summary.by_candidate.values().sum::<u32>());
        assert_eq!(summary.total, summary.by_year.values().sum::<u32>());
    }

    #[test]
    fn date_span_covers_the_whole_collection() {
        let records = vec![
            record("alice", "2024", "2024-01-10"),
            record("bob", "2020", "2020-03-01"),
            record("alice", "2024", "2024-01-20"),
        ];
        let summary = RunSummary::from_records(&records);

        assert_eq!(summary.earliest, Some("2020-03-01".parse().unwrap()));
        assert_eq!(summary.latest, Some("2024-01-20".parse().unwrap()));
    }

    #[test]
    fn empty_collection_has_no_date_span() {
        let summary = RunSummary::from_records(&[]);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.earliest, None);
        assert_eq!(summary.latest, None);
        assert!(!summary.to_string().contains("Date range"));
    }

    #[test]
    fn summary_keys_iterate_in_lexicographic_order() {
        let records = vec![
            record("zoe", "2024", "2024-01-10"),
            record("alice", "2016", "2016-03-01"),
        ];
        let summary = RunSummary::from_records(&records);
        let candidates: Vec<_> = summary.by_candidate.keys().cloned().collect();
        assert_eq!(candidates, vec!["alice", "zoe"]);
    }
}
