//! Persisted timeline of a collection run.
//!
//! The collector appends one event per candidate/election unit and one per
//! persistence step. When the run ends the whole timeline is written to
//! `{data_dir}/runs/{run_id}.json` together with the final counters.

use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::collector::RunStats;

pub struct RunLog {
    pub run_id: String,
    pub started_at: DateTime<Utc>,
    seq: u32,
    events: Vec<RunEvent>,
}

#[derive(Debug, Serialize)]
struct RunEvent {
    seq: u32,
    ts: DateTime<Utc>,
    #[serde(flatten)]
    kind: EventKind,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    UnitCollected {
        candidate: String,
        year: String,
        query: String,
        fetched: u32,
        kept: u32,
    },
    UnitSkipped {
        candidate: String,
        year: String,
        error: String,
    },
    RecordsPersisted {
        sink: String,
        count: u32,
    },
}

impl RunLog {
    pub fn new(run_id: String) -> Self {
        Self {
            run_id,
            started_at: Utc::now(),
            seq: 0,
            events: Vec::new(),
        }
    }

    pub fn log(&mut self, kind: EventKind) {
        let seq = self.seq;
        self.seq += 1;
        self.events.push(RunEvent {
            seq,
            ts: Utc::now(),
            kind,
        });
    }

    /// Write the timeline as pretty-printed JSON under `{data_dir}/runs/`.
    /// Returns the file path on success.
    pub fn save(&self, data_dir: &Path, stats: &RunStats) -> Result<PathBuf> {
        let dir = data_dir.join("runs");
        std::fs::create_dir_all(&dir)?;
        let path = dir.join(format!("{}.json", self.run_id));

        let file = SavedRunLog {
            run_id: &self.run_id,
            started_at: self.started_at,
            finished_at: Utc::now(),
            stats: SavedStats::from(stats),
            events: &self.events,
        };
        let json = serde_json::to_string_pretty(&file)?;
        std::fs::write(&path, json)?;

        info!(path = %path.display(), events = self.events.len(), "Run log saved");
        Ok(path)
    }
}

// ---------------------------------------------------------------------------
// On-disk file format
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct SavedRunLog<'a> {
    run_id: &'a str,
    started_at: DateTime<Utc>,
    finished_at: DateTime<Utc>,
    stats: SavedStats,
    events: &'a [RunEvent],
}

#[derive(Serialize)]
struct SavedStats {
    units_processed: u32,
    units_skipped: u32,
    tweets_fetched: u32,
    tweets_kept: u32,
}

impl From<&RunStats> for SavedStats {
    fn from(s: &RunStats) -> Self {
        Self {
            units_processed: s.units_processed,
            units_skipped: s.units_skipped,
            tweets_fetched: s.tweets_fetched,
            tweets_kept: s.tweets_kept,
        }
    }
}
