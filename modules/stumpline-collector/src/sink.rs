//! Durable outputs for collected records.
//!
//! Persistence failures are fatal. Unlike a unit fetch failure, a failed
//! append stops the run with whatever was already written.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::info;

use apify_client::ApifyClient;
use stumpline_common::{CollectedTweet, CollectorError};

// --- RecordSink trait ---

#[async_trait]
pub trait RecordSink: Send {
    async fn append(&mut self, record: &CollectedTweet) -> Result<(), CollectorError>;
    /// Flush buffered output. Called once after the last append.
    async fn finish(&mut self) -> Result<(), CollectorError> {
        Ok(())
    }
    fn name(&self) -> &str;
}

/// Append every accumulated record, in order, then flush.
pub async fn persist_all(
    sink: &mut dyn RecordSink,
    records: &[CollectedTweet],
) -> Result<(), CollectorError> {
    for record in records {
        sink.append(record).await?;
    }
    sink.finish().await?;
    info!(count = records.len(), sink = sink.name(), "Records persisted");
    Ok(())
}

// --- JSONL file sink ---

/// One JSON record per line under `{data_dir}/collections/{run_id}.jsonl`.
pub struct JsonlSink {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl JsonlSink {
    pub fn create(data_dir: &Path, run_id: &str) -> Result<Self, CollectorError> {
        let dir = data_dir.join("collections");
        std::fs::create_dir_all(&dir)
            .map_err(|e| CollectorError::Persistence(format!("create {}: {e}", dir.display())))?;

        let path = dir.join(format!("{run_id}.jsonl"));
        let file = File::create(&path)
            .map_err(|e| CollectorError::Persistence(format!("create {}: {e}", path.display())))?;

        Ok(Self {
            path,
            writer: BufWriter::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl RecordSink for JsonlSink {
    async fn append(&mut self, record: &CollectedTweet) -> Result<(), CollectorError> {
        let line = serde_json::to_string(record)
            .map_err(|e| CollectorError::Persistence(e.to_string()))?;
        writeln!(self.writer, "{line}")
            .map_err(|e| CollectorError::Persistence(format!("write {}: {e}", self.path.display())))
    }

    async fn finish(&mut self) -> Result<(), CollectorError> {
        self.writer
            .flush()
            .map_err(|e| CollectorError::Persistence(format!("flush {}: {e}", self.path.display())))
    }

    fn name(&self) -> &str {
        "jsonl"
    }
}

// --- Apify dataset sink ---

/// Pushes records to a named Apify dataset, one append per record.
pub struct DatasetSink {
    client: ApifyClient,
    dataset_id: String,
}

impl DatasetSink {
    /// Resolve the named dataset up front so a bad name fails before any push.
    pub async fn open(client: ApifyClient, name: &str) -> Result<Self, CollectorError> {
        let dataset = client
            .get_or_create_dataset(name)
            .await
            .map_err(|e| CollectorError::Persistence(format!("dataset {name}: {e}")))?;
        info!(dataset_id = %dataset.id, name, "Dataset sink ready");
        Ok(Self {
            client,
            dataset_id: dataset.id,
        })
    }
}

#[async_trait]
impl RecordSink for DatasetSink {
    async fn append(&mut self, record: &CollectedTweet) -> Result<(), CollectorError> {
        self.client
            .push_dataset_items(&self.dataset_id, std::slice::from_ref(record))
            .await
            .map_err(|e| CollectorError::Persistence(format!("push: {e}")))
    }

    fn name(&self) -> &str {
        "dataset"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(candidate: &str, date: &str) -> CollectedTweet {
        CollectedTweet {
            candidate: candidate.to_string(),
            year: "2024".to_string(),
            date: date.parse().unwrap(),
            text: "hello".to_string(),
            url: format!("https://twitter.com/{candidate}/status/1"),
        }
    }

    #[tokio::test]
    async fn jsonl_sink_writes_one_record_per_line_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = JsonlSink::create(dir.path(), "test-run").unwrap();

        let records = vec![record("alice", "2024-01-20"), record("bob", "2024-01-10")];
        persist_all(&mut sink, &records).await.unwrap();

        let contents = std::fs::read_to_string(sink.path()).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: CollectedTweet = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first.candidate, "alice");
        let second: CollectedTweet = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second.candidate, "bob");
    }

    #[tokio::test]
    async fn jsonl_lines_use_the_external_field_names() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = JsonlSink::create(dir.path(), "field-run").unwrap();

        persist_all(&mut sink, &[record("alice", "2024-01-20")])
            .await
            .unwrap();

        let contents = std::fs::read_to_string(sink.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(contents.lines().next().unwrap()).unwrap();
        assert!(value.get("electionYear").is_some());
        assert!(value.get("candidate").is_some());
        assert_eq!(value["date"], "2024-01-20");
    }

    struct FailingSink;

    #[async_trait]
    impl RecordSink for FailingSink {
        async fn append(&mut self, _record: &CollectedTweet) -> Result<(), CollectorError> {
            Err(CollectorError::Persistence("disk full".to_string()))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    #[tokio::test]
    async fn persistence_failure_stops_the_pass() {
        let mut sink = FailingSink;
        let err = persist_all(&mut sink, &[record("alice", "2024-01-20")])
            .await
            .unwrap_err();
        assert!(matches!(err, CollectorError::Persistence(_)));
    }
}
