use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use apify_client::ApifyClient;
use stumpline_collector::collector::Collector;
use stumpline_collector::report::RunSummary;
use stumpline_collector::run_log::{EventKind, RunLog};
use stumpline_collector::sink::{self, DatasetSink, JsonlSink, RecordSink};
use stumpline_common::{load_input, EnvConfig};

#[derive(Parser)]
#[command(
    name = "stumpline",
    about = "Collects election-window tweets for configured candidates"
)]
struct Cli {
    /// Path to the collection input JSON file
    #[arg(long, default_value = "input.json")]
    input: PathBuf,

    /// Collect and report without persisting records
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("stumpline=info".parse()?))
        .init();

    info!("Stumpline collector starting...");

    if let Err(e) = run().await {
        error!(error = %e, "Collector run failed");
        return Err(e);
    }
    Ok(())
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let env = EnvConfig::from_env();
    env.log_redacted();

    // Fatal before any network call: missing file or empty unit list.
    let input = load_input(&cli.input)?;

    let run_id = Uuid::new_v4().to_string();
    let mut log = RunLog::new(run_id.clone());
    info!(
        run_id = run_id.as_str(),
        units = input.candidate_elections.len(),
        "Collection run starting"
    );

    let client = ApifyClient::new(env.apify_token.clone());
    let collector = Collector::new(&client, &input);
    let outcome = collector.run(&mut log).await;

    if cli.dry_run {
        info!("Dry run, skipping persistence");
    } else {
        let mut jsonl = JsonlSink::create(&env.data_dir, &run_id)?;
        sink::persist_all(&mut jsonl, &outcome.records).await?;
        log.log(EventKind::RecordsPersisted {
            sink: jsonl.name().to_string(),
            count: outcome.records.len() as u32,
        });

        if let Some(name) = input.dataset.as_deref() {
            let mut dataset = DatasetSink::open(client.clone(), name).await?;
            sink::persist_all(&mut dataset, &outcome.records).await?;
            log.log(EventKind::RecordsPersisted {
                sink: dataset.name().to_string(),
                count: outcome.records.len() as u32,
            });
        }
    }

    // Summary comes after persistence so a failed write never reports
    // records it did not keep.
    let summary = RunSummary::from_records(&outcome.records);
    info!("{summary}");

    log.save(&env.data_dir, &outcome.stats)
        .context("Failed to save run log")?;

    Ok(())
}
