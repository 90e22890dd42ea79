//! `ingest` command implementation.

use anyhow::{Context, Result};
use config_loader::AppConfig;
use contracts::{Record, RecordStore};
use ingestion::{ingest_once, MockSampleSource, OpenMeteoSource, SampleSource};
use tracing::info;

use super::{open_store, print_json};
use crate::cli::IngestArgs;

/// Execute the `ingest` command
pub async fn run_ingest(config: &AppConfig, args: &IngestArgs) -> Result<()> {
    let store = open_store(config).await?;

    let records = if args.mock {
        ingest_many(&MockSampleSource::default(), store.as_ref(), args.count).await?
    } else {
        let source =
            OpenMeteoSource::new(&config.source).context("Failed to build weather client")?;
        ingest_many(&source, store.as_ref(), args.count).await?
    };

    info!(count = records.len(), "Ingestion finished");
    print_json(&records)
}

async fn ingest_many<S, R>(source: &S, store: &R, count: u32) -> Result<Vec<Record>>
where
    S: SampleSource + Sync,
    R: RecordStore + Sync,
{
    let mut records = Vec::with_capacity(count as usize);
    for n in 0..count {
        let record = ingest_once(source, store)
            .await
            .with_context(|| format!("Sample {} of {count} failed", n + 1))?;
        records.push(record);
    }
    Ok(records)
}
