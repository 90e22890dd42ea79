//! `records` command implementation.

use anyhow::Result;
use config_loader::AppConfig;
use contracts::{Record, RecordStore};
use serde::Serialize;

use super::{open_store, print_json};
use crate::cli::RecordsArgs;
use crate::error::CliError;

/// Record listing for JSON output
#[derive(Debug, Serialize)]
pub struct RecordListing {
    count: usize,
    data: Vec<Record>,
}

/// Execute the `records` command
pub async fn run_records(config: &AppConfig, args: &RecordsArgs) -> Result<()> {
    let store = open_store(config).await?;

    match list_records(store.as_ref(), args.limit).await {
        Some(listing) => print_json(&listing),
        None => Err(CliError::not_found("No data available").into()),
    }
}

/// First `limit` records, oldest first; `None` when the log is empty
pub async fn list_records<S: RecordStore>(store: &S, limit: Option<u64>) -> Option<RecordListing> {
    let mut data = store.read_all().await;
    if data.is_empty() {
        return None;
    }
    if let Some(limit) = limit {
        data.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
    }
    Some(RecordListing {
        count: data.len(),
        data,
    })
}
