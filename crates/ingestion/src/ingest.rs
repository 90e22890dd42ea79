//! Fetch-and-append

use contracts::{Record, RecordStore};
use observability::record_ingest;
use tracing::{info, warn};

use crate::{IngestionError, Result, SampleSource};

/// Fetch one sample from `source` and append it to `store`
///
/// Returns the stamped record. Failures are logged and returned; nothing is
/// retried.
pub async fn ingest_once<S, R>(source: &S, store: &R) -> Result<Record>
where
    S: SampleSource + Sync,
    R: RecordStore + Sync,
{
    let outcome = fetch_and_append(source, store).await;
    record_ingest(source.name(), outcome.is_ok());

    match &outcome {
        Ok(record) => info!(
            source = source.name(),
            store = store.name(),
            id = record.id,
            temperature = record.temperature,
            windspeed = record.windspeed,
            "Sample ingested"
        ),
        Err(e) => warn!(source = source.name(), error = %e, "Sample not ingested"),
    }
    outcome
}

async fn fetch_and_append<S, R>(source: &S, store: &R) -> Result<Record>
where
    S: SampleSource + Sync,
    R: RecordStore + Sync,
{
    let sample = source.fetch().await?;
    sample
        .validate()
        .map_err(|source_err| IngestionError::InvalidSample {
            source_name: source.name().to_string(),
            source: source_err,
        })?;
    store.append(sample).await.map_err(IngestionError::Store)
}
