//! JsonFileStore - the persisted log as a single JSON array

use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use contracts::{
    next_record_id, ContractError, NewSample, Record, RecordClock, RecordStore, StoreConfig,
};
use observability::{record_append, record_log_size, record_read_fallback, Observer};
use serde::Deserialize;
use serde_json::Value;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, error, info, instrument, warn};

use crate::StoreError;

/// Store backed by one JSON file
///
/// Every append rewrites the whole file through a temporary sibling that is
/// renamed into place. Records already in the log are written back as the
/// JSON they were read from, extra fields included. Appends from concurrent
/// writers are not coordinated.
#[derive(Debug)]
pub struct JsonFileStore {
    name: String,
    path: PathBuf,
    clock: RecordClock,
    observer: Observer,
}

impl JsonFileStore {
    /// Open the store, creating parent directories and an empty log if absent
    pub async fn open(config: &StoreConfig, observer: Observer) -> Result<Self, ContractError> {
        let store = Self {
            name: "json_file".to_string(),
            path: config.path.clone(),
            clock: config.clock,
            observer,
        };
        store.ensure_exists().await?;
        Ok(store)
    }

    /// Location of the log
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the log, classifying every failure
    pub async fn load(&self) -> Result<Vec<Record>, StoreError> {
        Ok(self.load_entries().await?.records)
    }

    async fn load_entries(&self) -> Result<LogEntries, StoreError> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StoreError::Missing {
                    path: self.path.clone(),
                });
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        decode_log(&bytes)
    }

    async fn ensure_exists(&self) -> Result<(), ContractError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        if fs::try_exists(&self.path).await? {
            return Ok(());
        }

        self.write_log(&[]).await?;
        self.observer.in_scope(|| {
            info!(store = %self.name, path = %self.path.display(), "Created empty log");
        });
        Ok(())
    }

    /// Current log for an append; corrupt content is replaced by an empty log
    async fn load_for_append(&self) -> Result<LogEntries, ContractError> {
        match self.load_entries().await {
            Ok(log) => Ok(log),
            Err(StoreError::Missing { .. }) => {
                self.observer.in_scope(|| {
                    warn!(
                        store = %self.name,
                        path = %self.path.display(),
                        "Log missing, starting a new one"
                    );
                });
                Ok(LogEntries::default())
            }
            Err(e) if e.is_corrupt() => {
                record_read_fallback(e.reason());
                self.observer.in_scope(|| {
                    error!(
                        store = %self.name,
                        path = %self.path.display(),
                        error = %e,
                        "Discarding unreadable log, previous records are lost"
                    );
                });
                Ok(LogEntries::default())
            }
            Err(e) => Err(ContractError::storage(
                self.path.display().to_string(),
                e.to_string(),
            )),
        }
    }

    /// Log content to write back, ending with the newly stamped record
    async fn prepare_append(
        &self,
        sample: NewSample,
    ) -> Result<(Vec<Value>, Record), ContractError> {
        let LogEntries { mut raw, records } = self.load_for_append().await?;
        let record = sample.into_record(next_record_id(&records)?, self.clock.now());
        let value = serde_json::to_value(&record).map_err(|e| {
            ContractError::storage(self.path.display().to_string(), format!("serialize: {e}"))
        })?;
        raw.push(value);
        Ok((raw, record))
    }

    async fn write_log(&self, log: &[Value]) -> Result<(), ContractError> {
        let body = serde_json::to_vec_pretty(log).map_err(|e| {
            ContractError::storage(self.path.display().to_string(), format!("serialize: {e}"))
        })?;

        let tmp = self.temp_path();
        if let Err(e) = write_then_rename(&tmp, &self.path, &body).await {
            // Best effort; the live log is untouched either way.
            let _ = fs::remove_file(&tmp).await;
            return Err(ContractError::storage(
                self.path.display().to_string(),
                e.to_string(),
            ));
        }
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| OsString::from("log"));
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn report_read_fallback(&self, err: &StoreError) {
        record_read_fallback(err.reason());
        self.observer.in_scope(|| match err {
            StoreError::SchemaViolation { .. } | StoreError::Io { .. } => {
                error!(store = %self.name, error = %err, "Log unreadable, treating as empty");
            }
            _ => {
                warn!(store = %self.name, error = %err, "Log unavailable, treating as empty");
            }
        });
    }
}

async fn write_then_rename(tmp: &Path, target: &Path, body: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(tmp).await?;
    file.write_all(body).await?;
    file.sync_all().await?;
    drop(file);
    fs::rename(tmp, target).await
}

/// Decoded log with the JSON each record was read from
#[derive(Debug, Default)]
pub(crate) struct LogEntries {
    pub(crate) raw: Vec<Value>,
    pub(crate) records: Vec<Record>,
}

/// Decode a persisted log
pub(crate) fn decode_log(bytes: &[u8]) -> Result<LogEntries, StoreError> {
    let value: Value = serde_json::from_slice(bytes).map_err(StoreError::Malformed)?;

    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(StoreError::NotASequence {
                found: json_kind(&other),
            });
        }
    };

    let records = items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            Record::deserialize(item)
                .map_err(|source| StoreError::SchemaViolation { index, source })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(LogEntries {
        raw: items,
        records,
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl RecordStore for JsonFileStore {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(name = "json_store_read_all", skip(self), fields(store = %self.name))]
    async fn read_all(&self) -> Vec<Record> {
        match self.load().await {
            Ok(records) => {
                record_log_size(records.len());
                self.observer.in_scope(|| {
                    debug!(store = %self.name, records = records.len(), "Log read");
                });
                records
            }
            Err(e) => {
                self.report_read_fallback(&e);
                Vec::new()
            }
        }
    }

    #[instrument(name = "json_store_append", skip(self, sample), fields(store = %self.name))]
    async fn append(&self, sample: NewSample) -> Result<Record, ContractError> {
        if let Err(e) = sample.validate() {
            record_append(false);
            self.observer.in_scope(|| {
                warn!(store = %self.name, error = %e, "Sample rejected");
            });
            return Err(e);
        }

        let (log, record) = match self.prepare_append(sample).await {
            Ok(prepared) => prepared,
            Err(e) => {
                record_append(false);
                self.observer.in_scope(|| {
                    error!(store = %self.name, error = %e, "Append aborted");
                });
                return Err(e);
            }
        };

        match self.write_log(&log).await {
            Ok(()) => {
                record_append(true);
                record_log_size(log.len());
                self.observer.in_scope(|| {
                    info!(store = %self.name, id = record.id, "Record saved");
                });
                Ok(record)
            }
            Err(e) => {
                record_append(false);
                self.observer.in_scope(|| {
                    error!(store = %self.name, id = record.id, error = %e, "Write failed");
                });
                Err(e)
            }
        }
    }
}
