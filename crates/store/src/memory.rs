//! MemoryStore - volatile log with the same stamping rules
//!
//! Used for dry runs and tests.

use std::sync::{Mutex, MutexGuard};

use contracts::{next_record_id, ContractError, NewSample, Record, RecordClock, RecordStore};
use observability::{record_append, Observer};
use tracing::{debug, warn};

/// In-memory append-only log
#[derive(Debug)]
pub struct MemoryStore {
    name: String,
    records: Mutex<Vec<Record>>,
    clock: RecordClock,
    observer: Observer,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new(observer: Observer) -> Self {
        Self {
            name: "memory".to_string(),
            records: Mutex::new(Vec::new()),
            clock: RecordClock::Utc,
            observer,
        }
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether nothing has been appended
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Record>> {
        self.records.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl RecordStore for MemoryStore {
    fn name(&self) -> &str {
        &self.name
    }

    async fn read_all(&self) -> Vec<Record> {
        self.lock().clone()
    }

    async fn append(&self, sample: NewSample) -> Result<Record, ContractError> {
        if let Err(e) = sample.validate() {
            record_append(false);
            self.observer.in_scope(|| {
                warn!(store = %self.name, error = %e, "Sample rejected");
            });
            return Err(e);
        }

        let record = {
            let mut log = self.lock();
            let id = match next_record_id(&log) {
                Ok(id) => id,
                Err(e) => {
                    drop(log);
                    record_append(false);
                    self.observer.in_scope(|| {
                        warn!(store = %self.name, error = %e, "Append refused");
                    });
                    return Err(e);
                }
            };
            let record = sample.into_record(id, self.clock.now());
            log.push(record.clone());
            record
        };

        record_append(true);
        self.observer.in_scope(|| {
            debug!(store = %self.name, id = record.id, "Record saved");
        });
        Ok(record)
    }
}
