//! RecordStore trait - ordered append-only log interface
//!
//! Defines the abstract interface shared by the persisted store and the
//! in-memory store.

use crate::{ContractError, NewSample, Record};

/// Append-only record log
///
/// All store implementations must implement this trait. Readers never observe
/// a failure: an unavailable log reads as empty.
#[trait_variant::make(RecordStore: Send)]
pub trait LocalRecordStore {
    /// Store name (used for logging/metrics)
    fn name(&self) -> &str;

    /// Full log, oldest-first
    ///
    /// Absent or corrupt storage yields an empty sequence. Never mutates storage.
    async fn read_all(&self) -> Vec<Record>;

    /// Stamp `sample` with the next id and the current time, then persist it
    ///
    /// # Errors
    /// Returns validation or write error; the record must then be assumed lost
    async fn append(&self, sample: NewSample) -> Result<Record, ContractError>;
}
