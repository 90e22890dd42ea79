//! # Store
//!
//! Ordered, append-only weather record log.
//!
//! Responsibilities:
//! - Assign monotonic ids and creation timestamps
//! - Persist the full log as one JSON array, rewritten atomically per append
//! - Read the log oldest-first, treating absent or corrupt storage as empty

pub mod error;
pub mod json_file;
pub mod memory;

pub use contracts::{NewSample, Record, RecordStore};
pub use error::StoreError;
pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
