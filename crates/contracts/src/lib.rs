//! # Contracts
//!
//! Frozen interface contracts shared by every crate of the workspace.
//! Business crates depend on this crate only; reverse dependencies are prohibited.
//!
//! ## Data Model
//! - `Record` is one stamped weather sample; `id` and `timestamp` are assigned by
//!   the store, never by the caller
//! - The log is a sequence ordered by insertion; `id` grows by exactly 1 per append

mod config;
mod error;
mod record;
mod results;
mod store;

pub use config::*;
pub use error::*;
pub use record::*;
pub use results::*;
pub use store::{LocalRecordStore, RecordStore};
