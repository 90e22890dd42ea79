//! # Ingestion
//!
//! Weather sample sources and the fetch-and-append step.
//!
//! Responsibilities:
//! - Fetch the current weather for a fixed location from Open-Meteo
//! - Produce deterministic mock samples for dry runs and tests
//! - Validate a sample and append it to a `RecordStore`
//!
//! ## Usage Example
//!
//! ```ignore
//! use ingestion::{ingest_once, OpenMeteoSource};
//!
//! let source = OpenMeteoSource::new(&config.source)?;
//! let record = ingest_once(&source, &store).await?;
//! println!("stored record {}", record.id);
//! ```
//!
//! ## Mock Testing
//!
//! ```ignore
//! use ingestion::MockSampleSource;
//!
//! let source = MockSampleSource::default();
//! ingest_once(&source, &store).await?;
//! ```

mod error;
mod ingest;
mod mock;
mod open_meteo;
mod source;

// Re-exports
pub use contracts::NewSample;
pub use error::{IngestionError, Result};
pub use ingest::ingest_once;
pub use mock::{MockSampleConfig, MockSampleSource};
pub use open_meteo::{parse_current_weather, OpenMeteoSource};
pub use source::SampleSource;
