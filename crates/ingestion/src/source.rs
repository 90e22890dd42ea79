//! SampleSource trait

use contracts::NewSample;

use crate::Result;

/// Producer of unstamped weather samples
///
/// Implemented by the live Open-Meteo client and the deterministic mock.
#[trait_variant::make(SampleSource: Send)]
pub trait LocalSampleSource {
    /// Source name (used for logging/metrics)
    fn name(&self) -> &'static str;

    /// Produce the current sample
    ///
    /// # Errors
    /// Transport or response-shape failure; there is no automatic retry
    async fn fetch(&self) -> Result<NewSample>;
}
