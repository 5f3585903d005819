//! Processor trait for span batches.

use te_error::Result;
use te_types::TraceBatch;

/// Trait for span batch processors.
///
/// A processor receives a whole [`TraceBatch`] and returns it, possibly with
/// span attributes changed. The resource/scope grouping, span identity and
/// timing are left as they arrived.
///
/// # Thread Safety
///
/// Processors must be `Send + Sync`: the host calls the same processor from
/// several worker threads, each with its own batch.
pub trait SpanProcessor: Send + Sync {
    /// Processes a batch.
    ///
    /// # Arguments
    ///
    /// * `batch` - Input batch, owned by the caller for the duration of the call
    ///
    /// # Returns
    ///
    /// The processed batch
    fn process(&self, batch: TraceBatch) -> Result<TraceBatch>;

    /// Returns the name of this processor for logging.
    fn name(&self) -> &str {
        "processor"
    }
}
