/// Batch compression over a bounded worker pool.
///
/// `compress_batch` fans out over the accepted inputs, preserves their order
/// in the returned vector, converts per-file failures into error-tagged
/// entries, and reports fractional progress after every completion.
use crate::constants::{DEFAULT_MAX_WORKERS, MIN_AVAILABLE_MEMORY_MIB};
use crate::engine::{CompressionResult, Compressor, SourceImage};
use crate::error::{CompressionError, Result};
use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use sysinfo::{MemoryRefreshKind, RefreshKind, System};

/// One slot of a batch result, positionally aligned with the accepted input.
#[derive(Debug, Clone)]
pub enum BatchEntry {
    Compressed(CompressionResult),
    Failed { name: String, error: String },
}

impl BatchEntry {
    pub fn is_failed(&self) -> bool {
        matches!(self, BatchEntry::Failed { .. })
    }

    pub fn name(&self) -> &str {
        match self {
            BatchEntry::Compressed(result) => &result.output_name,
            BatchEntry::Failed { name, .. } => name,
        }
    }

    pub fn result(&self) -> Option<&CompressionResult> {
        match self {
            BatchEntry::Compressed(result) => Some(result),
            BatchEntry::Failed { .. } => None,
        }
    }
}

/// Progress callback: fraction of completed files in `(0, 1]` plus the entry
/// that just finished. Invoked from worker threads, completion order.
pub type ProgressFn<'a> = dyn Fn(f64, &BatchEntry) + Send + Sync + 'a;

impl Compressor {
    /// Compress a set of images in parallel.
    ///
    /// Non-image inputs are filtered out up front and do not appear in the
    /// result. A file failing mid-pipeline becomes a [`BatchEntry::Failed`]
    /// at its original index; only an empty call (`EmptyBatch`) or a call
    /// with nothing image-typed left (`NoValidInput`) fails as a whole.
    ///
    /// Work may complete in any order; the returned vector always lines up
    /// with the accepted inputs.
    pub fn compress_batch(
        &self,
        sources: &[SourceImage],
        on_progress: Option<&ProgressFn>,
    ) -> Result<Vec<BatchEntry>> {
        if sources.is_empty() {
            return Err(CompressionError::EmptyBatch);
        }

        let accepted: Vec<&SourceImage> = sources.iter().filter(|s| s.is_image()).collect();
        if accepted.is_empty() {
            return Err(CompressionError::NoValidInput);
        }

        let total = accepted.len();
        let workers = self.worker_count(&accepted);
        let completed = AtomicUsize::new(0);

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .build()
            .expect("Failed to build Rayon thread pool");

        let entries: Vec<BatchEntry> = pool.install(|| {
            accepted
                .par_iter()
                .map(|source| {
                    let entry = match self.compress(source) {
                        Ok(result) => BatchEntry::Compressed(result),
                        Err(e) => BatchEntry::Failed {
                            name: source.name.clone(),
                            error: e.to_string(),
                        },
                    };

                    if let Some(cb) = on_progress {
                        let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
                        cb(done as f64 / total as f64, &entry);
                    }

                    entry
                })
                .collect()
        });

        Ok(entries)
    }

    /// Pick the fan-out width for a batch.
    ///
    /// An explicit override wins. Otherwise the pool is bounded by the
    /// logical CPU count, a hard ceiling, the batch size, and a cap derived
    /// from available memory against the average decode estimate.
    fn worker_count(&self, accepted: &[&SourceImage]) -> usize {
        if let Some(workers) = self.config().workers {
            return workers.max(1);
        }

        let baseline = num_cpus::get()
            .min(DEFAULT_MAX_WORKERS)
            .min(accepted.len())
            .max(1);

        let total_estimate_mib: f64 = accepted.iter().map(|s| decode_estimate_mib(s)).sum();
        let avg_per_file_mib = ((total_estimate_mib / accepted.len() as f64).ceil() as u64).max(1);

        // sysinfo 0.30+ returns bytes. Convert to MiB.
        let mut sys =
            System::new_with_specifics(RefreshKind::new().with_memory(MemoryRefreshKind::new()));
        sys.refresh_memory();
        let available_mib = sys.available_memory() / (1024 * 1024);

        let mem_cap = (available_mib.saturating_sub(MIN_AVAILABLE_MEMORY_MIB) / avg_per_file_mib)
            .clamp(1, baseline as u64) as usize;

        baseline.min(mem_cap)
    }
}

/// Conservative decoded-size estimate in MiB for a source still in its
/// container format.
fn decode_estimate_mib(source: &SourceImage) -> f64 {
    let size_mib = source.size() as f64 / (1024.0 * 1024.0);
    let multiplier = source
        .image_type()
        .map(|ty| ty.decode_memory_multiplier())
        .unwrap_or(3.0);
    size_mib * multiplier
}
