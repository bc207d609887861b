//! Runtime switch for the optional rayon code paths.
//!
//! With the `parallel` feature enabled, leaf hashing and level pairing fan out
//! over rayon once a batch is large enough. The switch lets callers (and the
//! equivalence tests) force the sequential path for a scope.

#[cfg(feature = "parallel")]
use std::sync::atomic::{AtomicBool, Ordering};

#[cfg(feature = "parallel")]
static PARALLEL_ENABLED: AtomicBool = AtomicBool::new(true);

/// Batches smaller than this are always processed sequentially.
pub const PARALLEL_THRESHOLD: usize = 256;

/// Minimum number of items handed to a single rayon task.
const MIN_CHUNK: usize = 64;

/// Preferred per-task chunk length for a batch of `total_items`.
pub fn preferred_chunk_size(total_items: usize) -> usize {
    MIN_CHUNK.min(total_items.max(1))
}

/// Returns whether a batch of `items` should take the rayon path.
pub fn should_parallelize(items: usize) -> bool {
    parallelism_enabled() && items >= PARALLEL_THRESHOLD
}

#[cfg(feature = "parallel")]
pub fn parallelism_enabled() -> bool {
    PARALLEL_ENABLED.load(Ordering::SeqCst)
}

#[cfg(not(feature = "parallel"))]
pub fn parallelism_enabled() -> bool {
    false
}

/// Sets the switch and returns a guard restoring the previous value on drop.
#[cfg(feature = "parallel")]
pub fn set_parallelism(enabled: bool) -> ParallelismGuard {
    let previous = PARALLEL_ENABLED.swap(enabled, Ordering::SeqCst);
    ParallelismGuard { previous }
}

#[cfg(not(feature = "parallel"))]
pub fn set_parallelism(_enabled: bool) -> ParallelismGuard {
    ParallelismGuard {}
}

pub struct ParallelismGuard {
    #[cfg(feature = "parallel")]
    previous: bool,
}

#[cfg(feature = "parallel")]
impl Drop for ParallelismGuard {
    fn drop(&mut self) {
        PARALLEL_ENABLED.store(self.previous, Ordering::SeqCst);
    }
}
