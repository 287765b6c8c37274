//! Lookup-per-call versus resolve-once timing

use imgops_image::RealType;
use imgops_special::{ComputerHandle, OpService, ResolutionError, UnaryComputerOp};
use serde::{Deserialize, Serialize};
use std::hint::black_box;
use std::time::{Duration, Instant};

/// Wall-clock comparison of the two ways to call an add
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimingReport {
    /// Calls made on each side
    pub repetitions: usize,
    /// Total time resolving and running on every call, in milliseconds
    pub slow_ms: f64,
    /// Total time running the handle resolved once, in milliseconds
    pub fast_ms: f64,
}

impl TimingReport {
    /// Build a report from measured durations
    #[must_use]
    pub fn new(repetitions: usize, slow: Duration, fast: Duration) -> Self {
        Self {
            repetitions,
            slow_ms: slow.as_secs_f64() * 1e3,
            fast_ms: fast.as_secs_f64() * 1e3,
        }
    }

    /// How many times faster the cached handle was
    ///
    /// Infinite when the cached side was below timer resolution.
    #[must_use]
    pub fn speedup(&self) -> f64 {
        if self.fast_ms > 0.0 {
            self.slow_ms / self.fast_ms
        } else {
            f64::INFINITY
        }
    }
}

/// Time `repetitions` calls of `ops.math().add` against the same number of
/// calls to `cached`
///
/// Both sides add `constant` to `input`; `cached` is expected to be an add
/// resolved with that constant.
///
/// # Errors
/// Returns [`ResolutionError`] if the per-call lookup fails
pub fn compare_lookup_vs_cached<T: RealType>(
    ops: &OpService,
    cached: &ComputerHandle<T, T>,
    input: T,
    constant: f64,
    repetitions: usize,
) -> Result<TimingReport, ResolutionError> {
    let mut output = T::default();

    let start = Instant::now();
    for _ in 0..repetitions {
        ops.math()
            .add(black_box(&mut output), black_box(&input), constant)?;
    }
    let mid = Instant::now();
    for _ in 0..repetitions {
        cached.compute(black_box(&input), black_box(&mut output));
    }
    let end = Instant::now();

    tracing::trace!(%output, "timing loops finished");
    Ok(TimingReport::new(repetitions, mid - start, end - mid))
}
