//! The CPU-bound workload both demo triggers execute.
//!
//! The work is a fixed triple loop accumulating a running sum. It exists to
//! occupy the single logical thread for a noticeable stretch; only its
//! completion matters, never its value.

use std::hint::black_box;

/// Iteration bound of the outermost counter.
pub const OUTER_ITERATIONS: u64 = 1000;
/// Iteration bound of the middle counter.
pub const MIDDLE_ITERATIONS: u64 = 700;
/// Iteration bound of the innermost counter.
pub const INNER_ITERATIONS: u64 = 300;

/// The sum `run_cpu_bound_work` produces for the fixed bounds above.
///
/// Closed form: `300*700*Σi + 1000*300*Σj + 1000*700*Σk` for the three
/// half-open counter ranges.
pub const EXPECTED_SUM: u64 = 209_685_000_000;

/// Run a fixed, deterministic amount of arithmetic work and return the
/// accumulated sum.
///
/// Pure function of the constant bounds: no side effects, no failure path,
/// and no overflow risk in `u64` at this magnitude. The result is routed
/// through [`black_box`] so the optimizer cannot elide the loops; callers
/// discard the value.
///
/// # Examples
///
/// ```
/// use yieldpoint::work::{run_cpu_bound_work, EXPECTED_SUM};
///
/// assert_eq!(run_cpu_bound_work(), EXPECTED_SUM);
/// ```
#[must_use]
pub fn run_cpu_bound_work() -> u64 {
    let mut result: u64 = 0;
    for i in 0..OUTER_ITERATIONS {
        for j in 0..MIDDLE_ITERATIONS {
            for k in 0..INNER_ITERATIONS {
                result += i + j + k;
            }
        }
    }
    black_box(result)
}
