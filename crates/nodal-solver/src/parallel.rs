//! Parallel frequency sweeps using rayon.
//!
//! Every frequency point assembles and solves its own system against a
//! shared `&Circuit`, so points are independent and map directly onto
//! rayon's work-stealing pool. Results come back in sweep order.

use log::info;
use nodal_core::{Circuit, Parameters};
use rayon::prelude::*;

use crate::ac::{AcParams, AcSweepResult, generate_frequencies, solve_ac, solve_at_frequency};
use crate::error::Result;

/// Configuration for parallel sweep execution.
#[derive(Debug, Clone)]
pub struct ParallelSweepConfig {
    /// Minimum points to use parallel execution (below this, sequential is faster).
    pub min_points_for_parallel: usize,
}

impl Default for ParallelSweepConfig {
    fn default() -> Self {
        Self {
            min_points_for_parallel: 4,
        }
    }
}

impl ParallelSweepConfig {
    /// Create config with minimum parallel threshold.
    pub fn with_min_parallel(mut self, min: usize) -> Self {
        self.min_points_for_parallel = min;
        self
    }
}

/// Parallel counterpart of [`solve_ac`].
///
/// Falls back to the sequential sweep when there are fewer than
/// `config.min_points_for_parallel` points or only one rayon thread.
pub fn solve_ac_parallel(
    circuit: &Circuit,
    base: &Parameters,
    ac_params: &AcParams,
    config: &ParallelSweepConfig,
) -> Result<AcSweepResult> {
    let frequencies = generate_frequencies(ac_params)?;

    let use_parallel =
        frequencies.len() >= config.min_points_for_parallel && rayon::current_num_threads() > 1;
    if !use_parallel {
        return solve_ac(circuit, base, ac_params);
    }

    info!(
        "parallel AC sweep of {}: {} points, {} threads",
        circuit.label(),
        frequencies.len(),
        rayon::current_num_threads()
    );

    let points = frequencies
        .par_iter()
        .map(|&f| solve_at_frequency(circuit, base, f))
        .collect::<Result<Vec<_>>>()?;

    Ok(AcSweepResult { points })
}
