//! Linear solve and AC analysis for nodal.
//!
//! This crate provides:
//! - Dense LU solution of the assembled MNA system
//! - Single-point AC steady-state analysis
//! - Linear/decade/octave frequency sweeps, sequential or parallel

pub mod ac;
pub mod error;
pub mod linear;
pub mod parallel;

pub use ac::{
    AcParams, AcPoint, AcSolution, AcSweepResult, AcSweepType, generate_frequencies, solve_ac,
    solve_ac_point,
};
pub use error::{Error, Result};
pub use linear::solve_dense;
pub use parallel::{ParallelSweepConfig, solve_ac_parallel};
