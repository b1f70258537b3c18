//! Analysis runners for single-point and swept AC solutions.

pub mod ac;
pub mod point;

pub use ac::run_ac_sweep;
pub use point::run_ac_point;
