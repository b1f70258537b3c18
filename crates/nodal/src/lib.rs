//! # Nodal
//!
//! A linear AC circuit solver built on modified nodal analysis.
//!
//! Nodal provides:
//! - Circuits of named nodes and two-terminal components
//! - Resistors, capacitors, inductors, voltage and current sources
//! - Single-frequency AC solutions and linear/decade/octave sweeps
//! - JSON circuit files
//!
//! ## Quick Start
//!
//! ```rust
//! use nodal::prelude::*;
//!
//! let mut circuit = Circuit::with_name("divider");
//! let gnd = circuit.add_node(Node::ground("gnd")).unwrap();
//! let top = circuit.add_node(Node::new("top", false)).unwrap();
//! let mid = circuit.add_node(Node::new("mid", false)).unwrap();
//! circuit.add_voltage_source("V1", gnd, top, 10.0).unwrap();
//! circuit.add_resistor("R1", mid, top, 1e3).unwrap();
//! circuit.add_resistor("R2", gnd, mid, 1e3).unwrap();
//!
//! let solution = solve_ac_point(&circuit, &Parameters::with_frequency(1e3)).unwrap();
//! assert!((solution.voltage("mid").unwrap() - 5.0).abs() < 1e-9);
//! ```
//!
//! ## Sweeps
//!
//! ```rust
//! use nodal::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut circuit = Circuit::with_name("rc");
//! let gnd = circuit.add_node(Node::ground("gnd"))?;
//! let input = circuit.add_node(Node::new("in", false))?;
//! let out = circuit.add_node(Node::new("out", false))?;
//! circuit.add_voltage_source("V1", gnd, input, 1.0)?;
//! circuit.add_resistor("R1", out, input, 1e3)?;
//! circuit.add_capacitor("C1", gnd, out, 1e-7)?;
//!
//! let ac_params = AcParams {
//!     sweep_type: AcSweepType::Decade,
//!     num_points: 10,
//!     fstart: 1.0,
//!     fstop: 1e6,
//! };
//! let sweep = solve_ac(&circuit, &Parameters::new(), &ac_params)?;
//! let trace = sweep.trace("out").unwrap_or_default();
//! assert_eq!(trace.len(), 61);
//! for (f, v) in trace {
//!     println!("{f:>12.3e} {v:>12.6}");
//! }
//! # Ok(())
//! # }
//! ```

pub use nodal_core as core;
pub use nodal_netfile as netfile;
pub use nodal_solver as solver;

pub use nodal_core::{
    Circuit, CircuitId, CircuitRecord, Component, ComponentId, ComponentKind, ComponentRecord,
    Entity, Node, NodeId, NodeRecord, Parameters, Polarity,
};

pub use nodal_solver::{
    AcParams, AcPoint, AcSolution, AcSweepResult, AcSweepType, ParallelSweepConfig, solve_ac,
    solve_ac_parallel, solve_ac_point,
};

/// Commonly used types and functions.
pub mod prelude {
    pub use nodal_core::{Circuit, ComponentKind, Node, NodeId, Parameters};
    pub use nodal_solver::{
        AcParams, AcSolution, AcSweepType, solve_ac, solve_ac_parallel, solve_ac_point,
    };
}
