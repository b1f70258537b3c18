//! Core circuit representation and MNA assembly for nodal.
//!
//! This crate provides the circuit graph (nodes, two-terminal components and
//! the handles linking them), the component models and their branch
//! equations, and assembly of the Modified Nodal Analysis (MNA) system that
//! `nodal-solver` solves.

pub mod circuit;
pub mod component;
pub mod error;
pub mod mna;
pub mod node;
pub mod params;
pub mod record;

pub use circuit::{Circuit, CircuitId, Entity};
pub use component::{Coefficients, Component, ComponentId, ComponentKind};
pub use error::{Error, Result};
pub use mna::{EquationIndex, MnaSystem};
pub use node::{Node, NodeId, Polarity};
pub use params::Parameters;
pub use record::{CircuitRecord, ComponentRecord, NodeRecord};
