//! Modified Nodal Analysis (MNA) matrix structures and assembly.

use log::{debug, trace};
use nalgebra::{DMatrix, DVector};

use crate::circuit::{Circuit, CircuitId};
use crate::component::ComponentId;
use crate::error::{Error, Result};
use crate::node::NodeId;
use crate::params::Parameters;

/// MNA system: Ax = b
///
/// The unknown vector holds one voltage per node followed by one branch
/// current per component. Row `k` is the equation contributed by the entity
/// whose unknown sits in slot `k`.
#[derive(Debug, Clone)]
pub struct MnaSystem {
    /// The coefficient matrix.
    pub matrix: DMatrix<f64>,
    /// The right-hand side vector.
    pub rhs: DVector<f64>,
    /// Number of node voltage unknowns.
    pub num_nodes: usize,
    /// Number of branch current unknowns.
    pub num_components: usize,
}

impl MnaSystem {
    /// Create a zeroed system with the given dimensions.
    pub fn new(num_nodes: usize, num_components: usize) -> Self {
        let size = num_nodes + num_components;
        Self {
            matrix: DMatrix::zeros(size, size),
            rhs: DVector::zeros(size),
            num_nodes,
            num_components,
        }
    }

    /// Get the total size of the system (nodes + branch currents).
    pub fn size(&self) -> usize {
        self.num_nodes + self.num_components
    }

    /// Overwrite a single coefficient.
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.matrix[(row, col)] = value;
    }

    /// Overwrite a right-hand side entry.
    pub fn set_rhs(&mut self, row: usize, value: f64) {
        self.rhs[row] = value;
    }

    /// Pin the unknown in slot `row` to zero: `x[row] = 0`.
    pub fn pin(&mut self, row: usize) {
        self.matrix[(row, row)] = 1.0;
        self.rhs[row] = 0.0;
    }

    /// Get a reference to the coefficient matrix.
    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }

    /// Get a reference to the RHS vector.
    pub fn rhs(&self) -> &DVector<f64> {
        &self.rhs
    }
}

/// Equation slot assignment for one assembly pass.
///
/// Nodes take slots `0..N` in insertion order, components take `N..N+M` in
/// insertion order. The map is derived fresh for every pass and never stored
/// on the circuit, so concurrent sweeps over a shared `&Circuit` do not
/// interfere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EquationIndex {
    circuit: CircuitId,
    num_nodes: usize,
    num_components: usize,
}

impl EquationIndex {
    /// Assign slots to every node and component of `circuit`.
    pub fn assign(circuit: &Circuit) -> Self {
        Self {
            circuit: circuit.id(),
            num_nodes: circuit.node_count(),
            num_components: circuit.component_count(),
        }
    }

    /// Slot of a node's voltage and KCL row.
    pub fn node(&self, id: NodeId) -> Option<usize> {
        (id.circuit == self.circuit && id.index() < self.num_nodes).then_some(id.index())
    }

    /// Slot of a component's branch current and V-I row.
    pub fn component(&self, id: ComponentId) -> Option<usize> {
        (id.circuit == self.circuit && id.index() < self.num_components)
            .then_some(self.num_nodes + id.index())
    }

    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    pub fn num_components(&self) -> usize {
        self.num_components
    }

    /// Total number of unknowns.
    pub fn size(&self) -> usize {
        self.num_nodes + self.num_components
    }
}

/// Assemble the MNA system for `circuit`.
///
/// Node rows:
/// - ground: `V = 0`
/// - otherwise KCL: `+1` for each component attached by its negative
///   terminal, `-1` for each attached by its positive terminal
///
/// Component rows are the branch equation `A·(Vp - Vn) + B·I = C`, with the
/// voltage term of a grounded terminal dropped. A component with both
/// terminals grounded gets `I = 0`.
pub fn assemble(circuit: &Circuit, params: &Parameters) -> Result<(MnaSystem, EquationIndex)> {
    if !circuit.has_ground() {
        return Err(Error::NoGroundNode(circuit.label()));
    }

    let index = EquationIndex::assign(circuit);
    let mut mna = MnaSystem::new(index.num_nodes(), index.num_components());
    debug!(
        "assembling {}: {} nodes, {} components, {}x{} system",
        circuit.label(),
        index.num_nodes(),
        index.num_components(),
        index.size(),
        index.size()
    );

    let nodes = circuit.nodes();

    for (row, node) in nodes.iter().enumerate() {
        if node.is_ground() {
            mna.pin(row);
            trace!("row {row}: {} pinned to ground", node.name());
            continue;
        }

        for &id in node.negative_connections() {
            mna.set(row, index.num_nodes() + id.index(), 1.0);
        }
        for &id in node.positive_connections() {
            mna.set(row, index.num_nodes() + id.index(), -1.0);
        }
        mna.set_rhs(row, 0.0);
        trace!(
            "row {row}: KCL at {} ({} in, {} out)",
            node.name(),
            node.negative_connections().len(),
            node.positive_connections().len()
        );
    }

    for (offset, component) in circuit.components().iter().enumerate() {
        let row = index.num_nodes() + offset;
        let coeffs = component.coefficients(params)?;

        let neg = component.negative_terminal().index();
        let pos = component.positive_terminal().index();

        match (nodes[neg].is_ground(), nodes[pos].is_ground()) {
            (true, true) => {
                mna.pin(row);
            }
            (true, false) => {
                mna.set(row, pos, coeffs.a);
                mna.set(row, row, coeffs.b);
                mna.set_rhs(row, coeffs.c);
            }
            (false, true) => {
                mna.set(row, neg, -coeffs.a);
                mna.set(row, row, coeffs.b);
                mna.set_rhs(row, coeffs.c);
            }
            (false, false) => {
                mna.set(row, pos, coeffs.a);
                mna.set(row, neg, -coeffs.a);
                mna.set(row, row, coeffs.b);
                mna.set_rhs(row, coeffs.c);
            }
        }
        trace!(
            "row {row}: {} {} a={} b={} c={}",
            component.kind().tag(),
            component.name(),
            coeffs.a,
            coeffs.b,
            coeffs.c
        );
    }

    Ok((mna, index))
}
