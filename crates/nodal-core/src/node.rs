//! Node representation for circuit graphs.

use std::fmt;

use crate::circuit::CircuitId;
use crate::component::ComponentId;

/// Handle to a node owned by a [`Circuit`](crate::Circuit).
///
/// Handles are only meaningful for the circuit that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    pub(crate) circuit: CircuitId,
    pub(crate) index: u32,
}

impl NodeId {
    /// The circuit that issued this handle.
    pub fn circuit(self) -> CircuitId {
        self.circuit
    }

    /// Position of the node in its circuit's insertion order.
    pub fn index(self) -> usize {
        self.index as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node #{} of circuit {}", self.index, self.circuit)
    }
}

/// Which terminal of a component a node is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Polarity {
    Positive,
    Negative,
}

/// A node in the circuit graph.
///
/// A node is created standalone and becomes part of a circuit through
/// [`Circuit::add_node`](crate::Circuit::add_node), which claims it. The
/// connection lists only ever hold handles; the circuit owns the components.
#[derive(Debug, Clone)]
pub struct Node {
    name: String,
    ground: bool,
    /// Components whose positive terminal is this node.
    positive: Vec<ComponentId>,
    /// Components whose negative terminal is this node.
    negative: Vec<ComponentId>,
    owner: Option<CircuitId>,
}

impl Node {
    /// Create a new unattached node.
    pub fn new(name: impl Into<String>, ground: bool) -> Self {
        Self {
            name: name.into(),
            ground,
            positive: Vec::new(),
            negative: Vec::new(),
            owner: None,
        }
    }

    /// Create a new unattached ground node.
    pub fn ground(name: impl Into<String>) -> Self {
        Self::new(name, true)
    }

    /// Get the node's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Check if this node is pinned to the zero-volt reference.
    pub fn is_ground(&self) -> bool {
        self.ground
    }

    /// Components attached with their positive terminal, in attachment order.
    pub fn positive_connections(&self) -> &[ComponentId] {
        &self.positive
    }

    /// Components attached with their negative terminal, in attachment order.
    pub fn negative_connections(&self) -> &[ComponentId] {
        &self.negative
    }

    /// The circuit that owns this node, if it has been added to one.
    pub fn owner(&self) -> Option<CircuitId> {
        self.owner
    }

    pub(crate) fn claim(&mut self, owner: CircuitId) {
        debug_assert!(self.owner.is_none());
        self.owner = Some(owner);
    }

    pub(crate) fn add_connection(&mut self, component: ComponentId, polarity: Polarity) {
        match polarity {
            Polarity::Positive => self.positive.push(component),
            Polarity::Negative => self.negative.push(component),
        }
    }
}
