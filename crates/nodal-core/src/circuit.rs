//! Circuit graph representation.

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

use indexmap::IndexMap;
use log::trace;

use crate::component::{Component, ComponentId, ComponentKind};
use crate::error::{Error, Result};
use crate::mna::{self, EquationIndex, MnaSystem};
use crate::node::{Node, NodeId, Polarity};
use crate::params::Parameters;

static NEXT_CIRCUIT_ID: AtomicU32 = AtomicU32::new(1);

/// Process-unique identity of a circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CircuitId(pub(crate) u32);

impl CircuitId {
    fn next() -> Self {
        CircuitId(NEXT_CIRCUIT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for CircuitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a name in the circuit refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    Node(NodeId),
    Component(ComponentId),
}

impl Entity {
    fn category(self) -> &'static str {
        match self {
            Entity::Node(_) => "node",
            Entity::Component(_) => "component",
        }
    }
}

/// A circuit containing nodes and the components between them.
///
/// The circuit is the sole owner of both. Nodes and components refer to each
/// other through [`NodeId`] and [`ComponentId`] handles, and every name is
/// unique across the combined node and component namespace.
#[derive(Debug)]
pub struct Circuit {
    id: CircuitId,
    name: Option<String>,
    nodes: Vec<Node>,
    components: Vec<Component>,
    /// Every node and component name, in insertion order.
    names: IndexMap<String, Entity>,
}

impl Default for Circuit {
    fn default() -> Self {
        Self::new()
    }
}

impl Circuit {
    /// Create a new empty circuit.
    pub fn new() -> Self {
        Self {
            id: CircuitId::next(),
            name: None,
            nodes: Vec::new(),
            components: Vec::new(),
            names: IndexMap::new(),
        }
    }

    /// Create a new empty circuit with a name.
    pub fn with_name(name: impl Into<String>) -> Self {
        let mut circuit = Self::new();
        circuit.name = Some(name.into());
        circuit
    }

    pub fn id(&self) -> CircuitId {
        self.id
    }

    /// Get the circuit name.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Set the circuit name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// Add a node to the circuit, claiming ownership of it.
    ///
    /// Fails if the node already belongs to a circuit or if its name is taken.
    pub fn add_node(&mut self, mut node: Node) -> Result<NodeId> {
        if let Some(owner) = node.owner() {
            return Err(Error::CircuitMembership(format!(
                "node {} already belongs to circuit {}",
                node.name(),
                owner
            )));
        }
        self.check_name(node.name())?;

        let id = NodeId {
            circuit: self.id,
            index: self.nodes.len() as u32,
        };
        node.claim(self.id);
        trace!("circuit {}: added {} as {}", self.id, node.name(), id);
        self.names.insert(node.name().to_string(), Entity::Node(id));
        self.nodes.push(node);
        Ok(id)
    }

    /// Place a component between two nodes of this circuit.
    ///
    /// Checks run in order: negative terminal membership, positive terminal
    /// membership, name uniqueness. Nothing is modified unless all pass.
    pub fn add_component(
        &mut self,
        name: impl Into<String>,
        kind: ComponentKind,
        negative: NodeId,
        positive: NodeId,
    ) -> Result<ComponentId> {
        let name = name.into();
        self.check_member(negative)?;
        self.check_member(positive)?;
        self.check_name(&name)?;

        let id = ComponentId {
            circuit: self.id,
            index: self.components.len() as u32,
        };
        self.nodes[negative.index()].add_connection(id, Polarity::Negative);
        self.nodes[positive.index()].add_connection(id, Polarity::Positive);
        trace!("circuit {}: added {} {} as {}", self.id, kind.tag(), name, id);
        self.names.insert(name.clone(), Entity::Component(id));
        self.components.push(Component::new(name, kind, negative, positive));
        Ok(id)
    }

    /// Add a resistor of `resistance` ohms.
    pub fn add_resistor(
        &mut self,
        name: impl Into<String>,
        negative: NodeId,
        positive: NodeId,
        resistance: f64,
    ) -> Result<ComponentId> {
        self.add_component(name, ComponentKind::Resistor { resistance }, negative, positive)
    }

    /// Add a capacitor of `capacitance` farads.
    pub fn add_capacitor(
        &mut self,
        name: impl Into<String>,
        negative: NodeId,
        positive: NodeId,
        capacitance: f64,
    ) -> Result<ComponentId> {
        self.add_component(name, ComponentKind::Capacitor { capacitance }, negative, positive)
    }

    /// Add an inductor of `inductance` henries.
    pub fn add_inductor(
        &mut self,
        name: impl Into<String>,
        negative: NodeId,
        positive: NodeId,
        inductance: f64,
    ) -> Result<ComponentId> {
        self.add_component(name, ComponentKind::Inductor { inductance }, negative, positive)
    }

    /// Add a voltage source raising `positive` to `voltage` volts above `negative`.
    pub fn add_voltage_source(
        &mut self,
        name: impl Into<String>,
        negative: NodeId,
        positive: NodeId,
        voltage: f64,
    ) -> Result<ComponentId> {
        self.add_component(name, ComponentKind::VoltageSource { voltage }, negative, positive)
    }

    /// Add a current source driving `current` amperes from `negative` to `positive`.
    pub fn add_current_source(
        &mut self,
        name: impl Into<String>,
        negative: NodeId,
        positive: NodeId,
        current: f64,
    ) -> Result<ComponentId> {
        self.add_component(name, ComponentKind::CurrentSource { current }, negative, positive)
    }

    /// Get a node by handle.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        if id.circuit != self.id {
            return None;
        }
        self.nodes.get(id.index())
    }

    /// Get a component by handle.
    pub fn component(&self, id: ComponentId) -> Option<&Component> {
        if id.circuit != self.id {
            return None;
        }
        self.components.get(id.index())
    }

    /// Resolve a name to the node or component carrying it.
    pub fn lookup(&self, name: &str) -> Option<Entity> {
        self.names.get(name).copied()
    }

    /// Resolve a node name to its handle.
    pub fn node_id(&self, name: &str) -> Result<NodeId> {
        match self.lookup(name) {
            Some(Entity::Node(id)) => Ok(id),
            Some(other) => Err(Error::TypeMismatch {
                name: name.to_string(),
                expected: "node",
                found: other.category(),
            }),
            None => Err(Error::UnknownEntity(name.to_string())),
        }
    }

    /// Resolve a component name to its handle.
    pub fn component_id(&self, name: &str) -> Result<ComponentId> {
        match self.lookup(name) {
            Some(Entity::Component(id)) => Ok(id),
            Some(other) => Err(Error::TypeMismatch {
                name: name.to_string(),
                expected: "component",
                found: other.category(),
            }),
            None => Err(Error::UnknownEntity(name.to_string())),
        }
    }

    /// All nodes in insertion order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// All components in insertion order.
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Handles of all nodes in insertion order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len() as u32).map(|index| NodeId {
            circuit: self.id,
            index,
        })
    }

    /// Handles of all components in insertion order.
    pub fn component_ids(&self) -> impl Iterator<Item = ComponentId> + '_ {
        (0..self.components.len() as u32).map(|index| ComponentId {
            circuit: self.id,
            index,
        })
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Check whether at least one node is grounded.
    pub fn has_ground(&self) -> bool {
        self.nodes.iter().any(Node::is_ground)
    }

    /// Assemble the MNA system for this circuit under `params`.
    ///
    /// See [`mna::assemble`].
    pub fn assemble_mna(&self, params: &Parameters) -> Result<(MnaSystem, EquationIndex)> {
        mna::assemble(self, params)
    }

    /// Name used in diagnostics: the circuit name, or its id when unnamed.
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => self.id.to_string(),
        }
    }

    fn check_member(&self, id: NodeId) -> Result<()> {
        if self.node(id).is_none() {
            return Err(Error::CircuitMembership(format!(
                "{} does not belong to circuit {}",
                id,
                self.label()
            )));
        }
        Ok(())
    }

    fn check_name(&self, name: &str) -> Result<()> {
        if self.names.contains_key(name) {
            return Err(Error::DuplicateName(name.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_node_circuit() -> (Circuit, NodeId, NodeId) {
        let mut circuit = Circuit::with_name("Circ");
        let n0 = circuit.add_node(Node::ground("N0")).unwrap();
        let n1 = circuit.add_node(Node::new("N1", false)).unwrap();
        (circuit, n0, n1)
    }

    #[test]
    fn test_single_node_circuit() {
        let mut circuit = Circuit::with_name("Circ");
        circuit.add_node(Node::ground("ground node")).unwrap();

        assert_eq!(circuit.node_count(), 1);
        assert_eq!(circuit.component_count(), 0);
        assert!(circuit.has_ground());
    }

    #[test]
    fn test_multi_node_circuit() {
        let mut circuit = Circuit::new();
        circuit.add_node(Node::ground("ground node")).unwrap();
        circuit.add_node(Node::new("non-ground", false)).unwrap();

        assert_eq!(circuit.node_count(), 2);
        assert_eq!(circuit.component_count(), 0);
    }

    #[test]
    fn test_add_components_registers_connections() {
        let (mut circuit, n0, n1) = two_node_circuit();

        let r = circuit.add_resistor("R", n1, n0, 1000.0).unwrap();
        let v = circuit.add_voltage_source("V0", n0, n1, 5.0).unwrap();

        assert_eq!(circuit.component_count(), 2);
        let ground = circuit.node(n0).unwrap();
        assert_eq!(ground.positive_connections(), &[r]);
        assert_eq!(ground.negative_connections(), &[v]);
        let node = circuit.node(n1).unwrap();
        assert_eq!(node.positive_connections(), &[v]);
        assert_eq!(node.negative_connections(), &[r]);

        let comp = circuit.component(v).unwrap();
        assert_eq!(comp.name(), "V0");
        assert_eq!(comp.negative_terminal(), n0);
        assert_eq!(comp.positive_terminal(), n1);
        assert_eq!(comp.kind().tag(), "voltage_source");
    }

    #[test]
    fn test_foreign_node_rejected_without_mutation() {
        let (mut circuit, n0, _) = two_node_circuit();
        let mut other = Circuit::new();
        let stranger = other.add_node(Node::new("non-ground", false)).unwrap();

        let err = circuit.add_resistor("R", stranger, n0, 1000.0).unwrap_err();
        assert!(matches!(err, Error::CircuitMembership(_)));

        assert_eq!(circuit.component_count(), 0);
        assert!(circuit.node(n0).unwrap().positive_connections().is_empty());
        assert!(other.node(stranger).unwrap().negative_connections().is_empty());
        assert!(circuit.lookup("R").is_none());
    }

    #[test]
    fn test_membership_checked_before_name() {
        let (mut circuit, n0, n1) = two_node_circuit();
        circuit.add_resistor("R1", n0, n1, 10.0).unwrap();
        let stranger = Circuit::new().add_node(Node::new("x", false)).unwrap();

        let err = circuit.add_resistor("R1", n0, stranger, 10.0).unwrap_err();
        assert!(matches!(err, Error::CircuitMembership(_)));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let (mut circuit, n0, n1) = two_node_circuit();

        let err = circuit.add_node(Node::new("N1", true)).unwrap_err();
        assert!(matches!(err, Error::DuplicateName(ref n) if n == "N1"));

        let err = circuit.add_resistor("N0", n0, n1, 1.0).unwrap_err();
        assert!(matches!(err, Error::DuplicateName(ref n) if n == "N0"));

        circuit.add_capacitor("C1", n0, n1, 1e-6).unwrap();
        let err = circuit.add_node(Node::new("C1", false)).unwrap_err();
        assert!(matches!(err, Error::DuplicateName(ref n) if n == "C1"));
        assert!(circuit.node(n1).unwrap().positive_connections().len() == 1);
    }

    #[test]
    fn test_owned_node_cannot_join_another_circuit() {
        let (circuit, _, n1) = two_node_circuit();
        let copy = circuit.node(n1).unwrap().clone();

        let mut other = Circuit::new();
        let err = other.add_node(copy).unwrap_err();
        assert!(matches!(err, Error::CircuitMembership(_)));
        assert_eq!(other.node_count(), 0);
    }

    #[test]
    fn test_lookup_by_name() {
        let (mut circuit, n0, n1) = two_node_circuit();
        let l = circuit.add_inductor("L1", n0, n1, 1e-3).unwrap();

        assert_eq!(circuit.lookup("N1"), Some(Entity::Node(n1)));
        assert_eq!(circuit.lookup("L1"), Some(Entity::Component(l)));
        assert_eq!(circuit.node_id("N0").unwrap(), n0);
        assert_eq!(circuit.component_id("L1").unwrap(), l);

        assert!(matches!(
            circuit.node_id("L1"),
            Err(Error::TypeMismatch { expected: "node", found: "component", .. })
        ));
        assert!(matches!(
            circuit.component_id("N0"),
            Err(Error::TypeMismatch { expected: "component", found: "node", .. })
        ));
        assert!(matches!(circuit.node_id("missing"), Err(Error::UnknownEntity(_))));
    }

    #[test]
    fn test_handles_are_circuit_scoped() {
        let (circuit, n0, _) = two_node_circuit();
        let other = Circuit::new();
        assert!(other.node(n0).is_none());
        assert_ne!(circuit.id(), other.id());
        assert_eq!(circuit.node_ids().collect::<Vec<_>>()[0], n0);
    }

    #[test]
    fn test_circuit_label() {
        let named = Circuit::with_name("Filter");
        assert_eq!(named.label(), "Filter");
        let unnamed = Circuit::new();
        assert_eq!(unnamed.label(), unnamed.id().to_string());
    }
}
