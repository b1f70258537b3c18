//! Plain-data description of a circuit for persistence.
//!
//! A [`CircuitRecord`] names everything instead of holding handles, so it can
//! be serialized with serde and turned back into an equivalent [`Circuit`].

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::circuit::{Circuit, Entity};
use crate::component::ComponentKind;
use crate::error::{Error, Result};
use crate::node::{Node, NodeId};

/// A whole circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub nodes: Vec<NodeRecord>,
    #[serde(default)]
    pub components: Vec<ComponentRecord>,
}

/// A node and its ground flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub name: String,
    #[serde(default)]
    pub ground: bool,
}

/// A component, its terminals by node name and its model attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentRecord {
    pub name: String,
    /// Model tag, see [`ComponentKind::tag`].
    pub kind: String,
    pub negative: String,
    pub positive: String,
    pub attributes: IndexMap<String, f64>,
}

impl Circuit {
    /// Describe this circuit as a record.
    pub fn to_record(&self) -> CircuitRecord {
        let node_name = |id: NodeId| self.nodes()[id.index()].name().to_string();

        CircuitRecord {
            name: self.name().map(str::to_string),
            nodes: self
                .nodes()
                .iter()
                .map(|node| NodeRecord {
                    name: node.name().to_string(),
                    ground: node.is_ground(),
                })
                .collect(),
            components: self
                .components()
                .iter()
                .map(|component| ComponentRecord {
                    name: component.name().to_string(),
                    kind: component.kind().tag().to_string(),
                    negative: node_name(component.negative_terminal()),
                    positive: node_name(component.positive_terminal()),
                    attributes: component.kind().attributes(),
                })
                .collect(),
        }
    }

    /// Rebuild a circuit from a record.
    ///
    /// Nodes are added first, then components, through the same validated
    /// operations used when building a circuit by hand.
    pub fn from_record(record: &CircuitRecord) -> Result<Circuit> {
        let mut circuit = match &record.name {
            Some(name) => Circuit::with_name(name.clone()),
            None => Circuit::new(),
        };

        for node in &record.nodes {
            circuit.add_node(Node::new(node.name.clone(), node.ground))?;
        }

        for component in &record.components {
            let kind = ComponentKind::from_attributes(&component.kind, &component.attributes)?;
            let negative = terminal(&circuit, &component.negative)?;
            let positive = terminal(&circuit, &component.positive)?;
            circuit.add_component(component.name.clone(), kind, negative, positive)?;
        }

        Ok(circuit)
    }
}

fn terminal(circuit: &Circuit, name: &str) -> Result<NodeId> {
    match circuit.lookup(name) {
        Some(Entity::Node(id)) => Ok(id),
        Some(Entity::Component(_)) => Err(Error::TypeMismatch {
            name: name.to_string(),
            expected: "node",
            found: "component",
        }),
        None => Err(Error::CircuitMembership(format!(
            "node {} does not belong to circuit {}",
            name,
            circuit.label()
        ))),
    }
}
