//! Two-terminal component models.
//!
//! Every component contributes one branch equation of the form
//!
//! ```text
//! A·V + B·I = C
//! ```
//!
//! where `V = V(positive) - V(negative)` and `I` is the branch current
//! flowing from the negative terminal to the positive terminal.

use std::f64::consts::PI;
use std::fmt;

use indexmap::IndexMap;

use crate::circuit::CircuitId;
use crate::error::{Error, Result};
use crate::node::NodeId;
use crate::params::Parameters;

/// Handle to a component owned by a [`Circuit`](crate::Circuit).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComponentId {
    pub(crate) circuit: CircuitId,
    pub(crate) index: u32,
}

impl ComponentId {
    /// The circuit that issued this handle.
    pub fn circuit(self) -> CircuitId {
        self.circuit
    }

    /// Position of the component in its circuit's insertion order.
    pub fn index(self) -> usize {
        self.index as usize
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "component #{} of circuit {}", self.index, self.circuit)
    }
}

/// Coefficients of a branch equation `A·V + B·I = C`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coefficients {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Coefficients {
    pub const fn new(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }
}

/// The closed set of component models.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ComponentKind {
    /// Resistance in ohms.
    Resistor { resistance: f64 },
    /// Capacitance in farads.
    Capacitor { capacitance: f64 },
    /// Inductance in henries.
    Inductor { inductance: f64 },
    /// Source voltage in volts.
    VoltageSource { voltage: f64 },
    /// Source current in amperes, flowing negative to positive.
    CurrentSource { current: f64 },
}

impl ComponentKind {
    /// Compute the branch equation coefficients under `params`.
    ///
    /// Reactive components need [`Parameters::FREQUENCY`]; its absence is
    /// reported as [`Error::MissingParameter`].
    pub fn coefficients(&self, params: &Parameters) -> Result<Coefficients> {
        let coeffs = match *self {
            ComponentKind::Resistor { resistance } => Coefficients::new(1.0, -resistance, 0.0),
            ComponentKind::Capacitor { capacitance } => {
                let f = params.require(Parameters::FREQUENCY)?;
                Coefficients::new(1.0, -1.0 / (2.0 * PI * f * capacitance), 0.0)
            }
            ComponentKind::Inductor { inductance } => {
                let f = params.require(Parameters::FREQUENCY)?;
                Coefficients::new(1.0, -2.0 * PI * f * inductance, 0.0)
            }
            ComponentKind::VoltageSource { voltage } => Coefficients::new(1.0, 0.0, voltage),
            ComponentKind::CurrentSource { current } => Coefficients::new(0.0, 1.0, current),
        };
        Ok(coeffs)
    }

    /// Stable lowercase tag used by the persisted representation.
    pub fn tag(&self) -> &'static str {
        match self {
            ComponentKind::Resistor { .. } => "resistor",
            ComponentKind::Capacitor { .. } => "capacitor",
            ComponentKind::Inductor { .. } => "inductor",
            ComponentKind::VoltageSource { .. } => "voltage_source",
            ComponentKind::CurrentSource { .. } => "current_source",
        }
    }

    /// The model's physical parameters keyed by attribute name.
    pub fn attributes(&self) -> IndexMap<String, f64> {
        let (key, value) = match *self {
            ComponentKind::Resistor { resistance } => ("resistance", resistance),
            ComponentKind::Capacitor { capacitance } => ("capacitance", capacitance),
            ComponentKind::Inductor { inductance } => ("inductance", inductance),
            ComponentKind::VoltageSource { voltage } => ("voltage", voltage),
            ComponentKind::CurrentSource { current } => ("current", current),
        };
        IndexMap::from([(key.to_string(), value)])
    }

    /// Rebuild a model from its tag and attribute map.
    pub fn from_attributes(tag: &str, attributes: &IndexMap<String, f64>) -> Result<Self> {
        let attr = |key: &str| {
            attributes
                .get(key)
                .copied()
                .ok_or_else(|| Error::MissingParameter(format!("{tag}.{key}")))
        };

        match tag {
            "resistor" => Ok(ComponentKind::Resistor {
                resistance: attr("resistance")?,
            }),
            "capacitor" => Ok(ComponentKind::Capacitor {
                capacitance: attr("capacitance")?,
            }),
            "inductor" => Ok(ComponentKind::Inductor {
                inductance: attr("inductance")?,
            }),
            "voltage_source" => Ok(ComponentKind::VoltageSource {
                voltage: attr("voltage")?,
            }),
            "current_source" => Ok(ComponentKind::CurrentSource {
                current: attr("current")?,
            }),
            other => Err(Error::UnknownComponentKind(other.to_string())),
        }
    }
}

/// A component placed in a circuit between two of its nodes.
#[derive(Debug, Clone)]
pub struct Component {
    name: String,
    kind: ComponentKind,
    negative: NodeId,
    positive: NodeId,
}

impl Component {
    pub(crate) fn new(
        name: String,
        kind: ComponentKind,
        negative: NodeId,
        positive: NodeId,
    ) -> Self {
        Self {
            name,
            kind,
            negative,
            positive,
        }
    }

    /// Get the component's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the component model.
    pub fn kind(&self) -> &ComponentKind {
        &self.kind
    }

    /// Node the branch current flows out of.
    pub fn negative_terminal(&self) -> NodeId {
        self.negative
    }

    /// Node the branch current flows into.
    pub fn positive_terminal(&self) -> NodeId {
        self.positive
    }

    /// See [`ComponentKind::coefficients`].
    pub fn coefficients(&self, params: &Parameters) -> Result<Coefficients> {
        self.kind.coefficients(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-12 * b.abs().max(1.0)
    }

    #[test]
    fn test_resistor_coefficients() {
        let r = ComponentKind::Resistor { resistance: 1e3 };
        let c = r.coefficients(&Parameters::new()).unwrap();
        assert_eq!(c, Coefficients::new(1.0, -1e3, 0.0));
    }

    #[test]
    fn test_capacitor_coefficients() {
        let cap = ComponentKind::Capacitor { capacitance: 1e-6 };
        let c = cap.coefficients(&Parameters::with_frequency(1e3)).unwrap();
        assert_eq!(c.a, 1.0);
        assert!(approx(c.b, -1.0 / (2.0 * PI * 1e-3)));
        assert_eq!(c.c, 0.0);
    }

    #[test]
    fn test_inductor_coefficients() {
        let ind = ComponentKind::Inductor { inductance: 1e-3 };
        let c = ind.coefficients(&Parameters::with_frequency(1e3)).unwrap();
        assert_eq!(c.a, 1.0);
        assert!(approx(c.b, -2.0 * PI));
        assert_eq!(c.c, 0.0);
    }

    #[test]
    fn test_source_coefficients() {
        let params = Parameters::new();
        let v = ComponentKind::VoltageSource { voltage: 5.0 };
        let i = ComponentKind::CurrentSource { current: -5e-3 };
        assert_eq!(v.coefficients(&params).unwrap(), Coefficients::new(1.0, 0.0, 5.0));
        assert_eq!(i.coefficients(&params).unwrap(), Coefficients::new(0.0, 1.0, -5e-3));
    }

    #[test]
    fn test_reactive_requires_frequency() {
        let params = Parameters::new().with("temperature", 300.0);
        for kind in [
            ComponentKind::Capacitor { capacitance: 1e-9 },
            ComponentKind::Inductor { inductance: 1e-3 },
        ] {
            let err = kind.coefficients(&params).unwrap_err();
            assert!(matches!(err, Error::MissingParameter(ref p) if p == "frequency"));
        }
    }

    #[test]
    fn test_attributes_round_trip() {
        let kind = ComponentKind::Inductor { inductance: 2.2e-3 };
        let attrs = kind.attributes();
        assert_eq!(attrs.get("inductance"), Some(&2.2e-3));
        assert_eq!(
            ComponentKind::from_attributes(kind.tag(), &attrs).unwrap(),
            kind
        );
    }

    #[test]
    fn test_from_attributes_errors() {
        let empty = IndexMap::new();
        assert!(matches!(
            ComponentKind::from_attributes("diode", &empty),
            Err(Error::UnknownComponentKind(ref tag)) if tag == "diode"
        ));
        assert!(matches!(
            ComponentKind::from_attributes("resistor", &empty),
            Err(Error::MissingParameter(ref key)) if key == "resistor.resistance"
        ));
    }
}
