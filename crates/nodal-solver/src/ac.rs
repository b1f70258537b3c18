//! AC steady-state analysis.
//!
//! A single AC point assembles the circuit's MNA system under a parameter
//! set, solves it, and maps the solution back to names: node voltages in
//! volts, branch currents in amperes flowing negative to positive terminal.

use indexmap::IndexMap;
use log::{debug, info, warn};
use nodal_core::{Circuit, Parameters};

use crate::error::{Error, Result};
use crate::linear::solve_dense;

/// AC sweep type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcSweepType {
    /// Linear frequency spacing.
    Linear,
    /// Logarithmic spacing, points per decade.
    Decade,
    /// Logarithmic spacing, points per octave.
    Octave,
}

/// Multi-frequency sweep parameters.
#[derive(Debug, Clone)]
pub struct AcParams {
    /// Start frequency (Hz).
    pub fstart: f64,
    /// Stop frequency (Hz).
    pub fstop: f64,
    /// Number of points (total for Linear, per decade/octave for log sweeps).
    pub num_points: usize,
    /// Sweep type.
    pub sweep_type: AcSweepType,
}

impl AcParams {
    /// Check that the sweep describes at least one usable frequency.
    ///
    /// Log sweeps need a positive start frequency, linear sweeps a
    /// non-negative one. `fstop` may equal but not precede `fstart`.
    pub fn validate(&self) -> Result<()> {
        if self.num_points == 0 {
            return Err(Error::InvalidSweep("at least one point is required".into()));
        }
        if !self.fstart.is_finite() || !self.fstop.is_finite() {
            return Err(Error::InvalidSweep(format!(
                "frequencies must be finite, got {} to {}",
                self.fstart, self.fstop
            )));
        }
        if self.fstop < self.fstart {
            return Err(Error::InvalidSweep(format!(
                "stop frequency {} is below start frequency {}",
                self.fstop, self.fstart
            )));
        }
        match self.sweep_type {
            AcSweepType::Linear if self.fstart < 0.0 => Err(Error::InvalidSweep(format!(
                "negative start frequency {}",
                self.fstart
            ))),
            AcSweepType::Decade | AcSweepType::Octave if self.fstart <= 0.0 => {
                Err(Error::InvalidSweep(format!(
                    "logarithmic sweep needs a positive start frequency, got {}",
                    self.fstart
                )))
            }
            _ => Ok(()),
        }
    }
}

/// Generate frequency points for an AC sweep.
///
/// Fails with [`Error::InvalidSweep`] when `params` does not pass
/// [`AcParams::validate`]; otherwise at least one point is returned.
pub fn generate_frequencies(params: &AcParams) -> Result<Vec<f64>> {
    params.validate()?;

    let freqs = match params.sweep_type {
        AcSweepType::Linear => {
            if params.num_points == 1 {
                return Ok(vec![params.fstart]);
            }
            let step = (params.fstop - params.fstart) / (params.num_points as f64 - 1.0);
            (0..params.num_points)
                .map(|i| params.fstart + step * i as f64)
                .collect()
        }
        AcSweepType::Decade => log_points(params, 10.0, (params.fstop / params.fstart).log10()),
        AcSweepType::Octave => log_points(params, 2.0, (params.fstop / params.fstart).log2()),
    };
    Ok(freqs)
}

/// `num_points` per factor of `base` across `spans` such factors.
fn log_points(params: &AcParams, base: f64, spans: f64) -> Vec<f64> {
    let total_points = ((params.num_points as f64 * spans).ceil() as usize).saturating_add(1);
    (0..total_points)
        .map(|i| params.fstart * base.powf(i as f64 / params.num_points as f64))
        .filter(|&f| f <= params.fstop * 1.001)
        .collect()
}

/// Solved quantities of one AC point, keyed by node or component name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AcSolution {
    voltages: IndexMap<String, f64>,
    currents: IndexMap<String, f64>,
}

impl AcSolution {
    /// Voltage of a node relative to ground.
    pub fn voltage(&self, node: &str) -> Option<f64> {
        self.voltages.get(node).copied()
    }

    /// Branch current of a component, negative to positive terminal.
    pub fn current(&self, component: &str) -> Option<f64> {
        self.currents.get(component).copied()
    }

    /// Value for any node or component name.
    pub fn value(&self, name: &str) -> Option<f64> {
        self.voltage(name).or_else(|| self.current(name))
    }

    /// Node voltages in node insertion order.
    pub fn voltages(&self) -> &IndexMap<String, f64> {
        &self.voltages
    }

    /// Branch currents in component insertion order.
    pub fn currents(&self) -> &IndexMap<String, f64> {
        &self.currents
    }

    /// All values, nodes first, then components.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.voltages
            .iter()
            .chain(self.currents.iter())
            .map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.voltages.len() + self.currents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Solve the circuit at a single AC point.
///
/// The circuit is only read: equation slots live in a per-call
/// [`EquationIndex`](nodal_core::EquationIndex), so this may run repeatedly
/// or concurrently on the same circuit. Either every value is returned or an
/// error is.
pub fn solve_ac_point(circuit: &Circuit, params: &Parameters) -> Result<AcSolution> {
    let (mna, index) = circuit.assemble_mna(params)?;
    let x = solve_dense(mna.matrix(), mna.rhs())?;

    let voltages = circuit
        .nodes()
        .iter()
        .enumerate()
        .map(|(i, node)| (node.name().to_string(), x[i]))
        .collect();
    let currents = circuit
        .components()
        .iter()
        .enumerate()
        .map(|(j, component)| (component.name().to_string(), x[index.num_nodes() + j]))
        .collect();

    debug!("solved {} ({} unknowns)", circuit.label(), index.size());
    Ok(AcSolution { voltages, currents })
}

/// A single frequency point of a sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct AcPoint {
    /// Frequency (Hz).
    pub frequency: f64,
    pub solution: AcSolution,
}

/// Result of a multi-frequency AC sweep.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AcSweepResult {
    /// All computed frequency points, in sweep order.
    pub points: Vec<AcPoint>,
}

impl AcSweepResult {
    /// Get all frequency values.
    pub fn frequencies(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.frequency).collect()
    }

    /// `(frequency, value)` pairs for one name across the sweep.
    pub fn trace(&self, name: &str) -> Option<Vec<(f64, f64)>> {
        self.points
            .iter()
            .map(|p| p.solution.value(name).map(|v| (p.frequency, v)))
            .collect()
    }
}

pub(crate) fn solve_at_frequency(
    circuit: &Circuit,
    base: &Parameters,
    frequency: f64,
) -> Result<AcPoint> {
    let params = base.clone().with(Parameters::FREQUENCY, frequency);
    let solution = solve_ac_point(circuit, &params)
        .inspect_err(|e| warn!("{} at {frequency} Hz: {e}", circuit.label()))?;
    Ok(AcPoint {
        frequency,
        solution,
    })
}

/// Run the circuit at every frequency of `ac_params`.
///
/// `base` supplies any other parameters; its frequency, if any, is replaced
/// at each point. The first failing point aborts the sweep.
pub fn solve_ac(
    circuit: &Circuit,
    base: &Parameters,
    ac_params: &AcParams,
) -> Result<AcSweepResult> {
    let frequencies = generate_frequencies(ac_params)?;
    info!(
        "AC sweep of {}: {} points from {} Hz to {} Hz",
        circuit.label(),
        frequencies.len(),
        ac_params.fstart,
        ac_params.fstop
    );

    let points = frequencies
        .iter()
        .map(|&f| solve_at_frequency(circuit, base, f))
        .collect::<Result<Vec<_>>>()?;

    Ok(AcSweepResult { points })
}
