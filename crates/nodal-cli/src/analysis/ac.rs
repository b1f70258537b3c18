//! Multi-frequency AC sweep.

use anyhow::{Context, Result};
use nodal_core::{Circuit, Parameters};
use nodal_solver::{AcParams, AcSweepType, ParallelSweepConfig, solve_ac, solve_ac_parallel};

/// Run a frequency sweep and print one row per frequency.
///
/// Columns are node voltages followed by branch currents, in insertion order.
pub fn run_ac_sweep(
    circuit: &Circuit,
    base: &Parameters,
    ac_params: &AcParams,
    parallel: bool,
) -> Result<()> {
    let type_name = match ac_params.sweep_type {
        AcSweepType::Decade => "DEC",
        AcSweepType::Octave => "OCT",
        AcSweepType::Linear => "LIN",
    };

    println!(
        "AC Sweep ({} {} {} {})",
        type_name, ac_params.num_points, ac_params.fstart, ac_params.fstop
    );
    println!("==========================================");
    println!();

    let result = if parallel {
        solve_ac_parallel(circuit, base, ac_params, &ParallelSweepConfig::default())
    } else {
        solve_ac(circuit, base, ac_params)
    }
    .with_context(|| format!("AC sweep of {} failed", circuit.label()))?;

    let columns: Vec<String> = circuit
        .nodes()
        .iter()
        .map(|n| format!("V({})", n.name()))
        .chain(circuit.components().iter().map(|c| format!("I({})", c.name())))
        .collect();

    print!("{:>14}", "Freq(Hz)");
    for column in &columns {
        print!("{:>14}", column);
    }
    println!();
    println!("{}", "-".repeat(14 * (columns.len() + 1)));

    for point in &result.points {
        print!("{:>14.4e}", point.frequency);
        for (_, value) in point.solution.iter() {
            print!("{:>14.4e}", value);
        }
        println!();
    }

    println!();
    println!("AC sweep complete ({} points).", result.points.len());
    Ok(())
}
