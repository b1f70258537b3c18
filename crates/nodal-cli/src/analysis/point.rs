//! Single-frequency AC solution.

use anyhow::{Context, Result};
use nodal_core::{Circuit, Parameters};
use nodal_solver::solve_ac_point;

/// Solve at one set of parameters and print every node voltage and branch current.
pub fn run_ac_point(circuit: &Circuit, params: &Parameters) -> Result<()> {
    match params.frequency() {
        Some(f) => println!("AC Analysis at {} Hz", f),
        None => println!("AC Analysis (no frequency)"),
    }
    println!("==========================================");
    println!();

    let solution = solve_ac_point(circuit, params)
        .with_context(|| format!("Failed to solve circuit {}", circuit.label()))?;

    println!("{:<20}{:>16}", "Name", "Value");
    println!("{}", "-".repeat(38));
    for (name, v) in solution.voltages() {
        println!("{:<20}{:>16.6e} V", format!("V({})", name), v);
    }
    for (name, i) in solution.currents() {
        println!("{:<20}{:>16.6e} A", format!("I({})", name), i);
    }

    println!();
    println!("Analysis complete.");
    Ok(())
}
