//! Benchmarks for MNA assembly.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use nodal_core::{Circuit, Node, Parameters};

/// An RC ladder with `sections` series resistors and shunt capacitors.
fn rc_ladder(sections: usize) -> Circuit {
    let mut circuit = Circuit::with_name("ladder");
    let gnd = circuit.add_node(Node::ground("gnd")).unwrap();
    let mut prev = circuit.add_node(Node::new("in", false)).unwrap();
    circuit.add_voltage_source("V1", gnd, prev, 1.0).unwrap();

    for i in 0..sections {
        let next = circuit.add_node(Node::new(format!("n{i}"), false)).unwrap();
        circuit.add_resistor(format!("R{i}"), next, prev, 1e3).unwrap();
        circuit.add_capacitor(format!("C{i}"), gnd, next, 1e-9).unwrap();
        prev = next;
    }
    circuit
}

fn bench_assemble(c: &mut Criterion) {
    let params = Parameters::with_frequency(1e3);
    for sections in [10, 100] {
        let circuit = rc_ladder(sections);
        c.bench_function(&format!("assemble_rc_ladder_{sections}"), |b| {
            b.iter(|| circuit.assemble_mna(black_box(&params)).unwrap());
        });
    }
}

criterion_group!(benches, bench_assemble);
criterion_main!(benches);
