//! Benchmarks for linear solves and AC sweeps.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use nalgebra::{DMatrix, DVector};
use nodal_core::{Circuit, Node, Parameters};
use nodal_solver::{
    AcParams, AcSweepType, ParallelSweepConfig, solve_ac, solve_ac_parallel, solve_ac_point,
    solve_dense,
};

fn bench_solve_dense(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve_dense");

    for size in [10, 50, 100] {
        group.bench_with_input(
            BenchmarkId::from_parameter(size),
            &size,
            |bencher, &size| {
                // Create a diagonally dominant matrix (guaranteed non-singular)
                let a = DMatrix::from_fn(size, size, |i, j| {
                    if i == j {
                        (size as f64) + 1.0
                    } else {
                        1.0 / ((i as f64 - j as f64).abs() + 1.0)
                    }
                });
                let rhs = DVector::from_fn(size, |i, _| (i + 1) as f64);

                bencher.iter(|| solve_dense(black_box(&a), black_box(&rhs)).unwrap());
            },
        );
    }

    group.finish();
}

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

fn bench_ac_point(c: &mut Criterion) {
    let mut group = c.benchmark_group("ac_point");

    for sections in [10, 50] {
        let circuit = rc_ladder(sections);
        let params = Parameters::with_frequency(1e3);
        group.bench_with_input(
            BenchmarkId::from_parameter(sections),
            &circuit,
            |bencher, circuit| {
                bencher.iter(|| solve_ac_point(circuit, black_box(&params)).unwrap());
            },
        );
    }

    group.finish();
}

fn bench_ac_sweep(c: &mut Criterion) {
    let circuit = rc_ladder(50);
    let base = Parameters::new();
    let params = AcParams {
        fstart: 1.0,
        fstop: 1e6,
        num_points: 20,
        sweep_type: AcSweepType::Decade,
    };

    let mut group = c.benchmark_group("ac_sweep_ladder_50");
    group.bench_function("sequential", |b| {
        b.iter(|| solve_ac(&circuit, &base, black_box(&params)).unwrap());
    });
    group.bench_function("parallel", |b| {
        let config = ParallelSweepConfig::default();
        b.iter(|| solve_ac_parallel(&circuit, &base, black_box(&params), &config).unwrap());
    });
    group.finish();
}

criterion_group!(benches, bench_solve_dense, bench_ac_point, bench_ac_sweep);
criterion_main!(benches);
