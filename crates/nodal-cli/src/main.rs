//! Nodal command-line interface.

mod analysis;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use env_logger::Env;
use log::debug;
use nodal_core::Parameters;
use nodal_solver::{AcParams, AcSweepType};

use analysis::{run_ac_point, run_ac_sweep};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SweepKind {
    Lin,
    Dec,
    Oct,
}

impl From<SweepKind> for AcSweepType {
    fn from(kind: SweepKind) -> Self {
        match kind {
            SweepKind::Lin => AcSweepType::Linear,
            SweepKind::Dec => AcSweepType::Decade,
            SweepKind::Oct => AcSweepType::Octave,
        }
    }
}

#[derive(Parser)]
#[command(name = "nodal")]
#[command(about = "Linear AC circuit solver using modified nodal analysis", long_about = None)]
#[command(version)]
struct Cli {
    /// Circuit file (JSON)
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Solve at a single frequency in Hz
    #[arg(short, long, conflicts_with_all = ["fstart", "fstop"])]
    frequency: Option<f64>,

    /// Sweep start frequency in Hz
    #[arg(long, requires = "fstop")]
    fstart: Option<f64>,

    /// Sweep stop frequency in Hz
    #[arg(long, requires = "fstart")]
    fstop: Option<f64>,

    /// Points in total (lin) or per decade/octave
    #[arg(long, default_value_t = 10)]
    points: usize,

    /// Sweep spacing
    #[arg(long, value_enum, default_value_t = SweepKind::Dec)]
    sweep: SweepKind,

    /// Spread sweep points across threads
    #[arg(long)]
    parallel: bool,

    /// Extra circuit parameters as KEY=VALUE
    #[arg(short = 'p', long = "param", value_name = "KEY=VALUE")]
    params: Vec<String>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let env = if cli.verbose {
        Env::default().default_filter_or("debug")
    } else {
        Env::default().default_filter_or("warn")
    };
    env_logger::Builder::from_env(env).init();

    let circuit = nodal_netfile::load(&cli.input)
        .with_context(|| format!("Failed to load circuit: {}", cli.input.display()))?;

    if cli.verbose {
        println!("Circuit: {}", circuit.name().unwrap_or("(untitled)"));
        println!("Nodes: {}", circuit.node_count());
        println!("Components: {}", circuit.component_count());
        println!();
    }

    let mut base = parse_params(&cli.params)?;
    debug!("base parameters: {:?}", base);

    match (cli.fstart, cli.fstop) {
        (Some(fstart), Some(fstop)) => {
            let ac_params = AcParams {
                fstart,
                fstop,
                num_points: cli.points,
                sweep_type: cli.sweep.into(),
            };
            run_ac_sweep(&circuit, &base, &ac_params, cli.parallel)
        }
        _ => {
            if let Some(f) = cli.frequency {
                base.set(Parameters::FREQUENCY, f);
            }
            run_ac_point(&circuit, &base)
        }
    }
}

fn parse_params(pairs: &[String]) -> Result<Parameters> {
    let mut params = Parameters::new();
    for pair in pairs {
        let Some((key, value)) = pair.split_once('=') else {
            bail!("Invalid parameter '{}': expected KEY=VALUE", pair);
        };
        let value: f64 = value
            .trim()
            .parse()
            .with_context(|| format!("Invalid value for parameter '{}'", key))?;
        params.set(key.trim(), value);
    }
    Ok(params)
}
