//! CLI front end: read a DIMACS-like instance, solve it, write the
//! breakpoint/indicator report. Exit codes follow spec.md §6 — 0 on
//! validation or I/O failure, 1 on success, a deliberately preserved
//! inversion of the Unix convention (see DESIGN.md).

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use pseudoflow::api::solve_breakpoints;
use pseudoflow::context::{SolverConfig, SolverContext};
use pseudoflow::io::dimacs;
use pseudoflow::SuperGraph;

#[derive(Parser, Debug)]
#[command(name = "pseudoflow", about = "Fully parametric s-t minimum cut solver")]
struct Args {
    /// Path to a DIMACS-like parametric cut instance.
    input: PathBuf,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    match run(&args.input) {
        Ok(()) => ExitCode::from(1),
        Err(err) => {
            log::error!("{err:#}");
            ExitCode::from(0)
        }
    }
}

fn run(input: &PathBuf) -> anyhow::Result<()> {
    let read_start = Instant::now();
    let text = fs::read_to_string(input)?;
    let parsed = dimacs::read(&text)?;
    let read_seconds = read_start.elapsed().as_secs_f64();

    let init_start = Instant::now();
    let sg = SuperGraph::build(parsed.n, parsed.source, parsed.sink, parsed.arcs.iter().copied())?;
    let config = SolverConfig {
        round_negative: parsed.round_negative,
        ..SolverConfig::default()
    };
    let mut ctx = SolverContext::new(config, parsed.lambda_low, parsed.lambda_high);
    let init_seconds = init_start.elapsed().as_secs_f64();

    let solve_start = Instant::now();
    let breakpoints = solve_breakpoints(&sg, &mut ctx)?;
    let solve_seconds = solve_start.elapsed().as_secs_f64();

    let timings = [read_seconds, init_seconds, solve_seconds];
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    dimacs::write(&mut handle, parsed.n, timings, ctx.stats.as_array(), &breakpoints)?;
    Ok(())
}
