//! Programmatic entry point: the flat-array interface from spec.md §6,
//! independent of any file format.

use std::time::Instant;

use crate::breakpoints::Breakpoint;
use crate::context::{SolverConfig, SolverContext};
use crate::error::PseudoflowError;
use crate::model::SuperGraph;
use crate::parametric::ParametricSolver;

/// Runs the parametric driver over an already-built super graph,
/// returning breakpoints in ascending λ order. Shared by [`solve_flat`]
/// and the `pseudoflow` CLI binary, which builds its own `SuperGraph`
/// from a parsed file instead of a flat arc list.
pub fn solve_breakpoints(sg: &SuperGraph, ctx: &mut SolverContext) -> Result<Vec<Breakpoint>, PseudoflowError> {
    ParametricSolver::new(sg).solve(ctx)
}

/// Everything `solve_flat` hands back: breakpoint λ values (ascending),
/// a column-major `N × K` indicator matrix (column `j` is breakpoint
/// `j`'s indicator), the five-element statistics array (arc scans,
/// mergers, pushes, relabels, gaps), and the three-element timings array
/// (read, init, solve), all in seconds. `read` is always `0.0` here since
/// there is no file read stage at this entry point.
#[derive(Debug, Clone)]
pub struct SolveOutput {
    pub lambdas: Vec<f64>,
    pub indicators: Vec<f64>,
    pub n: usize,
    pub stats: [u64; 5],
    pub timings: [f64; 3],
}

impl SolveOutput {
    /// Column-major indicator access: node `i`, breakpoint `j`.
    pub fn indicator_at(&self, i: usize, j: usize) -> f64 {
        self.indicators[j * self.n + i]
    }
}

/// Solves the fully parametric problem from a flat `(from, to, constant,
/// multiplier)` arc quadruple list, exactly as spec.md §6 describes the
/// programmatic entry point.
pub fn solve_flat(
    n: usize,
    source: usize,
    sink: usize,
    arcs: &[(usize, usize, f64, f64)],
    lambda_range: [f64; 2],
    round_negative: bool,
) -> Result<SolveOutput, PseudoflowError> {
    let init_start = Instant::now();
    let sg = SuperGraph::build(n, source, sink, arcs.iter().copied())?;
    let config = SolverConfig {
        round_negative,
        ..SolverConfig::default()
    };
    let mut ctx = SolverContext::new(config, lambda_range[0], lambda_range[1]);
    let init_seconds = init_start.elapsed().as_secs_f64();

    let solve_start = Instant::now();
    let breakpoints = solve_breakpoints(&sg, &mut ctx)?;
    let solve_seconds = solve_start.elapsed().as_secs_f64();

    let mut lambdas = Vec::with_capacity(breakpoints.len());
    let mut indicators = vec![0.0; n * breakpoints.len()];
    for (j, bp) in breakpoints.iter().enumerate() {
        lambdas.push(bp.lambda);
        for i in 0..n {
            indicators[j * n + i] = f64::from(bp.indicator[i]);
        }
    }

    Ok(SolveOutput {
        lambdas,
        indicators,
        n,
        stats: ctx.stats.as_array(),
        timings: [0.0, init_seconds, solve_seconds],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_a_trivial_disconnected_pair() {
        let out = solve_flat(2, 0, 1, &[], [0.0, 1.0], false).unwrap();
        assert_eq!(out.lambdas, vec![1.0]);
        assert_eq!(out.indicator_at(0, 0), 1.0);
        assert_eq!(out.indicator_at(1, 0), 0.0);
    }

    #[test]
    fn scenario_b_single_affine_source_arc() {
        let out = solve_flat(2, 0, 1, &[(0, 1, 3.0, 2.0)], [0.0, 2.0], false).unwrap();
        assert_eq!(out.lambdas, vec![2.0]);
        assert_eq!(out.indicator_at(0, 0), 1.0);
        assert_eq!(out.indicator_at(1, 0), 0.0);
    }

    #[test]
    fn scenario_f_degenerate_lambda_range() {
        let out = solve_flat(2, 0, 1, &[(0, 1, 4.0, 0.0)], [0.7, 0.7], false).unwrap();
        assert_eq!(out.lambdas, vec![0.7]);
    }
}
