//! Parametric Driver: recursively discovers every λ-breakpoint on
//! [λ_low, λ_high] by solving the two ends (minimal and maximal
//! source-side cuts), intersecting their affine cut-value functions, and
//! contracting toward the interior when an interior breakpoint exists.

use crate::breakpoints::{Breakpoint, BreakpointStore};
use crate::context::SolverContext;
use crate::cut_problem::{contract_problem, initialize_problem, CutProblem};
use crate::error::PseudoflowError;
use crate::model::SuperGraph;

/// Drives the recursive interval-splitting search over one super graph.
pub struct ParametricSolver<'a> {
    sg: &'a SuperGraph,
    store: BreakpointStore,
}

impl<'a> ParametricSolver<'a> {
    pub fn new(sg: &'a SuperGraph) -> Self {
        ParametricSolver {
            sg,
            store: BreakpointStore::new(),
        }
    }

    /// Solves the full parametric problem over `ctx.lambda_low,
    /// ctx.lambda_high`, returning breakpoints in ascending λ order.
    pub fn solve(mut self, ctx: &mut SolverContext) -> Result<Vec<Breakpoint>, PseudoflowError> {
        let config = ctx.config;
        let (lambda_low, lambda_high) = (ctx.lambda_low, ctx.lambda_high);

        if (lambda_high - lambda_low).abs() <= config.tolerance {
            let mut only = initialize_problem(self.sg, lambda_low, &config)?;
            only.solve(ctx, false)?;
            self.store.add(lambda_low, only.optimal_source_set_indicator.clone());
            return Ok(self.store.into_vec());
        }

        let mut low = initialize_problem(self.sg, lambda_low, &config)?;
        low.solve(ctx, false)?;
        let mut high = initialize_problem(self.sg, lambda_high, &config)?;
        high.solve(ctx, true)?;

        self.recurse(&low, &high, ctx)?;
        self.store.add(high.lambda, high.optimal_source_set_indicator.clone());
        self.store.remove_duplicates(config.tolerance);
        Ok(self.store.into_vec())
    }

    /// One level of the interval splitter: `low` and `high` are already
    /// solved (minimal, maximal respectively) at their own λ. Emits a
    /// breakpoint, recurses into a contracted interior sub-interval, or
    /// does nothing, depending on where the two cut-value lines cross.
    fn recurse(&mut self, low: &CutProblem, high: &CutProblem, ctx: &mut SolverContext) -> Result<(), PseudoflowError> {
        let tolerance = ctx.config.tolerance;
        let delta_m = high.cut_multiplier - low.cut_multiplier;
        if delta_m.abs() <= tolerance {
            return Ok(());
        }
        let delta_c = low.cut_constant - high.cut_constant;
        let lambda_star = delta_c / delta_m;

        if (lambda_star - high.lambda).abs() <= tolerance {
            self.store.add(high.lambda, low.optimal_source_set_indicator.clone());
            return Ok(());
        }
        if (lambda_star - low.lambda).abs() <= tolerance {
            self.store.add(low.lambda, low.optimal_source_set_indicator.clone());
            return Ok(());
        }
        if lambda_star > low.lambda + tolerance && lambda_star < high.lambda - tolerance {
            let config = ctx.config;
            let base = contract_problem(self.sg, lambda_star, &config, low, high)?;

            let mut mid_high = base.clone();
            mid_high.solve(ctx, true)?;
            let mut mid_low = base;
            mid_low.solve(ctx, false)?;

            self.recurse(low, &mid_high, ctx)?;
            self.recurse(&mid_low, high, ctx)?;
            return Ok(());
        }
        // λ* lies outside (low.λ, high.λ): no breakpoint at this level.
        Ok(())
    }
}
