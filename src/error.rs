//! Typed error taxonomy for the solver, per the four fatal-condition kinds
//! a parametric cut run can hit: malformed input, an infeasible realized
//! capacity, allocation failure, and a broken internal invariant.

use thiserror::Error;

/// Errors the solver can return. None of these unwind through a panic;
/// every fatal condition described by the engine or the driver surfaces
/// here instead of terminating the process.
#[derive(Debug, Error)]
pub enum PseudoflowError {
    /// The input graph or file could not be parsed or violates a
    /// structural rule (bad node id, self loop, wrong multiplier sign,
    /// missing source/sink, wrong arc count).
    #[error("input malformed: {0}")]
    InputMalformed(String),

    /// A realized arc capacity came out strictly negative beyond
    /// tolerance at some lambda, and round-negative is off.
    #[error("capacity infeasible at lambda={lambda}: {detail}")]
    CapacityInfeasible { lambda: f64, detail: String },

    /// An allocation could not be satisfied.
    #[error("resource exhausted: {0}")]
    ResourceExhausted(String),

    /// An internal invariant was violated (label-count mismatch, a tree
    /// node without a parent arc, etc). Indicates a bug in the engine,
    /// not a problem with caller input.
    #[error("internal invariant violated: {0}")]
    Internal(String),
}
