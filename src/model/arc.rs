use super::NodeId;
use crate::context::SolverConfig;
use crate::error::PseudoflowError;

/// An arc with an affine capacity `constant + multiplier * lambda`,
/// realized into a concrete `capacity` each time the solver moves to a
/// new lambda.
#[derive(Debug, Clone, Copy)]
pub struct Arc {
    pub from: NodeId,
    pub to: NodeId,
    pub constant: f64,
    pub multiplier: f64,
    pub capacity: f64,
    pub flow: f64,
    /// `true` when this arc's native `from -> to` orientation matches
    /// the current tree's child-to-parent direction; flipped whenever
    /// [`crate::engine::Engine::merge`] rotates the edge. Meaningless
    /// until the arc becomes a tree edge.
    pub direction: bool,
}

impl Arc {
    pub fn new(from: NodeId, to: NodeId, constant: f64, multiplier: f64) -> Self {
        Arc {
            from,
            to,
            constant,
            multiplier,
            capacity: 0.0,
            flow: 0.0,
            direction: false,
        }
    }

    /// Realize `capacity` at `lambda`, per spec.md §4.1: clamp a small
    /// negative result to zero (when round-negative is on, or the
    /// shortfall is within tolerance); otherwise fail fatally.
    pub fn realize(&mut self, lambda: f64, config: &SolverConfig) -> Result<(), PseudoflowError> {
        let raw = self.constant + self.multiplier * lambda;
        if raw < 0.0 {
            if config.round_negative || raw > -config.tolerance {
                self.capacity = 0.0;
            } else {
                return Err(PseudoflowError::CapacityInfeasible {
                    lambda,
                    detail: format!(
                        "arc ({}, {}) realizes to {raw} (constant={}, multiplier={})",
                        self.from.index(),
                        self.to.index(),
                        self.constant,
                        self.multiplier
                    ),
                });
            }
        } else {
            self.capacity = raw;
        }
        self.flow = 0.0;
        Ok(())
    }

    pub fn residual_capacity(&self) -> f64 {
        self.capacity - self.flow
    }
}
