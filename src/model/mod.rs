//! Graph Model: node and arc records, the validated "super graph" ingest
//! path, and capacity realization at a given lambda.
//!
//! Every node and arc referenced by a [`crate::cut_problem::CutProblem`]
//! lives in a plain `Vec` owned by that problem and is addressed by
//! [`NodeId`]/[`ArcId`] indices rather than by pointer or `Rc` — the
//! arena/slab strategy this crate's design notes call for, so the
//! intrusive tree and bucket links in [`Node`] never alias.

mod arc;
mod node;

pub use arc::Arc;
pub use node::Node;

use std::collections::HashSet;
use std::fmt;

use crate::error::PseudoflowError;

/// Index of a node within a sub-instance's current node list. Index 0 is
/// always the artificial source, index 1 the artificial sink.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// Index 0 in every sub-instance's node list: the artificial source.
    pub const SOURCE: NodeId = NodeId(0);
    /// Index 1 in every sub-instance's node list: the artificial sink.
    pub const SINK: NodeId = NodeId(1);

    pub fn new(index: usize) -> Self {
        NodeId(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

/// Index of an arc within a sub-instance's current arc list.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArcId(u32);

impl ArcId {
    pub fn new(index: usize) -> Self {
        ArcId(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ArcId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ArcId({})", self.0)
    }
}

/// An arc as given by the caller, already validated against the rules in
/// spec.md §4.1: node ids in range, no self loops, a multiplier sign
/// consistent with which endpoint it touches.
#[derive(Debug, Clone, Copy)]
pub struct RawArc {
    pub from: usize,
    pub to: usize,
    pub constant: f64,
    pub multiplier: f64,
}

/// The "super graph": the caller's node/arc universe, read once and
/// outliving every [`crate::cut_problem::CutProblem`] built from it.
#[derive(Debug, Clone)]
pub struct SuperGraph {
    pub n: usize,
    pub source: usize,
    pub sink: usize,
    pub arcs: Vec<RawArc>,
}

impl SuperGraph {
    /// Validate and ingest a caller-supplied arc list. Arcs whose `to` is
    /// the source or whose `from` is the sink are silently dropped from
    /// the super graph's perspective, per spec.md §4.1 — but logged at
    /// `warn` level, since spec.md §9's open question 3 asks that this
    /// silent drop be surfaced rather than hidden.
    pub fn build(
        n: usize,
        source: usize,
        sink: usize,
        arcs: impl IntoIterator<Item = (usize, usize, f64, f64)>,
    ) -> Result<Self, PseudoflowError> {
        if n < 2 {
            return Err(PseudoflowError::InputMalformed(format!(
                "graph must have at least 2 nodes, got {n}"
            )));
        }
        if source >= n || sink >= n {
            return Err(PseudoflowError::InputMalformed(format!(
                "source {source} or sink {sink} out of range [0, {n})"
            )));
        }
        if source == sink {
            return Err(PseudoflowError::InputMalformed(
                "source and sink must be distinct".to_string(),
            ));
        }

        let mut kept = Vec::new();
        let mut seen_pairs: HashSet<(usize, usize)> = HashSet::new();
        for (from, to, constant, multiplier) in arcs {
            if from >= n || to >= n {
                return Err(PseudoflowError::InputMalformed(format!(
                    "arc endpoint out of range: ({from}, {to}) not in [0, {n})"
                )));
            }
            if from == to {
                return Err(PseudoflowError::InputMalformed(format!(
                    "self loop at node {from} is not allowed"
                )));
            }
            if to == source || from == sink {
                log::warn!(
                    "dropping arc ({from}, {to}): touches the source as a head or the sink as a tail"
                );
                continue;
            }
            if multiplier > 0.0 && from != source {
                return Err(PseudoflowError::InputMalformed(format!(
                    "arc ({from}, {to}) has multiplier > 0 but does not originate at the source"
                )));
            }
            if multiplier < 0.0 && to != sink {
                return Err(PseudoflowError::InputMalformed(format!(
                    "arc ({from}, {to}) has multiplier < 0 but does not terminate at the sink"
                )));
            }
            if !seen_pairs.insert((from, to)) {
                log::debug!("multiple arcs between ({from}, {to}); capacities will be summed");
            }
            kept.push(RawArc {
                from,
                to,
                constant,
                multiplier,
            });
        }

        Ok(SuperGraph {
            n,
            source,
            sink,
            arcs: kept,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_self_loop() {
        let err = SuperGraph::build(3, 0, 2, vec![(1, 1, 1.0, 0.0)]).unwrap_err();
        assert!(matches!(err, PseudoflowError::InputMalformed(_)));
    }

    #[test]
    fn rejects_positive_multiplier_off_source() {
        let err = SuperGraph::build(3, 0, 2, vec![(1, 2, 1.0, 1.0)]).unwrap_err();
        assert!(matches!(err, PseudoflowError::InputMalformed(_)));
    }

    #[test]
    fn drops_arcs_into_source_or_out_of_sink() {
        let sg = SuperGraph::build(3, 0, 2, vec![(1, 0, 1.0, 0.0), (2, 1, 1.0, 0.0)]).unwrap();
        assert!(sg.arcs.is_empty());
    }
}
