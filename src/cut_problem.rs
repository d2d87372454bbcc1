//! CutProblem (Sub-instance): a self-contained cut instance built either
//! directly from the super graph or by contracting a solved instance's
//! indicator back into new source/sink sets, plus evaluation of its
//! realized cut value.

use std::collections::{HashMap, HashSet};

use crate::context::{SolverConfig, SolverContext};
use crate::engine::Engine;
use crate::error::PseudoflowError;
use crate::model::{Arc, Node, NodeId, SuperGraph};

/// A cut instance: its own node/arc storage, the externally-indexed sets
/// already contracted into source or sink, and — once solved — the
/// optimal source-set indicator over the *original* (super-graph) index
/// space and the affine cut-value coefficients realized at `lambda`.
#[derive(Debug, Clone)]
pub struct CutProblem {
    pub lambda: f64,
    pub nodes: Vec<Node>,
    pub arcs: Vec<Arc>,
    /// Original super-graph indices (excluding the artificial source/sink)
    /// already contracted into the source side.
    pub source_set: HashSet<usize>,
    /// Original super-graph indices already contracted into the sink side.
    pub sink_set: HashSet<usize>,
    pub solved: bool,
    pub optimal_source_set_indicator: Vec<u8>,
    pub cut_constant: f64,
    pub cut_multiplier: f64,
    pub cut_value: f64,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Role {
    Source,
    Sink,
    Interior(NodeId),
}

/// Shared constructor behind both `initialize_problem` and
/// `contract_problem`: given the sets of original indices to fold into
/// the source and sink (beyond the super graph's own source/sink, which
/// are always included), build the node list, aggregate the arc list,
/// and realize capacities at `lambda`.
pub fn build_cut_problem(
    sg: &SuperGraph,
    lambda: f64,
    config: &SolverConfig,
    extra_source: &HashSet<usize>,
    extra_sink: &HashSet<usize>,
) -> Result<CutProblem, PseudoflowError> {
    let mut source_set: HashSet<usize> = extra_source.clone();
    source_set.insert(sg.source);
    let mut sink_set: HashSet<usize> = extra_sink.clone();
    sink_set.insert(sg.sink);

    let mut nodes = Vec::with_capacity(sg.n - source_set.len() - sink_set.len() + 2);
    nodes.push(Node::fresh(-1));
    nodes.push(Node::fresh(-2));
    let mut local_of: HashMap<usize, NodeId> = HashMap::new();
    for i in 0..sg.n {
        if source_set.contains(&i) || sink_set.contains(&i) {
            continue;
        }
        local_of.insert(i, NodeId::new(nodes.len()));
        nodes.push(Node::fresh(i as i64));
    }

    let role_of = |original: usize| -> Role {
        if original == sg.source || source_set.contains(&original) {
            Role::Source
        } else if original == sg.sink || sink_set.contains(&original) {
            Role::Sink
        } else {
            Role::Interior(local_of[&original])
        }
    };

    let mut aggregated: HashMap<(NodeId, NodeId), (f64, f64)> = HashMap::new();
    let mut order: Vec<(NodeId, NodeId)> = Vec::new();
    for raw in &sg.arcs {
        let from_role = role_of(raw.from);
        let to_role = role_of(raw.to);
        if matches!(from_role, Role::Sink) || matches!(to_role, Role::Source) {
            log::debug!(
                "dropping arc ({}, {}) during contraction: contradicts the new source/sink assignment",
                raw.from,
                raw.to
            );
            continue;
        }
        let new_from = match from_role {
            Role::Source => NodeId::SOURCE,
            Role::Interior(id) => id,
            Role::Sink => unreachable!(),
        };
        let new_to = match to_role {
            Role::Sink => NodeId::SINK,
            Role::Interior(id) => id,
            Role::Source => unreachable!(),
        };
        if new_from == new_to {
            continue;
        }
        if !aggregated.contains_key(&(new_from, new_to)) {
            order.push((new_from, new_to));
        }
        let entry = aggregated.entry((new_from, new_to)).or_insert((0.0, 0.0));
        entry.0 += raw.constant;
        entry.1 += raw.multiplier;
    }

    // `order` already fixes the final degree of every node, so reserve
    // `out_of_tree` up front instead of letting it grow arc by arc.
    let mut degree = vec![0usize; nodes.len()];
    for &(from, to) in &order {
        degree[from.index()] += 1;
        degree[to.index()] += 1;
    }
    for (node, &d) in nodes.iter_mut().zip(degree.iter()) {
        node.num_adjacent = d;
        node.out_of_tree.reserve(d);
    }

    let mut arcs = Vec::with_capacity(order.len());
    for key @ (from, to) in order {
        let (constant, multiplier) = aggregated[&key];
        let mut arc = Arc::new(from, to, constant, multiplier);
        arc.realize(lambda, config)?;
        let arc_id = crate::model::ArcId::new(arcs.len());
        nodes[from.index()].out_of_tree.push(arc_id);
        nodes[to.index()].out_of_tree.push(arc_id);
        arcs.push(arc);
    }

    Ok(CutProblem {
        lambda,
        nodes,
        arcs,
        source_set: source_set.into_iter().filter(|&i| i != sg.source).collect(),
        sink_set: sink_set.into_iter().filter(|&i| i != sg.sink).collect(),
        solved: false,
        optimal_source_set_indicator: vec![0; sg.n],
        cut_constant: 0.0,
        cut_multiplier: 0.0,
        cut_value: 0.0,
    })
}

/// Builds the outermost CutProblem directly from the super graph: only
/// the super graph's own source and sink are pre-contracted.
pub fn initialize_problem(
    sg: &SuperGraph,
    lambda: f64,
    config: &SolverConfig,
) -> Result<CutProblem, PseudoflowError> {
    build_cut_problem(sg, lambda, config, &HashSet::new(), &HashSet::new())
}

/// Derives a sub-instance at `lambda` from two already-solved instances
/// that bracket it: `low`'s source side becomes the new extra-source set,
/// `high`'s sink side (nodes it excludes) becomes the new extra-sink set.
/// Both indicators are always in original super-graph index space, so the
/// contraction is rebuilt straight from the immutable `sg` rather than
/// from whichever arc list `low`/`high` happened to already hold.
pub fn contract_problem(
    sg: &SuperGraph,
    lambda: f64,
    config: &SolverConfig,
    low: &CutProblem,
    high: &CutProblem,
) -> Result<CutProblem, PseudoflowError> {
    let mut extra_source = HashSet::new();
    let mut extra_sink = HashSet::new();
    for i in 0..sg.n {
        if i == sg.source || i == sg.sink {
            continue;
        }
        if low.optimal_source_set_indicator[i] == 1 {
            extra_source.insert(i);
        }
        if high.optimal_source_set_indicator[i] == 0 {
            extra_sink.insert(i);
        }
    }
    build_cut_problem(sg, lambda, config, &extra_source, &extra_sink)
}

fn swap01(id: NodeId) -> NodeId {
    match id.index() {
        0 => NodeId::SINK,
        1 => NodeId::SOURCE,
        i => NodeId::new(i),
    }
}

impl CutProblem {
    /// Runs the pseudoflow engine on this instance (already capacity-realized)
    /// and writes `optimal_source_set_indicator` plus the cut-value
    /// coefficients. `maximal_source_set` requests the maximal rather than
    /// minimal source-side cut among all minimum cuts at this lambda, via
    /// the reverse-graph-and-complement construction.
    pub fn solve(&mut self, ctx: &mut SolverContext, maximal_source_set: bool) -> Result<(), PseudoflowError> {
        let nodes = self.nodes.clone();
        let arcs: Vec<Arc> = if maximal_source_set {
            self.arcs
                .iter()
                .map(|a| {
                    let mut a = *a;
                    let (new_from, new_to) = (swap01(a.to), swap01(a.from));
                    a.from = new_from;
                    a.to = new_to;
                    a
                })
                .collect()
        } else {
            self.arcs.clone()
        };

        let mut engine = Engine::new(nodes, arcs, &mut ctx.stats);
        engine.run();
        let (solved_nodes, _solved_arcs) = engine.into_parts();

        let n_current = solved_nodes.len();
        let mut local_in_source = vec![false; n_current];
        for (id, node) in solved_nodes.iter().enumerate() {
            let raw = node.label >= n_current;
            local_in_source[id] = if maximal_source_set { !raw } else { raw };
        }
        local_in_source[NodeId::SOURCE.index()] = true;
        local_in_source[NodeId::SINK.index()] = false;

        for &i in &self.source_set {
            self.optimal_source_set_indicator[i] = 1;
        }
        for &i in &self.sink_set {
            self.optimal_source_set_indicator[i] = 0;
        }
        for (local_id, node) in solved_nodes.iter().enumerate() {
            if node.original_index >= 0 {
                self.optimal_source_set_indicator[node.original_index as usize] =
                    u8::from(local_in_source[local_id]);
            }
        }

        self.cut_constant = 0.0;
        self.cut_multiplier = 0.0;
        self.cut_value = 0.0;
        for arc in &self.arcs {
            if local_in_source[arc.from.index()] && !local_in_source[arc.to.index()] {
                self.cut_constant += arc.constant;
                self.cut_multiplier += arc.multiplier;
                self.cut_value += arc.capacity;
            }
        }

        self.solved = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::SolverConfig;

    #[test]
    fn initialize_problem_keeps_only_super_source_and_sink_contracted() {
        let sg = SuperGraph::build(3, 0, 2, vec![(0, 1, 5.0, 0.0), (1, 2, 3.0, 0.0)]).unwrap();
        let cfg = SolverConfig::default();
        let cp = initialize_problem(&sg, 0.0, &cfg).unwrap();
        assert_eq!(cp.nodes.len(), 3);
        assert!(cp.source_set.is_empty());
        assert!(cp.sink_set.is_empty());
        assert_eq!(cp.arcs.len(), 2);
    }

    #[test]
    fn solve_trivial_disconnected_pair_puts_source_alone_on_source_side() {
        let sg = SuperGraph::build(2, 0, 1, Vec::new()).unwrap();
        let cfg = SolverConfig::default();
        let mut ctx = SolverContext::new(cfg, 0.0, 1.0);
        let mut cp = initialize_problem(&sg, 1.0, &cfg).unwrap();
        cp.solve(&mut ctx, false).unwrap();
        assert_eq!(cp.optimal_source_set_indicator, vec![1, 0]);
        assert_eq!(cp.cut_value, 0.0);
    }
}
