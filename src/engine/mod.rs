//! Pseudoflow Engine: single-lambda max-flow/min-cut via normalized
//! trees with strong/weak labels, gap relabeling, and lowest-index
//! (FIFO) selection within the highest active label — Hochbaum (2008).
//!
//! The engine owns its node and arc storage outright for the duration of
//! one `run()`; [`crate::cut_problem::CutProblem`] hands them in and
//! takes them back via [`Engine::into_parts`]. Every tree and bucket link
//! is a [`crate::model::NodeId`]/[`crate::model::ArcId`] index into
//! those owned vectors, never a pointer — see the Graph Model docs.

mod labels;

use labels::StrongRootBuckets;

use crate::context::SolverStats;
use crate::model::{Arc, Node, NodeId};

pub const SOURCE: NodeId = NodeId::SOURCE;
pub const SINK: NodeId = NodeId::SINK;

/// Runs phase 1 of the pseudoflow algorithm to completion on one
/// sub-instance's already-capacity-realized nodes and arcs.
pub struct Engine<'ctx> {
    nodes: Vec<Node>,
    arcs: Vec<Arc>,
    n_current: usize,
    label_count: Vec<usize>,
    buckets: StrongRootBuckets,
    highest_strong_label: usize,
    stats: &'ctx mut SolverStats,
}

impl<'ctx> Engine<'ctx> {
    pub fn new(nodes: Vec<Node>, arcs: Vec<Arc>, stats: &'ctx mut SolverStats) -> Self {
        let n_current = nodes.len();
        Engine {
            nodes,
            arcs,
            n_current,
            label_count: vec![0; n_current + 1],
            buckets: StrongRootBuckets::new(n_current),
            highest_strong_label: 0,
            stats,
        }
    }

    pub fn into_parts(self) -> (Vec<Node>, Vec<Arc>) {
        (self.nodes, self.arcs)
    }

    /// Runs phase 1 to completion: labels partition the residual graph
    /// into a source side (label >= n_current) and a sink side.
    pub fn run(&mut self) {
        self.simple_initialization();
        while let Some(root) = self.get_highest_strong_root() {
            self.process_root(root);
        }
    }

    // ---- Initialization -------------------------------------------------

    fn simple_initialization(&mut self) {
        for arc in self.arcs.iter_mut() {
            if arc.from == SOURCE {
                arc.flow = arc.capacity;
                self.nodes[arc.to.index()].excess += arc.capacity;
            }
            if arc.to == SINK {
                arc.flow = arc.capacity;
                self.nodes[arc.from.index()].excess -= arc.capacity;
            }
        }
        self.nodes[SOURCE.index()].excess = 0.0;
        self.nodes[SINK.index()].excess = 0.0;

        let mut label1_count = 0;
        for i in 2..self.nodes.len() {
            if self.nodes[i].excess > 0.0 {
                self.nodes[i].label = 1;
                self.buckets.push_back(&mut self.nodes, 1, NodeId::new(i));
                label1_count += 1;
            }
        }
        self.label_count[1] = label1_count;
        self.label_count[0] = (self.nodes.len() - 2) - label1_count;
        self.nodes[SOURCE.index()].label = self.n_current;
        self.nodes[SINK.index()].label = 0;
        self.highest_strong_label = 1;
    }

    // ---- Root selection ---------------------------------------------------

    fn get_highest_strong_root(&mut self) -> Option<NodeId> {
        let mut label = self.highest_strong_label;
        while label > 0 {
            if !self.buckets.is_empty(label) {
                if self.label_count[label - 1] > 0 {
                    let root = self.buckets.pop_front(&mut self.nodes, label)?;
                    self.highest_strong_label = label;
                    return Some(root);
                }
                while let Some(r) = self.buckets.pop_front(&mut self.nodes, label) {
                    self.lift_all(r);
                }
                self.stats.gaps += 1;
            }
            label -= 1;
        }

        // No strong root at label >= 1: promote everything sitting at
        // the (normally dormant) label-0 bucket up to label 1.
        if self.buckets.is_empty(0) {
            return None;
        }
        while let Some(v) = self.buckets.pop_front(&mut self.nodes, 0) {
            self.label_count[0] -= 1;
            self.nodes[v.index()].label = 1;
            self.label_count[1] += 1;
            self.stats.relabels += 1;
            self.buckets.push_back(&mut self.nodes, 1, v);
        }
        self.highest_strong_label = 1;
        self.buckets.pop_front(&mut self.nodes, 1)
    }

    fn lift_all(&mut self, root: NodeId) {
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            let old_label = self.nodes[node.index()].label;
            self.label_count[old_label] -= 1;
            self.nodes[node.index()].label = self.n_current;
            self.label_count[self.n_current] += 1;
            let mut child = self.nodes[node.index()].child_list;
            while let Some(c) = child {
                child = self.nodes[c.index()].next;
                stack.push(c);
            }
        }
    }

    // ---- Root processing ----------------------------------------------

    fn process_root(&mut self, r: NodeId) {
        self.nodes[r.index()].next_scan = self.nodes[r.index()].child_list;
        self.discharge(r);
    }

    /// Implements `processRoot`'s "find a weak neighbor, else relabel"
    /// loop. `current` walks r's subtree via `next_scan`/`parent`,
    /// checking every node sharing r's current label for a weak
    /// out-of-tree neighbor (any of them makes an equally valid merge
    /// target for discharging r); when the whole subtree is exhausted at
    /// the present label, r itself is relabeled and the search resumes.
    fn discharge(&mut self, r: NodeId) {
        let mut current = r;
        loop {
            if let Some(candidate) = self.nodes[current.index()].next_scan {
                self.nodes[current.index()].next_scan = self.nodes[candidate.index()].next;
                if self.nodes[candidate.index()].label == self.nodes[current.index()].label {
                    current = candidate;
                    self.nodes[current.index()].next_scan = self.nodes[current.index()].child_list;
                }
                continue;
            }

            if let Some((arc_id, weak)) = self.find_weak(current) {
                self.merge(weak, current, arc_id);
                // `current`'s rotation carries r along as its new
                // descendant regardless of where in r's subtree the
                // weak neighbor was found; r still holds the excess
                // that triggered processing this root.
                self.push_excess(r);
                return;
            }

            if current == r {
                self.relabel(r);
                if self.nodes[r.index()].label >= self.n_current {
                    return;
                }
                current = r;
                self.nodes[current.index()].next_scan = self.nodes[current.index()].child_list;
                continue;
            }

            current = self.nodes[current.index()]
                .parent
                .expect("node visited while scanning r's subtree must have a parent within it");
        }
    }

    fn relabel(&mut self, r: NodeId) {
        let old_label = self.nodes[r.index()].label;
        self.label_count[old_label] -= 1;
        let new_label = old_label + 1;
        self.nodes[r.index()].label = new_label;
        self.label_count[new_label] += 1;
        self.nodes[r.index()].next_arc = 0;
        self.stats.relabels += 1;
        if new_label > self.highest_strong_label {
            self.highest_strong_label = new_label;
        }
    }

    /// Scans `node`'s out-of-tree arcs, starting at its stored cursor,
    /// for a neighbor at exactly `node.label - 1` with residual capacity
    /// flowing away from `node`.
    fn find_weak(&mut self, node: NodeId) -> Option<(crate::model::ArcId, NodeId)> {
        let target = self.nodes[node.index()].label.checked_sub(1)?;
        let len = self.nodes[node.index()].out_of_tree.len();
        if len == 0 {
            return None;
        }
        let start = self.nodes[node.index()].next_arc % len;
        for offset in 0..len {
            let slot = (start + offset) % len;
            let arc_id = self.nodes[node.index()].out_of_tree[slot];
            let arc = &self.arcs[arc_id.index()];
            let other = if arc.from == node { arc.to } else { arc.from };
            self.stats.arc_scans += 1;
            if self.nodes[other.index()].label == target && residual_from(arc, node) > 0.0 {
                self.nodes[node.index()].next_arc = slot;
                return Some((arc_id, other));
            }
        }
        self.nodes[node.index()].next_arc = start;
        None
    }

    // ---- Merge: tree rotation ------------------------------------------

    /// Attaches `child` below `parent` via `arc_id`. `child`'s existing
    /// ancestor chain (up to its old root) is rotated in place so that
    /// the path from `child` to its old root becomes a path from `child`
    /// *up* to its new root through `parent` — the old root ends up
    /// hanging off `child`. When `child` was already its own root (the
    /// common case: `child` is the strong root being processed) the
    /// chain is empty and this reduces to a plain attach.
    fn merge(&mut self, parent: NodeId, child: NodeId, arc_id: crate::model::ArcId) {
        let mut path = vec![child];
        let mut cur = child;
        while let Some(p) = self.nodes[cur.index()].parent {
            path.push(p);
            cur = p;
        }

        // Pass 1: detach every non-root element from its original
        // parent's child list, using only untouched pointers.
        for i in 0..path.len().saturating_sub(1) {
            let node = path[i];
            let old_parent = path[i + 1];
            self.detach_from_child_list(old_parent, node);
        }

        // Pass 2: reverse each edge, rebuilding child -> ... -> old root.
        for i in 0..path.len().saturating_sub(1) {
            let a = path[i];
            let b = path[i + 1];
            let edge_arc = self.nodes[a.index()]
                .arc_to_parent
                .expect("path element must carry its old arc_to_parent");
            self.arcs[edge_arc.index()].direction = !self.arcs[edge_arc.index()].direction;
            self.nodes[b.index()].parent = Some(a);
            self.nodes[b.index()].arc_to_parent = Some(edge_arc);
            self.nodes[b.index()].next = self.nodes[a.index()].child_list;
            self.nodes[a.index()].child_list = Some(b);
        }

        self.nodes[child.index()].parent = Some(parent);
        self.nodes[child.index()].arc_to_parent = Some(arc_id);
        self.arcs[arc_id.index()].direction = self.arcs[arc_id.index()].from == child;
        self.nodes[child.index()].next = self.nodes[parent.index()].child_list;
        self.nodes[parent.index()].child_list = Some(child);
        self.remove_out_of_tree(child, arc_id);
        self.remove_out_of_tree(parent, arc_id);
        self.stats.mergers += 1;
    }

    fn detach_from_child_list(&mut self, parent: NodeId, child: NodeId) {
        if self.nodes[parent.index()].child_list == Some(child) {
            self.nodes[parent.index()].child_list = self.nodes[child.index()].next;
        } else {
            let mut cur = self.nodes[parent.index()].child_list;
            while let Some(c) = cur {
                let nxt = self.nodes[c.index()].next;
                if nxt == Some(child) {
                    self.nodes[c.index()].next = self.nodes[child.index()].next;
                    break;
                }
                cur = nxt;
            }
        }
        self.nodes[child.index()].next = None;
    }

    fn remove_out_of_tree(&mut self, node: NodeId, arc_id: crate::model::ArcId) {
        let list = &mut self.nodes[node.index()].out_of_tree;
        if let Some(pos) = list.iter().position(|&a| a == arc_id) {
            list.swap_remove(pos);
        }
    }

    // ---- Push excess up the tree ---------------------------------------

    fn push_excess(&mut self, root: NodeId) {
        let mut current = root;
        loop {
            if self.nodes[current.index()].excess <= 0.0 {
                break;
            }
            let parent = match self.nodes[current.index()].parent {
                Some(p) => p,
                None => break,
            };
            let arc_id = self.nodes[current.index()]
                .arc_to_parent
                .expect("tree node must carry its arc_to_parent");
            let direction = self.arcs[arc_id.index()].direction;
            self.stats.pushes += 1;
            let broke = if direction {
                self.push_upward(current, parent, arc_id)
            } else {
                self.push_downward(current, parent, arc_id)
            };
            if broke {
                break;
            }
            current = parent;
        }
    }

    fn push_upward(&mut self, current: NodeId, parent: NodeId, arc_id: crate::model::ArcId) -> bool {
        let residual = self.arcs[arc_id.index()].residual_capacity();
        let excess = self.nodes[current.index()].excess;
        let amount = excess.min(residual);
        self.arcs[arc_id.index()].flow += amount;
        self.nodes[current.index()].excess -= amount;
        self.nodes[parent.index()].excess += amount;
        if self.arcs[arc_id.index()].residual_capacity() <= 0.0 {
            self.break_tree_edge(current, parent, arc_id);
            true
        } else {
            false
        }
    }

    fn push_downward(&mut self, current: NodeId, parent: NodeId, arc_id: crate::model::ArcId) -> bool {
        let residual = self.arcs[arc_id.index()].flow;
        let excess = self.nodes[current.index()].excess;
        let amount = excess.min(residual);
        self.arcs[arc_id.index()].flow -= amount;
        self.nodes[current.index()].excess -= amount;
        self.nodes[parent.index()].excess += amount;
        if self.arcs[arc_id.index()].flow <= 0.0 {
            self.break_tree_edge(current, parent, arc_id);
            true
        } else {
            false
        }
    }

    fn break_tree_edge(&mut self, current: NodeId, parent: NodeId, arc_id: crate::model::ArcId) {
        self.detach_from_child_list(parent, current);
        self.nodes[current.index()].parent = None;
        self.nodes[current.index()].arc_to_parent = None;
        self.nodes[parent.index()].out_of_tree.push(arc_id);
        self.nodes[current.index()].out_of_tree.push(arc_id);
        let label = self.nodes[current.index()].label;
        self.buckets.push_back(&mut self.nodes, label, current);
    }
}

fn residual_from(arc: &Arc, node: NodeId) -> f64 {
    if arc.from == node {
        arc.capacity - arc.flow
    } else {
        arc.flow
    }
}
