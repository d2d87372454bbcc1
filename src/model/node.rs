use super::{ArcId, NodeId};

/// A node inside one [`crate::cut_problem::CutProblem`]'s node list.
///
/// `parent`/`child_list`/`next` encode Hochbaum's normalized tree: a
/// non-root node has exactly one parent arc, and `next` doubles as the
/// sibling link within `child_list` when the node is attached, or as the
/// strong-root bucket link when it is a root carrying positive excess —
/// the two uses never overlap, since a root by definition has no parent
/// and so is never anyone's `next`-linked child.
#[derive(Debug, Clone)]
pub struct Node {
    /// Stable external id: -1 for the artificial source, -2 for the
    /// artificial sink, else the caller's original node index.
    pub original_index: i64,
    pub label: usize,
    pub excess: f64,
    pub parent: Option<NodeId>,
    pub child_list: Option<NodeId>,
    pub next: Option<NodeId>,
    pub next_scan: Option<NodeId>,
    pub arc_to_parent: Option<ArcId>,
    /// Arcs adjacent to this node that are not currently tree edges.
    pub out_of_tree: Vec<ArcId>,
    /// Cursor into `out_of_tree` for resuming a weak-neighbor scan.
    pub next_arc: usize,
    /// Total adjacency, used only to presize `out_of_tree`.
    pub num_adjacent: usize,
}

impl Node {
    /// A node with no adjacency or tree state yet — the shape every
    /// node has immediately after a `CutProblem` is built, before arcs
    /// are attached.
    pub fn fresh(original_index: i64) -> Self {
        Node {
            original_index,
            label: 0,
            excess: 0.0,
            parent: None,
            child_list: None,
            next: None,
            next_scan: None,
            arc_to_parent: None,
            out_of_tree: Vec::new(),
            next_arc: 0,
            num_adjacent: 0,
        }
    }
}
