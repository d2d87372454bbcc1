use crate::model::{Node, NodeId};

/// Per-label FIFO buckets of strong roots — nodes with positive excess
/// waiting to be processed, chosen lowest-index-first within a bucket
/// and highest-label-first across buckets.
///
/// Implemented as intrusive linked lists through `Node::next`, per this
/// crate's arena/index strategy: `head`/`tail` store only the endpoints,
/// membership and order live in the nodes themselves.
#[derive(Debug)]
pub struct StrongRootBuckets {
    head: Vec<Option<NodeId>>,
    tail: Vec<Option<NodeId>>,
}

impl StrongRootBuckets {
    /// `max_label` is the highest label index ever addressed (`n_current`).
    pub fn new(max_label: usize) -> Self {
        StrongRootBuckets {
            head: vec![None; max_label + 1],
            tail: vec![None; max_label + 1],
        }
    }

    pub fn push_back(&mut self, nodes: &mut [Node], label: usize, id: NodeId) {
        nodes[id.index()].next = None;
        match self.tail[label] {
            Some(t) => {
                nodes[t.index()].next = Some(id);
                self.tail[label] = Some(id);
            }
            None => {
                self.head[label] = Some(id);
                self.tail[label] = Some(id);
            }
        }
    }

    pub fn pop_front(&mut self, nodes: &mut [Node], label: usize) -> Option<NodeId> {
        let head = self.head[label]?;
        let next = nodes[head.index()].next;
        self.head[label] = next;
        if next.is_none() {
            self.tail[label] = None;
        }
        nodes[head.index()].next = None;
        Some(head)
    }

    pub fn is_empty(&self, label: usize) -> bool {
        self.head[label].is_none()
    }
}
