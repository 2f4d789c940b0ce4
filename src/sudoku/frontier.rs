#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! The explicit search tree and its frontier.
//!
//! Nodes live in an index-addressed arena ([`SearchTree`]). The frontier,
//! the ordered set of tree leaves still pending evaluation, is an intrusive
//! doubly-linked list threaded through the arena entries, so splicing
//! children in at a node's position and unlinking a node are O(1). Parents
//! are plain `Option<NodeId>` indices and each entry carries its own
//! live-child counter, so unwinding never has to dereference a possibly
//! absent parent.
//!
//! Node 0 is the permanent root sentinel: no assignment, no parent. It
//! represents "nothing committed yet" and its arena slot is never recycled.

use crate::sudoku::board::Assignment;

/// Arena index of a search node.
pub type NodeId = usize;

/// The root sentinel's arena index.
pub const ROOT: NodeId = 0;

#[derive(Debug, Clone)]
struct Node {
    /// The candidate placement this node represents; `None` only for the
    /// root sentinel.
    assignment: Option<Assignment>,
    parent: Option<NodeId>,
    /// Children created by expansion and not yet contracted away.
    live_children: usize,
    prev: Option<NodeId>,
    next: Option<NodeId>,
    in_frontier: bool,
}

/// Arena of search nodes plus the frontier list threaded through them.
#[derive(Debug, Clone)]
pub struct SearchTree {
    nodes: Vec<Node>,
    /// Recycled arena slots.
    free: Vec<NodeId>,
    head: Option<NodeId>,
    tail: Option<NodeId>,
    len: usize,
    created: u64,
    high_water: usize,
}

impl SearchTree {
    /// Creates a tree whose frontier holds only the root sentinel.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                assignment: None,
                parent: None,
                live_children: 0,
                prev: None,
                next: None,
                in_frontier: true,
            }],
            free: Vec::new(),
            head: Some(ROOT),
            tail: Some(ROOT),
            len: 1,
            created: 1,
            high_water: 1,
        }
    }

    /// The frontier's leading node: the next node to process.
    #[must_use]
    pub const fn head(&self) -> Option<NodeId> {
        self.head
    }

    /// Current frontier length.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether the frontier is empty (search exhausted).
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether `id` is currently a frontier entry.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes[id].in_frontier
    }

    /// The assignment `id` represents; `None` for the root sentinel.
    #[must_use]
    pub fn assignment(&self, id: NodeId) -> Option<Assignment> {
        self.nodes[id].assignment
    }

    /// The parent of `id`; `None` for the root sentinel.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].parent
    }

    /// Whether `id` is the root sentinel.
    #[must_use]
    pub const fn is_root(id: NodeId) -> bool {
        id == ROOT
    }

    /// Number of live (not yet contracted) children of `id`.
    #[must_use]
    pub fn live_children(&self, id: NodeId) -> usize {
        self.nodes[id].live_children
    }

    /// Total nodes ever allocated, including the root.
    #[must_use]
    pub const fn created(&self) -> u64 {
        self.created
    }

    /// Largest frontier length observed so far.
    #[must_use]
    pub const fn high_water(&self) -> usize {
        self.high_water
    }

    /// Frontier node ids in order, head first.
    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.head, move |&id| self.nodes[id].next)
    }

    fn alloc(&mut self, assignment: Assignment, parent: NodeId) -> NodeId {
        self.created += 1;
        let node = Node {
            assignment: Some(assignment),
            parent: Some(parent),
            live_children: 0,
            prev: None,
            next: None,
            in_frontier: false,
        };
        if let Some(id) = self.free.pop() {
            self.nodes[id] = node;
            id
        } else {
            self.nodes.push(node);
            self.nodes.len() - 1
        }
    }

    /// Links `id` into the frontier immediately before `before`.
    fn link_before(&mut self, id: NodeId, before: NodeId) {
        let prev = self.nodes[before].prev;
        self.nodes[id].prev = prev;
        self.nodes[id].next = Some(before);
        self.nodes[before].prev = Some(id);
        match prev {
            Some(p) => self.nodes[p].next = Some(id),
            None => self.head = Some(id),
        }
        self.nodes[id].in_frontier = true;
        self.len += 1;
        if self.len > self.high_water {
            self.high_water = self.len;
        }
    }

    /// Expands `parent`: creates one child per assignment, splices the
    /// children into the frontier at `parent`'s exact position (preserving
    /// their relative order), and unlinks `parent` itself.
    ///
    /// The assignment sequence must be non-empty; an empty candidate set is
    /// a dead end and must be handled by contraction instead.
    ///
    /// Returns the number of children created.
    ///
    /// # Panics
    ///
    /// Panics if `parent` is not currently in the frontier. That is a
    /// programming-error fault in the caller, not a recoverable condition.
    pub fn branch(
        &mut self,
        parent: NodeId,
        assignments: impl IntoIterator<Item = Assignment>,
    ) -> usize {
        assert!(
            self.nodes[parent].in_frontier,
            "branch called on a node outside the frontier"
        );
        let mut count = 0;
        for assignment in assignments {
            let child = self.alloc(assignment, parent);
            self.link_before(child, parent);
            count += 1;
        }
        debug_assert!(count > 0, "branch requires a non-empty candidate set");
        self.nodes[parent].live_children += count;
        self.unlink(parent);
        count
    }

    /// Removes `id` from the frontier. No-op if it is not a frontier entry.
    pub fn unlink(&mut self, id: NodeId) {
        if !self.nodes[id].in_frontier {
            return;
        }
        let prev = self.nodes[id].prev;
        let next = self.nodes[id].next;
        match prev {
            Some(p) => self.nodes[p].next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.nodes[n].prev = prev,
            None => self.tail = prev,
        }
        let node = &mut self.nodes[id];
        node.prev = None;
        node.next = None;
        node.in_frontier = false;
        self.len -= 1;
    }

    /// Decrements the live-child counter of `id`.
    pub fn decrement_children(&mut self, id: NodeId) {
        debug_assert!(self.nodes[id].live_children > 0);
        self.nodes[id].live_children -= 1;
    }

    /// Returns the arena slot of a contracted node to the free list.
    ///
    /// The root sentinel is permanent and is never released.
    pub fn release(&mut self, id: NodeId) {
        debug_assert!(!Self::is_root(id), "the root sentinel is never released");
        debug_assert!(!self.nodes[id].in_frontier);
        self.free.push(id);
    }
}

impl Default for SearchTree {
    fn default() -> Self {
        Self::new()
    }
}
