//! List: doubly-linked, non-owning sequence of handles.
//!
//! Nodes live in a generational slot map owned by the list, so links are
//! keys rather than pointers and a node reference that outlived its node
//! resolves to `None`. The list tracks its own head; `append` and `remove`
//! still report the resulting head so callers written against the
//! "thread the returned head through every call" convention keep working,
//! but there is no caller-held head that can dangle.

use log::debug;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Reference to a node owned by a [`List`].
    pub struct NodeRef;
}

#[derive(Debug, Clone)]
struct Node<H> {
    payload: H,
    prev: Option<NodeRef>,
    next: Option<NodeRef>,
}

#[derive(Debug, Clone)]
pub struct List<H> {
    nodes: SlotMap<NodeRef, Node<H>>,
    head: Option<NodeRef>,
}

impl<H> List<H>
where
    H: Copy + PartialEq,
{
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            head: None,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn head(&self) -> Option<NodeRef> {
        self.head
    }

    /// Link a new node carrying `payload` after the tail and return the head.
    /// On an empty list the new node is the head.
    pub fn append(&mut self, payload: H) -> NodeRef {
        let tail = self.last();
        let node = self.nodes.insert(Node {
            payload,
            prev: tail,
            next: None,
        });
        match tail {
            Some(t) => self.nodes[t].next = Some(node),
            None => self.head = Some(node),
        }
        // A head exists: either the old one or the node just linked.
        self.head.unwrap_or(node)
    }

    /// Walk forward links to the terminal node. O(n).
    pub fn last(&self) -> Option<NodeRef> {
        let mut cur = self.head?;
        while let Some(next) = self.nodes[cur].next {
            cur = next;
        }
        Some(cur)
    }

    /// Unlink and free the first node whose payload is `payload`, returning
    /// the (possibly new) head. A miss leaves the list unchanged.
    pub fn remove(&mut self, payload: H) -> Option<NodeRef> {
        if let Some(node) = self.find(payload) {
            self.unlink(node);
        }
        self.head
    }

    /// Unlink and free a specific node. Returns its payload, or `None` if the
    /// reference is stale.
    pub fn remove_node(&mut self, node: NodeRef) -> Option<H> {
        self.unlink(node)
    }

    fn unlink(&mut self, node: NodeRef) -> Option<H> {
        let Node {
            payload,
            prev,
            next,
        } = self.nodes.remove(node)?;
        match prev {
            Some(p) => self.nodes[p].next = next,
            None => self.head = next,
        }
        if let Some(n) = next {
            self.nodes[n].prev = prev;
        }
        Some(payload)
    }

    /// First node carrying `payload`, by identity.
    pub fn find(&self, payload: H) -> Option<NodeRef> {
        self.nodes_forward().find(|&n| self.nodes[n].payload == payload)
    }

    pub fn payload(&self, node: NodeRef) -> Option<H> {
        self.nodes.get(node).map(|n| n.payload)
    }
    pub fn next(&self, node: NodeRef) -> Option<NodeRef> {
        self.nodes.get(node).and_then(|n| n.next)
    }
    pub fn prev(&self, node: NodeRef) -> Option<NodeRef> {
        self.nodes.get(node).and_then(|n| n.prev)
    }

    fn nodes_forward(&self) -> impl Iterator<Item = NodeRef> + '_ {
        core::iter::successors(self.head, move |&n| self.nodes[n].next)
    }

    /// Payloads from head to tail.
    pub fn iter(&self) -> impl Iterator<Item = H> + '_ {
        self.nodes_forward().map(move |n| self.nodes[n].payload)
    }

    /// Free every node in forward order. Payloads are untouched.
    pub fn free_all(mut self) {
        let mut freed = 0usize;
        let mut cur = self.head.take();
        while let Some(n) = cur {
            cur = self.nodes.remove(n).and_then(|node| node.next);
            freed += 1;
        }
        debug!("freed {freed} list nodes");
    }
}

impl<H> Default for List<H>
where
    H: Copy + PartialEq,
{
    fn default() -> Self {
        Self::new()
    }
}
