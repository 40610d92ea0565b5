//! Insertion-ordered storage for one node kind.

use ns_core::ElementId;

/// Anything with a stable id within its own kind.
pub trait Node {
    fn id(&self) -> ElementId;
}

/// A `Vec` of nodes of one kind, searched by id.
///
/// Iteration order is insertion order; the tick loop visits nodes in this
/// order within each kind.  Lookups are linear, which is cheap at the network
/// sizes this simulator targets.
#[derive(Debug)]
pub struct NodeCollection<N> {
    nodes: Vec<N>,
}

impl<N> Default for NodeCollection<N> {
    fn default() -> Self {
        Self { nodes: Vec::new() }
    }
}

impl<N: Node> NodeCollection<N> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `node`.  Id uniqueness is the caller's concern.
    pub fn add(&mut self, node: N) {
        self.nodes.push(node);
    }

    /// Remove and return the node with `id`, preserving the order of the rest.
    pub fn remove_by_id(&mut self, id: ElementId) -> Option<N> {
        let pos = self.position(id)?;
        Some(self.nodes.remove(pos))
    }

    pub fn find_by_id(&self, id: ElementId) -> Option<&N> {
        self.nodes.iter().find(|n| n.id() == id)
    }

    pub fn find_by_id_mut(&mut self, id: ElementId) -> Option<&mut N> {
        self.nodes.iter_mut().find(|n| n.id() == id)
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.position(id).is_some()
    }

    pub fn position(&self, id: ElementId) -> Option<usize> {
        self.nodes.iter().position(|n| n.id() == id)
    }

    /// Ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.nodes.iter().map(Node::id)
    }

    pub fn get(&self, index: usize) -> Option<&N> {
        self.nodes.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut N> {
        self.nodes.get_mut(index)
    }

    /// Mutable access to two distinct nodes at once.  `None` if the indices
    /// coincide or either is out of range.
    pub fn pair_mut(&mut self, a: usize, b: usize) -> Option<(&mut N, &mut N)> {
        if a == b || a.max(b) >= self.nodes.len() {
            return None;
        }
        if a < b {
            let (head, tail) = self.nodes.split_at_mut(b);
            Some((&mut head[a], &mut tail[0]))
        } else {
            let (head, tail) = self.nodes.split_at_mut(a);
            Some((&mut tail[0], &mut head[b]))
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, N> {
        self.nodes.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, N> {
        self.nodes.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl<'a, N: Node> IntoIterator for &'a NodeCollection<N> {
    type Item = &'a N;
    type IntoIter = std::slice::Iter<'a, N>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
