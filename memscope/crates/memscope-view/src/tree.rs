//! Lazily materialized tree over memory objects
//!
//! Nodes live in an arena indexed by [`NodeId`]. A node's children are
//! computed from its adapter the first time they are asked for and cached
//! until [`MemoryObjectTree::reset`]. Nothing below a node is evaluated
//! before that, so a class with many instances costs one node until it is
//! opened.

use memscope_heap::{HeapSnapshot, MemoryObject};
use memscope_util::{define_idx, IndexVec};

define_idx!(
    /// Index of a node within one [`MemoryObjectTree`]
    NodeId
);

/// Supplies the children of a tree node on demand
pub trait TreeAdapter: Copy + Eq {
    type Source: ?Sized;

    fn child_adapters(&self, source: &Self::Source) -> Vec<Self>;
}

impl TreeAdapter for MemoryObject {
    type Source = HeapSnapshot;

    fn child_adapters(&self, source: &HeapSnapshot) -> Vec<MemoryObject> {
        self.children(source)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryObjectTreeNode<T> {
    pub adapter: T,
    pub parent: Option<NodeId>,
    /// `None` until first accessed
    children: Option<Vec<NodeId>>,
}

impl<T> MemoryObjectTreeNode<T> {
    fn new(adapter: T, parent: Option<NodeId>) -> Self {
        Self {
            adapter,
            parent,
            children: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryObjectTree<T> {
    nodes: IndexVec<NodeId, MemoryObjectTreeNode<T>>,
    root: Option<NodeId>,
}

impl<T: TreeAdapter> Default for MemoryObjectTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TreeAdapter> MemoryObjectTree<T> {
    /// Empty tree with no root
    pub fn new() -> Self {
        Self {
            nodes: IndexVec::new(),
            root: None,
        }
    }

    pub fn with_root(adapter: T) -> Self {
        let mut tree = Self::new();
        tree.set_root(adapter);
        tree
    }

    /// Replace the whole tree with a single unmaterialized root
    pub fn set_root(&mut self, adapter: T) -> NodeId {
        self.nodes.clear();
        let root = self.nodes.push(MemoryObjectTreeNode::new(adapter, None));
        self.root = Some(root);
        root
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn root_adapter(&self) -> Option<T> {
        self.root.and_then(|id| self.adapter(id))
    }

    pub fn node(&self, id: NodeId) -> Option<&MemoryObjectTreeNode<T>> {
        self.nodes.get(id)
    }

    pub fn adapter(&self, id: NodeId) -> Option<T> {
        self.nodes.get(id).map(|n| n.adapter)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|n| n.parent)
    }

    pub fn is_materialized(&self, id: NodeId) -> bool {
        self.nodes.get(id).is_some_and(|n| n.children.is_some())
    }

    /// Number of nodes created so far
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Children of `id`, materializing them on first access
    ///
    /// Unknown ids have no children.
    pub fn children(&mut self, id: NodeId, source: &T::Source) -> &[NodeId] {
        let adapter = match self.nodes.get(id) {
            Some(node) if node.children.is_none() => Some(node.adapter),
            Some(_) => None,
            None => return &[],
        };
        if let Some(adapter) = adapter {
            let ids: Vec<NodeId> = adapter
                .child_adapters(source)
                .into_iter()
                .map(|child| self.nodes.push(MemoryObjectTreeNode::new(child, Some(id))))
                .collect();
            log::debug!("materialized {} children under {}", ids.len(), id);
            self.nodes[id].children = Some(ids);
        }
        self.nodes[id].children.as_deref().unwrap_or(&[])
    }

    pub fn child_count(&mut self, id: NodeId, source: &T::Source) -> usize {
        self.children(id, source).len()
    }

    pub fn child_at(&mut self, id: NodeId, index: usize, source: &T::Source) -> Option<NodeId> {
        self.children(id, source).get(index).copied()
    }

    /// Direct child of `id` wrapping `adapter`
    pub fn find_child(&mut self, id: NodeId, adapter: T, source: &T::Source) -> Option<NodeId> {
        let children = self.children(id, source).to_vec();
        children
            .into_iter()
            .find(|child| self.nodes[*child].adapter == adapter)
    }

    /// Children of the root, or 0 when the tree has no root
    pub fn root_child_count(&mut self, source: &T::Source) -> usize {
        match self.root {
            Some(root) => self.child_count(root, source),
            None => 0,
        }
    }

    /// Node ids from the root down to `id`, inclusive
    pub fn path_to(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut current = self.nodes.get(id).map(|_| id);
        while let Some(node) = current {
            path.push(node);
            current = self.parent(node);
        }
        path.reverse();
        path
    }

    /// Drop every node; the root becomes `None`
    pub fn reset(&mut self) {
        self.nodes.clear();
        self.root = None;
    }
}
