//! MemoryInstanceView - the instance tree of the selected class
//!
//! The view mirrors the stage's selection: its tree is rooted at the
//! selected class, its selected node is the selected instance (or the
//! selected field beneath it). It never mutates the stage itself; user
//! input is translated into a [`SelectionRequest`] which the owning stage
//! view applies, feeding the resulting changes back through
//! [`MemoryInstanceView::apply_changes`].

use std::fmt;

use memscope_heap::{FieldId, HeapSnapshot, InstanceId, MemoryObject};
use memscope_util::FxHashSet;

use crate::columns::{render_object, RenderedRow};
use crate::config::InspectorConfig;
use crate::menu::{ContextMenuItem, GoToInstanceAction};
use crate::selection::SelectionChange;
use crate::stage::MemoryProfilerStage;
use crate::tree::{MemoryObjectTree, NodeId};

/// Stage mutation requested by selecting a tree node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionRequest {
    Instance(Option<InstanceId>),
    Field { owner: InstanceId, field: FieldId },
}

pub struct MemoryInstanceView {
    tree: Option<MemoryObjectTree<MemoryObject>>,
    selected: Option<NodeId>,
    expanded: FxHashSet<NodeId>,
    context_menu: Vec<Box<dyn ContextMenuItem>>,
    show_to_string: bool,
}

impl fmt::Debug for MemoryInstanceView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryInstanceView")
            .field("tree", &self.tree)
            .field("selected", &self.selected)
            .field("expanded", &self.expanded)
            .field("context_menu", &self.context_menu.len())
            .finish()
    }
}

impl MemoryInstanceView {
    pub fn new(config: &InspectorConfig) -> Self {
        Self {
            tree: None,
            selected: None,
            expanded: FxHashSet::default(),
            context_menu: vec![Box::new(GoToInstanceAction)],
            show_to_string: config.show_to_string,
        }
    }

    pub fn tree(&self) -> Option<&MemoryObjectTree<MemoryObject>> {
        self.tree.as_ref()
    }

    pub fn context_menu(&self) -> &[Box<dyn ContextMenuItem>] {
        &self.context_menu
    }

    pub fn selected_node(&self) -> Option<NodeId> {
        self.selected
    }

    pub fn selected_object(&self) -> Option<MemoryObject> {
        let tree = self.tree.as_ref()?;
        tree.adapter(self.selected?)
    }

    /// 0 or 1
    pub fn selection_count(&self) -> usize {
        usize::from(self.selected.is_some())
    }

    /// Children under the root, 0 when there is no tree
    pub fn root_child_count(&mut self, snapshot: &HeapSnapshot) -> usize {
        self.tree
            .as_mut()
            .map_or(0, |tree| tree.root_child_count(snapshot))
    }

    /// Root children in order, materializing them if needed
    pub fn root_children(&mut self, snapshot: &HeapSnapshot) -> Vec<MemoryObject> {
        let Some(tree) = self.tree.as_mut() else {
            return Vec::new();
        };
        let Some(root) = tree.root() else {
            return Vec::new();
        };
        let children = tree.children(root, snapshot).to_vec();
        children.into_iter().filter_map(|id| tree.adapter(id)).collect()
    }

    /// Reconcile with changes the stage just applied
    ///
    /// A view without a tree (e.g. after [`reset`](Self::reset)) is rebuilt
    /// from the stage's selected class even when `changes` is empty.
    pub fn apply_changes(&mut self, stage: &MemoryProfilerStage, changes: &[SelectionChange]) {
        for change in changes {
            if let SelectionChange::Class { new, .. } = *change {
                match new {
                    Some(class) => {
                        let root = MemoryObject::Class(class);
                        if self.tree.as_ref().and_then(|t| t.root_adapter()) != Some(root) {
                            self.rebuild(root);
                        }
                    }
                    None => self.reset(),
                }
            }
        }
        if self.tree.is_none() {
            if let Some(class) = stage.selected_class() {
                self.rebuild(MemoryObject::Class(class));
            }
        }
        self.sync_selection(stage);
    }

    fn rebuild(&mut self, root: MemoryObject) {
        log::debug!("instance tree rebuilt for {:?}", root);
        self.tree = Some(MemoryObjectTree::with_root(root));
        self.selected = None;
        self.expanded.clear();
    }

    /// Point the selected node at the stage's instance or field
    fn sync_selection(&mut self, stage: &MemoryProfilerStage) {
        self.selected = None;
        let (Some(tree), Some(snapshot)) = (self.tree.as_mut(), stage.capture()) else {
            return;
        };
        let Some(root) = tree.root() else {
            return;
        };
        let Some(instance) = stage.selected_instance() else {
            return;
        };
        let Some(instance_node) = tree.find_child(root, MemoryObject::Instance(instance), snapshot)
        else {
            return;
        };
        self.selected = Some(instance_node);

        if let Some(field) = stage.selected_field() {
            if let Some(field_node) = tree.find_child(instance_node, MemoryObject::Field(field), snapshot)
            {
                self.expanded.insert(instance_node);
                self.selected = Some(field_node);
            }
        }
    }

    /// What selecting `node` should do to the stage
    pub fn selection_request(&self, node: NodeId, snapshot: &HeapSnapshot) -> Option<SelectionRequest> {
        let tree = self.tree.as_ref()?;
        if tree.root() == Some(node) {
            return Some(SelectionRequest::Instance(None));
        }
        match tree.adapter(node)? {
            MemoryObject::Instance(id) => Some(SelectionRequest::Instance(Some(id))),
            MemoryObject::Field(field) => Some(SelectionRequest::Field {
                owner: snapshot.field(field)?.owner,
                field,
            }),
            MemoryObject::Heap(_) | MemoryObject::Class(_) => None,
        }
    }

    pub fn expand(&mut self, node: NodeId) -> bool {
        match self.tree.as_ref() {
            Some(tree) if tree.node(node).is_some() => self.expanded.insert(node),
            _ => false,
        }
    }

    pub fn collapse(&mut self, node: NodeId) -> bool {
        self.expanded.remove(&node)
    }

    pub fn is_expanded(&self, node: NodeId) -> bool {
        self.expanded.contains(&node)
    }

    /// Rows in display order: root children at depth 0, plus the
    /// children of every expanded node beneath it
    pub fn visible_rows(&mut self, snapshot: &HeapSnapshot) -> Vec<(NodeId, RenderedRow)> {
        let Some(tree) = self.tree.as_mut() else {
            return Vec::new();
        };
        let Some(root) = tree.root() else {
            return Vec::new();
        };

        let mut rows = Vec::new();
        let mut stack: Vec<(NodeId, usize)> =
            tree.children(root, snapshot).iter().rev().map(|id| (*id, 0)).collect();
        while let Some((node, depth)) = stack.pop() {
            let Some(adapter) = tree.adapter(node) else {
                continue;
            };
            if let Some(row) = render_object(adapter, depth, snapshot, self.show_to_string) {
                rows.push((node, row));
            }
            if self.expanded.contains(&node) {
                stack.extend(tree.children(node, snapshot).iter().rev().map(|id| (*id, depth + 1)));
            }
        }
        rows
    }

    pub fn render_row(&self, node: NodeId, depth: usize, snapshot: &HeapSnapshot) -> Option<RenderedRow> {
        let adapter = self.tree.as_ref()?.adapter(node)?;
        render_object(adapter, depth, snapshot, self.show_to_string)
    }

    /// Drop the tree along with selection and expansion state
    pub fn reset(&mut self) {
        self.tree = None;
        self.selected = None;
        self.expanded.clear();
    }
}
