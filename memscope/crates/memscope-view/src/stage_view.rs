//! MemoryProfilerStageView - a stage together with its instance view
//!
//! All selection goes through this type so the instance view is reconciled
//! with every change the stage applies.

use std::rc::Rc;

use memscope_heap::{ClassId, FieldId, HeapId, HeapSnapshot, InstanceId};

use crate::columns::RenderedRow;
use crate::config::InspectorConfig;
use crate::error::Result;
use crate::instance_view::{MemoryInstanceView, SelectionRequest};
use crate::menu::{ContextMenuItem, GoToInstanceAction};
use crate::navigate::Navigation;
use crate::selection::SelectionChanges;
use crate::stage::{MemoryProfilerStage, ProfilerMode, SelectionObserver, SubscriptionId};
use crate::tree::NodeId;

/// Source location a row can jump to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeLocation {
    pub class_name: String,
}

/// One context menu entry as presented to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub text: String,
    pub enabled: bool,
}

#[derive(Debug)]
pub struct MemoryProfilerStageView {
    stage: MemoryProfilerStage,
    instance_view: MemoryInstanceView,
}

impl Default for MemoryProfilerStageView {
    fn default() -> Self {
        Self::new(InspectorConfig::default())
    }
}

impl MemoryProfilerStageView {
    pub fn new(config: InspectorConfig) -> Self {
        let instance_view = MemoryInstanceView::new(&config);
        Self {
            stage: MemoryProfilerStage::new(config),
            instance_view,
        }
    }

    pub fn stage(&self) -> &MemoryProfilerStage {
        &self.stage
    }

    pub fn instance_view(&self) -> &MemoryInstanceView {
        &self.instance_view
    }

    pub fn subscribe<O>(&mut self, observer: O) -> SubscriptionId
    where
        O: SelectionObserver + 'static,
    {
        self.stage.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.stage.unsubscribe(id)
    }

    pub fn load_capture(&mut self, snapshot: Rc<HeapSnapshot>) -> SelectionChanges {
        let changes = self.stage.load_capture(snapshot);
        self.instance_view.apply_changes(&self.stage, &changes);
        changes
    }

    pub fn select_heap(&mut self, heap: Option<HeapId>) -> Result<SelectionChanges> {
        let changes = self.stage.select_heap(heap)?;
        Ok(self.reconcile(changes))
    }

    pub fn select_class(&mut self, class: Option<ClassId>) -> Result<SelectionChanges> {
        let changes = self.stage.select_class(class)?;
        Ok(self.reconcile(changes))
    }

    pub fn select_instance(&mut self, instance: Option<InstanceId>) -> Result<SelectionChanges> {
        let changes = self.stage.select_instance(instance)?;
        Ok(self.reconcile(changes))
    }

    pub fn select_field(&mut self, field: Option<FieldId>) -> Result<SelectionChanges> {
        let changes = self.stage.select_field(field)?;
        Ok(self.reconcile(changes))
    }

    pub fn reset(&mut self) -> SelectionChanges {
        let changes = self.stage.reset();
        self.reconcile(changes)
    }

    fn reconcile(&mut self, changes: SelectionChanges) -> SelectionChanges {
        self.instance_view.apply_changes(&self.stage, &changes);
        changes
    }

    /// Select whatever `node` of the instance tree stands for
    pub fn select_tree_node(&mut self, node: NodeId) -> Result<SelectionChanges> {
        let Some(snapshot) = self.stage.capture_rc() else {
            return Ok(Vec::new());
        };
        match self.instance_view.selection_request(node, &snapshot) {
            Some(SelectionRequest::Instance(instance)) => self.select_instance(instance),
            Some(SelectionRequest::Field { owner, field }) => {
                let mut changes = self.select_instance(Some(owner))?;
                changes.extend(self.select_field(Some(field))?);
                Ok(changes)
            }
            None => Ok(Vec::new()),
        }
    }

    pub fn expand_node(&mut self, node: NodeId) -> bool {
        self.instance_view.expand(node)
    }

    pub fn collapse_node(&mut self, node: NodeId) -> bool {
        self.instance_view.collapse(node)
    }

    pub fn visible_rows(&mut self) -> Vec<(NodeId, RenderedRow)> {
        match self.stage.capture_rc() {
            Some(snapshot) => self.instance_view.visible_rows(&snapshot),
            None => Vec::new(),
        }
    }

    /// Child count of the instance tree root, 0 without a tree
    pub fn root_child_count(&mut self) -> usize {
        match self.stage.capture_rc() {
            Some(snapshot) => self.instance_view.root_child_count(&snapshot),
            None => 0,
        }
    }

    pub fn context_menu(&self) -> Vec<MenuEntry> {
        self.instance_view
            .context_menu()
            .iter()
            .map(|item| MenuEntry {
                text: item.text().to_string(),
                enabled: item.is_enabled(&self.stage),
            })
            .collect()
    }

    /// Run the context menu item at `index`
    ///
    /// A successful navigation returns the profiler to normal mode.
    pub fn run_context_menu(&mut self, index: usize) -> Result<Navigation> {
        let navigation = match self.instance_view.context_menu().get(index) {
            Some(item) if item.is_enabled(&self.stage) => item.run(&mut self.stage)?,
            _ => Navigation::NoTarget,
        };
        self.finish_navigation(navigation)
    }

    pub fn go_to_instance(&mut self) -> Result<Navigation> {
        let navigation = GoToInstanceAction.run(&mut self.stage)?;
        self.finish_navigation(navigation)
    }

    fn finish_navigation(&mut self, navigation: Navigation) -> Result<Navigation> {
        if let Navigation::Applied(changes) = &navigation {
            self.instance_view.apply_changes(&self.stage, changes);
            self.stage.set_profiler_mode(ProfilerMode::Normal);
        }
        Ok(navigation)
    }

    /// Class of the selected instance, else the selected class
    pub fn code_location(&self) -> Option<CodeLocation> {
        let snapshot = self.stage.capture()?;
        let class = self
            .stage
            .selected_instance()
            .and_then(|instance| snapshot.class_of_instance(instance))
            .or(self.stage.selected_class())?;
        Some(CodeLocation {
            class_name: snapshot.class(class)?.name.clone(),
        })
    }

    /// Called before jumping to a code location
    pub fn pre_navigate(&mut self) {
        self.stage.set_profiler_mode(ProfilerMode::Normal);
    }

    pub fn profiler_mode(&self) -> ProfilerMode {
        self.stage.profiler_mode()
    }

    pub fn set_profiler_mode(&mut self, mode: ProfilerMode) -> bool {
        self.stage.set_profiler_mode(mode)
    }

    /// Drop the instance tree; the stage selection is left alone
    pub fn reset_instance_view(&mut self) {
        self.instance_view.reset();
    }
}
