//! MemoryProfilerStage - the selection state manager of one session
//!
//! The stage owns the loaded capture, the current [`SelectionState`], the
//! display mode, and the list of selection observers. Every mutation
//! validates the requested object against its parent scope, applies the
//! cascade, then notifies observers synchronously, one call per level that
//! actually changed, ancestor first.

use std::fmt;
use std::rc::Rc;

use memscope_heap::{ClassId, FieldId, HeapId, HeapSnapshot, InstanceId};

use crate::config::{InspectorConfig, InvalidSelectionPolicy};
use crate::error::{Result, SelectionError};
use crate::selection::{SelectionChange, SelectionChanges, SelectionKind, SelectionState};

/// Receiver of selection-changed notifications
///
/// Closures taking `&SelectionChange` implement this trait.
#[cfg_attr(test, mockall::automock)]
pub trait SelectionObserver {
    fn on_selection_changed(&mut self, change: &SelectionChange);
}

impl<F> SelectionObserver for F
where
    F: FnMut(&SelectionChange),
{
    fn on_selection_changed(&mut self, change: &SelectionChange) {
        self(change)
    }
}

/// Handle returned by [`MemoryProfilerStage::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Display mode of the profiler
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProfilerMode {
    #[default]
    Normal,
    Expanded,
}

pub struct MemoryProfilerStage {
    capture: Option<Rc<HeapSnapshot>>,
    selection: SelectionState,
    mode: ProfilerMode,
    config: InspectorConfig,
    observers: Vec<(SubscriptionId, Box<dyn SelectionObserver>)>,
    next_subscription: u64,
}

impl fmt::Debug for MemoryProfilerStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryProfilerStage")
            .field("has_capture", &self.capture.is_some())
            .field("selection", &self.selection)
            .field("mode", &self.mode)
            .field("config", &self.config)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Default for MemoryProfilerStage {
    fn default() -> Self {
        Self::new(InspectorConfig::default())
    }
}

impl MemoryProfilerStage {
    pub fn new(config: InspectorConfig) -> Self {
        Self {
            capture: None,
            selection: SelectionState::default(),
            mode: ProfilerMode::Normal,
            config,
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn config(&self) -> &InspectorConfig {
        &self.config
    }

    pub fn capture(&self) -> Option<&HeapSnapshot> {
        self.capture.as_deref()
    }

    pub fn capture_rc(&self) -> Option<Rc<HeapSnapshot>> {
        self.capture.clone()
    }

    /// Replace the capture; the selection is reset to empty first
    pub fn load_capture(&mut self, snapshot: Rc<HeapSnapshot>) -> SelectionChanges {
        let changes = self.reset();
        log::debug!(
            "capture loaded: {} heaps, {} classes",
            snapshot.heap_count(),
            snapshot.class_count()
        );
        self.capture = Some(snapshot);
        changes
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn selected_heap(&self) -> Option<HeapId> {
        self.selection.heap
    }

    pub fn selected_class(&self) -> Option<ClassId> {
        self.selection.class
    }

    pub fn selected_instance(&self) -> Option<InstanceId> {
        self.selection.instance
    }

    pub fn selected_field(&self) -> Option<FieldId> {
        self.selection.field
    }

    pub fn profiler_mode(&self) -> ProfilerMode {
        self.mode
    }

    /// Returns true if the mode changed
    pub fn set_profiler_mode(&mut self, mode: ProfilerMode) -> bool {
        let changed = self.mode != mode;
        self.mode = mode;
        changed
    }

    // ========================================================================
    // Observers
    // ========================================================================

    pub fn subscribe<O>(&mut self, observer: O) -> SubscriptionId
    where
        O: SelectionObserver + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Returns false if the subscription was already gone
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != before
    }

    // ========================================================================
    // Selection
    // ========================================================================

    pub fn select_heap(&mut self, heap: Option<HeapId>) -> Result<SelectionChanges> {
        if self.selection.heap == heap {
            return Ok(Vec::new());
        }
        if let Some(id) = heap {
            let snapshot = self.capture.as_deref().ok_or(SelectionError::NoCapture)?;
            if snapshot.heap(id).is_none() {
                return self.reject_or_clamp(
                    SelectionKind::Heap,
                    format!("{} is not part of the loaded capture", id),
                );
            }
        }
        let next = SelectionState::for_heap(heap);
        Ok(self.apply(next))
    }

    pub fn select_class(&mut self, class: Option<ClassId>) -> Result<SelectionChanges> {
        if self.selection.class == class {
            return Ok(Vec::new());
        }
        if let Some(id) = class {
            let snapshot = self.capture.as_deref().ok_or(SelectionError::NoCapture)?;
            let problem = match self.selection.heap {
                None => Some(format!("{} selected with no heap selected", id)),
                Some(heap) if !snapshot.heap_contains_class(heap, id) => {
                    Some(format!("{} is not in {}", id, heap))
                }
                Some(_) => None,
            };
            if let Some(reason) = problem {
                return self.reject_or_clamp(SelectionKind::Class, reason);
            }
        }
        let next = self.selection.with_class(class);
        Ok(self.apply(next))
    }

    pub fn select_instance(&mut self, instance: Option<InstanceId>) -> Result<SelectionChanges> {
        if self.selection.instance == instance {
            return Ok(Vec::new());
        }
        if let Some(id) = instance {
            let snapshot = self.capture.as_deref().ok_or(SelectionError::NoCapture)?;
            let problem = match self.selection.class {
                None => Some(format!("{} selected with no class selected", id)),
                Some(class) if !snapshot.class_contains_instance(class, id) => {
                    Some(format!("{} is not an instance of {}", id, class))
                }
                Some(_) => None,
            };
            if let Some(reason) = problem {
                return self.reject_or_clamp(SelectionKind::Instance, reason);
            }
        }
        let next = self.selection.with_instance(instance);
        Ok(self.apply(next))
    }

    pub fn select_field(&mut self, field: Option<FieldId>) -> Result<SelectionChanges> {
        if self.selection.field == field {
            return Ok(Vec::new());
        }
        if let Some(id) = field {
            let snapshot = self.capture.as_deref().ok_or(SelectionError::NoCapture)?;
            let problem = match self.selection.instance {
                None => Some(format!("{} selected with no instance selected", id)),
                Some(instance) if !snapshot.instance_contains_field(instance, id) => {
                    Some(format!("{} is not a field of {}", id, instance))
                }
                Some(_) => None,
            };
            if let Some(reason) = problem {
                return self.reject_or_clamp(SelectionKind::Field, reason);
            }
        }
        let next = self.selection.with_field(field);
        Ok(self.apply(next))
    }

    /// Clear all four levels
    pub fn reset(&mut self) -> SelectionChanges {
        self.apply(SelectionState::default())
    }

    fn reject_or_clamp(&mut self, kind: SelectionKind, reason: String) -> Result<SelectionChanges> {
        match self.config.invalid_selection {
            InvalidSelectionPolicy::Reject => Err(SelectionError::invalid(kind, reason)),
            InvalidSelectionPolicy::Clamp => {
                log::warn!("clamping invalid {} selection: {}", kind, reason);
                let next = self.selection.cleared_from(kind);
                Ok(self.apply(next))
            }
        }
    }

    fn apply(&mut self, next: SelectionState) -> SelectionChanges {
        let changes = self.selection.diff(&next);
        self.selection = next;
        for change in &changes {
            log::debug!("selection changed: {:?}", change);
            for (_, observer) in self.observers.iter_mut() {
                observer.on_selection_changed(change);
            }
        }
        changes
    }
}
