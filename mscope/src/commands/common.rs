//! Shared lookups for mscope commands.
//!
//! Commands take names on the command line; these helpers turn them into
//! snapshot ids or report which name did not match.

use std::path::Path;
use std::rc::Rc;

use memscope_heap::{load_capture_file, ClassId, FieldId, HeapId, HeapSnapshot, InstanceId};
use memscope_view::MemoryProfilerStageView;

use crate::config::Config;
use crate::error::{MscopeError, Result};

/// A loaded capture with a stage view over it
pub struct Session {
    pub snapshot: Rc<HeapSnapshot>,
    pub view: MemoryProfilerStageView,
}

impl Session {
    pub fn open(capture: &Path, config: &Config) -> Result<Self> {
        let snapshot = Rc::new(load_capture_file(capture)?);
        tracing::info!(
            "loaded {}: {} heaps, {} classes, {} instances",
            capture.display(),
            snapshot.heap_count(),
            snapshot.class_count(),
            snapshot.instance_count()
        );
        let mut view = MemoryProfilerStageView::new(config.inspector.clone());
        view.load_capture(Rc::clone(&snapshot));
        Ok(Self { snapshot, view })
    }

    /// Select `heap` and then `class` by name
    pub fn select_class(&mut self, heap: &str, class: &str) -> Result<(HeapId, ClassId)> {
        let heap_id = find_heap(&self.snapshot, heap)?;
        let class_id = find_class(&self.snapshot, heap_id, heap, class)?;
        self.view.select_heap(Some(heap_id))?;
        self.view.select_class(Some(class_id))?;
        Ok((heap_id, class_id))
    }
}

pub fn find_heap(snapshot: &HeapSnapshot, name: &str) -> Result<HeapId> {
    snapshot
        .heap_by_name(name)
        .ok_or_else(|| MscopeError::not_found("heap", name))
}

pub fn find_class(
    snapshot: &HeapSnapshot,
    heap: HeapId,
    heap_name: &str,
    name: &str,
) -> Result<ClassId> {
    snapshot
        .class_by_name(heap, name)
        .ok_or_else(|| MscopeError::not_found("class", format!("{}/{}", heap_name, name)))
}

pub fn find_instance(snapshot: &HeapSnapshot, class: ClassId, label: &str) -> Result<InstanceId> {
    snapshot
        .class(class)
        .and_then(|c| {
            c.instances
                .iter()
                .copied()
                .find(|id| snapshot.instance(*id).is_some_and(|i| i.label == label))
        })
        .ok_or_else(|| MscopeError::not_found("instance", label))
}

pub fn find_field(snapshot: &HeapSnapshot, instance: InstanceId, name: &str) -> Result<FieldId> {
    snapshot
        .instance(instance)
        .and_then(|i| {
            i.fields
                .iter()
                .copied()
                .find(|id| snapshot.field(*id).is_some_and(|f| f.name == name))
        })
        .ok_or_else(|| MscopeError::not_found("field", name))
}

/// Optional number, `-` when absent
pub fn or_dash(value: Option<String>) -> String {
    value.unwrap_or_else(|| "-".to_string())
}
