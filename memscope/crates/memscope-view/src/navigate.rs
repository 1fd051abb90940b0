//! Go to Instance: follow the selected field to the object it references

use memscope_heap::{ClassId, FieldId, FieldValue, HeapId, HeapSnapshot, InstanceId};

use crate::error::Result;
use crate::selection::SelectionChanges;
use crate::stage::MemoryProfilerStage;

/// Selection chain owning the object a field points at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationTarget {
    pub heap: HeapId,
    pub class: ClassId,
    pub instance: Option<InstanceId>,
}

/// Outcome of a navigation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Applied(SelectionChanges),
    /// Nothing selected to follow, or the field holds no reference
    NoTarget,
}

impl Navigation {
    pub fn is_applied(&self) -> bool {
        matches!(self, Navigation::Applied(_))
    }
}

pub fn resolve_field_target(snapshot: &HeapSnapshot, field: FieldId) -> Option<NavigationTarget> {
    match snapshot.field(field)?.value {
        FieldValue::Instance(instance) => {
            let class = snapshot.class_of_instance(instance)?;
            Some(NavigationTarget {
                heap: snapshot.heap_of_class(class)?,
                class,
                instance: Some(instance),
            })
        }
        FieldValue::Class(class) => Some(NavigationTarget {
            heap: snapshot.heap_of_class(class)?,
            class,
            instance: None,
        }),
        FieldValue::Null | FieldValue::Primitive { .. } => None,
    }
}

/// Target of the stage's selected field, if it has one
pub fn selected_field_target(stage: &MemoryProfilerStage) -> Option<NavigationTarget> {
    let field = stage.selected_field()?;
    resolve_field_target(stage.capture()?, field)
}

pub fn can_navigate(stage: &MemoryProfilerStage) -> bool {
    selected_field_target(stage).is_some()
}

/// Select the heap, class and instance the selected field references
///
/// The field stays selected only when it is a field of the target
/// instance; otherwise the field level ends up empty.
pub fn go_to_field_target(stage: &mut MemoryProfilerStage) -> Result<Navigation> {
    let Some(field) = stage.selected_field() else {
        return Ok(Navigation::NoTarget);
    };
    let Some(target) = selected_field_target(stage) else {
        return Ok(Navigation::NoTarget);
    };
    let keep_field = match (target.instance, stage.capture()) {
        (Some(instance), Some(snapshot)) => snapshot.instance_contains_field(instance, field),
        _ => false,
    };

    let mut changes = stage.select_heap(Some(target.heap))?;
    changes.extend(stage.select_class(Some(target.class))?);
    changes.extend(stage.select_instance(target.instance)?);
    if keep_field {
        changes.extend(stage.select_field(Some(field))?);
    } else {
        changes.extend(stage.select_field(None)?);
    }
    log::debug!(
        "navigated {} to {} / {} / {:?}",
        field,
        target.heap,
        target.class,
        target.instance
    );
    Ok(Navigation::Applied(changes))
}
