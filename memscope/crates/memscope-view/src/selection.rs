//! Selection state and change records
//!
//! The selection is a chain `heap ⊇ class ⊇ instance ⊇ field`. Each level may
//! only be set when it belongs to the level above it, and clearing or
//! replacing a level clears everything below it (cascade reset).

use std::fmt;

use memscope_heap::{ClassId, FieldId, HeapId, InstanceId, MemoryObject};

/// The four selection levels, ancestor first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SelectionKind {
    Heap,
    Class,
    Instance,
    Field,
}

impl SelectionKind {
    pub const ALL: [SelectionKind; 4] = [
        SelectionKind::Heap,
        SelectionKind::Class,
        SelectionKind::Instance,
        SelectionKind::Field,
    ];
}

impl fmt::Display for SelectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SelectionKind::Heap => "heap",
            SelectionKind::Class => "class",
            SelectionKind::Instance => "instance",
            SelectionKind::Field => "field",
        };
        f.write_str(name)
    }
}

/// What is currently inspected
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionState {
    pub heap: Option<HeapId>,
    pub class: Option<ClassId>,
    pub instance: Option<InstanceId>,
    pub field: Option<FieldId>,
}

impl SelectionState {
    pub fn is_empty(&self) -> bool {
        *self == SelectionState::default()
    }

    /// Value at one level, as a displayable object
    pub fn get(&self, kind: SelectionKind) -> Option<MemoryObject> {
        match kind {
            SelectionKind::Heap => self.heap.map(MemoryObject::Heap),
            SelectionKind::Class => self.class.map(MemoryObject::Class),
            SelectionKind::Instance => self.instance.map(MemoryObject::Instance),
            SelectionKind::Field => self.field.map(MemoryObject::Field),
        }
    }

    /// Copy of this state with `kind` and every level below it cleared
    pub fn cleared_from(&self, kind: SelectionKind) -> SelectionState {
        let mut state = *self;
        if kind <= SelectionKind::Heap {
            state.heap = None;
        }
        if kind <= SelectionKind::Class {
            state.class = None;
        }
        if kind <= SelectionKind::Instance {
            state.instance = None;
        }
        state.field = None;
        state
    }

    /// Selection holding only `heap`; every lower level starts empty
    pub fn for_heap(heap: Option<HeapId>) -> SelectionState {
        SelectionState {
            heap,
            ..SelectionState::default()
        }
    }

    pub fn with_class(&self, class: Option<ClassId>) -> SelectionState {
        SelectionState {
            heap: self.heap,
            class,
            ..SelectionState::default()
        }
    }

    pub fn with_instance(&self, instance: Option<InstanceId>) -> SelectionState {
        SelectionState {
            instance,
            field: None,
            ..*self
        }
    }

    pub fn with_field(&self, field: Option<FieldId>) -> SelectionState {
        SelectionState { field, ..*self }
    }

    /// Changes that turn `self` into `next`, ancestor first
    pub fn diff(&self, next: &SelectionState) -> SelectionChanges {
        let mut changes = Vec::new();
        if self.heap != next.heap {
            changes.push(SelectionChange::Heap {
                old: self.heap,
                new: next.heap,
            });
        }
        if self.class != next.class {
            changes.push(SelectionChange::Class {
                old: self.class,
                new: next.class,
            });
        }
        if self.instance != next.instance {
            changes.push(SelectionChange::Instance {
                old: self.instance,
                new: next.instance,
            });
        }
        if self.field != next.field {
            changes.push(SelectionChange::Field {
                old: self.field,
                new: next.field,
            });
        }
        changes
    }
}

/// One level of the selection changed value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange {
    Heap {
        old: Option<HeapId>,
        new: Option<HeapId>,
    },
    Class {
        old: Option<ClassId>,
        new: Option<ClassId>,
    },
    Instance {
        old: Option<InstanceId>,
        new: Option<InstanceId>,
    },
    Field {
        old: Option<FieldId>,
        new: Option<FieldId>,
    },
}

impl SelectionChange {
    pub fn kind(&self) -> SelectionKind {
        match self {
            SelectionChange::Heap { .. } => SelectionKind::Heap,
            SelectionChange::Class { .. } => SelectionKind::Class,
            SelectionChange::Instance { .. } => SelectionKind::Instance,
            SelectionChange::Field { .. } => SelectionKind::Field,
        }
    }

    pub fn old_value(&self) -> Option<MemoryObject> {
        match *self {
            SelectionChange::Heap { old, .. } => old.map(MemoryObject::Heap),
            SelectionChange::Class { old, .. } => old.map(MemoryObject::Class),
            SelectionChange::Instance { old, .. } => old.map(MemoryObject::Instance),
            SelectionChange::Field { old, .. } => old.map(MemoryObject::Field),
        }
    }

    pub fn new_value(&self) -> Option<MemoryObject> {
        match *self {
            SelectionChange::Heap { new, .. } => new.map(MemoryObject::Heap),
            SelectionChange::Class { new, .. } => new.map(MemoryObject::Class),
            SelectionChange::Instance { new, .. } => new.map(MemoryObject::Instance),
            SelectionChange::Field { new, .. } => new.map(MemoryObject::Field),
        }
    }
}

/// Changes applied by one selection call, in notification order
pub type SelectionChanges = Vec<SelectionChange>;
