//! MemoryObject - the closed set of things a heap view can display
//!
//! Every row of a memory view wraps one of these. The capability set is the
//! same for all variants: a label, optional depth and size numbers, and the
//! children that a tree should show beneath it.
//!
//! | Variant  | Children           | Numbers                          |
//! |----------|--------------------|----------------------------------|
//! | Heap     | classes            | none                             |
//! | Class    | instances          | shallow, retained                |
//! | Instance | fields             | depth, shallow, retained         |
//! | Field    | none (leaf)        | the referenced instance, if any  |

use crate::ids::{ClassId, FieldId, HeapId, InstanceId};
use crate::snapshot::HeapSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemoryObject {
    Heap(HeapId),
    Class(ClassId),
    Instance(InstanceId),
    Field(FieldId),
}

impl MemoryObject {
    pub fn label<'s>(&self, snapshot: &'s HeapSnapshot) -> Option<&'s str> {
        match *self {
            MemoryObject::Heap(id) => snapshot.heap(id).map(|h| h.name.as_str()),
            MemoryObject::Class(id) => snapshot.class(id).map(|c| c.name.as_str()),
            MemoryObject::Instance(id) => snapshot.instance(id).map(|i| i.label.as_str()),
            MemoryObject::Field(id) => snapshot.field(id).map(|f| f.name.as_str()),
        }
    }

    pub fn depth(&self, snapshot: &HeapSnapshot) -> Option<u32> {
        self.numbers_instance(snapshot)
            .and_then(|id| snapshot.instance(id))
            .map(|i| i.depth)
    }

    pub fn shallow_size(&self, snapshot: &HeapSnapshot) -> Option<u64> {
        match *self {
            MemoryObject::Heap(_) => None,
            MemoryObject::Class(id) => snapshot.class(id).map(|c| c.shallow_size),
            _ => self
                .numbers_instance(snapshot)
                .and_then(|id| snapshot.instance(id))
                .map(|i| i.shallow_size),
        }
    }

    pub fn retained_size(&self, snapshot: &HeapSnapshot) -> Option<u64> {
        match *self {
            MemoryObject::Heap(_) => None,
            MemoryObject::Class(id) => snapshot.class(id).map(|c| c.retained_size),
            _ => self
                .numbers_instance(snapshot)
                .and_then(|id| snapshot.instance(id))
                .map(|i| i.retained_size),
        }
    }

    /// Children in capture order; empty for fields and unknown ids
    pub fn children(&self, snapshot: &HeapSnapshot) -> Vec<MemoryObject> {
        match *self {
            MemoryObject::Heap(id) => snapshot
                .heap(id)
                .map(|h| h.class_ids().map(MemoryObject::Class).collect())
                .unwrap_or_default(),
            MemoryObject::Class(id) => snapshot
                .class(id)
                .map(|c| c.instances.iter().copied().map(MemoryObject::Instance).collect())
                .unwrap_or_default(),
            MemoryObject::Instance(id) => snapshot
                .instance(id)
                .map(|i| i.fields.iter().copied().map(MemoryObject::Field).collect())
                .unwrap_or_default(),
            MemoryObject::Field(_) => Vec::new(),
        }
    }

    pub fn has_children(&self, snapshot: &HeapSnapshot) -> bool {
        match *self {
            MemoryObject::Heap(id) => snapshot.heap(id).is_some_and(|h| !h.classes.is_empty()),
            MemoryObject::Class(id) => snapshot.class(id).is_some_and(|c| !c.instances.is_empty()),
            MemoryObject::Instance(id) => snapshot.instance(id).is_some_and(|i| !i.fields.is_empty()),
            MemoryObject::Field(_) => false,
        }
    }

    /// Instance whose depth and sizes this object displays
    fn numbers_instance(&self, snapshot: &HeapSnapshot) -> Option<InstanceId> {
        match *self {
            MemoryObject::Instance(id) => Some(id),
            MemoryObject::Field(id) => snapshot.field(id)?.value.referenced_instance(),
            _ => None,
        }
    }
}
