//! Incremental construction of a [`HeapSnapshot`].
//!
//! Owners must exist before their members are added (heap before class,
//! class before instance, instance before field). Field values may point
//! forward at classes or instances added later; they are checked once, in
//! [`SnapshotBuilder::finish`].

use crate::error::{Result, SnapshotError};
use crate::ids::{ClassId, FieldId, HeapId, InstanceId};
use crate::object::{ClassObject, FieldObject, FieldValue, HeapObject, InstanceObject};
use crate::snapshot::HeapSnapshot;

/// Captured attributes of a class
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassInfo {
    pub name: String,
    pub total_count: u64,
    pub shallow_size: u64,
    pub retained_size: u64,
}

impl ClassInfo {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_totals(mut self, total_count: u64, shallow_size: u64, retained_size: u64) -> Self {
        self.total_count = total_count;
        self.shallow_size = shallow_size;
        self.retained_size = retained_size;
        self
    }
}

/// Captured attributes of an instance
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstanceInfo {
    pub label: String,
    pub to_string_text: Option<String>,
    pub depth: u32,
    pub shallow_size: u64,
    pub retained_size: u64,
}

impl InstanceInfo {
    pub fn labeled(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Default::default()
        }
    }

    pub fn with_to_string(mut self, text: impl Into<String>) -> Self {
        self.to_string_text = Some(text.into());
        self
    }

    pub fn with_sizes(mut self, depth: u32, shallow_size: u64, retained_size: u64) -> Self {
        self.depth = depth;
        self.shallow_size = shallow_size;
        self.retained_size = retained_size;
        self
    }
}

/// Builder for a [`HeapSnapshot`]
#[derive(Debug, Default)]
pub struct SnapshotBuilder {
    snapshot: HeapSnapshot,
}

impl SnapshotBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_heap(&mut self, name: impl Into<String>) -> Result<HeapId> {
        let name = name.into();
        if self.snapshot.heap_by_name(&name).is_some() {
            return Err(SnapshotError::DuplicateHeap { name });
        }
        Ok(self.snapshot.heaps.push(HeapObject::new(name)))
    }

    pub fn add_class(&mut self, heap: HeapId, info: ClassInfo) -> Result<ClassId> {
        let next = self.snapshot.classes.next_index();
        let heap_object = self
            .snapshot
            .heaps
            .get_mut(heap)
            .ok_or(SnapshotError::UnknownHeap(heap))?;
        if heap_object.classes.contains_key(&info.name) {
            return Err(SnapshotError::DuplicateClass {
                heap: heap_object.name.clone(),
                name: info.name,
            });
        }
        heap_object.classes.insert(info.name.clone(), next);

        let id = self.snapshot.classes.push(ClassObject {
            name: info.name,
            heap,
            instances: Vec::new(),
            total_count: info.total_count,
            shallow_size: info.shallow_size,
            retained_size: info.retained_size,
        });
        debug_assert_eq!(id, next);
        Ok(id)
    }

    pub fn add_instance(&mut self, class: ClassId, info: InstanceInfo) -> Result<InstanceId> {
        let next = self.snapshot.instances.next_index();
        let class_object = self
            .snapshot
            .classes
            .get_mut(class)
            .ok_or(SnapshotError::UnknownClass(class))?;
        class_object.instances.push(next);

        Ok(self.snapshot.instances.push(InstanceObject {
            class,
            label: info.label,
            to_string_text: info.to_string_text,
            depth: info.depth,
            shallow_size: info.shallow_size,
            retained_size: info.retained_size,
            fields: Vec::new(),
        }))
    }

    pub fn add_field(
        &mut self,
        owner: InstanceId,
        name: impl Into<String>,
        value: FieldValue,
    ) -> Result<FieldId> {
        let next = self.snapshot.fields.next_index();
        let instance = self
            .snapshot
            .instances
            .get_mut(owner)
            .ok_or(SnapshotError::UnknownInstance(owner))?;
        instance.fields.push(next);

        Ok(self.snapshot.fields.push(FieldObject {
            name: name.into(),
            owner,
            value,
        }))
    }

    /// Find a class already added under `heap`, both by name
    pub fn lookup_class(&self, heap: &str, name: &str) -> Option<ClassId> {
        let heap = self.snapshot.heap_by_name(heap)?;
        self.snapshot.class_by_name(heap, name)
    }

    /// Check field references and freeze the snapshot
    pub fn finish(self) -> Result<HeapSnapshot> {
        let snapshot = self.snapshot;
        for field in snapshot.fields.iter() {
            let missing = match &field.value {
                FieldValue::Class(class) if snapshot.class(*class).is_none() => {
                    Some(class.to_string())
                }
                FieldValue::Instance(instance) if snapshot.instance(*instance).is_none() => {
                    Some(instance.to_string())
                }
                _ => None,
            };
            if let Some(target) = missing {
                return Err(SnapshotError::DanglingReference {
                    field: field.name.clone(),
                    target,
                });
            }
        }

        log::debug!(
            "snapshot built: {} heaps, {} classes, {} instances, {} fields",
            snapshot.heap_count(),
            snapshot.class_count(),
            snapshot.instance_count(),
            snapshot.field_count()
        );
        Ok(snapshot)
    }
}
