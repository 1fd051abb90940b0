//! JSON capture files
//!
//! A capture file is the serialized form a profiling backend hands to the
//! viewer:
//!
//! ```json
//! { "heaps": [ { "name": "app", "classes": [ {
//!     "name": "com.Foo", "total_count": 1, "shallow_size": 16, "retained_size": 16,
//!     "instances": [ { "id": "foo-1", "label": "Foo@1", "depth": 1,
//!       "shallow_size": 16, "retained_size": 16,
//!       "fields": [ { "name": "next", "value": { "instance": "foo-1" } },
//!                   { "name": "count", "value": { "primitive": "int", "text": "3" } },
//!                   { "name": "kind", "value": { "class": { "heap": "app", "name": "com.Foo" } } },
//!                   { "name": "empty", "value": null } ] } ] } ] } ] }
//! ```
//!
//! Loading runs in two passes: every heap, class and instance is added
//! first, then fields are resolved against the id tables, so references
//! may point anywhere in the file.

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::builder::{ClassInfo, InstanceInfo, SnapshotBuilder};
use crate::error::{Result, SnapshotError};
use crate::ids::InstanceId;
use crate::object::{FieldValue, PrimitiveType};
use crate::snapshot::HeapSnapshot;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureFile {
    #[serde(default)]
    pub heaps: Vec<CaptureHeap>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureHeap {
    pub name: String,
    #[serde(default)]
    pub classes: Vec<CaptureClass>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureClass {
    pub name: String,
    /// Falls back to the number of listed instances when absent
    #[serde(default)]
    pub total_count: Option<u64>,
    #[serde(default)]
    pub shallow_size: u64,
    #[serde(default)]
    pub retained_size: u64,
    #[serde(default)]
    pub instances: Vec<CaptureInstance>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureInstance {
    /// Object id, unique across the whole capture
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub to_string: Option<String>,
    #[serde(default)]
    pub depth: u32,
    #[serde(default)]
    pub shallow_size: u64,
    #[serde(default)]
    pub retained_size: u64,
    #[serde(default)]
    pub fields: Vec<CaptureField>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureField {
    pub name: String,
    /// `null` or missing means an unset reference
    #[serde(default)]
    pub value: Option<CaptureValue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CaptureValue {
    Instance { instance: String },
    Class { class: CaptureClassRef },
    Primitive { primitive: PrimitiveType, text: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureClassRef {
    pub heap: String,
    pub name: String,
}

impl CaptureFile {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Resolve the file into a snapshot
    pub fn into_snapshot(self) -> Result<HeapSnapshot> {
        let mut builder = SnapshotBuilder::new();
        let mut instance_ids: IndexMap<String, InstanceId> = IndexMap::new();
        let mut pending: Vec<(InstanceId, Vec<CaptureField>)> = Vec::new();

        for heap in self.heaps {
            let heap_id = builder.add_heap(heap.name)?;
            for class in heap.classes {
                let total_count = class.total_count.unwrap_or(class.instances.len() as u64);
                let info = ClassInfo::named(class.name).with_totals(
                    total_count,
                    class.shallow_size,
                    class.retained_size,
                );
                let class_id = builder.add_class(heap_id, info)?;
                for instance in class.instances {
                    if instance_ids.contains_key(&instance.id) {
                        return Err(SnapshotError::DuplicateInstanceId { id: instance.id });
                    }
                    let mut info = InstanceInfo::labeled(instance.label).with_sizes(
                        instance.depth,
                        instance.shallow_size,
                        instance.retained_size,
                    );
                    info.to_string_text = instance.to_string;
                    let instance_id = builder.add_instance(class_id, info)?;
                    instance_ids.insert(instance.id, instance_id);
                    pending.push((instance_id, instance.fields));
                }
            }
        }

        // Every heap and class exists by now, so class references resolve
        // against the builder's tables.
        for (owner, fields) in pending {
            for field in fields {
                let value = resolve_value(&builder, &instance_ids, &field)?;
                builder.add_field(owner, field.name, value)?;
            }
        }

        let snapshot = builder.finish()?;
        log::info!(
            "loaded capture: {} heaps, {} classes, {} instances",
            snapshot.heap_count(),
            snapshot.class_count(),
            snapshot.instance_count()
        );
        Ok(snapshot)
    }
}

fn resolve_value(
    builder: &SnapshotBuilder,
    instance_ids: &IndexMap<String, InstanceId>,
    field: &CaptureField,
) -> Result<FieldValue> {
    let value = match &field.value {
        None => FieldValue::Null,
        Some(CaptureValue::Primitive { primitive, text }) => FieldValue::Primitive {
            ty: *primitive,
            text: text.clone(),
        },
        Some(CaptureValue::Instance { instance }) => {
            let id = instance_ids
                .get(instance)
                .ok_or_else(|| SnapshotError::UnresolvedInstance {
                    field: field.name.clone(),
                    id: instance.clone(),
                })?;
            FieldValue::Instance(*id)
        }
        Some(CaptureValue::Class { class }) => {
            let id = builder
                .lookup_class(&class.heap, &class.name)
                .ok_or_else(|| SnapshotError::UnresolvedClass {
                    field: field.name.clone(),
                    heap: class.heap.clone(),
                    name: class.name.clone(),
                })?;
            FieldValue::Class(id)
        }
    };
    Ok(value)
}

impl HeapSnapshot {
    /// Parse and resolve a JSON capture
    pub fn from_json_str(json: &str) -> Result<Self> {
        CaptureFile::from_json_str(json)?.into_snapshot()
    }
}

/// Read a JSON capture file from disk
pub fn load_capture_file(path: &Path) -> Result<HeapSnapshot> {
    log::debug!("reading capture {}", path.display());
    let content = std::fs::read_to_string(path)?;
    HeapSnapshot::from_json_str(&content)
}
