//! Object Module - records stored in the snapshot arenas
//!
//! Aggregate numbers (instance counts, shallow and retained sizes) are
//! computed by the profiling backend and stored as captured; nothing in this
//! crate derives them.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::ids::{ClassId, FieldId, HeapId, InstanceId};

/// One heap segment of a capture (`app`, `image`, `zygote`, ...)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeapObject {
    pub name: String,

    /// Classes of this heap keyed by name, in capture order
    pub classes: IndexMap<String, ClassId>,
}

impl HeapObject {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            classes: IndexMap::new(),
        }
    }

    /// Class ids in capture order
    pub fn class_ids(&self) -> impl Iterator<Item = ClassId> + '_ {
        self.classes.values().copied()
    }
}

/// A class and the instances of it found in one heap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassObject {
    pub name: String,
    pub heap: HeapId,
    pub instances: Vec<InstanceId>,
    pub total_count: u64,
    pub shallow_size: u64,
    pub retained_size: u64,
}

impl ClassObject {
    /// Class name without its package, `com.foo.Bar` -> `Bar`
    pub fn simple_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }
}

/// A single object captured in the heap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceObject {
    pub class: ClassId,
    pub label: String,
    /// Result of the object's `toString()`, when the backend captured one
    pub to_string_text: Option<String>,
    /// Shortest distance from a GC root
    pub depth: u32,
    pub shallow_size: u64,
    pub retained_size: u64,
    pub fields: Vec<FieldId>,
}

/// A named slot of an instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldObject {
    pub name: String,
    pub owner: InstanceId,
    pub value: FieldValue,
}

/// Primitive field types, matching the JVM basic types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveType {
    Bool,
    Char,
    Float,
    Double,
    Byte,
    Short,
    Int,
    Long,
}

impl PrimitiveType {
    pub fn name(self) -> &'static str {
        match self {
            PrimitiveType::Bool => "boolean",
            PrimitiveType::Char => "char",
            PrimitiveType::Float => "float",
            PrimitiveType::Double => "double",
            PrimitiveType::Byte => "byte",
            PrimitiveType::Short => "short",
            PrimitiveType::Int => "int",
            PrimitiveType::Long => "long",
        }
    }
}

/// What a field holds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Unset reference
    Null,
    /// A primitive, captured as display text
    Primitive { ty: PrimitiveType, text: String },
    /// Reference to a class aggregate (e.g. a `Class<?>` object)
    Class(ClassId),
    /// Reference to a concrete instance
    Instance(InstanceId),
}

impl FieldValue {
    /// True for the two variants that point at another heap object
    pub fn is_reference(&self) -> bool {
        matches!(self, FieldValue::Class(_) | FieldValue::Instance(_))
    }

    pub fn referenced_instance(&self) -> Option<InstanceId> {
        match self {
            FieldValue::Instance(id) => Some(*id),
            _ => None,
        }
    }
}
