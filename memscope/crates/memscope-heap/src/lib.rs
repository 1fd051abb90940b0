//! # memscope-heap - Heap snapshot data model
//!
//! A heap snapshot is the graph captured by a profiling backend at one point
//! in time: a set of heaps, each holding classes, each holding instances,
//! each holding fields that may reference other classes or instances.
//!
//! ## Layout
//!
//! ```text
//! HeapSnapshot
//! ├── heaps:     IndexVec<HeapId, HeapObject>          classes (by name, insertion order)
//! ├── classes:   IndexVec<ClassId, ClassObject>        owning heap + instances
//! ├── instances: IndexVec<InstanceId, InstanceObject>  owning class + fields
//! └── fields:    IndexVec<FieldId, FieldObject>        owning instance + value
//! ```
//!
//! Ownership edges point down (heap → class → instance → field) and every
//! object also records its owner, so membership checks are O(1). Field
//! values are references expressed as ids and are never traversed as
//! children.
//!
//! ## Building a snapshot
//!
//! ```rust
//! use memscope_heap::{ClassInfo, FieldValue, InstanceInfo, SnapshotBuilder};
//!
//! let mut builder = SnapshotBuilder::new();
//! let app = builder.add_heap("app")?;
//! let foo = builder.add_class(app, ClassInfo::named("com.Foo"))?;
//! let first = builder.add_instance(foo, InstanceInfo::labeled("Foo@1"))?;
//! let second = builder.add_instance(foo, InstanceInfo::labeled("Foo@2"))?;
//! builder.add_field(first, "next", FieldValue::Instance(second))?;
//! let snapshot = builder.finish()?;
//!
//! assert_eq!(snapshot.class(foo).map(|c| c.instances.len()), Some(2));
//! # Ok::<(), memscope_heap::SnapshotError>(())
//! ```

pub mod builder;
pub mod capture;
pub mod error;
pub mod ids;
pub mod memory_object;
pub mod object;
pub mod snapshot;

pub use builder::{ClassInfo, InstanceInfo, SnapshotBuilder};
pub use capture::{load_capture_file, CaptureFile};
pub use error::{Result, SnapshotError};
pub use ids::{ClassId, FieldId, HeapId, InstanceId};
pub use memory_object::MemoryObject;
pub use object::{ClassObject, FieldObject, FieldValue, HeapObject, InstanceObject, PrimitiveType};
pub use snapshot::HeapSnapshot;
