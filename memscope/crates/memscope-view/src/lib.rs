//! # memscope-view - Selection state and instance tree over a heap snapshot
//!
//! [`MemoryProfilerStage`] holds the four-level selection (heap, class,
//! instance, field) and keeps it consistent: a level may only hold an
//! object of the level above, and changing a level clears everything below
//! it. [`MemoryProfilerStageView`] pairs a stage with the
//! [`MemoryInstanceView`], the lazily built tree of the selected class's
//! instances and their fields.
//!
//! ```rust
//! use std::rc::Rc;
//! use memscope_heap::{ClassInfo, InstanceInfo, SnapshotBuilder};
//! use memscope_view::{InspectorConfig, MemoryProfilerStageView};
//!
//! let mut builder = SnapshotBuilder::new();
//! let heap = builder.add_heap("app").unwrap();
//! let class = builder.add_class(heap, ClassInfo::named("com.Foo")).unwrap();
//! builder.add_instance(class, InstanceInfo::labeled("Foo@1")).unwrap();
//! builder.add_instance(class, InstanceInfo::labeled("Foo@2")).unwrap();
//!
//! let mut view = MemoryProfilerStageView::new(InspectorConfig::default());
//! view.load_capture(Rc::new(builder.finish().unwrap()));
//! view.select_heap(Some(heap)).unwrap();
//! view.select_class(Some(class)).unwrap();
//! assert_eq!(view.root_child_count(), 2);
//! ```

pub mod columns;
pub mod config;
pub mod error;
pub mod instance_view;
pub mod menu;
pub mod navigate;
pub mod selection;
pub mod stage;
pub mod stage_view;
pub mod tree;

pub use columns::{render_object, InstanceColumn, RenderedRow};
pub use config::{InspectorConfig, InvalidSelectionPolicy};
pub use error::{Result, SelectionError};
pub use instance_view::{MemoryInstanceView, SelectionRequest};
pub use menu::{ContextMenuItem, GoToInstanceAction};
pub use navigate::{
    can_navigate, go_to_field_target, resolve_field_target, Navigation, NavigationTarget,
};
pub use selection::{SelectionChange, SelectionChanges, SelectionKind, SelectionState};
pub use stage::{MemoryProfilerStage, ProfilerMode, SelectionObserver, SubscriptionId};
pub use stage_view::{CodeLocation, MemoryProfilerStageView, MenuEntry};
pub use tree::{MemoryObjectTree, MemoryObjectTreeNode, NodeId, TreeAdapter};
