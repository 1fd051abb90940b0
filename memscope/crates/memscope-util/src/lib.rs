//! memscope-util - Foundation types shared by the memscope crates
//!
//! ============================================================================
//! MODULE OVERVIEW
//! ============================================================================
//!
//! A heap snapshot is stored as a set of flat arenas (heaps, classes,
//! instances, fields) that refer to each other by index. This crate provides
//! the typed index machinery those arenas are built on, so that a `ClassId`
//! can never be used to look up an instance.
//!
//! DESIGN PRINCIPLES:
//! ------------------
//! 1. TYPE SAFETY
//!    Every arena has its own index type; mixing them is a compile error.
//!
//! 2. STABLE IDENTITY
//!    Arenas only grow while a snapshot is built and are frozen afterwards,
//!    so an index stays valid for the lifetime of the snapshot that issued it.
//
// ============================================================================
// INDEX LAYOUT
// ============================================================================
//
// ```
// IndexVec<ClassId, ClassObject>:
// ┌──────────┬──────────┬──────────┬─────┐
// │ ClassId0 │ ClassId1 │ ClassId2 │ ... │
// └──────────┴──────────┴──────────┴─────┘
//
// ClassId (4 bytes):
// ┌──────────────┐
// │    index     │  u32: position in the arena
// └──────────────┘
// ```

pub mod error;
pub mod index_vec;

pub use error::{IndexVecError, IndexVecResult};
pub use index_vec::{Idx, IndexVec};

// Re-export hash collections for convenience
pub use rustc_hash::FxHashMap;
pub use rustc_hash::FxHashSet;
