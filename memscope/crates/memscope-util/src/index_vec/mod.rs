//! IndexVec - A vector indexed by a specific type.
//!
//! Snapshot arenas are `IndexVec`s keyed by their own id type:
//!
//! ```
//! use memscope_util::define_idx;
//! use memscope_util::index_vec::IndexVec;
//!
//! define_idx!(ObjectId);
//!
//! let mut labels: IndexVec<ObjectId, &str> = IndexVec::new();
//! let id = labels.push("Foo@1");
//! assert_eq!(labels[id], "Foo@1");
//! ```

use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

use crate::error::{IndexVecError, IndexVecResult};

/// Trait for types that can be used as indices
///
/// Implementations are normally generated with [`define_idx!`](crate::define_idx).
pub trait Idx: Copy + Eq + PartialEq {
    /// Convert from usize to index type
    ///
    /// # Panics
    ///
    /// Implementations may panic if the usize value is too large to fit
    /// in the index type.
    fn from_usize(idx: usize) -> Self;

    /// Convert index to usize for array indexing
    fn index(self) -> usize;
}

/// A vector indexed by a specific type
///
/// Same layout as `Vec<T>`; the index type is a zero-cost marker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexVec<I, T> {
    raw: Vec<T>,
    _marker: PhantomData<fn(&I)>,
}

impl<I, T> IndexVec<I, T> {
    #[inline]
    pub fn new() -> Self {
        Self {
            raw: Vec::new(),
            _marker: PhantomData,
        }
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            raw: Vec::with_capacity(capacity),
            _marker: PhantomData,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Clear all elements, keeping the allocated capacity
    #[inline]
    pub fn clear(&mut self) {
        self.raw.clear()
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.raw.iter()
    }
}

impl<I: Idx, T> IndexVec<I, T> {
    /// Push an element and return its typed index
    #[inline]
    pub fn push(&mut self, value: T) -> I {
        let index = self.raw.len();
        self.raw.push(value);
        I::from_usize(index)
    }

    #[inline]
    pub fn get(&self, index: I) -> Option<&T> {
        self.raw.get(index.index())
    }

    #[inline]
    pub fn get_mut(&mut self, index: I) -> Option<&mut T> {
        self.raw.get_mut(index.index())
    }

    /// Like [`get`](Self::get), but reports the arena length on a miss.
    pub fn try_get(&self, index: I) -> IndexVecResult<&T> {
        let length = self.raw.len();
        self.raw.get(index.index()).ok_or(IndexVecError::OutOfBounds {
            index: index.index(),
            length,
        })
    }

    /// Returns true if `index` addresses an element of this vector
    #[inline]
    pub fn contains_index(&self, index: I) -> bool {
        index.index() < self.raw.len()
    }

    /// Iterate over `(index, &element)` pairs in insertion order
    pub fn iter_enumerated(&self) -> impl Iterator<Item = (I, &T)> {
        self.raw
            .iter()
            .enumerate()
            .map(|(i, value)| (I::from_usize(i), value))
    }

    /// Iterate over all valid indices
    pub fn indices(&self) -> impl Iterator<Item = I> {
        (0..self.raw.len()).map(I::from_usize)
    }

    /// Index the next `push` will return
    #[inline]
    pub fn next_index(&self) -> I {
        I::from_usize(self.raw.len())
    }
}

impl<I: Idx, T> Index<I> for IndexVec<I, T> {
    type Output = T;

    #[inline]
    fn index(&self, index: I) -> &T {
        &self.raw[index.index()]
    }
}

impl<I: Idx, T> IndexMut<I> for IndexVec<I, T> {
    #[inline]
    fn index_mut(&mut self, index: I) -> &mut T {
        &mut self.raw[index.index()]
    }
}

impl<I, T> Default for IndexVec<I, T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<I, T> FromIterator<T> for IndexVec<I, T> {
    fn from_iter<It: IntoIterator<Item = T>>(iter: It) -> Self {
        Self {
            raw: iter.into_iter().collect(),
            _marker: PhantomData,
        }
    }
}

impl<'a, I, T> IntoIterator for &'a IndexVec<I, T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.raw.iter()
    }
}

/// Macro to define index types easily
///
/// Generates a `u32` newtype implementing [`Idx`], with the derives needed to
/// use it as a map key and a `Display` impl of the form `Name(3)`.
///
/// ```
/// use memscope_util::define_idx;
/// use memscope_util::index_vec::IndexVec;
///
/// define_idx!(NodeId);
///
/// let mut vec: IndexVec<NodeId, i32> = IndexVec::new();
/// let idx = vec.push(42);
/// assert_eq!(vec[idx], 42);
/// ```
#[macro_export]
macro_rules! define_idx {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub u32);

        impl $crate::index_vec::Idx for $name {
            fn from_usize(idx: usize) -> Self {
                assert!(idx <= u32::MAX as usize, "Index {} exceeds u32::MAX", idx);
                $name(idx as u32)
            }

            fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

#[cfg(test)]
mod tests;
