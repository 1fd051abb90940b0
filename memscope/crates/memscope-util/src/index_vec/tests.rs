//! Tests for the IndexVec module.

use super::*;
use quickcheck_macros::quickcheck;
use static_assertions::assert_eq_size;

crate::define_idx!(TestId);

assert_eq_size!(TestId, u32);

// ============================================================================
// BASIC OPERATIONS
// ============================================================================

#[test]
fn test_new_and_empty() {
    let vec: IndexVec<TestId, i32> = IndexVec::new();
    assert!(vec.is_empty());
    assert_eq!(vec.len(), 0);
    assert_eq!(vec.next_index(), TestId(0));
}

#[test]
fn test_push_and_index() {
    let mut vec: IndexVec<TestId, i32> = IndexVec::new();
    let idx1 = vec.push(10);
    let idx2 = vec.push(20);
    let idx3 = vec.push(30);

    assert_eq!(vec[idx1], 10);
    assert_eq!(vec[idx2], 20);
    assert_eq!(vec[idx3], 30);
    assert_eq!(vec.len(), 3);
}

#[test]
fn test_get_and_try_get() {
    let mut vec: IndexVec<TestId, i32> = IndexVec::new();
    let idx = vec.push(42);

    assert_eq!(vec.get(idx), Some(&42));
    assert_eq!(vec.get(TestId(100)), None);
    assert_eq!(vec.try_get(idx), Ok(&42));
    assert_eq!(
        vec.try_get(TestId(5)),
        Err(IndexVecError::OutOfBounds { index: 5, length: 1 })
    );
}

#[test]
fn test_get_mut() {
    let mut vec: IndexVec<TestId, i32> = IndexVec::new();
    let idx = vec.push(1);
    *vec.get_mut(idx).unwrap() = 100;
    assert_eq!(vec[idx], 100);
    vec[idx] += 1;
    assert_eq!(vec[idx], 101);
}

#[test]
fn test_iter_enumerated_order() {
    let vec: IndexVec<TestId, &str> = ["a", "b", "c"].into_iter().collect();
    let pairs: Vec<_> = vec.iter_enumerated().collect();
    assert_eq!(pairs, vec![(TestId(0), &"a"), (TestId(1), &"b"), (TestId(2), &"c")]);
    assert_eq!(vec.indices().collect::<Vec<_>>(), vec![TestId(0), TestId(1), TestId(2)]);
}

#[test]
fn test_contains_index() {
    let mut vec: IndexVec<TestId, u8> = IndexVec::new();
    assert!(!vec.contains_index(TestId(0)));
    vec.push(1);
    assert!(vec.contains_index(TestId(0)));
    assert!(!vec.contains_index(TestId(1)));
}

#[test]
fn test_clear() {
    let mut vec: IndexVec<TestId, u8> = IndexVec::with_capacity(4);
    vec.push(1);
    vec.clear();
    assert!(vec.is_empty());
}

#[test]
fn test_display() {
    assert_eq!(TestId(3).to_string(), "TestId(3)");
}

// ============================================================================
// PROPERTIES
// ============================================================================

#[quickcheck]
fn prop_push_returns_position(values: Vec<u16>) -> bool {
    let mut vec: IndexVec<TestId, u16> = IndexVec::new();
    values.iter().enumerate().all(|(i, v)| {
        let id = vec.push(*v);
        id.index() == i && vec[id] == *v
    })
}

#[quickcheck]
fn prop_iteration_preserves_insertion_order(values: Vec<i32>) -> bool {
    let vec: IndexVec<TestId, i32> = values.iter().copied().collect();
    vec.iter().copied().eq(values.iter().copied())
}
