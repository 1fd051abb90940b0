//! Typed ids for the snapshot arenas.

use memscope_util::define_idx;

define_idx!(
    /// Index of a [`HeapObject`](crate::HeapObject) within its snapshot
    HeapId
);
define_idx!(
    /// Index of a [`ClassObject`](crate::ClassObject) within its snapshot
    ClassId
);
define_idx!(
    /// Index of an [`InstanceObject`](crate::InstanceObject) within its snapshot
    InstanceId
);
define_idx!(
    /// Index of a [`FieldObject`](crate::FieldObject) within its snapshot
    FieldId
);

#[cfg(test)]
mod tests {
    use super::*;
    use memscope_util::Idx;

    #[test]
    fn test_ids_are_distinct_types_with_shared_layout() {
        assert_eq!(ClassId::from_usize(3).index(), 3);
        assert_eq!(InstanceId(7).index(), 7);
        assert_eq!(std::mem::size_of::<FieldId>(), 4);
    }

    #[test]
    fn test_id_display() {
        assert_eq!(HeapId(0).to_string(), "HeapId(0)");
        assert_eq!(FieldId(12).to_string(), "FieldId(12)");
    }
}
