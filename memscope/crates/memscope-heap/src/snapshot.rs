//! The frozen snapshot arena and its membership queries.

use memscope_util::IndexVec;

use crate::ids::{ClassId, FieldId, HeapId, InstanceId};
use crate::object::{ClassObject, FieldObject, FieldValue, HeapObject, InstanceObject};

/// All heaps, classes, instances and fields of one capture
///
/// Built by [`SnapshotBuilder`](crate::SnapshotBuilder) and immutable
/// afterwards. Lookups with an id from another snapshot return `None` or
/// `false` rather than panicking.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeapSnapshot {
    pub(crate) heaps: IndexVec<HeapId, HeapObject>,
    pub(crate) classes: IndexVec<ClassId, ClassObject>,
    pub(crate) instances: IndexVec<InstanceId, InstanceObject>,
    pub(crate) fields: IndexVec<FieldId, FieldObject>,
}

impl HeapSnapshot {
    pub fn heap(&self, id: HeapId) -> Option<&HeapObject> {
        self.heaps.get(id)
    }

    pub fn class(&self, id: ClassId) -> Option<&ClassObject> {
        self.classes.get(id)
    }

    pub fn instance(&self, id: InstanceId) -> Option<&InstanceObject> {
        self.instances.get(id)
    }

    pub fn field(&self, id: FieldId) -> Option<&FieldObject> {
        self.fields.get(id)
    }

    /// Heaps in capture order
    pub fn heaps(&self) -> impl Iterator<Item = (HeapId, &HeapObject)> {
        self.heaps.iter_enumerated()
    }

    pub fn heap_count(&self) -> usize {
        self.heaps.len()
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn heap_by_name(&self, name: &str) -> Option<HeapId> {
        self.heaps
            .iter_enumerated()
            .find(|(_, heap)| heap.name == name)
            .map(|(id, _)| id)
    }

    pub fn class_by_name(&self, heap: HeapId, name: &str) -> Option<ClassId> {
        self.heap(heap)?.classes.get(name).copied()
    }

    /// Heap that owns the class
    pub fn heap_of_class(&self, class: ClassId) -> Option<HeapId> {
        self.class(class).map(|c| c.heap)
    }

    /// Class that owns the instance
    pub fn class_of_instance(&self, instance: InstanceId) -> Option<ClassId> {
        self.instance(instance).map(|i| i.class)
    }

    // ========================================================================
    // Membership
    // ========================================================================

    pub fn heap_contains_class(&self, heap: HeapId, class: ClassId) -> bool {
        self.class(class).is_some_and(|c| c.heap == heap)
    }

    pub fn class_contains_instance(&self, class: ClassId, instance: InstanceId) -> bool {
        self.instance(instance).is_some_and(|i| i.class == class)
    }

    pub fn instance_contains_field(&self, instance: InstanceId, field: FieldId) -> bool {
        self.field(field).is_some_and(|f| f.owner == instance)
    }

    /// Short text for a field's value: `null`, the primitive text, the
    /// referenced class name or the referenced instance label.
    pub fn field_value_text(&self, field: FieldId) -> Option<String> {
        let field = self.field(field)?;
        let text = match &field.value {
            FieldValue::Null => "null".to_string(),
            FieldValue::Primitive { text, .. } => text.clone(),
            FieldValue::Class(class) => self.class(*class)?.name.clone(),
            FieldValue::Instance(instance) => self.instance(*instance)?.label.clone(),
        };
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{ClassInfo, InstanceInfo, SnapshotBuilder};
    use crate::object::PrimitiveType;

    fn two_heap_snapshot() -> (HeapSnapshot, [ClassId; 2], [InstanceId; 2], [FieldId; 3]) {
        let mut builder = SnapshotBuilder::new();
        let app = builder.add_heap("app").unwrap();
        let image = builder.add_heap("image").unwrap();
        let foo = builder.add_class(app, ClassInfo::named("com.Foo")).unwrap();
        let bar = builder.add_class(image, ClassInfo::named("com.Bar")).unwrap();
        let foo1 = builder.add_instance(foo, InstanceInfo::labeled("Foo@1")).unwrap();
        let bar1 = builder.add_instance(bar, InstanceInfo::labeled("Bar@1")).unwrap();
        let to_bar = builder
            .add_field(foo1, "bar", FieldValue::Instance(bar1))
            .unwrap();
        let count = builder
            .add_field(
                foo1,
                "count",
                FieldValue::Primitive {
                    ty: PrimitiveType::Int,
                    text: "42".to_string(),
                },
            )
            .unwrap();
        let kind = builder.add_field(bar1, "kind", FieldValue::Class(foo)).unwrap();
        (
            builder.finish().unwrap(),
            [foo, bar],
            [foo1, bar1],
            [to_bar, count, kind],
        )
    }

    #[test]
    fn test_lookup_by_name() {
        let (snapshot, [foo, bar], _, _) = two_heap_snapshot();
        let app = snapshot.heap_by_name("app").unwrap();
        let image = snapshot.heap_by_name("image").unwrap();
        assert_eq!(snapshot.class_by_name(app, "com.Foo"), Some(foo));
        assert_eq!(snapshot.class_by_name(image, "com.Bar"), Some(bar));
        assert_eq!(snapshot.class_by_name(app, "com.Bar"), None);
        assert_eq!(snapshot.heap_by_name("zygote"), None);
    }

    #[test]
    fn test_membership() {
        let (snapshot, [foo, bar], [foo1, bar1], [to_bar, _, kind]) = two_heap_snapshot();
        let app = snapshot.heap_of_class(foo).unwrap();
        assert!(snapshot.heap_contains_class(app, foo));
        assert!(!snapshot.heap_contains_class(app, bar));
        assert!(snapshot.class_contains_instance(foo, foo1));
        assert!(!snapshot.class_contains_instance(foo, bar1));
        assert!(snapshot.instance_contains_field(foo1, to_bar));
        assert!(!snapshot.instance_contains_field(foo1, kind));
        assert_eq!(snapshot.class_of_instance(bar1), Some(bar));
    }

    #[test]
    fn test_foreign_ids_are_not_members() {
        let (snapshot, _, _, _) = two_heap_snapshot();
        assert!(!snapshot.heap_contains_class(HeapId(0), ClassId(99)));
        assert!(snapshot.instance(InstanceId(99)).is_none());
        assert_eq!(snapshot.field_value_text(FieldId(99)), None);
    }

    #[test]
    fn test_field_value_text() {
        let (snapshot, _, _, [to_bar, count, kind]) = two_heap_snapshot();
        assert_eq!(snapshot.field_value_text(to_bar).as_deref(), Some("Bar@1"));
        assert_eq!(snapshot.field_value_text(count).as_deref(), Some("42"));
        assert_eq!(snapshot.field_value_text(kind).as_deref(), Some("com.Foo"));
    }

    #[test]
    fn test_counts() {
        let (snapshot, _, _, _) = two_heap_snapshot();
        assert_eq!(snapshot.heap_count(), 2);
        assert_eq!(snapshot.class_count(), 2);
        assert_eq!(snapshot.instance_count(), 2);
        assert_eq!(snapshot.field_count(), 3);
    }
}
