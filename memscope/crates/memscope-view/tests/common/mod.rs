//! Shared fixture for the view integration tests
//!
//! Two heaps:
//!
//! ```text
//! app
//! └── MockClass        MockInstance1 { mField -> MockInstance2@image, mCount = 7, mType -> OtherClass }
//!                      MockInstance2 { mSelf -> MockInstance2 }
//!                      MockInstance3
//! image
//! └── OtherClass       OtherInstance1
//! ```

#![allow(dead_code)]

use std::rc::Rc;

use memscope_heap::{
    ClassId, ClassInfo, FieldId, FieldValue, HeapId, HeapSnapshot, InstanceId, InstanceInfo,
    PrimitiveType, SnapshotBuilder,
};
use memscope_view::{InspectorConfig, InvalidSelectionPolicy, MemoryProfilerStageView};

pub struct ViewFixture {
    pub view: MemoryProfilerStageView,
    pub snapshot: Rc<HeapSnapshot>,
    pub app: HeapId,
    pub image: HeapId,
    pub mock_class: ClassId,
    pub other_class: ClassId,
    pub instances: [InstanceId; 3],
    pub other_instance: InstanceId,
    /// `MockInstance1.mField`, points into the other heap
    pub cross_heap_field: FieldId,
    /// `MockInstance1.mCount`, a primitive
    pub primitive_field: FieldId,
    /// `MockInstance1.mType`, a class reference
    pub class_field: FieldId,
    /// `MockInstance2.mSelf`
    pub self_field: FieldId,
}

impl ViewFixture {
    pub fn new() -> Self {
        Self::with_policy(InvalidSelectionPolicy::Reject)
    }

    pub fn with_policy(policy: InvalidSelectionPolicy) -> Self {
        let mut builder = SnapshotBuilder::new();
        let app = builder.add_heap("app").unwrap();
        let image = builder.add_heap("image").unwrap();
        let mock_class = builder
            .add_class(app, ClassInfo::named("com.example.MockClass").with_totals(3, 48, 96))
            .unwrap();
        let other_class = builder
            .add_class(image, ClassInfo::named("com.example.OtherClass"))
            .unwrap();

        let instances = [1, 2, 3].map(|n| {
            builder
                .add_instance(
                    mock_class,
                    InstanceInfo::labeled(format!("MockInstance{}", n))
                        .with_to_string(format!("toString{}", n))
                        .with_sizes(n, 16, 32),
                )
                .unwrap()
        });
        let other_instance = builder
            .add_instance(
                other_class,
                InstanceInfo::labeled("OtherInstance1").with_sizes(4, 8, 8),
            )
            .unwrap();

        let cross_heap_field = builder
            .add_field(instances[0], "mField", FieldValue::Instance(other_instance))
            .unwrap();
        let primitive_field = builder
            .add_field(
                instances[0],
                "mCount",
                FieldValue::Primitive {
                    ty: PrimitiveType::Int,
                    text: "7".into(),
                },
            )
            .unwrap();
        let class_field = builder
            .add_field(instances[0], "mType", FieldValue::Class(other_class))
            .unwrap();
        let self_field = builder
            .add_field(instances[1], "mSelf", FieldValue::Instance(instances[1]))
            .unwrap();

        let snapshot = Rc::new(builder.finish().unwrap());
        let mut view = MemoryProfilerStageView::new(InspectorConfig {
            invalid_selection: policy,
            ..Default::default()
        });
        view.load_capture(Rc::clone(&snapshot));

        Self {
            view,
            snapshot,
            app,
            image,
            mock_class,
            other_class,
            instances,
            other_instance,
            cross_heap_field,
            primitive_field,
            class_field,
            self_field,
        }
    }

    /// Select `app` and `MockClass`
    pub fn select_mock_class(&mut self) {
        self.view.select_heap(Some(self.app)).unwrap();
        self.view.select_class(Some(self.mock_class)).unwrap();
    }

    /// Select down to `MockInstance1.<field>`
    pub fn select_field_of_first(&mut self, field: FieldId) {
        self.select_mock_class();
        self.view.select_instance(Some(self.instances[0])).unwrap();
        self.view.select_field(Some(field)).unwrap();
    }
}
