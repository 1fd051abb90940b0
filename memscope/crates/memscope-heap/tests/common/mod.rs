//! Shared capture fixture for the snapshot integration tests

#![allow(dead_code)]

use memscope_heap::HeapSnapshot;

/// Two heaps; `app` references into `image` from a field and a class slot
pub const TWO_HEAP_CAPTURE: &str = r#"{
  "heaps": [
    {
      "name": "app",
      "classes": [
        {
          "name": "com.example.Activity",
          "shallow_size": 96,
          "retained_size": 4096,
          "instances": [
            {
              "id": "0x1001", "label": "Activity@1001", "to_string": "MainActivity",
              "depth": 1, "shallow_size": 48, "retained_size": 2048,
              "fields": [
                { "name": "mBitmap", "value": { "instance": "0x2001" } },
                { "name": "mCreated", "value": { "primitive": "bool", "text": "true" } },
                { "name": "mLoader", "value": { "class": { "heap": "image", "name": "android.graphics.Bitmap" } } },
                { "name": "mParent", "value": null }
              ]
            },
            {
              "id": "0x1002", "label": "Activity@1002",
              "depth": 2, "shallow_size": 48, "retained_size": 2048,
              "fields": [
                { "name": "mPrevious", "value": { "instance": "0x1001" } }
              ]
            }
          ]
        }
      ]
    },
    {
      "name": "image",
      "classes": [
        {
          "name": "android.graphics.Bitmap",
          "total_count": 10,
          "shallow_size": 32,
          "retained_size": 1024,
          "instances": [
            { "id": "0x2001", "label": "Bitmap@2001", "depth": 2, "shallow_size": 32, "retained_size": 1024 }
          ]
        },
        { "name": "java.lang.String" }
      ]
    }
  ]
}"#;

pub fn two_heap_snapshot() -> HeapSnapshot {
    HeapSnapshot::from_json_str(TWO_HEAP_CAPTURE).expect("fixture capture should load")
}
