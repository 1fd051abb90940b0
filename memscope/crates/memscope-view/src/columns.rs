//! Column model of the instance view

use std::fmt;

use memscope_heap::{HeapSnapshot, MemoryObject};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstanceColumn {
    Instance,
    Depth,
    ShallowSize,
    RetainedSize,
}

impl InstanceColumn {
    pub const ALL: [InstanceColumn; 4] = [
        InstanceColumn::Instance,
        InstanceColumn::Depth,
        InstanceColumn::ShallowSize,
        InstanceColumn::RetainedSize,
    ];

    pub fn header(self) -> &'static str {
        match self {
            InstanceColumn::Instance => "Instance",
            InstanceColumn::Depth => "Depth",
            InstanceColumn::ShallowSize => "Shallow Size",
            InstanceColumn::RetainedSize => "Retained Size",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for InstanceColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

/// Text fragments of every column for one row
///
/// The `Instance` cell holds up to two fragments: the label (or field
/// name) and the `toString()` text (or field value). Numeric cells hold
/// one decimal fragment, or none when the object has no such number.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedRow {
    pub depth: usize,
    pub object: Option<MemoryObject>,
    cells: [Vec<String>; 4],
}

impl RenderedRow {
    pub fn cell(&self, column: InstanceColumn) -> &[String] {
        &self.cells[column.index()]
    }

    /// Fragments of one cell joined with a space
    pub fn cell_text(&self, column: InstanceColumn) -> String {
        self.cell(column).join(" ")
    }
}

/// Render `object` for the instance view, or `None` if its id is unknown
pub fn render_object(
    object: MemoryObject,
    depth: usize,
    snapshot: &HeapSnapshot,
    show_to_string: bool,
) -> Option<RenderedRow> {
    let label = match object {
        MemoryObject::Instance(id) => {
            let instance = snapshot.instance(id)?;
            let mut label = vec![instance.label.clone()];
            if show_to_string {
                label.extend(instance.to_string_text.clone());
            }
            label
        }
        MemoryObject::Field(id) => {
            let field = snapshot.field(id)?;
            vec![field.name.clone(), snapshot.field_value_text(id)?]
        }
        other => vec![other.label(snapshot)?.to_string()],
    };

    let number = |value: Option<String>| value.into_iter().collect::<Vec<_>>();
    Some(RenderedRow {
        depth,
        object: Some(object),
        cells: [
            label,
            number(object.depth(snapshot).map(|d| d.to_string())),
            number(object.shallow_size(snapshot).map(|s| s.to_string())),
            number(object.retained_size(snapshot).map(|s| s.to_string())),
        ],
    })
}
