//! Context menu actions of the instance view

use crate::error::Result;
use crate::navigate::{can_navigate, go_to_field_target, Navigation};
use crate::stage::MemoryProfilerStage;

pub trait ContextMenuItem {
    fn text(&self) -> &str;

    fn is_enabled(&self, stage: &MemoryProfilerStage) -> bool;

    /// Perform the action; disabled items report [`Navigation::NoTarget`]
    fn run(&self, stage: &mut MemoryProfilerStage) -> Result<Navigation>;
}

/// Follow the selected field's reference
#[derive(Debug, Clone, Copy, Default)]
pub struct GoToInstanceAction;

impl ContextMenuItem for GoToInstanceAction {
    fn text(&self) -> &str {
        "Go to Instance"
    }

    fn is_enabled(&self, stage: &MemoryProfilerStage) -> bool {
        can_navigate(stage)
    }

    fn run(&self, stage: &mut MemoryProfilerStage) -> Result<Navigation> {
        go_to_field_target(stage)
    }
}
