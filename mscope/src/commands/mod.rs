//! Command modules for the mscope CLI.
//!
//! Each subcommand lives in its own file and writes its report to the
//! writer it is handed, so tests can capture the output.

pub mod common;

pub mod classes;
pub mod goto;
pub mod heaps;
pub mod instances;

pub use classes::{run_classes, ClassesArgs};
pub use goto::{run_goto, GotoArgs};
pub use heaps::{run_heaps, HeapsArgs};
pub use instances::{run_instances, InstancesArgs};
