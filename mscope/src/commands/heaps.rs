//! Heaps command implementation.
//!
//! Lists every heap of a capture with its class and instance counts.

use std::io::Write;
use std::path::PathBuf;

use memscope_heap::MemoryObject;

use crate::commands::common::Session;
use crate::config::Config;
use crate::error::Result;

/// Arguments for the heaps command.
#[derive(Debug, Clone)]
pub struct HeapsArgs {
    pub capture: PathBuf,
}

/// List every heap of the capture with its class and instance counts.
///
/// # Arguments
/// * `args` - Heaps command arguments
/// * `config` - The application configuration
/// * `out` - Writer receiving the tab-separated output
///
/// # Returns
/// * `Result<()>` - Success or an error
pub fn run_heaps(args: HeapsArgs, config: &Config, out: &mut impl Write) -> Result<()> {
    let session = Session::open(&args.capture, config)?;
    let snapshot = &session.snapshot;

    writeln!(out, "HEAP\tCLASSES\tINSTANCES")?;
    for (id, heap) in snapshot.heaps() {
        let classes = MemoryObject::Heap(id).children(snapshot);
        let instances: usize = classes
            .iter()
            .map(|class| class.children(snapshot).len())
            .sum();
        writeln!(out, "{}\t{}\t{}", heap.name, classes.len(), instances)?;
    }
    Ok(())
}
