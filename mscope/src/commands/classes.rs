//! Classes command implementation.
//!
//! Lists the classes of one heap with their captured totals.

use std::io::Write;
use std::path::PathBuf;

use memscope_heap::MemoryObject;

use crate::commands::common::{find_heap, Session};
use crate::config::Config;
use crate::error::Result;

/// Arguments for the classes command.
#[derive(Debug, Clone)]
pub struct ClassesArgs {
    pub capture: PathBuf,
    pub heap: String,
}

/// List the classes of one heap with their totals.
///
/// # Arguments
/// * `args` - Classes command arguments
/// * `config` - The application configuration
/// * `out` - Writer receiving the tab-separated output
///
/// # Returns
/// * `Result<()>` - Success or an error
pub fn run_classes(args: ClassesArgs, config: &Config, out: &mut impl Write) -> Result<()> {
    let mut session = Session::open(&args.capture, config)?;
    let heap = find_heap(&session.snapshot, &args.heap)?;
    session.view.select_heap(Some(heap))?;

    let snapshot = &session.snapshot;
    let unit = config.output.size_unit;
    writeln!(out, "CLASS\tCOUNT\tSHALLOW\tRETAINED")?;
    for object in MemoryObject::Heap(heap).children(snapshot) {
        let MemoryObject::Class(id) = object else {
            continue;
        };
        let Some(class) = snapshot.class(id) else {
            continue;
        };
        writeln!(
            out,
            "{}\t{}\t{}\t{}",
            class.name,
            class.total_count,
            unit.format(class.shallow_size),
            unit.format(class.retained_size)
        )?;
    }
    Ok(())
}
