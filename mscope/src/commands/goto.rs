//! Goto command implementation.
//!
//! Selects a field of an instance, runs the "Go to Instance" action on it
//! and prints the selection it lands on.

use std::io::Write;
use std::path::PathBuf;

use memscope_heap::{HeapSnapshot, MemoryObject};
use memscope_view::{MemoryProfilerStage, Navigation, SelectionKind};

use crate::commands::common::{find_field, find_instance, Session};
use crate::config::Config;
use crate::error::{MscopeError, Result};

/// Arguments for the goto command.
#[derive(Debug, Clone)]
pub struct GotoArgs {
    pub capture: PathBuf,
    pub heap: String,
    pub class: String,
    pub instance: String,
    pub field: String,
}

/// Follow a field reference and print the selection it lands on.
///
/// # Arguments
/// * `args` - Goto command arguments
/// * `config` - The application configuration
/// * `out` - Writer receiving one `level: label` line per selection level
///
/// # Returns
/// * `Result<()>` - Success or an error
pub fn run_goto(args: GotoArgs, config: &Config, out: &mut impl Write) -> Result<()> {
    let mut session = Session::open(&args.capture, config)?;
    let (_, class) = session.select_class(&args.heap, &args.class)?;
    let instance = find_instance(&session.snapshot, class, &args.instance)?;
    let field = find_field(&session.snapshot, instance, &args.field)?;
    session.view.select_instance(Some(instance))?;
    session.view.select_field(Some(field))?;

    let go_to = session
        .view
        .context_menu()
        .iter()
        .position(|entry| entry.text == "Go to Instance" && entry.enabled);
    let Some(index) = go_to else {
        return Err(MscopeError::NoTarget(args.field));
    };
    match session.view.run_context_menu(index)? {
        Navigation::Applied(changes) => {
            tracing::info!("navigation applied {} selection changes", changes.len());
        }
        Navigation::NoTarget => return Err(MscopeError::NoTarget(args.field)),
    }

    write_selection(session.view.stage(), &session.snapshot, out)
}

fn write_selection(
    stage: &MemoryProfilerStage,
    snapshot: &HeapSnapshot,
    out: &mut impl Write,
) -> Result<()> {
    for kind in SelectionKind::ALL {
        let label = stage
            .selection()
            .get(kind)
            .and_then(|object: MemoryObject| object.label(snapshot))
            .unwrap_or("-");
        writeln!(out, "{}: {}", kind, label)?;
    }
    Ok(())
}
