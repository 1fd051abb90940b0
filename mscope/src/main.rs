//! mscope CLI - inspect heap snapshot captures from the command line.
//!
//! Parses arguments with clap, installs a tracing subscriber, loads
//! `mscope.toml`, then dispatches to one command handler.

mod commands;
mod config;
mod error;

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{
    run_classes, run_goto, run_heaps, run_instances, ClassesArgs, GotoArgs, HeapsArgs,
    InstancesArgs,
};
use config::Config;
use error::{MscopeError, Result};

/// mscope - heap snapshot inspector
///
/// Lists the heaps, classes and instances of a JSON capture and follows
/// field references across heaps.
#[derive(Parser, Debug)]
#[command(name = "mscope")]
#[command(author = "Memscope Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Inspect heap snapshot captures", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, env = "MSCOPE_VERBOSE")]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "MSCOPE_CONFIG")]
    config: Option<PathBuf>,

    /// Disable color output
    #[arg(long, global = true, env = "MSCOPE_NO_COLOR")]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List heaps with their class and instance counts
    Heaps(HeapsCommand),

    /// List the classes of one heap
    Classes(ClassesCommand),

    /// Render the instance view of one class
    Instances(InstancesCommand),

    /// Follow a field reference and print the resulting selection
    Goto(GotoCommand),
}

#[derive(Parser, Debug)]
struct HeapsCommand {
    /// Capture file (JSON)
    capture: PathBuf,
}

#[derive(Parser, Debug)]
struct ClassesCommand {
    /// Capture file (JSON)
    capture: PathBuf,

    /// Heap name
    #[arg(long)]
    heap: String,
}

#[derive(Parser, Debug)]
struct InstancesCommand {
    /// Capture file (JSON)
    capture: PathBuf,

    /// Heap name
    #[arg(long)]
    heap: String,

    /// Fully qualified class name
    #[arg(long)]
    class: String,

    /// Show the fields of every instance
    #[arg(short, long)]
    expand: bool,
}

#[derive(Parser, Debug)]
struct GotoCommand {
    /// Capture file (JSON)
    capture: PathBuf,

    /// Heap name
    #[arg(long)]
    heap: String,

    /// Fully qualified class name
    #[arg(long)]
    class: String,

    /// Instance label
    #[arg(long)]
    instance: String,

    /// Field name on that instance
    #[arg(long)]
    field: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.no_color)?;

    let config = load_config(cli.config.as_deref())?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    execute_command(cli.command, &config, &mut out)?;
    out.flush()?;
    Ok(())
}

/// Install the fmt subscriber on stderr; `log` records from the model
/// crates are forwarded into it.
fn init_logging(verbose: bool, no_color: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    let subscriber = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(!no_color)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .try_init()
        .map_err(|e| MscopeError::Config(format!("Failed to initialize logging: {}", e)))?;

    Ok(())
}

fn load_config(config_path: Option<&std::path::Path>) -> Result<Config> {
    match config_path {
        Some(path) => Config::load_from_path(path),
        None => Config::load(),
    }
}

fn execute_command(command: Commands, config: &Config, out: &mut impl Write) -> Result<()> {
    match command {
        Commands::Heaps(args) => run_heaps(
            HeapsArgs {
                capture: args.capture,
            },
            config,
            out,
        ),
        Commands::Classes(args) => run_classes(
            ClassesArgs {
                capture: args.capture,
                heap: args.heap,
            },
            config,
            out,
        ),
        Commands::Instances(args) => run_instances(
            InstancesArgs {
                capture: args.capture,
                heap: args.heap,
                class: args.class,
                expand: args.expand,
            },
            config,
            out,
        ),
        Commands::Goto(args) => run_goto(
            GotoArgs {
                capture: args.capture,
                heap: args.heap,
                class: args.class,
                instance: args.instance,
                field: args.field,
            },
            config,
            out,
        ),
    }
}
