//! Instances command implementation.
//!
//! Renders the instance view of one class: one row per instance, and with
//! `--expand` one indented row per field beneath it.

use std::io::Write;
use std::path::PathBuf;

use memscope_view::{InstanceColumn, RenderedRow};

use crate::commands::common::{or_dash, Session};
use crate::config::{Config, SizeUnit};
use crate::error::Result;

/// Arguments for the instances command.
#[derive(Debug, Clone)]
pub struct InstancesArgs {
    pub capture: PathBuf,
    pub heap: String,
    pub class: String,
    pub expand: bool,
}

/// Render the instance view of one class, one row per visible node.
///
/// # Arguments
/// * `args` - Instances command arguments
/// * `config` - The application configuration
/// * `out` - Writer receiving the tab-separated output
///
/// # Returns
/// * `Result<()>` - Success or an error
pub fn run_instances(args: InstancesArgs, config: &Config, out: &mut impl Write) -> Result<()> {
    let mut session = Session::open(&args.capture, config)?;
    session.select_class(&args.heap, &args.class)?;

    let mut rows = session.view.visible_rows();
    if args.expand {
        for (node, _) in &rows {
            session.view.expand_node(*node);
        }
        rows = session.view.visible_rows();
    }
    tracing::debug!("rendering {} rows", rows.len());

    let headers: Vec<_> = InstanceColumn::ALL.iter().map(|c| c.header()).collect();
    writeln!(out, "{}", headers.join("\t"))?;
    for (_, row) in &rows {
        writeln!(out, "{}", format_row(row, config.output.size_unit))?;
    }
    Ok(())
}

fn format_row(row: &RenderedRow, unit: SizeUnit) -> String {
    let size = |column: InstanceColumn| {
        let text = row.cell_text(column);
        or_dash(text.parse::<u64>().ok().map(|bytes| unit.format(bytes)))
    };
    let depth = row.cell_text(InstanceColumn::Depth);
    format!(
        "{}{}\t{}\t{}\t{}",
        "  ".repeat(row.depth),
        row.cell_text(InstanceColumn::Instance),
        if depth.is_empty() { "-".to_string() } else { depth },
        size(InstanceColumn::ShallowSize),
        size(InstanceColumn::RetainedSize)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MscopeError;

    const SAMPLE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/sample_capture.json");

    fn args(class: &str, expand: bool) -> InstancesArgs {
        InstancesArgs {
            capture: PathBuf::from(SAMPLE),
            heap: "app".to_string(),
            class: class.to_string(),
            expand,
        }
    }

    fn render(args: InstancesArgs, config: &Config) -> Vec<String> {
        let mut out = Vec::new();
        run_instances(args, config, &mut out).unwrap();
        String::from_utf8(out).unwrap().lines().map(str::to_string).collect()
    }

    #[test]
    fn test_instance_rows() {
        let lines = render(args("com.example.MainActivity", false), &Config::default());
        assert_eq!(
            lines,
            [
                "Instance\tDepth\tShallow Size\tRetained Size",
                "MainActivity@1001 MainActivity{resumed}\t1\t48\t4096",
                "MainActivity@1002\t2\t48\t2048",
            ]
        );
    }

    #[test]
    fn test_expanded_rows_include_fields() {
        let lines = render(args("com.example.MainActivity", true), &Config::default());
        assert_eq!(
            lines[1..],
            [
                "MainActivity@1001 MainActivity{resumed}\t1\t48\t4096",
                "  mBitmap Bitmap@2001\t2\t32\t1024",
                "  mResumed true\t-\t-\t-",
                "  mBitmapClass android.graphics.Bitmap\t-\t-\t-",
                "  mParent null\t-\t-\t-",
                "MainActivity@1002\t2\t48\t2048",
                "  mPrevious MainActivity@1001\t1\t48\t4096",
            ]
        );
    }

    #[test]
    fn test_hidden_to_string() {
        let mut config = Config::default();
        config.inspector.show_to_string = false;
        let lines = render(args("com.example.MainActivity", false), &config);
        assert_eq!(lines[1], "MainActivity@1001\t1\t48\t4096");
    }

    #[test]
    fn test_empty_class() {
        let lines = render(args("com.example.Cache", true), &Config::default());
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn test_unknown_class() {
        let err = run_instances(args("com.example.Missing", false), &Config::default(), &mut Vec::new())
            .unwrap_err();
        assert!(matches!(err, MscopeError::NotFound { kind: "class", .. }));
    }
}
