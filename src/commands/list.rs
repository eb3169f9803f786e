//! List command implementation
//!
//! @module commands/list

use std::time::Instant;

use tracing::{info, warn};

use crate::cli::{GlobalArgs, ListArgs};
use crate::config::Config;
use crate::error::Result;
use crate::output::{create_sink, Output, OutputFormat};
use crate::taxonomy::{list_trees, load_taxonomy, LabelStyle, ListReport};

impl ListArgs {
    /// Determine the output format from args
    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Outline
        }
    }

    pub fn label_style(&self) -> LabelStyle {
        LabelStyle {
            show_rank: self.show_rank,
            show_name: self.show_name,
        }
    }
}

/// Run the list command
pub fn run(args: ListArgs, global: &GlobalArgs) -> Result<ListReport> {
    let config = Config::from_args(global)?;
    execute(&args, &config)
}

/// Load the taxonomy from `config` and print the requested subtrees
pub fn execute(args: &ListArgs, config: &Config) -> Result<ListReport> {
    if !args.files.is_empty() {
        warn!("no positional arguments needed");
    }

    // Fail on an unwritable output before spending time on loading
    let mut output = Output::open(&config.out_file)?;

    let style = args.label_style();
    let taxonomy = load_taxonomy(config, style)?;

    let start = Instant::now();
    let report = {
        let mut sink = create_sink(
            args.output_format(),
            &mut output,
            &args.indent,
            config.line_buffered,
        );
        list_trees(&taxonomy, &args.ids, style, sink.as_mut())?
    };
    output.finish()?;

    info!(
        requested = report.outcomes.len(),
        printed = report.printed(),
        skipped = report.skipped(),
        entries = report.stats.emitted,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Listed taxonomy subtrees"
    );
    if report.stats.revisits > 0 {
        info!(
            revisits = report.stats.revisits,
            "Skipped taxids reachable more than once"
        );
    }

    Ok(report)
}
