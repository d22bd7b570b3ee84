//! matrixpcb - generate a KiCad project for a keyboard switch matrix.
//!
//! Reads a keyboard layout designed in the Keyboard Layout Editor
//! (<http://www.keyboard-layout-editor.com/>) and writes a KiCad
//! schematic and PCB layout for its switch matrix.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::warn;

use matrixpcb::config::Config;
use matrixpcb::services::matrix::ColumnGrouping;
use matrixpcb::{compile, emitter, CompileOptions};

/// Column grouping algorithm selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum GroupingArg {
    /// Group keys into columns in input order.
    Seq,
    /// Group keys into columns left-to-right by position.
    Pos,
}

/// Generate a KiCad schematic and layout of the switch matrix of a
/// keyboard designed using the Keyboard Layout Editor.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// A JSON file containing a keyboard layout in the KLE JSON format
    #[arg(value_name = "FILE")]
    infile: PathBuf,

    /// The directory and base name for the output files (e.g. "id80"
    /// results in "id80/id80.sch" and "id80/id80.kicad_pcb")
    #[arg(short, long, value_name = "DIR")]
    out: PathBuf,

    /// Do not add traces to (partly) connect switch rows and columns
    #[arg(short = 'n', long)]
    no_routing: bool,

    /// Select the algorithm for grouping keys into columns
    #[arg(short = 'c', long, value_name = "ALGO")]
    column_grouping: Option<GroupingArg>,

    /// Use a fixed title-block date for reproducible output
    #[arg(long)]
    deterministic: bool,

    /// Log details about what is going on
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load().unwrap_or_default();

    let source = std::fs::read_to_string(&cli.infile)
        .with_context(|| format!("Failed to read layout file: {}", cli.infile.display()))?;

    let project_name = cli
        .out
        .file_name()
        .map_or_else(|| "keyboard".to_string(), |n| n.to_string_lossy().to_string());

    let date = if cli.deterministic {
        "1970-01-01 00:00".to_string()
    } else {
        chrono::Local::now().format("%Y-%m-%d %H:%M").to_string()
    };

    let grouping = match cli.column_grouping {
        Some(GroupingArg::Seq) => ColumnGrouping::Sequential,
        Some(GroupingArg::Pos) => ColumnGrouping::Position,
        None => config.generate.column_grouping.as_grouping(),
    };

    let options = CompileOptions {
        project_name,
        routing: config.generate.routing && !cli.no_routing,
        grouping,
        date,
    };

    let output = compile(&source, &options)
        .with_context(|| format!("Failed to compile layout: {}", cli.infile.display()))?;

    for warning in &output.warnings {
        warn!("{warning}");
    }

    emitter::write_package(&cli.out, &output.files)?;

    println!("✓ Generated {} files", output.files.len());
    println!("  Output: {}", cli.out.display());
    println!(
        "  {} keys in {} rows and {} columns, {} schematic sheet(s)",
        output.stats.keys, output.stats.rows, output.stats.cols, output.stats.sheets
    );

    Ok(())
}

/// Initializes the log subscriber; `RUST_LOG` overrides the default.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
