//! Classgraph Dump CLI
//!
//! Rebuilds the nested-class forest of a serialized class batch and prints
//! it.
//!
//! # Usage
//!
//! ```bash
//! # Indented tree with the default (structure) preset
//! cargo run --bin classgraph-dump -- batch.json
//!
//! # JSON output, renaming enabled, config from YAML
//! cargo run --bin classgraph-dump -- batch.json --format json --preset renaming
//! cargo run --bin classgraph-dump -- batch.json --config decompile.yaml -v
//! ```

use clap::{Parser, ValueEnum};
use classgraph_ir::{
    ClassForest, ClassTreeDriver, ClassgraphError, CollectingSink, DecompileConfig,
    DecompileSession, NodeId, Preset, Severity,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "classgraph-dump")]
#[command(about = "Rebuild and print the nested-class forest of a class batch", long_about = None)]
struct Cli {
    /// JSON class batch (classes, corrupted, call_sites)
    batch: PathBuf,

    /// YAML configuration file (version 1)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Preset used when no config file is given
    #[arg(short, long, default_value = "structure")]
    preset: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "tree")]
    format: OutputFormat,

    /// Worker threads (overrides the config)
    #[arg(short = 'j', long)]
    threads: Option<usize>,

    /// Verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Tree,
    Json,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &cli.config {
        Some(path) => DecompileConfig::from_yaml(path)?,
        None => DecompileConfig::preset(Preset::from_str(&cli.preset)?),
    };
    if let Some(threads) = cli.threads {
        config = config.parallel(|p| p.num_threads(threads));
    }
    config.validate()?;

    let batch = classgraph_ir::ClassBatch::from_json_file(&cli.batch)?;
    let sink = Arc::new(CollectingSink::new());
    let session = DecompileSession::new(config).with_sink(sink.clone());
    let outcome = ClassTreeDriver::new(&session).run_batch(&batch)?;

    match cli.format {
        OutputFormat::Tree => print!("{}", render_tree(&outcome.forest)),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&outcome.forest).map_err(ClassgraphError::from)?
        ),
    }

    eprintln!(
        "{} roots, {} nodes, {} unattached, {} warnings, {} failed units",
        outcome.forest.roots().len(),
        outcome.forest.len(),
        outcome.forest.unattached().len(),
        sink.count(Severity::Warn),
        outcome.failures.len()
    );
    for failure in &outcome.failures {
        eprintln!("  failed: {}", failure);
    }

    Ok(())
}

fn render_tree(forest: &ClassForest) -> String {
    let mut out = String::new();
    for &root in forest.roots() {
        render_node(forest, root, 0, &mut out);
    }
    out
}

fn render_node(forest: &ClassForest, id: NodeId, depth: usize, out: &mut String) {
    let node = forest.node(id);
    let mut line = format!(
        "{}{} {} [{}]",
        "  ".repeat(depth),
        node.kind.as_str(),
        node.display_name(),
        node.qualified_name
    );
    if let Some(interface) = &node.interface_type {
        line.push_str(&format!(" : {}", interface));
    }
    if let Some(info) = &node.lambda {
        if info.is_method_reference {
            line.push_str(" (method reference)");
        }
    }
    out.push_str(&line);
    out.push('\n');
    for &child in forest.children(id) {
        render_node(forest, child, depth + 1, out);
    }
}
