use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use flow_layout::{layout_json, LayoutConfig, LayoutMode};
use serde_json::Value;
use tracing::debug;
use tracing_subscriber::{prelude::*, EnvFilter};

/// Compute node positions for a flow description
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Flow JSON with `nodeList` and `lineList`, stdin when omitted or `-`
    input: Option<PathBuf>,

    /// Layout mode: force, tree, level, circle, grid or hubRadial
    #[arg(short, long, default_value_t = LayoutMode::Force)]
    mode: LayoutMode,

    /// JSON file overriding canvas size, node size and tuning constants
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Where to write the positioned flow, stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pretty-print the output
    #[arg(long)]
    pretty: bool,
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        _ => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read stdin")?;
            Ok(buffer)
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<LayoutConfig> {
    let Some(path) = path else {
        return Ok(LayoutConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid config {}", path.display()))
}

fn run(args: &Args) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let input: Value = serde_json::from_str(&read_input(args.input.as_deref())?)
        .context("Input is not valid JSON")?;

    debug!("Running {} layout", args.mode);
    let flow = layout_json(input, args.mode.as_str(), &config)?;

    let mut text = if args.pretty {
        serde_json::to_string_pretty(&flow)?
    } else {
        serde_json::to_string(&flow)?
    };
    text.push('\n');

    match &args.output {
        Some(path) => {
            fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))
        }
        None => io::stdout()
            .write_all(text.as_bytes())
            .context("Failed to write stdout"),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    run(&args)
}
