//! Command-line interface for the wayfinder utility
//!
//! Provides commands to inspect a parsed flow, list its entry symptoms, and
//! walk it as an interactive terminal wizard.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

use wayfinder::prelude::*;

use crate::ui;

/// Wayfinder - walk flowchart-driven troubleshooting flows
#[derive(Parser)]
#[command(name = "wayfinder")]
#[command(about = "Inspect troubleshooting flows and walk them as an interactive wizard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Set log level (trace|debug|info|warn|error)
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Log level options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a flow and print its nodes and edges
    Inspect {
        /// Input file containing the flow diagram (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Print the parsed flow as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the entry symptoms of a flow
    Symptoms {
        /// Input file containing the flow diagram (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// JSON file with detail tables to enrich the listing
        #[arg(short, long)]
        catalog: Option<PathBuf>,
    },

    /// Walk a flow interactively
    Walk {
        /// Input file containing the flow diagram
        #[arg(short, long)]
        input: PathBuf,

        /// JSON file with detail tables for solution/diagnostic records
        #[arg(short, long)]
        catalog: Option<PathBuf>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },
}

/// Run the selected command
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Inspect { input, json } => {
            let flow = parse_input(&input)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&flow_to_json(&flow))?);
            } else {
                ui::print_flow_summary(&flow);
            }
            Ok(())
        }
        Commands::Symptoms { input, catalog } => {
            let flow = parse_input(&input)?;
            let catalog = load_catalog(catalog.as_deref())?;
            let wizard = Wizard::with_catalog(Arc::new(flow), catalog);
            ui::print_symptoms(&wizard.symptoms());
            Ok(())
        }
        Commands::Walk {
            input,
            catalog,
            no_color,
        } => {
            let flow = parse_input(&input)?;
            let catalog = load_catalog(catalog.as_deref())?;
            let wizard = Wizard::with_catalog(Arc::new(flow), catalog);
            ui::walk(wizard, !no_color)
        }
    }
}

/// Read diagram source from a file or stdin and parse it
fn parse_input(path: &std::path::Path) -> Result<ParsedFlow> {
    let source = read_input(path)?;
    let flow = parse_flow(&source);
    debug!(
        node_count = flow.node_count(),
        edge_count = flow.edge_count(),
        "input parsed"
    );
    Ok(flow)
}

/// Read from a path, with `-` meaning stdin
fn read_input(path: &std::path::Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read from stdin")?;
        Ok(buffer)
    } else {
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
    }
}

/// Load a detail catalog, empty when no path was given
fn load_catalog(path: Option<&std::path::Path>) -> Result<DetailCatalog> {
    match path {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            DetailCatalog::from_json(&json)
                .with_context(|| format!("failed to parse catalog {}", path.display()))
        }
        None => Ok(DetailCatalog::new()),
    }
}

/// Serialize a flow for `inspect --json`, preserving insertion order
fn flow_to_json(flow: &ParsedFlow) -> serde_json::Value {
    serde_json::json!({
        "nodes": flow.nodes().collect::<Vec<_>>(),
        "edges": flow.edges().collect::<Vec<_>>(),
        "symptoms": flow.symptoms().map(|n| n.id.as_str()).collect::<Vec<_>>(),
        "solutions": flow.solutions().map(|n| n.id.as_str()).collect::<Vec<_>>(),
    })
}
