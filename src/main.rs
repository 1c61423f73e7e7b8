//! Netlist - SPICE-style netlist parser
//!
//! Parses a netlist file and prints the structured result as JSON, followed
//! by any diagnostics.
//!
//! # Usage
//!
//! ```bash
//! RUST_LOG=netlist_core=debug netlist amplifier.sp --workers 4
//! ```

use std::path::PathBuf;

use clap::Parser;
use netlist_core::{error::Result, ParseSession, ParserConfig};

/// SPICE-style netlist parser
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the netlist file
    #[arg(value_name = "NETLIST_FILE")]
    netlist_file: PathBuf,

    /// Number of parser worker threads (defaults to available parallelism)
    #[arg(short, long)]
    workers: Option<usize>,

    /// Print components, commands and diagnostics in source-line order
    #[arg(long)]
    sorted: bool,
}

fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let mut config = ParserConfig::new().with_sorted_output(args.sorted);
    if let Some(workers) = args.workers {
        config = config.with_workers(workers);
    }

    let outcome = ParseSession::with_config(config).parse_file(&args.netlist_file)?;

    println!("Parsed Netlist:");
    println!("{}", outcome.to_json_pretty()?);

    if !outcome.diagnostics.is_empty() {
        println!("\nErrors:");
        for diag in &outcome.diagnostics {
            println!("{}", diag);
        }
    }

    Ok(())
}
