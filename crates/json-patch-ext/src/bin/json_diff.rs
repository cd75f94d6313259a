//! `json-diff`: print the JSON Patch that turns one document into another.
//!
//! Usage:
//!   json-diff src.json dst.json [--copies] [--no-moves]

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use json_patch_ext::json_cli::diff_json;
use json_patch_ext::json_patch_diff::DiffOptions;

#[derive(Parser)]
#[command(name = "json-diff", version, about = "Compute a JSON Patch between two JSON documents")]
struct Cli {
    /// Source document.
    src: PathBuf,

    /// Target document.
    dst: PathBuf,

    /// Emit `copy` for added members equal to an unchanged sibling.
    #[arg(long)]
    copies: bool,

    /// Never emit `move`; renamed members become `remove` + `add`.
    #[arg(long)]
    no_moves: bool,

    /// Enable verbose (debug-level) logging.
    #[arg(short, long)]
    verbose: bool,
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let src = std::fs::read_to_string(&cli.src)?;
    let dst = std::fs::read_to_string(&cli.dst)?;
    let options = DiffOptions {
        detect_moves: !cli.no_moves,
        detect_copies: cli.copies,
    };
    let patch = diff_json(&src, &dst, &options)?;
    writeln!(io::stdout(), "{patch}")?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| if cli.verbose { "debug" } else { "warn" }.to_string());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
