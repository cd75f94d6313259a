//! `json-patch`: apply a JSON Patch (RFC 6902 plus `omit`/`omitOptional`)
//! to a document.
//!
//! Usage:
//!   json-patch '<patch-array-json>' [--file doc.json]
//!
//! The document is read from stdin unless `--file` is given.

use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use json_patch_ext::json_cli::apply_json_patch;

#[derive(Parser)]
#[command(name = "json-patch", version, about = "Apply a JSON Patch to a JSON document")]
struct Cli {
    /// Patch operations as a JSON array.
    patch: String,

    /// Read the document from this file instead of stdin.
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Enable verbose (debug-level) logging.
    #[arg(short, long)]
    verbose: bool,
}

fn read_document(file: Option<&PathBuf>) -> io::Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let doc = read_document(cli.file.as_ref())?;
    let result = apply_json_patch(doc.trim(), &cli.patch)?;
    writeln!(io::stdout(), "{result}")?;
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
