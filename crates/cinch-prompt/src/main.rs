//! Print the resolved system prompt or the history compression prompt.
//!
//! Reads `CINCH_SYSTEM_MD`, `CINCH_WRITE_SYSTEM_MD` and `SANDBOX` from the
//! environment and resolves paths against the current directory.
//!
//! # Examples
//!
//! ```sh
//! # Print the default system prompt
//! cinch-prompt system
//!
//! # Capture the default prompt into .cinch/system.md for editing
//! CINCH_WRITE_SYSTEM_MD=1 cinch-prompt system > /dev/null
//!
//! # Use the edited copy, with memory appended
//! CINCH_SYSTEM_MD=1 cinch-prompt system --memory-file memory/MEMORY.md
//!
//! # Provenance report
//! CINCH_SYSTEM_MD=prompts/Review.md cinch-prompt system --json
//!
//! # Compression instructions
//! cinch-prompt compression
//! ```

use std::fs;
use std::path::PathBuf;
use std::process;

use cinch_prompt::{PromptResolver, compression_prompt};
use clap::{Parser, Subcommand};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Resolve the prompts a cinch agent starts from.
#[derive(Parser)]
#[command(name = "cinch-prompt")]
struct Cli {
    /// Log resolution decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve and print the session system prompt
    System {
        /// Memory text appended after the base prompt
        #[arg(long)]
        memory: Option<String>,

        /// File whose contents are appended as memory (repeatable)
        #[arg(long = "memory-file")]
        memory_files: Vec<PathBuf>,

        /// Print a JSON report with the prompt source and write-back path
        #[arg(long)]
        json: bool,
    },
    /// Print the history compression prompt
    Compression,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(level)
        .init();
}

fn run(command: Command) -> Result<(), String> {
    match command {
        Command::System {
            memory,
            memory_files,
            json,
        } => {
            let memory = collect_memory(memory, &memory_files)?;
            let resolver = PromptResolver::from_env().map_err(|e| e.to_string())?;
            let resolved = resolver
                .resolve_detailed(memory.as_deref())
                .map_err(|e| e.to_string())?;

            if json {
                let report = serde_json::to_string_pretty(&resolved)
                    .map_err(|e| format!("failed to serialize report: {e}"))?;
                println!("{report}");
            } else {
                println!("{}", resolved.text);
            }
        }
        Command::Compression => println!("{}", compression_prompt()),
    }
    Ok(())
}

/// Join `--memory` and each `--memory-file` (in that order) with blank lines.
///
/// Blank parts are dropped; `None` when nothing is left.
fn collect_memory(inline: Option<String>, files: &[PathBuf]) -> Result<Option<String>, String> {
    let mut parts: Vec<String> = inline.into_iter().collect();
    for path in files {
        let content = fs::read_to_string(path)
            .map_err(|e| format!("failed to read memory file '{}': {e}", path.display()))?;
        parts.push(content);
    }

    let joined = parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n");
    Ok((!joined.is_empty()).then_some(joined))
}
