// Copyright 2026 Flecta Contributors
// SPDX-License-Identifier: Apache-2.0

#![allow(dead_code, unused_imports)]

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

mod backend;
mod cli;
mod config;
mod fallback;
mod pipeline;
mod rest;
mod scrape;
mod tree;

#[derive(Parser)]
#[command(
    name = "flecta",
    about = "Flecta — Romanian verb conjugation service",
    version,
    after_help = "Run 'flecta <command> --help' for details on each command."
)]
struct Cli {
    /// Output results as JSON (machine-readable)
    #[arg(long, global = true)]
    json: bool,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP conjugation service
    Serve {
        /// Port to listen on (default: $PORT or 5000)
        #[arg(long)]
        port: Option<u16>,
        /// Path to the JSON lexicon (default: $FLECTA_LEXICON or ~/.flecta/lexicon.json)
        #[arg(long)]
        lexicon: Option<String>,
    },
    /// Resolve a single verb and print its conjugated forms
    Resolve {
        /// Verb to conjugate (citation form "a vorbi" works too)
        verb: String,
        /// Path to the JSON lexicon
        #[arg(long)]
        lexicon: Option<String>,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global flags via environment variables so all modules can check them
    if cli.json {
        std::env::set_var("FLECTA_JSON", "1");
    }
    if cli.quiet {
        std::env::set_var("FLECTA_QUIET", "1");
    }

    let result = match cli.command {
        Commands::Serve { port, lexicon } => cli::serve::run(port, lexicon.as_deref()).await,
        Commands::Resolve { verb, lexicon } => {
            cli::resolve_cmd::run(&verb, lexicon.as_deref()).await
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "flecta", &mut std::io::stdout());
            Ok(())
        }
    };

    // Consistent exit codes: 0=success, 1=error
    if let Err(e) = &result {
        if !cli::output::is_quiet() && !cli::output::is_json() {
            eprintln!("  Error: {e:#}");
        }
        if cli::output::is_json() {
            cli::output::print_json(&serde_json::json!({
                "error": true,
                "message": format!("{e:#}"),
            }));
        }
        std::process::exit(1);
    }

    result
}
