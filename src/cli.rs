// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::path::PathBuf;

use docchat_config::Variant;

#[derive(Parser, Debug)]
#[command(
    name = "docchat",
    about = "Chat with an assistant and search its document stores",
    version,
    long_about = None,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to a config file, merged over the standard search path
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Backend origin, e.g. http://localhost:5000 (overrides config)
    #[arg(long, env = "DOCCHAT_BASE_URL", value_name = "URL")]
    pub base_url: Option<String>,

    /// Page layout (overrides `ui.variant` from config)
    #[arg(long, value_enum, value_name = "LAYOUT")]
    pub variant: Option<Variant>,

    /// Shorthand for `--variant simple`: chat only, no tabs or search panel
    #[arg(long, conflicts_with = "variant")]
    pub simple: bool,

    /// Increase verbosity (-v = debug, -vv = trace)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send one message to a fresh session and print the reply
    Ask {
        #[arg(value_name = "MESSAGE")]
        message: String,
        /// Print the rendered markup instead of plain text
        #[arg(long)]
        html: bool,
    },
    /// Search the active vector store
    Search {
        #[arg(value_name = "QUERY")]
        query: String,
        /// Maximum number of results (1-50, default from config)
        #[arg(long, short = 'n', value_name = "N")]
        max_results: Option<u32>,
        /// Let the backend rewrite the query before searching
        #[arg(long)]
        rewrite_query: bool,
        /// Print the rendered markup instead of plain text
        #[arg(long)]
        html: bool,
    },
    /// List vector stores; the active one is marked with `*`
    Stores {
        /// Output the raw listing as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the effective configuration and exit
    ShowConfig,
    /// Generate shell completion script
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

pub fn print_completions(shell: Shell) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "docchat", &mut std::io::stdout());
}
