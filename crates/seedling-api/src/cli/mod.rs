//! CLI command definitions for the `seedling` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod apply;
pub mod demo;
pub mod inspect;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use seedling_types::category::CategoryKind;

/// Build, commit, and inspect typed seed data.
#[derive(Parser)]
#[command(name = "seedling", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Also export tracing spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a seed set from a TOML/JSON file and commit it.
    Apply {
        /// Seed file (`.toml` or `.json`).
        file: PathBuf,

        /// Reject posts whose author is not a user of the same seed.
        #[arg(long)]
        strict: bool,

        /// Build and validate only; do not write to the database.
        #[arg(long)]
        dry_run: bool,
    },

    /// Show all persisted users and posts.
    #[command(alias = "ls")]
    Show,

    /// Show one persisted entry.
    Get {
        /// Category (`users` or `posts`).
        category: CategoryKind,

        /// Entry identifier.
        id: String,
    },

    /// Report posts whose author is not a persisted user.
    Check,

    /// List committed batches, most recent first.
    History,

    /// Run the users/posts example through the typed builder (no database).
    Demo,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
