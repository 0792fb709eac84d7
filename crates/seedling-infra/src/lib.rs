//! Infrastructure layer for Seedling.
//!
//! Contains implementations of the repository traits defined in `seedling-core`:
//! SQLite storage for committed seed snapshots, plus the data-directory,
//! `config.toml`, and seed-file loaders used by the CLI.

pub mod config;
pub mod seed_file;
pub mod sqlite;
