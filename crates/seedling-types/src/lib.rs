//! Shared domain types for Seedling.
//!
//! This crate contains the domain types used across the Seedling workspace:
//! categories, user and post records, the committed seed snapshot, seed
//! files, commit batches, configuration, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod batch;
pub mod category;
pub mod config;
pub mod error;
pub mod record;
pub mod seed;
pub mod seed_file;
