//! Seed accumulation, typed builder, and persistence ports for Seedling.
//!
//! This crate defines the runtime accumulator, the type-level builder on top
//! of it, and the "ports" (repository traits) that the infrastructure layer
//! implements. It depends only on `seedling-types` -- never on
//! `seedling-infra` or any database/IO crate.

pub mod repository;
pub mod seed;
pub mod service;
pub mod typed;
