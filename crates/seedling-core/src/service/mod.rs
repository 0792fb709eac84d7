//! Service layer for Seedling.
//!
//! Services orchestrate the seed builder and the persistence port. They
//! depend only on trait abstractions from `repository` -- never on
//! concrete infrastructure implementations.

pub mod seed;
