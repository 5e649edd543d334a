//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! commission allocation test suite.
//!
//! # Modules
//!
//! - `fixtures`: Reference deals and line sets with known outcomes
//! - `builders`: Builder patterns for typed and raw commission lines
//! - `assertions`: Custom assertion helpers for summaries and amounts
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
