//! The evaluation engine for weighted relational views.
//!
//! This module provides:
//! - **errors**: Error types for transform and evaluation failures
//! - **transform**: Odds transform from probabilities to independence-compatible weights
//! - **store**: The materialized weighted-tuple store
//! - **materialize**: Pulling view rows into the store
//! - **predicate**: Typed selection predicates over tuple keys
//! - **evaluate**: Query probability computation with baseline correction
//! - **snapshot**: JSON export of the materialized store

pub mod errors;
pub mod transform;
pub mod store;
pub mod materialize;
pub mod predicate;
pub mod evaluate;
pub mod snapshot;
