//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, status, errors)
//! - `cycle` - Timer cycles, the cycle list state and countdown derivation

pub mod cycle;
pub mod foundation;
