//! CLI command implementations.
//!
//! Each command returns `Ok(true)` when the data passed.

pub mod check;
pub mod infer;
