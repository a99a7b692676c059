//! Declared expectations: column types and value rules.

mod rules;
mod types;

pub(crate) use rules::format_bound;
pub use rules::ValueRule;
pub use types::{DataType, StorageType};
