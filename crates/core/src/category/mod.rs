//! Canonical expense categories and label mapping.
//!
//! Historical data carries free-form category labels ("gas", "Phone &
//! Internet", "misc"). Every ledger and export boundary coerces labels to
//! the fixed `CanonicalCategory` enumeration through an injected
//! `CategoryMap`, so malformed records never corrupt aggregate totals.

pub mod mapper;
pub mod types;

pub use mapper::CategoryMap;
pub use types::{CanonicalCategory, MEALS_DEDUCTIBLE_PERCENT};
