//! Core business logic for Sidegig.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies. All domain types, validation rules, and calculations live
//! here; the surrounding application fetches records and persists results.
//!
//! # Modules
//!
//! - `category` - Canonical expense categories and label mapping
//! - `recurrence` - Next-due-date scheduling for recurring expense templates
//! - `expense` - Materialized expense records
//! - `invoice` - Invoice totals, payments, and the status state machine
//! - `taxexport` - Tax-year aggregation into a reconciled export package

pub mod category;
pub mod expense;
pub mod invoice;
pub mod recurrence;
pub mod taxexport;
