//! Next-due-date scheduling for recurring expense templates.
//!
//! A template carries a frequency plus anchor fields (day of week, day of
//! month, month of year). The scheduler computes the next occurrence
//! strictly in the future of a given `from` date; day-of-month anchors that
//! exceed the days in a month clamp to the last day instead of rolling over.

pub mod error;
pub mod schedule;
pub mod service;
pub mod types;


pub use error::RecurrenceError;
pub use schedule::next_due_date;
pub use service::{MaterializeOutcome, RecurrenceService};
pub use types::{CreateTemplateInput, Frequency, RecurringExpenseTemplate, TemplateUpdate};
