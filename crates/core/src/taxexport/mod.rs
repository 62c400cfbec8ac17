//! Tax-year aggregation into a reconciled export package.
//!
//! Folds a year's income, expenses, mileage, and payer data into a
//! `TaxExportPackage`: Schedule C line totals, detail rows, payer rollups,
//! and flat summary rows for manual entry. Every numeric total in every
//! view traces back to the same package fields, so the artifacts sum
//! identically by construction. The aggregator performs no I/O; a
//! packaging layer serializes the views.

pub mod error;
pub mod payer;
pub mod schedule_c;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::TaxExportError;
pub use service::TaxExportService;
pub use types::{
    DiagnosticReason, ExpenseRecord, ExpenseRow, ExportDiagnostic, IncomeKind, IncomeRecord,
    IncomeRow, MileageRecord, MileageRow, MileageSummary, OtherExpenseItem, PayerRecord,
    PayerSummaryRow, RecordKind, ScheduleC, SignConvention, SummaryRow, TaxExportOutcome,
    TaxExportPackage, TaxExportRequest,
};
