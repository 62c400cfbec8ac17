//! Tax export data types.
//!
//! Input records are deliberately loose (optional dates, free-form
//! category strings) because they come straight from historical store
//! rows; the aggregator coerces or excludes rather than trusting them.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sidegig_shared::types::{ExpenseId, IncomeId, MileageId, PayerId};

use crate::category::CanonicalCategory;

/// How an income record counts toward Schedule C.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeKind {
    /// A gig payment: counts toward gross receipts.
    Gig,
    /// Other business income (line 6).
    OtherIncome,
    /// A refund issued to a customer: returns and allowances (line 2).
    Refund,
}

/// A raw income record from the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeRecord {
    /// Unique identifier.
    pub id: IncomeId,
    /// Date the money was received (cash basis). Missing dates exclude the
    /// record from the export, with a diagnostic.
    pub date: Option<NaiveDate>,
    /// Payer reference, when the store has one.
    pub payer_id: Option<PayerId>,
    /// Payer name as recorded.
    pub payer_name: String,
    /// How this record counts toward Schedule C.
    pub kind: IncomeKind,
    /// Gross amount received.
    pub gross_amount: Decimal,
    /// Platform/processing fees withheld.
    pub fees: Decimal,
    /// Description, if recorded.
    pub description: Option<String>,
}

/// A raw expense record from the store. The category is free-form and is
/// coerced through the category map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseRecord {
    /// Unique identifier.
    pub id: ExpenseId,
    /// Date the expense was paid (cash basis).
    pub date: Option<NaiveDate>,
    /// Free-form category label.
    pub category: String,
    /// Description.
    pub description: String,
    /// Amount paid.
    pub amount: Decimal,
    /// Vendor, if recorded.
    pub vendor: Option<String>,
}

/// A raw mileage record from the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MileageRecord {
    /// Unique identifier.
    pub id: MileageId,
    /// Date driven.
    pub date: Option<NaiveDate>,
    /// Business miles driven.
    pub miles: Decimal,
    /// Trip purpose, if recorded.
    pub purpose: Option<String>,
}

/// A payer known to the store, for 1099 reconciliation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayerRecord {
    /// Payer reference, when the store has one.
    pub id: Option<PayerId>,
    /// Payer name.
    pub name: String,
    /// Whether a 1099 is expected from this payer.
    pub expects_1099: bool,
}

/// Sign convention for `amount_for_entry` fields.
///
/// Canonical totals are always positive; the convention only affects the
/// entry-oriented views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignConvention {
    /// Every entry amount is positive (the tax tool supplies the sign).
    #[default]
    Positive,
    /// Expense entries are negative, income entries positive.
    Signed,
}

/// Request to build a tax export package.
#[derive(Debug, Clone)]
pub struct TaxExportRequest {
    /// The tax year to aggregate.
    pub tax_year: i32,
    /// Generation timestamp. Metadata only; never affects totals.
    pub generated_at: DateTime<Utc>,
    /// Sign convention for entry-oriented views.
    pub sign_convention: SignConvention,
    /// Raw income records.
    pub income: Vec<IncomeRecord>,
    /// Raw expense records.
    pub expenses: Vec<ExpenseRecord>,
    /// Raw mileage records.
    pub mileage: Vec<MileageRecord>,
    /// Known payers.
    pub payers: Vec<PayerRecord>,
}

/// An income detail row (filtered, dated).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeRow {
    /// Date received.
    pub date: NaiveDate,
    /// Payer reference, when known.
    pub payer_id: Option<PayerId>,
    /// Payer name.
    pub payer_name: String,
    /// How this row counts toward Schedule C.
    pub kind: IncomeKind,
    /// Gross amount received.
    pub gross_amount: Decimal,
    /// Fees withheld.
    pub fees: Decimal,
    /// Gross minus fees.
    pub net_amount: Decimal,
    /// Description, if recorded.
    pub description: Option<String>,
}

/// An expense detail row, category-coerced and Schedule-C tagged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseRow {
    /// Date paid.
    pub date: NaiveDate,
    /// Canonical category after coercion.
    pub category: CanonicalCategory,
    /// Schedule C line reference (e.g. "8", "24b", "27a").
    pub schedule_c_ref: String,
    /// Description.
    pub description: String,
    /// Vendor, if recorded.
    pub vendor: Option<String>,
    /// Amount paid, exactly as stored.
    pub amount: Decimal,
    /// Deductible fraction applied (1 for most categories, 0.5 for meals).
    pub deductible_percent: Decimal,
    /// `amount * deductible_percent`, at money precision.
    pub deductible_amount: Decimal,
    /// The deductible amount under the requested sign convention.
    pub amount_for_entry: Decimal,
}

/// A mileage detail row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MileageRow {
    /// Date driven.
    pub date: NaiveDate,
    /// Business miles driven.
    pub miles: Decimal,
    /// Trip purpose, if recorded.
    pub purpose: Option<String>,
}

/// Mileage totals and the standard-mileage deduction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MileageSummary {
    /// Total business miles in the tax year.
    pub total_miles: Decimal,
    /// Standard mileage rate applied (dollars per mile).
    pub rate: Decimal,
    /// `total_miles * rate`, at money precision.
    pub deduction: Decimal,
}

/// Per-payer income rollup for 1099 reconciliation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayerSummaryRow {
    /// Payer reference, when known.
    pub payer_id: Option<PayerId>,
    /// Payer name.
    pub name: String,
    /// Whether a 1099 is expected from this payer.
    pub expects_1099: bool,
    /// Number of payments received.
    pub payment_count: u32,
    /// Sum of gross amounts.
    pub gross: Decimal,
    /// Sum of fees withheld.
    pub fees: Decimal,
    /// Sum of net amounts.
    pub net: Decimal,
    /// Date of the first payment in the year.
    pub first_payment: NaiveDate,
    /// Date of the last payment in the year.
    pub last_payment: NaiveDate,
}

/// One item of the "other expenses" breakdown (line 27a).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtherExpenseItem {
    /// Category label shown on the breakdown.
    pub label: String,
    /// Deductible total for this label.
    pub amount: Decimal,
}

/// Schedule C summary totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleC {
    /// Line 1: gross receipts.
    pub gross_receipts: Decimal,
    /// Line 2: returns and allowances.
    pub returns_allowances: Decimal,
    /// Line 4: cost of goods sold.
    pub cogs: Decimal,
    /// Line 6: other income.
    pub other_income: Decimal,
    /// Deductible expense totals keyed by line reference.
    pub expense_totals_by_ref: BTreeMap<String, Decimal>,
    /// Breakdown of the line 27a catch-all. Sums to the 27a total.
    pub other_expenses_breakdown: Vec<OtherExpenseItem>,
    /// Sum of `expense_totals_by_ref`.
    pub total_expenses: Decimal,
    /// `gross_receipts - returns_allowances - cogs + other_income -
    /// total_expenses`.
    pub net_profit: Decimal,
}

/// A flat label/amount pair for the manual-entry pack.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryRow {
    /// Row label.
    pub label: String,
    /// Row amount, under the requested sign convention.
    pub amount: Decimal,
}

/// The reconciled tax export package: parallel views over one tax year.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxExportPackage {
    /// The tax year aggregated.
    pub tax_year: i32,
    /// Generation timestamp (metadata only).
    pub generated_at: DateTime<Utc>,
    /// Sign convention used for entry-oriented views.
    pub sign_convention: SignConvention,
    /// Income detail rows.
    pub income_rows: Vec<IncomeRow>,
    /// Expense detail rows.
    pub expense_rows: Vec<ExpenseRow>,
    /// Mileage detail rows.
    pub mileage_rows: Vec<MileageRow>,
    /// Mileage totals and deduction.
    pub mileage_summary: MileageSummary,
    /// Per-payer rollups.
    pub payer_rows: Vec<PayerSummaryRow>,
    /// Schedule C summary.
    pub schedule_c: ScheduleC,
    /// Flat rows for manual entry.
    pub summary_rows: Vec<SummaryRow>,
}

/// Which record collection a diagnostic refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    /// An income record.
    Income,
    /// An expense record.
    Expense,
    /// A mileage record.
    Mileage,
}

/// Why a record was excluded or coerced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticReason {
    /// The record has no date and was excluded.
    MissingDate,
    /// The category label was unrecognized and coerced to Other.
    UnknownCategory {
        /// The original label.
        label: String,
    },
}

/// One excluded or coerced record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportDiagnostic {
    /// Which collection the record came from.
    pub kind: RecordKind,
    /// Index of the record in its input collection.
    pub index: usize,
    /// Why it was flagged.
    pub reason: DiagnosticReason,
}

/// A built package plus the diagnostics gathered along the way.
#[derive(Debug, Clone)]
pub struct TaxExportOutcome {
    /// The reconciled package.
    pub package: TaxExportPackage,
    /// Records excluded or coerced while building it.
    pub diagnostics: Vec<ExportDiagnostic>,
}
