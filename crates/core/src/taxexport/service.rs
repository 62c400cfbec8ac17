//! Tax export package builder.

use std::collections::BTreeMap;

use chrono::Datelike;
use rust_decimal::Decimal;
use sidegig_shared::config::TaxConfig;
use sidegig_shared::types::money::round_money;

use super::error::TaxExportError;
use super::payer::roll_payers;
use super::schedule_c::{line_label, reference_for, LINE_ORDER, OTHER_EXPENSES_REF};
use super::types::{
    DiagnosticReason, ExpenseRow, ExportDiagnostic, IncomeKind, IncomeRow, MileageRow,
    MileageSummary, OtherExpenseItem, RecordKind, ScheduleC, SignConvention, SummaryRow,
    TaxExportOutcome, TaxExportPackage, TaxExportRequest,
};
use crate::category::CategoryMap;

/// Earliest tax year the aggregator accepts.
const MIN_TAX_YEAR: i32 = 2000;
/// Latest tax year the aggregator accepts.
const MAX_TAX_YEAR: i32 = 2100;

/// Service building reconciled tax export packages.
///
/// `build` is pure and deterministic for a given input set: the same
/// records always produce the same package (the generation timestamp is
/// carried as metadata and never feeds a total).
pub struct TaxExportService;

impl TaxExportService {
    /// Builds the export package for one tax year.
    ///
    /// Records are filtered to the year by their cash-basis date (income:
    /// date received; expense: date paid). A record with an unmappable
    /// category is coerced to Other; a record missing a date is excluded.
    /// Both cases are recorded as diagnostics, never thrown.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTaxYear` for implausible years and
    /// `MissingMileageRate` when the tax settings carry no standard
    /// mileage rate for the year.
    pub fn build(
        request: TaxExportRequest,
        categories: &CategoryMap,
        tax: &TaxConfig,
    ) -> Result<TaxExportOutcome, TaxExportError> {
        let tax_year = request.tax_year;
        if !(MIN_TAX_YEAR..=MAX_TAX_YEAR).contains(&tax_year) {
            return Err(TaxExportError::InvalidTaxYear(tax_year));
        }
        let mileage_rate = tax
            .mileage_rate(tax_year)
            .ok_or(TaxExportError::MissingMileageRate(tax_year))?;

        let mut diagnostics = Vec::new();

        let income_rows = Self::income_rows(&request, &mut diagnostics);
        let expense_rows =
            Self::expense_rows(&request, categories, tax, &mut diagnostics);
        let mileage_rows = Self::mileage_rows(&request, &mut diagnostics);

        let mileage_summary = Self::mileage_summary(&mileage_rows, mileage_rate);
        let payer_rows = roll_payers(&income_rows, &request.payers);
        let schedule_c = Self::schedule_c(&income_rows, &expense_rows);
        let summary_rows = Self::summary_rows(
            &schedule_c,
            &mileage_summary,
            request.sign_convention,
        );

        Ok(TaxExportOutcome {
            package: TaxExportPackage {
                tax_year,
                generated_at: request.generated_at,
                sign_convention: request.sign_convention,
                income_rows,
                expense_rows,
                mileage_rows,
                mileage_summary,
                payer_rows,
                schedule_c,
                summary_rows,
            },
            diagnostics,
        })
    }

    fn income_rows(
        request: &TaxExportRequest,
        diagnostics: &mut Vec<ExportDiagnostic>,
    ) -> Vec<IncomeRow> {
        let mut rows = Vec::new();
        for (index, record) in request.income.iter().enumerate() {
            let Some(date) = record.date else {
                tracing::warn!(index, "income record has no date, excluding from export");
                diagnostics.push(ExportDiagnostic {
                    kind: RecordKind::Income,
                    index,
                    reason: DiagnosticReason::MissingDate,
                });
                continue;
            };
            if date.year() != request.tax_year {
                continue;
            }
            rows.push(IncomeRow {
                date,
                payer_id: record.payer_id,
                payer_name: record.payer_name.clone(),
                kind: record.kind,
                gross_amount: record.gross_amount,
                fees: record.fees,
                net_amount: round_money(record.gross_amount - record.fees),
                description: record.description.clone(),
            });
        }
        rows
    }

    fn expense_rows(
        request: &TaxExportRequest,
        categories: &CategoryMap,
        tax: &TaxConfig,
        diagnostics: &mut Vec<ExportDiagnostic>,
    ) -> Vec<ExpenseRow> {
        let mut rows = Vec::new();
        for (index, record) in request.expenses.iter().enumerate() {
            let Some(date) = record.date else {
                tracing::warn!(index, "expense record has no date, excluding from export");
                diagnostics.push(ExportDiagnostic {
                    kind: RecordKind::Expense,
                    index,
                    reason: DiagnosticReason::MissingDate,
                });
                continue;
            };
            if date.year() != request.tax_year {
                continue;
            }

            // Coerce on read: unknown labels still produce a row, tagged
            // Other, with a diagnostic so the gap is visible.
            if categories.lookup(&record.category).is_none() {
                diagnostics.push(ExportDiagnostic {
                    kind: RecordKind::Expense,
                    index,
                    reason: DiagnosticReason::UnknownCategory {
                        label: record.category.clone(),
                    },
                });
            }
            let category = categories.to_canonical(&record.category);

            // Deductible percent is an export concern; the stored amount
            // passes through untouched.
            let deductible_percent = if category.is_meals() {
                tax.meals_deductible_percent
            } else {
                Decimal::ONE
            };
            let deductible_amount = round_money(record.amount * deductible_percent);
            let amount_for_entry = match request.sign_convention {
                SignConvention::Positive => deductible_amount,
                SignConvention::Signed => -deductible_amount,
            };

            rows.push(ExpenseRow {
                date,
                category,
                schedule_c_ref: reference_for(category).to_string(),
                description: record.description.clone(),
                vendor: record.vendor.clone(),
                amount: record.amount,
                deductible_percent,
                deductible_amount,
                amount_for_entry,
            });
        }
        rows
    }

    fn mileage_rows(
        request: &TaxExportRequest,
        diagnostics: &mut Vec<ExportDiagnostic>,
    ) -> Vec<MileageRow> {
        let mut rows = Vec::new();
        for (index, record) in request.mileage.iter().enumerate() {
            let Some(date) = record.date else {
                tracing::warn!(index, "mileage record has no date, excluding from export");
                diagnostics.push(ExportDiagnostic {
                    kind: RecordKind::Mileage,
                    index,
                    reason: DiagnosticReason::MissingDate,
                });
                continue;
            };
            if date.year() != request.tax_year {
                continue;
            }
            rows.push(MileageRow {
                date,
                miles: record.miles,
                purpose: record.purpose.clone(),
            });
        }
        rows
    }

    fn mileage_summary(rows: &[MileageRow], rate: Decimal) -> MileageSummary {
        let total_miles: Decimal = rows.iter().map(|r| r.miles).sum();
        MileageSummary {
            total_miles,
            rate,
            deduction: round_money(total_miles * rate),
        }
    }

    /// Folds detail rows into the Schedule C summary.
    ///
    /// `net_profit` here and a recomputation from the detail rows must
    /// agree; that equality is the aggregator's core correctness contract
    /// (see the property tests).
    fn schedule_c(income_rows: &[IncomeRow], expense_rows: &[ExpenseRow]) -> ScheduleC {
        let mut gross_receipts = Decimal::ZERO;
        let mut returns_allowances = Decimal::ZERO;
        let mut other_income = Decimal::ZERO;
        for row in income_rows {
            match row.kind {
                IncomeKind::Gig => gross_receipts += row.gross_amount,
                IncomeKind::OtherIncome => other_income += row.gross_amount,
                IncomeKind::Refund => returns_allowances += row.gross_amount,
            }
        }

        let mut cogs = Decimal::ZERO;
        let mut expense_totals_by_ref: BTreeMap<String, Decimal> = BTreeMap::new();
        let mut other_breakdown: BTreeMap<String, Decimal> = BTreeMap::new();
        for row in expense_rows {
            if row.category.is_cost_of_goods() {
                cogs += row.deductible_amount;
                continue;
            }
            *expense_totals_by_ref
                .entry(row.schedule_c_ref.clone())
                .or_default() += row.deductible_amount;
            if row.schedule_c_ref == OTHER_EXPENSES_REF {
                *other_breakdown
                    .entry(row.category.label().to_string())
                    .or_default() += row.deductible_amount;
            }
        }

        let total_expenses: Decimal = expense_totals_by_ref.values().copied().sum();
        let net_profit =
            gross_receipts - returns_allowances - cogs + other_income - total_expenses;

        ScheduleC {
            gross_receipts,
            returns_allowances,
            cogs,
            other_income,
            expense_totals_by_ref,
            other_expenses_breakdown: other_breakdown
                .into_iter()
                .map(|(label, amount)| OtherExpenseItem { label, amount })
                .collect(),
            total_expenses,
            net_profit,
        }
    }

    /// Emits the flat manual-entry rows in form order.
    fn summary_rows(
        schedule_c: &ScheduleC,
        mileage: &MileageSummary,
        convention: SignConvention,
    ) -> Vec<SummaryRow> {
        let expense_sign = match convention {
            SignConvention::Positive => Decimal::ONE,
            SignConvention::Signed => Decimal::NEGATIVE_ONE,
        };

        let mut rows = vec![
            SummaryRow {
                label: "Gross receipts".to_string(),
                amount: schedule_c.gross_receipts,
            },
            SummaryRow {
                label: "Returns and allowances".to_string(),
                amount: schedule_c.returns_allowances * expense_sign,
            },
            SummaryRow {
                label: "Cost of goods sold".to_string(),
                amount: schedule_c.cogs * expense_sign,
            },
            SummaryRow {
                label: "Other income".to_string(),
                amount: schedule_c.other_income,
            },
        ];

        for reference in LINE_ORDER {
            if let Some(total) = schedule_c.expense_totals_by_ref.get(reference) {
                rows.push(SummaryRow {
                    label: format!("Line {reference} - {}", line_label(reference)),
                    amount: *total * expense_sign,
                });
            }
        }

        rows.push(SummaryRow {
            label: "Standard mileage deduction".to_string(),
            amount: mileage.deduction * expense_sign,
        });
        rows.push(SummaryRow {
            label: "Net profit".to_string(),
            amount: schedule_c.net_profit,
        });

        rows
    }
}
