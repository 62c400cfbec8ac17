//! Scenario and property-based tests for the tax export aggregator.

use chrono::{NaiveDate, TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sidegig_shared::config::TaxConfig;
use sidegig_shared::types::{ExpenseId, IncomeId, MileageId};

use super::error::TaxExportError;
use super::schedule_c::OTHER_EXPENSES_REF;
use super::service::TaxExportService;
use super::types::{
    DiagnosticReason, ExpenseRecord, IncomeKind, IncomeRecord, MileageRecord, PayerRecord,
    RecordKind, SignConvention, TaxExportOutcome, TaxExportPackage, TaxExportRequest,
};
use crate::category::CategoryMap;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn income(d: Option<NaiveDate>, payer: &str, kind: IncomeKind, gross: Decimal) -> IncomeRecord {
    IncomeRecord {
        id: IncomeId::new(),
        date: d,
        payer_id: None,
        payer_name: payer.to_string(),
        kind,
        gross_amount: gross,
        fees: dec!(0),
        description: None,
    }
}

fn expense(d: Option<NaiveDate>, category: &str, amount: Decimal) -> ExpenseRecord {
    ExpenseRecord {
        id: ExpenseId::new(),
        date: d,
        category: category.to_string(),
        description: format!("{category} purchase"),
        amount,
        vendor: None,
    }
}

fn mileage(d: Option<NaiveDate>, miles: Decimal) -> MileageRecord {
    MileageRecord {
        id: MileageId::new(),
        date: d,
        miles,
        purpose: None,
    }
}

fn request(
    income: Vec<IncomeRecord>,
    expenses: Vec<ExpenseRecord>,
    mileage: Vec<MileageRecord>,
) -> TaxExportRequest {
    TaxExportRequest {
        tax_year: 2024,
        generated_at: Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap(),
        sign_convention: SignConvention::Positive,
        income,
        expenses,
        mileage,
        payers: vec![],
    }
}

fn build(request: TaxExportRequest) -> TaxExportOutcome {
    TaxExportService::build(request, &CategoryMap::default(), &TaxConfig::default()).unwrap()
}

/// Recomputes net profit from the detail rows alone, independently of the
/// summary object.
fn net_profit_from_details(package: &TaxExportPackage) -> Decimal {
    let mut net = Decimal::ZERO;
    for row in &package.income_rows {
        match row.kind {
            IncomeKind::Gig | IncomeKind::OtherIncome => net += row.gross_amount,
            IncomeKind::Refund => net -= row.gross_amount,
        }
    }
    for row in &package.expense_rows {
        net -= row.deductible_amount;
    }
    net
}

#[test]
fn test_schedule_c_totals() {
    let outcome = build(request(
        vec![
            income(Some(date(2024, 2, 1)), "RideShareCo", IncomeKind::Gig, dec!(5000)),
            income(Some(date(2024, 5, 1)), "RideShareCo", IncomeKind::Gig, dec!(3000)),
            income(Some(date(2024, 6, 1)), "Direct", IncomeKind::OtherIncome, dec!(200)),
            income(Some(date(2024, 7, 1)), "RideShareCo", IncomeKind::Refund, dec!(150)),
        ],
        vec![
            expense(Some(date(2024, 3, 10)), "gas", dec!(400)),
            expense(Some(date(2024, 3, 12)), "meals", dec!(100)),
            expense(Some(date(2024, 4, 2)), "software", dec!(60)),
        ],
        vec![mileage(Some(date(2024, 3, 10)), dec!(100))],
    ));

    let sc = &outcome.package.schedule_c;
    assert_eq!(sc.gross_receipts, dec!(8000));
    assert_eq!(sc.other_income, dec!(200));
    assert_eq!(sc.returns_allowances, dec!(150));
    assert_eq!(sc.cogs, dec!(0));
    assert_eq!(sc.expense_totals_by_ref.get("9"), Some(&dec!(400)));
    // Meals: 50% deductible.
    assert_eq!(sc.expense_totals_by_ref.get("24b"), Some(&dec!(50.00)));
    assert_eq!(sc.expense_totals_by_ref.get("27a"), Some(&dec!(60)));
    assert_eq!(sc.total_expenses, dec!(510.00));
    assert_eq!(sc.net_profit, dec!(8000) - dec!(150) + dec!(200) - dec!(510.00));
    assert!(outcome.diagnostics.is_empty());
}

#[test]
fn test_meals_percent_never_mutates_stored_amount() {
    let outcome = build(request(
        vec![],
        vec![expense(Some(date(2024, 3, 12)), "meals", dec!(100))],
        vec![],
    ));

    let row = &outcome.package.expense_rows[0];
    assert_eq!(row.amount, dec!(100));
    assert_eq!(row.deductible_percent, dec!(0.5));
    assert_eq!(row.deductible_amount, dec!(50.00));
}

#[test]
fn test_cash_basis_year_filter() {
    let outcome = build(request(
        vec![
            income(Some(date(2023, 12, 31)), "RideShareCo", IncomeKind::Gig, dec!(999)),
            income(Some(date(2024, 1, 1)), "RideShareCo", IncomeKind::Gig, dec!(100)),
            income(Some(date(2025, 1, 1)), "RideShareCo", IncomeKind::Gig, dec!(888)),
        ],
        vec![
            expense(Some(date(2023, 12, 31)), "gas", dec!(77)),
            expense(Some(date(2024, 6, 1)), "gas", dec!(50)),
        ],
        vec![
            mileage(Some(date(2023, 12, 31)), dec!(10)),
            mileage(Some(date(2024, 6, 1)), dec!(25)),
        ],
    ));

    assert_eq!(outcome.package.income_rows.len(), 1);
    assert_eq!(outcome.package.schedule_c.gross_receipts, dec!(100));
    assert_eq!(outcome.package.expense_rows.len(), 1);
    assert_eq!(outcome.package.mileage_summary.total_miles, dec!(25));
    // Out-of-year records are not diagnostics; they are simply out of scope.
    assert!(outcome.diagnostics.is_empty());
}

#[test]
fn test_missing_dates_excluded_with_diagnostics() {
    let outcome = build(request(
        vec![income(None, "RideShareCo", IncomeKind::Gig, dec!(100))],
        vec![expense(None, "gas", dec!(50))],
        vec![mileage(None, dec!(10))],
    ));

    assert!(outcome.package.income_rows.is_empty());
    assert!(outcome.package.expense_rows.is_empty());
    assert!(outcome.package.mileage_rows.is_empty());

    assert_eq!(outcome.diagnostics.len(), 3);
    assert!(outcome
        .diagnostics
        .iter()
        .all(|d| d.reason == DiagnosticReason::MissingDate));
    let kinds: Vec<RecordKind> = outcome.diagnostics.iter().map(|d| d.kind).collect();
    assert!(kinds.contains(&RecordKind::Income));
    assert!(kinds.contains(&RecordKind::Expense));
    assert!(kinds.contains(&RecordKind::Mileage));
}

#[test]
fn test_unknown_category_coerced_not_dropped() {
    let outcome = build(request(
        vec![],
        vec![expense(Some(date(2024, 2, 2)), "llama grooming", dec!(30))],
        vec![],
    ));

    // The row survives, tagged Other, and lands on the catch-all line.
    assert_eq!(outcome.package.expense_rows.len(), 1);
    assert_eq!(
        outcome.package.expense_rows[0].schedule_c_ref,
        OTHER_EXPENSES_REF
    );
    assert_eq!(
        outcome.package.schedule_c.expense_totals_by_ref.get(OTHER_EXPENSES_REF),
        Some(&dec!(30))
    );

    assert_eq!(outcome.diagnostics.len(), 1);
    assert!(matches!(
        &outcome.diagnostics[0].reason,
        DiagnosticReason::UnknownCategory { label } if label == "llama grooming"
    ));
}

#[test]
fn test_other_breakdown_sums_to_catch_all_line() {
    let outcome = build(request(
        vec![],
        vec![
            expense(Some(date(2024, 1, 5)), "bank fees", dec!(12.50)),
            expense(Some(date(2024, 2, 5)), "software", dec!(30)),
            expense(Some(date(2024, 3, 5)), "software", dec!(30)),
            expense(Some(date(2024, 4, 5)), "whatever this is", dec!(7.25)),
        ],
        vec![],
    ));

    let sc = &outcome.package.schedule_c;
    let breakdown_total: Decimal = sc.other_expenses_breakdown.iter().map(|i| i.amount).sum();
    assert_eq!(
        Some(&breakdown_total),
        sc.expense_totals_by_ref.get(OTHER_EXPENSES_REF)
    );
    assert_eq!(breakdown_total, dec!(79.75));
    // One breakdown item per label.
    assert_eq!(sc.other_expenses_breakdown.len(), 3);
}

#[test]
fn test_cogs_feeds_line_four_not_part_two() {
    let outcome = build(request(
        vec![income(Some(date(2024, 1, 5)), "Shop", IncomeKind::Gig, dec!(1000))],
        vec![expense(Some(date(2024, 1, 10)), "inventory", dec!(250))],
        vec![],
    ));

    let sc = &outcome.package.schedule_c;
    assert_eq!(sc.cogs, dec!(250));
    assert_eq!(sc.expense_totals_by_ref.get("4"), None);
    assert_eq!(sc.total_expenses, dec!(0));
    assert_eq!(sc.net_profit, dec!(750));
}

#[test]
fn test_mileage_deduction_outside_expense_totals() {
    let outcome = build(request(
        vec![],
        vec![],
        vec![
            mileage(Some(date(2024, 1, 5)), dec!(100)),
            mileage(Some(date(2024, 2, 5)), dec!(50.5)),
        ],
    ));

    let summary = &outcome.package.mileage_summary;
    assert_eq!(summary.total_miles, dec!(150.5));
    assert_eq!(summary.rate, dec!(0.67));
    assert_eq!(summary.deduction, dec!(100.84)); // 150.5 * 0.67 = 100.835 -> banker's
    assert!(outcome.package.schedule_c.expense_totals_by_ref.is_empty());
}

#[test]
fn test_payer_rollup_joins_known_payers() {
    let mut req = request(
        vec![
            income(Some(date(2024, 2, 1)), "RideShareCo", IncomeKind::Gig, dec!(500)),
            income(Some(date(2024, 4, 1)), "rideshareco", IncomeKind::Gig, dec!(700)),
        ],
        vec![],
        vec![],
    );
    req.payers = vec![PayerRecord {
        id: None,
        name: "RideShareCo".to_string(),
        expects_1099: true,
    }];

    let outcome = build(req);
    let payer_rows = &outcome.package.payer_rows;
    assert_eq!(payer_rows.len(), 1);
    assert_eq!(payer_rows[0].gross, dec!(1200));
    assert_eq!(payer_rows[0].payment_count, 2);
    assert!(payer_rows[0].expects_1099);
    assert_eq!(payer_rows[0].first_payment, date(2024, 2, 1));
    assert_eq!(payer_rows[0].last_payment, date(2024, 4, 1));
}

#[test]
fn test_sign_conventions_agree_on_canonical_totals() {
    let income_records = vec![
        income(Some(date(2024, 2, 1)), "RideShareCo", IncomeKind::Gig, dec!(900)),
    ];
    let expense_records = vec![
        expense(Some(date(2024, 3, 1)), "gas", dec!(120)),
        expense(Some(date(2024, 3, 2)), "misc", dec!(40)),
    ];

    let positive = build(request(income_records.clone(), expense_records.clone(), vec![]));
    let mut signed_req = request(income_records, expense_records, vec![]);
    signed_req.sign_convention = SignConvention::Signed;
    let signed = build(signed_req);

    // Canonical totals are identical under both conventions.
    assert_eq!(
        positive.package.schedule_c.net_profit,
        signed.package.schedule_c.net_profit
    );
    assert_eq!(
        positive.package.schedule_c.expense_totals_by_ref,
        signed.package.schedule_c.expense_totals_by_ref
    );

    // Entry amounts flip sign on expenses only.
    for row in &positive.package.expense_rows {
        assert_eq!(row.amount_for_entry, row.deductible_amount);
    }
    for row in &signed.package.expense_rows {
        assert_eq!(row.amount_for_entry, -row.deductible_amount);
    }
}

#[test]
fn test_summary_rows_trace_to_package_fields() {
    let outcome = build(request(
        vec![income(Some(date(2024, 2, 1)), "RideShareCo", IncomeKind::Gig, dec!(900))],
        vec![expense(Some(date(2024, 3, 1)), "gas", dec!(120))],
        vec![mileage(Some(date(2024, 3, 1)), dec!(100))],
    ));

    let package = &outcome.package;
    let find = |label: &str| {
        package
            .summary_rows
            .iter()
            .find(|r| r.label == label)
            .map(|r| r.amount)
    };

    assert_eq!(find("Gross receipts"), Some(package.schedule_c.gross_receipts));
    assert_eq!(find("Net profit"), Some(package.schedule_c.net_profit));
    assert_eq!(
        find("Standard mileage deduction"),
        Some(package.mileage_summary.deduction)
    );
    assert_eq!(
        find("Line 9 - Car and truck expenses"),
        package.schedule_c.expense_totals_by_ref.get("9").copied()
    );
}

#[test]
fn test_invalid_tax_year_rejected() {
    let mut req = request(vec![], vec![], vec![]);
    req.tax_year = 1850;
    let result =
        TaxExportService::build(req, &CategoryMap::default(), &TaxConfig::default());
    assert!(matches!(result, Err(TaxExportError::InvalidTaxYear(1850))));
}

#[test]
fn test_missing_mileage_rate_rejected() {
    let mut req = request(vec![], vec![], vec![]);
    req.tax_year = 2001; // plausible year, but no configured rate
    let result =
        TaxExportService::build(req, &CategoryMap::default(), &TaxConfig::default());
    assert!(matches!(
        result,
        Err(TaxExportError::MissingMileageRate(2001))
    ));
}

// =========================================================================
// Property tests: cross-artifact reconciliation over randomized records
// =========================================================================

fn amount_cents() -> impl Strategy<Value = Decimal> {
    (1i64..500_000i64).prop_map(|v| Decimal::new(v, 2))
}

fn income_kind() -> impl Strategy<Value = IncomeKind> {
    prop_oneof![
        4 => Just(IncomeKind::Gig),
        1 => Just(IncomeKind::OtherIncome),
        1 => Just(IncomeKind::Refund),
    ]
}

fn category_label() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("gas".to_string()),
        Just("meals".to_string()),
        Just("supplies".to_string()),
        Just("software".to_string()),
        Just("bank fees".to_string()),
        Just("inventory".to_string()),
        Just("insurance".to_string()),
        Just("definitely not a category".to_string()),
    ]
}

fn in_year_date() -> impl Strategy<Value = NaiveDate> {
    (1u32..=12, 1u32..=28).prop_map(|(m, d)| date(2024, m, d))
}

fn income_records() -> impl Strategy<Value = Vec<IncomeRecord>> {
    prop::collection::vec(
        (in_year_date(), income_kind(), amount_cents()),
        0..20,
    )
    .prop_map(|records| {
        records
            .into_iter()
            .map(|(d, kind, gross)| income(Some(d), "RideShareCo", kind, gross))
            .collect()
    })
}

fn expense_records() -> impl Strategy<Value = Vec<ExpenseRecord>> {
    prop::collection::vec((in_year_date(), category_label(), amount_cents()), 0..20)
        .prop_map(|records| {
            records
                .into_iter()
                .map(|(d, label, amount)| expense(Some(d), &label, amount))
                .collect()
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// The catch-all breakdown always sums to the 27a line total.
    #[test]
    fn prop_other_breakdown_reconciles(expenses in expense_records()) {
        let outcome = build(request(vec![], expenses, vec![]));

        let sc = &outcome.package.schedule_c;
        let breakdown_total: Decimal =
            sc.other_expenses_breakdown.iter().map(|i| i.amount).sum();
        let line_total = sc
            .expense_totals_by_ref
            .get(OTHER_EXPENSES_REF)
            .copied()
            .unwrap_or(Decimal::ZERO);
        prop_assert_eq!(breakdown_total, line_total);
    }

    /// Net profit from the summary equals net profit recomputed from the
    /// detail rows, for any record set.
    #[test]
    fn prop_net_profit_cross_artifact_equality(
        income in income_records(),
        expenses in expense_records(),
    ) {
        let outcome = build(request(income, expenses, vec![]));

        prop_assert_eq!(
            outcome.package.schedule_c.net_profit,
            net_profit_from_details(&outcome.package)
        );
    }

    /// Total expenses always equals the sum over the per-reference map.
    #[test]
    fn prop_total_expenses_reconciles(expenses in expense_records()) {
        let outcome = build(request(vec![], expenses, vec![]));

        let sc = &outcome.package.schedule_c;
        let summed: Decimal = sc.expense_totals_by_ref.values().copied().sum();
        prop_assert_eq!(sc.total_expenses, summed);
    }

    /// Under the positive convention every entry amount is non-negative;
    /// under the signed convention expense entries are non-positive. The
    /// canonical net profit is identical either way.
    #[test]
    fn prop_sign_convention_is_presentation_only(
        income in income_records(),
        expenses in expense_records(),
    ) {
        let positive = build(request(income.clone(), expenses.clone(), vec![]));
        let mut signed_req = request(income, expenses, vec![]);
        signed_req.sign_convention = SignConvention::Signed;
        let signed = build(signed_req);

        for row in &positive.package.expense_rows {
            prop_assert!(row.amount_for_entry >= Decimal::ZERO);
        }
        for row in &signed.package.expense_rows {
            prop_assert!(row.amount_for_entry <= Decimal::ZERO);
        }
        prop_assert_eq!(
            positive.package.schedule_c.net_profit,
            signed.package.schedule_c.net_profit
        );
    }
}
