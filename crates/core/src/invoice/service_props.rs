//! Property-based tests for InvoiceService.
//!
//! Invariants covered:
//! - Totals identity: total = subtotal + tax - discount, subtotal = sum of
//!   line amounts
//! - Balance integrity: balance due = total - payments, paid iff balance 0
//! - Overpayment is always rejected; exact payment always pays

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use sidegig_shared::types::UserId;

use super::error::InvoiceError;
use super::service::InvoiceService;
use super::types::{
    ClientDetails, CreateInvoiceInput, InvoiceStatus, LineItemInput, PaymentInput, PaymentMethod,
    PaymentTerms,
};

/// Strategy to generate non-negative quantities (0.00 to 100.00).
fn quantity() -> impl Strategy<Value = Decimal> {
    (0i64..10_000i64).prop_map(|v| Decimal::new(v, 2))
}

/// Strategy to generate non-negative rates (0.00 to 500.00).
fn rate() -> impl Strategy<Value = Decimal> {
    (0i64..50_000i64).prop_map(|v| Decimal::new(v, 2))
}

/// Strategy to generate tax rates (0.00 to 100.00).
fn tax_rate() -> impl Strategy<Value = Decimal> {
    (0i64..10_000i64).prop_map(|v| Decimal::new(v, 2))
}

fn line_items() -> impl Strategy<Value = Vec<LineItemInput>> {
    prop::collection::vec((quantity(), rate()), 1..6).prop_map(|pairs| {
        pairs
            .into_iter()
            .enumerate()
            .map(|(i, (quantity, rate))| LineItemInput {
                description: format!("Item {i}"),
                quantity,
                rate,
            })
            .collect()
    })
}

fn make_input(
    line_items: Vec<LineItemInput>,
    tax_rate: Option<Decimal>,
) -> CreateInvoiceInput {
    CreateInvoiceInput {
        user_id: UserId::new(),
        invoice_number: "INV-2024-0001".to_string(),
        client: ClientDetails {
            name: "Test Client".to_string(),
            email: None,
            address: None,
        },
        invoice_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        payment_terms: PaymentTerms::Net30,
        tax_rate,
        discount_amount: None,
        line_items,
        accepted_payment_methods: vec![],
        notes: None,
    }
}

fn payment(amount: Decimal) -> PaymentInput {
    PaymentInput {
        payment_date: NaiveDate::from_ymd_opt(2024, 1, 20).unwrap(),
        amount,
        method: PaymentMethod::BankTransfer,
        reference_number: None,
        notes: None,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Totals identity holds after create for any valid input.
    #[test]
    fn prop_totals_identity(items in line_items(), tax in tax_rate()) {
        let invoice = InvoiceService::create(make_input(items, Some(tax))).unwrap();

        let expected_subtotal: Decimal =
            invoice.line_items.iter().map(super::types::LineItem::amount).sum();
        prop_assert_eq!(invoice.totals.subtotal, expected_subtotal);
        prop_assert_eq!(
            invoice.totals.total_amount,
            invoice.totals.subtotal + invoice.totals.tax_amount
        );
        prop_assert!(invoice.totals.total_amount >= Decimal::ZERO);
    }

    /// Totals identity holds after a line-item replace (atomic recompute).
    #[test]
    fn prop_totals_identity_after_replace(
        items in line_items(),
        replacement in line_items(),
        tax in tax_rate(),
    ) {
        let invoice = InvoiceService::create(make_input(items, None)).unwrap();
        let updated =
            InvoiceService::replace_line_items(&invoice, replacement, Some(tax), None).unwrap();

        let expected_subtotal: Decimal =
            updated.line_items.iter().map(super::types::LineItem::amount).sum();
        prop_assert_eq!(updated.totals.subtotal, expected_subtotal);
        prop_assert_eq!(
            updated.totals.total_amount,
            updated.totals.subtotal + updated.totals.tax_amount
        );
    }

    /// Paying the exact balance always transitions to Paid; balance math
    /// holds along the way.
    #[test]
    fn prop_exact_payment_pays(items in line_items()) {
        let invoice = InvoiceService::create(make_input(items, None)).unwrap();
        let total = invoice.totals.total_amount;
        prop_assume!(total > Decimal::ZERO);

        let today = NaiveDate::from_ymd_opt(2024, 1, 20).unwrap();
        let outcome =
            InvoiceService::record_payment(&invoice, &[], payment(total), today).unwrap();

        prop_assert_eq!(outcome.new_status, InvoiceStatus::Paid);
        prop_assert_eq!(invoice.balance_due(outcome.payment.amount), Decimal::ZERO);
    }

    /// Any payment above the balance due is rejected.
    #[test]
    fn prop_overpayment_rejected(items in line_items(), excess in 1i64..100_000i64) {
        let invoice = InvoiceService::create(make_input(items, None)).unwrap();
        let amount = invoice.totals.total_amount + Decimal::new(excess, 2);

        let today = NaiveDate::from_ymd_opt(2024, 1, 20).unwrap();
        let result = InvoiceService::record_payment(&invoice, &[], payment(amount), today);

        let is_expected = matches!(
            result,
            Err(InvoiceError::PaymentExceedsBalance { .. })
        );
        prop_assert!(is_expected);
    }

    /// A partial payment yields PartiallyPaid and preserves balance math.
    #[test]
    fn prop_partial_payment(items in line_items(), fraction in 1u32..100u32) {
        let invoice = InvoiceService::create(make_input(items, None)).unwrap();
        let total = invoice.totals.total_amount;
        prop_assume!(total > Decimal::ZERO);

        let amount = sidegig_shared::types::money::round_money(
            total * Decimal::from(fraction) / Decimal::ONE_HUNDRED,
        );
        prop_assume!(amount > Decimal::ZERO && amount < total);

        let today = NaiveDate::from_ymd_opt(2024, 1, 20).unwrap();
        let outcome =
            InvoiceService::record_payment(&invoice, &[], payment(amount), today).unwrap();

        prop_assert_eq!(outcome.new_status, InvoiceStatus::PartiallyPaid);
        prop_assert_eq!(invoice.balance_due(amount), total - amount);
        prop_assert!(invoice.balance_due(amount) > Decimal::ZERO);
    }

    /// Duplicating any invoice yields a fresh draft dated today.
    #[test]
    fn prop_duplicate_resets(items in line_items(), day in 1u32..=28) {
        let invoice = InvoiceService::create(make_input(items, None)).unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 9, day).unwrap();

        let copy = InvoiceService::duplicate(&invoice, "INV-2024-9999".to_string(), today);

        prop_assert_eq!(copy.status, InvoiceStatus::Draft);
        prop_assert_eq!(copy.invoice_date, today);
        prop_assert_eq!(copy.due_date, copy.payment_terms.due_date(today));
        prop_assert!(copy.sent_at.is_none());
        prop_assert_eq!(copy.totals, invoice.totals);
    }
}
