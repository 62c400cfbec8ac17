//! Invoice service: totals computation, payments, and lifecycle operations.
//!
//! Pure business logic with no storage dependencies. Every function takes
//! snapshots and returns new values; the caller persists the result and the
//! triggering write in one transaction so readers never observe a payment
//! without its status change.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sidegig_shared::types::money::{percent_of, round_money};
use sidegig_shared::types::{InvoiceId, PaymentId};

use super::error::InvoiceError;
use super::status::{can_transition, derive_status};
use super::types::{
    CreateInvoiceInput, Invoice, InvoiceStatus, InvoiceTotals, LineItem, LineItemInput, Payment,
    PaymentInput,
};

/// Result of recording a payment.
#[derive(Debug, Clone)]
pub struct PaymentOutcome {
    /// The payment to persist.
    pub payment: Payment,
    /// The invoice status after the payment.
    pub new_status: InvoiceStatus,
}

/// Invoice service for billing operations.
pub struct InvoiceService;

impl InvoiceService {
    /// Validates line items and computes subtotal, tax, and total together.
    ///
    /// This is the only place totals are derived; partial recomputation
    /// (e.g. updating tax without resumming the subtotal) cannot happen.
    ///
    /// # Errors
    ///
    /// Returns a field-level `InvoiceError` identifying the offending line
    /// item or amount; nothing is mutated on failure.
    pub fn compute_totals(
        line_items: &[LineItem],
        tax_rate: Option<Decimal>,
        discount_amount: Option<Decimal>,
    ) -> Result<InvoiceTotals, InvoiceError> {
        for (index, item) in line_items.iter().enumerate() {
            if item.description.trim().is_empty() {
                return Err(InvoiceError::EmptyDescription { index });
            }
            if item.quantity < Decimal::ZERO {
                return Err(InvoiceError::NegativeQuantity { index });
            }
            if item.rate < Decimal::ZERO {
                return Err(InvoiceError::NegativeRate { index });
            }
        }

        if let Some(rate) = tax_rate {
            if rate < Decimal::ZERO || rate > Decimal::ONE_HUNDRED {
                return Err(InvoiceError::TaxRateOutOfRange(rate));
            }
        }

        let discount = discount_amount.unwrap_or(Decimal::ZERO);
        if discount < Decimal::ZERO {
            return Err(InvoiceError::NegativeDiscount(discount));
        }

        let subtotal = round_money(line_items.iter().map(LineItem::amount).sum());
        let tax_amount = tax_rate.map_or(Decimal::ZERO, |rate| percent_of(subtotal, rate));

        let max_discount = subtotal + tax_amount;
        if discount > max_discount {
            return Err(InvoiceError::DiscountExceedsTotal {
                discount,
                max: max_discount,
            });
        }

        Ok(InvoiceTotals {
            subtotal,
            tax_amount,
            total_amount: subtotal + tax_amount - discount,
        })
    }

    /// Creates a new draft invoice.
    ///
    /// # Errors
    ///
    /// Returns a validation error from `compute_totals`.
    pub fn create(input: CreateInvoiceInput) -> Result<Invoice, InvoiceError> {
        let line_items = Self::build_line_items(input.line_items);
        let totals =
            Self::compute_totals(&line_items, input.tax_rate, input.discount_amount)?;

        Ok(Invoice {
            id: InvoiceId::new(),
            user_id: input.user_id,
            invoice_number: input.invoice_number,
            client: input.client,
            invoice_date: input.invoice_date,
            due_date: input.payment_terms.due_date(input.invoice_date),
            payment_terms: input.payment_terms,
            tax_rate: input.tax_rate,
            discount_amount: input.discount_amount,
            line_items,
            totals,
            status: InvoiceStatus::Draft,
            accepted_payment_methods: input.accepted_payment_methods,
            notes: input.notes,
            sent_at: None,
        })
    }

    /// Replaces an invoice's line items (full replace-on-edit) and
    /// recomputes all totals atomically.
    ///
    /// Permitted on draft invoices only.
    ///
    /// # Errors
    ///
    /// Returns `LineItemsNotEditable` outside draft, or a validation error
    /// from `compute_totals`.
    pub fn replace_line_items(
        invoice: &Invoice,
        line_items: Vec<LineItemInput>,
        tax_rate: Option<Decimal>,
        discount_amount: Option<Decimal>,
    ) -> Result<Invoice, InvoiceError> {
        if !invoice.status.is_editable() {
            return Err(InvoiceError::LineItemsNotEditable(invoice.status));
        }

        let line_items = Self::build_line_items(line_items);
        let totals = Self::compute_totals(&line_items, tax_rate, discount_amount)?;

        let mut updated = invoice.clone();
        updated.line_items = line_items;
        updated.tax_rate = tax_rate;
        updated.discount_amount = discount_amount;
        updated.totals = totals;
        Ok(updated)
    }

    /// Marks an invoice as sent, stamping `sent_at` only on the first send.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` when the current status does not permit
    /// sending.
    pub fn mark_sent(invoice: &Invoice, now: DateTime<Utc>) -> Result<Invoice, InvoiceError> {
        if !can_transition(invoice.status, InvoiceStatus::Sent) {
            return Err(InvoiceError::InvalidTransition {
                from: invoice.status,
                to: InvoiceStatus::Sent,
            });
        }

        let mut updated = invoice.clone();
        updated.status = InvoiceStatus::Sent;
        // Idempotent re-send: the original timestamp survives.
        if updated.sent_at.is_none() {
            updated.sent_at = Some(now);
        }
        Ok(updated)
    }

    /// Applies an explicit status transition (e.g. viewed, cancelled).
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` when the state machine forbids it.
    pub fn transition(
        invoice: &Invoice,
        target: InvoiceStatus,
    ) -> Result<Invoice, InvoiceError> {
        if !can_transition(invoice.status, target) {
            return Err(InvoiceError::InvalidTransition {
                from: invoice.status,
                to: target,
            });
        }
        let mut updated = invoice.clone();
        updated.status = target;
        Ok(updated)
    }

    /// Records a payment against an invoice.
    ///
    /// `existing_payments` is the invoice's current payment set, looked up
    /// by reference. The returned payment and status must be persisted
    /// together.
    ///
    /// # Errors
    ///
    /// Rejects non-positive amounts, amounts exceeding the balance due
    /// (strict: no partial overpayment), and payments on cancelled
    /// invoices, before any state is produced.
    pub fn record_payment(
        invoice: &Invoice,
        existing_payments: &[Payment],
        input: PaymentInput,
        today: NaiveDate,
    ) -> Result<PaymentOutcome, InvoiceError> {
        if invoice.status == InvoiceStatus::Cancelled {
            return Err(InvoiceError::InvoiceCancelled(invoice.id));
        }
        if input.amount <= Decimal::ZERO {
            return Err(InvoiceError::NonPositivePaymentAmount(input.amount));
        }

        let total_paid = Self::total_paid(existing_payments);
        let balance_due = invoice.balance_due(total_paid);
        if input.amount > balance_due {
            return Err(InvoiceError::PaymentExceedsBalance {
                amount: input.amount,
                balance_due,
            });
        }

        let payment = Payment {
            id: PaymentId::new(),
            invoice_id: invoice.id,
            payment_date: input.payment_date,
            amount: input.amount,
            method: input.method,
            reference_number: input.reference_number,
            notes: input.notes,
        };

        let new_status = derive_status(
            invoice.status,
            &invoice.totals,
            total_paid + payment.amount,
            invoice.due_date,
            today,
            invoice.sent_at.is_some(),
        );

        Ok(PaymentOutcome {
            payment,
            new_status,
        })
    }

    /// Deletes a payment and re-derives the invoice status.
    ///
    /// An invoice that was `Paid` reverts to `PartiallyPaid` or `Sent`.
    ///
    /// # Errors
    ///
    /// Returns `PaymentNotFound` for unknown ids and
    /// `PaymentInvoiceMismatch` when the payment belongs to another
    /// invoice.
    pub fn delete_payment(
        invoice: &Invoice,
        existing_payments: &[Payment],
        payment_id: PaymentId,
        today: NaiveDate,
    ) -> Result<InvoiceStatus, InvoiceError> {
        let payment = existing_payments
            .iter()
            .find(|p| p.id == payment_id)
            .ok_or(InvoiceError::PaymentNotFound(payment_id))?;
        if payment.invoice_id != invoice.id {
            return Err(InvoiceError::PaymentInvoiceMismatch {
                payment: payment_id,
                invoice: invoice.id,
            });
        }

        let remaining = Self::total_paid(existing_payments) - payment.amount;
        Ok(derive_status(
            invoice.status,
            &invoice.totals,
            remaining,
            invoice.due_date,
            today,
            invoice.sent_at.is_some(),
        ))
    }

    /// Re-derives the status from the current payment set; used by the
    /// overdue sweep.
    #[must_use]
    pub fn refresh_status(
        invoice: &Invoice,
        existing_payments: &[Payment],
        today: NaiveDate,
    ) -> InvoiceStatus {
        derive_status(
            invoice.status,
            &invoice.totals,
            Self::total_paid(existing_payments),
            invoice.due_date,
            today,
            invoice.sent_at.is_some(),
        )
    }

    /// Duplicates an invoice as a fresh draft.
    ///
    /// The copy keeps client, line items, terms, tax, and discount;
    /// `invoice_date` resets to `today`, `due_date` is recomputed from the
    /// payment terms, and the copy starts in `Draft` with no payments and
    /// no `sent_at`.
    #[must_use]
    pub fn duplicate(invoice: &Invoice, invoice_number: String, today: NaiveDate) -> Invoice {
        let mut copy = invoice.clone();
        copy.id = InvoiceId::new();
        copy.invoice_number = invoice_number;
        copy.invoice_date = today;
        copy.due_date = copy.payment_terms.due_date(today);
        copy.status = InvoiceStatus::Draft;
        copy.sent_at = None;
        copy
    }

    /// Formats the next invoice number for a year and sequence.
    #[must_use]
    pub fn next_invoice_number(year: i32, seq: u32) -> String {
        format!("INV-{year}-{seq:04}")
    }

    /// Sums a payment set.
    #[must_use]
    pub fn total_paid(payments: &[Payment]) -> Decimal {
        payments.iter().map(|p| p.amount).sum()
    }

    fn build_line_items(inputs: Vec<LineItemInput>) -> Vec<LineItem> {
        inputs
            .into_iter()
            .map(|input| LineItem {
                description: input.description,
                quantity: input.quantity,
                rate: input.rate,
            })
            .collect()
    }
}
