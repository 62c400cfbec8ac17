//! Invoice error types for validation and state errors.

use rust_decimal::Decimal;
use sidegig_shared::types::{InvoiceId, PaymentId};
use thiserror::Error;

use super::types::InvoiceStatus;

/// Errors that can occur during invoice operations.
#[derive(Debug, Error)]
pub enum InvoiceError {
    // ========== Validation Errors ==========
    /// Line item quantity cannot be negative.
    #[error("Line item {index}: quantity cannot be negative")]
    NegativeQuantity {
        /// Index of the offending line item.
        index: usize,
    },

    /// Line item rate cannot be negative.
    #[error("Line item {index}: rate cannot be negative")]
    NegativeRate {
        /// Index of the offending line item.
        index: usize,
    },

    /// Line item description cannot be empty.
    #[error("Line item {index}: description cannot be empty")]
    EmptyDescription {
        /// Index of the offending line item.
        index: usize,
    },

    /// Tax rate must be between 0 and 100.
    #[error("Tax rate must be between 0 and 100, got {0}")]
    TaxRateOutOfRange(Decimal),

    /// Discount cannot be negative.
    #[error("Discount cannot be negative, got {0}")]
    NegativeDiscount(Decimal),

    /// Discount cannot exceed subtotal plus tax (totals never go negative).
    #[error("Discount {discount} exceeds subtotal plus tax {max}")]
    DiscountExceedsTotal {
        /// The requested discount.
        discount: Decimal,
        /// Subtotal plus tax, the maximum allowed discount.
        max: Decimal,
    },

    /// Payment amount must be positive.
    #[error("Payment amount must be positive, got {0}")]
    NonPositivePaymentAmount(Decimal),

    /// Payment cannot exceed the balance due (no partial overpayment).
    #[error("Payment {amount} exceeds balance due {balance_due}")]
    PaymentExceedsBalance {
        /// The requested payment amount.
        amount: Decimal,
        /// The current balance due.
        balance_due: Decimal,
    },

    // ========== State Errors ==========
    /// Line items can only be replaced while the invoice is a draft.
    #[error("Line items can only be replaced on draft invoices (status: {0})")]
    LineItemsNotEditable(InvoiceStatus),

    /// Invalid status transition.
    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition {
        /// The current status.
        from: InvoiceStatus,
        /// The requested status.
        to: InvoiceStatus,
    },

    /// Cancelled invoices accept no payments.
    #[error("Invoice {0} is cancelled and accepts no payments")]
    InvoiceCancelled(InvoiceId),

    // ========== Reference Errors ==========
    /// Invoice not found.
    #[error("Invoice not found: {0}")]
    InvoiceNotFound(InvoiceId),

    /// Payment not found.
    #[error("Payment not found: {0}")]
    PaymentNotFound(PaymentId),

    /// Payment does not belong to the invoice.
    #[error("Payment {payment} does not belong to invoice {invoice}")]
    PaymentInvoiceMismatch {
        /// The payment ID.
        payment: PaymentId,
        /// The invoice ID.
        invoice: InvoiceId,
    },
}

impl InvoiceError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NegativeQuantity { .. } => "NEGATIVE_QUANTITY",
            Self::NegativeRate { .. } => "NEGATIVE_RATE",
            Self::EmptyDescription { .. } => "EMPTY_DESCRIPTION",
            Self::TaxRateOutOfRange(_) => "TAX_RATE_OUT_OF_RANGE",
            Self::NegativeDiscount(_) => "NEGATIVE_DISCOUNT",
            Self::DiscountExceedsTotal { .. } => "DISCOUNT_EXCEEDS_TOTAL",
            Self::NonPositivePaymentAmount(_) => "NON_POSITIVE_PAYMENT_AMOUNT",
            Self::PaymentExceedsBalance { .. } => "PAYMENT_EXCEEDS_BALANCE",
            Self::LineItemsNotEditable(_) => "LINE_ITEMS_NOT_EDITABLE",
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::InvoiceCancelled(_) => "INVOICE_CANCELLED",
            Self::InvoiceNotFound(_) => "INVOICE_NOT_FOUND",
            Self::PaymentNotFound(_) => "PAYMENT_NOT_FOUND",
            Self::PaymentInvoiceMismatch { .. } => "PAYMENT_INVOICE_MISMATCH",
        }
    }

    /// Returns true if this is a validation error (bad input) as opposed to
    /// a stale reference.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        !matches!(
            self,
            Self::InvoiceNotFound(_)
                | Self::PaymentNotFound(_)
                | Self::PaymentInvoiceMismatch { .. }
        )
    }
}

impl From<InvoiceError> for sidegig_shared::AppError {
    fn from(err: InvoiceError) -> Self {
        match err {
            InvoiceError::InvoiceNotFound(_)
            | InvoiceError::PaymentNotFound(_)
            | InvoiceError::PaymentInvoiceMismatch { .. } => Self::NotFound(err.to_string()),
            InvoiceError::LineItemsNotEditable(_)
            | InvoiceError::InvalidTransition { .. }
            | InvoiceError::InvoiceCancelled(_) => Self::BusinessRule(err.to_string()),
            _ => Self::Validation(err.to_string()),
        }
    }
}
