//! Invoice totals, payments, and the status state machine.
//!
//! This module implements the billing ledger:
//! - Line-item totals (subtotal, tax, discount) recomputed atomically
//! - Payment recording and deletion with balance tracking
//! - The invoice status state machine, including derived statuses
//! - Invoice duplication
//!
//! Payments are looked up by invoice reference; an invoice never owns its
//! payments directly.

pub mod error;
pub mod service;
pub mod status;
pub mod types;

#[cfg(test)]
mod service_props;

pub use error::InvoiceError;
pub use service::{InvoiceService, PaymentOutcome};
pub use status::{can_transition, derive_status};
pub use types::{
    AcceptedPaymentMethod, ClientDetails, CreateInvoiceInput, Invoice, InvoiceStatus,
    InvoiceTotals, LineItem, LineItemInput, Payment, PaymentInput, PaymentMethod, PaymentTerms,
};
