//! Invoice domain types.

use chrono::{DateTime, Days, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sidegig_shared::types::money::round_money;
use sidegig_shared::types::{InvoiceId, PaymentId, UserId};

/// Client identity fields on an invoice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientDetails {
    /// Client name.
    pub name: String,
    /// Client email.
    pub email: Option<String>,
    /// Client billing address.
    pub address: Option<String>,
}

/// A single invoice line item.
///
/// Owned exclusively by one invoice; immutable once the invoice leaves
/// draft, except via full replace-on-edit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    /// What was billed.
    pub description: String,
    /// Quantity (hours, units). Must be >= 0.
    pub quantity: Decimal,
    /// Rate per unit. Must be >= 0.
    pub rate: Decimal,
}

impl LineItem {
    /// The line amount: `quantity * rate`, at money precision.
    #[must_use]
    pub fn amount(&self) -> Decimal {
        round_money(self.quantity * self.rate)
    }
}

/// Input for a line item on create/replace.
#[derive(Debug, Clone)]
pub struct LineItemInput {
    /// What was billed.
    pub description: String,
    /// Quantity (hours, units).
    pub quantity: Decimal,
    /// Rate per unit.
    pub rate: Decimal,
}

/// Payment terms determining the due date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentTerms {
    /// Due immediately.
    DueOnReceipt,
    /// Due 7 days after the invoice date.
    Net7,
    /// Due 15 days after the invoice date.
    Net15,
    /// Due 30 days after the invoice date.
    Net30,
    /// Due 45 days after the invoice date.
    Net45,
    /// Due 60 days after the invoice date.
    Net60,
    /// Due a custom number of days after the invoice date.
    Custom {
        /// Days until due.
        days: u32,
    },
}

impl PaymentTerms {
    /// Days between the invoice date and the due date.
    #[must_use]
    pub const fn days(self) -> u32 {
        match self {
            Self::DueOnReceipt => 0,
            Self::Net7 => 7,
            Self::Net15 => 15,
            Self::Net30 => 30,
            Self::Net45 => 45,
            Self::Net60 => 60,
            Self::Custom { days } => days,
        }
    }

    /// The due date for an invoice issued on `invoice_date`.
    #[must_use]
    pub fn due_date(self, invoice_date: NaiveDate) -> NaiveDate {
        invoice_date + Days::new(u64::from(self.days()))
    }
}

/// How a payment was (or may be) made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Cash.
    Cash,
    /// Paper check.
    Check,
    /// Bank/ACH transfer.
    BankTransfer,
    /// Credit or debit card.
    Card,
    /// PayPal.
    Paypal,
    /// Venmo.
    Venmo,
    /// Zelle.
    Zelle,
    /// Anything else.
    Other,
}

/// A payment method the client may use, with optional routing details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcceptedPaymentMethod {
    /// The method.
    pub method: PaymentMethod,
    /// Handle/account details shown to the client (e.g. a Venmo handle).
    pub details: Option<String>,
}

/// Invoice lifecycle status.
///
/// `PartiallyPaid`, `Paid`, and `Overdue` are derived from payments and the
/// due date (see `status::derive_status`); the rest are set explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    /// Being drafted; line items may be replaced.
    Draft,
    /// Transmitted to the client.
    Sent,
    /// Opened by the client.
    Viewed,
    /// Some, but not all, of the total has been paid.
    PartiallyPaid,
    /// Balance due is zero.
    Paid,
    /// Past the due date with a balance remaining.
    Overdue,
    /// Cancelled; terminal.
    Cancelled,
}

impl InvoiceStatus {
    /// Returns true if line items may be replaced.
    #[must_use]
    pub fn is_editable(&self) -> bool {
        matches!(self, Self::Draft)
    }

    /// Returns true if no further transitions are possible.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Draft => "draft",
            Self::Sent => "sent",
            Self::Viewed => "viewed",
            Self::PartiallyPaid => "partially_paid",
            Self::Paid => "paid",
            Self::Overdue => "overdue",
            Self::Cancelled => "cancelled",
        };
        write!(f, "{s}")
    }
}

/// Derived invoice totals, always recomputed together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceTotals {
    /// Sum of line-item amounts.
    pub subtotal: Decimal,
    /// `subtotal * tax_rate / 100` (zero when no tax rate).
    pub tax_amount: Decimal,
    /// `subtotal + tax_amount - discount_amount`. Never negative.
    pub total_amount: Decimal,
}

/// An invoice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    /// Unique identifier.
    pub id: InvoiceId,
    /// Owning user account.
    pub user_id: UserId,
    /// Human-readable invoice number (e.g. "INV-2024-0042").
    pub invoice_number: String,
    /// Client identity fields.
    pub client: ClientDetails,
    /// Issue date.
    pub invoice_date: NaiveDate,
    /// Due date, derived from `payment_terms` and `invoice_date`.
    pub due_date: NaiveDate,
    /// Payment terms.
    pub payment_terms: PaymentTerms,
    /// Tax rate percentage (0-100), if any.
    pub tax_rate: Option<Decimal>,
    /// Flat discount amount, if any.
    pub discount_amount: Option<Decimal>,
    /// Line items, in display order.
    pub line_items: Vec<LineItem>,
    /// Derived totals.
    pub totals: InvoiceTotals,
    /// Lifecycle status.
    pub status: InvoiceStatus,
    /// Payment methods the client may use.
    pub accepted_payment_methods: Vec<AcceptedPaymentMethod>,
    /// Free-form notes shown on the invoice.
    pub notes: Option<String>,
    /// When the invoice was first sent. Never overwritten by re-sends.
    pub sent_at: Option<DateTime<Utc>>,
}

impl Invoice {
    /// The balance remaining given the total already paid.
    ///
    /// May be negative only transiently in memory; storage never holds a
    /// negative balance because overpayment is rejected.
    #[must_use]
    pub fn balance_due(&self, total_paid: Decimal) -> Decimal {
        self.totals.total_amount - total_paid
    }

    /// The balance as displayed: floored at zero. Display only; stored
    /// amounts are never clamped.
    #[must_use]
    pub fn display_balance_due(&self, total_paid: Decimal) -> Decimal {
        self.balance_due(total_paid).max(Decimal::ZERO)
    }
}

/// Input for creating an invoice.
#[derive(Debug, Clone)]
pub struct CreateInvoiceInput {
    /// Owning user account.
    pub user_id: UserId,
    /// Invoice number.
    pub invoice_number: String,
    /// Client identity fields.
    pub client: ClientDetails,
    /// Issue date.
    pub invoice_date: NaiveDate,
    /// Payment terms.
    pub payment_terms: PaymentTerms,
    /// Tax rate percentage (0-100), if any.
    pub tax_rate: Option<Decimal>,
    /// Flat discount amount, if any.
    pub discount_amount: Option<Decimal>,
    /// Line items.
    pub line_items: Vec<LineItemInput>,
    /// Payment methods the client may use.
    pub accepted_payment_methods: Vec<AcceptedPaymentMethod>,
    /// Free-form notes.
    pub notes: Option<String>,
}

/// A recorded payment against an invoice.
///
/// Payments reference their invoice; the invoice never owns them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    /// Unique identifier.
    pub id: PaymentId,
    /// The invoice this payment applies to.
    pub invoice_id: InvoiceId,
    /// Date the payment was received (cash basis).
    pub payment_date: NaiveDate,
    /// Amount paid. Always positive.
    pub amount: Decimal,
    /// How the payment was made.
    pub method: PaymentMethod,
    /// External reference (check number, transaction id).
    pub reference_number: Option<String>,
    /// Free-form notes.
    pub notes: Option<String>,
}

/// Input for recording a payment.
#[derive(Debug, Clone)]
pub struct PaymentInput {
    /// Date the payment was received.
    pub payment_date: NaiveDate,
    /// Amount paid.
    pub amount: Decimal,
    /// How the payment was made.
    pub method: PaymentMethod,
    /// External reference (check number, transaction id).
    pub reference_number: Option<String>,
    /// Free-form notes.
    pub notes: Option<String>,
}
