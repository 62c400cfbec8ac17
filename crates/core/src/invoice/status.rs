//! The invoice status state machine.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::types::{InvoiceStatus, InvoiceTotals};

/// Whether an explicit transition between two statuses is permitted.
///
/// - `Draft` may move to any state.
/// - `Sent`/`Viewed`/`PartiallyPaid`/`Overdue` move forward or cancel.
/// - `Paid` and `Cancelled` accept no explicit transitions (a paid invoice
///   only changes through payment deletion, which is a recompute, not a
///   transition).
/// - A transition to the current status is always permitted (idempotent
///   re-send).
#[must_use]
pub fn can_transition(from: InvoiceStatus, to: InvoiceStatus) -> bool {
    use InvoiceStatus as S;

    if from == to {
        return true;
    }

    match from {
        S::Draft => true,
        S::Sent => matches!(
            to,
            S::Viewed | S::PartiallyPaid | S::Paid | S::Overdue | S::Cancelled
        ),
        S::Viewed => matches!(to, S::PartiallyPaid | S::Paid | S::Overdue | S::Cancelled),
        S::PartiallyPaid => matches!(to, S::Paid | S::Overdue | S::Cancelled),
        S::Overdue => matches!(to, S::PartiallyPaid | S::Paid | S::Cancelled),
        S::Paid | S::Cancelled => false,
    }
}

/// Derives the status implied by payments and the due date.
///
/// This is the single derivation point used after recording a payment,
/// deleting a payment, and by the overdue sweep. `today` is an explicit
/// parameter; nothing here reads a wall clock.
///
/// Precedence:
/// 1. `Cancelled` stays cancelled.
/// 2. Balance due <= 0 with at least one payment -> `Paid`.
/// 3. Past-due with a balance remaining -> `Overdue`.
/// 4. Partially covered -> `PartiallyPaid`.
/// 5. Otherwise the current status stands, except that a stale derived
///    status (e.g. `Paid` after its payment was deleted) falls back to
///    `Sent` when the invoice was ever sent, else `Draft`.
#[must_use]
pub fn derive_status(
    current: InvoiceStatus,
    totals: &InvoiceTotals,
    total_paid: Decimal,
    due_date: NaiveDate,
    today: NaiveDate,
    was_sent: bool,
) -> InvoiceStatus {
    use InvoiceStatus as S;

    if current == S::Cancelled {
        return S::Cancelled;
    }

    let balance_due = totals.total_amount - total_paid;

    if total_paid > Decimal::ZERO && balance_due <= Decimal::ZERO {
        return S::Paid;
    }
    if due_date < today && balance_due > Decimal::ZERO {
        return S::Overdue;
    }
    if total_paid > Decimal::ZERO {
        return S::PartiallyPaid;
    }

    match current {
        S::Draft | S::Sent | S::Viewed => current,
        // Derived status no longer applies (payment deleted, due date
        // moved): fall back to the last explicit state we can prove.
        _ => {
            if was_sent {
                S::Sent
            } else {
                S::Draft
            }
        }
    }
}
