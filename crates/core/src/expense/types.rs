//! Expense domain types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sidegig_shared::types::{ExpenseId, TemplateId, UserId};

use crate::category::CanonicalCategory;

/// A concrete, dated expense record.
///
/// Expenses are either entered directly or materialized from a recurring
/// template ("quick add"), in which case `recurring_expense_id` carries the
/// back-reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier.
    pub id: ExpenseId,
    /// Owning user account.
    pub user_id: UserId,
    /// Date the expense was paid (cash basis).
    pub date: NaiveDate,
    /// Canonical category.
    pub category: CanonicalCategory,
    /// Description.
    pub description: String,
    /// Amount paid.
    pub amount: Decimal,
    /// Vendor, if recorded.
    pub vendor: Option<String>,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Template this expense was materialized from, if any.
    pub recurring_expense_id: Option<TemplateId>,
    /// Deductible fraction override for meals (0.5 when the category is
    /// meals, unset otherwise). Display/export concern only.
    pub meals_percent_allowed: Option<Decimal>,
}

impl Expense {
    /// Creates a new manually-entered expense.
    ///
    /// `meals_percent_allowed` is stamped from the category.
    #[must_use]
    pub fn new(
        user_id: UserId,
        date: NaiveDate,
        category: CanonicalCategory,
        description: impl Into<String>,
        amount: Decimal,
    ) -> Self {
        Self {
            id: ExpenseId::new(),
            user_id,
            date,
            category,
            description: description.into(),
            amount,
            vendor: None,
            notes: None,
            recurring_expense_id: None,
            meals_percent_allowed: meals_percent_for(category),
        }
    }
}

/// Returns the meals deductible fraction for a category, if it applies.
#[must_use]
pub fn meals_percent_for(category: CanonicalCategory) -> Option<Decimal> {
    category
        .is_meals()
        .then_some(crate::category::MEALS_DEDUCTIBLE_PERCENT)
}
