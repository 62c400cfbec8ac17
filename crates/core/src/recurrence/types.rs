//! Recurring expense template types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sidegig_shared::types::{TemplateId, UserId};

use crate::category::CanonicalCategory;

/// How often a recurring expense comes due.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    /// Every week, on `day_of_week`.
    Weekly,
    /// Every month, on `day_of_month`.
    Monthly,
    /// Every year, on `month_of_year`/`day_of_month`.
    Yearly,
}

impl Frequency {
    /// Static name for error messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Weekly => "Weekly",
            Self::Monthly => "Monthly",
            Self::Yearly => "Yearly",
        }
    }
}

/// A recurring expense template.
///
/// `next_due_date` is recomputed whenever frequency or anchor fields change,
/// and advances when the template is materialized into a concrete expense.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecurringExpenseTemplate {
    /// Unique identifier.
    pub id: TemplateId,
    /// Owning user account.
    pub user_id: UserId,
    /// Template name, used as the materialized expense's description.
    pub name: String,
    /// Canonical category for materialized expenses.
    pub category: CanonicalCategory,
    /// Expense amount per occurrence.
    pub amount: Decimal,
    /// Vendor, if recorded.
    pub vendor: Option<String>,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Recurrence frequency.
    pub frequency: Frequency,
    /// Day of week anchor (0-6, Sunday=0). Required iff weekly.
    pub day_of_week: Option<u8>,
    /// Day of month anchor (1-31). Required iff monthly or yearly.
    pub day_of_month: Option<u8>,
    /// Month of year anchor (1-12). Required iff yearly.
    pub month_of_year: Option<u8>,
    /// Next date this template comes due.
    pub next_due_date: NaiveDate,
    /// Whether the template is active. Inactive templates are never
    /// materialized.
    pub is_active: bool,
}

/// Input for creating a recurring expense template.
#[derive(Debug, Clone)]
pub struct CreateTemplateInput {
    /// Owning user account.
    pub user_id: UserId,
    /// Template name.
    pub name: String,
    /// Canonical category.
    pub category: CanonicalCategory,
    /// Expense amount per occurrence.
    pub amount: Decimal,
    /// Vendor, if recorded.
    pub vendor: Option<String>,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Recurrence frequency.
    pub frequency: Frequency,
    /// Day of week anchor (0-6, Sunday=0).
    pub day_of_week: Option<u8>,
    /// Day of month anchor (1-31).
    pub day_of_month: Option<u8>,
    /// Month of year anchor (1-12).
    pub month_of_year: Option<u8>,
}

/// Partial update to a recurring expense template.
///
/// `None` fields are left unchanged. Anchor fields use a double `Option`:
/// the outer level is "was this field present in the update", the inner
/// level is the new value (so an anchor can be explicitly cleared when the
/// frequency changes).
#[derive(Debug, Clone, Default)]
pub struct TemplateUpdate {
    /// New name.
    pub name: Option<String>,
    /// New category.
    pub category: Option<CanonicalCategory>,
    /// New amount.
    pub amount: Option<Decimal>,
    /// New vendor.
    pub vendor: Option<Option<String>>,
    /// New notes.
    pub notes: Option<Option<String>>,
    /// New frequency.
    pub frequency: Option<Frequency>,
    /// New day-of-week anchor.
    pub day_of_week: Option<Option<u8>>,
    /// New day-of-month anchor.
    pub day_of_month: Option<Option<u8>>,
    /// New month-of-year anchor.
    pub month_of_year: Option<Option<u8>>,
    /// New active flag.
    pub is_active: Option<bool>,
}

impl TemplateUpdate {
    /// Returns true if the update touches the frequency or any anchor
    /// field, requiring a `next_due_date` recompute.
    #[must_use]
    pub const fn touches_schedule(&self) -> bool {
        self.frequency.is_some()
            || self.day_of_week.is_some()
            || self.day_of_month.is_some()
            || self.month_of_year.is_some()
    }
}
