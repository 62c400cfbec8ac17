//! Recurring template operations: create, update, quick-add.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sidegig_shared::types::{ExpenseId, TemplateId};

use super::error::RecurrenceError;
use super::schedule::next_due_date;
use super::types::{CreateTemplateInput, RecurringExpenseTemplate, TemplateUpdate};
use crate::expense::types::meals_percent_for;
use crate::expense::Expense;

/// Result of materializing a template ("quick add").
#[derive(Debug, Clone)]
pub struct MaterializeOutcome {
    /// The concrete expense produced from the template.
    pub expense: Expense,
    /// The template with its schedule advanced past the expense date.
    pub template: RecurringExpenseTemplate,
}

/// Recurring template service.
///
/// Pure functions over template snapshots; the caller persists results. An
/// update merges into a consistent snapshot of the stored template before
/// any recompute, so partial writes never interleave.
pub struct RecurrenceService;

impl RecurrenceService {
    /// Validates a new template and computes its initial `next_due_date`
    /// from `today`.
    ///
    /// # Errors
    ///
    /// Returns a field-level `RecurrenceError` before any state is produced.
    pub fn schedule_new(
        input: CreateTemplateInput,
        today: NaiveDate,
    ) -> Result<RecurringExpenseTemplate, RecurrenceError> {
        if input.name.trim().is_empty() {
            return Err(RecurrenceError::EmptyName);
        }
        if input.amount < Decimal::ZERO {
            return Err(RecurrenceError::NegativeAmount);
        }

        let next = next_due_date(
            input.frequency,
            input.day_of_week,
            input.day_of_month,
            input.month_of_year,
            today,
        )?;

        Ok(RecurringExpenseTemplate {
            id: TemplateId::new(),
            user_id: input.user_id,
            name: input.name,
            category: input.category,
            amount: input.amount,
            vendor: input.vendor,
            notes: input.notes,
            frequency: input.frequency,
            day_of_week: input.day_of_week,
            day_of_month: input.day_of_month,
            month_of_year: input.month_of_year,
            next_due_date: next,
            is_active: true,
        })
    }

    /// Applies a partial update to a template.
    ///
    /// Incoming changes are merged with the current stored field values;
    /// whenever the frequency or an anchor field is touched,
    /// `next_due_date` is recomputed from `today` using the merged
    /// snapshot. Updates that do not touch the schedule never move it.
    ///
    /// # Errors
    ///
    /// Returns a field-level `RecurrenceError`; the stored template is
    /// untouched on failure.
    pub fn apply_update(
        template: &RecurringExpenseTemplate,
        update: TemplateUpdate,
        today: NaiveDate,
    ) -> Result<RecurringExpenseTemplate, RecurrenceError> {
        let mut merged = template.clone();

        let touches_schedule = update.touches_schedule();

        if let Some(name) = update.name {
            if name.trim().is_empty() {
                return Err(RecurrenceError::EmptyName);
            }
            merged.name = name;
        }
        if let Some(category) = update.category {
            merged.category = category;
        }
        if let Some(amount) = update.amount {
            if amount < Decimal::ZERO {
                return Err(RecurrenceError::NegativeAmount);
            }
            merged.amount = amount;
        }
        if let Some(vendor) = update.vendor {
            merged.vendor = vendor;
        }
        if let Some(notes) = update.notes {
            merged.notes = notes;
        }
        if let Some(is_active) = update.is_active {
            merged.is_active = is_active;
        }

        if let Some(frequency) = update.frequency {
            merged.frequency = frequency;
        }
        if let Some(day_of_week) = update.day_of_week {
            merged.day_of_week = day_of_week;
        }
        if let Some(day_of_month) = update.day_of_month {
            merged.day_of_month = day_of_month;
        }
        if let Some(month_of_year) = update.month_of_year {
            merged.month_of_year = month_of_year;
        }

        if touches_schedule {
            merged.next_due_date = next_due_date(
                merged.frequency,
                merged.day_of_week,
                merged.day_of_month,
                merged.month_of_year,
                today,
            )?;
        }

        Ok(merged)
    }

    /// Materializes a template into a concrete expense ("quick add") and
    /// advances the template's schedule.
    ///
    /// The schedule advances relative to `expense_date`, not the current
    /// instant, so a back-dated quick-add advances correctly from that
    /// date.
    ///
    /// # Errors
    ///
    /// Returns `TemplateInactive` for inactive templates, or an anchor
    /// validation error if the stored template is malformed.
    pub fn materialize(
        template: &RecurringExpenseTemplate,
        expense_date: NaiveDate,
    ) -> Result<MaterializeOutcome, RecurrenceError> {
        if !template.is_active {
            return Err(RecurrenceError::TemplateInactive(template.id));
        }

        let next = next_due_date(
            template.frequency,
            template.day_of_week,
            template.day_of_month,
            template.month_of_year,
            expense_date,
        )?;

        let expense = Expense {
            id: ExpenseId::new(),
            user_id: template.user_id,
            date: expense_date,
            category: template.category,
            description: template.name.clone(),
            amount: template.amount,
            vendor: template.vendor.clone(),
            notes: template.notes.clone(),
            recurring_expense_id: Some(template.id),
            meals_percent_allowed: meals_percent_for(template.category),
        };

        let mut advanced = template.clone();
        advanced.next_due_date = next;

        Ok(MaterializeOutcome {
            expense,
            template: advanced,
        })
    }
}
