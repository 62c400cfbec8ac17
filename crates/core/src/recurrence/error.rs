//! Recurrence error types.

use sidegig_shared::types::TemplateId;
use thiserror::Error;

/// Errors that can occur during recurrence operations.
#[derive(Debug, Error)]
pub enum RecurrenceError {
    // ========== Validation Errors ==========
    /// Weekly templates require a day of week.
    #[error("Weekly frequency requires day_of_week")]
    MissingDayOfWeek,

    /// Day of week out of range.
    #[error("day_of_week must be 0-6 (Sunday=0), got {0}")]
    DayOfWeekOutOfRange(u8),

    /// Monthly and yearly templates require a day of month.
    #[error("{frequency} frequency requires day_of_month")]
    MissingDayOfMonth {
        /// The frequency that required the anchor.
        frequency: &'static str,
    },

    /// Day of month out of range.
    #[error("day_of_month must be 1-31, got {0}")]
    DayOfMonthOutOfRange(u8),

    /// Yearly templates require a month of year.
    #[error("Yearly frequency requires month_of_year")]
    MissingMonthOfYear,

    /// Month of year out of range.
    #[error("month_of_year must be 1-12, got {0}")]
    MonthOfYearOutOfRange(u8),

    /// Template amount cannot be negative.
    #[error("Template amount cannot be negative")]
    NegativeAmount,

    /// Template name cannot be empty.
    #[error("Template name cannot be empty")]
    EmptyName,

    // ========== Reference Errors ==========
    /// Template not found.
    #[error("Recurring template not found: {0}")]
    TemplateNotFound(TemplateId),

    // ========== State Errors ==========
    /// Inactive templates cannot be materialized.
    #[error("Recurring template {0} is inactive")]
    TemplateInactive(TemplateId),
}

impl RecurrenceError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::MissingDayOfWeek => "MISSING_DAY_OF_WEEK",
            Self::DayOfWeekOutOfRange(_) => "DAY_OF_WEEK_OUT_OF_RANGE",
            Self::MissingDayOfMonth { .. } => "MISSING_DAY_OF_MONTH",
            Self::DayOfMonthOutOfRange(_) => "DAY_OF_MONTH_OUT_OF_RANGE",
            Self::MissingMonthOfYear => "MISSING_MONTH_OF_YEAR",
            Self::MonthOfYearOutOfRange(_) => "MONTH_OF_YEAR_OUT_OF_RANGE",
            Self::NegativeAmount => "NEGATIVE_AMOUNT",
            Self::EmptyName => "EMPTY_NAME",
            Self::TemplateNotFound(_) => "TEMPLATE_NOT_FOUND",
            Self::TemplateInactive(_) => "TEMPLATE_INACTIVE",
        }
    }

    /// Returns true if this is a validation error (bad input) as opposed to
    /// a stale reference.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        !matches!(self, Self::TemplateNotFound(_))
    }
}

impl From<RecurrenceError> for sidegig_shared::AppError {
    fn from(err: RecurrenceError) -> Self {
        match err {
            RecurrenceError::TemplateNotFound(_) => Self::NotFound(err.to_string()),
            RecurrenceError::TemplateInactive(_) => Self::BusinessRule(err.to_string()),
            _ => Self::Validation(err.to_string()),
        }
    }
}
