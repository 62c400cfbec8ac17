//! Tax export error types.

use thiserror::Error;

/// Errors that can occur while building a tax export package.
///
/// Bad individual records never produce errors; they are coerced or
/// excluded with diagnostics. Errors here are input-shape violations.
#[derive(Debug, Error)]
pub enum TaxExportError {
    /// The requested tax year is not plausible.
    #[error("Invalid tax year: {0}")]
    InvalidTaxYear(i32),

    /// No standard mileage rate is configured for the requested year.
    #[error("No standard mileage rate configured for tax year {0}")]
    MissingMileageRate(i32),
}

impl TaxExportError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTaxYear(_) => "INVALID_TAX_YEAR",
            Self::MissingMileageRate(_) => "MISSING_MILEAGE_RATE",
        }
    }
}

impl From<TaxExportError> for sidegig_shared::AppError {
    fn from(err: TaxExportError) -> Self {
        match err {
            TaxExportError::InvalidTaxYear(_) => Self::Validation(err.to_string()),
            TaxExportError::MissingMileageRate(_) => Self::Configuration(err.to_string()),
        }
    }
}
