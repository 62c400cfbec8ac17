//! Canonical category enumeration.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Deductible fraction for meals expenses (IRS: 50%).
pub const MEALS_DEDUCTIBLE_PERCENT: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

/// Fixed enumeration of gig-work expense categories.
///
/// Each category carries its Schedule C association (see
/// `taxexport::schedule_c`). Free-form labels are normalized to these values
/// before storage or aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalCategory {
    /// Advertising and marketing.
    Advertising,
    /// Vehicle expenses (gas, fuel, parking).
    CarTruck,
    /// Commissions and fees.
    CommissionsFees,
    /// Platform fees charged by gig marketplaces.
    PlatformFees,
    /// Contract labor / subcontractors.
    ContractLabor,
    /// Cost of goods sold (inventory, materials resold).
    CostOfGoods,
    /// Business insurance.
    Insurance,
    /// Legal and professional services.
    LegalProfessional,
    /// Office expense.
    OfficeExpense,
    /// Rent or lease of property and equipment.
    RentLease,
    /// Repairs and maintenance.
    Repairs,
    /// Supplies consumed in the business.
    Supplies,
    /// Small tools and equipment.
    Equipment,
    /// Taxes and licenses.
    TaxesLicenses,
    /// Business travel (lodging, transportation).
    Travel,
    /// Business meals (50% deductible).
    Meals,
    /// Utilities, phone, and internet.
    Utilities,
    /// Bank and payment-processing charges.
    BankFees,
    /// Software and subscriptions.
    Software,
    /// Anything that fits nowhere else.
    Other,
}

impl CanonicalCategory {
    /// All canonical categories, in display order.
    pub const ALL: [Self; 20] = [
        Self::Advertising,
        Self::CarTruck,
        Self::CommissionsFees,
        Self::PlatformFees,
        Self::ContractLabor,
        Self::CostOfGoods,
        Self::Insurance,
        Self::LegalProfessional,
        Self::OfficeExpense,
        Self::RentLease,
        Self::Repairs,
        Self::Supplies,
        Self::Equipment,
        Self::TaxesLicenses,
        Self::Travel,
        Self::Meals,
        Self::Utilities,
        Self::BankFees,
        Self::Software,
        Self::Other,
    ];

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Advertising => "Advertising",
            Self::CarTruck => "Car & Truck",
            Self::CommissionsFees => "Commissions & Fees",
            Self::PlatformFees => "Platform Fees",
            Self::ContractLabor => "Contract Labor",
            Self::CostOfGoods => "Cost of Goods Sold",
            Self::Insurance => "Insurance",
            Self::LegalProfessional => "Legal & Professional",
            Self::OfficeExpense => "Office Expense",
            Self::RentLease => "Rent & Lease",
            Self::Repairs => "Repairs & Maintenance",
            Self::Supplies => "Supplies",
            Self::Equipment => "Equipment",
            Self::TaxesLicenses => "Taxes & Licenses",
            Self::Travel => "Travel",
            Self::Meals => "Meals",
            Self::Utilities => "Phone & Utilities",
            Self::BankFees => "Bank Fees",
            Self::Software => "Software & Subscriptions",
            Self::Other => "Other",
        }
    }

    /// Returns true for the meals category, which is only partially
    /// deductible.
    #[must_use]
    pub const fn is_meals(self) -> bool {
        matches!(self, Self::Meals)
    }

    /// Returns true for categories that roll into Cost of Goods Sold rather
    /// than a Part II expense line.
    #[must_use]
    pub const fn is_cost_of_goods(self) -> bool {
        matches!(self, Self::CostOfGoods)
    }

    /// Default deductible fraction for this category.
    ///
    /// A display/export concern only: stored expense amounts are never
    /// mutated by this percentage.
    #[must_use]
    pub fn deductible_percent(self) -> Decimal {
        if self.is_meals() {
            MEALS_DEDUCTIBLE_PERCENT
        } else {
            Decimal::ONE
        }
    }
}

impl std::fmt::Display for CanonicalCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
