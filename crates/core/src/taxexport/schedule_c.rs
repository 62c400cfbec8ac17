//! Schedule C line associations.

use crate::category::CanonicalCategory;

/// The catch-all "other expenses" line.
pub const OTHER_EXPENSES_REF: &str = "27a";

/// Schedule C Part II line order, for summary emission.
pub const LINE_ORDER: [&str; 15] = [
    "8", "9", "10", "11", "15", "17", "18", "20b", "21", "22", "23", "24a", "24b", "25", "27a",
];

/// Maps a canonical category to its Schedule C Part II line reference.
///
/// Total over the enumeration: a category without a line is a compile
/// error, not a runtime gap. `CostOfGoods` is special-cased by the builder
/// (it feeds line 4, not Part II) but still carries a reference for its
/// detail rows.
#[must_use]
pub const fn reference_for(category: CanonicalCategory) -> &'static str {
    use CanonicalCategory as C;

    match category {
        C::Advertising => "8",
        C::CarTruck => "9",
        C::CommissionsFees | C::PlatformFees => "10",
        C::ContractLabor => "11",
        C::CostOfGoods => "4",
        C::Insurance => "15",
        C::LegalProfessional => "17",
        C::OfficeExpense => "18",
        C::RentLease => "20b",
        C::Repairs => "21",
        C::Supplies | C::Equipment => "22",
        C::TaxesLicenses => "23",
        C::Travel => "24a",
        C::Meals => "24b",
        C::Utilities => "25",
        C::BankFees | C::Software | C::Other => OTHER_EXPENSES_REF,
    }
}

/// Returns true if the category rolls into the line 27a catch-all.
#[must_use]
pub fn rolls_into_other(category: CanonicalCategory) -> bool {
    !category.is_cost_of_goods()
        && reference_for(category) == OTHER_EXPENSES_REF
}

/// Human-readable label for a Part II line reference.
///
/// Only references produced by `reference_for` are valid; anything else is
/// a programming-invariant violation and fails loudly rather than labeling
/// a total wrong.
#[must_use]
pub fn line_label(reference: &str) -> &'static str {
    match reference {
        "8" => "Advertising",
        "9" => "Car and truck expenses",
        "10" => "Commissions and fees",
        "11" => "Contract labor",
        "15" => "Insurance",
        "17" => "Legal and professional services",
        "18" => "Office expense",
        "20b" => "Rent or lease (other business property)",
        "21" => "Repairs and maintenance",
        "22" => "Supplies",
        "23" => "Taxes and licenses",
        "24a" => "Travel",
        "24b" => "Deductible meals",
        "25" => "Utilities",
        "27a" => "Other expenses",
        _ => unreachable!("unknown Schedule C line reference: {reference}"),
    }
}
