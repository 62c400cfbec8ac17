//! Free-form label to canonical category mapping.

use std::collections::HashMap;

use super::types::CanonicalCategory;

/// Immutable lookup table from normalized labels to canonical categories.
///
/// The table is injected wherever coercion happens (ledger boundaries, the
/// tax aggregator) so tests can substitute fixtures. `Default` builds the
/// builtin table, which treats legacy synonyms (short labels and their
/// long-form equivalents) as identical.
#[derive(Debug, Clone)]
pub struct CategoryMap {
    entries: HashMap<String, CanonicalCategory>,
}

impl CategoryMap {
    /// Builds a map from explicit label/category pairs.
    ///
    /// Labels are normalized on insertion, so `"Gas"`, `"gas"`, and
    /// `" gas "` are the same key.
    #[must_use]
    pub fn with_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, CanonicalCategory)>,
        S: AsRef<str>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(label, category)| (normalize(label.as_ref()), category))
                .collect(),
        }
    }

    /// Looks up a label without coercion.
    ///
    /// Returns `None` for unrecognized labels; callers that need to count
    /// coercions (the tax aggregator) use this, everything else goes through
    /// `to_canonical`.
    #[must_use]
    pub fn lookup(&self, label: &str) -> Option<CanonicalCategory> {
        self.entries.get(&normalize(label)).copied()
    }

    /// Canonicalizes a free-form label. Total: never fails.
    ///
    /// Unrecognized input maps to `CanonicalCategory::Other` with a warning.
    #[must_use]
    pub fn to_canonical(&self, label: &str) -> CanonicalCategory {
        self.lookup(label).unwrap_or_else(|| {
            tracing::warn!(label, "unrecognized expense category, coercing to Other");
            CanonicalCategory::Other
        })
    }
}

impl Default for CategoryMap {
    fn default() -> Self {
        use CanonicalCategory as C;

        Self::with_entries([
            // Canonical labels map to themselves.
            ("advertising", C::Advertising),
            ("car & truck", C::CarTruck),
            ("commissions & fees", C::CommissionsFees),
            ("platform fees", C::PlatformFees),
            ("contract labor", C::ContractLabor),
            ("cost of goods sold", C::CostOfGoods),
            ("insurance", C::Insurance),
            ("legal & professional", C::LegalProfessional),
            ("office expense", C::OfficeExpense),
            ("rent & lease", C::RentLease),
            ("repairs & maintenance", C::Repairs),
            ("supplies", C::Supplies),
            ("equipment", C::Equipment),
            ("taxes & licenses", C::TaxesLicenses),
            ("travel", C::Travel),
            ("meals", C::Meals),
            ("phone & utilities", C::Utilities),
            ("bank fees", C::BankFees),
            ("software & subscriptions", C::Software),
            ("other", C::Other),
            // Legacy synonyms from historical imports.
            ("ads", C::Advertising),
            ("marketing", C::Advertising),
            ("gas", C::CarTruck),
            ("gas & fuel", C::CarTruck),
            ("fuel", C::CarTruck),
            ("car", C::CarTruck),
            ("vehicle", C::CarTruck),
            ("parking", C::CarTruck),
            ("tolls", C::CarTruck),
            ("commissions", C::CommissionsFees),
            ("fees", C::CommissionsFees),
            ("platform fee", C::PlatformFees),
            ("app fees", C::PlatformFees),
            ("subcontractor", C::ContractLabor),
            ("cogs", C::CostOfGoods),
            ("inventory", C::CostOfGoods),
            ("legal", C::LegalProfessional),
            ("accounting", C::LegalProfessional),
            ("professional services", C::LegalProfessional),
            ("office", C::OfficeExpense),
            ("office supplies", C::OfficeExpense),
            ("rent", C::RentLease),
            ("lease", C::RentLease),
            ("repairs", C::Repairs),
            ("maintenance", C::Repairs),
            ("tools", C::Equipment),
            ("licenses", C::TaxesLicenses),
            ("license", C::TaxesLicenses),
            ("taxes", C::TaxesLicenses),
            ("lodging", C::Travel),
            ("meal", C::Meals),
            ("food", C::Meals),
            ("meals & entertainment", C::Meals),
            ("phone", C::Utilities),
            ("phone & internet", C::Utilities),
            ("internet", C::Utilities),
            ("cell phone", C::Utilities),
            ("utilities", C::Utilities),
            ("bank charges", C::BankFees),
            ("processing fees", C::BankFees),
            ("software", C::Software),
            ("subscriptions", C::Software),
            ("misc", C::Other),
            ("miscellaneous", C::Other),
        ])
    }
}

/// Normalizes a label for lookup: trimmed, lowercased, inner whitespace
/// collapsed.
fn normalize(label: &str) -> String {
    label
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
