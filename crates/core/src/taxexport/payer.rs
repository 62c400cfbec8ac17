//! Per-payer income rollups for 1099 reconciliation.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use sidegig_shared::types::PayerId;

use super::types::{IncomeKind, IncomeRow, PayerRecord, PayerSummaryRow};

/// Grouping key: the payer reference when the store has one, otherwise the
/// normalized name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum PayerKey {
    Id(uuid::Uuid),
    Name(String),
}

fn key_for(payer_id: Option<PayerId>, name: &str) -> PayerKey {
    payer_id.map_or_else(
        || PayerKey::Name(name.trim().to_lowercase()),
        |id| PayerKey::Id(id.into_inner()),
    )
}

/// Groups gig payments by payer and sums gross/fees/net.
///
/// Only `IncomeKind::Gig` rows count: the rollup reconciles against 1099
/// totals, which report payments received. Known payers contribute their
/// 1099 expectation; unknown payers default to false. Rows come back
/// sorted by payer name for deterministic output.
#[must_use]
pub fn roll_payers(income_rows: &[IncomeRow], payers: &[PayerRecord]) -> Vec<PayerSummaryRow> {
    let expectations: BTreeMap<PayerKey, &PayerRecord> = payers
        .iter()
        .map(|p| (key_for(p.id, &p.name), p))
        .collect();

    let mut groups: BTreeMap<PayerKey, PayerSummaryRow> = BTreeMap::new();

    for row in income_rows {
        if row.kind != IncomeKind::Gig {
            continue;
        }

        let key = key_for(row.payer_id, &row.payer_name);
        let entry = groups.entry(key.clone()).or_insert_with(|| {
            let known = expectations.get(&key);
            PayerSummaryRow {
                payer_id: row.payer_id.or_else(|| known.and_then(|p| p.id)),
                name: known.map_or_else(|| row.payer_name.clone(), |p| p.name.clone()),
                expects_1099: known.is_some_and(|p| p.expects_1099),
                payment_count: 0,
                gross: Decimal::ZERO,
                fees: Decimal::ZERO,
                net: Decimal::ZERO,
                first_payment: row.date,
                last_payment: row.date,
            }
        });

        entry.payment_count += 1;
        entry.gross += row.gross_amount;
        entry.fees += row.fees;
        entry.net += row.net_amount;
        entry.first_payment = entry.first_payment.min(row.date);
        entry.last_payment = entry.last_payment.max(row.date);
    }

    let mut rows: Vec<PayerSummaryRow> = groups.into_values().collect();
    rows.sort_by(|a, b| a.name.cmp(&b.name));
    rows
}
