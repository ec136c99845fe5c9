//! Pure aggregation over an investor's participation records.
use crate::core::model::{Investment, ParticipationRecord, RecordStatus};
use rust_decimal::Decimal;
use std::collections::HashSet;

/// Investor-facing totals over a set of participation records.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LedgerSummary {
    pub total_projects: usize,
    pub total_invested: Decimal,
    pub total_due: Decimal,
    pub total_paid: Decimal,
}

/// An investor's percentage of an investment's required capital.
///
/// `NotApplicable` is an explicit sentinel: a missing investment or an
/// absent/zero `amount_required` must never display as "0% owned".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Share {
    Of(Decimal),
    NotApplicable,
}

impl std::fmt::Display for Share {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Share::Of(pct) => write!(f, "{pct:.2}%"),
            Share::NotApplicable => write!(f, "N/A"),
        }
    }
}

/// Sums an investor's ledger. Deterministic under any input ordering; the
/// empty set yields an all-zero summary.
pub fn summarize(records: &[ParticipationRecord]) -> LedgerSummary {
    let mut summary = LedgerSummary {
        total_projects: records.len(),
        ..LedgerSummary::default()
    };
    for record in records {
        summary.total_invested += record.amount;
        summary.total_due += record.total_due;
        summary.total_paid += record.total_paid;
    }
    summary
}

/// Percentage of `investment_id`'s required capital that `amount` buys,
/// rounded to two decimal places.
pub fn share_of(amount: Decimal, investment_id: &str, investments: &[Investment]) -> Share {
    let amount_required = investments
        .iter()
        .find(|inv| inv.id == investment_id)
        .and_then(|inv| inv.amount_required);

    match amount_required {
        Some(required) if !required.is_zero() => {
            Share::Of((Decimal::ONE_HUNDRED * amount / required).round_dp(2))
        }
        _ => Share::NotApplicable,
    }
}

/// Investments open to `investor_id`: desired status, and not already held.
/// Duplicate participation records never resurrect an offer.
pub fn filter_open_offers(
    all_investments: &[Investment],
    participations: &[ParticipationRecord],
    investor_id: &str,
    desired_status: RecordStatus,
) -> Vec<Investment> {
    let held: HashSet<&str> = participations
        .iter()
        .filter(|p| p.investor_id == investor_id)
        .map(|p| p.investment.id.as_str())
        .collect();

    all_investments
        .iter()
        .filter(|inv| inv.status == desired_status && !held.contains(inv.id.as_str()))
        .cloned()
        .collect()
}
