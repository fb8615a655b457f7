//! Running spend totals for progress bars.
//!
//! Each transaction is shown with the total spent in its category up to and
//! including itself, walking from the newest transaction to the oldest.

use std::collections::HashMap;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::constants::{DISPLAY_DECIMAL_PRECISION, MAX_USAGE_PERCENT};
use crate::transactions::Transaction;

/// Groups transactions by category and orders each group newest first.
///
/// Groups appear in order of first occurrence; ties on date keep input order.
fn group_newest_first(transactions: &[Transaction]) -> Vec<(&str, Vec<&Transaction>)> {
    let mut groups: Vec<(&str, Vec<&Transaction>)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for transaction in transactions {
        let category = transaction.effective_category();
        let slot = *index.entry(category).or_insert_with(|| {
            groups.push((category, Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(transaction);
    }

    for (_, group) in groups.iter_mut() {
        // sort_by is stable
        group.sort_by(|a, b| b.date.cmp(&a.date));
    }
    groups
}

/// One category's transactions, newest first, each with the running spend at that point.
pub(crate) struct CategoryRun<'a> {
    pub category: &'a str,
    pub entries: Vec<(&'a Transaction, Decimal)>,
}

impl CategoryRun<'_> {
    /// Total spend of the category, carried by its oldest transaction.
    pub fn total(&self) -> Decimal {
        self.entries
            .last()
            .map(|(_, cumulative)| *cumulative)
            .unwrap_or(Decimal::ZERO)
    }
}

/// Walks each category newest to oldest, accumulating spend.
///
/// Sums saturate at `Decimal::MAX`.
pub(crate) fn cumulative_runs(transactions: &[Transaction]) -> Vec<CategoryRun<'_>> {
    group_newest_first(transactions)
        .into_iter()
        .map(|(category, group)| {
            let mut running = Decimal::ZERO;
            let entries = group
                .into_iter()
                .map(|transaction| {
                    running = running.saturating_add(transaction.amount);
                    (transaction, running)
                })
                .collect();
            CategoryRun { category, entries }
        })
        .collect()
}

/// Maps each transaction id to the cumulative spend of its category at that transaction.
pub fn attribute_cumulative_spend(transactions: &[Transaction]) -> HashMap<String, Decimal> {
    cumulative_runs(transactions)
        .into_iter()
        .flat_map(|run| run.entries)
        .map(|(transaction, cumulative)| (transaction.id.clone(), cumulative))
        .collect()
}

/// Share of `limit` consumed by `cumulative`, capped at 100 and rounded for display.
///
/// A non-positive limit yields 0.
pub fn budget_usage_percent(cumulative: Decimal, limit: Decimal) -> Decimal {
    if limit <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    let cap = Decimal::from(MAX_USAGE_PERCENT);
    let percent = cumulative
        .checked_div(limit)
        .and_then(|ratio| ratio.checked_mul(cap))
        .unwrap_or(cap);
    percent
        .min(cap)
        .round_dp_with_strategy(DISPLAY_DECIMAL_PRECISION, RoundingStrategy::MidpointAwayFromZero)
}
