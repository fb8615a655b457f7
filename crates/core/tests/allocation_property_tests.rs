//! Property-based integration tests for budget allocation and spend attribution.
//!
//! These tests verify that universal properties hold across all valid inputs,
//! using the `proptest` crate for random test case generation.

use budgetwise_core::budgets::{check_allocation, Budget, BudgetError};
use budgetwise_core::spending::{attribute_cumulative_spend, budget_usage_percent};
use budgetwise_core::transactions::{Transaction, TransactionType};
use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::collections::HashMap;

// =============================================================================
// Generators
// =============================================================================

/// Generates a category from a small pool so upserts frequently edit.
fn arb_category() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Rent".to_string()),
        Just("Food".to_string()),
        Just("Travel".to_string()),
        Just("Health".to_string()),
        Just("Fun".to_string()),
    ]
}

/// Generates a positive amount with two decimal places.
fn arb_amount(max_cents: i64) -> impl Strategy<Value = Decimal> {
    (1i64..=max_cents).prop_map(|cents| Decimal::new(cents, 2))
}

fn arb_upserts(max_count: usize) -> impl Strategy<Value = Vec<(String, Decimal)>> {
    proptest::collection::vec((arb_category(), arb_amount(1_000_000)), 0..=max_count)
}

fn arb_expense() -> impl Strategy<Value = (Option<String>, Decimal, u32)> {
    (
        proptest::option::of(arb_category()),
        arb_amount(100_000),
        1u32..=28,
    )
}

// =============================================================================
// Helpers
// =============================================================================

/// Applies an upsert to an in-memory budget set when the allocation check passes.
fn apply_upsert(
    budgets: &mut Vec<Budget>,
    income: Decimal,
    category: &str,
    limit: Decimal,
) -> Result<(), BudgetError> {
    let editing = budgets.iter().position(|b| b.category == category);
    let editing_id = editing.map(|i| budgets[i].id.clone());
    check_allocation(income, budgets, editing_id.as_deref(), limit)?;

    match editing {
        Some(i) => budgets[i].limit = limit,
        None => budgets.push(Budget {
            id: format!("b{}", budgets.len()),
            user_id: "u1".to_string(),
            category: category.to_string(),
            limit,
            created_at: None,
            updated_at: None,
        }),
    }
    Ok(())
}

fn total(budgets: &[Budget]) -> Decimal {
    budgets.iter().map(|b| b.limit).sum()
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// The sum of limits never exceeds income after any sequence of upserts.
    #[test]
    fn prop_total_never_exceeds_income(
        income in arb_amount(2_000_000),
        upserts in arb_upserts(30)
    ) {
        let mut budgets = Vec::new();
        for (category, limit) in upserts {
            let _ = apply_upsert(&mut budgets, income, &category, limit);
            prop_assert!(total(&budgets) <= income);
        }
    }

    /// A rejected upsert reports exactly the headroom that would have fit.
    #[test]
    fn prop_rejection_reports_fitting_headroom(
        income in arb_amount(2_000_000),
        upserts in arb_upserts(30)
    ) {
        let mut budgets = Vec::new();
        for (category, limit) in upserts {
            if let Err(err) = apply_upsert(&mut budgets, income, &category, limit) {
                let available = err.available().unwrap();
                prop_assert!(limit > available);
                prop_assert_eq!(err.monthly_income(), Some(income));
                if available > Decimal::ZERO {
                    prop_assert!(apply_upsert(&mut budgets, income, &category, available).is_ok());
                }
            }
        }
    }

    /// Re-submitting the current limit of a category always succeeds.
    #[test]
    fn prop_same_limit_upsert_is_idempotent(
        income in arb_amount(2_000_000),
        upserts in arb_upserts(20)
    ) {
        let mut budgets = Vec::new();
        for (category, limit) in upserts {
            let _ = apply_upsert(&mut budgets, income, &category, limit);
        }
        let snapshot = budgets.clone();
        for budget in &snapshot {
            prop_assert!(apply_upsert(&mut budgets, income, &budget.category, budget.limit).is_ok());
        }
        prop_assert_eq!(budgets, snapshot);
    }

    /// The oldest transaction of each category carries the category's full spend.
    #[test]
    fn prop_oldest_cumulative_equals_category_total(
        expenses in proptest::collection::vec(arb_expense(), 0..40)
    ) {
        let transactions: Vec<Transaction> = expenses
            .into_iter()
            .enumerate()
            .map(|(i, (category, amount, day))| Transaction {
                id: format!("t{i}"),
                user_id: "u1".to_string(),
                amount,
                transaction_type: TransactionType::Expense,
                category,
                date: NaiveDate::from_ymd_opt(2025, 3, day).unwrap(),
            })
            .collect();

        let cumulative = attribute_cumulative_spend(&transactions);
        prop_assert_eq!(cumulative.len(), transactions.len());

        let mut totals: HashMap<&str, Decimal> = HashMap::new();
        for t in &transactions {
            *totals.entry(t.effective_category()).or_default() += t.amount;
        }
        for (category, category_total) in totals {
            let max = transactions
                .iter()
                .filter(|t| t.effective_category() == category)
                .map(|t| cumulative[&t.id])
                .max()
                .unwrap();
            prop_assert_eq!(max, category_total);
        }
    }

    /// Usage percent stays within [0, 100].
    #[test]
    fn prop_usage_percent_is_bounded(
        spent in arb_amount(10_000_000),
        limit in arb_amount(10_000_000)
    ) {
        let percent = budget_usage_percent(spent, limit);
        prop_assert!(percent >= Decimal::ZERO);
        prop_assert!(percent <= Decimal::from(100));
    }
}
