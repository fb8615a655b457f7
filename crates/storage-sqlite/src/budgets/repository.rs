use std::convert::TryFrom;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::debug;
use rust_decimal::Decimal;
use uuid::Uuid;

use budgetwise_core::budgets::{
    check_allocation, Budget, BudgetRepositoryTrait, BudgetUpsertResult, NewBudget,
};
use budgetwise_core::utils::to_iso_string;
use budgetwise_core::Result;

use super::model::{into_budgets, BudgetDB, NewBudgetDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::budgets;

pub struct BudgetRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl BudgetRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        BudgetRepository { pool, writer }
    }
}

fn load_user_budgets(conn: &mut SqliteConnection, user_id: &str) -> Result<Vec<Budget>> {
    let rows = budgets::table
        .filter(budgets::user_id.eq(user_id))
        .order(budgets::created_at.asc())
        .select(BudgetDB::as_select())
        .load::<BudgetDB>(conn)
        .map_err(StorageError::from)?;
    Ok(into_budgets(rows)?)
}

/// Re-checks the allocation against the budgets as they are now and writes.
/// Runs inside the writer's transaction.
fn upsert_in_transaction(
    conn: &mut SqliteConnection,
    new_budget: NewBudget,
    monthly_income: Decimal,
) -> Result<BudgetUpsertResult> {
    let current = load_user_budgets(conn, &new_budget.user_id)?;
    let existing = current.iter().find(|b| b.category == new_budget.category);

    check_allocation(
        monthly_income,
        &current,
        existing.map(|b| b.id.as_str()),
        new_budget.limit,
    )?;

    let now = to_iso_string(&Utc::now());
    let (budget_id, created) = match existing {
        Some(existing) => {
            diesel::update(budgets::table.find(&existing.id))
                .set((
                    budgets::limit_amount.eq(new_budget.limit.to_string()),
                    budgets::updated_at.eq(&now),
                ))
                .execute(conn)
                .map_err(StorageError::from)?;
            (existing.id.clone(), false)
        }
        None => {
            let row = NewBudgetDB {
                id: Uuid::new_v4().to_string(),
                user_id: new_budget.user_id,
                category: new_budget.category,
                limit_amount: new_budget.limit.to_string(),
                created_at: now.clone(),
                updated_at: now,
            };
            diesel::insert_into(budgets::table)
                .values(&row)
                .execute(conn)
                .map_err(StorageError::from)?;
            (row.id, true)
        }
    };

    let stored = budgets::table
        .find(&budget_id)
        .select(BudgetDB::as_select())
        .first::<BudgetDB>(conn)
        .map_err(StorageError::from)?;
    let budget = Budget::try_from(stored)?;
    Ok(BudgetUpsertResult { budget, created })
}

#[async_trait]
impl BudgetRepositoryTrait for BudgetRepository {
    fn list_by_user(&self, user_id: &str) -> Result<Vec<Budget>> {
        let mut conn = get_connection(&self.pool)?;
        load_user_budgets(&mut conn, user_id)
    }

    fn find_by_category(&self, user_id: &str, category: &str) -> Result<Option<Budget>> {
        let mut conn = get_connection(&self.pool)?;
        let row = budgets::table
            .filter(budgets::user_id.eq(user_id))
            .filter(budgets::category.eq(category))
            .select(BudgetDB::as_select())
            .first::<BudgetDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(row.map(Budget::try_from).transpose()?)
    }

    async fn upsert_within_income(
        &self,
        new_budget: NewBudget,
        monthly_income: Decimal,
    ) -> Result<BudgetUpsertResult> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| {
                upsert_in_transaction(conn, new_budget, monthly_income)
            })
            .await
    }

    async fn delete_by_id(&self, budget_id: &str) -> Result<usize> {
        let budget_id = budget_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let deleted = diesel::delete(budgets::table.find(&budget_id))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                debug!("Deleted {} budget(s) with id {}", deleted, budget_id);
                Ok(deleted)
            })
            .await
    }

    async fn delete_by_category(&self, user_id: &str, category: &str) -> Result<usize> {
        let user_id = user_id.to_string();
        let category = category.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(
                    budgets::table
                        .filter(budgets::user_id.eq(&user_id))
                        .filter(budgets::category.eq(&category)),
                )
                .execute(conn)
                .map_err(StorageError::from)?)
            })
            .await
    }
}
