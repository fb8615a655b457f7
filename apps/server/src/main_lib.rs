use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;
use budgetwise_core::{
    budgets::{BudgetService, BudgetServiceTrait},
    income::{IncomeResolverTrait, IncomeService},
    spending::{SpendingService, SpendingServiceTrait},
};
use budgetwise_storage_sqlite::{
    budgets::BudgetRepository,
    db::{self, spawn_writer},
    transactions::TransactionRepository,
    users::UserRepository,
};

pub struct AppState {
    pub budget_service: Arc<dyn BudgetServiceTrait>,
    pub spending_service: Arc<dyn SpendingServiceTrait>,
}

pub fn init_tracing() {
    let log_format = std::env::var("BW_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

/// Opens the database, applies migrations, and wires repositories into services.
pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path, config.db_pool_size)?;
    db::run_migrations(&pool)?;
    let writer = spawn_writer((*pool).clone())?;

    let user_repository = Arc::new(UserRepository::new(pool.clone()));
    let transaction_repository = Arc::new(TransactionRepository::new(pool.clone()));
    let budget_repository = Arc::new(BudgetRepository::new(pool.clone(), writer));

    let income_resolver: Arc<dyn IncomeResolverTrait> = Arc::new(IncomeService::new(
        user_repository,
        transaction_repository.clone(),
    ));
    let budget_service: Arc<dyn BudgetServiceTrait> = Arc::new(BudgetService::new(
        budget_repository.clone(),
        income_resolver,
    ));
    let spending_service: Arc<dyn SpendingServiceTrait> = Arc::new(SpendingService::new(
        transaction_repository,
        budget_repository,
    ));

    Ok(Arc::new(AppState {
        budget_service,
        spending_service,
    }))
}
