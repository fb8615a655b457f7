use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use budgetwise_core::{
    budgets::{BudgetError, BudgetInput},
    spending::SpendingWindow,
    utils::today_utc,
};
use rust_decimal::Decimal;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
    models::{
        AllocationCheck, BudgetProgress, BudgetRequest, BudgetSaved,
        DeleteBudgetByCategoryRequest, MessageResponse, ProgressQuery,
    },
};

fn required(value: Option<String>, field: &str) -> ApiResult<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| BudgetError::MissingField(field.to_string()).into())
}

#[utoipa::path(
    post,
    path = "/budgets/add",
    request_body = BudgetRequest,
    responses(
        (status = 201, description = "Budget created", body = BudgetSaved),
        (status = 200, description = "Budget updated", body = BudgetSaved),
        (status = 400, description = "Invalid input or limit exceeds income", body = crate::error::ErrorBody),
    )
)]
pub async fn add_budget(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<BudgetRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<BudgetSaved>)> {
    let Json(request) = payload?;
    let new_budget = BudgetInput::from(request).validate()?;

    let result = state.budget_service.upsert_budget(new_budget).await?;
    let (status, message) = if result.created {
        (StatusCode::CREATED, "Budget created successfully")
    } else {
        (StatusCode::OK, "Budget updated successfully")
    };
    Ok((
        status,
        Json(BudgetSaved {
            message: message.to_string(),
            budget: result.budget.into(),
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/budgets/validate",
    request_body = BudgetRequest,
    responses(
        (status = 200, description = "Limit fits within income", body = AllocationCheck),
        (status = 400, description = "Invalid input or limit exceeds income", body = crate::error::ErrorBody),
    )
)]
pub async fn validate_budget(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<BudgetRequest>, JsonRejection>,
) -> ApiResult<Json<AllocationCheck>> {
    let Json(request) = payload?;
    let new_budget = BudgetInput::from(request).validate()?;
    let check = state.budget_service.validate_budget(&new_budget)?;
    Ok(Json(check.into()))
}

#[utoipa::path(
    get,
    path = "/budgets/{id}",
    params(("id" = String, Path, description = "User id")),
    responses((status = 200, description = "Budget limits keyed by category", body = BTreeMap<String, f64>))
)]
pub async fn get_budget_limits(
    Path(user_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<BTreeMap<String, Decimal>>> {
    let limits = state.budget_service.get_budget_limits(&user_id)?;
    Ok(Json(limits.into_iter().collect()))
}

#[utoipa::path(
    delete,
    path = "/budgets/{id}",
    params(("id" = String, Path, description = "Budget id")),
    responses((status = 200, description = "Budget deleted or already absent", body = MessageResponse))
)]
pub async fn delete_budget(
    Path(budget_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<MessageResponse>> {
    state.budget_service.delete_budget(&budget_id).await?;
    Ok(Json(MessageResponse::new("Budget deleted successfully")))
}

#[utoipa::path(
    delete,
    path = "/budgets/category/delete",
    request_body = DeleteBudgetByCategoryRequest,
    responses(
        (status = 200, description = "Budget deleted", body = MessageResponse),
        (status = 400, description = "Missing field", body = crate::error::ErrorBody),
        (status = 404, description = "No budget for the category", body = crate::error::ErrorBody),
    )
)]
pub async fn delete_budget_by_category(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<DeleteBudgetByCategoryRequest>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Json(request) = payload?;
    let user_id = required(request.user_id, "userId")?;
    let category = required(request.category, "category")?;

    state
        .budget_service
        .delete_budget_by_category(&user_id, &category)
        .await?;
    Ok(Json(MessageResponse::new(format!(
        "Budget for '{}' deleted successfully",
        category
    ))))
}

#[utoipa::path(
    get,
    path = "/budgets/{id}/progress",
    params(("id" = String, Path, description = "User id"), ProgressQuery),
    responses(
        (status = 200, description = "Cumulative spend per expense and category", body = BudgetProgress),
        (status = 400, description = "Invalid date window", body = crate::error::ErrorBody),
    )
)]
pub async fn get_budget_progress(
    Path(user_id): Path<String>,
    State(state): State<Arc<AppState>>,
    query: Result<Query<ProgressQuery>, QueryRejection>,
) -> ApiResult<Json<BudgetProgress>> {
    let Query(query) = query?;
    let window = SpendingWindow::resolve(query.start_date, query.end_date, today_utc());
    if window.start_date > window.end_date {
        return Err(ApiError::BadRequest(
            "startDate must not be after endDate".to_string(),
        ));
    }
    let progress = state
        .spending_service
        .get_budget_progress(&user_id, window)?;
    Ok(Json(progress.into()))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/budgets/add", post(add_budget))
        .route("/budgets/validate", post(validate_budget))
        .route("/budgets/category/delete", delete(delete_budget_by_category))
        .route("/budgets/{id}", get(get_budget_limits).delete(delete_budget))
        .route("/budgets/{id}/progress", get(get_budget_progress))
}
