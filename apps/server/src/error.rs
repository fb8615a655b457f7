use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use budgetwise_core::budgets::BudgetError;
use budgetwise_core::errors::Error as CoreError;
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Internal(String),
}

/// Error body returned for every failed request.
///
/// `available` and `monthlyIncome` accompany allocation failures so a client
/// can show the maximum limit that would be accepted.
#[derive(Serialize, ToSchema, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_income: Option<Decimal>,
}

impl ErrorBody {
    fn message(error: String) -> Self {
        Self {
            error,
            available: None,
            monthly_income: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::Core(CoreError::Budget(e)) if e.is_not_found() => {
                (StatusCode::NOT_FOUND, ErrorBody::message(e.to_string()))
            }
            ApiError::Core(CoreError::Budget(e)) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: e.to_string(),
                    available: e.available(),
                    monthly_income: e.monthly_income(),
                },
            ),
            ApiError::Core(e) if e.is_user_correctable() => {
                (StatusCode::BAD_REQUEST, ErrorBody::message(e.to_string()))
            }
            ApiError::Core(e) => {
                tracing::error!(error = %e, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::message(INTERNAL_ERROR_MESSAGE.to_string()),
                )
            }
            ApiError::BadRequest(reason) => {
                (StatusCode::BAD_REQUEST, ErrorBody::message(reason.clone()))
            }
            ApiError::Internal(reason) => {
                tracing::error!(error = %reason, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::message(INTERNAL_ERROR_MESSAGE.to_string()),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}

impl From<BudgetError> for ApiError {
    fn from(err: BudgetError) -> Self {
        ApiError::Core(CoreError::Budget(err))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
