use std::sync::Arc;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use budgetwise_core::utils::{month_bounds, today_utc};
use budgetwise_server::{api::app_router, build_state, config::Config};
use budgetwise_storage_sqlite::{create_pool, get_connection, DbPool};
use diesel::RunQueryDsl;
use serde_json::{json, Value};
use tempfile::{tempdir, TempDir};
use tower::ServiceExt;

struct TestApp {
    router: Router,
    pool: Arc<DbPool>,
    _temp_dir: TempDir,
}

impl TestApp {
    async fn new() -> Self {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let config = Config {
            db_path: temp_dir.path().join("test.db").to_string_lossy().to_string(),
            ..Config::default()
        };
        let state = build_state(&config).await.expect("Failed to build state");
        let pool = create_pool(&config.db_path, 1).expect("Failed to create pool");
        Self {
            router: app_router(state, &config),
            pool,
            _temp_dir: temp_dir,
        }
    }

    fn exec(&self, sql: &str) {
        let mut conn = get_connection(&self.pool).expect("Failed to get connection");
        diesel::sql_query(sql)
            .execute(&mut conn)
            .expect("Failed to seed data");
    }

    fn add_user(&self, id: &str, salary: Option<&str>) {
        let salary = salary
            .map(|s| format!("'{}'", s))
            .unwrap_or_else(|| "NULL".to_string());
        self.exec(&format!(
            "INSERT INTO users (id, salary, created_at) VALUES ('{}', {}, '2025-01-01T00:00:00.000Z')",
            id, salary
        ));
    }

    fn add_transaction(&self, id: &str, user_id: &str, amount: &str, kind: &str, category: &str, date: &str) {
        self.exec(&format!(
            "INSERT INTO transactions (id, user_id, amount, transaction_type, category, transaction_date, created_at) \
             VALUES ('{}', '{}', '{}', '{}', '{}', '{}', '2025-01-01T00:00:00.000Z')",
            id, user_id, amount, kind, category, date
        ));
    }

    async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).to_string()));
        (status, value)
    }
}

fn number(value: &Value) -> f64 {
    value.as_f64().unwrap_or_else(|| panic!("expected a number, got {value}"))
}

#[tokio::test]
async fn health_and_openapi_routes() {
    let app = TestApp::new().await;

    let (status, body) = app.request(Method::GET, "/healthz", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("ok".to_string()));

    let (status, _) = app.request(Method::GET, "/readyz", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, doc) = app.request(Method::GET, "/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/budgets/add"].is_object());
}

#[tokio::test]
async fn create_then_reject_limit_above_income() {
    let app = TestApp::new().await;
    app.add_user("u1", Some("5000"));

    let (status, body) = app
        .request(
            Method::POST,
            "/budgets/add",
            Some(json!({"userId": "u1", "category": "Food", "limit": 2000})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Budget created successfully");
    assert_eq!(body["budget"]["category"], "Food");
    assert_eq!(number(&body["budget"]["limit"]), 2000.0);
    assert!(body["budget"]["createdAt"].is_string());

    let (status, body) = app
        .request(
            Method::POST,
            "/budgets/add",
            Some(json!({"userId": "u1", "category": "Food", "limit": 6000})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Budget limit exceeds available income. Maximum allowed: ₹5,000"
    );
    assert_eq!(number(&body["available"]), 5000.0);
    assert_eq!(number(&body["monthlyIncome"]), 5000.0);
}

#[tokio::test]
async fn repeated_upsert_returns_ok_and_keeps_created_at() {
    let app = TestApp::new().await;
    app.add_user("u1", Some("9,99,005"));
    let payload = json!({"userId": "u1", "category": "  Travel ", "limit": "1500"});

    let (status, first) = app
        .request(Method::POST, "/budgets/add", Some(payload.clone()))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(first["budget"]["category"], "Travel");

    let (status, second) = app.request(Method::POST, "/budgets/add", Some(payload)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["message"], "Budget updated successfully");
    assert_eq!(second["budget"]["id"], first["budget"]["id"]);
    assert_eq!(second["budget"]["createdAt"], first["budget"]["createdAt"]);
    assert_eq!(number(&second["budget"]["limit"]), 1500.0);

    let (status, limits) = app.request(Method::GET, "/budgets/u1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(limits.as_object().unwrap().len(), 1);
    assert_eq!(number(&limits["Travel"]), 1500.0);
}

#[tokio::test]
async fn input_errors_are_bad_requests() {
    let app = TestApp::new().await;
    app.add_user("u1", Some("5000"));

    let (status, body) = app
        .request(
            Method::POST,
            "/budgets/add",
            Some(json!({"userId": "u1", "category": "Food"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required field: limit");
    assert!(body.get("available").is_none());

    let (status, body) = app
        .request(
            Method::POST,
            "/budgets/add",
            Some(json!({"userId": "u1", "category": "F", "limit": 10})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Category must be between 2 and 50 characters (got 1)"
    );

    let (status, body) = app
        .request(
            Method::POST,
            "/budgets/add",
            Some(json!({"userId": "u1", "category": "Food", "limit": -5})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Budget limit must be a positive number");

    let (status, body) = app
        .request(Method::POST, "/budgets/add", Some(Value::String("{".into())))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn user_without_income_gets_guidance() {
    let app = TestApp::new().await;
    app.add_user("u1", None);

    let (status, body) = app
        .request(
            Method::POST,
            "/budgets/add",
            Some(json!({"userId": "u1", "category": "Food", "limit": 100})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(number(&body["available"]), 0.0);
    assert_eq!(number(&body["monthlyIncome"]), 0.0);
}

#[tokio::test]
async fn income_transactions_stand_in_for_salary() {
    let app = TestApp::new().await;
    app.add_user("u1", None);
    let (first_day, last_day) = month_bounds(today_utc());
    app.add_transaction("i1", "u1", "500", "income", "Salary", &first_day.to_string());
    app.add_transaction("i2", "u1", "700", "income", "Salary", &last_day.to_string());

    let (status, body) = app
        .request(
            Method::POST,
            "/budgets/validate",
            Some(json!({"userId": "u1", "category": "Food", "limit": 1200})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(number(&body["monthlyIncome"]), 1200.0);
    assert_eq!(number(&body["available"]), 1200.0);
    assert_eq!(number(&body["otherTotal"]), 0.0);

    let (status, body) = app
        .request(
            Method::POST,
            "/budgets/validate",
            Some(json!({"userId": "u1", "category": "Food", "limit": 1201})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(number(&body["available"]), 1200.0);

    // Validation never writes
    let (_, limits) = app.request(Method::GET, "/budgets/u1", None).await;
    assert_eq!(limits, json!({}));
}

#[tokio::test]
async fn deletes_by_id_and_category() {
    let app = TestApp::new().await;
    app.add_user("u1", Some("10000"));
    let (_, created) = app
        .request(
            Method::POST,
            "/budgets/add",
            Some(json!({"userId": "u1", "category": "Rent", "limit": 6000})),
        )
        .await;
    app.request(
        Method::POST,
        "/budgets/add",
        Some(json!({"userId": "u1", "category": "Food", "limit": 1000})),
    )
    .await;

    let uri = format!("/budgets/{}", created["budget"]["id"].as_str().unwrap());
    let (status, body) = app.request(Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].is_string());
    let (status, _) = app.request(Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .request(
            Method::DELETE,
            "/budgets/category/delete",
            Some(json!({"userId": "u1", "category": "Food"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .request(
            Method::DELETE,
            "/budgets/category/delete",
            Some(json!({"userId": "u1", "category": "Food"})),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "No budget found for category 'Food'");

    let (status, _) = app
        .request(
            Method::DELETE,
            "/budgets/category/delete",
            Some(json!({"userId": "u1"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, limits) = app.request(Method::GET, "/budgets/u1", None).await;
    assert_eq!(limits, json!({}));
}

#[tokio::test]
async fn progress_reports_running_totals() {
    let app = TestApp::new().await;
    app.add_user("u1", Some("10000"));
    app.request(
        Method::POST,
        "/budgets/add",
        Some(json!({"userId": "u1", "category": "Food", "limit": 600})),
    )
    .await;
    app.add_transaction("t1", "u1", "30", "expense", "Food", "2025-03-01");
    app.add_transaction("t2", "u1", "50", "expense", "Food", "2025-03-10");
    app.add_transaction("t3", "u1", "100", "expense", "Food", "2025-03-20");
    app.add_transaction("t4", "u1", "999", "expense", "Food", "2025-04-01");

    let (status, body) = app
        .request(
            Method::GET,
            "/budgets/u1/progress?startDate=2025-03-01&endDate=2025-03-31",
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let rows = body["transactions"].as_array().unwrap();
    let ids: Vec<&str> = rows
        .iter()
        .map(|r| r["transactionId"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["t3", "t2", "t1"]);
    let cumulative: Vec<f64> = rows.iter().map(|r| number(&r["cumulativeAmount"])).collect();
    assert_eq!(cumulative, vec![100.0, 150.0, 180.0]);
    assert_eq!(number(&rows[2]["percentUsed"]), 30.0);
    assert_eq!(number(&body["categories"][0]["spent"]), 180.0);

    let (status, _) = app
        .request(
            Method::GET,
            "/budgets/u1/progress?startDate=2025-03-31&endDate=2025-03-01",
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .request(Method::GET, "/budgets/u1/progress?startDate=yesterday", None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
