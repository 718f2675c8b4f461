//! HTTP boundary: one `POST /analyze` route over the analyzer pipeline.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use log::info;
use serde_json::json;

use crate::analyzer;
use crate::error::ValidationError;
use crate::models::{AnalysisResult, RunRecord};

pub fn router() -> Router {
    Router::new().route("/analyze", post(analyze))
}

/// Binds the listener and serves until ctrl-c.
pub async fn serve(bind: &str, port: u16) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind((bind, port)).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router())
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
        })
        .await?;

    Ok(())
}

async fn analyze(Json(run): Json<RunRecord>) -> Result<Json<AnalysisResult>, RejectedRun> {
    run.validate()?;
    Ok(Json(analyzer::analyze_run(&run)))
}

/// Unprocessable-entity response carrying every violated constraint, one
/// entry per offending field.
struct RejectedRun(ValidationError);

impl From<ValidationError> for RejectedRun {
    fn from(err: ValidationError) -> Self {
        Self(err)
    }
}

impl IntoResponse for RejectedRun {
    fn into_response(self) -> Response {
        let body = json!({ "errors": self.0.violations() });
        (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::*;

    async fn spawn_server() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test listener");
        let addr = listener.local_addr().expect("local addr");

        tokio::spawn(async move {
            axum::serve(listener, router()).await.expect("serve");
        });

        format!("http://{addr}/analyze")
    }

    fn base_payload() -> Value {
        json!({
            "release_cycle": "RC-20250328",
            "platform": "android",
            "environment": "test_app",
            "device_id": "Any_Samsung",
            "test_suite": "regression",
            "scenarios_total": 50,
            "scenarios_failed": 4,
            "duration_sec": 3120,
            "retries": 1,
            "diff_size": 344,
            "usage_cpu": 0.47,
            "memory_mb": 812.3,
        })
    }

    #[tokio::test]
    async fn test_analyze_returns_expected_schema() {
        let url = spawn_server().await;
        let client = reqwest::Client::new();

        let response = client
            .post(&url)
            .json(&base_payload())
            .send()
            .await
            .expect("request");

        assert_eq!(response.status(), 200);

        let data: Value = response.json().await.expect("json body");
        let p_flaky = data["p_flaky"].as_f64().expect("p_flaky");
        let priority = data["priority"].as_str().expect("priority");
        let recommendation = data["recommendation"].as_str().expect("recommendation");

        assert!((0.0..=1.0).contains(&p_flaky));
        assert!(["high", "medium", "low"].contains(&priority));
        assert!(recommendation.split_whitespace().count() <= 40);
    }

    #[tokio::test]
    async fn test_high_flakiness_run_has_high_priority() {
        let url = spawn_server().await;
        let client = reqwest::Client::new();

        let mut payload = base_payload();
        payload["scenarios_failed"] = json!(20);
        payload["retries"] = json!(2);

        let response = client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .expect("request");

        assert_eq!(response.status(), 200);

        let data: Value = response.json().await.expect("json body");
        assert_eq!(data["priority"], "high");
        assert!(data["p_flaky"].as_f64().expect("p_flaky") >= 0.4);
    }

    #[tokio::test]
    async fn test_low_flakiness_run_has_low_or_medium_priority() {
        let url = spawn_server().await;
        let client = reqwest::Client::new();

        let mut payload = base_payload();
        payload["scenarios_failed"] = json!(0);
        payload["retries"] = json!(0);
        payload["diff_size"] = json!(10);
        payload["usage_cpu"] = json!(0.1);
        payload["memory_mb"] = json!(256.0);

        let response = client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .expect("request");

        assert_eq!(response.status(), 200);

        let data: Value = response.json().await.expect("json body");
        let priority = data["priority"].as_str().expect("priority");

        assert!(["low", "medium"].contains(&priority));
        assert!(data["p_flaky"].as_f64().expect("p_flaky") <= 0.6);
    }

    #[tokio::test]
    async fn test_invalid_scenarios_failed_greater_than_total() {
        let url = spawn_server().await;
        let client = reqwest::Client::new();

        let mut payload = base_payload();
        payload["scenarios_failed"] = json!(999);

        let response = client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .expect("request");

        assert_eq!(response.status(), 422);

        let data: Value = response.json().await.expect("json body");
        let errors = data["errors"].as_array().expect("errors array");

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0]["field"], "scenarios_failed");
    }
}
