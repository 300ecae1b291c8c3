//! 健康检查端点

use axum::{Json, extract::State, http::StatusCode};
use serde_json::{Value, json};
use tracing::warn;

use crate::state::AppState;

const SERVICE_NAME: &str = "larder-api";

/// 存活探针：服务进程正常即返回 ok
///
/// GET /health
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": SERVICE_NAME
    }))
}

/// 就绪探针：检查数据库连接是否可用，不可用时返回 503
///
/// GET /ready
pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let db_ok = match sqlx::query("SELECT 1").execute(&state.pool).await {
        Ok(_) => true,
        Err(e) => {
            warn!(error = %e, "Readiness check: database unavailable");
            false
        }
    };

    let status = if db_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(json!({
            "status": if db_ok { "ok" } else { "degraded" },
            "service": SERVICE_NAME,
            "checks": {
                "database": if db_ok { "ok" } else { "fail" }
            }
        })),
    )
}
