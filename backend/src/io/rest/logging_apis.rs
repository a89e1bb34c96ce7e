use axum::{extract::State, response::Json, routing::post, Router};
use shared::{LogEntry, LogResponse};
use tracing::{debug, error, info, warn};

use crate::io::rest::extract::ApiJson;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(log_message))
}

/// Forward a client-side log line into the server log
pub async fn log_message(
    State(_state): State<AppState>,
    ApiJson(request): ApiJson<LogEntry>,
) -> Json<LogResponse> {
    let component = request.component.as_deref().unwrap_or("frontend");
    let message = format!("[{}] {}", component, request.message);

    match request.level.to_lowercase().as_str() {
        "debug" => debug!("{}", message),
        "warn" => warn!("{}", message),
        "error" => error!("{}", message),
        _ => info!("{}", message),
    }

    Json(LogResponse { success: true })
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::json;
    use shared::LogResponse;

    use crate::test_utils::{parse, send, test_app};

    #[tokio::test]
    async fn test_log_message_does_not_need_session() {
        let (_state, app) = test_app().await.unwrap();

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/logs",
            None,
            Some(json!({ "level": "warn", "message": "save failed", "component": "calendar" })),
        )
        .await
        .unwrap();

        assert_eq!(status, StatusCode::OK);
        let response: LogResponse = parse(&body).unwrap();
        assert!(response.success);
    }
}
