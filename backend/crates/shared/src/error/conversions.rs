//! Error conversions
//!
//! Classification of store failures shared by every context, and the HTTP
//! rendering of [`AppError`].

use super::app_error::AppError;

/// データストアに到達できない場合のユーザー向けメッセージ
pub const STORE_UNAVAILABLE_MESSAGE: &str = "Database connection failed. Please try again later.";

// ============================================================================
// SQLx conversions (feature-gated)
// ============================================================================

/// 接続系の障害（プール枯渇・切断・I/O・TLS）かどうか
///
/// これらはリクエスト内で再試行せず、503 として即座に返します。
#[cfg(feature = "sqlx")]
pub fn is_store_unavailable(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::WorkerCrashed => true,
        // Class 08 (connection exception) and 57P0x (server shutting down)
        sqlx::Error::Database(db_err) => db_err
            .code()
            .is_some_and(|code| code.starts_with("08") || code.starts_with("57P0")),
        _ => false,
    }
}

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // RFC 7807 fields plus the `error` message clients read
        let mut body = serde_json::Map::new();
        body.insert(
            "type".into(),
            format!("https://httpstatuses.io/{}", self.status_code()).into(),
        );
        body.insert("title".into(), self.kind().as_str().into());
        body.insert("status".into(), self.status_code().into());
        body.insert("error".into(), self.message().into());
        if let Some(action) = self.action() {
            body.insert("action".into(), action.into());
        }
        for (key, value) in self.details() {
            body.insert(key.clone(), value.clone());
        }

        (status, Json(serde_json::Value::Object(body))).into_response()
    }
}
