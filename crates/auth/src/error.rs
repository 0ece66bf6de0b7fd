//! Authentication errors

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Authentication error
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Could not acquire an isolated store scope for the lookup
    #[error("Failed to acquire identity store scope")]
    ScopeUnavailable,
    /// Storage failure while loading the user record; propagated unchanged,
    /// the caller decides whether to retry on its next revalidation pass
    #[error("Failed to load user record")]
    UserLoadError,
    /// The in-flight lookup was cancelled; no outcome was produced
    #[error("Revalidation cancelled")]
    Cancelled,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AuthError::ScopeUnavailable => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "SCOPE_UNAVAILABLE",
                "Failed to acquire identity store scope",
            ),
            AuthError::UserLoadError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "USER_LOAD_ERROR",
                "Failed to load user",
            ),
            AuthError::Cancelled => (
                StatusCode::SERVICE_UNAVAILABLE,
                "REVALIDATION_CANCELLED",
                "Session revalidation was cancelled",
            ),
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

impl From<AuthError> for stampguard_common::Error {
    fn from(err: AuthError) -> Self {
        stampguard_common::Error::Authentication(err.to_string())
    }
}
