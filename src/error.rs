use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Network failure, timeout or non-success status from the station API.
    #[error("Station API error: {0}")]
    StationApi(String),

    /// Body was not the expected JSON, or an expected field was missing.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    /// Whether the next tick may succeed where this one failed.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::StationApi(_))
    }

    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::StationApi(_) | Self::MalformedResponse(_) => StatusCode::BAD_GATEWAY,
            Self::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            Self::MalformedResponse(msg) => {
                tracing::error!("Malformed station response: {msg}");
                "Malformed station response".to_string()
            }
            Self::Config(e) => {
                tracing::error!("Config error: {e:?}");
                "Configuration error".to_string()
            }
            Self::StationApi(_) => {
                tracing::error!("{self}");
                self.to_string()
            }
            Self::BadRequest(msg) | Self::NotFound(msg) => msg.clone(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_failures_are_bad_gateway() {
        assert_eq!(
            AppError::StationApi("timeout".into()).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AppError::MalformedResponse("not json".into()).status_code(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn only_transport_failures_are_transient() {
        assert!(AppError::StationApi("refused".into()).is_transient());
        assert!(!AppError::MalformedResponse("{}".into()).is_transient());
        assert!(!AppError::BadRequest("5".into()).is_transient());
    }

    #[test]
    fn client_errors_keep_their_message() {
        let response = AppError::NotFound("Unknown region 'x'".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
