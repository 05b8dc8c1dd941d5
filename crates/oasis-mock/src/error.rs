use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Problem not found")]
    ProblemNotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("WEATHER_API_KEY is not configured")]
    MissingWeatherKey,

    #[error("Weather service unreachable: {0}")]
    Upstream(#[from] reqwest::Error),
}

/// Error payload returned by every failing route
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::ProblemNotFound(ref id) => {
                tracing::debug!(id = %id, "Problem lookup missed");
                (StatusCode::NOT_FOUND, self.to_string())
            }
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::MissingWeatherKey => {
                tracing::warn!("Weather route called without WEATHER_API_KEY");
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
            ApiError::Upstream(ref e) => {
                tracing::error!("Weather upstream error: {}", e);
                (StatusCode::BAD_GATEWAY, "Weather service unreachable".to_string())
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
