use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use std::sync::Arc;

use crate::{
    error::{ApiError, ApiResult, ErrorBody},
    state::AppState,
};

/// Return the current weather for a city.
#[utoipa::path(
    get,
    path = "/weather/{city}",
    params(("city" = String, Path, description = "City name, e.g. 'Recife'")),
    responses(
        (status = 200, description = "Upstream payload, passed through"),
        (status = 500, description = "WEATHER_API_KEY is not configured", body = ErrorBody)
    ),
    tag = "weather"
)]
pub async fn current_weather(
    State(state): State<Arc<AppState>>,
    Path(city): Path<String>,
) -> ApiResult<Response> {
    proxy(&state, "weather", &city).await
}

/// Return the 5-day forecast for a city.
#[utoipa::path(
    get,
    path = "/weather/forecast/{city}",
    params(("city" = String, Path, description = "City name, e.g. 'Recife'")),
    responses(
        (status = 200, description = "Upstream payload, passed through"),
        (status = 500, description = "WEATHER_API_KEY is not configured", body = ErrorBody)
    ),
    tag = "weather"
)]
pub async fn weather_forecast(
    State(state): State<Arc<AppState>>,
    Path(city): Path<String>,
) -> ApiResult<Response> {
    proxy(&state, "forecast", &city).await
}

/// Call `{base_url}/{endpoint}?q={city}` and hand back status and body as-is
async fn proxy(state: &AppState, endpoint: &str, city: &str) -> ApiResult<Response> {
    let api_key = state
        .config
        .weather_api_key
        .as_deref()
        .ok_or(ApiError::MissingWeatherKey)?;
    let weather = &state.config.weather;
    let url = format!("{}/{}", weather.base_url.trim_end_matches('/'), endpoint);

    tracing::debug!(url = %url, city = %city, "Calling weather upstream");

    let upstream = state
        .http
        .get(&url)
        .query(&[("q", city), ("appid", api_key), ("units", weather.units.as_str())])
        .send()
        .await?;

    let status = StatusCode::from_u16(upstream.status().as_u16())
        .unwrap_or(StatusCode::BAD_GATEWAY);
    let body = upstream.text().await?;

    let response = match serde_json::from_str::<Value>(&body) {
        Ok(json) => (status, Json(json)).into_response(),
        Err(_) => (status, body).into_response(),
    };
    Ok(response)
}
