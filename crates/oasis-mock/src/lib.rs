//! Mock problems/weather API that publishes an OpenAPI document of its own
//! GET routes, for agents that build their tools from it.

pub mod config;
pub mod data;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::{middleware as axum_middleware, routing::get, Router};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::routes::{docs, health, problems, weather};
use crate::state::AppState;

pub use crate::routes::docs::ApiDoc;

pub fn build_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        // Document
        .route("/swagger.json", get(docs::openapi_json))
        .route("/docs", get(docs::openapi_json))
        .route("/health", get(health::health_check))
        // Problems
        .route("/problems/", get(problems::list_problems))
        .route("/problems/my_problems", get(problems::my_problems))
        .route("/problems/recent", get(problems::recent_problems))
        .route("/problems/stats", get(problems::problem_stats))
        .route("/problems/status/:status", get(problems::problems_by_status))
        .route("/problems/category/:category", get(problems::problems_by_category))
        .route("/problems/user/:user_id", get(problems::problems_by_user))
        .route("/problems/:id", get(problems::get_problem))
        // Weather
        .route("/weather/forecast/:city", get(weather::weather_forecast))
        .route("/weather/:city", get(weather::current_weather));

    let timeout = Duration::from_secs(state.config.server.request_timeout_secs);
    let cors = build_cors_layer(&state.config);

    api_routes
        .layer(axum_middleware::from_fn(middleware::logging::log_request))
        .layer(TimeoutLayer::new(timeout))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn build_cors_layer(config: &Config) -> CorsLayer {
    if !config.cors.enabled {
        return CorsLayer::new();
    }

    let cors = CorsLayer::new()
        .allow_methods([axum::http::Method::GET, axum::http::Method::OPTIONS])
        .allow_headers(Any);

    if config.cors.origins.iter().any(|o| o == "*") {
        cors.allow_origin(Any)
    } else {
        let parsed_origins: Vec<axum::http::HeaderValue> = config
            .cors
            .origins
            .iter()
            .filter_map(|o| o.parse::<axum::http::HeaderValue>().ok())
            .collect();
        cors.allow_origin(parsed_origins)
    }
}
