use axum::Json;
use utoipa::OpenApi;

use crate::data::{Problem, ProblemStats};
use crate::error::ErrorBody;
use crate::routes::{problems, weather};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Generic Problems API for AI Agent",
        version = "1.0",
        description = "Problem tracking and weather lookups"
    ),
    paths(
        problems::list_problems,
        problems::get_problem,
        problems::my_problems,
        problems::problems_by_status,
        problems::problems_by_category,
        problems::problems_by_user,
        problems::recent_problems,
        problems::problem_stats,
        weather::current_weather,
        weather::weather_forecast,
    ),
    components(schemas(Problem, ProblemStats, ErrorBody)),
    tags(
        (name = "problems", description = "Problem and ticket operations"),
        (name = "weather", description = "Current conditions and forecasts")
    )
)]
pub struct ApiDoc;

/// The OpenAPI document, served at `/swagger.json` and `/docs`
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
