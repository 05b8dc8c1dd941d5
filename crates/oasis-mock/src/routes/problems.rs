use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::{
    data::{Problem, ProblemStats, CURRENT_USER_ID},
    error::{ApiError, ApiResult, ErrorBody},
    state::AppState,
};

/// Return every registered problem.
#[utoipa::path(
    get,
    path = "/problems/",
    responses((status = 200, description = "All problems", body = [Problem])),
    tag = "problems"
)]
pub async fn list_problems(State(state): State<Arc<AppState>>) -> Json<Vec<Problem>> {
    Json(state.problems.all().to_vec())
}

/// Return the details of one problem by its numeric id.
#[utoipa::path(
    get,
    path = "/problems/{id}",
    params(("id" = u32, Path, description = "Problem id")),
    responses(
        (status = 200, description = "The problem", body = Problem),
        (status = 404, description = "No problem with that id", body = ErrorBody)
    ),
    tag = "problems"
)]
pub async fn get_problem(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Problem>> {
    id.parse::<u32>()
        .ok()
        .and_then(|n| state.problems.get(n))
        .cloned()
        .map(Json)
        .ok_or(ApiError::ProblemNotFound(id))
}

/// Return the problems assigned to the logged-in user.
#[utoipa::path(
    get,
    path = "/problems/my_problems",
    responses((status = 200, description = "Problems of the current user", body = [Problem])),
    tag = "problems"
)]
pub async fn my_problems(State(state): State<Arc<AppState>>) -> Json<Vec<Problem>> {
    Json(state.problems.by_user(CURRENT_USER_ID))
}

/// Return problems filtered by status (e.g. 'open' or 'closed').
#[utoipa::path(
    get,
    path = "/problems/status/{status}",
    params(("status" = String, Path, description = "Problem status")),
    responses((status = 200, description = "Matching problems", body = [Problem])),
    tag = "problems"
)]
pub async fn problems_by_status(
    State(state): State<Arc<AppState>>,
    Path(status): Path<String>,
) -> Json<Vec<Problem>> {
    Json(state.problems.by_status(&status))
}

/// Return problems filtered by category (e.g. 'infra', 'auth').
#[utoipa::path(
    get,
    path = "/problems/category/{category}",
    params(("category" = String, Path, description = "Problem category")),
    responses((status = 200, description = "Matching problems", body = [Problem])),
    tag = "problems"
)]
pub async fn problems_by_category(
    State(state): State<Arc<AppState>>,
    Path(category): Path<String>,
) -> Json<Vec<Problem>> {
    Json(state.problems.by_category(&category))
}

/// Return every problem reported by a given user id.
#[utoipa::path(
    get,
    path = "/problems/user/{user_id}",
    params(("user_id" = u32, Path, description = "Reporting user id")),
    responses(
        (status = 200, description = "Problems of that user", body = [Problem]),
        (status = 400, description = "user_id is not a number", body = ErrorBody)
    ),
    tag = "problems"
)]
pub async fn problems_by_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<Vec<Problem>>> {
    let user_id: u32 = user_id
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("user_id must be a number, got '{}'", user_id)))?;
    Ok(Json(state.problems.by_user(user_id)))
}

/// Return the most recently registered problems.
#[utoipa::path(
    get,
    path = "/problems/recent",
    responses((status = 200, description = "The last two problems", body = [Problem])),
    tag = "problems"
)]
pub async fn recent_problems(State(state): State<Arc<AppState>>) -> Json<Vec<Problem>> {
    Json(state.problems.recent().to_vec())
}

/// Return a count of open and closed problems.
#[utoipa::path(
    get,
    path = "/problems/stats",
    responses((status = 200, description = "Problem counts", body = ProblemStats)),
    tag = "problems"
)]
pub async fn problem_stats(State(state): State<Arc<AppState>>) -> Json<ProblemStats> {
    Json(state.problems.stats())
}
