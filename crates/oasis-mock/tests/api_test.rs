use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use mockito::{Matcher, Server};
use oasis_mock::{build_router, config::Config, state::AppState};
use oasis_tools::{SpecDocument, ToolSynthesizer};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn app(config: Config) -> Router {
    build_router(Arc::new(AppState::new(config).unwrap()))
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, body)
}

#[tokio::test]
async fn test_stats() {
    let (status, body) = get(app(Config::default()), "/problems/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"open_problems": 2, "closed_problems": 1, "total": 3}));
}

#[tokio::test]
async fn test_list_and_lookup() {
    let (_, all) = get(app(Config::default()), "/problems/").await;
    assert_eq!(all.as_array().unwrap().len(), 3);

    let (status, one) = get(app(Config::default()), "/problems/2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        one,
        json!({"id": 2, "title": "Login error", "status": "closed", "user_id": 102, "category": "auth"})
    );
}

#[tokio::test]
async fn test_unknown_problem_is_404() {
    for uri in ["/problems/42", "/problems/abc"] {
        let (status, body) = get(app(Config::default()), uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "Problem not found"}));
    }
}

#[tokio::test]
async fn test_filters_lowercase_segment() {
    let (_, open) = get(app(Config::default()), "/problems/status/OPEN").await;
    let ids: Vec<u64> = open
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, [1, 3]);

    let (_, infra) = get(app(Config::default()), "/problems/category/Infra").await;
    assert_eq!(infra[0]["title"], "Server down");
}

#[tokio::test]
async fn test_user_routes() {
    let (_, mine) = get(app(Config::default()), "/problems/my_problems").await;
    assert_eq!(mine.as_array().unwrap().len(), 2);

    let (_, user) = get(app(Config::default()), "/problems/user/102").await;
    assert_eq!(user[0]["id"], 2);

    let (status, _) = get(app(Config::default()), "/problems/user/bob").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, recent) = get(app(Config::default()), "/problems/recent").await;
    assert_eq!(recent[0]["id"], 2);
    assert_eq!(recent[1]["id"], 3);
}

#[tokio::test]
async fn test_weather_without_key() {
    let (status, body) = get(app(Config::default()), "/weather/Recife").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("WEATHER_API_KEY"));
}

#[tokio::test]
async fn test_weather_proxied() {
    let mut upstream = Server::new_async().await;
    let current = upstream
        .mock("GET", "/weather")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("q".into(), "Recife".into()),
            Matcher::UrlEncoded("appid".into(), "test-key".into()),
            Matcher::UrlEncoded("units".into(), "metric".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"name": "Recife", "main": {"temp": 28.5}}"#)
        .create_async()
        .await;
    let forecast = upstream
        .mock("GET", "/forecast")
        .match_query(Matcher::Any)
        .with_status(404)
        .with_body(r#"{"cod": "404", "message": "city not found"}"#)
        .create_async()
        .await;

    let mut config = Config::default().with_weather_api_key("test-key");
    config.weather.base_url = upstream.url();

    let (status, body) = get(app(config.clone()), "/weather/Recife").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["main"]["temp"], 28.5);

    let (status, body) = get(app(config), "/weather/forecast/Atlantis").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "city not found");

    current.assert_async().await;
    forecast.assert_async().await;
}

#[tokio::test]
async fn test_health_not_documented() {
    let (status, body) = get(app(Config::default()), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (_, doc) = get(app(Config::default()), "/swagger.json").await;
    assert!(doc["paths"].get("/health").is_none());
}

#[tokio::test]
async fn test_document_shape() {
    let (status, doc) = get(app(Config::default()), "/swagger.json").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(doc["info"]["title"], "Generic Problems API for AI Agent");
    assert_eq!(
        doc["paths"]["/problems/stats"]["get"]["summary"],
        "Return a count of open and closed problems."
    );
    assert_eq!(doc["paths"].as_object().unwrap().len(), 10);

    let (_, docs) = get(app(Config::default()), "/docs").await;
    assert_eq!(doc, docs);
}

#[tokio::test]
async fn test_document_yields_one_tool_per_route() {
    let (_, doc) = get(app(Config::default()), "/swagger.json").await;

    let synthesis = ToolSynthesizer::new("http://localhost:8000")
        .synthesize(&SpecDocument::from_value(doc))
        .unwrap();

    let mut names = synthesis.tool_names();
    names.sort_unstable();
    assert_eq!(
        names,
        [
            "get_problems",
            "get_problemscategorycategory",
            "get_problemsid",
            "get_problemsmy_problems",
            "get_problemsrecent",
            "get_problemsstats",
            "get_problemsstatusstatus",
            "get_problemsuseruser_id",
            "get_weatherforecastcity",
            "get_weathercity",
        ]
    );
    assert_eq!(synthesis.skipped_count(), 0);
}
