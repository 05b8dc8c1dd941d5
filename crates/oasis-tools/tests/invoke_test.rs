use mockito::Server;
use oasis_tools::{
    ApiToolExecutor, SpecDocument, ToolError, ToolOutput, ToolSynthesizer,
};
use serde_json::json;

fn problems_spec() -> serde_json::Value {
    json!({
        "info": {"title": "Problems API"},
        "paths": {
            "/problems/{id}": {"get": {"summary": "Return a problem by id."}},
            "/problems/stats": {"get": {"summary": "Problem counts."}},
            "/legacy": {"get": {}}
        }
    })
}

async fn executor_for(base_url: &str) -> ApiToolExecutor {
    let synthesis = ToolSynthesizer::new(base_url)
        .synthesize_value(problems_spec())
        .unwrap();
    ApiToolExecutor::from_tools(synthesis.tools).unwrap()
}

#[tokio::test]
async fn test_fetch_spec_document() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/swagger.json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(problems_spec().to_string())
        .create_async()
        .await;

    let document = SpecDocument::fetch(&reqwest::Client::new(), &format!("{}/", server.url()))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(document.title(), Some("Problems API"));
    assert_eq!(document.paths().unwrap().len(), 3);
}

#[tokio::test]
async fn test_fetch_spec_document_error_status() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/swagger.json")
        .with_status(503)
        .create_async()
        .await;

    let result = SpecDocument::fetch(&reqwest::Client::new(), &server.url()).await;
    assert!(matches!(result, Err(ToolError::Http(_))));
}

#[tokio::test]
async fn test_invoke_substitutes_path() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/problems/5")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id": 5, "title": "Slow database"}"#)
        .create_async()
        .await;

    let executor = executor_for(&server.url()).await;
    let output = executor
        .execute_tool("get_problemsid", &json!({"id": "5"}))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(output, ToolOutput::Json(json!({"id": 5, "title": "Slow database"})));
}

#[tokio::test]
async fn test_missing_argument_sends_nothing() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", mockito::Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let executor = executor_for(&server.url()).await;
    let err = executor
        .execute_tool("get_problemsid", &json!({}))
        .await
        .unwrap_err();

    mock.assert_async().await;
    assert!(matches!(err, ToolError::MissingArgument(ref p) if p == "id"));
}

#[tokio::test]
async fn test_error_payload_passed_through() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/problems/99")
        .with_status(404)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error": "Problem not found"}"#)
        .create_async()
        .await;

    let executor = executor_for(&server.url()).await;
    let output = executor
        .execute_tool("get_problemsid", &json!({"id": 99}))
        .await
        .unwrap();

    assert_eq!(output, ToolOutput::Json(json!({"error": "Problem not found"})));
}

#[tokio::test]
async fn test_non_json_body_returned_as_text() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/legacy")
        .with_status(200)
        .with_body("plain old text")
        .create_async()
        .await;

    let executor = executor_for(&server.url()).await;
    let output = executor.execute_tool("get_legacy", &json!({})).await.unwrap();

    assert_eq!(output.as_text(), Some("plain old text"));
}

#[tokio::test]
async fn test_unreachable_server_is_http_error() {
    let executor = executor_for("http://127.0.0.1:1").await;
    let err = executor
        .execute_tool("get_problemsstats", &json!({}))
        .await
        .unwrap_err();
    assert!(matches!(err, ToolError::Http(_)));
}
