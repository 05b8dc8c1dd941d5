use anyhow::Result;
use async_trait::async_trait;
use mockito::{Server, ServerGuard};
use oasis_agent::{AgentBuilder, Config, DEFAULT_SYSTEM_PROMPT};
use oasis_llm::{ChatClient, ChatRequest, ChatResponse, Message, ToolCall};
use serde_json::json;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

struct ScriptedClient {
    responses: Mutex<VecDeque<ChatResponse>>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedClient {
    fn new(responses: Vec<ChatResponse>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl ChatClient for ScriptedClient {
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("script exhausted"))
    }
}

fn response(content: Option<&str>, tool_calls: Option<Vec<ToolCall>>) -> ChatResponse {
    ChatResponse {
        content: content.map(str::to_string),
        tool_calls,
        usage: None,
        finish_reason: None,
        raw: json!({}),
    }
}

async fn problems_api() -> ServerGuard {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/swagger.json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "info": {"title": "Generic Problems API for AI Agent"},
                "paths": {
                    "/problems/stats": {"get": {"summary": "Return a count of open and closed problems."}},
                    "/problems/status/{status}": {"get": {"summary": "Return problems filtered by status."}},
                    "/problems/{id}": {"delete": {"summary": "Not a tool."}}
                }
            })
            .to_string(),
        )
        .create_async()
        .await;
    server
        .mock("GET", "/problems/stats")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"open_problems": 2, "closed_problems": 1, "total": 3}"#)
        .create_async()
        .await;
    server
        .mock("GET", "/problems/status/closed")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"id": 2, "title": "Login error", "status": "closed"}]"#)
        .create_async()
        .await;
    server
}

#[tokio::test]
async fn test_agent_answers_with_generated_tools() {
    let server = problems_api().await;
    let client = ScriptedClient::new(vec![
        response(
            None,
            Some(vec![ToolCall::new("call_1", "get_problemsstats", "{}")]),
        ),
        response(
            None,
            Some(vec![ToolCall::new(
                "call_2",
                "get_problemsstatusstatus",
                r#"{"status": "closed"}"#,
            )]),
        ),
        response(Some("Arr! Three problems, and only the Login error be closed."), None),
    ]);

    let agent = AgentBuilder::new(server.url())
        .chat_client(client.clone())
        .system_prompt(DEFAULT_SYSTEM_PROMPT)
        .build()
        .await
        .unwrap();

    assert_eq!(agent.tools().len(), 2);
    assert_eq!(agent.skipped().len(), 1);

    let answer = agent.ask("Stats, then the closed problems, like a pirate").await.unwrap();

    assert_eq!(answer.text, "Arr! Three problems, and only the Login error be closed.");
    assert_eq!(answer.tool_calls_made(), 2);
    assert_eq!(answer.messages[0], Message::system(DEFAULT_SYSTEM_PROMPT));
    assert_eq!(
        answer.messages[3].text().as_deref(),
        Some(r#"{"open_problems":2,"closed_problems":1,"total":3}"#)
    );

    let requests = client.requests.lock().unwrap();
    assert_eq!(requests.len(), 3);
    let tools = requests[0].options.tools.as_ref().unwrap();
    assert_eq!(tools[1].function.parameters["required"], json!(["status"]));
}

#[tokio::test]
async fn test_build_fails_when_document_unreachable() {
    let mut server = Server::new_async().await;
    let _missing = server
        .mock("GET", "/swagger.json")
        .with_status(404)
        .create_async()
        .await;

    let result = AgentBuilder::new(server.url())
        .chat_client(ScriptedClient::new(Vec::new()))
        .build()
        .await;

    let err = result.err().unwrap();
    assert!(err.to_string().contains("OpenAPI document"));
}

#[tokio::test]
async fn test_build_requires_llm() {
    let server = problems_api().await;
    let result = AgentBuilder::new(server.url()).build().await;
    assert!(result.is_err());
}

#[test]
fn test_from_config_requires_key() {
    let config = Config::default();
    assert!(AgentBuilder::from_config(&config).is_err());

    let mut config = Config::default();
    config.llm_api_key = Some("sk-test".to_string());
    assert!(AgentBuilder::from_config(&config).is_ok());
}
