use oasis_llm::{ChatOptions, ChatRequest, ChatResponse, Message, Tool, ToolCall, ToolChoice};
use serde_json::json;

#[test]
fn test_chat_request_creation() {
    let request = ChatRequest::new("gpt-4o-mini", vec![Message::human("Hello")]);

    assert_eq!(request.model, "gpt-4o-mini");
    assert_eq!(request.messages.len(), 1);
    assert!(request.options.tools.is_none());
}

#[test]
fn test_chat_options_builder() {
    let tools = vec![Tool::new("test", "Test tool", json!({"type": "object"}))];

    let options = ChatOptions::new()
        .temperature(0.95)
        .max_tokens(200)
        .tools(tools)
        .tool_choice(ToolChoice::auto());

    let request = ChatRequest::new("gemini-2.5-flash", vec![]).with_options(options);

    assert_eq!(request.options.temperature, Some(0.95));
    assert_eq!(request.options.max_tokens, Some(200));
    assert_eq!(request.options.tools.as_ref().map(Vec::len), Some(1));
    assert_eq!(request.options.tool_choice, Some(ToolChoice::auto()));
}

#[test]
fn test_chat_options_default() {
    let options = ChatOptions::default();

    assert_eq!(options.temperature, None);
    assert_eq!(options.max_tokens, None);
    assert_eq!(options.tools, None);
    assert_eq!(options.tool_choice, None);
}

#[test]
fn test_response_into_message_with_tool_calls() {
    let response = ChatResponse {
        content: Some(String::new()),
        tool_calls: Some(vec![ToolCall::new("call_1", "get_problemsstats", "{}")]),
        usage: None,
        finish_reason: Some("tool_calls".to_string()),
        raw: json!({}),
    };

    let message = response.into_message();
    assert_eq!(message.role(), "assistant");
    assert_eq!(message.text(), None);
    assert_eq!(message.tool_calls().len(), 1);
}

#[test]
fn test_response_into_message_final_answer() {
    let response = ChatResponse {
        content: Some("Ahoy!".to_string()),
        tool_calls: Some(vec![]),
        usage: None,
        finish_reason: Some("stop".to_string()),
        raw: json!({}),
    };

    let message = response.into_message();
    assert_eq!(message.text().as_deref(), Some("Ahoy!"));
    assert!(message.tool_calls().is_empty());
    assert_eq!(message, Message::ai("Ahoy!"));
}
