use crate::node::{EventSender, Node, NodeType};
use crate::types::{GraphState, StreamEvent};
use anyhow::{Context, Result};
use async_trait::async_trait;
use oasis_llm::{ChatClient, ChatOptions, ChatRequest, Message, ToolChoice};
use oasis_tools::ApiToolExecutor;
use std::sync::Arc;

pub struct LLMNode {
    client: Arc<dyn ChatClient>,
    executor: Arc<ApiToolExecutor>,
}

impl LLMNode {
    pub fn new(client: Arc<dyn ChatClient>, executor: Arc<ApiToolExecutor>) -> Self {
        Self { client, executor }
    }

    fn build_request(&self, state: &GraphState) -> ChatRequest {
        let mut options = ChatOptions::new();

        if !self.executor.is_empty() {
            options = options
                .tools(self.executor.llm_tools())
                .tool_choice(ToolChoice::auto());
        }
        if let Some(temp) = state.llm_config.temperature {
            options = options.temperature(temp);
        }
        if let Some(max_tokens) = state.llm_config.max_tokens {
            options = options.max_tokens(max_tokens);
        }

        ChatRequest::new(state.llm_config.model.clone(), state.messages.clone())
            .with_options(options)
    }

    async fn emit_outputs(
        message: &Message,
        finish_reason: Option<String>,
        event_tx: &EventSender,
    ) -> Result<()> {
        if let Some(content) = message.text() {
            event_tx.send(StreamEvent::Message { content }).await?;
        }

        for (index, call) in message.tool_calls().iter().enumerate() {
            event_tx
                .send(StreamEvent::ToolCall {
                    index: index as u32,
                    id: call.id.clone(),
                    name: call.function.name.clone(),
                    arguments: call.function.arguments.clone(),
                })
                .await?;
        }

        event_tx.send(StreamEvent::Done { finish_reason }).await?;
        Ok(())
    }
}

#[async_trait]
impl Node for LLMNode {
    async fn execute(&self, state: &mut GraphState, event_tx: EventSender) -> Result<()> {
        let request = self.build_request(state);

        tracing::info!(
            model = %state.llm_config.model,
            messages = state.messages.len(),
            tools = self.executor.len(),
            "LLM_NODE: Calling model"
        );

        let response = self
            .client
            .chat(request)
            .await
            .context("LLM request failed")?;

        if let Some(usage) = &response.usage {
            tracing::debug!(
                input_tokens = usage.input_tokens,
                output_tokens = usage.output_tokens,
                "LLM_NODE: Token usage"
            );
        }

        let finish_reason = response.finish_reason.clone();
        let message = response.into_message();

        tracing::info!(
            tool_calls = message.tool_calls().len(),
            "LLM_NODE: Model answered"
        );

        Self::emit_outputs(&message, finish_reason, &event_tx).await?;
        state.add_message(message);

        Ok(())
    }

    fn node_type(&self) -> NodeType {
        NodeType::LLM
    }
}
