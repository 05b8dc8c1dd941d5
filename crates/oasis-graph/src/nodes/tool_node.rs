use crate::node::{EventSender, Node, NodeType};
use crate::types::{GraphState, StreamEvent};
use anyhow::Result;
use async_trait::async_trait;
use oasis_llm::ToolCall;
use oasis_tools::{ApiToolExecutor, ToolOutput};
use std::sync::Arc;
use std::time::Instant;

pub struct ToolNode {
    executor: Arc<ApiToolExecutor>,
}

impl ToolNode {
    pub fn new(executor: Arc<ApiToolExecutor>) -> Self {
        Self { executor }
    }

    async fn run_call(&self, call: &ToolCall) -> Result<ToolOutput> {
        let args = call.arguments_value()?;
        Ok(self.executor.execute_tool(&call.function.name, &args).await?)
    }
}

#[async_trait]
impl Node for ToolNode {
    async fn execute(&self, state: &mut GraphState, event_tx: EventSender) -> Result<()> {
        let tool_calls = state.get_pending_tool_calls();

        if tool_calls.is_empty() {
            return Ok(());
        }

        // One call at a time, in the order the model asked for them
        for tool_call in tool_calls {
            let start = Instant::now();

            let (result, is_error) = match self.run_call(&tool_call).await {
                Ok(output) => (output.to_string(), false),
                Err(e) => {
                    tracing::warn!(
                        tool = %tool_call.function.name,
                        error = %e,
                        "TOOL_NODE: Tool execution failed"
                    );
                    // The model sees the failure and can recover
                    (format!("Tool execution failed: {}", e), true)
                }
            };

            event_tx
                .send(StreamEvent::ToolResult {
                    tool_call_id: tool_call.id.clone(),
                    result: result.clone(),
                    is_error,
                    duration_ms: start.elapsed().as_millis() as u64,
                })
                .await?;

            state.add_tool_result(tool_call.id, result);
        }

        Ok(())
    }

    fn node_type(&self) -> NodeType {
        NodeType::Tool
    }
}
