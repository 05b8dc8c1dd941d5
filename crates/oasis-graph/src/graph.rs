use crate::node::{Node, NodeType};
use crate::nodes::{LLMNode, ToolNode};
use crate::router::{NextNode, Router, SimpleRouter};
use crate::types::{GraphConfig, GraphInput, GraphState, RunStatus, StreamEvent};
use anyhow::{bail, Result};
use oasis_llm::{ChatClient, Message};
use oasis_tools::ApiToolExecutor;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;

const EVENT_BUFFER: usize = 1000;

pub struct Graph {
    llm_client: Arc<dyn ChatClient>,
    executor: Arc<ApiToolExecutor>,
    config: GraphConfig,
}

impl Graph {
    pub fn new(
        llm_client: Arc<dyn ChatClient>,
        executor: Arc<ApiToolExecutor>,
        config: GraphConfig,
    ) -> Self {
        Self {
            llm_client,
            executor,
            config,
        }
    }

    /// Create a builder for fluent construction
    pub fn builder() -> crate::builder::GraphBuilder {
        crate::builder::GraphBuilder::new()
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Spawn execution in background, return event receiver
    pub fn spawn_run(&self, input: GraphInput) -> mpsc::Receiver<StreamEvent> {
        let (tx, rx) = mpsc::channel(EVENT_BUFFER);

        let llm_client = Arc::clone(&self.llm_client);
        let executor = Arc::clone(&self.executor);
        let config = self.config.clone();

        tokio::spawn(async move {
            if let Err(e) =
                Self::execute_loop(input, tx.clone(), llm_client, executor, config).await
            {
                tracing::error!(error = %e, "Graph run failed");
                let _ = tx
                    .send(StreamEvent::Error {
                        message: e.to_string(),
                        node_id: None,
                    })
                    .await;
            }
        });

        rx
    }

    /// Run to completion and return the full message history; the last entry
    /// is the final answer.
    ///
    /// Hitting the iteration limit is an error here.
    pub async fn invoke(&self, input: GraphInput) -> Result<Vec<Message>> {
        let (tx, mut rx) = mpsc::channel(EVENT_BUFFER);

        let run = Self::execute_loop(
            input,
            tx,
            Arc::clone(&self.llm_client),
            Arc::clone(&self.executor),
            self.config.clone(),
        );
        let drain = async move {
            while let Some(event) = rx.recv().await {
                tracing::trace!(?event, "Graph event");
            }
        };

        let (outcome, ()) = tokio::join!(run, drain);
        let (state, status) = outcome?;

        if status == RunStatus::MaxIterations {
            bail!("Max iterations ({}) reached", self.config.max_iterations);
        }
        Ok(state.messages)
    }

    async fn execute_loop(
        input: GraphInput,
        event_tx: mpsc::Sender<StreamEvent>,
        llm_client: Arc<dyn ChatClient>,
        executor: Arc<ApiToolExecutor>,
        config: GraphConfig,
    ) -> Result<(GraphState, RunStatus)> {
        let start_time = Instant::now();

        let mut state = GraphState::from_input(input);

        event_tx
            .send(StreamEvent::InitStream {
                run_id: state.run_id.clone(),
                conversation_id: state.conversation_id.clone(),
                timestamp: chrono::Utc::now().timestamp_millis(),
            })
            .await?;

        tracing::info!(
            run_id = %state.run_id,
            model = %state.llm_config.model,
            tools = executor.len(),
            "Graph run started"
        );

        let llm_node = LLMNode::new(llm_client, Arc::clone(&executor));
        let tool_node = ToolNode::new(executor);
        let router = SimpleRouter;

        let mut current_node = NodeType::LLM;
        let mut iteration = 0;
        let mut status = RunStatus::Success;

        loop {
            // Guardrail: max iterations
            if iteration >= config.max_iterations {
                tracing::warn!(max = config.max_iterations, "Max iterations reached");
                event_tx
                    .send(StreamEvent::Error {
                        message: format!("Max iterations ({}) reached", config.max_iterations),
                        node_id: None,
                    })
                    .await?;
                status = RunStatus::MaxIterations;
                break;
            }

            let node_start = Instant::now();

            match current_node {
                NodeType::LLM => llm_node.execute(&mut state, event_tx.clone()).await?,
                NodeType::Tool => tool_node.execute(&mut state, event_tx.clone()).await?,
            }

            tracing::debug!(
                node = current_node.as_str(),
                iteration,
                duration_ms = node_start.elapsed().as_millis() as u64,
                "Node finished"
            );

            match router.next(&state, current_node) {
                NextNode::End => break,
                NextNode::LLM => current_node = NodeType::LLM,
                NextNode::Tool => current_node = NodeType::Tool,
            }

            iteration += 1;
        }

        let total_duration = start_time.elapsed().as_millis() as u64;
        event_tx
            .send(StreamEvent::EndStream {
                status,
                total_duration_ms: total_duration,
            })
            .await?;

        tracing::info!(
            run_id = %state.run_id,
            status = status.as_str(),
            messages = state.messages.len(),
            duration_ms = total_duration,
            "Graph run finished"
        );

        Ok((state, status))
    }
}
