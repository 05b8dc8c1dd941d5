use std::sync::Arc;
use anyhow::{Result, anyhow};

use oasis_llm::ChatClient;
use oasis_tools::ApiToolExecutor;

use crate::graph::Graph;
use crate::types::GraphConfig;

/// Builder for constructing a Graph
pub struct GraphBuilder {
    llm_client: Option<Arc<dyn ChatClient>>,
    executor: Option<Arc<ApiToolExecutor>>,
    config: GraphConfig,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self {
            llm_client: None,
            executor: None,
            config: GraphConfig::default(),
        }
    }

    pub fn llm_client(mut self, client: Arc<dyn ChatClient>) -> Self {
        self.llm_client = Some(client);
        self
    }

    pub fn tool_executor(mut self, executor: Arc<ApiToolExecutor>) -> Self {
        self.executor = Some(executor);
        self
    }

    pub fn config(mut self, config: GraphConfig) -> Self {
        self.config = config;
        self
    }

    /// A missing executor means the model gets no tools
    pub fn build(self) -> Result<Graph> {
        let llm_client = self.llm_client
            .ok_or_else(|| anyhow!("LLM client is required"))?;
        let executor = self.executor
            .unwrap_or_else(|| Arc::new(ApiToolExecutor::new()));

        Ok(Graph::new(llm_client, executor, self.config))
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}
