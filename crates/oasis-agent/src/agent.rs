//! High-level builder that turns an API's OpenAPI document into a ready agent

use anyhow::{anyhow, Context, Result};
use oasis_graph::{Graph, GraphConfig, GraphInput, LLMConfig, StreamEvent};
use oasis_llm::{ChatClient, ClientFactory, Message, ProviderConfig};
use oasis_tools::{ApiToolExecutor, SkippedEntry, SpecDocument, ToolSynthesizer};
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::config::Config;

/// Builder for an [`Agent`] bound to one API
///
/// # Example
///
/// ```rust,no_run
/// use oasis_agent::AgentBuilder;
/// use oasis_llm::ProviderConfig;
///
/// # async fn example() -> anyhow::Result<()> {
/// let agent = AgentBuilder::new("http://localhost:8000")
///     .provider(ProviderConfig::openai("sk-..."))
///     .model("gpt-4o-mini")
///     .build()
///     .await?;
/// let answer = agent.ask("How many problems are open?").await?;
/// println!("{}", answer.text);
/// # Ok(())
/// # }
/// ```
pub struct AgentBuilder {
    base_url: String,
    spec_url: Option<String>,
    provider: Option<ProviderConfig>,
    chat_client: Option<Arc<dyn ChatClient>>,
    llm_config: LLMConfig,
    system_prompt: Option<String>,
    graph_config: GraphConfig,
    http: Option<reqwest::Client>,
}

impl AgentBuilder {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            spec_url: None,
            provider: None,
            chat_client: None,
            llm_config: LLMConfig::default(),
            system_prompt: None,
            graph_config: GraphConfig::default(),
            http: None,
        }
    }

    /// Everything except the question, from loaded configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config.llm_api_key.clone().ok_or_else(|| {
            anyhow!("No LLM API key found; set one of LLM_API_KEY, OPENAI_API_KEY or GEMINI_API_KEY")
        })?;
        let provider = match &config.llm.base_url {
            Some(url) => ProviderConfig::openai_compatible(api_key, url.clone()),
            None => ProviderConfig::openai(api_key),
        };

        let mut builder = Self::new(config.api.base_url.clone())
            .spec_url(config.api.spec_url())
            .provider(provider)
            .llm_config(config.llm.clone().into())
            .graph_config(GraphConfig::new().with_max_iterations(config.agent.max_iterations));

        if !config.agent.system_prompt.trim().is_empty() {
            builder = builder.system_prompt(config.agent.system_prompt.clone());
        }
        Ok(builder)
    }

    /// Where to fetch the document (default: `{base_url}/swagger.json`)
    pub fn spec_url(mut self, url: impl Into<String>) -> Self {
        self.spec_url = Some(url.into());
        self
    }

    pub fn provider(mut self, provider: ProviderConfig) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Use an existing client instead of building one from a provider
    pub fn chat_client(mut self, client: Arc<dyn ChatClient>) -> Self {
        self.chat_client = Some(client);
        self
    }

    pub fn llm_config(mut self, config: LLMConfig) -> Self {
        self.llm_config = config;
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.llm_config.model = model.into();
        self
    }

    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn graph_config(mut self, config: GraphConfig) -> Self {
        self.graph_config = config;
        self
    }

    pub fn http_client(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }

    /// Fetch the document, generate the tools and wire the agent loop
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - neither a provider nor a chat client was given
    /// - the document cannot be fetched or is not a JSON object
    /// - two endpoints map to the same tool name
    pub async fn build(self) -> Result<Agent> {
        let llm_client = match (self.chat_client, self.provider) {
            (Some(client), _) => client,
            (None, Some(provider)) => ClientFactory::create_chat_client(provider)?,
            (None, None) => return Err(anyhow!("An LLM provider or chat client is required")),
        };

        let http = self.http.unwrap_or_default();
        let document = match &self.spec_url {
            Some(url) => SpecDocument::fetch_url(&http, url).await,
            None => SpecDocument::fetch(&http, &self.base_url).await,
        }
        .context("Failed to fetch the OpenAPI document")?;

        let synthesis = ToolSynthesizer::new(self.base_url.clone())
            .with_http_client(http)
            .synthesize(&document)
            .context("Failed to generate tools")?;

        for tool in &synthesis.tools {
            tracing::info!(tool = %tool.name(), description = %tool.description(), "Tool available");
        }
        for entry in &synthesis.skipped {
            tracing::warn!(
                path = %entry.path,
                method = entry.method.as_deref().unwrap_or("-"),
                reason = %entry.reason,
                "Endpoint skipped"
            );
        }

        let executor = Arc::new(ApiToolExecutor::from_tools(synthesis.tools)?);

        let graph = Graph::builder()
            .llm_client(llm_client)
            .tool_executor(Arc::clone(&executor))
            .config(self.graph_config)
            .build()?;

        Ok(Agent {
            graph,
            executor,
            llm_config: self.llm_config,
            system_prompt: self.system_prompt,
            skipped: synthesis.skipped,
        })
    }
}

/// Final answer plus the conversation that produced it
#[derive(Debug, Clone)]
pub struct AgentAnswer {
    pub text: String,
    pub messages: Vec<Message>,
}

impl AgentAnswer {
    /// Number of tool results in the conversation
    pub fn tool_calls_made(&self) -> usize {
        self.messages
            .iter()
            .filter(|m| matches!(m, Message::Tool { .. }))
            .count()
    }
}

/// An agent whose tools were generated from one API document
pub struct Agent {
    graph: Graph,
    executor: Arc<ApiToolExecutor>,
    llm_config: LLMConfig,
    system_prompt: Option<String>,
    skipped: Vec<SkippedEntry>,
}

impl Agent {
    pub fn tools(&self) -> &ApiToolExecutor {
        &self.executor
    }

    /// Document entries that did not become tools
    pub fn skipped(&self) -> &[SkippedEntry] {
        &self.skipped
    }

    fn input(&self, question: &str) -> GraphInput {
        let input = GraphInput::question(question, self.llm_config.clone());
        match &self.system_prompt {
            Some(prompt) => input.with_system_prompt(prompt.clone()),
            None => input,
        }
    }

    /// Run the agent loop to completion
    pub async fn ask(&self, question: &str) -> Result<AgentAnswer> {
        tracing::info!(question = %question, "Asking agent");

        let messages = self.graph.invoke(self.input(question)).await?;
        let text = messages
            .last()
            .and_then(Message::text)
            .unwrap_or_default();

        Ok(AgentAnswer { text, messages })
    }

    /// Run in the background and receive events as they happen
    pub fn ask_stream(&self, question: &str) -> mpsc::Receiver<StreamEvent> {
        self.graph.spawn_run(self.input(question))
    }
}
