use config::{Config as ConfigLoader, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Asked when no question is given on the command line
pub const DEFAULT_QUESTION: &str = "Return the problem statistics, then give me the details of the \
     problems that are closed. Be creative in your answer and reply like a pirate.";

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are an assistant that uses tools to query an API.";

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Gemini's OpenAI-compatible endpoint
pub const DEFAULT_LLM_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai";

/// Environment variables checked for the LLM key, in order
pub const API_KEY_VARS: [&str; 3] = ["LLM_API_KEY", "OPENAI_API_KEY", "GEMINI_API_KEY"];

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub llm: LlmConfig,
    pub agent: AgentConfig,
    pub logging: LoggingConfig,

    // Secrets (from ENV only)
    #[serde(skip)]
    pub llm_api_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Root of the API whose tools are generated
    pub base_url: String,
    pub spec_path: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            spec_path: oasis_tools::DEFAULT_SPEC_PATH.to_string(),
        }
    }
}

impl ApiConfig {
    pub fn spec_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.spec_path)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub model: String,
    /// OpenAI-compatible endpoint; `None` means api.openai.com
    pub base_url: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            base_url: Some(DEFAULT_LLM_BASE_URL.to_string()),
            temperature: Some(0.95),
            max_tokens: None,
        }
    }
}

impl From<LlmConfig> for oasis_graph::LLMConfig {
    fn from(config: LlmConfig) -> Self {
        Self {
            model: config.model,
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Empty disables the system message
    pub system_prompt: String,
    pub max_iterations: usize,
    pub question: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            max_iterations: oasis_graph::GraphConfig::default().max_iterations,
            question: DEFAULT_QUESTION.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from TOML files and environment variables
    ///
    /// Hierarchy (weakest to strongest):
    /// 1. config/default.toml
    /// 2. config/{ENV}.toml (if ENV is set)
    /// 3. `AGENT_`-prefixed environment variables, `__` between levels
    ///    (e.g. `AGENT_LLM__MODEL=gpt-4o`)
    ///
    /// The LLM key only comes from the environment, see [`API_KEY_VARS`].
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("ENV").unwrap_or_else(|_| "dev".to_string());

        let config = ConfigLoader::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::with_prefix("AGENT")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut cfg: Config = config.try_deserialize()?;
        cfg.llm_api_key = API_KEY_VARS
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|key| !key.trim().is_empty());

        Ok(cfg)
    }

    /// Load a single config file, without environment overrides
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        ConfigLoader::builder()
            .add_source(File::from(path.as_ref()))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_structure() {
        let toml = r#"
            [api]
            base_url = "http://localhost:9000/"

            [llm]
            model = "gemini-2.5-flash"
            base_url = "https://generativelanguage.googleapis.com/v1beta/openai"
            temperature = 0.95

            [agent]
            max_iterations = 10
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.api.spec_url(), "http://localhost:9000/swagger.json");
        assert_eq!(config.llm.temperature, Some(0.95));
        assert_eq!(config.agent.max_iterations, 10);
        assert_eq!(config.agent.system_prompt, DEFAULT_SYSTEM_PROMPT);
        assert!(config.agent.question.contains("pirate"));
        assert!(config.llm_api_key.is_none());
    }

    #[test]
    fn test_llm_config_conversion() {
        let llm: oasis_graph::LLMConfig = LlmConfig::default().into();
        assert_eq!(llm.model, "gemini-2.5-flash");
        assert_eq!(llm.temperature, Some(0.95));
    }

    #[test]
    fn test_defaults_target_gemini_without_files() {
        let config = Config::default();
        assert_eq!(config.llm.model, DEFAULT_MODEL);
        assert_eq!(config.llm.base_url.as_deref(), Some(DEFAULT_LLM_BASE_URL));
        assert_eq!(config.api.spec_url(), "http://localhost:8000/swagger.json");
    }

    #[test]
    fn test_default_file_matches_code_defaults() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config/default.toml");
        let from_file = Config::from_file(path).unwrap();
        let defaults = Config::default();

        assert_eq!(from_file.api.base_url, defaults.api.base_url);
        assert_eq!(from_file.api.spec_path, defaults.api.spec_path);
        assert_eq!(from_file.llm.model, defaults.llm.model);
        assert_eq!(from_file.llm.base_url, defaults.llm.base_url);
        let (file_temp, default_temp) = (
            from_file.llm.temperature.unwrap(),
            defaults.llm.temperature.unwrap(),
        );
        assert!((file_temp - default_temp).abs() < 1e-6);
        assert_eq!(from_file.llm.max_tokens, defaults.llm.max_tokens);
        assert_eq!(from_file.agent.system_prompt, defaults.agent.system_prompt);
        assert_eq!(from_file.agent.max_iterations, defaults.agent.max_iterations);
        assert_eq!(from_file.agent.question, defaults.agent.question);
        assert_eq!(from_file.logging.level, defaults.logging.level);
        assert_eq!(from_file.logging.format, defaults.logging.format);
    }
}
