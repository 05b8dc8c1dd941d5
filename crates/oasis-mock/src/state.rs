use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::data::ProblemStore;

/// Shared application state passed to all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub problems: Arc<ProblemStore>,
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.weather.timeout_secs))
            .build()?;

        Ok(Self {
            config: Arc::new(config),
            problems: Arc::new(ProblemStore::default()),
            http,
        })
    }
}
