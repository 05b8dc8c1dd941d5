use clap::Parser;
use oasis_agent::{AgentBuilder, Config};
use oasis_graph::StreamEvent;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use oasis_agent::config::LoggingConfig;

#[derive(Parser, Debug)]
#[command(name = "oasis-agent", version, about = "Answer questions using the tools of an OpenAPI-described API")]
struct Cli {
    /// Root URL of the API (its document is read from /swagger.json)
    #[arg(long)]
    base_url: Option<String>,

    /// Chat model name
    #[arg(long)]
    model: Option<String>,

    /// OpenAI-compatible LLM endpoint
    #[arg(long)]
    llm_base_url: Option<String>,

    /// Question to ask; the configured default otherwise
    #[arg(short, long)]
    question: Option<String>,

    /// Print the generated tools and exit
    #[arg(long)]
    list_tools: bool,

    /// Log every agent event as it happens
    #[arg(long)]
    stream: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = Config::load()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;
    if let Some(base_url) = cli.base_url {
        config.api.base_url = base_url;
    }
    if let Some(model) = cli.model {
        config.llm.model = model;
    }
    if let Some(llm_base_url) = cli.llm_base_url {
        config.llm.base_url = Some(llm_base_url);
    }

    init_logging(&config.logging);

    tracing::info!(api = %config.api.base_url, model = %config.llm.model, "Starting oasis agent");

    let agent = AgentBuilder::from_config(&config)?.build().await?;
    tracing::info!(tools = agent.tools().len(), skipped = agent.skipped().len(), "Tools ready");

    if cli.list_tools {
        for tool in agent.tools().tools() {
            println!("{}\t{}", tool.name(), tool.description());
        }
        return Ok(());
    }

    let question = cli.question.unwrap_or(config.agent.question);

    if cli.stream {
        let mut events = agent.ask_stream(&question);
        while let Some(event) = events.recv().await {
            match &event {
                StreamEvent::Message { content } => println!("{}", content),
                StreamEvent::Error { message, .. } => tracing::error!("{}", message),
                other => tracing::info!(event = ?other, "Agent event"),
            }
        }
        return Ok(());
    }

    let answer = agent.ask(&question).await?;
    tracing::info!(tool_calls = answer.tool_calls_made(), "Agent finished");
    println!("{}", answer.text);

    Ok(())
}

fn init_logging(config: &LoggingConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.format.as_str() {
        "json" => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        _ => registry.with(tracing_subscriber::fmt::layer().pretty()).init(),
    }
}
