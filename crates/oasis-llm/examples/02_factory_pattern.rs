use anyhow::Result;
use oasis_llm::{ChatClient, ChatRequest, ClientFactory, Message, ProviderConfig};
use std::sync::Arc;

/// Picks a provider from the environment and asks one question.
///
/// `LLM_PROVIDER=gemini` goes through Gemini's OpenAI-compatible endpoint,
/// anything else talks to OpenAI directly.
#[tokio::main]
async fn main() -> Result<()> {
    let provider = std::env::var("LLM_PROVIDER").unwrap_or_else(|_| "openai".to_string());
    println!("Selected provider: {}", provider);

    let (config, model) = match provider.as_str() {
        "gemini" => {
            let api_key = std::env::var("GEMINI_API_KEY")?;
            let config = ProviderConfig::openai_compatible(
                api_key,
                "https://generativelanguage.googleapis.com/v1beta/openai",
            );
            (config, "gemini-2.5-flash".to_string())
        }
        _ => {
            let api_key = std::env::var("OPENAI_API_KEY")?;
            (ProviderConfig::openai(api_key), "gpt-4o-mini".to_string())
        }
    };

    let client: Arc<dyn ChatClient> = ClientFactory::create_chat_client(config)?;

    let request = ChatRequest::new(model, vec![Message::human("What is 2+2?")]);
    let response = client.chat(request).await?;
    println!("Response: {}", response.content.unwrap_or_default());

    Ok(())
}
