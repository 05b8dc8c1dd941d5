//! Fetches an API's OpenAPI document, turns its GET endpoints into tools and
//! lets an LLM answer questions with them.

pub mod agent;
pub mod config;

pub use agent::{Agent, AgentAnswer, AgentBuilder};
pub use config::{Config, DEFAULT_QUESTION, DEFAULT_SYSTEM_PROMPT};
