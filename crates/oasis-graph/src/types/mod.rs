pub mod state;
pub mod config;
pub mod events;

pub use state::{GraphState, GraphInput};
pub use config::{GraphConfig, LLMConfig};
pub use events::{StreamEvent, RunStatus};
