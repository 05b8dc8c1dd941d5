//! OpenAPI document → LLM tools.
//!
//! Every GET operation of an OpenAPI document becomes an [`ApiTool`]: a name derived
//! from method and path, the operation summary as description, one required
//! string argument per `{placeholder}` in the path, and an `invoke` that fills
//! the template and performs the request.

pub mod error;
pub mod document;
pub mod template;
pub mod schema;
pub mod tool;
pub mod synthesizer;
pub mod executor;

pub use error::{Result, ToolError};
pub use document::{EndpointDescriptor, SpecDocument, DEFAULT_SPEC_PATH};
pub use template::PathTemplate;
pub use schema::{ToolArguments, ToolParameter, ToolSchema};
pub use tool::{ApiTool, ToolOutput};
pub use synthesizer::{SkipReason, SkippedEntry, Synthesis, ToolSynthesizer};
pub use executor::ApiToolExecutor;
