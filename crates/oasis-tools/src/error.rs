use thiserror::Error;

#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Missing argument for path parameter '{0}'")]
    MissingArgument(String),

    #[error("Invalid argument for path parameter '{parameter}': {reason}")]
    InvalidArgument { parameter: String, reason: String },

    #[error("Tool arguments must be a JSON object, got: {0}")]
    InvalidArguments(String),

    #[error("Tool name '{name}' is derived from both '{first}' and '{second}'")]
    DuplicateToolName {
        name: String,
        first: String,
        second: String,
    },

    #[error("Tool not found: {0}")]
    NotFound(String),

    #[error("Invalid OpenAPI document: {0}")]
    InvalidSpec(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ToolError>;
