use reqwest::Method;
use serde_json::Value;
use std::fmt;

use crate::document::EndpointDescriptor;
use crate::error::{Result, ToolError};
use crate::schema::ToolSchema;
use crate::template::PathTemplate;

/// What a tool call returns: the parsed JSON body, or the raw text when the
/// body is not JSON
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutput {
    Json(Value),
    Text(String),
}

impl ToolOutput {
    pub fn from_body(body: String) -> Self {
        match serde_json::from_str(&body) {
            Ok(value) => Self::Json(value),
            Err(_) => Self::Text(body),
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Json(_) => None,
            Self::Text(text) => Some(text),
        }
    }
}

impl fmt::Display for ToolOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(value) => write!(f, "{}", value),
            Self::Text(text) => f.write_str(text),
        }
    }
}

/// A GET endpoint turned into something the model can call
#[derive(Debug, Clone)]
pub struct ApiTool {
    name: String,
    description: String,
    method: Method,
    template: PathTemplate,
    schema: ToolSchema,
    base_url: String,
    http: reqwest::Client,
}

impl ApiTool {
    pub fn from_endpoint(
        endpoint: &EndpointDescriptor,
        base_url: &str,
        http: reqwest::Client,
    ) -> Result<Self> {
        let method = Method::from_bytes(endpoint.method.to_uppercase().as_bytes())
            .map_err(|_| ToolError::InvalidSpec(format!("invalid HTTP method '{}'", endpoint.method)))?;

        let name = Self::derive_name(&endpoint.method, &endpoint.path);
        let template = PathTemplate::parse(endpoint.path.as_str());
        let schema = ToolSchema::for_template(&name, &template);

        Ok(Self {
            name,
            description: endpoint.summary.clone(),
            method,
            template,
            schema,
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// `{method}_{path}` without `/`, `{` and `}`.
    ///
    /// `get` + `/problems/{id}` gives `get_problemsid`.
    pub fn derive_name(method: &str, path: &str) -> String {
        format!("{}_{}", method, path)
            .chars()
            .filter(|c| !matches!(c, '/' | '{' | '}'))
            .collect()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        self.template.as_str()
    }

    pub fn schema(&self) -> &ToolSchema {
        &self.schema
    }

    /// Validate `args` and build the concrete URL. Nothing is sent.
    pub fn request_url(&self, args: &Value) -> Result<String> {
        let args = self.schema.validate(args)?;
        let endpoint = self.template.render(&args)?;
        Ok(format!("{}{}", self.base_url, endpoint))
    }

    /// One HTTP request with the endpoint's method.
    ///
    /// The status code is not inspected: error payloads come back like any
    /// other body. Transport failures surface as [`ToolError::Http`].
    pub async fn invoke(&self, args: &Value) -> Result<ToolOutput> {
        let url = self.request_url(args)?;
        tracing::info!(tool = %self.name, url = %url, "Invoking generated URL");

        let response = self.http.request(self.method.clone(), &url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        tracing::debug!(tool = %self.name, status = %status, bytes = body.len(), "Tool response received");

        Ok(ToolOutput::from_body(body))
    }

    /// Function definition in the shape the chat API expects
    pub fn to_llm_tool(&self) -> oasis_llm::Tool {
        oasis_llm::Tool::new(
            self.name.clone(),
            self.description.clone(),
            self.schema.to_json_schema(),
        )
    }
}
