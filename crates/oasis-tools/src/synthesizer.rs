use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

use crate::document::{EndpointDescriptor, SpecDocument};
use crate::error::{Result, ToolError};
use crate::tool::ApiTool;

/// Why a `paths` entry did not become a tool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The path item is not a mapping of methods
    MalformedPathItem,
    /// Method other than GET
    NotGet,
    /// The operation details are not a mapping
    MalformedOperation,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::MalformedPathItem => "path item is not an object",
            Self::NotGet => "method is not GET",
            Self::MalformedOperation => "operation details are not an object",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    pub path: String,
    pub method: Option<String>,
    pub reason: SkipReason,
}

/// Result of one synthesis pass
#[derive(Debug, Clone, Default)]
pub struct Synthesis {
    pub tools: Vec<ApiTool>,
    pub skipped: Vec<SkippedEntry>,
}

impl Synthesis {
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.iter().map(ApiTool::name).collect()
    }
}

/// Turns the GET operations of an OpenAPI document into [`ApiTool`]s bound to one
/// base URL
pub struct ToolSynthesizer {
    base_url: String,
    http: reqwest::Client,
}

impl ToolSynthesizer {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::Client::new(),
        }
    }

    /// Share an existing HTTP client with the generated tools
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// One tool per GET operation whose details are an object.
    ///
    /// Everything else is recorded in [`Synthesis::skipped`]. Two paths that
    /// normalize to the same tool name are rejected with
    /// [`ToolError::DuplicateToolName`].
    pub fn synthesize(&self, document: &SpecDocument) -> Result<Synthesis> {
        let mut synthesis = Synthesis::default();

        let Some(paths) = document.paths() else {
            tracing::warn!("OpenAPI document has no 'paths' object; no tools generated");
            return Ok(synthesis);
        };

        let mut seen: HashMap<String, String> = HashMap::new();

        for (path, item) in paths {
            let Some(methods) = item.as_object() else {
                synthesis.skip(path, None, SkipReason::MalformedPathItem);
                continue;
            };

            for (method, details) in methods {
                tracing::debug!(path = %path, method = %method, "Inspecting operation");

                if !method.eq_ignore_ascii_case("get") {
                    synthesis.skip(path, Some(method.as_str()), SkipReason::NotGet);
                    continue;
                }
                let Some(details) = details.as_object() else {
                    synthesis.skip(path, Some(method.as_str()), SkipReason::MalformedOperation);
                    continue;
                };

                let endpoint = EndpointDescriptor::from_operation(path, method, details);
                let tool = ApiTool::from_endpoint(&endpoint, &self.base_url, self.http.clone())?;

                if let Some(first) = seen.get(tool.name()) {
                    return Err(ToolError::DuplicateToolName {
                        name: tool.name().to_string(),
                        first: first.clone(),
                        second: path.clone(),
                    });
                }
                seen.insert(tool.name().to_string(), path.clone());

                tracing::debug!(tool = %tool.name(), summary = %endpoint.summary, "Tool generated");
                synthesis.tools.push(tool);
            }
        }

        tracing::info!(
            tools = synthesis.tools.len(),
            skipped = synthesis.skipped_count(),
            "Tool synthesis finished"
        );

        Ok(synthesis)
    }

    /// Convenience for callers holding a bare JSON value
    pub fn synthesize_value(&self, document: Value) -> Result<Synthesis> {
        self.synthesize(&SpecDocument::from_value(document))
    }
}

impl Synthesis {
    fn skip(&mut self, path: &str, method: Option<&str>, reason: SkipReason) {
        tracing::debug!(path = %path, method = ?method, reason = %reason, "Skipping paths entry");
        self.skipped.push(SkippedEntry {
            path: path.to_string(),
            method: method.map(str::to_string),
            reason,
        });
    }
}
