use serde_json::{Map, Value};

use crate::error::{Result, ToolError};

/// Where the API serves its OpenAPI document
pub const DEFAULT_SPEC_PATH: &str = "/swagger.json";

/// One operation read from the OpenAPI document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointDescriptor {
    pub path: String,
    pub method: String,
    pub summary: String,
}

impl EndpointDescriptor {
    /// Build from a `paths.{path}.{method}` entry; falls back to "GET /path"
    /// when the operation has no summary
    pub fn from_operation(path: &str, method: &str, details: &Map<String, Value>) -> Self {
        let summary = details
            .get("summary")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("{} {}", method.to_uppercase(), path));

        Self {
            path: path.to_string(),
            method: method.to_string(),
            summary,
        }
    }
}

/// Snapshot of an OpenAPI-shaped JSON document
#[derive(Debug, Clone)]
pub struct SpecDocument {
    raw: Value,
}

impl SpecDocument {
    pub fn from_value(raw: Value) -> Self {
        Self { raw }
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(Self::from_value(serde_json::from_str(text)?))
    }

    /// `GET {base_url}/swagger.json`
    pub async fn fetch(http: &reqwest::Client, base_url: &str) -> Result<Self> {
        let url = format!("{}{}", base_url.trim_end_matches('/'), DEFAULT_SPEC_PATH);
        Self::fetch_url(http, &url).await
    }

    pub async fn fetch_url(http: &reqwest::Client, url: &str) -> Result<Self> {
        tracing::info!(url = %url, "Fetching OpenAPI document");

        let raw: Value = http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if !raw.is_object() {
            return Err(ToolError::InvalidSpec(format!(
                "expected a JSON object at {}",
                url
            )));
        }

        let document = Self::from_value(raw);
        tracing::info!(
            title = document.title().unwrap_or("untitled"),
            paths = document.paths().map_or(0, Map::len),
            "OpenAPI document loaded"
        );
        Ok(document)
    }

    pub fn title(&self) -> Option<&str> {
        self.raw.pointer("/info/title").and_then(Value::as_str)
    }

    /// The `paths` mapping, if present and well-formed
    pub fn paths(&self) -> Option<&Map<String, Value>> {
        self.raw.get("paths").and_then(Value::as_object)
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_summary_fallback() {
        let details = Map::new();
        let endpoint = EndpointDescriptor::from_operation("/problems/recent", "get", &details);
        assert_eq!(endpoint.summary, "GET /problems/recent");
    }

    #[test]
    fn test_summary_taken_verbatim() {
        let details = json!({"summary": "Return every registered problem."});
        let endpoint = EndpointDescriptor::from_operation(
            "/problems/",
            "get",
            details.as_object().unwrap(),
        );
        assert_eq!(endpoint.summary, "Return every registered problem.");
        assert_eq!(endpoint.method, "get");
    }

    #[test]
    fn test_paths_missing_or_malformed() {
        assert!(SpecDocument::from_value(json!({"openapi": "3.0.3"})).paths().is_none());
        assert!(SpecDocument::from_value(json!({"paths": []})).paths().is_none());
        assert!(SpecDocument::parse(r#"{"paths": {}}"#).unwrap().paths().is_some());
    }

    #[test]
    fn test_title() {
        let doc = SpecDocument::from_value(json!({"info": {"title": "Problems API"}}));
        assert_eq!(doc.title(), Some("Problems API"));
    }
}
