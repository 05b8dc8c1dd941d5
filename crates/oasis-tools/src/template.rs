use regex::{Captures, Regex};
use std::sync::LazyLock;

use crate::error::{Result, ToolError};
use crate::schema::ToolArguments;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([^{}]+)\}").expect("placeholder pattern is valid"));

/// URL path with `{name}` placeholders, e.g. `/problems/{id}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    raw: String,
    parameters: Vec<String>,
}

impl PathTemplate {
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let mut parameters: Vec<String> = Vec::new();

        for caps in PLACEHOLDER.captures_iter(&raw) {
            let name = &caps[1];
            if !parameters.iter().any(|p| p == name) {
                parameters.push(name.to_string());
            }
        }

        Self { raw, parameters }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Placeholder names in order of first appearance
    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }

    /// Substitute every placeholder. All names are checked before anything is
    /// rendered, so a missing one never yields a half-filled path.
    pub fn render(&self, args: &ToolArguments) -> Result<String> {
        if let Some(missing) = self.parameters.iter().find(|p| args.get(p).is_none()) {
            return Err(ToolError::MissingArgument(missing.clone()));
        }

        let rendered = PLACEHOLDER.replace_all(&self.raw, |caps: &Captures| {
            args.get(&caps[1]).unwrap_or_default().to_string()
        });

        Ok(rendered.into_owned())
    }
}
