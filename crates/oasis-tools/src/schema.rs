use serde_json::{json, Map, Value};
use std::collections::BTreeMap;

use crate::error::{Result, ToolError};
use crate::template::PathTemplate;

/// A required, string-typed input field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolParameter {
    pub name: String,
    pub description: String,
}

/// Input contract of a generated tool, one field per path placeholder.
///
/// Built once per endpoint and checked against every call before any request
/// is made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolSchema {
    title: String,
    parameters: Vec<ToolParameter>,
}

impl ToolSchema {
    pub fn for_template(tool_name: &str, template: &PathTemplate) -> Self {
        let parameters = template
            .parameters()
            .iter()
            .map(|name| ToolParameter {
                name: name.clone(),
                description: format!("Value for the '{}' parameter in the URL", name),
            })
            .collect();

        Self {
            title: format!("{}_Schema", tool_name),
            parameters,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn parameters(&self) -> &[ToolParameter] {
        &self.parameters
    }

    pub fn parameter_names(&self) -> impl Iterator<Item = &str> {
        self.parameters.iter().map(|p| p.name.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// JSON Schema handed to the model
    pub fn to_json_schema(&self) -> Value {
        let mut properties = Map::new();
        for param in &self.parameters {
            properties.insert(
                param.name.clone(),
                json!({
                    "type": "string",
                    "description": param.description,
                }),
            );
        }

        json!({
            "title": self.title,
            "type": "object",
            "properties": properties,
            "required": self.parameters.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
        })
    }

    /// Check raw model arguments and turn them into substitution values.
    ///
    /// `null` counts as no arguments. Numbers and booleans are accepted in
    /// their JSON text form; keys not declared by the schema are ignored.
    pub fn validate(&self, raw: &Value) -> Result<ToolArguments> {
        let empty = Map::new();
        let object = match raw {
            Value::Object(map) => map,
            Value::Null => &empty,
            other => return Err(ToolError::InvalidArguments(other.to_string())),
        };

        let mut values = BTreeMap::new();
        for param in &self.parameters {
            let value = match object.get(&param.name) {
                None | Some(Value::Null) => {
                    return Err(ToolError::MissingArgument(param.name.clone()))
                }
                Some(Value::String(s)) => s.clone(),
                Some(Value::Number(n)) => n.to_string(),
                Some(Value::Bool(b)) => b.to_string(),
                Some(other) => {
                    return Err(ToolError::InvalidArgument {
                        parameter: param.name.clone(),
                        reason: format!("expected a string, got {}", other),
                    })
                }
            };
            values.insert(param.name.clone(), value);
        }

        Ok(ToolArguments(values))
    }
}

/// Validated substitution values keyed by parameter name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolArguments(BTreeMap<String, String>);

impl ToolArguments {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, String)> for ToolArguments {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
