use crate::error::{Result, ToolError};
use crate::tool::{ApiTool, ToolOutput};
use serde_json::Value;
use std::collections::HashMap;

/// Tool executor over a fixed set of generated tools
///
/// Built once at startup; lookups are by tool name and listing keeps the
/// order in which tools were added.
#[derive(Debug, Default)]
pub struct ApiToolExecutor {
    tools: Vec<ApiTool>,
    index: HashMap<String, usize>,
}

impl ApiToolExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tools(tools: Vec<ApiTool>) -> Result<Self> {
        let mut executor = Self::new();
        for tool in tools {
            executor.add_tool(tool)?;
        }
        Ok(executor)
    }

    pub fn add_tool(&mut self, tool: ApiTool) -> Result<()> {
        if let Some(&existing) = self.index.get(tool.name()) {
            return Err(ToolError::DuplicateToolName {
                name: tool.name().to_string(),
                first: self.tools[existing].path().to_string(),
                second: tool.path().to_string(),
            });
        }
        self.index.insert(tool.name().to_string(), self.tools.len());
        self.tools.push(tool);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&ApiTool> {
        self.index.get(name).map(|&i| &self.tools[i])
    }

    pub fn tools(&self) -> &[ApiTool] {
        &self.tools
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// All tools in LLM format
    pub fn llm_tools(&self) -> Vec<oasis_llm::Tool> {
        self.tools.iter().map(ApiTool::to_llm_tool).collect()
    }

    /// Execute a tool by name
    pub async fn execute_tool(&self, tool_name: &str, arguments: &Value) -> Result<ToolOutput> {
        let tool = self
            .get(tool_name)
            .ok_or_else(|| ToolError::NotFound(tool_name.to_string()))?;
        tool.invoke(arguments).await
    }
}
