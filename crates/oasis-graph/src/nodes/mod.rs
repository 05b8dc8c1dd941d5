pub mod llm_node;
pub mod tool_node;

pub use llm_node::LLMNode;
pub use tool_node::ToolNode;
