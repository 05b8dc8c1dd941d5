pub mod types;
pub mod node;
pub mod router;
pub mod nodes;
pub mod builder;
pub mod graph;

pub use node::{Node, NodeType, EventSender};
pub use router::{Router, NextNode, SimpleRouter};
pub use builder::GraphBuilder;
pub use graph::Graph;
pub use nodes::{LLMNode, ToolNode};

pub use types::{GraphState, GraphInput, GraphConfig, LLMConfig, StreamEvent, RunStatus};
