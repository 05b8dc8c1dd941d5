use serde::{Deserialize, Serialize};

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Success,
    MaxIterations,
}

impl RunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::MaxIterations => "max_iterations",
        }
    }
}

/// Events emitted while the graph runs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamEvent {
    /// Graph execution started
    InitStream {
        run_id: String,
        conversation_id: String,
        timestamp: i64,
    },

    /// Assistant text returned by the model
    Message {
        content: String,
    },

    /// The model asked for a tool
    ToolCall {
        index: u32,
        id: String,
        name: String,
        arguments: String,
    },

    /// Tool execution completed
    ToolResult {
        tool_call_id: String,
        result: String,
        is_error: bool,
        duration_ms: u64,
    },

    /// One model turn completed
    Done {
        #[serde(skip_serializing_if = "Option::is_none")]
        finish_reason: Option<String>,
    },

    Error {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        node_id: Option<String>,
    },

    /// Graph execution completed
    EndStream {
        status: RunStatus,
        total_duration_ms: u64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_event_wire_shape() {
        let event = StreamEvent::EndStream {
            status: RunStatus::MaxIterations,
            total_duration_ms: 12,
        };
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({"type": "end_stream", "status": "max_iterations", "total_duration_ms": 12})
        );

        let done = StreamEvent::Done { finish_reason: None };
        assert_eq!(serde_json::to_value(&done).unwrap(), json!({"type": "done"}));
    }
}
