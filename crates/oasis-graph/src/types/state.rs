use crate::types::config::LLMConfig;
use oasis_llm::{Message, ToolCall};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub struct GraphState {
    pub conversation_id: String,
    pub run_id: String,
    pub messages: Vec<Message>,
    pub llm_config: LLMConfig,
}

impl GraphState {
    pub fn new(
        conversation_id: String,
        run_id: String,
        messages: Vec<Message>,
        llm_config: LLMConfig,
    ) -> Self {
        Self {
            conversation_id,
            run_id,
            messages,
            llm_config,
        }
    }

    /// Build the initial state, putting the system prompt first unless the
    /// history already opens with a system message
    pub fn from_input(input: GraphInput) -> Self {
        let mut messages = Vec::with_capacity(input.messages.len() + 1);
        let opens_with_system = matches!(input.messages.first(), Some(Message::System { .. }));

        if let Some(prompt) = input.system_prompt.filter(|_| !opens_with_system) {
            messages.push(Message::system(prompt));
        }
        messages.extend(input.messages);

        Self {
            conversation_id: input.conversation_id,
            run_id: uuid::Uuid::new_v4().to_string(),
            messages,
            llm_config: input.llm_config,
        }
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn add_message(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn has_pending_tool_calls(&self) -> bool {
        self.last_message()
            .is_some_and(|msg| !msg.tool_calls().is_empty())
    }

    pub fn get_pending_tool_calls(&self) -> Vec<ToolCall> {
        self.last_message()
            .map(|msg| msg.tool_calls().to_vec())
            .unwrap_or_default()
    }

    pub fn add_tool_result(&mut self, tool_call_id: String, result: String) {
        self.messages.push(Message::tool_result(tool_call_id, result));
    }

    /// Text of the last assistant message
    pub fn final_answer(&self) -> Option<String> {
        self.messages
            .iter()
            .rev()
            .find(|msg| matches!(msg, Message::AI { .. }))
            .and_then(Message::text)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphInput {
    pub conversation_id: String,
    pub messages: Vec<Message>,
    pub llm_config: LLMConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
}

impl GraphInput {
    pub fn new(
        conversation_id: impl Into<String>,
        messages: Vec<Message>,
        llm_config: LLMConfig,
    ) -> Self {
        Self {
            conversation_id: conversation_id.into(),
            messages,
            llm_config,
            system_prompt: None,
        }
    }

    /// Single user question
    pub fn question(question: impl Into<String>, llm_config: LLMConfig) -> Self {
        Self::new(
            uuid::Uuid::new_v4().to_string(),
            vec![Message::human(question.into())],
            llm_config,
        )
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }
}
