//! Multi-turn conversational retrieval.
//!
//! Each turn runs a three-state machine:
//!
//! - **AwaitDecision**: the full history plus the `retrieve` tool definition
//!   is sent to the model, which either answers directly or requests
//!   retrieval (the decision is the model's judgment, not deterministic code)
//! - **Retrieving**: requested retrievals execute against the corpus index
//!   and their observations are appended as tool messages
//! - **Generating**: the final answer is produced from the most recent
//!   contiguous run of tool messages plus the prior conversation, excluding
//!   assistant messages that themselves carried tool calls
//!
//! Histories are append-only and keyed by a thread id, so concurrent
//! conversations stay isolated.

use crate::llm::LLMClient;
use crate::rag::retriever::Retriever;
use crate::types::{ChatMessage, ChatRole, Result, ToolCall, ToolDefinition};
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;

/// Number of chunks the retrieval tool returns per query.
const RETRIEVE_K: usize = 2;

const GENERATE_SYSTEM_PROMPT: &str = "You are an assistant for question-answering tasks. \
Use the following pieces of retrieved context to answer the question. \
If you don't know the answer, say that you don't know. \
Use three sentences maximum and keep the answer concise.";

/// Append-only conversation histories keyed by thread id.
#[derive(Default)]
pub struct SessionStore {
    threads: HashMap<String, Vec<ChatMessage>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, thread_id: &str, message: ChatMessage) {
        self.threads
            .entry(thread_id.to_string())
            .or_default()
            .push(message);
    }

    pub fn history(&self, thread_id: &str) -> &[ChatMessage] {
        self.threads.get(thread_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn thread_ids(&self) -> Vec<String> {
        self.threads.keys().cloned().collect()
    }
}

/// Per-turn state. `Generating` is terminal for the turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TurnState {
    AwaitDecision,
    Retrieving,
    Generating,
}

/// A conversational session with tool-mediated retrieval over one corpus.
pub struct ChatSession {
    llm: Arc<dyn LLMClient>,
    retriever: Arc<Retriever>,
    store: SessionStore,
}

impl ChatSession {
    pub fn new(llm: Arc<dyn LLMClient>, retriever: Arc<Retriever>) -> Self {
        Self {
            llm,
            retriever,
            store: SessionStore::new(),
        }
    }

    fn retrieve_tool_definition() -> ToolDefinition {
        ToolDefinition {
            name: "retrieve".to_string(),
            description: "Retrieve information related to a query.".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "query": { "type": "string", "description": "Search query" }
                },
                "required": ["query"]
            }),
        }
    }

    /// Run one full turn for `thread_id` and return the assistant's answer.
    pub async fn turn(&mut self, thread_id: &str, user_input: &str) -> Result<String> {
        self.store.append(thread_id, ChatMessage::user(user_input));

        let mut state = TurnState::AwaitDecision;
        let mut pending_calls: Vec<ToolCall> = Vec::new();

        loop {
            match state {
                TurnState::AwaitDecision => {
                    let tools = [Self::retrieve_tool_definition()];
                    let decision = self
                        .llm
                        .chat_with_tools(self.store.history(thread_id), &tools)
                        .await?;

                    if decision.has_tool_calls() {
                        tracing::debug!(thread_id, calls = decision.tool_calls.len(), "retrieving");
                        pending_calls = decision.tool_calls.clone();
                        self.store.append(
                            thread_id,
                            ChatMessage::assistant_with_tool_calls(
                                decision.content,
                                decision.tool_calls,
                            ),
                        );
                        state = TurnState::Retrieving;
                    } else {
                        // Direct answer: the turn ends without retrieval.
                        self.store
                            .append(thread_id, ChatMessage::assistant(decision.content.clone()));
                        return Ok(decision.content);
                    }
                }

                TurnState::Retrieving => {
                    for call in pending_calls.drain(..) {
                        let observation = self.execute_retrieve(&call).await?;
                        self.store.append(thread_id, ChatMessage::tool(call.id, observation));
                    }
                    state = TurnState::Generating;
                }

                TurnState::Generating => {
                    let answer = self.generate(thread_id).await?;
                    self.store.append(thread_id, ChatMessage::assistant(answer.clone()));
                    return Ok(answer);
                }
            }
        }
    }

    async fn execute_retrieve(&self, call: &ToolCall) -> Result<String> {
        if call.name != "retrieve" {
            return Ok(format!("Unknown tool: {}", call.name));
        }

        let query = call.arguments["query"].as_str().unwrap_or_default();
        let results = self.retriever.retrieve(query, RETRIEVE_K).await?;

        Ok(results
            .iter()
            .map(|scored| {
                format!(
                    "Source: {}#{}\nContent: {}",
                    scored.chunk.source, scored.chunk.offset, scored.chunk.text
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n"))
    }

    /// Build the generation prompt from the most recent contiguous run of
    /// tool messages plus the conversation so far, and request a completion.
    async fn generate(&self, thread_id: &str) -> Result<String> {
        let history = self.store.history(thread_id);

        let mut recent_tool_messages: Vec<&ChatMessage> = history
            .iter()
            .rev()
            .take_while(|m| m.role == ChatRole::Tool)
            .collect();
        recent_tool_messages.reverse();

        let docs_content = recent_tool_messages
            .iter()
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");

        let mut prompt = vec![ChatMessage::system(format!(
            "{}\n\n{}",
            GENERATE_SYSTEM_PROMPT, docs_content
        ))];
        prompt.extend(
            history
                .iter()
                .filter(|m| match m.role {
                    ChatRole::System | ChatRole::User => true,
                    ChatRole::Assistant => !m.has_tool_calls(),
                    ChatRole::Tool => false,
                })
                .cloned(),
        );

        self.llm.chat(&prompt).await
    }

    pub fn history(&self, thread_id: &str) -> &[ChatMessage] {
        self.store.history(thread_id)
    }
}
