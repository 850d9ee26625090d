use crate::llm::client::{LLMClient, LLMResponse};
use crate::types::{AppError, ChatMessage, ChatRole, Result, ToolCall, ToolDefinition};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Client for the OpenAI API and compatible endpoints.
///
/// Speaks the `/chat/completions` and `/embeddings` JSON protocols directly
/// over reqwest, so the same client works against any OpenAI-compatible
/// server (including a mock server in tests) by changing `api_base`.
pub struct OpenAIClient {
    client: reqwest::Client,
    api_key: String,
    api_base: String,
    model: String,
    embedding_model: String,
}

// ============= Wire Types =============

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<WireTool<'a>>>,
}

#[derive(Serialize)]
struct WireMessage {
    role: &'static str,
    content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_calls: Option<Vec<WireToolCall>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<String>,
}

#[derive(Serialize, Deserialize)]
struct WireToolCall {
    id: String,
    #[serde(rename = "type")]
    kind: String,
    function: WireFunctionCall,
}

#[derive(Serialize, Deserialize)]
struct WireFunctionCall {
    name: String,
    /// JSON-encoded argument object, as the protocol requires.
    arguments: String,
}

#[derive(Serialize)]
struct WireTool<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    function: &'a ToolDefinition,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: AssistantMessage,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct AssistantMessage {
    content: Option<String>,
    tool_calls: Option<Vec<WireToolCall>>,
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

fn role_str(role: ChatRole) -> &'static str {
    match role {
        ChatRole::System => "system",
        ChatRole::User => "user",
        ChatRole::Assistant => "assistant",
        ChatRole::Tool => "tool",
    }
}

fn to_wire(message: &ChatMessage) -> WireMessage {
    let tool_calls = if message.tool_calls.is_empty() {
        None
    } else {
        Some(
            message
                .tool_calls
                .iter()
                .map(|call| WireToolCall {
                    id: call.id.clone(),
                    kind: "function".to_string(),
                    function: WireFunctionCall {
                        name: call.name.clone(),
                        arguments: call.arguments.to_string(),
                    },
                })
                .collect(),
        )
    };

    WireMessage {
        role: role_str(message.role),
        content: message.content.clone(),
        tool_calls,
        tool_call_id: message.tool_call_id.clone(),
    }
}

impl OpenAIClient {
    pub fn new(api_key: String, api_base: String, model: String, embedding_model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            api_base: api_base.trim_end_matches('/').to_string(),
            model,
            embedding_model,
        }
    }

    async fn post_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        payload: &T,
    ) -> Result<reqwest::Response> {
        let url = format!("{}{}", self.api_base, path);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(payload)
            .send()
            .await
            .map_err(|e| AppError::Llm(format!("OpenAI request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Llm(format!("OpenAI API error {}: {}", status, body)));
        }

        Ok(response)
    }

    async fn completion(
        &self,
        messages: &[ChatMessage],
        tools: Option<Vec<WireTool<'_>>>,
    ) -> Result<LLMResponse> {
        let payload = ChatCompletionRequest {
            model: &self.model,
            messages: messages.iter().map(to_wire).collect(),
            tools,
        };

        tracing::debug!(model = %self.model, messages = messages.len(), "chat completion request");

        let body: ChatCompletionResponse = self
            .post_json("/chat/completions", &payload)
            .await?
            .json()
            .await
            .map_err(|e| AppError::Llm(format!("Malformed OpenAI response: {}", e)))?;

        let choice = body
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AppError::Llm("No response from OpenAI".to_string()))?;

        let tool_calls = choice
            .message
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .map(|call| ToolCall {
                id: call.id,
                name: call.function.name,
                arguments: serde_json::from_str(&call.function.arguments)
                    .unwrap_or(serde_json::json!({})),
            })
            .collect();

        Ok(LLMResponse {
            content: choice.message.content.unwrap_or_default(),
            tool_calls,
            finish_reason: choice.finish_reason.unwrap_or_else(|| "unknown".to_string()),
        })
    }
}

#[async_trait]
impl LLMClient for OpenAIClient {
    async fn chat(&self, messages: &[ChatMessage]) -> Result<String> {
        let response = self.completion(messages, None).await?;
        if response.content.is_empty() {
            return Err(AppError::Llm("Empty response from OpenAI".to_string()));
        }
        Ok(response.content)
    }

    async fn chat_with_tools(
        &self,
        messages: &[ChatMessage],
        tools: &[ToolDefinition],
    ) -> Result<LLMResponse> {
        let wire_tools = tools
            .iter()
            .map(|tool| WireTool {
                kind: "function",
                function: tool,
            })
            .collect();
        self.completion(messages, Some(wire_tools)).await
    }

    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let payload = EmbeddingRequest {
            model: &self.embedding_model,
            input: texts,
        };

        tracing::debug!(model = %self.embedding_model, inputs = texts.len(), "embedding request");

        let body: EmbeddingResponse = self
            .post_json("/embeddings", &payload)
            .await?
            .json()
            .await
            .map_err(|e| AppError::Llm(format!("Malformed embedding response: {}", e)))?;

        if body.data.len() != texts.len() {
            return Err(AppError::Llm(format!(
                "Embedding count mismatch: sent {}, received {}",
                texts.len(),
                body.data.len()
            )));
        }

        Ok(body.data.into_iter().map(|d| d.embedding).collect())
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
