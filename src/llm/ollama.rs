use crate::llm::client::{LLMClient, LLMResponse};
use crate::types::{AppError, ChatMessage, ChatRole, Result, ToolCall, ToolDefinition};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Client for a local Ollama server (`/api/chat`, `/api/embed`).
pub struct OllamaClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
    embedding_model: String,
}

// ============= Wire Types =============

#[derive(Serialize)]
struct OllamaChatRequest<'a> {
    model: &'a str,
    messages: Vec<OllamaMessage>,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<OllamaTool<'a>>>,
}

#[derive(Serialize)]
struct OllamaMessage {
    role: &'static str,
    content: String,
}

#[derive(Serialize)]
struct OllamaTool<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    function: &'a ToolDefinition,
}

#[derive(Deserialize)]
struct OllamaChatResponse {
    message: OllamaResponseMessage,
    #[serde(default)]
    done_reason: Option<String>,
}

#[derive(Deserialize)]
struct OllamaResponseMessage {
    #[serde(default)]
    content: String,
    #[serde(default)]
    tool_calls: Option<Vec<OllamaToolCall>>,
}

#[derive(Deserialize)]
struct OllamaToolCall {
    function: OllamaFunctionCall,
}

#[derive(Deserialize)]
struct OllamaFunctionCall {
    name: String,
    /// Ollama sends arguments as a JSON object, not an encoded string.
    arguments: Value,
}

#[derive(Serialize)]
struct OllamaEmbedRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct OllamaEmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

fn role_str(role: ChatRole) -> &'static str {
    match role {
        ChatRole::System => "system",
        ChatRole::User => "user",
        ChatRole::Assistant => "assistant",
        ChatRole::Tool => "tool",
    }
}

impl OllamaClient {
    pub fn new(base_url: String, model: String, embedding_model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            embedding_model,
        }
    }

    async fn post_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        payload: &T,
    ) -> Result<reqwest::Response> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(|e| AppError::Llm(format!("Ollama request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Llm(format!("Ollama API error {}: {}", status, body)));
        }

        Ok(response)
    }

    async fn completion(
        &self,
        messages: &[ChatMessage],
        tools: Option<Vec<OllamaTool<'_>>>,
    ) -> Result<LLMResponse> {
        let payload = OllamaChatRequest {
            model: &self.model,
            messages: messages
                .iter()
                .map(|m| OllamaMessage {
                    role: role_str(m.role),
                    content: m.content.clone(),
                })
                .collect(),
            stream: false,
            tools,
        };

        tracing::debug!(model = %self.model, messages = messages.len(), "ollama chat request");

        let body: OllamaChatResponse = self
            .post_json("/api/chat", &payload)
            .await?
            .json()
            .await
            .map_err(|e| AppError::Llm(format!("Malformed Ollama response: {}", e)))?;

        // Ollama tool calls carry no ids on the wire; synthesize them so
        // history records stay uniform across providers.
        let tool_calls = body
            .message
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .map(|call| ToolCall {
                id: format!("call_{}", uuid::Uuid::new_v4().simple()),
                name: call.function.name,
                arguments: call.function.arguments,
            })
            .collect();

        Ok(LLMResponse {
            content: body.message.content,
            tool_calls,
            finish_reason: body.done_reason.unwrap_or_else(|| "stop".to_string()),
        })
    }
}

#[async_trait]
impl LLMClient for OllamaClient {
    async fn chat(&self, messages: &[ChatMessage]) -> Result<String> {
        let response = self.completion(messages, None).await?;
        if response.content.is_empty() {
            return Err(AppError::Llm("Empty response from Ollama".to_string()));
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
            .map(|tool| OllamaTool {
                kind: "function",
                function: tool,
            })
            .collect();
        self.completion(messages, Some(wire_tools)).await
    }

    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let payload = OllamaEmbedRequest {
            model: &self.embedding_model,
            input: texts,
        };

        let body: OllamaEmbedResponse = self
            .post_json("/api/embed", &payload)
            .await?
            .json()
            .await
            .map_err(|e| AppError::Llm(format!("Malformed Ollama embed response: {}", e)))?;

        if body.embeddings.len() != texts.len() {
            return Err(AppError::Llm(format!(
                "Embedding count mismatch: sent {}, received {}",
                texts.len(),
                body.embeddings.len()
            )));
        }

        Ok(body.embeddings)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_shape() {
        let messages = vec![ChatMessage::system("sys"), ChatMessage::user("hi")];
        let payload = OllamaChatRequest {
            model: "llama3.2",
            messages: messages
                .iter()
                .map(|m| OllamaMessage {
                    role: role_str(m.role),
                    content: m.content.clone(),
                })
                .collect(),
            stream: false,
            tools: None,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["model"], "llama3.2");
        assert_eq!(json["stream"], false);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "hi");
        assert!(json.get("tools").is_none());
    }

    #[test]
    fn test_tool_call_arguments_are_objects() {
        let raw = r#"{
            "message": {
                "role": "assistant",
                "content": "",
                "tool_calls": [{"function": {"name": "get_weather", "arguments": {"city": "Oslo"}}}]
            },
            "done_reason": "stop"
        }"#;
        let body: OllamaChatResponse = serde_json::from_str(raw).unwrap();
        let calls = body.message.tool_calls.unwrap();
        assert_eq!(calls[0].function.name, "get_weather");
        assert_eq!(calls[0].function.arguments["city"], "Oslo");
    }
}
