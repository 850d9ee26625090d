//! LLM client abstraction and provider selection.

use crate::types::{AppError, ChatMessage, Result, ToolCall, ToolDefinition};
use crate::utils::config::Config;
use async_trait::async_trait;

/// Generic LLM client trait for provider abstraction.
///
/// All providers implement this trait, allowing the RAG pipeline, session
/// loop, and agent to swap providers without code changes. Every call is a
/// single blocking request from the caller's point of view: a failed network
/// call surfaces as [`AppError::Llm`] and aborts the current operation.
#[async_trait]
pub trait LLMClient: Send + Sync {
    /// Request one completion for a conversation.
    async fn chat(&self, messages: &[ChatMessage]) -> Result<String>;

    /// Request a completion with tool definitions attached. The model may
    /// answer directly or request tool invocations.
    async fn chat_with_tools(
        &self,
        messages: &[ChatMessage],
        tools: &[ToolDefinition],
    ) -> Result<LLMResponse>;

    /// Embed each input text into a dense vector.
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// The model name/identifier used for completions.
    fn model_name(&self) -> &str;
}

/// Response from a completion request that had tools attached.
#[derive(Debug, Clone)]
pub struct LLMResponse {
    /// Text content of the response (may be empty when tools are called).
    pub content: String,
    /// Tool invocations requested by the model.
    pub tool_calls: Vec<ToolCall>,
    /// Why generation stopped (e.g. "stop", "tool_calls").
    pub finish_reason: String,
}

impl LLMResponse {
    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls.is_empty()
    }
}

/// Provider enum for runtime selection.
#[derive(Debug, Clone)]
pub enum Provider {
    /// OpenAI API (or any compatible endpoint).
    OpenAI {
        api_key: String,
        api_base: String,
        model: String,
        embedding_model: String,
    },

    /// Ollama local inference server.
    Ollama {
        base_url: String,
        model: String,
        embedding_model: String,
    },
}

impl Provider {
    /// Build a provider from configuration.
    ///
    /// # Errors
    ///
    /// Returns a Config error when the configured provider name is unknown or
    /// when the OpenAI provider is selected without an API key.
    pub fn from_config(config: &Config) -> Result<Self> {
        match config.llm.provider.as_str() {
            "openai" => {
                let api_key = config
                    .llm
                    .openai_api_key
                    .clone()
                    .ok_or_else(|| AppError::Config("OPENAI_API_KEY is not set".to_string()))?;
                Ok(Provider::OpenAI {
                    api_key,
                    api_base: config.llm.openai_api_base.clone(),
                    model: config.llm.model.clone(),
                    embedding_model: config.llm.embedding_model.clone(),
                })
            }
            "ollama" => Ok(Provider::Ollama {
                base_url: config.llm.ollama_url.clone(),
                model: config.llm.model.clone(),
                embedding_model: config.llm.embedding_model.clone(),
            }),
            other => Err(AppError::Config(format!("Unknown provider: {}", other))),
        }
    }

    /// Create a client instance for this provider.
    pub fn create_client(&self) -> Box<dyn LLMClient> {
        match self {
            Provider::OpenAI {
                api_key,
                api_base,
                model,
                embedding_model,
            } => Box::new(super::openai::OpenAIClient::new(
                api_key.clone(),
                api_base.clone(),
                model.clone(),
                embedding_model.clone(),
            )),
            Provider::Ollama {
                base_url,
                model,
                embedding_model,
            } => Box::new(super::ollama::OllamaClient::new(
                base_url.clone(),
                model.clone(),
                embedding_model.clone(),
            )),
        }
    }

    /// Human-readable provider name.
    pub fn name(&self) -> &'static str {
        match self {
            Provider::OpenAI { .. } => "OpenAI",
            Provider::Ollama { .. } => "Ollama",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::config::{LlmConfig, RagConfig, ToolsConfig};

    fn test_config(provider: &str, api_key: Option<&str>) -> Config {
        Config {
            llm: LlmConfig {
                provider: provider.to_string(),
                model: "test-model".to_string(),
                embedding_model: "test-embed".to_string(),
                openai_api_key: api_key.map(|k| k.to_string()),
                openai_api_base: "https://api.openai.com/v1".to_string(),
                ollama_url: "http://localhost:11434".to_string(),
            },
            rag: RagConfig {
                corpus_path: "data/job_listings.txt".to_string(),
                chunk_size: 200,
                chunk_overlap: 10,
                top_k: 4,
            },
            tools: ToolsConfig {
                openweather_api_key: None,
                google_maps_api_key: None,
                weather_base_url: "https://api.openweathermap.org".to_string(),
                maps_base_url: "https://maps.googleapis.com".to_string(),
                wiki_base_url: "https://en.wikipedia.org".to_string(),
            },
        }
    }

    #[test]
    fn test_provider_from_config_openai() {
        let provider = Provider::from_config(&test_config("openai", Some("sk-test"))).unwrap();
        assert_eq!(provider.name(), "OpenAI");
    }

    #[test]
    fn test_provider_requires_openai_key() {
        let result = Provider::from_config(&test_config("openai", None));
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_provider_from_config_ollama() {
        let provider = Provider::from_config(&test_config("ollama", None)).unwrap();
        assert_eq!(provider.name(), "Ollama");
    }

    #[test]
    fn test_unknown_provider_rejected() {
        let result = Provider::from_config(&test_config("anthropic", None));
        assert!(matches!(result, Err(AppError::Config(_))));
    }
}
