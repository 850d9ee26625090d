//! LLM provider clients and abstractions.
//!
//! All remote model access goes through the [`LLMClient`] trait: chat
//! completions, chat with tool definitions, and text embeddings. Two
//! providers are implemented, both speaking JSON over HTTP:
//!
//! - [`openai`] - OpenAI API and compatible endpoints
//! - [`ollama`] - Local inference via an Ollama server

pub mod client;
/// Ollama client (local inference).
pub mod ollama;
/// OpenAI client (remote API).
pub mod openai;

pub use client::{LLMClient, LLMResponse, Provider};
pub use ollama::OllamaClient;
pub use openai::OpenAIClient;
