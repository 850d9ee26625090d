//! # Caravel
//!
//! A retrieval-augmented assistant toolkit. Caravel covers four shapes of
//! LLM work over one small surface:
//!
//! 1. **Ask**: one-shot chat completions against a remote model
//! 2. **RAG**: chunk a local text corpus, embed it into an in-memory vector
//!    index, and answer questions from the retrieved context
//! 3. **Chat**: a multi-turn session where the model decides per turn whether
//!    to call a retrieval tool or answer directly, with append-only history
//!    keyed by thread id
//! 4. **Agent**: a bounded tool-calling loop over external APIs (weather,
//!    geocoding, driving time, encyclopedia summaries)
//!
//! ## Quick start (library usage)
//!
//! ```rust,ignore
//! use caravel::{Config, Provider, RagPipeline, TextChunker};
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() -> caravel::Result<()> {
//! let config = Config::from_env()?;
//! let llm: Arc<dyn caravel::LLMClient> = Provider::from_config(&config)?.create_client().into();
//!
//! let chunker = TextChunker::new(config.rag.chunk_size, config.rag.chunk_overlap)?;
//! let pipeline = RagPipeline::ingest(&config.rag.corpus_path, &chunker, llm, config.rag.top_k).await?;
//! println!("{}", pipeline.answer("is there a data scientist role?").await?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`llm`] - provider clients (OpenAI-compatible, Ollama)
//! - [`rag`] - chunking, in-memory vector index, retrieval, QA pipeline
//! - [`session`] - multi-turn conversation with tool-mediated retrieval
//! - [`tools`] - external-API tools and the tool registry
//! - [`agents`] - the request/act/observe agent loop
//! - [`cli`] - command-line surface
//! - [`types`] - common types and error handling

/// Tool-calling agent loop and canned tasks.
pub mod agents;
/// Command-line parsing and terminal output.
pub mod cli;
/// LLM provider clients and abstractions.
pub mod llm;
/// Retrieval Augmented Generation components.
pub mod rag;
/// Conversational sessions with tool-mediated retrieval.
pub mod session;
/// External-API tools and registry.
pub mod tools;
/// Core types (messages, chunks, errors).
pub mod types;
/// Configuration utilities.
pub mod utils;

pub use agents::ToolAgent;
pub use llm::{LLMClient, LLMResponse, Provider};
pub use rag::{RagPipeline, Retriever, TextChunker, VectorIndex};
pub use session::ChatSession;
pub use tools::ToolRegistry;
pub use types::{AppError, Result};
pub use utils::config::Config;
