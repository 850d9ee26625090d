//! Retrieval Augmented Generation components.
//!
//! The pipeline follows the index -> retrieve -> generate shape:
//!
//! 1. [`loader`] reads a plain-text corpus from disk
//! 2. [`chunker`] splits it into overlapping character windows
//! 3. [`retriever`] embeds every chunk once into an in-memory [`index`]
//! 4. [`pipeline`] retrieves the top-k chunks for a question and issues one
//!    completion against the fixed QA template

pub mod chunker;
pub mod index;
pub mod loader;
pub mod pipeline;
pub mod retriever;

pub use chunker::TextChunker;
pub use index::VectorIndex;
pub use pipeline::RagPipeline;
pub use retriever::Retriever;
