use crate::llm::LLMClient;
use crate::rag::index::VectorIndex;
use crate::types::{Chunk, Result, ScoredChunk};
use std::sync::Arc;

/// Embeds chunks into a [`VectorIndex`] and answers nearest-neighbor queries.
///
/// Embeddings come from the remote model API via [`LLMClient::embed`]; an
/// embedding failure fails the whole operation (no retry).
pub struct Retriever {
    index: VectorIndex,
    llm: Arc<dyn LLMClient>,
}

impl Retriever {
    pub fn new(llm: Arc<dyn LLMClient>) -> Self {
        Self {
            index: VectorIndex::new(),
            llm,
        }
    }

    /// Embed every chunk once and add it to the index. Returns the number of
    /// chunks indexed.
    pub async fn index_chunks(&mut self, chunks: Vec<Chunk>) -> Result<usize> {
        if chunks.is_empty() {
            return Ok(0);
        }

        let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
        let embeddings = self.llm.embed(&texts).await?;

        for (chunk, embedding) in chunks.into_iter().zip(embeddings) {
            self.index.add(chunk, embedding)?;
        }

        tracing::info!(indexed = self.index.len(), "indexed corpus chunks");
        Ok(self.index.len())
    }

    /// Embed the query and return the k most similar chunks.
    pub async fn retrieve(&self, query: &str, k: usize) -> Result<Vec<ScoredChunk>> {
        let embeddings = self.llm.embed(&[query.to_string()]).await?;
        let query_embedding = embeddings
            .into_iter()
            .next()
            .ok_or_else(|| crate::types::AppError::Llm("No query embedding returned".to_string()))?;

        let results = self.index.search(&query_embedding, k);
        tracing::debug!(query = %query, k, hits = results.len(), "retrieval");
        Ok(results)
    }

    pub fn indexed_chunks(&self) -> usize {
        self.index.len()
    }
}
