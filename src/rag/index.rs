use crate::types::{AppError, Chunk, Result, ScoredChunk};

/// In-memory vector index over chunks.
///
/// Append-only: entries are added once at startup and never mutated. Lookup
/// is cosine similarity over a linear scan, which is plenty for corpora that
/// are rebuilt fresh each run.
#[derive(Default)]
pub struct VectorIndex {
    entries: Vec<(Chunk, Vec<f32>)>,
}

impl VectorIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a chunk with its embedding. Each chunk has exactly one embedding.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the embedding dimensionality does not
    /// match earlier entries, or when the embedding is empty.
    pub fn add(&mut self, chunk: Chunk, embedding: Vec<f32>) -> Result<()> {
        if embedding.is_empty() {
            return Err(AppError::InvalidInput("embedding must not be empty".to_string()));
        }
        if let Some((_, first)) = self.entries.first() {
            if first.len() != embedding.len() {
                return Err(AppError::InvalidInput(format!(
                    "embedding dimension mismatch: index has {}, got {}",
                    first.len(),
                    embedding.len()
                )));
            }
        }
        self.entries.push((chunk, embedding));
        Ok(())
    }

    /// Return up to `k` chunks ordered by descending cosine similarity to the
    /// query embedding. Ties are broken arbitrarily.
    pub fn search(&self, query: &[f32], k: usize) -> Vec<ScoredChunk> {
        let mut scored: Vec<ScoredChunk> = self
            .entries
            .iter()
            .map(|(chunk, embedding)| ScoredChunk {
                chunk: chunk.clone(),
                score: cosine_similarity(query, embedding),
            })
            .collect();

        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(k);
        scored
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Cosine similarity in [-1, 1]; 0.0 when either vector has zero norm.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = (norm_a * norm_b).sqrt();
    if denom == 0.0 {
        0.0
    } else {
        dot / denom
    }
}
