use crate::types::{AppError, Chunk, Result};

/// Splits text into fixed-size character windows with a configured overlap.
///
/// Consecutive chunks share exactly `chunk_overlap` characters (the last
/// chunk may be shorter than `chunk_size`). The windows cover the input with
/// no gaps, so concatenating the first chunk with every later chunk minus its
/// leading overlap reconstructs the input exactly.
pub struct TextChunker {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl TextChunker {
    /// # Errors
    ///
    /// Returns `InvalidInput` unless `0 < chunk_size` and
    /// `chunk_overlap < chunk_size`.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(AppError::InvalidInput("chunk_size must be positive".to_string()));
        }
        if chunk_overlap >= chunk_size {
            return Err(AppError::InvalidInput(format!(
                "chunk_overlap ({}) must be smaller than chunk_size ({})",
                chunk_overlap, chunk_size
            )));
        }
        Ok(Self {
            chunk_size,
            chunk_overlap,
        })
    }

    /// Split `text` into ordered chunks. Offsets are in characters from the
    /// start of the input.
    pub fn split(&self, text: &str, source: &str) -> Vec<Chunk> {
        let chars: Vec<char> = text.chars().collect();
        if chars.is_empty() {
            return Vec::new();
        }

        let step = self.chunk_size - self.chunk_overlap;
        let mut chunks = Vec::new();
        let mut start = 0;

        loop {
            let end = (start + self.chunk_size).min(chars.len());
            let text: String = chars[start..end].iter().collect();
            chunks.push(Chunk::new(text, source, start));
            if end == chars.len() {
                break;
            }
            start += step;
        }

        tracing::debug!(
            chunks = chunks.len(),
            chunk_size = self.chunk_size,
            chunk_overlap = self.chunk_overlap,
            "split corpus"
        );
        chunks
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn chunk_overlap(&self) -> usize {
        self.chunk_overlap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reconstruct(chunks: &[Chunk], overlap: usize) -> String {
        let mut text = String::new();
        for (i, chunk) in chunks.iter().enumerate() {
            if i == 0 {
                text.push_str(&chunk.text);
            } else {
                text.extend(chunk.text.chars().skip(overlap));
            }
        }
        text
    }

    #[test]
    fn test_overlap_must_be_smaller_than_size() {
        assert!(TextChunker::new(200, 200).is_err());
        assert!(TextChunker::new(200, 250).is_err());
        assert!(TextChunker::new(0, 0).is_err());
        assert!(TextChunker::new(200, 10).is_ok());
    }

    #[test]
    fn test_450_chars_at_200_10_yields_three_chunks() {
        let text: String = std::iter::repeat('x').take(450).collect();
        let chunker = TextChunker::new(200, 10).unwrap();
        let chunks = chunker.split(&text, "corpus.txt");

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].text.chars().count(), 200);
        assert_eq!(chunks[1].text.chars().count(), 200);
        assert!(chunks[2].text.chars().count() <= 200);
        assert_eq!(reconstruct(&chunks, 10), text);
    }

    #[test]
    fn test_chunks_start_within_overlap_of_previous_end() {
        let text: String = "abcdefghij".repeat(100);
        let chunker = TextChunker::new(128, 16).unwrap();
        let chunks = chunker.split(&text, "corpus.txt");

        for pair in chunks.windows(2) {
            let prev_end = pair[0].offset + pair[0].text.chars().count();
            assert!(pair[1].offset <= prev_end);
            assert!(prev_end - pair[1].offset <= 16);
        }
    }

    #[test]
    fn test_reconstruction_exact() {
        let text = "The quick brown fox jumps over the lazy dog. ".repeat(20);
        let chunker = TextChunker::new(100, 25).unwrap();
        let chunks = chunker.split(&text, "corpus.txt");
        assert_eq!(reconstruct(&chunks, 25), text);
    }

    #[test]
    fn test_multibyte_text() {
        let text = "héllø wörld ".repeat(40);
        let chunker = TextChunker::new(50, 5).unwrap();
        let chunks = chunker.split(&text, "corpus.txt");
        assert_eq!(reconstruct(&chunks, 5), text);
        for chunk in &chunks {
            assert!(chunk.text.chars().count() <= 50);
        }
    }

    #[test]
    fn test_short_text_single_chunk() {
        let chunker = TextChunker::new(200, 10).unwrap();
        let chunks = chunker.split("short", "corpus.txt");
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "short");
        assert_eq!(chunks[0].offset, 0);
    }

    #[test]
    fn test_empty_text() {
        let chunker = TextChunker::new(200, 10).unwrap();
        assert!(chunker.split("", "corpus.txt").is_empty());
    }
}
