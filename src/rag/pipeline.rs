use crate::llm::LLMClient;
use crate::rag::chunker::TextChunker;
use crate::rag::loader;
use crate::rag::retriever::Retriever;
use crate::types::{ChatMessage, Result, ScoredChunk};
use std::path::Path;
use std::sync::Arc;

/// QA prompt for single-shot retrieval-augmented answering. The "say you
/// don't know" instruction is enforced only by wording, not programmatically.
const QA_TEMPLATE: &str = "Use the following pieces of context to answer the question at the end.\n\
If you don't know the answer, just say you don't know, don't try to make up an answer.\n\n\
{context}\n\n\
Question: {question}\n\
Helpful Answer:";

/// Single-shot retrieve-then-generate pipeline over one corpus file.
pub struct RagPipeline {
    retriever: Retriever,
    llm: Arc<dyn LLMClient>,
    top_k: usize,
}

impl RagPipeline {
    /// Load the corpus, split it, and embed every chunk once.
    pub async fn ingest(
        corpus_path: impl AsRef<Path>,
        chunker: &TextChunker,
        llm: Arc<dyn LLMClient>,
        top_k: usize,
    ) -> Result<Self> {
        let path = corpus_path.as_ref();
        let text = loader::load_corpus(path)?;
        let source = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let chunks = chunker.split(&text, &source);

        let mut retriever = Retriever::new(Arc::clone(&llm));
        retriever.index_chunks(chunks).await?;

        Ok(Self {
            retriever,
            llm,
            top_k,
        })
    }

    /// Retrieval only: the k nearest chunks for a query.
    pub async fn search(&self, query: &str, k: usize) -> Result<Vec<ScoredChunk>> {
        self.retriever.retrieve(query, k).await
    }

    /// Retrieve context for the question and issue one completion against the
    /// QA template. Chunk contents are joined with blank-line separators.
    pub async fn answer(&self, question: &str) -> Result<String> {
        let retrieved = self.retriever.retrieve(question, self.top_k).await?;
        let context = retrieved
            .iter()
            .map(|s| s.chunk.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");

        let prompt = QA_TEMPLATE
            .replace("{context}", &context)
            .replace("{question}", question);

        tracing::info!(question = %question, context_chunks = retrieved.len(), "answering");
        self.llm.chat(&[ChatMessage::user(prompt)]).await
    }

    pub fn retriever(&self) -> &Retriever {
        &self.retriever
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::LLMResponse;
    use crate::types::{AppError, ToolDefinition};
    use async_trait::async_trait;
    use std::io::Write;
    use std::sync::Mutex;

    /// Embeds texts onto fixed axes by keyword and records chat prompts.
    struct MockLLM {
        prompts: Mutex<Vec<String>>,
    }

    impl MockLLM {
        fn new() -> Self {
            Self {
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn embed_one(text: &str) -> Vec<f32> {
            // "rust" and "cooking" map to orthogonal directions.
            let rust = text.to_lowercase().contains("rust") as u8 as f32;
            let cooking = text.to_lowercase().contains("cooking") as u8 as f32;
            vec![rust, cooking, 0.1]
        }
    }

    #[async_trait]
    impl LLMClient for MockLLM {
        async fn chat(&self, messages: &[ChatMessage]) -> crate::types::Result<String> {
            self.prompts
                .lock()
                .unwrap()
                .push(messages.last().unwrap().content.clone());
            Ok("the answer".to_string())
        }

        async fn chat_with_tools(
            &self,
            _: &[ChatMessage],
            _: &[ToolDefinition],
        ) -> crate::types::Result<LLMResponse> {
            Err(AppError::Internal("not used".to_string()))
        }

        async fn embed(&self, texts: &[String]) -> crate::types::Result<Vec<Vec<f32>>> {
            Ok(texts.iter().map(|t| Self::embed_one(t)).collect())
        }

        fn model_name(&self) -> &str {
            "mock"
        }
    }

    fn corpus_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[tokio::test]
    async fn test_answer_injects_retrieved_context() {
        let file = corpus_file("rust systems engineer wanted. cooking instructor wanted.");
        let chunker = TextChunker::new(30, 5).unwrap();
        let llm = Arc::new(MockLLM::new());

        let pipeline = RagPipeline::ingest(file.path(), &chunker, llm.clone(), 1)
            .await
            .unwrap();
        let answer = pipeline.answer("any rust roles?").await.unwrap();
        assert_eq!(answer, "the answer");

        let prompts = llm.prompts.lock().unwrap();
        let prompt = &prompts[0];
        assert!(prompt.contains("Question: any rust roles?"));
        assert!(prompt.contains("rust"));
        assert!(prompt.contains("just say you don't know"));
    }

    #[tokio::test]
    async fn test_search_returns_at_most_k_indexed_chunks() {
        let file = corpus_file(&"rust and cooking jobs. ".repeat(10));
        let chunker = TextChunker::new(40, 8).unwrap();
        let llm = Arc::new(MockLLM::new());

        let pipeline = RagPipeline::ingest(file.path(), &chunker, llm, 2).await.unwrap();
        let total = pipeline.retriever().indexed_chunks();
        assert!(total > 3);

        let results = pipeline.search("rust", 3).await.unwrap();
        assert_eq!(results.len(), 3);

        let results = pipeline.search("rust", total + 10).await.unwrap();
        assert_eq!(results.len(), total);
    }

    #[tokio::test]
    async fn test_missing_corpus_is_fatal() {
        let chunker = TextChunker::new(200, 10).unwrap();
        let llm: Arc<dyn LLMClient> = Arc::new(MockLLM::new());
        let result = RagPipeline::ingest("missing.txt", &chunker, llm, 2).await;
        assert!(matches!(result, Err(AppError::Io(_))));
    }
}
