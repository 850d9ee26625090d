use crate::types::{AppError, Result};
use std::env;
use std::str::FromStr;

/// Application configuration, loaded once at startup from the process
/// environment (with `.env` support via dotenvy).
#[derive(Debug, Clone)]
pub struct Config {
    pub llm: LlmConfig,
    pub rag: RagConfig,
    pub tools: ToolsConfig,
}

#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Which provider to use: "openai" or "ollama".
    pub provider: String,
    pub model: String,
    pub embedding_model: String,
    pub openai_api_key: Option<String>,
    pub openai_api_base: String,
    pub ollama_url: String,
}

#[derive(Debug, Clone)]
pub struct RagConfig {
    pub corpus_path: String,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub top_k: usize,
}

#[derive(Debug, Clone)]
pub struct ToolsConfig {
    pub openweather_api_key: Option<String>,
    pub google_maps_api_key: Option<String>,
    /// Base URLs are override-able so tests can point tools at a mock server.
    pub weather_base_url: String,
    pub maps_base_url: String,
    pub wiki_base_url: String,
}

fn parse_var<T: FromStr>(key: &str, default: T) -> Result<T> {
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| AppError::Config(format!("{} is not a valid value for {}", raw, key))),
        Err(_) => Ok(default),
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Config {
            llm: LlmConfig {
                provider: env::var("CARAVEL_PROVIDER").unwrap_or_else(|_| "openai".to_string()),
                model: env::var("CARAVEL_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
                embedding_model: env::var("CARAVEL_EMBEDDING_MODEL")
                    .unwrap_or_else(|_| "text-embedding-3-large".to_string()),
                openai_api_key: env::var("OPENAI_API_KEY").ok(),
                openai_api_base: env::var("OPENAI_API_BASE")
                    .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
                ollama_url: env::var("OLLAMA_URL")
                    .unwrap_or_else(|_| "http://localhost:11434".to_string()),
            },
            rag: RagConfig {
                corpus_path: env::var("CARAVEL_CORPUS")
                    .unwrap_or_else(|_| "data/job_listings.txt".to_string()),
                chunk_size: parse_var("CARAVEL_CHUNK_SIZE", 200)?,
                chunk_overlap: parse_var("CARAVEL_CHUNK_OVERLAP", 10)?,
                top_k: parse_var("CARAVEL_TOP_K", 4)?,
            },
            tools: ToolsConfig {
                openweather_api_key: env::var("OPENWEATHER_API_KEY").ok(),
                google_maps_api_key: env::var("GOOGLE_MAPS_API_KEY").ok(),
                weather_base_url: env::var("CARAVEL_WEATHER_BASE_URL")
                    .unwrap_or_else(|_| "https://api.openweathermap.org".to_string()),
                maps_base_url: env::var("CARAVEL_MAPS_BASE_URL")
                    .unwrap_or_else(|_| "https://maps.googleapis.com".to_string()),
                wiki_base_url: env::var("CARAVEL_WIKI_BASE_URL")
                    .unwrap_or_else(|_| "https://en.wikipedia.org".to_string()),
            },
        })
    }
}
