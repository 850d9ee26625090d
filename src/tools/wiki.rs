use crate::tools::registry::Tool;
use crate::types::Result;
use async_trait::async_trait;
use serde_json::{json, Value};

/// Encyclopedia summary lookup via the Wikipedia REST API.
pub struct WikiSummaryTool {
    client: reqwest::Client,
    base_url: String,
}

impl WikiSummaryTool {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Returns up to three sentences about the place, or a not-found string.
    pub async fn lookup(&self, place: &str) -> String {
        let not_found = format!("No Wikipedia info found for {}.", place);
        let title = place.trim().replace(' ', "_");
        if title.is_empty() {
            return not_found;
        }

        let url = format!("{}/api/rest_v1/page/summary/{}", self.base_url, title);
        let response = match self.client.get(&url).send().await {
            Ok(response) if response.status().is_success() => response,
            _ => return not_found,
        };

        let data: Value = match response.json().await {
            Ok(data) => data,
            Err(_) => return not_found,
        };

        match data["extract"].as_str() {
            Some(extract) if !extract.is_empty() => first_sentences(extract, 3),
            _ => not_found,
        }
    }
}

/// Take up to `n` sentences, splitting on terminal punctuation.
fn first_sentences(text: &str, n: usize) -> String {
    let mut taken = 0;
    let mut end = text.len();

    for (i, c) in text.char_indices() {
        if matches!(c, '.' | '!' | '?') {
            let rest = &text[i + c.len_utf8()..];
            if rest.is_empty() || rest.starts_with(' ') || rest.starts_with('\n') {
                taken += 1;
                if taken == n {
                    end = i + c.len_utf8();
                    break;
                }
            }
        }
    }

    text[..end].trim().to_string()
}

#[async_trait]
impl Tool for WikiSummaryTool {
    fn name(&self) -> &str {
        "wiki_summary"
    }

    fn description(&self) -> &str {
        "Get a 3-sentence Wikipedia summary for a place."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "place": { "type": "string", "description": "Place or attraction name" }
            },
            "required": ["place"]
        })
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let place = args["place"].as_str().unwrap_or_default();
        Ok(json!(self.lookup(place).await))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_sentences_truncates() {
        let text = "One. Two. Three. Four. Five.";
        assert_eq!(first_sentences(text, 3), "One. Two. Three.");
    }

    #[test]
    fn test_first_sentences_shorter_text() {
        assert_eq!(first_sentences("Only one sentence.", 3), "Only one sentence.");
        assert_eq!(first_sentences("No terminator at all", 3), "No terminator at all");
    }

    #[test]
    fn test_first_sentences_mixed_terminators() {
        let text = "What a place! It sits on two islands. Visitors love it? More text here.";
        assert_eq!(
            first_sentences(text, 3),
            "What a place! It sits on two islands. Visitors love it?"
        );
    }

    #[test]
    fn test_first_sentences_ignores_dots_without_space() {
        let text = "Version 2.5 of the guide covers it. Second sentence. Third.";
        assert_eq!(
            first_sentences(text, 2),
            "Version 2.5 of the guide covers it. Second sentence."
        );
    }

    #[tokio::test]
    async fn test_empty_place_degrades() {
        let tool = WikiSummaryTool::new("http://localhost:1");
        assert_eq!(tool.lookup("").await, "No Wikipedia info found for .");
    }
}
