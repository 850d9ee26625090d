use crate::types::Result;
use std::path::Path;

/// Read a UTF-8 corpus file from disk.
///
/// A missing or unreadable file is fatal (propagated as an I/O error, no
/// retry).
pub fn load_corpus(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    tracing::info!(path = %path.display(), bytes = text.len(), "loaded corpus");
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_corpus() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "data engineer role in Oslo").unwrap();
        let text = load_corpus(file.path()).unwrap();
        assert_eq!(text, "data engineer role in Oslo");
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let result = load_corpus("no/such/corpus.txt");
        assert!(matches!(result, Err(crate::types::AppError::Io(_))));
    }
}
