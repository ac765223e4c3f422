//! File-based status source.
//!
//! Reads a saved copy of the status page from disk.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use simwatch_adapters::AdapterError;

use super::StatusSource;

/// A source that reads the status page from an HTML file.
///
/// Useful for replaying a captured page, or for evaluating a page fetched
/// by some other tool. The file is re-read on every fetch.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    description: String,
}

impl FileSource {
    /// Create a new file source for the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = format!("file: {}", path.display());
        Self { path, description }
    }

    /// Returns the path being read.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl StatusSource for FileSource {
    async fn fetch(&self) -> Result<String, AdapterError> {
        Ok(tokio::fs::read_to_string(&self.path).await?)
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_file_source_new() {
        let source = FileSource::new("/tmp/status.html");
        assert_eq!(source.path(), Path::new("/tmp/status.html"));
        assert_eq!(source.description(), "file: /tmp/status.html");
    }

    #[tokio::test]
    async fn test_file_source_reads_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"<td id="l1_gsm_sim">Y</td>"#).unwrap();

        let source = FileSource::new(file.path());

        assert_eq!(source.fetch().await.unwrap(), r#"<td id="l1_gsm_sim">Y</td>"#);
    }

    #[tokio::test]
    async fn test_file_source_rereads_on_each_fetch() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "first").unwrap();
        let source = FileSource::new(file.path());
        assert_eq!(source.fetch().await.unwrap(), "first");

        std::fs::write(file.path(), "second").unwrap();
        assert_eq!(source.fetch().await.unwrap(), "second");
    }

    #[tokio::test]
    async fn test_file_source_missing_file() {
        let source = FileSource::new("/nonexistent/path/status.html");

        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, AdapterError::Io(_)));
        assert!(err.to_string().contains("I/O error"));
    }
}
