use std::path::{Path, PathBuf};
use tracing::trace;

use super::counter::count_occurrences;
use super::reader::FileReader;
use crate::errors::SearchResult;
use crate::results::FileResult;

/// Joins the lines of `content` with single spaces, dropping `\n` and
/// `\r\n` terminators, so a match may span a line break
pub fn join_lines(content: &str) -> String {
    content.lines().collect::<Vec<_>>().join(" ")
}

/// One unit of work: a file and the text to count in it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTask {
    path: PathBuf,
    search_text: String,
}

impl SearchTask {
    pub fn new(path: impl Into<PathBuf>, search_text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            search_text: search_text.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    /// Reads the file and counts the search text in it.
    ///
    /// Consumes the task, so it runs at most once.
    pub fn execute(self, reader: &FileReader) -> SearchResult<FileResult> {
        trace!("Searching file: {}", self.path.display());
        let contents = reader.read_to_string(&self.path)?;
        let occurrences = count_occurrences(&join_lines(&contents), &self.search_text);

        trace!(
            "Found {} occurrences in {}",
            occurrences,
            self.path.display()
        );
        Ok(FileResult {
            path: self.path,
            search_text: self.search_text.to_lowercase(),
            occurrences,
        })
    }
}
