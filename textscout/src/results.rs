use serde::{Serialize, Serializer};
use std::path::{Path, PathBuf};

use crate::errors::SearchError;

/// Occurrences of the search text found in a single file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileResult {
    /// The path to the file
    pub path: PathBuf,
    /// The search text, lowercased
    pub search_text: String,
    /// Number of non-overlapping, case-insensitive occurrences
    pub occurrences: usize,
}

impl FileResult {
    pub fn new(
        path: impl Into<PathBuf>,
        search_text: impl Into<String>,
        occurrences: usize,
    ) -> Self {
        Self {
            path: path.into(),
            search_text: search_text.into(),
            occurrences,
        }
    }
}

/// A file that could not be searched
#[derive(Debug, Serialize)]
pub struct FileFailure {
    pub path: PathBuf,
    #[serde(serialize_with = "serialize_error")]
    pub error: SearchError,
}

impl FileFailure {
    pub fn new(path: impl Into<PathBuf>, error: SearchError) -> Self {
        Self {
            path: path.into(),
            error,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn serialize_error<S: Serializer>(error: &SearchError, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}

/// Represents the complete outcome of one search run
#[derive(Debug, Default, Serialize)]
pub struct SearchReport {
    /// Per-file results, ranked by occurrence count
    pub results: Vec<FileResult>,
    /// Files that failed to open or decode
    pub failures: Vec<FileFailure>,
    /// Number of files that matched the extension filter
    pub files_discovered: usize,
    /// Sum of occurrences over all results
    pub total_occurrences: usize,
}

impl SearchReport {
    /// Creates a new empty report
    pub fn new() -> Self {
        Default::default()
    }

    /// Builds a report from unranked results, ranking them on the way in
    pub fn from_parts(
        results: Vec<FileResult>,
        failures: Vec<FileFailure>,
        files_discovered: usize,
    ) -> Self {
        let total_occurrences = results.iter().map(|r| r.occurrences).sum();
        Self {
            results: rank(results),
            failures,
            files_discovered,
            total_occurrences,
        }
    }

    /// True when discovery found no candidate file at all
    pub fn no_files_found(&self) -> bool {
        self.files_discovered == 0
    }

    /// Number of ranked results with at least one occurrence
    pub fn files_with_occurrences(&self) -> usize {
        self.results.iter().filter(|r| r.occurrences > 0).count()
    }
}

/// Sorts results by occurrence count, highest first.
///
/// The sort is stable: results with equal counts keep the order in which the
/// dispatcher produced them. Zero-count results stay in the list.
pub fn rank(mut results: Vec<FileResult>) -> Vec<FileResult> {
    results.sort_by(|a, b| b.occurrences.cmp(&a.occurrences));
    results
}
