/// Error types for textscout.
///
/// Errors fall into two groups. Configuration errors (`InvalidDirectory`,
/// `EmptySearchText`, `NoExtensions`, `ConfigError`) are raised before any file
/// is touched and abort the run. File errors (`FileNotFound`,
/// `PermissionDenied`, `IoError`, `EncodingError`) belong to a single search
/// task; the dispatcher records them per file and, under the default failure
/// policy, keeps going.
///
/// ```rust,ignore
/// match textscout::search(&config) {
///     Ok(report) => // render report.results,
///     Err(SearchError::InvalidDirectory(path)) => // tell the user,
///     Err(e) => // anything else
/// }
/// ```
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::results::FileFailure;

/// Result type for search operations
pub type SearchResult<T> = Result<T, SearchError>;

/// Errors that can occur during search operations
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Given directory path '{0}' is not a directory")]
    InvalidDirectory(PathBuf),
    #[error("Given text to be searched: '{0}' is blank")]
    EmptySearchText(String),
    #[error("No file extensions given, at least one extension is required")]
    NoExtensions,
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Invalid UTF-8 in file {path}: {source}")]
    EncodingError {
        path: PathBuf,
        source: std::str::Utf8Error,
    },
    #[error("Failed to build worker pool: {0}")]
    ThreadPool(String),
    #[error("{} of the searched files could not be processed", .0.len())]
    Aggregate(Vec<FileFailure>),
}

impl SearchError {
    pub fn invalid_directory(path: impl Into<PathBuf>) -> Self {
        Self::InvalidDirectory(path.into())
    }

    pub fn empty_search_text(text: impl Into<String>) -> Self {
        Self::EmptySearchText(text.into())
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound(path.into())
    }

    pub fn permission_denied(path: impl Into<PathBuf>) -> Self {
        Self::PermissionDenied(path.into())
    }

    pub fn encoding_error(path: impl Into<PathBuf>, source: std::str::Utf8Error) -> Self {
        Self::EncodingError {
            path: path.into(),
            source,
        }
    }

    pub fn thread_pool(msg: impl Into<String>) -> Self {
        Self::ThreadPool(msg.into())
    }

    /// Maps an I/O error raised while opening or reading `path` onto the
    /// matching variant.
    pub fn from_io(path: &Path, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::file_not_found(path),
            std::io::ErrorKind::PermissionDenied => Self::permission_denied(path),
            _ => Self::IoError(err),
        }
    }

    /// True for errors detected while validating the configuration
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidDirectory(_)
                | Self::EmptySearchText(_)
                | Self::NoExtensions
                | Self::ConfigError(_)
        )
    }
}

impl From<::config::ConfigError> for SearchError {
    fn from(err: ::config::ConfigError) -> Self {
        Self::ConfigError(err.to_string())
    }
}
