use config::{Config as ConfigBuilder, File};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::errors::{SearchError, SearchResult};

/// Configuration for a search run.
///
/// # Configuration Locations
///
/// Values can be loaded from several files, later ones overriding earlier ones:
/// 1. Global `$HOME/.config/textscout/config.yaml`
/// 2. Local `.textscout.yaml` in the current directory
/// 3. Custom config file specified via `--config`
///
/// # Configuration Format
///
/// ```yaml
/// # Directory to search
/// root_path: "docs"
///
/// # Literal text, matched case-insensitively
/// search_text: "hello"
///
/// # Extensions to include, leading dot optional
/// file_extensions:
///   - "txt"
///   - "md"
///
/// # Paths to skip (glob syntax)
/// ignore_patterns:
///   - "**/node_modules/**"
///
/// # Worker threads (default: CPU cores)
/// thread_count: 4
///
/// # How to treat invalid UTF-8 (failfast, lossy)
/// encoding_mode: failfast
///
/// # What a failed file does to the run (isolate, failfast)
/// failure_policy: isolate
///
/// # Log level (trace, debug, info, warn, error)
/// log_level: "warn"
/// ```
///
/// Command-line arguments take precedence over file values, see
/// [`SearchConfig::merge_with_cli`]. Nothing is checked while loading;
/// [`SearchConfig::validate`] runs once right before a search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Root directory to start search from
    #[serde(default = "default_root_path")]
    pub root_path: PathBuf,

    /// The literal text to count
    #[serde(default)]
    pub search_text: String,

    /// File extensions to include (e.g., ["txt", "csv"])
    #[serde(default)]
    pub file_extensions: Vec<String>,

    /// Patterns to ignore (supports glob syntax)
    #[serde(default)]
    pub ignore_patterns: Vec<String>,

    /// Number of worker threads used by the dispatcher
    #[serde(default = "default_thread_count")]
    pub thread_count: NonZeroUsize,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// How to handle invalid UTF-8 in searched files
    #[serde(default)]
    pub encoding_mode: EncodingMode,

    /// What happens to the run when a single file fails
    #[serde(default)]
    pub failure_policy: FailurePolicy,
}

/// How to handle files that are not valid UTF-8
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncodingMode {
    /// Reject the file with an encoding error
    #[default]
    FailFast,
    /// Replace invalid sequences with U+FFFD and keep going
    Lossy,
}

/// What the dispatcher does when a search task fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Record the failure for that file and report every other file
    #[default]
    Isolate,
    /// Wait for every task, then fail the run if any task failed
    FailFast,
}

/// Values given on the command line.
///
/// `None` and empty lists mean the flag was absent, so the file value stays.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliOverrides {
    pub root_path: Option<PathBuf>,
    pub search_text: Option<String>,
    pub file_extensions: Vec<String>,
    pub ignore_patterns: Vec<String>,
    pub thread_count: Option<NonZeroUsize>,
    pub log_level: Option<String>,
    pub encoding_mode: Option<EncodingMode>,
    pub failure_policy: Option<FailurePolicy>,
}

fn default_root_path() -> PathBuf {
    PathBuf::from(".")
}

fn default_thread_count() -> NonZeroUsize {
    NonZeroUsize::new(num_cpus::get()).unwrap_or(NonZeroUsize::MIN)
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            root_path: default_root_path(),
            search_text: String::new(),
            file_extensions: Vec::new(),
            ignore_patterns: Vec::new(),
            thread_count: default_thread_count(),
            log_level: default_log_level(),
            encoding_mode: EncodingMode::default(),
            failure_policy: FailurePolicy::default(),
        }
    }
}

impl SearchConfig {
    /// Creates a configuration for the given directory, text and extensions
    pub fn new<I, S>(
        root_path: impl Into<PathBuf>,
        search_text: impl Into<String>,
        extensions: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            root_path: root_path.into(),
            search_text: search_text.into(),
            file_extensions: extensions.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Builder method to set the number of threads
    pub fn with_thread_count(mut self, count: NonZeroUsize) -> Self {
        self.thread_count = count;
        self
    }

    /// Builder method to set ignore patterns
    pub fn with_ignore_patterns(mut self, patterns: Vec<String>) -> Self {
        self.ignore_patterns = patterns;
        self
    }

    /// Builder method to set the encoding mode
    pub fn with_encoding_mode(mut self, mode: EncodingMode) -> Self {
        self.encoding_mode = mode;
        self
    }

    /// Builder method to set the failure policy
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// Loads configuration from the default locations
    pub fn load() -> SearchResult<Self> {
        Self::load_from(None)
    }

    /// Loads configuration from the default locations plus a specific file
    pub fn load_from(config_path: Option<&Path>) -> SearchResult<Self> {
        let mut builder = ConfigBuilder::builder();

        let config_files = [
            dirs::config_dir().map(|p| p.join("textscout/config.yaml")),
            Some(PathBuf::from(".textscout.yaml")),
        ];

        for path in config_files.iter().flatten() {
            if path.exists() {
                debug!("Loading config file: {}", path.display());
                builder = builder.add_source(File::from(path.as_path()));
            }
        }

        // An explicit file must exist
        if let Some(path) = config_path {
            debug!("Loading config file: {}", path.display());
            builder = builder.add_source(File::from(path));
        }

        Ok(builder.build()?.try_deserialize()?)
    }

    /// Merges CLI arguments with configuration file values.
    ///
    /// Every value present in `cli` replaces the file value, including values
    /// that happen to equal the built-in default.
    pub fn merge_with_cli(mut self, cli: CliOverrides) -> Self {
        if let Some(root_path) = cli.root_path {
            self.root_path = root_path;
        }
        if let Some(search_text) = cli.search_text {
            self.search_text = search_text;
        }
        if !cli.file_extensions.is_empty() {
            self.file_extensions = cli.file_extensions;
        }
        if !cli.ignore_patterns.is_empty() {
            self.ignore_patterns = cli.ignore_patterns;
        }
        if let Some(thread_count) = cli.thread_count {
            self.thread_count = thread_count;
        }
        if let Some(log_level) = cli.log_level {
            self.log_level = log_level;
        }
        if let Some(encoding_mode) = cli.encoding_mode {
            self.encoding_mode = encoding_mode;
        }
        if let Some(failure_policy) = cli.failure_policy {
            self.failure_policy = failure_policy;
        }
        self
    }

    /// Checks the directory, search text and extension list.
    ///
    /// Must pass before any file is opened.
    pub fn validate(&self) -> SearchResult<()> {
        if self.file_extensions.is_empty() {
            return Err(SearchError::NoExtensions);
        }
        if !self.root_path.is_dir() {
            return Err(SearchError::invalid_directory(&self.root_path));
        }
        if self.search_text.trim().is_empty() {
            return Err(SearchError::empty_search_text(&self.search_text));
        }
        Ok(())
    }
}
