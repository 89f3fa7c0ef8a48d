use glob::Pattern;
use std::path::Path;

use crate::errors::{SearchError, SearchResult};

/// Lowercases a requested extension and drops one leading dot
pub fn normalize_extension(ext: &str) -> String {
    let ext = ext.strip_prefix('.').unwrap_or(ext);
    ext.to_lowercase()
}

/// Extension of a file: the text after the last `.` of its file name, or the
/// empty string when the name has no dot
pub fn file_extension(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy())
        .and_then(|name| name.rsplit_once('.').map(|(_, ext)| ext.to_lowercase()))
        .unwrap_or_default()
}

/// Checks a file's extension against normalized extensions
pub fn has_valid_extension(path: &Path, extensions: &[String]) -> bool {
    let ext = file_extension(path);
    extensions.iter().any(|e| *e == ext)
}

/// Glob patterns compiled once for a whole discovery walk
#[derive(Debug, Clone, Default)]
pub struct IgnorePatterns {
    patterns: Vec<Pattern>,
}

impl IgnorePatterns {
    /// Compiles every pattern, failing on the first invalid one
    pub fn new(patterns: &[String]) -> SearchResult<Self> {
        let patterns = patterns
            .iter()
            .map(|pattern| {
                Pattern::new(pattern).map_err(|e| {
                    SearchError::config_error(format!(
                        "invalid ignore pattern '{}': {}",
                        pattern, e
                    ))
                })
            })
            .collect::<SearchResult<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    /// Checks a path against the patterns, with `\` separators read as `/`
    pub fn is_ignored(&self, path: &Path) -> bool {
        if self.patterns.is_empty() {
            return false;
        }
        let normalized_path = path.to_string_lossy().replace('\\', "/");
        self.patterns.iter().any(|p| p.matches(&normalized_path))
    }
}

/// Determines if a file should be included in the search
pub fn should_include_file(path: &Path, extensions: &[String], ignore: &IgnorePatterns) -> bool {
    has_valid_extension(path, extensions) && !ignore.is_ignored(path)
}
