use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};

use crate::errors::SearchResult;
use crate::filters::{normalize_extension, should_include_file, IgnorePatterns};

/// Collects every file under `root` whose extension is in `extensions`.
///
/// Extensions are compared case-insensitively and may carry a leading dot.
/// Hidden files and ignore files such as `.gitignore` are not honored; only
/// `ignore_patterns` exclude paths, and an invalid pattern is a configuration
/// error. Symlinks to regular files are listed but symlinked directories are
/// not descended into. Entries that cannot be read are logged and skipped. An
/// empty list means nothing matched.
pub fn discover<S: AsRef<str>>(
    root: &Path,
    extensions: &[S],
    ignore_patterns: &[String],
) -> SearchResult<Vec<PathBuf>> {
    let ignore = IgnorePatterns::new(ignore_patterns)?;
    let extensions: Vec<String> = extensions
        .iter()
        .map(|ext| normalize_extension(ext.as_ref()))
        .collect();

    let mut builder = WalkBuilder::new(root);
    builder
        .standard_filters(false)
        .hidden(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b));

    debug!("Scanning directory: {}", root.display());
    let files: Vec<PathBuf> = builder
        .build()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|entry| {
            entry.file_type().is_some_and(|ft| {
                // Symlinks are not followed, so check what they point at
                ft.is_file() || (ft.is_symlink() && entry.path().is_file())
            })
        })
        .filter(|entry| should_include_file(entry.path(), &extensions, &ignore))
        .map(|entry| {
            trace!("Adding file: {}", entry.path().display());
            entry.into_path()
        })
        .collect();

    debug!("Found {} files to process", files.len());
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::SearchError;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_finds_nested_files() {
        let dir = tempdir().unwrap();
        let deep = dir.path().join("one").join("two").join("three");
        fs::create_dir_all(&deep).unwrap();
        fs::write(deep.join("deep.txt"), "x").unwrap();
        fs::write(dir.path().join("top.txt"), "x").unwrap();
        fs::write(dir.path().join("skip.csv"), "x").unwrap();

        let files = discover(dir.path(), &["txt"], &[]).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files.contains(&deep.join("deep.txt")));
        assert!(files.contains(&dir.path().join("top.txt")));
    }

    #[test]
    fn test_extension_case_insensitive() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("Report.TXT"), "x").unwrap();
        fs::write(dir.path().join("notes.Md"), "x").unwrap();

        let files = discover(dir.path(), &["txt", ".MD"], &[]).unwrap();
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_no_matching_files() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("image.png"), "x").unwrap();

        assert!(discover(dir.path(), &["txt"], &[]).unwrap().is_empty());
    }

    #[test]
    fn test_hidden_and_gitignored_files_are_found() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(".gitignore"), "*.txt\n").unwrap();
        fs::write(dir.path().join(".hidden.txt"), "x").unwrap();
        fs::write(dir.path().join("plain.txt"), "x").unwrap();

        let files = discover(dir.path(), &["txt"], &[]).unwrap();
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_ignore_patterns() {
        let dir = tempdir().unwrap();
        let skipped = dir.path().join("build");
        fs::create_dir_all(&skipped).unwrap();
        fs::write(skipped.join("out.txt"), "x").unwrap();
        fs::write(dir.path().join("keep.txt"), "x").unwrap();

        let files = discover(dir.path(), &["txt"], &["**/build/**".to_string()]).unwrap();
        assert_eq!(files, vec![dir.path().join("keep.txt")]);
    }

    #[test]
    fn test_invalid_ignore_pattern() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "x").unwrap();

        let result = discover(dir.path(), &["txt"], &["[".to_string()]);
        assert!(matches!(result, Err(SearchError::ConfigError(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_files_are_found() {
        use std::os::unix::fs::symlink;

        let dir = tempdir().unwrap();
        let target_dir = tempdir().unwrap();
        let target = target_dir.path().join("real.txt");
        fs::write(&target, "x").unwrap();
        fs::create_dir(target_dir.path().join("inner")).unwrap();
        fs::write(target_dir.path().join("inner").join("deep.txt"), "x").unwrap();

        symlink(&target, dir.path().join("link.txt")).unwrap();
        symlink(target_dir.path().join("inner"), dir.path().join("linked_dir")).unwrap();
        symlink(dir.path().join("gone.txt"), dir.path().join("dangling.txt")).unwrap();

        let files = discover(dir.path(), &["txt"], &[]).unwrap();
        assert_eq!(files, vec![dir.path().join("link.txt")]);
    }
}
