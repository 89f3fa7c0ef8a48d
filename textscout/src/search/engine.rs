use tracing::{debug, info};

use super::discovery::discover;
use super::dispatcher::Dispatcher;
use crate::config::SearchConfig;
use crate::errors::SearchResult;
use crate::results::SearchReport;

/// Searches the configured directory and returns the ranked report.
///
/// The configuration and the ignore patterns are checked before any file is
/// read. If no file matches the extensions the report is empty and
/// [`SearchReport::no_files_found`] is true.
pub fn search(config: &SearchConfig) -> SearchResult<SearchReport> {
    info!(
        "Starting search for '{}' in {}",
        config.search_text,
        config.root_path.display()
    );
    config.validate()?;

    let files = discover(
        &config.root_path,
        &config.file_extensions,
        &config.ignore_patterns,
    )?;
    let files_discovered = files.len();
    if files.is_empty() {
        info!("No files with extensions {:?} found", config.file_extensions);
        return Ok(SearchReport::new());
    }

    let dispatcher = Dispatcher::from_config(config);
    let outcome = dispatcher.run(files, &config.search_text)?;
    dispatcher.metrics().log_stats();

    debug!(
        "Ranking {} results ({} failures)",
        outcome.results.len(),
        outcome.failures.len()
    );
    let report = SearchReport::from_parts(outcome.results, outcome.failures, files_discovered);

    info!(
        "Search complete. Found {} occurrences in {} of {} files",
        report.total_occurrences,
        report.files_with_occurrences(),
        report.files_discovered
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::SearchError;
    use std::fs;
    use std::num::NonZeroUsize;
    use tempfile::tempdir;

    #[test]
    fn test_search_ranks_results() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "hello hello world").unwrap();
        fs::write(dir.path().join("b.txt"), "hello").unwrap();

        let config = SearchConfig::new(dir.path(), "hello", ["txt"])
            .with_thread_count(NonZeroUsize::new(1).unwrap());
        let report = search(&config).unwrap();

        assert_eq!(report.files_discovered, 2);
        assert_eq!(report.total_occurrences, 3);
        assert_eq!(report.results[0].path, dir.path().join("a.txt"));
        assert_eq!(report.results[0].occurrences, 2);
        assert_eq!(report.results[1].occurrences, 1);
    }

    #[test]
    fn test_invalid_config_stops_search() {
        let dir = tempdir().unwrap();
        let config = SearchConfig::new(dir.path(), "  ", ["txt"]);
        assert!(matches!(
            search(&config),
            Err(SearchError::EmptySearchText(_))
        ));
    }

    #[test]
    fn test_no_files_found() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.csv"), "hello").unwrap();

        let report = search(&SearchConfig::new(dir.path(), "hello", ["txt"])).unwrap();
        assert!(report.no_files_found());
        assert!(report.results.is_empty());
    }
}
