use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use tracing::debug;

use super::reader::FileReader;
use super::task::SearchTask;
use crate::config::{EncodingMode, FailurePolicy, SearchConfig};
use crate::errors::{SearchError, SearchResult};
use crate::metrics::SearchMetrics;
use crate::results::{FileFailure, FileResult};

/// Results and failures of one dispatch, both in submission order
#[derive(Debug, Default)]
pub struct DispatchOutcome {
    pub results: Vec<FileResult>,
    pub failures: Vec<FileFailure>,
}

/// Runs one [`SearchTask`] per file on a bounded worker pool.
///
/// Each run builds its own rayon pool with `thread_count` workers. Tasks share
/// nothing but the reader's atomic counters. The indexed parallel collect gives
/// every task its own result slot, and `run` only reads the slots after the
/// pool has joined, so every task has reached success or failure by then.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    thread_count: NonZeroUsize,
    failure_policy: FailurePolicy,
    reader: FileReader,
}

impl Dispatcher {
    pub fn new(
        thread_count: NonZeroUsize,
        failure_policy: FailurePolicy,
        encoding_mode: EncodingMode,
    ) -> Self {
        Self {
            thread_count,
            failure_policy,
            reader: FileReader::new(encoding_mode),
        }
    }

    pub fn from_config(config: &SearchConfig) -> Self {
        Self::new(
            config.thread_count,
            config.failure_policy,
            config.encoding_mode,
        )
    }

    pub fn metrics(&self) -> &SearchMetrics {
        self.reader.metrics()
    }

    /// Searches every path for `text` and waits for all of them.
    ///
    /// Under [`FailurePolicy::Isolate`] failed files land in
    /// [`DispatchOutcome::failures`]. Under [`FailurePolicy::FailFast`] any
    /// failure turns the whole run into [`SearchError::Aggregate`], still only
    /// after every task has finished.
    pub fn run(&self, paths: Vec<PathBuf>, text: &str) -> SearchResult<DispatchOutcome> {
        let tasks: Vec<SearchTask> = paths
            .into_iter()
            .map(|path| SearchTask::new(path, text))
            .collect();

        let pool = ThreadPoolBuilder::new()
            .num_threads(self.thread_count.get())
            .thread_name(|i| format!("textscout-worker-{}", i))
            .build()
            .map_err(|e| SearchError::thread_pool(e.to_string()))?;

        debug!(
            "Dispatching {} tasks on {} threads",
            tasks.len(),
            self.thread_count
        );

        let reader = &self.reader;
        let slots: Vec<(PathBuf, SearchResult<FileResult>)> = pool.install(|| {
            tasks
                .into_par_iter()
                .map(|task| {
                    let path = task.path().to_path_buf();
                    (path, task.execute(reader))
                })
                .collect()
        });

        let mut outcome = DispatchOutcome::default();
        for (path, slot) in slots {
            match slot {
                Ok(result) => outcome.results.push(result),
                Err(e) => {
                    debug!("Task failed for {}: {}", path.display(), e);
                    self.metrics().record_failure();
                    outcome.failures.push(FileFailure::new(path, e));
                }
            }
        }

        if self.failure_policy == FailurePolicy::FailFast && !outcome.failures.is_empty() {
            return Err(SearchError::Aggregate(outcome.failures));
        }

        Ok(outcome)
    }
}
