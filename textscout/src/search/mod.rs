/// The concurrent file-search engine.
///
/// A run flows through these modules in order:
///
/// 1. [`discovery`] walks the directory tree and keeps files whose extension
///    was requested.
/// 2. [`dispatcher`] turns every path into a [`SearchTask`] and executes the
///    tasks on a bounded rayon pool, collecting results and per-file failures.
/// 3. Each [`task`] reads its file through the [`reader`] and hands the text to
///    the [`counter`].
/// 4. [`engine`] ties the steps together and ranks the results with
///    [`crate::results::rank`].
///
/// ```rust,ignore
/// let config = SearchConfig::new("docs", "hello", ["txt", "md"]);
/// let report = textscout::search(&config)?;
/// for result in &report.results {
///     println!("{}: {}", result.path.display(), result.occurrences);
/// }
/// ```
pub mod counter;
pub mod discovery;
pub mod dispatcher;
pub mod engine;
pub mod reader;
pub mod task;

pub use counter::count_occurrences;
pub use discovery::discover;
pub use dispatcher::{DispatchOutcome, Dispatcher};
pub use engine::search;
pub use reader::FileReader;
pub use task::SearchTask;
