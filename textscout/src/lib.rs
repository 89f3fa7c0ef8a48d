pub mod config;
pub mod errors;
pub mod filters;
pub mod metrics;
pub mod results;
pub mod search;

pub use config::{CliOverrides, EncodingMode, FailurePolicy, SearchConfig};
pub use errors::{SearchError, SearchResult};
pub use results::{rank, FileFailure, FileResult, SearchReport};
pub use search::search;
