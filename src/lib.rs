// repo-search - Typed repository search against paginated REST search APIs

pub mod config;
pub mod models;
pub mod types;
pub mod search;    // Query compilation, paginated fetching, error translation
pub mod http;
pub mod cli;       // Command line surface and result rendering
pub mod utils;

// Re-exports for convenience
pub use config::Config;
pub use models::{RepositoriesResult, Repository, SearchResult};
pub use search::{Query, SearchError, Searcher};
