//! Search Module
//!
//! Typed search against a paginated REST search API:
//! - Query compilation into the provider's `keyword key:value` syntax
//! - Sequential page fetching driven by `Link` headers
//! - Translation of failed responses into readable errors

pub mod error;
pub mod pagination;
pub mod qualifier;
pub mod query;
pub mod searcher;

pub use error::{HttpError, HttpErrorItem, SearchError};
pub use pagination::{PageState, MAX_PER_PAGE};
pub use qualifier::{Qualifier, QualifierKey, QualifierValue, Qualifiers, RepositoryQualifiers};
pub use query::Query;
pub use searcher::{RepositorySearcher, Searcher};
