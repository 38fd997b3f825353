//! Utility modules supporting retrieval.
//!
//! - [`load_authors`] / [`parse_authors`]: read the authors list
//! - [`HttpClient`]: shared reqwest client with timeouts and a user agent
//! - [`RetryConfig`] / [`with_retry`]: retry transient errors with backoff
//!
//! # Retry with Backoff
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use dblp_bibmerge::sources::SourceError;
//! use dblp_bibmerge::utils::{dblp_retry_config, with_retry};
//!
//! # async fn fetch_data() -> Result<String, SourceError> { Ok("data".to_string()) }
//! # #[tokio::main]
//! # async fn main() -> Result<(), SourceError> {
//! let config = dblp_retry_config(3, Duration::from_secs(5));
//! let data = with_retry(config, || fetch_data()).await?;
//! # Ok(())
//! # }
//! ```

mod authors;
mod http;
mod retry;

pub use authors::{load_authors, parse_authors, AuthorsError};
pub use http::{HttpClient, DEFAULT_USER_AGENT};
pub use retry::{dblp_retry_config, with_retry, RetryConfig, TransientError};
