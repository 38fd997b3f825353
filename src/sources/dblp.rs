//! DBLP source implementation.
//!
//! Uses the DBLP author search JSON API to resolve names and the per-person
//! `.bib` export to retrieve BibTeX.

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

use crate::config::DblpConfig;
use crate::models::ResolvedAuthor;
use crate::sources::{BibSource, SourceError};
use crate::utils::{dblp_retry_config, with_retry, HttpClient, RetryConfig, DEFAULT_USER_AGENT};

/// Public DBLP endpoint
pub const DBLP_BASE_URL: &str = "https://dblp.org";

/// DBLP author lookup and BibTeX export
#[derive(Debug, Clone)]
pub struct DblpSource {
    client: Arc<HttpClient>,
    base_url: String,
    retry: RetryConfig,
}

impl DblpSource {
    pub fn new() -> Result<Self, SourceError> {
        Self::from_config(&DblpConfig::default())
    }

    /// Build a source from the `[dblp]` configuration section
    pub fn from_config(config: &DblpConfig) -> Result<Self, SourceError> {
        let user_agent = config.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT);
        let client = HttpClient::with_settings(user_agent, Duration::from_secs(config.timeout_secs))?;

        Ok(Self {
            client: Arc::new(client),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            retry: dblp_retry_config(
                config.max_retries.max(1),
                Duration::from_secs(config.rate_limit_backoff_secs),
            ),
        })
    }

    /// Override the retry policy
    pub fn with_retry_config(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET a URL with retries, returning the body of a successful response
    async fn get_text(&self, url: String) -> Result<String, SourceError> {
        let client = Arc::clone(&self.client);

        with_retry(self.retry, || {
            let client = Arc::clone(&client);
            let url = url.clone();
            async move {
                let response = client
                    .get(&url)
                    .send()
                    .await
                    .map_err(|e| SourceError::Network(format!("Failed to reach DBLP: {}", e)))?;

                let response = check_status(response)?;

                response
                    .text()
                    .await
                    .map_err(|e| SourceError::Network(format!("Failed to read DBLP response: {}", e)))
            }
        })
        .await
    }
}

#[async_trait]
impl BibSource for DblpSource {
    async fn resolve_author(&self, name: &str) -> Result<Option<ResolvedAuthor>, SourceError> {
        tracing::info!("Searching DBLP for: {}", name);

        let url = format!(
            "{}/search/author/api?q={}&format=json&h=1",
            self.base_url,
            urlencoding::encode(name)
        );
        let body = self.get_text(url).await?;

        let resolved = parse_author_search(&body, name)?;
        match &resolved {
            Some(author) => tracing::info!("  Found: {} (PID: {})", author.name, author.pid),
            None => tracing::warn!("  Not found: {}", name),
        }

        Ok(resolved)
    }

    async fn fetch_bibtex(&self, pid: &str) -> Result<String, SourceError> {
        let pid = pid.trim().trim_matches('/');
        if pid.is_empty() {
            return Err(SourceError::InvalidRequest("empty DBLP PID".to_string()));
        }

        let url = format!("{}/pid/{}.bib", self.base_url, pid);
        let bibtex = self.get_text(url).await?;

        tracing::debug!("Fetched {} bytes of BibTeX for PID {}", bibtex.len(), pid);
        Ok(bibtex)
    }
}

// ========== Response Handling ==========

/// Map DBLP status codes onto source errors
fn check_status(response: reqwest::Response) -> Result<reqwest::Response, SourceError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    match status {
        reqwest::StatusCode::TOO_MANY_REQUESTS => {
            let retry_after = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u64>().ok());
            Err(SourceError::RateLimit(retry_after))
        }
        reqwest::StatusCode::NOT_FOUND => Err(SourceError::NotFound(response.url().to_string())),
        reqwest::StatusCode::SERVICE_UNAVAILABLE => {
            Err(SourceError::Api("DBLP service unavailable".to_string()))
        }
        _ => Err(SourceError::Api(format!("DBLP API returned status: {}", status))),
    }
}

#[derive(Debug, Deserialize)]
struct AuthorSearchResponse {
    result: AuthorSearchResult,
}

#[derive(Debug, Default, Deserialize)]
struct AuthorSearchResult {
    #[serde(default)]
    hits: AuthorHits,
}

#[derive(Debug, Default, Deserialize)]
struct AuthorHits {
    #[serde(default)]
    hit: Vec<AuthorHit>,
}

#[derive(Debug, Deserialize)]
struct AuthorHit {
    info: AuthorInfo,
}

#[derive(Debug, Deserialize)]
struct AuthorInfo {
    author: Option<String>,
    url: String,
}

/// Take the first hit of an author search, falling back to the queried name
fn parse_author_search(body: &str, queried: &str) -> Result<Option<ResolvedAuthor>, SourceError> {
    let response: AuthorSearchResponse = serde_json::from_str(body)?;

    let Some(hit) = response.result.hits.hit.into_iter().next() else {
        return Ok(None);
    };

    let Some(pid) = pid_from_url(&hit.info.url) else {
        return Err(SourceError::Parse(format!(
            "No PID in DBLP author URL: {}",
            hit.info.url
        )));
    };

    Ok(Some(ResolvedAuthor {
        name: hit.info.author.unwrap_or_else(|| queried.to_string()),
        pid,
    }))
}

/// Extract the PID from a profile URL such as `https://dblp.org/pid/12/3456`
fn pid_from_url(url: &str) -> Option<String> {
    let pid = match url.split_once("/pid/") {
        Some((_, rest)) => rest,
        None => url.rsplit('/').next()?,
    };
    let pid = pid.trim_end_matches('/').trim_end_matches(".html");

    if pid.is_empty() {
        None
    } else {
        Some(pid.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn test_source(base_url: &str) -> DblpSource {
        let config = DblpConfig {
            base_url: base_url.to_string(),
            ..DblpConfig::default()
        };
        DblpSource::from_config(&config)
            .unwrap()
            .with_retry_config(RetryConfig {
                max_attempts: 2,
                initial_delay: Duration::from_millis(10),
                max_delay: Duration::from_millis(50),
                max_total_time: Duration::from_secs(5),
            })
    }

    #[test]
    fn test_base_url() {
        assert_eq!(DblpSource::new().unwrap().base_url(), DBLP_BASE_URL);
        assert_eq!(test_source("http://localhost:8080/").base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_pid_from_url() {
        assert_eq!(
            pid_from_url("https://dblp.org/pid/12/3456"),
            Some("12/3456".to_string())
        );
        assert_eq!(
            pid_from_url("https://dblp.org/pid/t/AlanMTuring.html"),
            Some("t/AlanMTuring".to_string())
        );
        assert_eq!(pid_from_url("https://example.org/people/abc"), Some("abc".to_string()));
        assert_eq!(pid_from_url("https://dblp.org/pid/"), None);
    }

    #[test]
    fn test_parse_author_search() {
        let body = r#"{"result":{"hits":{"@total":"1","hit":[
            {"@score":"5","info":{"author":"Jane Doe 0001","url":"https://dblp.org/pid/12/3456"}}
        ]}}}"#;

        let author = parse_author_search(body, "Jane Doe").unwrap().unwrap();
        assert_eq!(author.name, "Jane Doe 0001");
        assert_eq!(author.pid, "12/3456");
    }

    #[test]
    fn test_parse_author_search_no_hits() {
        let body = r#"{"result":{"hits":{"@total":"0"}}}"#;
        assert_eq!(parse_author_search(body, "Nobody").unwrap(), None);
    }

    #[test]
    fn test_parse_author_search_invalid_json() {
        assert!(matches!(
            parse_author_search("<html>", "Jane Doe"),
            Err(SourceError::Parse(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch_bibtex() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/pid/12/3456.bib")
            .with_status(200)
            .with_body("@article{K1,\n  year = {2023},\n}\n")
            .create_async()
            .await;

        let source = test_source(&server.url());
        let bibtex = source.fetch_bibtex("12/3456").await.unwrap();

        assert!(bibtex.starts_with("@article{K1,"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_bibtex_retries_rate_limit() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/pid/12/3456.bib")
            .with_status(429)
            .expect(2)
            .create_async()
            .await;

        let source = test_source(&server.url());
        let result = source.fetch_bibtex("12/3456").await;

        assert!(matches!(result, Err(SourceError::RateLimit(None))));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_bibtex_not_found_is_not_retried() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/pid/00/0000.bib")
            .with_status(404)
            .expect(1)
            .create_async()
            .await;

        let source = test_source(&server.url());
        let result = source.fetch_bibtex("00/0000").await;

        assert!(matches!(result, Err(SourceError::NotFound(_))));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_bibtex_rejects_empty_pid() {
        let source = test_source("http://127.0.0.1:9");
        let result = source.fetch_bibtex("  ").await;
        assert!(matches!(result, Err(SourceError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_resolve_author() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/search/author/api")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("q".into(), "Jane Doe".into()),
                Matcher::UrlEncoded("format".into(), "json".into()),
                Matcher::UrlEncoded("h".into(), "1".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"result":{"hits":{"hit":[{"info":{"author":"Jane Doe","url":"https://dblp.org/pid/12/3456"}}]}}}"#,
            )
            .create_async()
            .await;

        let source = test_source(&server.url());
        let author = source.resolve_author("Jane Doe").await.unwrap();

        assert_eq!(
            author,
            Some(ResolvedAuthor {
                name: "Jane Doe".to_string(),
                pid: "12/3456".to_string(),
            })
        );
        mock.assert_async().await;
    }
}
