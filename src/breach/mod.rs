// src/breach/mod.rs
//! Pwned Passwords range-query client.
//!
//! Only the first five hex characters of the password's SHA-1 digest are
//! sent. The server answers with every known suffix in that bucket and
//! the match is made locally.

use std::time::Duration;
use futures::stream::{self, StreamExt};
use reqwest::Client;
use thiserror::Error;
use crate::crypto::digest_split;
use crate::models::{BreachQueryResult, Password, QueryFailure};

pub const DEFAULT_API_URL: &str = "https://api.pwnedpasswords.com";

/// Asks the server to pad responses with zero-count decoys.
const PADDING_HEADER: &str = "Add-Padding";

#[derive(Debug, Error)]
pub enum BreachError {
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, BreachError>;

#[derive(Debug, Clone)]
pub struct BreachConfig {
    pub api_url: String,
    pub user_agent: String,
}

impl Default for BreachConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            user_agent: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Stateless client; every `check` is one independent request.
pub struct BreachClient {
    client: Client,
    api_url: String,
}

impl BreachClient {
    pub fn new(config: &BreachConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self::with_client(client, &config.api_url))
    }

    pub fn with_client(client: Client, api_url: &str) -> Self {
        Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    fn range_url(&self, prefix: &str) -> String {
        format!("{}/range/{}", self.api_url, prefix)
    }

    /// Look `password` up in the breach corpus.
    ///
    /// Never returns `NotFound` for a request that did not complete;
    /// transport problems, timeouts and non-2xx statuses all come back as
    /// `QueryFailed`.
    pub async fn check(&self, password: &Password, timeout: Duration) -> BreachQueryResult {
        let split = digest_split(password);
        let url = self.range_url(&split.prefix);
        log::debug!("Querying range bucket {}", split.prefix);

        let response = match self
            .client
            .get(&url)
            .header(PADDING_HEADER, "true")
            .timeout(timeout)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return failed(classify_transport_error(&e)),
        };

        let status = response.status();
        log::debug!("Range bucket {} answered {}", split.prefix, status);
        if !status.is_success() {
            return failed(QueryFailure::Status(status.as_u16()));
        }

        let body = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(e) if e.is_timeout() => return failed(QueryFailure::Timeout),
            Err(e) => return failed(QueryFailure::Body(e.to_string())),
        };

        parse_range_response(&String::from_utf8_lossy(&body), &split.suffix)
    }

    /// Check a batch with up to `concurrency` requests in flight.
    /// Results come back in the same order as `passwords`.
    pub async fn check_all(
        &self,
        passwords: &[Password],
        timeout: Duration,
        concurrency: usize,
    ) -> Vec<BreachQueryResult> {
        stream::iter(passwords)
            .map(|password| self.check(password, timeout))
            .buffered(concurrency.max(1))
            .collect()
            .await
    }
}

fn failed(reason: QueryFailure) -> BreachQueryResult {
    log::warn!("Breach query failed: {}", reason);
    BreachQueryResult::QueryFailed { reason }
}

fn classify_transport_error(e: &reqwest::Error) -> QueryFailure {
    if e.is_timeout() {
        QueryFailure::Timeout
    } else if e.is_connect() {
        QueryFailure::Connect(e.to_string())
    } else if let Some(status) = e.status() {
        QueryFailure::Status(status.as_u16())
    } else {
        QueryFailure::Request(e.to_string())
    }
}

/// Find `suffix` in a range response body of `SUFFIX:COUNT` lines.
///
/// Lines without exactly one colon are skipped. Suffixes compare
/// case-insensitively. A matching line whose count cannot be parsed is
/// reported as `Found { count: 1 }`; a count of zero (the padding entries)
/// is reported as `NotFound`.
pub fn parse_range_response(body: &str, suffix: &str) -> BreachQueryResult {
    for line in body.lines() {
        let mut fields = line.split(':');
        let (Some(candidate), Some(count), None) = (fields.next(), fields.next(), fields.next())
        else {
            continue;
        };

        if !candidate.trim().eq_ignore_ascii_case(suffix) {
            continue;
        }

        return match count.trim().parse::<u64>() {
            Ok(0) => BreachQueryResult::NotFound,
            Ok(count) => BreachQueryResult::Found { count },
            Err(_) => BreachQueryResult::Found { count: 1 },
        };
    }
    BreachQueryResult::NotFound
}
