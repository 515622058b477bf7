//! Descriptor fetching over HTTP.
//!
//! Provides a trait-based abstraction for retrieving descriptor source
//! files from a provider's raw-content mirror, enabling dependency
//! injection for testing. Fetch failures are soft: the verification loop
//! maps them to a skipped entry and moves on.

use std::sync::OnceLock;
use std::time::Duration;

/// Network timeout applied to every descriptor fetch.
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Trait for fetching a descriptor source file by URL.
///
/// The production implementation is [`HttpFetcher`]; tests mock this to
/// exercise the verification loop without network access.
#[cfg_attr(test, mockall::automock)]
pub trait DescriptorFetcher {
    /// Fetch the given URL and return the response body as text.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the server responds with a
    /// non-success status, or the body cannot be read.
    fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Errors arising from descriptor fetches.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The descriptor was not found (HTTP 404), typically a repository on
    /// a different default branch or a package without a descriptor file.
    #[error("descriptor not found: {url}")]
    NotFound {
        /// The URL that returned 404.
        url: String,
    },

    /// The HTTP request failed.
    #[error("fetch failed for {url}: {reason}")]
    Http {
        /// The URL that was requested.
        url: String,
        /// A human-readable description of the failure.
        reason: String,
    },
}

/// HTTP-based fetcher using `ureq`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpFetcher;

impl DescriptorFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = http_agent()
            .get(url)
            .call()
            .map_err(|e| map_ureq_error(url, &e))?;
        response
            .into_body()
            .read_to_string()
            .map_err(|e| FetchError::Http {
                url: url.to_owned(),
                reason: e.to_string(),
            })
    }
}

/// Shared `ureq` agent with request timeout configuration.
fn http_agent() -> &'static ureq::Agent {
    static AGENT: OnceLock<ureq::Agent> = OnceLock::new();
    AGENT.get_or_init(|| {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(FETCH_TIMEOUT))
            .build();
        ureq::Agent::new_with_config(config)
    })
}

/// Map a ureq error to a [`FetchError`].
fn map_ureq_error(url: &str, err: &ureq::Error) -> FetchError {
    match err {
        ureq::Error::StatusCode(404) => FetchError::NotFound {
            url: url.to_owned(),
        },
        other => FetchError::Http {
            url: url.to_owned(),
            reason: other.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_ureq_error_maps_404_to_not_found() {
        let err = ureq::Error::StatusCode(404);
        let mapped = map_ureq_error("https://example.test/Package.swift", &err);
        assert!(matches!(mapped, FetchError::NotFound { .. }));
    }

    #[test]
    fn map_ureq_error_maps_other_status_to_http() {
        let err = ureq::Error::StatusCode(500);
        let mapped = map_ureq_error("https://example.test/Package.swift", &err);
        assert!(matches!(mapped, FetchError::Http { .. }));
    }

    #[test]
    fn not_found_message_names_the_url() {
        let err = FetchError::NotFound {
            url: "https://raw.githubusercontent.com/a/b/master/Package.swift".to_owned(),
        };
        assert!(err.to_string().contains("a/b/master"));
    }
}
