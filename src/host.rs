//! Host classification for manifest entries.
//!
//! Maps a URL's host component onto the closed set of hosting providers the
//! validator knows how to derive descriptor URLs for. Unknown hosts are a
//! hard failure, never silently skipped.

use std::fmt;
use thiserror::Error;
use url::Url;

/// A hosting provider the validator can resolve descriptors from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostKind {
    /// `github.com`, resolved through its raw-content mirror.
    GitHub,
}

impl HostKind {
    /// The host string this provider matches.
    #[must_use]
    pub fn host_str(self) -> &'static str {
        match self {
            Self::GitHub => "github.com",
        }
    }
}

impl fmt::Display for HostKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.host_str())
    }
}

/// Errors arising from host classification.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HostError {
    /// The URL has no host component.
    #[error("URL has no host component")]
    MissingHost,

    /// The host is not in the supported set.
    #[error("unsupported host: {host}")]
    Unsupported {
        /// The host string that failed to match.
        host: String,
    },
}

/// Classify the host of a parsed entry URL.
///
/// Matching is an exact string comparison against each provider's host.
/// This is a pure function with no network access.
///
/// # Errors
///
/// Returns [`HostError::MissingHost`] when the URL carries no host and
/// [`HostError::Unsupported`] when the host matches no known provider.
pub fn classify(url: &Url) -> Result<HostKind, HostError> {
    let host = url.host_str().ok_or(HostError::MissingHost)?;
    if host == HostKind::GitHub.host_str() {
        Ok(HostKind::GitHub)
    } else {
        Err(HostError::Unsupported {
            host: host.to_owned(),
        })
    }
}
