//! Error types for the registry-gate CLI.
//!
//! This module defines the top-level error enum returned by the validation
//! run. Soft per-entry failures (an unfetchable descriptor, a package with
//! no products) never appear here; they are recorded as entry outcomes and
//! reported in the summary. Everything in this enum aborts the run.

use crate::checks::Violation;
use crate::manifest::ManifestError;
use thiserror::Error;

/// Errors that abort a validation run.
#[derive(Debug, Error)]
pub enum GateError {
    /// The manifest could not be located or loaded.
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// A local invariant check failed.
    #[error(transparent)]
    Violation(#[from] Violation),

    /// An entry's URL could not be parsed into the components the
    /// verification loop needs.
    #[error("entry {index} has an invalid URL {url}: {reason}")]
    InvalidUrl {
        /// Zero-based position of the entry in the manifest.
        index: usize,
        /// The offending URL string.
        url: String,
        /// Description of what made the URL unusable.
        reason: String,
    },

    /// An entry points at a hosting provider the validator does not know
    /// how to derive a descriptor URL for.
    #[error("entry {index} uses unsupported host {host}")]
    UnsupportedHost {
        /// Zero-based position of the entry in the manifest.
        index: usize,
        /// The unrecognized host string.
        host: String,
    },

    /// Strict mode was requested and at least one entry was skipped.
    #[error("{skipped} entries were skipped (strict mode treats skips as failures)")]
    StrictSkips {
        /// Number of entries that did not verify cleanly.
        skipped: usize,
    },
}

/// Result type alias using [`GateError`].
pub type Result<T> = std::result::Result<T, GateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_url_names_entry_and_reason() {
        let err = GateError::InvalidUrl {
            index: 3,
            url: "not a url".to_owned(),
            reason: "relative URL without a base".to_owned(),
        };
        let msg = err.to_string();
        assert!(msg.contains("entry 3"));
        assert!(msg.contains("not a url"));
        assert!(msg.contains("relative URL"));
    }

    #[test]
    fn unsupported_host_names_host() {
        let err = GateError::UnsupportedHost {
            index: 0,
            host: "gitlab.com".to_owned(),
        };
        assert!(err.to_string().contains("gitlab.com"));
    }

    #[test]
    fn strict_skips_includes_count() {
        let err = GateError::StrictSkips { skipped: 2 };
        assert!(err.to_string().contains("2 entries"));
    }
}
