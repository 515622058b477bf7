//! Descriptor source location for recognized providers.
//!
//! For a GitHub-hosted package the descriptor lives on the raw-content
//! mirror at a path derived from the repository URL: the user is the path
//! segment preceding the repository, the repository is the final segment
//! with its `.git` extension stripped.

use crate::host::HostKind;
use thiserror::Error;
use url::Url;

/// Branch used when the operator does not override it.
pub const DEFAULT_BRANCH: &str = "master";

/// File name of the package descriptor within a repository.
pub const DESCRIPTOR_FILE_NAME: &str = "Package.swift";

/// The user/repository pair identifying a descriptor's location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptorLocation {
    user: String,
    repo: String,
}

/// Errors arising from location derivation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LocationError {
    /// The URL path does not carry the expected `/{user}/{repo}` segments.
    #[error("expected a /user/repository path, got {path}")]
    MissingSegments {
        /// The path that could not be split.
        path: String,
    },
}

impl DescriptorLocation {
    /// Derive the location from a classified entry URL.
    ///
    /// # Errors
    ///
    /// Returns [`LocationError::MissingSegments`] when the URL path has
    /// fewer than two non-empty segments.
    pub fn from_url(url: &Url, host: HostKind) -> Result<Self, LocationError> {
        match host {
            HostKind::GitHub => Self::from_github_url(url),
        }
    }

    fn from_github_url(url: &Url) -> Result<Self, LocationError> {
        let segments: Vec<&str> = url
            .path_segments()
            .map(|s| s.filter(|seg| !seg.is_empty()).collect())
            .unwrap_or_default();

        let [.., user, repo] = segments.as_slice() else {
            return Err(LocationError::MissingSegments {
                path: url.path().to_owned(),
            });
        };

        let repo = repo.strip_suffix(".git").unwrap_or(repo);
        Ok(Self {
            user: (*user).to_owned(),
            repo: repo.to_owned(),
        })
    }

    /// The user (owner) segment.
    #[must_use]
    pub fn user(&self) -> &str {
        &self.user
    }

    /// The repository segment, extension stripped.
    #[must_use]
    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// The raw-content URL of the descriptor on the given branch.
    #[must_use]
    pub fn descriptor_url(&self, branch: &str) -> String {
        format!(
            "https://raw.githubusercontent.com/{}/{}/{branch}/{DESCRIPTOR_FILE_NAME}",
            self.user, self.repo
        )
    }
}
