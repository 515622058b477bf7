//! Manifest location and loading.
//!
//! The manifest is a JSON array of absolute package-source URLs. This module
//! resolves which file to read from an explicit [`SearchPaths`] value (never
//! from ambient process globals) and parses it into an ordered, immutable
//! [`Manifest`].

use camino::{Utf8Path, Utf8PathBuf};
use log::trace;
use std::fmt;
use thiserror::Error;

/// File name looked for in the fallback search locations.
pub const MANIFEST_FILE_NAME: &str = "packages.json";

/// A single manifest entry: one absolute URL string with a stable position.
///
/// The raw string is preserved exactly as loaded; URL components are parsed
/// on demand by the verification loop. Comparison helpers that need a
/// case-insensitive view go through [`ManifestEntry::normalized_key`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ManifestEntry(String);

impl ManifestEntry {
    /// Get the entry as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-folded form of the full URL string.
    ///
    /// Used only for duplicate grouping and sort comparison, never for
    /// fetching.
    #[must_use]
    pub fn normalized_key(&self) -> String {
        self.0.to_lowercase()
    }
}

impl AsRef<str> for ManifestEntry {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ManifestEntry {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for ManifestEntry {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for ManifestEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An ordered sequence of manifest entries plus the path they came from.
///
/// Never mutated after loading; the sorted artifact emitted on an ordering
/// violation is built from a fresh copy.
#[derive(Debug, Clone)]
pub struct Manifest {
    path: Utf8PathBuf,
    entries: Vec<ManifestEntry>,
}

impl Manifest {
    /// The path the manifest was loaded from.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// The entries in file order.
    #[must_use]
    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the manifest lists no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Errors arising from manifest location and loading.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// No candidate path existed.
    #[error("manifest not found (searched: {})", format_candidates(searched))]
    NotFound {
        /// Every candidate path that was tried, in search order.
        searched: Vec<Utf8PathBuf>,
    },

    /// The file existed but was not a JSON array of URL strings.
    #[error("could not parse {path}: {source}")]
    Parse {
        /// Path of the malformed manifest.
        path: Utf8PathBuf,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Reading the file failed.
    #[error("could not read manifest: {0}")]
    Io(#[from] std::io::Error),
}

fn format_candidates(searched: &[Utf8PathBuf]) -> String {
    searched
        .iter()
        .map(|p| p.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// The ordered set of locations to look for a manifest in.
///
/// Built once at startup from the CLI argument and process environment,
/// then passed in explicitly so the loader itself performs no ambient
/// lookups.
#[derive(Debug, Clone, Default)]
pub struct SearchPaths {
    /// Path given on the command line, tried first and verbatim.
    pub explicit: Option<Utf8PathBuf>,
    /// Directory to try `packages.json` in next (normally the working
    /// directory).
    pub working_dir: Option<Utf8PathBuf>,
    /// Directory the running executable lives in, tried last.
    pub install_dir: Option<Utf8PathBuf>,
}

impl SearchPaths {
    /// Build search paths from the process environment.
    ///
    /// The working directory or executable path being undeterminable is not
    /// an error; the corresponding candidate is simply absent.
    #[must_use]
    pub fn from_environment(explicit: Option<Utf8PathBuf>) -> Self {
        let working_dir = match std::env::current_dir() {
            Ok(dir) => Utf8PathBuf::try_from(dir).ok(),
            Err(e) => {
                trace!("could not determine working directory: {e}");
                None
            }
        };
        let install_dir = match std::env::current_exe() {
            Ok(exe) => exe
                .parent()
                .map(std::path::Path::to_path_buf)
                .and_then(|dir| Utf8PathBuf::try_from(dir).ok()),
            Err(e) => {
                trace!("could not determine executable path: {e}");
                None
            }
        };
        Self {
            explicit,
            working_dir,
            install_dir,
        }
    }

    /// The candidate manifest paths in search order.
    #[must_use]
    pub fn candidates(&self) -> Vec<Utf8PathBuf> {
        let mut paths = Vec::new();
        if let Some(path) = &self.explicit {
            paths.push(path.clone());
        }
        if let Some(dir) = &self.working_dir {
            paths.push(dir.join(MANIFEST_FILE_NAME));
        }
        if let Some(dir) = &self.install_dir {
            paths.push(dir.join(MANIFEST_FILE_NAME));
        }
        paths
    }

    /// Return the first candidate that exists on disk.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::NotFound`] listing every candidate when none
    /// exists.
    pub fn locate(&self) -> Result<Utf8PathBuf, ManifestError> {
        let candidates = self.candidates();
        candidates
            .iter()
            .find(|path| path.exists())
            .cloned()
            .ok_or(ManifestError::NotFound {
                searched: candidates,
            })
    }
}

/// Load and parse the manifest at `path`.
///
/// The file must contain a JSON array of strings; file order is preserved
/// and defines each entry's index for the rest of the run.
///
/// # Errors
///
/// Returns [`ManifestError::Io`] if the file cannot be read and
/// [`ManifestError::Parse`] if the content is not a JSON string array.
pub fn load_manifest(path: &Utf8Path) -> Result<Manifest, ManifestError> {
    let content = std::fs::read_to_string(path)?;
    let urls: Vec<String> = serde_json::from_str(&content).map_err(|source| {
        ManifestError::Parse {
            path: path.to_owned(),
            source,
        }
    })?;

    Ok(Manifest {
        path: path.to_owned(),
        entries: urls.into_iter().map(ManifestEntry::from).collect(),
    })
}
