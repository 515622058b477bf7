//! Emission of the corrected manifest after a sort violation.
//!
//! The corrected file is best-effort remediation for the operator to inspect
//! and adopt; writing it never changes the run's verdict, and a write
//! failure is reported as a warning rather than replacing the violation.

use crate::checks::sorted_entries;
use crate::manifest::{Manifest, ManifestEntry};
use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;

/// Infix inserted before the original extension.
const SORTED_INFIX: &str = "sorted";

/// Errors arising from writing the corrected manifest.
#[derive(Debug, Error)]
pub enum SortedWriteError {
    /// Serializing the entry list failed.
    #[error("could not serialize sorted manifest: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Writing the file failed.
    #[error("could not write {path}: {source}")]
    Io {
        /// Destination that could not be written.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Sibling path for the corrected manifest.
///
/// Inserts `.sorted` before the original extension
/// (`packages.json` → `packages.sorted.json`); a file without an extension
/// gets `.sorted` appended.
#[must_use]
pub fn sorted_sibling_path(original: &Utf8Path) -> Utf8PathBuf {
    match original.extension() {
        Some(ext) => original.with_extension(format!("{SORTED_INFIX}.{ext}")),
        None => original.with_extension(SORTED_INFIX),
    }
}

/// Write the case-folded-sorted copy of the manifest next to the original.
///
/// The output is a pretty-printed JSON array in sorted order, ending in a
/// newline. Returns the path written.
///
/// # Errors
///
/// Returns [`SortedWriteError`] if serialization or the file write fails;
/// the caller reports this as a warning.
pub fn write_sorted_manifest(manifest: &Manifest) -> Result<Utf8PathBuf, SortedWriteError> {
    let sorted = sorted_entries(manifest.entries());
    let urls: Vec<&str> = sorted.iter().map(ManifestEntry::as_str).collect();

    let mut body = serde_json::to_string_pretty(&urls)?;
    body.push('\n');

    let path = sorted_sibling_path(manifest.path());
    std::fs::write(&path, body).map_err(|source| SortedWriteError::Io {
        path: path.clone(),
        source,
    })?;

    Ok(path)
}
