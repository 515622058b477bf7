//! The per-entry remote verification loop.
//!
//! Entries are processed strictly sequentially in manifest order. Each one
//! is classified, its descriptor fetched into a fresh temporary directory,
//! and the external description tool asked for the package's products. Soft
//! failures become skip outcomes and the loop continues; an invalid URL or
//! unsupported host aborts the run on first occurrence.

use crate::descriptor::describe::PackageDescriber;
use crate::descriptor::download::DescriptorFetcher;
use crate::descriptor::location::{DESCRIPTOR_FILE_NAME, DescriptorLocation};
use crate::error::{GateError, Result};
use crate::host::{HostError, classify};
use crate::manifest::ManifestEntry;
use crate::output::write_stderr_line;
use crate::report::{EntryOutcome, EntryReport, RunReport};
use camino::Utf8Path;
use log::trace;
use std::io::Write;
use tempfile::TempDir;
use url::Url;

/// Settings for one verification pass.
#[derive(Debug, Clone)]
pub struct VerifyConfig<'a> {
    /// Branch the descriptor is fetched from.
    pub branch: &'a str,
    /// When true, suppress progress output (skip warnings still print).
    pub quiet: bool,
}

/// Verify every manifest entry and aggregate the outcomes.
///
/// Outcomes are collected in manifest order. Skips are reported as they
/// are encountered and never abort the loop.
///
/// # Errors
///
/// Returns [`GateError::InvalidUrl`] or [`GateError::UnsupportedHost`] on
/// the first entry whose URL cannot be classified; no later entries are
/// processed.
pub fn verify_entries(
    entries: &[ManifestEntry],
    fetcher: &dyn DescriptorFetcher,
    describer: &dyn PackageDescriber,
    config: &VerifyConfig<'_>,
    stderr: &mut dyn Write,
) -> Result<RunReport> {
    let total = entries.len();
    let mut reports = Vec::with_capacity(total);

    for (index, entry) in entries.iter().enumerate() {
        if !config.quiet {
            write_stderr_line(stderr, format!("[{}/{total}] {entry}", index + 1));
        }

        let outcome = verify_entry(index, entry, fetcher, describer, config.branch)?;

        if outcome.is_skip() {
            write_stderr_line(stderr, format!("  warning: {outcome}"));
        } else if !config.quiet {
            write_stderr_line(stderr, format!("  {outcome}"));
        }

        reports.push(EntryReport {
            index,
            url: entry.as_str().to_owned(),
            outcome,
        });
    }

    Ok(RunReport::new(reports))
}

/// Classify one entry and resolve its descriptor.
fn verify_entry(
    index: usize,
    entry: &ManifestEntry,
    fetcher: &dyn DescriptorFetcher,
    describer: &dyn PackageDescriber,
    branch: &str,
) -> Result<EntryOutcome> {
    let url = Url::parse(entry.as_str()).map_err(|e| GateError::InvalidUrl {
        index,
        url: entry.as_str().to_owned(),
        reason: e.to_string(),
    })?;

    let host = classify(&url).map_err(|e| match e {
        HostError::MissingHost => GateError::InvalidUrl {
            index,
            url: entry.as_str().to_owned(),
            reason: e.to_string(),
        },
        HostError::Unsupported { host } => GateError::UnsupportedHost { index, host },
    })?;

    let location =
        DescriptorLocation::from_url(&url, host).map_err(|e| GateError::InvalidUrl {
            index,
            url: entry.as_str().to_owned(),
            reason: e.to_string(),
        })?;

    Ok(resolve_descriptor(&location, fetcher, describer, branch))
}

/// Fetch, stage, and describe one located descriptor.
///
/// Every failure in here is soft: the entry is skipped with a reason and
/// the caller moves on.
fn resolve_descriptor(
    location: &DescriptorLocation,
    fetcher: &dyn DescriptorFetcher,
    describer: &dyn PackageDescriber,
    branch: &str,
) -> EntryOutcome {
    let descriptor_url = location.descriptor_url(branch);
    trace!("fetching descriptor from {descriptor_url}");

    let body = match fetcher.fetch(&descriptor_url) {
        Ok(body) => body,
        Err(e) => {
            return EntryOutcome::SkippedUnfetchable {
                reason: e.to_string(),
            };
        }
    };

    let staged = match stage_descriptor(&body) {
        Ok(staged) => staged,
        Err(e) => {
            return EntryOutcome::SkippedUnfetchable {
                reason: format!("could not stage descriptor: {e}"),
            };
        }
    };

    let Some(staged_dir) = Utf8Path::from_path(staged.path()) else {
        return EntryOutcome::SkippedUnfetchable {
            reason: "staging directory path is not valid UTF-8".to_owned(),
        };
    };

    let descriptor = match describer.describe(staged_dir) {
        Ok(descriptor) => descriptor,
        Err(e) => {
            return EntryOutcome::SkippedUnfetchable {
                reason: e.to_string(),
            };
        }
    };

    if descriptor.has_no_products() {
        EntryOutcome::SkippedNoProduct {
            name: descriptor.name,
        }
    } else {
        EntryOutcome::Valid {
            products: descriptor.products.len(),
            name: descriptor.name,
        }
    }
}

/// Write the fetched descriptor into a fresh temporary directory.
///
/// One directory per entry, never shared or reused; the directory is
/// removed when the returned guard drops at the end of the entry.
fn stage_descriptor(body: &str) -> std::io::Result<TempDir> {
    let staged = tempfile::tempdir()?;
    std::fs::write(staged.path().join(DESCRIPTOR_FILE_NAME), body)?;
    Ok(staged)
}

#[cfg(test)]
#[path = "verify_tests.rs"]
mod tests;
