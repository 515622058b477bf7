//! Full validation-run orchestration.
//!
//! Sequences the pipeline (locate, load, local checks, remote verification,
//! verdict) with the fetcher and describer injected so the whole run can be
//! exercised in tests without network access or external processes.

use crate::checks::{Violation, run_local_checks};
use crate::descriptor::describe::PackageDescriber;
use crate::descriptor::download::DescriptorFetcher;
use crate::error::{GateError, Result};
use crate::manifest::{SearchPaths, load_manifest};
use crate::output::write_stderr_line;
use crate::report::RunReport;
use crate::sorted::write_sorted_manifest;
use crate::verify::{VerifyConfig, verify_entries};
use std::io::Write;

/// Settings for one validation run.
#[derive(Debug, Clone, Default)]
pub struct RunConfig {
    /// Where to look for the manifest.
    pub search: SearchPaths,
    /// Branch package descriptors are fetched from.
    pub branch: String,
    /// Treat skipped entries as failures.
    pub strict: bool,
    /// Stop after the local checks.
    pub local_only: bool,
    /// Suppress progress output.
    pub quiet: bool,
}

/// Run the complete validation pipeline.
///
/// Local invariant violations abort before any entry is verified; on a sort
/// violation the corrected copy is written first, as its own best-effort
/// step, and a write failure downgrades to a warning. Remote verification
/// then runs entry by entry; its soft outcomes only fail the run under
/// `strict`.
///
/// # Errors
///
/// Returns the first fatal failure: manifest location/parse errors, a local
/// invariant [`Violation`], an invalid or unsupported entry URL, or
/// [`GateError::StrictSkips`] when strict mode is set and entries were
/// skipped.
pub fn run_validation(
    config: &RunConfig,
    fetcher: &dyn DescriptorFetcher,
    describer: &dyn PackageDescriber,
    stderr: &mut dyn Write,
) -> Result<Option<RunReport>> {
    let path = config.search.locate()?;
    let manifest = load_manifest(&path)?;

    if !config.quiet {
        let plural = if manifest.len() == 1 { "entry" } else { "entries" };
        write_stderr_line(
            stderr,
            format!("Validating {path} ({} {plural})", manifest.len()),
        );
    }

    if let Err(violation) = run_local_checks(manifest.entries()) {
        if matches!(violation, Violation::Unsorted { .. }) {
            match write_sorted_manifest(&manifest) {
                Ok(sorted_path) => write_stderr_line(
                    stderr,
                    format!("Sorted copy written to {sorted_path} for adoption"),
                ),
                Err(e) => write_stderr_line(stderr, format!("warning: {e}")),
            }
        }
        return Err(violation.into());
    }

    if config.local_only {
        if !config.quiet {
            write_stderr_line(stderr, "Local checks passed; remote verification skipped");
        }
        return Ok(None);
    }

    let verify_config = VerifyConfig {
        branch: &config.branch,
        quiet: config.quiet,
    };
    let report = verify_entries(manifest.entries(), fetcher, describer, &verify_config, stderr)?;

    write_stderr_line(stderr, report.summary());

    if config.strict && report.skipped_count() > 0 {
        return Err(GateError::StrictSkips {
            skipped: report.skipped_count(),
        });
    }

    Ok(Some(report))
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
