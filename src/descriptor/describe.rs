//! External description-tool invocation.
//!
//! The fetched descriptor file alone is source code, not data; an external
//! tool evaluates it and prints the package's normalized metadata as JSON.
//! The tool runs in the per-entry staging directory with a bounded wait so
//! one hung invocation cannot stall the whole run.

use crate::descriptor::schema::{DescriptorParseError, PackageDescriptor, parse_descriptor};
use camino::Utf8Path;
use std::process::{Command, Stdio};
use std::time::Duration;
use wait_timeout::ChildExt;

/// Upper bound on one description-tool invocation.
const DESCRIBE_TIMEOUT: Duration = Duration::from_secs(60);

/// Trait for obtaining a package descriptor from a staged directory.
///
/// The production implementation is [`SwiftPackageDescriber`]; tests mock
/// this to exercise the verification loop without spawning processes.
#[cfg_attr(test, mockall::automock)]
pub trait PackageDescriber {
    /// Describe the package whose descriptor file is staged in `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the tool cannot be spawned, exceeds its time
    /// bound, exits unsuccessfully, or prints undecodable output.
    fn describe(&self, dir: &Utf8Path) -> Result<PackageDescriptor, DescribeError>;
}

/// Errors arising from description-tool invocation.
#[derive(Debug, thiserror::Error)]
pub enum DescribeError {
    /// Spawning or waiting on the tool failed.
    #[error("could not run description tool: {0}")]
    Io(#[from] std::io::Error),

    /// The tool did not finish within the time bound.
    #[error("description tool timed out after {} seconds", DESCRIBE_TIMEOUT.as_secs())]
    Timeout,

    /// The tool exited with a failure status.
    #[error("description tool failed: {detail}")]
    CommandFailed {
        /// The tool's stderr, trimmed, or its exit status when stderr is
        /// empty.
        detail: String,
    },

    /// The tool's stdout was not a decodable descriptor.
    #[error(transparent)]
    Decode(#[from] DescriptorParseError),
}

/// Describer that shells out to `swift package dump-package`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwiftPackageDescriber;

impl PackageDescriber for SwiftPackageDescriber {
    fn describe(&self, dir: &Utf8Path) -> Result<PackageDescriptor, DescribeError> {
        let mut child = Command::new("swift")
            .args(["package", "dump-package"])
            .current_dir(dir.as_std_path())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        let Some(status) = child.wait_timeout(DESCRIBE_TIMEOUT)? else {
            let _ = child.kill();
            let _ = child.wait();
            return Err(DescribeError::Timeout);
        };

        let stdout = child
            .stdout
            .take()
            .map(std::io::read_to_string)
            .transpose()?
            .unwrap_or_default();
        let stderr = child
            .stderr
            .take()
            .map(std::io::read_to_string)
            .transpose()?
            .unwrap_or_default();

        if !status.success() {
            let trimmed = stderr.trim();
            let detail = if trimmed.is_empty() {
                status.to_string()
            } else {
                trimmed.to_owned()
            };
            return Err(DescribeError::CommandFailed { detail });
        }

        Ok(parse_descriptor(&stdout)?)
    }
}
