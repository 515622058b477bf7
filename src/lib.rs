//! Registry-gate library.
//!
//! This crate provides the validation pipeline behind the `registry-gate`
//! CLI: it loads a package-registry manifest, enforces its local invariants,
//! and verifies each entry against the hosting provider's package
//! descriptor. It is used by the binary and can be consumed programmatically
//! for testing or custom gating workflows.
//!
//! # Modules
//!
//! - [`checks`] - The three local invariant checks and their violations
//! - [`cli`] - Command-line argument definitions
//! - [`descriptor`] - Descriptor location, fetching, and external description
//! - [`error`] - Semantic error types for run-aborting failures
//! - [`host`] - Hosting-provider classification
//! - [`manifest`] - Manifest location and loading
//! - [`output`] - Console output helpers
//! - [`report`] - Per-entry outcomes and the aggregate report
//! - [`run`] - Full validation-run orchestration
//! - [`sorted`] - Corrected-manifest emission on sort violations
//! - [`verify`] - The per-entry remote verification loop

pub mod checks;
pub mod cli;
pub mod descriptor;
pub mod error;
pub mod host;
pub mod manifest;
pub mod output;
pub mod report;
pub mod run;
pub mod sorted;
pub mod verify;
