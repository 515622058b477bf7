//! Local invariant checks over the loaded manifest.
//!
//! Three pure, network-free checks run in a fixed order (extension,
//! duplicates, sort), short-circuiting at the first check that fails. Each
//! check reports the complete offending set, not just the first offender.

use crate::manifest::ManifestEntry;
use std::collections::BTreeMap;
use thiserror::Error;

/// Suffix every entry must carry.
pub const REQUIRED_SUFFIX: &str = ".git";

/// One offending entry: its manifest position and its value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flagged {
    /// Zero-based position in the manifest.
    pub index: usize,
    /// The entry's URL string as loaded.
    pub url: String,
}

impl Flagged {
    fn new(index: usize, entry: &ManifestEntry) -> Self {
        Self {
            index,
            url: entry.as_str().to_owned(),
        }
    }
}

/// A set of entries that collide under case-folded comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateGroup {
    /// The shared case-folded key.
    pub key: String,
    /// Every colliding entry, in manifest order.
    pub members: Vec<Flagged>,
}

/// A failed local invariant check.
///
/// Each variant carries the full offending set so the operator sees every
/// problem of that kind in one run.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Violation {
    /// Entries whose URL does not end in `.git`.
    #[error("{} entries do not end in {REQUIRED_SUFFIX}:\n{}", entries.len(), format_flagged(entries))]
    InvalidExtension {
        /// Every entry missing the suffix, in manifest order.
        entries: Vec<Flagged>,
    },

    /// Groups of entries that are equal under case-folding.
    #[error("{} duplicate groups found:\n{}", groups.len(), format_groups(groups))]
    Duplicates {
        /// Every group of size > 1, ordered by first occurrence.
        groups: Vec<DuplicateGroup>,
    },

    /// Entries that are out of case-folded sort order.
    #[error("{} entries are out of sort order:\n{}", entries.len(), format_flagged(entries))]
    Unsorted {
        /// Every position where the original order differs from the sorted
        /// order, with the original value at that position.
        entries: Vec<Flagged>,
    },
}

fn format_flagged(entries: &[Flagged]) -> String {
    entries
        .iter()
        .map(|f| format!("  [{}] {}", f.index, f.url))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_groups(groups: &[DuplicateGroup]) -> String {
    groups
        .iter()
        .map(|g| {
            let members = g
                .members
                .iter()
                .map(|f| format!("    [{}] {}", f.index, f.url))
                .collect::<Vec<_>>()
                .join("\n");
            format!("  {}:\n{members}", g.key)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Run the three local checks against the loaded entries.
///
/// Checks run in the fixed order extension → duplicates → sort and stop at
/// the first failure.
///
/// # Errors
///
/// Returns the first failing check's [`Violation`].
pub fn run_local_checks(entries: &[ManifestEntry]) -> Result<(), Violation> {
    check_extensions(entries)?;
    check_duplicates(entries)?;
    check_sorted(entries)
}

/// Every entry must end in a literal, case-sensitive `.git`.
fn check_extensions(entries: &[ManifestEntry]) -> Result<(), Violation> {
    let flagged: Vec<Flagged> = entries
        .iter()
        .enumerate()
        .filter(|(_, entry)| !entry.as_str().ends_with(REQUIRED_SUFFIX))
        .map(|(index, entry)| Flagged::new(index, entry))
        .collect();

    if flagged.is_empty() {
        Ok(())
    } else {
        Err(Violation::InvalidExtension { entries: flagged })
    }
}

/// Group entries by case-folded full-string equality and reject any group
/// with more than one member.
///
/// No suffix stripping happens here: two entries differing only by `.git`
/// are distinct, two differing only by letter case are duplicates.
fn check_duplicates(entries: &[ManifestEntry]) -> Result<(), Violation> {
    let mut by_key: BTreeMap<String, Vec<Flagged>> = BTreeMap::new();
    for (index, entry) in entries.iter().enumerate() {
        by_key
            .entry(entry.normalized_key())
            .or_default()
            .push(Flagged::new(index, entry));
    }

    let mut groups: Vec<DuplicateGroup> = by_key
        .into_iter()
        .filter(|(_, members)| members.len() > 1)
        .map(|(key, members)| DuplicateGroup { key, members })
        .collect();
    // Report groups in first-occurrence order rather than key order.
    groups.sort_by_key(|g| g.members.first().map_or(usize::MAX, |m| m.index));

    if groups.is_empty() {
        Ok(())
    } else {
        Err(Violation::Duplicates { groups })
    }
}

/// Compare the manifest against its case-folded sort.
fn check_sorted(entries: &[ManifestEntry]) -> Result<(), Violation> {
    let sorted = sorted_entries(entries);

    let flagged: Vec<Flagged> = entries
        .iter()
        .zip(&sorted)
        .enumerate()
        .filter(|(_, (original, expected))| original != expected)
        .map(|(index, (original, _))| Flagged::new(index, original))
        .collect();

    if flagged.is_empty() {
        Ok(())
    } else {
        Err(Violation::Unsorted { entries: flagged })
    }
}

/// A copy of the entries in case-folded sort order.
///
/// The sort is stable, so entries equal under case-folding keep their
/// relative manifest order.
#[must_use]
pub fn sorted_entries(entries: &[ManifestEntry]) -> Vec<ManifestEntry> {
    let mut sorted = entries.to_vec();
    sorted.sort_by_cached_key(ManifestEntry::normalized_key);
    sorted
}

#[cfg(test)]
#[path = "checks_tests.rs"]
mod tests;
