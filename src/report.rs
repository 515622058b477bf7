//! Per-entry outcomes and the aggregate run report.
//!
//! Outcomes are deliberately not a `Result` — skipped entries are never
//! fatal by themselves. The caller inspects the aggregate and decides the
//! verdict, escalating skips only under strict mode.

use std::fmt;

/// The outcome of verifying one manifest entry.
///
/// Hard failures (invalid URL, unsupported host) abort the run through the
/// error channel and never appear here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryOutcome {
    /// The descriptor resolved and declares at least one product.
    Valid {
        /// The package's declared name.
        name: String,
        /// How many products it declares.
        products: usize,
    },

    /// The descriptor resolved but declares no products.
    SkippedNoProduct {
        /// The package's declared name.
        name: String,
    },

    /// The descriptor could not be fetched or described.
    SkippedUnfetchable {
        /// A human-readable explanation.
        reason: String,
    },
}

impl EntryOutcome {
    /// True for either skip variant.
    #[must_use]
    pub fn is_skip(&self) -> bool {
        matches!(
            self,
            Self::SkippedNoProduct { .. } | Self::SkippedUnfetchable { .. }
        )
    }
}

impl fmt::Display for EntryOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valid { name, products } => {
                let plural = if *products == 1 { "product" } else { "products" };
                write!(f, "ok: {name} ({products} {plural})")
            }
            Self::SkippedNoProduct { name } => {
                write!(f, "skipped: {name} declares no products")
            }
            Self::SkippedUnfetchable { reason } => write!(f, "skipped: {reason}"),
        }
    }
}

/// One entry's verification record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryReport {
    /// Zero-based position of the entry in the manifest.
    pub index: usize,
    /// The entry's URL string.
    pub url: String,
    /// What happened when the entry was verified.
    pub outcome: EntryOutcome,
}

/// The aggregate of all per-entry records, in manifest order.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    entries: Vec<EntryReport>,
}

impl RunReport {
    /// Build a report from per-entry records.
    #[must_use]
    pub fn new(entries: Vec<EntryReport>) -> Self {
        Self { entries }
    }

    /// The per-entry records in manifest order.
    #[must_use]
    pub fn entries(&self) -> &[EntryReport] {
        &self.entries
    }

    /// Number of entries that verified cleanly.
    #[must_use]
    pub fn valid_count(&self) -> usize {
        self.entries.len() - self.skipped_count()
    }

    /// Number of entries that were skipped for either reason.
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.outcome.is_skip())
            .count()
    }

    /// One-line summary for the end of the run.
    #[must_use]
    pub fn summary(&self) -> String {
        let total = self.entries.len();
        let plural = if total == 1 { "entry" } else { "entries" };
        format!(
            "Verified {total} {plural}: {} valid, {} skipped",
            self.valid_count(),
            self.skipped_count()
        )
    }
}
