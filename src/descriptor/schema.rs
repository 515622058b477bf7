//! Descriptor schema types and decoding.
//!
//! The external description tool prints a single JSON document on stdout;
//! only the package name and the declared products matter here, so the
//! schema deliberately ignores everything else the tool emits.

use serde::Deserialize;
use thiserror::Error;

/// Normalized package metadata obtained from the description tool.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct PackageDescriptor {
    /// The package's declared name.
    pub name: String,
    /// The products the package exposes, in declaration order.
    pub products: Vec<Product>,
}

impl PackageDescriptor {
    /// True when the package declares no products.
    #[must_use]
    pub fn has_no_products(&self) -> bool {
        self.products.is_empty()
    }
}

/// One declared product.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Product {
    /// The product's name.
    pub name: String,
}

/// Errors arising from descriptor decoding.
#[derive(Debug, Error)]
pub enum DescriptorParseError {
    /// The tool's output was not a decodable descriptor document.
    #[error("descriptor decode error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Decode the description tool's stdout into a [`PackageDescriptor`].
///
/// # Errors
///
/// Returns [`DescriptorParseError`] if the document is malformed or missing
/// required fields.
pub fn parse_descriptor(json: &str) -> Result<PackageDescriptor, DescriptorParseError> {
    Ok(serde_json::from_str(json)?)
}
