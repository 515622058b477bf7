//! Package descriptor resolution.
//!
//! Resolving one manifest entry means locating its descriptor source file on
//! the provider's raw-content mirror, fetching it, and asking an external
//! description tool what the package declares. Each stage sits behind its
//! own seam:
//!
//! - [`location`] - user/repo derivation and descriptor URL construction
//! - [`download`] - the [`download::DescriptorFetcher`] trait and its HTTP
//!   implementation
//! - [`describe`] - the [`describe::PackageDescriber`] trait and the
//!   external-tool implementation
//! - [`schema`] - the decoded [`schema::PackageDescriptor`] types

pub mod describe;
pub mod download;
pub mod location;
pub mod schema;
