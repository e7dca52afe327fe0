//! Metadata sources.
//!
//! Each source turns one kind of host introspection into a normalized
//! [`MetadataSet`](crate::descriptor::MetadataSet):
//!
//! - [`rust::RustSource`] reads controllers, handlers and data types straight
//!   from a Rust project's source tree
//! - [`manifest::ManifestSource`] reads a declarative JSON or YAML manifest
//!   exported by the hosting framework

pub mod manifest;
pub mod rust;

pub use manifest::{ManifestFormat, ManifestSource};
pub use rust::RustSource;
