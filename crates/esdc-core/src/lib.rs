//! esdc Core - Filename compliance checks for Earth-science granules
//!
//! This crate partitions granule filenames into release identifiers and
//! date-time fields, validates them, and drives the checks over collections
//! listed in a file. Format detection is behind the [`ports::MetadataProvider`]
//! trait.

pub mod collection;
pub mod config;
pub mod dataname;
pub mod error;
pub mod models;
pub mod ports;
pub mod provider;

pub use error::{EsdcError, Result};
