//! Filename based compliance checks
//!
//! Each submodule implements one rule over the basename of a dataset, on top
//! of the shared name parser and regex extractor.

pub mod crid;
pub mod datetime;
pub mod extension;
pub mod extract;
pub mod iso8601;
pub mod name;
pub mod uniqueness;

pub use crid::CridPatterns;
pub use datetime::{DateTimeExtractor, DateTimePatterns};
pub use iso8601::{IsoLadder, LadderKind};
pub use name::DatasetName;
pub use uniqueness::UniquenessPatterns;
