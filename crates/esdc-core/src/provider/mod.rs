//! Metadata provider implementations

pub mod signature;

pub use signature::SignatureProvider;
