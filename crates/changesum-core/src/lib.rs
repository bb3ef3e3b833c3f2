//! Versioned content checksums.
//!
//! Computes a stable fingerprint of change content (from a string or a byte
//! stream), tagged with the algorithm version that produced it, and parses
//! previously stored fingerprints back, including legacy unversioned ones.

pub mod config;
pub mod logging;

pub mod checksum;
pub mod error;
pub mod hash;
pub mod line_endings;
pub mod normalize;

pub use crate::checksum::{Checksum, Comparison, CURRENT_VERSION};
pub use crate::error::{ChecksumError, Result};
pub use crate::line_endings::LineEndingReader;
