//! Versioned checksums of change content.
//!
//! A [`Checksum`] pairs the algorithm version that produced a digest with
//! the digest itself. Its canonical text form is `<version>:<digest>`, e.g.
//! `8:2cdf9876e74347162401315d34b83746`, and that string is what gets stored
//! next to an applied change and later fed back into [`Checksum::parse`].
//!
//! Stored values written before versioning existed carry no `<version>:`
//! prefix. They parse as version 1 with the whole string as digest, so a
//! caller can tell "different algorithm" apart from "different content".
//!
//! This module does not decide what content gets checksummed, and it does
//! not persist anything.

use crate::error::{ChecksumError, Result};
use crate::hash::{hex_digest, hex_digest_reader, ContentHash};
use crate::line_endings::LineEndingReader;
use crate::normalize::normalize;
use regex::Regex;
use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use std::convert::Infallible;
use std::fmt;
use std::fs::File;
use std::hash::{Hash, Hasher};
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use std::sync::OnceLock;

/// Algorithm generation stamped on every freshly computed checksum.
///
/// Any change to normalization or to the hash function must bump this so
/// previously stored checksums stay distinguishable.
pub const CURRENT_VERSION: u32 = 8;

/// Version assigned to stored values without a version prefix.
pub const LEGACY_VERSION: u32 = 1;

pub const DELIMITER: char = ':';

fn checksum_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^([0-9]):([a-zA-Z0-9]+)").expect("checksum pattern compiles")
    })
}

/// Immutable (version, digest) pair. Equality and hashing go through the
/// canonical string, so the same digest under two versions is not equal.
#[derive(Debug, Clone)]
pub struct Checksum {
    version: u32,
    digest: String,
}

/// How a stored checksum relates to one computed now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Unchanged,
    /// Same algorithm version, different digest: the content was modified.
    Changed,
    /// Versions differ, so the digests cannot be compared directly.
    AlgorithmChanged {
        stored_version: u32,
        current_version: u32,
    },
}

impl Checksum {
    fn new(digest: String, version: u32) -> Self {
        Self { version, digest }
    }

    /// Current algorithm version.
    pub fn current_version() -> u32 {
        CURRENT_VERSION
    }

    /// Checksum of string content after full text normalization
    /// (line endings, U+FFFD removal, NFC).
    pub fn compute(text: &str) -> Self {
        let bytes = normalize(text);
        let digest = hex_digest::<ContentHash>(&bytes);
        tracing::debug!(
            version = CURRENT_VERSION,
            bytes = bytes.len(),
            "computed text checksum"
        );
        Self::new(digest, CURRENT_VERSION)
    }

    /// Checksum of a byte stream, consumed to its end.
    ///
    /// With `standardize_line_endings` the bytes pass through
    /// [`LineEndingReader`] first. No other normalization is applied, so
    /// the result generally differs from [`Checksum::compute`] on the same
    /// text when it contains U+FFFD or decomposed characters.
    pub fn compute_stream<R: Read>(stream: R, standardize_line_endings: bool) -> Result<Self> {
        let (digest, bytes) = if standardize_line_endings {
            hex_digest_reader::<ContentHash, _>(LineEndingReader::new(stream))?
        } else {
            hex_digest_reader::<ContentHash, _>(stream)?
        };
        tracing::debug!(
            version = CURRENT_VERSION,
            bytes,
            standardize_line_endings,
            "computed stream checksum"
        );
        Ok(Self::new(digest, CURRENT_VERSION))
    }

    /// Stream the file at `path` through [`Checksum::compute_stream`].
    pub fn compute_path(path: &Path, standardize_line_endings: bool) -> Result<Self> {
        let file = File::open(path).map_err(|source| ChecksumError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Self::compute_stream(file, standardize_line_endings)
    }

    /// Parse a stored checksum. `None` in means no checksum was recorded.
    ///
    /// Never fails: a value without the `<digit>:<alnum>` prefix is taken
    /// whole as a version-1 digest.
    pub fn parse(stored: Option<&str>) -> Option<Self> {
        stored.map(Self::parse_str)
    }

    /// True when `stored` carries a `<digit>:<alnum>` version prefix, i.e.
    /// [`Checksum::parse`] will not take the legacy fallback for it.
    pub fn has_version_prefix(stored: &str) -> bool {
        checksum_pattern().is_match(stored)
    }

    fn parse_str(stored: &str) -> Self {
        // Layout: <1 digit: algorithm version>:<1..n alphanumeric digest>
        if let Some(caps) = checksum_pattern().captures(stored) {
            let version = u32::from(caps[1].as_bytes()[0] - b'0');
            return Self::new(caps[2].to_string(), version);
        }
        tracing::debug!(stored, "no version prefix, reading as legacy checksum");
        Self::new(stored.to_string(), LEGACY_VERSION)
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn digest(&self) -> &str {
        &self.digest
    }

    /// True when produced by (or asserted for) the current algorithm.
    pub fn is_current(&self) -> bool {
        self.version == CURRENT_VERSION
    }

    /// Compare this stored checksum with a freshly computed one.
    pub fn compare_to(&self, fresh: &Checksum) -> Comparison {
        if self == fresh {
            Comparison::Unchanged
        } else if self.version != fresh.version {
            Comparison::AlgorithmChanged {
                stored_version: self.version,
                current_version: fresh.version,
            }
        } else {
            Comparison::Changed
        }
    }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.version, DELIMITER, self.digest)
    }
}

impl PartialEq for Checksum {
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}

impl Eq for Checksum {}

impl Hash for Checksum {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl FromStr for Checksum {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::parse_str(s))
    }
}

impl From<&str> for Checksum {
    fn from(s: &str) -> Self {
        Self::parse_str(s)
    }
}

impl Serialize for Checksum {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Checksum {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct CanonicalVisitor;

        impl de::Visitor<'_> for CanonicalVisitor {
            type Value = Checksum;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a checksum string such as \"8:<digest>\"")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Checksum, E> {
                Ok(Checksum::parse_str(v))
            }
        }

        deserializer.deserialize_str(CanonicalVisitor)
    }
}
