//! `changesum parse` – show what a stored checksum string contains.

use anyhow::Result;
use changesum_core::Checksum;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct ParsedChecksum<'a> {
    checksum: &'a Checksum,
    version: u32,
    digest: &'a str,
    current: bool,
    /// Stored without a version prefix; read as a version-1 digest.
    legacy: bool,
}

fn describe<'a>(stored: &str, checksum: &'a Checksum) -> ParsedChecksum<'a> {
    ParsedChecksum {
        checksum,
        version: checksum.version(),
        digest: checksum.digest(),
        current: checksum.is_current(),
        legacy: !Checksum::has_version_prefix(stored),
    }
}

fn status(parsed: &ParsedChecksum<'_>) -> &'static str {
    if parsed.legacy {
        "legacy, unversioned"
    } else if parsed.current {
        "current"
    } else {
        "outdated"
    }
}

pub fn run_parse(stored: &str, json: bool) -> Result<()> {
    let checksum = Checksum::from(stored);
    let parsed = describe(stored, &checksum);
    if json {
        println!("{}", serde_json::to_string_pretty(&parsed)?);
    } else {
        println!("version: {} ({})", parsed.version, status(&parsed));
        println!("digest:  {}", parsed.digest);
    }
    Ok(())
}
