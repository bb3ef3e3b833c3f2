//! `changesum verify` – check a stored checksum against current content.

use anyhow::{bail, Result};
use changesum_core::config::ChangesumConfig;
use changesum_core::{Checksum, Comparison};

use super::InputArgs;

/// Line printed for a comparison, and whether it means the content changed.
#[derive(Debug, PartialEq, Eq)]
struct VerifyOutcome {
    line: String,
    changed: bool,
}

fn verify_outcome(stored: &Checksum, fresh: &Checksum) -> VerifyOutcome {
    match stored.compare_to(fresh) {
        Comparison::Unchanged => VerifyOutcome {
            line: "unchanged".to_string(),
            changed: false,
        },
        Comparison::AlgorithmChanged {
            stored_version,
            current_version,
        } => {
            tracing::info!(%stored, %fresh, "stored checksum predates current algorithm");
            VerifyOutcome {
                line: format!(
                    "algorithm-changed (stored v{stored_version}, current v{current_version}): {fresh}"
                ),
                changed: false,
            }
        }
        Comparison::Changed => VerifyOutcome {
            line: format!("changed (stored {stored}, computed {fresh})"),
            changed: true,
        },
    }
}

/// Prints the outcome on stdout; a changed checksum is then returned as an
/// error so the process exits with status 1.
pub fn run_verify(stored: &str, input: &InputArgs, cfg: &ChangesumConfig) -> Result<()> {
    let stored = Checksum::from(stored);
    let fresh = input.checksum(cfg)?;
    check(&stored, &fresh)
}

fn check(stored: &Checksum, fresh: &Checksum) -> Result<()> {
    let outcome = verify_outcome(stored, fresh);
    println!("{}", outcome.line);
    if outcome.changed {
        bail!("content changed: stored {stored}, computed {fresh}");
    }
    Ok(())
}
