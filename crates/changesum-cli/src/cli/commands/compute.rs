//! `changesum compute` – print the checksum of the given content.

use anyhow::Result;
use changesum_core::config::ChangesumConfig;

use super::InputArgs;

pub fn run_compute(input: &InputArgs, cfg: &ChangesumConfig) -> Result<()> {
    let checksum = input.checksum(cfg)?;
    println!("{checksum}");
    Ok(())
}
