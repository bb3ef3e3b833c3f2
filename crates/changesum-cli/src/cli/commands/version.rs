//! `changesum version` – print the current checksum algorithm version.

use changesum_core::Checksum;

pub fn run_version() {
    println!("{}", Checksum::current_version());
}
