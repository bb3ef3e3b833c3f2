//! CLI command handlers. Each command is in its own file.

mod compute;
mod input;
mod parse;
mod verify;
mod version;

pub use compute::run_compute;
pub use input::InputArgs;
pub use parse::run_parse;
pub use verify::run_verify;
pub use version::run_version;
