//! Command handlers for the silica CLI.
//!
//! Each handler owns the human and `--json` rendering for one
//! subcommand; the pipeline logic lives in the library crate.

mod normalize;
mod pack;
mod upload;

pub use normalize::cmd_normalize;
pub use pack::cmd_pack;
pub use upload::cmd_upload;
