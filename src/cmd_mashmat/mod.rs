//! Subcommand modules for the `mashmat` binary.

pub mod dist;
pub mod key;
pub mod sketch;
pub mod tab;
pub mod utils;
