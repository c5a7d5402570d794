//! Command-line interface module.

mod args;
pub mod compose;
pub mod init;
pub mod open;
pub mod serve;
pub mod share;

pub use args::{Cli, Commands};
