//! Command-line interface module.

mod args;
pub mod check;
pub mod common;
pub mod emit;
pub mod resolve;
pub mod serve;

pub use args::{Cli, Commands, EmitCommand, ResolveArgs};
