//! Test helpers shared by the behavioral specs.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub use assert_cmd::prelude::*;
pub use predicates;
pub use predicates::prelude::PredicateBooleanExt;
use std::process::Command;

/// A `Command` configured to run the `doccache` binary.
pub fn doccache_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("doccache"))
}
