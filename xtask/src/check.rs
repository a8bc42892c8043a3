use anyhow::Result;
use colored::Colorize;
use std::time::Instant;

use crate::step::{cargo, finished, OnFailure};

pub fn run() -> Result<()> {
    println!();
    println!("{}", "🔍 Checking workspace...".cyan().bold());
    println!();

    let start = Instant::now();

    cargo("Checking all targets", &["check", "--workspace", "--all-targets"], OnFailure::Abort)?;

    // Mocks are feature-gated; make sure they keep compiling outside tests.
    cargo(
        "Checking platform mocks",
        &["check", "-p", "platform", "--features", "mocks"],
        OnFailure::Abort,
    )?;

    cargo(
        "Running clippy lints",
        &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
        OnFailure::Warn,
    )?;

    if cargo("Checking code formatting", &["fmt", "--all", "--check"], OnFailure::Warn)?.is_none() {
        eprintln!("     Run 'cargo fmt --all' to fix");
    }

    finished("All checks", start);
    Ok(())
}
