use anyhow::{Context, Result};
use colored::Colorize;
use std::process::Command;

pub fn run(package: Option<&str>) -> Result<()> {
    println!();
    println!("{}", "Running host-side tests...".cyan().bold());
    println!();

    let mut args = vec!["test"];
    match package {
        Some(pkg) => {
            args.push("-p");
            args.push(pkg);
        }
        None => {
            // Everything that tests on the host: platform mocks, the whole
            // game core, and the firmware boundary tests.
            args.extend(["--workspace"]);
        }
    }

    let status = Command::new("cargo")
        .args(&args)
        .status()
        .context("Failed to run cargo test")?;
    if !status.success() {
        anyhow::bail!("Tests failed");
    }

    println!();
    println!("{}", "✓ All tests passed".green().bold());
    Ok(())
}
