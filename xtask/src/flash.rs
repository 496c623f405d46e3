use anyhow::{Context, Result};
use colored::Colorize;
use std::process::Command;

pub fn run(release: bool) -> Result<()> {
    println!();
    println!("{}", "Building firmware for STM32H743ZI...".cyan().bold());

    let mut args = vec![
        "build",
        "-p",
        "firmware",
        "--target",
        "thumbv7em-none-eabihf",
        "--features",
        "hardware",
    ];
    if release {
        args.push("--release");
    }

    let status = Command::new("cargo")
        .args(&args)
        .status()
        .context("Failed to build firmware")?;
    if !status.success() {
        anyhow::bail!("Firmware build failed");
    }

    let profile = if release { "release" } else { "debug" };
    let elf = format!("target/thumbv7em-none-eabihf/{profile}/firmware");

    println!("{}", "Flashing via probe-rs...".cyan().bold());
    let status = Command::new("probe-rs")
        .args(["run", "--chip", "STM32H743ZITx", &elf])
        .status()
        .context("Failed to run probe-rs (is it installed and a probe attached?)")?;
    if !status.success() {
        anyhow::bail!("Flash failed");
    }

    println!("{}", "✓ Flashed".green().bold());
    Ok(())
}
