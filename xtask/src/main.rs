// Desktop/tooling crate — unwrap/expect/panic acceptable in non-embedded code.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod check;
mod flash;
mod test;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Engineering Simulator development tasks", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Flash firmware to STM32H7 hardware via probe-rs
    Flash {
        /// Build and flash release version
        #[arg(short, long)]
        release: bool,
    },
    /// Check the firmware builds for both the hardware and host targets
    Check,
    /// Run all host-side tests (unit and integration)
    Test {
        /// Run only a single crate's tests
        #[arg(long)]
        package: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Flash { release } => flash::run(release),
        Commands::Check => check::run(),
        Commands::Test { package } => test::run(package.as_deref()),
    }
}
