//! Course advisor
//!
//! Loads a course catalogue and lets the user browse it from an interactive
//! menu, or list and show courses directly from the command line.

use clap::Parser;

mod cli;
use cli::Cli;

fn main() -> anyhow::Result<()> {
    Cli::parse().run()
}
