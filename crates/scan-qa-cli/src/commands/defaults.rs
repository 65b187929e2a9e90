//! Defaults command - print the effective quality options.

use anyhow::{Context, Result};

use super::check::CheckArgs;

/// Renders the options `check` would run with, after config files and
/// flags are applied, as a TOML document.
pub fn render(args: &CheckArgs) -> Result<String> {
    toml::to_string_pretty(&args.quality_options()).context("Failed to serialize quality options")
}

/// Run the defaults command.
pub fn run(args: &CheckArgs) -> Result<()> {
    print!("{}", render(args)?);
    Ok(())
}
