//! CLI command definitions and handlers.

pub mod check;
pub mod defaults;

use clap::{Parser, Subcommand};

/// Scan QA - OCR preflight for scanned documents
#[derive(Parser)]
#[command(name = "scan-qa")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Shared check arguments (paths, thresholds, flags).
    #[command(flatten)]
    pub check: check::CheckArgs,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Check scans and PDFs for OCR readiness
    Check(check::CheckArgs),
    /// Print the effective quality options as TOML
    Defaults,
}

/// Process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Every image was evaluated and accepted.
    Success,
    /// At least one image was rejected or skipped.
    IssuesFound,
    /// The command could not run.
    Error,
}

impl ExitCode {
    /// Numeric process status.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::IssuesFound => 1,
            Self::Error => 2,
        }
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        Self::from(code.code())
    }
}
