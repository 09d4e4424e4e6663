use std::process::ExitCode;

use owo_colors::OwoColorize;

use pv_version::IdeVersion;

pub(crate) use compare::compare;
pub(crate) use ide::ide;
pub(crate) use params::{params_join, params_split};
pub(crate) use parse::parse;
pub(crate) use sort::sort;
pub(crate) use validate::validate;

use crate::printer::Printer;

mod compare;
mod ide;
mod params;
mod parse;
mod sort;
mod validate;

#[derive(Copy, Clone)]
pub(crate) enum ExitStatus {
    /// The command succeeded.
    Success,

    /// The command failed due to an error in the user input.
    Failure,

    /// The command failed with an unexpected error.
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => Self::from(0),
            ExitStatus::Failure => Self::from(1),
            ExitStatus::Error => Self::from(2),
        }
    }
}

/// The output format of commands that describe a value.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Parse every input, reporting the invalid ones on stderr.
///
/// Returns `None` if any input is invalid.
pub(super) fn parse_all(
    versions: &[String],
    printer: Printer,
) -> anyhow::Result<Option<Vec<IdeVersion>>> {
    let mut parsed = Vec::with_capacity(versions.len());
    let mut valid = true;
    for version in versions {
        match IdeVersion::parse(version) {
            Ok(version) => parsed.push(version),
            Err(err) => {
                valid = false;
                report(&err, printer)?;
            }
        }
    }
    Ok(valid.then_some(parsed))
}

/// Print a user-facing error on stderr.
pub(super) fn report(err: &dyn std::error::Error, printer: Printer) -> std::fmt::Result {
    use std::fmt::Write;

    writeln!(printer.stderr(), "{}: {err}", "error".red().bold())
}
