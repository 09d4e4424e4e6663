use std::fmt::Write;

use anyhow::Result;
use owo_colors::OwoColorize;

use pv_version::IdeVersion;

use crate::commands::ExitStatus;
use crate::printer::Printer;

/// Check every input, printing a verdict per line.
pub(crate) fn validate(versions: &[String], printer: Printer) -> Result<ExitStatus> {
    let mut status = ExitStatus::Success;
    for version in versions {
        match IdeVersion::parse(version) {
            Ok(_) => writeln!(printer.stdout(), "{version}: {}", "valid".green())?,
            Err(err) => {
                status = ExitStatus::Failure;
                writeln!(printer.stdout(), "{version}: {} ({})", "invalid".red(), err.kind())?;
            }
        }
    }
    Ok(status)
}
