use std::fmt::Write;

use anyhow::Result;

use crate::commands::{ExitStatus, parse_all};
use crate::printer::Printer;

/// Print build numbers from oldest to newest, or newest to oldest with `reverse`.
///
/// Builds that compare equal keep their input order.
pub(crate) fn sort(versions: &[String], reverse: bool, printer: Printer) -> Result<ExitStatus> {
    let Some(mut versions) = parse_all(versions, printer)? else {
        return Ok(ExitStatus::Failure);
    };

    if reverse {
        versions.sort_by(|left, right| right.compare(left));
    } else {
        versions.sort_by(|left, right| left.compare(right));
    }

    for version in &versions {
        writeln!(printer.stdout(), "{}", version.as_string_with_all_components())?;
    }

    Ok(ExitStatus::Success)
}
