use std::cmp::Ordering;
use std::fmt::Write;

use anyhow::Result;
use tracing::debug;

use pv_version::IdeVersion;

use crate::commands::{ExitStatus, report};
use crate::printer::Printer;

/// Compare two build numbers, ignoring their product codes.
pub(crate) fn compare(left: &str, right: &str, printer: Printer) -> Result<ExitStatus> {
    let (left, right) = match (IdeVersion::parse(left), IdeVersion::parse(right)) {
        (Ok(left), Ok(right)) => (left, right),
        (left, right) => {
            for err in [left.err(), right.err()].into_iter().flatten() {
                report(&err, printer)?;
            }
            return Ok(ExitStatus::Failure);
        }
    };

    let ordering = left.compare(&right);
    debug!("Compared `{left}` to `{right}`: {ordering:?}");
    let operator = match ordering {
        Ordering::Less => "<",
        Ordering::Equal => "==",
        Ordering::Greater => ">",
    };
    writeln!(printer.stdout(), "{left} {operator} {right}")?;

    Ok(ExitStatus::Success)
}
