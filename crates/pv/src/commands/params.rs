use std::fmt::Write;

use anyhow::Result;

use crate::commands::ExitStatus;
use crate::printer::Printer;

/// Print the parameters joined into a single line.
pub(crate) fn params_join(parameters: &[String], printer: Printer) -> Result<ExitStatus> {
    writeln!(printer.stdout(), "{}", pv_params::join(parameters))?;
    Ok(ExitStatus::Success)
}

/// Print each parameter of the line on its own line.
pub(crate) fn params_split(line: &str, printer: Printer) -> Result<ExitStatus> {
    for parameter in pv_params::split(line) {
        writeln!(printer.stdout(), "{parameter}")?;
    }
    Ok(ExitStatus::Success)
}
