use std::fmt::Write;
use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use pv_ide::{Ide, IdeOptions};
use pv_version::IdeVersion;

use crate::commands::{ExitStatus, OutputFormat};
use crate::printer::Printer;

#[derive(Debug, Serialize)]
struct IdeReport<'a> {
    home: &'a Path,
    version: String,
    layout: &'static str,
    compiled_classes_root: Option<&'a Path>,
}

/// Describe the IDE installed or compiled at `home`.
pub(crate) fn ide(
    home: &Path,
    version: Option<IdeVersion>,
    format: OutputFormat,
    printer: Printer,
) -> Result<ExitStatus> {
    let ide = Ide::from_path(home, IdeOptions { version })?;
    let report = IdeReport {
        home: ide.home(),
        version: ide.version().as_string_with_all_components(),
        layout: ide.layout().as_str(),
        compiled_classes_root: ide.compiled_classes_root(),
    };

    match format {
        OutputFormat::Text => {
            let mut stdout = printer.stdout();
            writeln!(stdout, "{}", report.version)?;
            writeln!(stdout, "  home: {}", report.home.display())?;
            writeln!(stdout, "  layout: {}", report.layout)?;
            if let Some(root) = report.compiled_classes_root {
                writeln!(stdout, "  compiled classes: {}", root.display())?;
            }
        }
        OutputFormat::Json => {
            writeln!(printer.stdout(), "{}", serde_json::to_string_pretty(&report)?)?;
        }
    }

    Ok(ExitStatus::Success)
}
