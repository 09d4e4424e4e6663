use std::fmt::Write;

use anyhow::Result;
use serde::Serialize;

use pv_version::IdeVersion;

use crate::commands::{ExitStatus, OutputFormat, parse_all};
use crate::printer::Printer;

/// Everything `pv parse` knows about a build number.
///
/// `baseline` and `build` are the effective values, so a `*` or `SNAPSHOT` is `u64::MAX`.
#[derive(Debug, Serialize)]
struct VersionReport<'a> {
    input: &'a str,
    product_code: &'a str,
    baseline: u64,
    build: u64,
    components: Vec<String>,
    snapshot: bool,
    full: String,
    without_product_code: String,
    without_product_code_and_snapshot: String,
}

impl<'a> VersionReport<'a> {
    fn new(input: &'a str, version: &'a IdeVersion) -> Self {
        Self {
            input,
            product_code: version.product_code(),
            baseline: version.baseline(),
            build: version.build(),
            components: version
                .segments()
                .iter()
                .map(ToString::to_string)
                .collect(),
            snapshot: version.is_snapshot(),
            full: version.as_string_with_all_components(),
            without_product_code: version.as_string_without_product_code(),
            without_product_code_and_snapshot: version
                .as_string_without_product_code_and_snapshot(),
        }
    }
}

/// Describe each build number.
pub(crate) fn parse(
    versions: &[String],
    format: OutputFormat,
    printer: Printer,
) -> Result<ExitStatus> {
    let Some(parsed) = parse_all(versions, printer)? else {
        return Ok(ExitStatus::Failure);
    };
    let reports = versions
        .iter()
        .zip(&parsed)
        .map(|(input, version)| VersionReport::new(input, version))
        .collect::<Vec<_>>();

    match format {
        OutputFormat::Text => {
            for (version, report) in parsed.iter().zip(&reports) {
                let mut stdout = printer.stdout();
                writeln!(stdout, "{version}")?;
                if !report.product_code.is_empty() {
                    writeln!(stdout, "  product code: {}", report.product_code)?;
                }
                let segments = version.segments();
                writeln!(stdout, "  baseline: {}", segments[0])?;
                match segments.get(1) {
                    Some(build) => writeln!(stdout, "  build: {build}")?,
                    None => writeln!(stdout, "  build: 0")?,
                }
                writeln!(stdout, "  components: {}", report.components.join("."))?;
                writeln!(stdout, "  snapshot: {}", report.snapshot)?;
                writeln!(stdout, "  full: {}", report.full)?;
            }
        }
        OutputFormat::Json => {
            writeln!(printer.stdout(), "{}", serde_json::to_string_pretty(&reports)?)?;
        }
    }

    Ok(ExitStatus::Success)
}
