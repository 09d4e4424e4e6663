use std::fmt;
use std::str::FromStr;

use anyhow::Context;
use jiff::Timestamp;
use owo_colors::OwoColorize;
use tracing::level_filters::LevelFilter;
use tracing::{Event, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;

use pv_static::EnvVars;

/// Targets that log at `DEBUG` with `--verbose`, unless `RUST_LOG` is set.
const VERBOSE_DIRECTIVES: &[&str] = &["pv=debug", "pv_version=debug", "pv_ide=debug"];

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// Suppress all tracing output by default (overridable by `RUST_LOG`).
    #[default]
    Default,
    /// Show debug messages by default (overridable by `RUST_LOG`).
    Verbose,
    /// Show debug messages with a timestamp and the enclosing spans (overridable by `RUST_LOG`).
    ExtraVerbose,
}

impl From<u8> for Level {
    /// Map the number of `-v` flags to a level.
    fn from(verbose: u8) -> Self {
        match verbose {
            0 => Self::Default,
            1 => Self::Verbose,
            _ => Self::ExtraVerbose,
        }
    }
}

/// The style of a pv logging line.
pub struct PvFormat {
    pub display_timestamp: bool,
    pub display_level: bool,
    pub show_spans: bool,
}

impl Default for PvFormat {
    /// Regardless of the tracing level, show messages without any adornment.
    fn default() -> Self {
        Self {
            display_timestamp: false,
            display_level: true,
            show_spans: false,
        }
    }
}

impl PvFormat {
    fn for_level(level: Level) -> Self {
        match level {
            Level::Default | Level::Verbose => Self::default(),
            Level::ExtraVerbose => Self {
                display_timestamp: true,
                display_level: true,
                show_spans: true,
            },
        }
    }
}

/// See <https://docs.rs/tracing-subscriber/0.3.18/src/tracing_subscriber/fmt/format/mod.rs.html#1026-1156>
impl<S, N> FormatEvent<S, N> for PvFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let ansi = writer.has_ansi_escapes();

        if self.display_timestamp {
            if ansi {
                write!(writer, "{} ", Timestamp::now().dimmed())?;
            } else {
                write!(writer, "{} ", Timestamp::now())?;
            }
        }

        if self.display_level {
            let level = event.metadata().level();
            if ansi {
                match *level {
                    tracing::Level::TRACE => write!(writer, "{} ", level.purple())?,
                    tracing::Level::DEBUG => write!(writer, "{} ", level.blue())?,
                    tracing::Level::INFO => write!(writer, "{} ", level.green())?,
                    tracing::Level::WARN => write!(writer, "{} ", level.yellow())?,
                    tracing::Level::ERROR => write!(writer, "{} ", level.red())?,
                }
            } else {
                write!(writer, "{level} ")?;
            }
        }

        if self.show_spans {
            let span = event
                .parent()
                .and_then(|id| ctx.span(id))
                .or_else(|| ctx.lookup_current());

            let mut seen = false;
            for span in span.into_iter().flat_map(|span| span.scope().from_root()) {
                seen = true;
                if ansi {
                    write!(writer, "{}:", span.metadata().name().bold())?;
                } else {
                    write!(writer, "{}:", span.metadata().name())?;
                }
            }
            if seen {
                writer.write_char(' ')?;
            }
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

/// Configure `tracing` based on the given [`Level`], taking into account the `RUST_LOG`
/// environment variable.
///
/// Logs are written to stderr. With [`Level::Default`] nothing is shown unless `RUST_LOG` asks
/// for it; the verbose levels show `DEBUG` messages from the pv crates.
pub fn setup_logging(level: Level, ansi: bool) -> anyhow::Result<()> {
    let mut filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::OFF.into())
        .with_env_var(EnvVars::RUST_LOG)
        .from_env()
        .context("Invalid RUST_LOG directives")?;

    if level != Level::Default && std::env::var_os(EnvVars::RUST_LOG).is_none() {
        for directive in VERBOSE_DIRECTIVES {
            filter = filter.add_directive(Directive::from_str(directive)?);
        }
    }

    tracing_subscriber::fmt()
        .with_ansi(ansi)
        .event_format(PvFormat::for_level(level))
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .finish()
        .try_init()
        .context("Failed to initialize logging")?;

    Ok(())
}
