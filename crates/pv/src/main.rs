use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use anstream::eprintln;
use anyhow::Result;
use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{Args, Parser, Subcommand};
use owo_colors::OwoColorize;
use tracing::debug;

use pv_logging::{Level, setup_logging};
use pv_static::EnvVars;
use pv_version::IdeVersion;

use crate::commands::{ExitStatus, OutputFormat};
use crate::printer::Printer;

mod commands;
mod printer;

const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser)]
#[command(name = "pv", author, version)]
#[command(about = "Inspect, compare and sort IDE build numbers.")]
#[command(styles = STYLES)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global_args: GlobalArgs,
}

#[derive(Args)]
#[command(next_help_heading = "Global options")]
struct GlobalArgs {
    /// Do not print any output.
    #[arg(global = true, long, short, conflicts_with = "verbose")]
    quiet: bool,

    /// Use verbose output; repeat for timestamps and spans.
    ///
    /// You can configure fine-grained logging using the `RUST_LOG` environment variable.
    /// (<https://docs.rs/tracing-subscriber/latest/tracing_subscriber/filter/struct.EnvFilter.html#directives>)
    #[arg(global = true, action = clap::ArgAction::Count, long, short, conflicts_with = "quiet")]
    verbose: u8,

    /// Control colors in output.
    #[arg(
        global = true,
        long,
        value_enum,
        default_value = "auto",
        value_name = "COLOR_CHOICE"
    )]
    color: ColorChoice,
}

#[derive(Debug, Copy, Clone, clap::ValueEnum)]
enum ColorChoice {
    /// Enables colored output only when the output is going to a terminal or TTY with support.
    Auto,

    /// Enables colored output regardless of the detected environment.
    Always,

    /// Disables colored output.
    Never,
}

impl From<ColorChoice> for anstream::ColorChoice {
    fn from(value: ColorChoice) -> Self {
        match value {
            ColorChoice::Auto => Self::Auto,
            ColorChoice::Always => Self::Always,
            ColorChoice::Never => Self::Never,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show the parts and renderings of build numbers.
    Parse(ParseArgs),
    /// Compare two build numbers, ignoring their product codes.
    Compare(CompareArgs),
    /// Sort build numbers from oldest to newest.
    Sort(SortArgs),
    /// Check whether strings are valid build numbers.
    Validate(ValidateArgs),
    /// Describe the IDE in a home directory.
    Ide(IdeArgs),
    /// Join or split single-line parameter lists.
    Params(ParamsArgs),
}

#[derive(Args)]
struct ParseArgs {
    /// The build numbers to parse, e.g. `IU-183.5153.4`.
    #[arg(required = true)]
    versions: Vec<String>,

    /// The format to print the build numbers in.
    #[arg(long, value_enum, default_value_t, env = EnvVars::PV_OUTPUT_FORMAT)]
    format: OutputFormat,
}

#[derive(Args)]
struct CompareArgs {
    left: String,
    right: String,
}

#[derive(Args)]
struct SortArgs {
    /// The build numbers to sort.
    #[arg(required = true)]
    versions: Vec<String>,

    /// Sort from newest to oldest.
    #[arg(long, short)]
    reverse: bool,
}

#[derive(Args)]
struct ValidateArgs {
    /// The strings to check.
    #[arg(required = true)]
    versions: Vec<String>,
}

#[derive(Args)]
struct IdeArgs {
    /// The IDE home directory.
    #[arg(env = EnvVars::PV_IDE_HOME)]
    path: PathBuf,

    /// Use this build number instead of the one in the home directory.
    #[arg(long)]
    version: Option<IdeVersion>,

    /// The format to print the IDE description in.
    #[arg(long, value_enum, default_value_t, env = EnvVars::PV_OUTPUT_FORMAT)]
    format: OutputFormat,
}

#[derive(Args)]
struct ParamsArgs {
    #[command(subcommand)]
    command: ParamsCommand,
}

#[derive(Subcommand)]
enum ParamsCommand {
    /// Join parameters into a single line, quoting where needed.
    Join {
        /// The parameters to join.
        #[arg(allow_hyphen_values = true)]
        parameters: Vec<String>,
    },
    /// Split a single line into parameters, one per output line.
    Split {
        /// The line to split.
        #[arg(allow_hyphen_values = true)]
        line: String,
    },
}

fn run() -> Result<ExitStatus> {
    let Cli {
        command,
        global_args,
    } = Cli::parse();

    // Configure the `tracing` crate, which controls internal logging.
    let ansi = match global_args.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => std::io::stderr().is_terminal(),
    };
    setup_logging(Level::from(global_args.verbose), ansi)?;

    let printer = if global_args.quiet {
        Printer::Quiet
    } else {
        Printer::Default
    };

    anstream::ColorChoice::write_global(global_args.color.into());

    debug!("pv {}", env!("CARGO_PKG_VERSION"));

    match command {
        Commands::Parse(args) => commands::parse(&args.versions, args.format, printer),
        Commands::Compare(args) => commands::compare(&args.left, &args.right, printer),
        Commands::Sort(args) => commands::sort(&args.versions, args.reverse, printer),
        Commands::Validate(args) => commands::validate(&args.versions, printer),
        Commands::Ide(args) => commands::ide(&args.path, args.version, args.format, printer),
        Commands::Params(ParamsArgs {
            command: ParamsCommand::Join { parameters },
        }) => commands::params_join(&parameters, printer),
        Commands::Params(ParamsArgs {
            command: ParamsCommand::Split { line },
        }) => commands::params_split(&line, printer),
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(status) => status.into(),
        Err(err) => {
            eprintln!("{}: {err}", "error".red().bold());
            for cause in err.chain().skip(1) {
                eprintln!("  {}: {}", "Caused by".red().bold(), cause);
            }
            ExitStatus::Error.into()
        }
    }
}
