/// Declares all environment variables read by `pv` and its crates.
pub struct EnvVars;

impl EnvVars {
    /// Equivalent to the `PATH` argument of `pv ide`. If set, `pv ide` describes the IDE
    /// installed in this directory when no path is given on the command line.
    pub const PV_IDE_HOME: &'static str = "PV_IDE_HOME";

    /// Equivalent to the `--format` command-line argument of `pv parse` and `pv ide`, either
    /// `text` or `json`.
    pub const PV_OUTPUT_FORMAT: &'static str = "PV_OUTPUT_FORMAT";

    /// If set, pv will use this value as the log level for its `--verbose` output. Accepts
    /// any filter compatible with the `tracing_subscriber` crate.
    ///
    /// For example:
    ///
    /// * `RUST_LOG=pv=debug` is the equivalent of adding `--verbose` to the command line
    /// * `RUST_LOG=trace` will enable trace-level logging.
    ///
    /// See the [tracing documentation](https://docs.rs/tracing-subscriber/latest/tracing_subscriber/filter/struct.EnvFilter.html#example-syntax)
    /// for more.
    pub const RUST_LOG: &'static str = "RUST_LOG";
}
