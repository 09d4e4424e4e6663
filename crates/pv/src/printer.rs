use std::fmt;

use anstream::{eprint, print};

/// Where user-facing output goes, as opposed to logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Printer {
    Default,
    /// `--quiet`: results and reported errors are dropped, the exit status remains.
    Quiet,
}

impl Printer {
    pub(crate) fn stdout(self) -> Output {
        Output {
            stream: Stream::Stdout,
            enabled: self == Self::Default,
        }
    }

    pub(crate) fn stderr(self) -> Output {
        Output {
            stream: Stream::Stderr,
            enabled: self == Self::Default,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stream {
    Stdout,
    Stderr,
}

/// A standard stream that strips colors when they aren't supported.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Output {
    stream: Stream,
    enabled: bool,
}

impl fmt::Write for Output {
    #[allow(clippy::print_stdout, clippy::print_stderr)]
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if !self.enabled {
            return Ok(());
        }
        match self.stream {
            Stream::Stdout => print!("{s}"),
            Stream::Stderr => eprint!("{s}"),
        }
        Ok(())
    }
}
