//! Diagnostics for the `ftlog` binary.
//!
//! Reports, CSV exports and `--json` documents are written to stdout, so log
//! lines always go to stderr. By default only warnings are shown: a corrupt
//! stored slot or a CSV header with no recognized columns.

use tracing::Level;

/// Targets covered by the default filter: the library and the binary.
const LOG_TARGETS: &[&str] = &["flightlog", "ftlog"];

/// How much diagnostic output to show on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Errors only (`-q`).
    Quiet,
    /// Warnings and errors.
    #[default]
    Normal,
    /// Import and storage details (`-v`).
    Verbose,
    /// Everything, including per-row import tracing (`-vv`).
    Trace,
}

impl Verbosity {
    /// Map the command-line flags to a verbosity. `quiet` wins over `verbose`.
    #[must_use]
    pub fn from_flags(verbose: u8, quiet: bool) -> Self {
        match (quiet, verbose) {
            (true, _) => Self::Quiet,
            (false, 0) => Self::Normal,
            (false, 1) => Self::Verbose,
            (false, _) => Self::Trace,
        }
    }

    /// The most detailed level shown.
    #[must_use]
    pub fn level(self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::WARN,
            Self::Verbose => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }

    /// Filter directives for this verbosity, e.g. `flightlog=warn,ftlog=warn`.
    #[must_use]
    pub fn directives(self) -> String {
        let level = self.level().to_string().to_ascii_lowercase();
        LOG_TARGETS
            .iter()
            .map(|target| format!("{target}={level}"))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Install the stderr subscriber.
///
/// `RUST_LOG`, when set and valid, replaces the directives derived from
/// `verbosity`. Calling this more than once is harmless; only the first call
/// installs a subscriber.
///
/// # Examples
///
/// ```no_run
/// use flightlog::{init_logging, logging::Verbosity};
///
/// init_logging(Verbosity::from_flags(1, false));
/// ```
pub fn init_logging(verbosity: Verbosity) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(verbosity.directives()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(verbosity == Verbosity::Trace)
        .compact()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_flags() {
        assert_eq!(Verbosity::from_flags(0, false), Verbosity::Normal);
        assert_eq!(Verbosity::from_flags(1, false), Verbosity::Verbose);
        assert_eq!(Verbosity::from_flags(2, false), Verbosity::Trace);
        assert_eq!(Verbosity::from_flags(5, false), Verbosity::Trace);
        assert_eq!(Verbosity::from_flags(2, true), Verbosity::Quiet);
    }

    #[test]
    fn test_default_shows_warnings() {
        assert_eq!(Verbosity::default().level(), Level::WARN);
        assert_eq!(Verbosity::Quiet.level(), Level::ERROR);
        assert_eq!(Verbosity::Verbose.level(), Level::DEBUG);
    }

    #[test]
    fn test_directives_cover_library_and_binary() {
        assert_eq!(Verbosity::Normal.directives(), "flightlog=warn,ftlog=warn");
        assert_eq!(Verbosity::Trace.directives(), "flightlog=trace,ftlog=trace");
    }

    #[test]
    fn test_directives_parse() {
        for verbosity in [
            Verbosity::Quiet,
            Verbosity::Normal,
            Verbosity::Verbose,
            Verbosity::Trace,
        ] {
            assert!(tracing_subscriber::EnvFilter::try_new(verbosity.directives()).is_ok());
        }
    }

    #[test]
    fn test_init_logging_twice() {
        init_logging(Verbosity::Quiet);
        init_logging(Verbosity::Trace);
    }
}
