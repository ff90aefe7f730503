use tracing::Level;
use tracing_subscriber::EnvFilter;

/// How much of the merge the binary reports on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
    Debug,
    Trace,
}

impl Verbosity {
    pub fn from_flags(verbose: u8, quiet: bool) -> Self {
        match (quiet, verbose) {
            (true, _) => Self::Quiet,
            (false, 0) => Self::Normal,
            (false, 1) => Self::Verbose,
            (false, 2) => Self::Debug,
            (false, _) => Self::Trace,
        }
    }

    pub fn level(self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::WARN,
            Self::Verbose => Level::INFO,
            Self::Debug => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }

    /// Filter directives for the library and binary targets.
    pub fn directives(self) -> String {
        let level = self.level();
        format!("maven_build_model={level},mvnmodel={level}")
    }

    fn shows_source(self) -> bool {
        self >= Self::Debug
    }
}

/// Installs the global subscriber on stderr. `RUST_LOG` takes precedence over
/// the flags; quiet mode still reports errors.
pub fn init(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.directives()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbosity.shows_source())
        .with_file(verbosity.shows_source())
        .with_line_number(verbosity.shows_source())
        .compact();

    if verbosity <= Verbosity::Normal {
        builder.without_time().init();
    } else {
        builder.init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_from_flags() {
        assert_eq!(Verbosity::from_flags(0, true), Verbosity::Quiet);
        assert_eq!(Verbosity::from_flags(0, false), Verbosity::Normal);
        assert_eq!(Verbosity::from_flags(1, false), Verbosity::Verbose);
        assert_eq!(Verbosity::from_flags(2, false), Verbosity::Debug);
        assert_eq!(Verbosity::from_flags(10, false), Verbosity::Trace);
        assert_eq!(Verbosity::from_flags(3, true), Verbosity::Quiet);
    }

    #[test]
    fn test_quiet_still_reports_errors() {
        assert_eq!(Verbosity::Quiet.level(), Level::ERROR);
        assert_eq!(
            Verbosity::Quiet.directives(),
            "maven_build_model=ERROR,mvnmodel=ERROR"
        );
    }

    #[test]
    fn test_source_location_only_when_debugging() {
        assert!(!Verbosity::Verbose.shows_source());
        assert!(Verbosity::Debug.shows_source());
        assert!(Verbosity::Trace.shows_source());
    }
}
