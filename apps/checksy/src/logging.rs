//! Diagnostic logging setup for the binary.
//!
//! Logs go to stderr so they never interleave with report output on stdout.
//! `CHECKSY_LOG` (or `RUST_LOG`) accepts the usual `EnvFilter` directives;
//! `--verbose` raises the default from `warn` to `debug`.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable consulted before `RUST_LOG`.
pub const LOG_ENV: &str = "CHECKSY_LOG";

/// Filter directives: explicit env configuration wins over the verbosity flag.
pub fn filter_directives(verbose: bool) -> String {
    std::env::var(LOG_ENV)
        .or_else(|_| std::env::var(EnvFilter::DEFAULT_ENV))
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| default_directive(verbose).to_string())
}

fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "checksy=debug"
    } else {
        "warn"
    }
}

/// Install the global subscriber. Safe to call more than once.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_new(filter_directives(verbose))
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));
    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .with(filter)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(true), "checksy=debug");
        assert_eq!(default_directive(false), "warn");
    }

    #[test]
    fn test_init_twice_does_not_panic() {
        init(false);
        init(true);
    }
}
