//! Development-time tracing for the mutant CLI.
//!
//! Verdicts and stats go to stdout; everything emitted here goes to stderr so
//! scripted callers can keep parsing command output regardless of `RUST_LOG`.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset.
const QUIET_DIRECTIVE: &str = "warn";

/// Filter used for `--verbose` when `RUST_LOG` is unset: store loads, cache
/// hits and recorded verdicts.
const VERBOSE_DIRECTIVE: &str = "warn,mutant=debug";

/// Install the stderr subscriber. `RUST_LOG` always wins over `verbose`.
///
/// ```bash
/// RUST_LOG=mutant::io=debug mutant check AAAA TTTT CCCC GGGG
/// ```
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}

fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        VERBOSE_DIRECTIVE
    } else {
        QUIET_DIRECTIVE
    }
}
