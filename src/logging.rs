//! Tracing subscriber setup for the binary.
//!
//! Events go to stderr so they never interleave with game prompts on stdout.
//! `RUST_LOG` takes precedence over the built-in default filter.

use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, prelude::*};

/// Default filter when `RUST_LOG` is unset.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose { "numguess=debug" } else { "warn" }
}

pub fn init_logging(verbose: bool) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false),
    );

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow!("Failed to set up tracing subscriber: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(false), "warn");
        assert_eq!(default_directive(true), "numguess=debug");
    }
}
