//! Diagnostic tracing for sispo-setup.
//!
//! Tracing goes to stderr. Operator-facing output (prompts, `Done`, status
//! reports) is printed to stdout and never passes through the subscriber.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset: our own `info` events (each tool
/// command line and layout directory) plus warnings from everything else.
pub const DEFAULT_DIRECTIVES: &str = "warn,sispo_setup=info";

fn filter_from(env_value: Option<&str>) -> EnvFilter {
    match env_value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(directives) => {
            EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES))
        }
        None => EnvFilter::new(DEFAULT_DIRECTIVES),
    }
}

/// Install the stderr subscriber. `RUST_LOG` overrides [`DEFAULT_DIRECTIVES`];
/// an unparsable value falls back to the default.
///
/// ```bash
/// RUST_LOG=sispo_setup=debug sispo-setup provision
/// ```
pub fn init() {
    let env_value = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::registry()
        .with(filter_from(env_value.as_deref()))
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time()
                .compact(),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn unset_uses_default_directives() {
        assert_eq!(filter_from(None).max_level_hint(), Some(LevelFilter::INFO));
        assert_eq!(filter_from(Some("  ")).max_level_hint(), Some(LevelFilter::INFO));
    }

    #[test]
    fn explicit_value_overrides_default() {
        let filter = filter_from(Some("sispo_setup=debug"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn unparsable_value_falls_back() {
        let filter = filter_from(Some("sispo_setup=loud"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::INFO));
    }
}
