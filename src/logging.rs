//! Log filter shared by the binaries.

use tracing_subscriber::EnvFilter;

/// Level used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Filter from `RUST_LOG`, falling back to [`DEFAULT_LOG_LEVEL`].
pub fn env_filter() -> EnvFilter {
    filter_from_directives(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref())
}

/// Builds a filter from directives such as `debug` or `rvtree=trace`.
///
/// The directives replace the default level entirely, so they may raise it.
pub fn filter_from_directives(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_LEVEL))
}
