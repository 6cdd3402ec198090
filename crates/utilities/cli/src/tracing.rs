//! Tracing subscriber setup.

use tracing_subscriber::{
    EnvFilter, filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt,
    util::TryInitError,
};

/// Maps a `-v` count to a log level: none is `WARN`, then `INFO`, `DEBUG` and `TRACE`.
pub const fn verbosity_level(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Installs the global fmt subscriber.
///
/// Without an explicit `env_filter`, the level comes from `verbosity` and any `RUST_LOG`
/// directives are layered on top of it.
pub fn init_tracing_subscriber(
    verbosity: u8,
    env_filter: Option<impl Into<EnvFilter>>,
) -> Result<(), TryInitError> {
    let filter = env_filter.map(Into::into).unwrap_or_else(|| {
        EnvFilter::builder()
            .with_default_directive(verbosity_level(verbosity).into())
            .from_env_lossy()
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .try_init()
}
