use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialise structured logging.
///
/// Logs are emitted as JSON on stdout; `RUST_LOG` controls the level
/// (default `info`). `log` records from actix are forwarded into the same
/// subscriber.
pub fn init_telemetry() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let formatting_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stdout)
        .json();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(formatting_layer)
        .init();
}
