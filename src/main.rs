use std::net::TcpListener;
use std::sync::Arc;

use chirpy::configuration::get_configuration;
use chirpy::startup::run;
use chirpy::store::PgStore;
use chirpy::telemetry::init_telemetry;
use sqlx::postgres::PgPoolOptions;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    init_telemetry();

    tracing::info!("Starting application");

    let configuration = match get_configuration() {
        Ok(config) => {
            tracing::info!("Configuration loaded successfully");
            config
        }
        Err(e) => {
            tracing::error!("Failed to read configuration: {}", e);
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Configuration error",
            ));
        }
    };

    if configuration.jwt.secret.is_empty() {
        tracing::error!("jwt.secret must be set (APP_JWT__SECRET)");
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "Missing JWT secret",
        ));
    }

    tracing::info!("Attempting to connect to database");
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&configuration.database.connection_string())
        .await
        .map_err(|e| {
            tracing::error!("Failed to create connection pool: {}", e);
            std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "Database connection error",
            )
        })?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to run migrations: {}", e);
            std::io::Error::new(std::io::ErrorKind::Other, "Migration error")
        })?;
    tracing::info!("Database ready");

    let address = format!(
        "{}:{}",
        configuration.application.host, configuration.application.port
    );
    let listener = TcpListener::bind(&address)?;
    tracing::info!(
        platform = %configuration.application.platform,
        "Server listening on: {}",
        address
    );

    let server = run(listener, Arc::new(PgStore::new(pool)), configuration)?;
    server.await
}
