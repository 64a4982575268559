//! Portal API - AWS Lambda Runtime

use lambda_http::{run, Error};
use tracing::info;

use portal_app::{build_cors_layer, create_app, with_http_layers};
use portal_common::Config;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .json()
        .without_time()
        .init();

    info!("Initializing portal API Lambda");

    let config =
        Config::from_env().map_err(|e| Error::from(format!("Configuration error: {}", e)))?;

    let app = create_app(&config)
        .map_err(|e| Error::from(format!("App initialization error: {}", e)))?;

    let cors_origins = config
        .cors_allowed_origins
        .as_deref()
        .ok_or_else(|| Error::from("CORS_ALLOWED_ORIGINS environment variable is required"))?;

    let app = with_http_layers(app, build_cors_layer(cors_origins));

    info!("Portal API Lambda ready to serve requests");

    run(app).await
}
