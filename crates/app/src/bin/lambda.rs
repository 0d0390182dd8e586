//! Parents in Tech website API - AWS Lambda Runtime

use lambda_http::{run, Error};
use pit_common::Config;
use tracing::info;

use pit_app::{create_app, with_lambda_middleware};

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .json()
        .without_time()
        .init();

    info!("Initializing website API Lambda");

    let config =
        Config::from_env().map_err(|e| Error::from(format!("Configuration error: {}", e)))?;

    let cors_origins = config
        .cors_allowed_origins
        .clone()
        .ok_or_else(|| Error::from("CORS_ALLOWED_ORIGINS environment variable is required"))?;

    let app = create_app(&config)
        .map_err(|e| Error::from(format!("App initialization error: {}", e)))?;

    let app = with_lambda_middleware(app, &cors_origins);

    info!("Website API Lambda ready to serve requests");

    run(app).await
}
