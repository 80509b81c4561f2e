use std::sync::Arc;

use common::TelemetryGuard;
use gateway::{
    config::get_configuration,
    logging::setup_logging,
    routes::build_router,
    state::AppState,
};
use inference::ModelClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Fail fast: without the provider credential there is nothing to serve.
    let config = match get_configuration() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("configuration error: {e}");
            eprintln!("set KEY to your inference API key (see .env.example)");
            std::process::exit(1);
        }
    };

    let _telemetry = match config.otlp_endpoint.as_deref() {
        Some(endpoint) => Some(TelemetryGuard::init(
            "detection-gateway",
            endpoint,
            &config.log_level,
            &config.environment,
        )?),
        None => {
            setup_logging(&config);
            None
        }
    };

    let client = match config.provider_url.clone() {
        Some(base_url) => ModelClient::with_base_url(
            config.key.clone(),
            config.model_id.clone(),
            base_url,
        ),
        None => ModelClient::new(config.key.clone(), config.model_id.clone()),
    };

    let state = AppState {
        provider: Arc::new(client),
    };

    let app = build_router(state, &config.static_dir);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(
        model = %config.model_id,
        static_dir = %config.static_dir,
        "server running at http://localhost:{}",
        config.port
    );

    axum::serve(listener, app).await?;

    Ok(())
}
