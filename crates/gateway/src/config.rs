use common::{Environment, LogLevel};
use serde::Deserialize;

/// Process-wide configuration, read once at startup and immutable afterwards.
///
/// `key` is the provider credential and has no default: loading fails
/// without it, and the process must not bind a listener in that case.
#[derive(Deserialize)]
pub struct Config {
    pub port: u16,
    pub key: String,
    pub model_id: String,
    pub provider_url: Option<String>,
    pub static_dir: String,
    pub log_level: LogLevel,
    pub environment: Environment,
    pub otlp_endpoint: Option<String>,
}

pub fn get_configuration() -> Result<Config, config::ConfigError> {
    let config = config::Config::builder()
        .set_default("port", 3000)?
        .set_default("model_id", "facebook/detr-resnet-50")?
        .set_default("static_dir", "public")?
        .set_default("log_level", "info")?
        .set_default("environment", "development")?
        .add_source(config::Environment::default().try_parsing(true))
        .build()?;

    let config: Config = config.try_deserialize::<Config>()?;

    Ok(config)
}
