pub mod settings;

pub use settings::Config;

use crate::error::DemoError;
use crate::utils::setup_logging;
use log::LevelFilter;
use std::sync::Arc;

/// Reads `.env` (if present) and the environment. Nothing is validated yet.
pub fn load_config() -> Config {
    dotenv::dotenv().ok(); // Missing .env is fine
    Config::from_env()
}

/// Installs the logger at the configured level, then validates `config` and
/// logs it, so the configuration line reaches the logger.
pub fn start_with<F>(config: Config, install_logger: F) -> Result<Arc<Config>, DemoError>
where
    F: FnOnce(LevelFilter) -> Result<(), fern::InitError>,
{
    install_logger(config.log_level_filter())
        .map_err(|e| DemoError::Config(format!("logging setup failed: {}", e)))?;
    config.validate_and_log()?;
    Ok(Arc::new(config))
}

/// `.env` and environment, stderr logging, validation.
pub fn start() -> Result<Arc<Config>, DemoError> {
    start_with(load_config(), setup_logging)
}
