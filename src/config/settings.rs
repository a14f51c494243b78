use crate::error::{DemoError, Result};
use std::env;
use std::path::PathBuf;
use url::Url;

pub const SAMPLE_FILE_NAME: &str = "sample_data.xlsx";

#[derive(Clone)]
pub struct Config {
    pub redis_url_override: Option<String>,
    pub redis_host: String,
    pub redis_port: u16,
    pub redis_db: i64,
    pub redis_username: Option<String>,
    pub redis_password: Option<String>,
    pub redis_default_ttl_secs: u64,
    pub processed_ttl_secs: u64,
    pub data_dir: PathBuf,
    pub default_sheet_name: String,
    pub max_rows: usize,
    pub log_level: String,
}

// Manual Debug so the password never reaches a log line
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("redis_url", &self.redacted_url())
            .field("redis_default_ttl_secs", &self.redis_default_ttl_secs)
            .field("processed_ttl_secs", &self.processed_ttl_secs)
            .field("data_dir", &self.data_dir)
            .field("default_sheet_name", &self.default_sheet_name)
            .field("max_rows", &self.max_rows)
            .field("log_level", &self.log_level)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup. Empty values count as unset and
    /// unparseable numbers fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Config {
            redis_url_override: get("REDIS_URL"),
            redis_host: get("REDIS_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            redis_port: get("REDIS_PORT")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(6379),
            redis_db: get("REDIS_DB")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(0),
            redis_username: get("REDIS_USERNAME"),
            redis_password: get("REDIS_PASSWORD"),
            redis_default_ttl_secs: get("REDIS_DEFAULT_TTL_SECS")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(300),
            processed_ttl_secs: get("PROCESSED_TTL_SECS")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(3600),
            data_dir: get("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("data")),
            default_sheet_name: get("DEFAULT_SHEET_NAME").unwrap_or_else(|| "Sheet1".to_string()),
            max_rows: get("MAX_ROWS")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(10_000),
            log_level: get("LOG_LEVEL").unwrap_or_else(|| "warn".to_string()),
        }
    }

    /// Connection URL: `REDIS_URL` verbatim, or assembled from the host/port/db/credential parts.
    pub fn redis_url(&self) -> Result<String> {
        if let Some(url) = &self.redis_url_override {
            return Ok(url.clone());
        }
        let mut url = Url::parse(&format!(
            "redis://{}:{}/{}",
            self.redis_host, self.redis_port, self.redis_db
        ))?;
        if let Some(user) = &self.redis_username {
            url.set_username(user)
                .map_err(|_| DemoError::Config(format!("cannot use username '{}'", user)))?;
        }
        if let Some(password) = &self.redis_password {
            url.set_password(Some(password))
                .map_err(|_| DemoError::Config("cannot set password on Redis URL".to_string()))?;
        }
        Ok(url.to_string())
    }

    /// Same as `redis_url` with any password masked, for printing.
    pub fn redacted_url(&self) -> String {
        match self.redis_url() {
            Ok(raw) => match Url::parse(&raw) {
                Ok(mut url) => {
                    if url.password().is_some() {
                        let _ = url.set_password(Some("***"));
                    }
                    url.to_string()
                }
                Err(_) => "<unparseable REDIS_URL>".to_string(),
            },
            Err(e) => format!("<{}>", e),
        }
    }

    /// `host:port` as shown in connection messages.
    pub fn endpoint(&self) -> String {
        match &self.redis_url_override {
            Some(raw) => Url::parse(raw)
                .ok()
                .and_then(|u| {
                    let host = u.host_str()?.to_string();
                    Some(format!("{}:{}", host, u.port().unwrap_or(6379)))
                })
                .unwrap_or_else(|| "<REDIS_URL>".to_string()),
            None => format!("{}:{}", self.redis_host, self.redis_port),
        }
    }

    pub fn sample_file(&self) -> PathBuf {
        self.data_dir.join(SAMPLE_FILE_NAME)
    }

    pub fn log_level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Warn)
    }

    pub fn validate(&self) -> Result<()> {
        if self.redis_url_override.is_none() {
            if self.redis_host.trim().is_empty() {
                return Err(DemoError::Config("REDIS_HOST cannot be empty".to_string()));
            }
            if self.redis_port == 0 {
                return Err(DemoError::Config("REDIS_PORT cannot be 0".to_string()));
            }
        }
        if self.default_sheet_name.trim().is_empty() {
            return Err(DemoError::Config("DEFAULT_SHEET_NAME cannot be empty".to_string()));
        }
        if self.max_rows == 0 {
            return Err(DemoError::Config("MAX_ROWS must be at least 1".to_string()));
        }
        Ok(())
    }

    pub fn validate_and_log(&self) -> Result<()> {
        self.validate()?;
        log::info!("Application Configuration Loaded: {:?}", self);
        Ok(())
    }
}
