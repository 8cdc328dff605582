//! # Client Configuration
//!
//! The one shared client configuration every resource module goes through:
//! API base URL, uploaded-image base URL, token storage location, and request
//! timeout. Loaded from environment variables (a `.env` file is honored) and
//! validated on startup so a misconfigured dashboard fails fast.
//!
//! | Variable | Default |
//! |---|---|
//! | `DASHBOARD_API_URL` | required |
//! | `DASHBOARD_IMAGE_URL` | `DASHBOARD_API_URL` |
//! | `DASHBOARD_TOKEN_FILE` | `.dashboard/session.json` |
//! | `DASHBOARD_TIMEOUT_SECS` | `10` (1 to 120) |
//!
//! ```rust,no_run
//! use dashboard::config::{config, init_config};
//!
//! fn main() -> dashboard::core::Result<()> {
//!     init_config()?;
//!     let api_url = &config()?.api_url;
//!     # let _ = api_url;
//!     Ok(())
//! }
//! ```

use reqwest::Url;
use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::Duration;

use crate::core::error::{AppError, Result};
use crate::utils::url::image_url;

pub const API_URL_ENV: &str = "DASHBOARD_API_URL";
pub const IMAGE_URL_ENV: &str = "DASHBOARD_IMAGE_URL";
pub const TOKEN_FILE_ENV: &str = "DASHBOARD_TOKEN_FILE";
pub const TIMEOUT_ENV: &str = "DASHBOARD_TIMEOUT_SECS";

const DEFAULT_TOKEN_FILE: &str = ".dashboard/session.json";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Base URL every endpoint path is appended to.
    pub api_url: String,

    /// Base URL for relative image paths returned by the backend.
    pub image_url: String,

    /// JSON file holding the persisted access token.
    pub token_file: PathBuf,

    /// Request timeout in seconds.
    ///
    /// Valid range: 1-120.
    pub timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_source(lib_utils::get_env_opt)
    }

    fn from_source<F>(get: F) -> Result<Self>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let api_url = get(API_URL_ENV)
            .ok_or(lib_utils::envs::Error::MissingEnv(API_URL_ENV))?
            .trim()
            .to_string();
        let image_url = get(IMAGE_URL_ENV)
            .map(|v| v.trim().to_string())
            .unwrap_or_else(|| api_url.clone());
        let token_file = get(TOKEN_FILE_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TOKEN_FILE));
        let timeout_secs = match get(TIMEOUT_ENV) {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| lib_utils::envs::Error::WrongFormat(TIMEOUT_ENV))?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            api_url,
            image_url,
            token_file,
            timeout_secs,
        })
    }

    /// Validate URLs and the timeout range.
    pub fn validate(&self) -> Result<()> {
        check_url(API_URL_ENV, &self.api_url)?;
        check_url(IMAGE_URL_ENV, &self.image_url)?;

        if !(1..=120).contains(&self.timeout_secs) {
            return Err(AppError::Config(format!(
                "{TIMEOUT_ENV} must be between 1 and 120 seconds"
            )));
        }

        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Absolute link for an image path returned by the backend.
    pub fn image_link(&self, path: &str) -> Option<String> {
        image_url(&self.image_url, path)
    }
}

fn check_url(name: &str, value: &str) -> Result<()> {
    let url = Url::parse(value)
        .map_err(|e| AppError::Config(format!("{name} is not a valid URL ({value}): {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(AppError::Config(format!("{name} must be an http(s) URL")));
    }
    Ok(())
}

/// Global configuration instance (initialized once at startup).
static CONFIG: OnceLock<Config> = OnceLock::new();

/// Load, validate and store the global configuration.
pub fn init_config() -> Result<&'static Config> {
    let config = Config::from_env()?;
    config.validate()?;

    CONFIG
        .set(config)
        .map_err(|_| AppError::Config("Config has already been initialized".to_string()))?;
    self::config()
}

/// The global configuration, once [`init_config`] has run.
pub fn config() -> Result<&'static Config> {
    CONFIG
        .get()
        .ok_or_else(|| AppError::Config("Config must be initialized with init_config() before use".to_string()))
}
