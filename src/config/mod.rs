use crate::core::{AppError, BusinessClock, Currency, Result};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

pub mod company;
pub mod database;
pub mod server;

pub use company::CompanyProfile;
pub use database::DatabaseConfig;
pub use server::ServerConfig;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub security: SecurityConfig,
    pub storage: Option<StorageConfig>,
    pub company: CompanyProfile,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub env: String,
    pub log_level: String,
    pub log_format: String,
    /// Whole-hour UTC offset of the business calendar
    pub utc_offset_hours: i32,
    pub default_currency: Currency,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
    pub rate_limit_per_minute: u32,
    pub cors_allowed_origin: Option<String>,
}

/// Object storage for generated documents
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    pub base_url: String,
    pub api_key: String,
    pub bucket: String,
    pub max_retries: u32,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let company_path = env::var("COMPANY_PROFILE_PATH").ok().map(PathBuf::from);

        let config = Config {
            app: AppConfig {
                env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
                log_format: env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string()),
                utc_offset_hours: env::var("BUSINESS_UTC_OFFSET_HOURS")
                    .unwrap_or_else(|_| BusinessClock::DEFAULT_OFFSET_HOURS.to_string())
                    .parse()
                    .map_err(|_| {
                        AppError::Configuration("Invalid BUSINESS_UTC_OFFSET_HOURS".to_string())
                    })?,
                default_currency: env::var("DEFAULT_CURRENCY")
                    .unwrap_or_else(|_| "QAR".to_string())
                    .parse()
                    .map_err(AppError::Configuration)?,
            },
            database: DatabaseConfig::from_env()?,
            server: ServerConfig::from_env()?,
            security: SecurityConfig {
                rate_limit_per_minute: env::var("RATE_LIMIT_PER_MINUTE")
                    .unwrap_or_else(|_| "600".to_string())
                    .parse()
                    .map_err(|_| {
                        AppError::Configuration("Invalid RATE_LIMIT_PER_MINUTE".to_string())
                    })?,
                cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN").ok(),
            },
            storage: StorageConfig::from_env()?,
            company: CompanyProfile::load(company_path.as_deref())?,
        };

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.security.rate_limit_per_minute == 0 {
            return Err(AppError::Configuration(
                "Rate limit must be greater than 0".to_string(),
            ));
        }

        if BusinessClock::from_offset_hours(self.app.utc_offset_hours).is_none() {
            return Err(AppError::Configuration(format!(
                "Business UTC offset out of range: {}",
                self.app.utc_offset_hours
            )));
        }

        self.company.validate()?;

        Ok(())
    }

    /// Clock for the configured business timezone
    pub fn business_clock(&self) -> BusinessClock {
        BusinessClock::from_offset_hours(self.app.utc_offset_hours).unwrap_or_default()
    }
}

impl StorageConfig {
    /// Storage is optional, but partially configured storage is an error
    pub fn from_env() -> Result<Option<Self>> {
        let base_url = env::var("STORAGE_BASE_URL").ok();
        let api_key = env::var("STORAGE_API_KEY").ok();
        let bucket = env::var("STORAGE_BUCKET").ok();

        let max_retries = env::var("STORAGE_MAX_RETRIES")
            .unwrap_or_else(|_| "3".to_string())
            .parse()
            .map_err(|_| AppError::Configuration("Invalid STORAGE_MAX_RETRIES".to_string()))?;

        Self::from_parts(base_url, api_key, bucket, max_retries)
    }

    pub fn from_parts(
        base_url: Option<String>,
        api_key: Option<String>,
        bucket: Option<String>,
        max_retries: u32,
    ) -> Result<Option<Self>> {
        match (base_url, api_key, bucket) {
            (None, None, None) => Ok(None),
            (Some(base_url), Some(api_key), Some(bucket)) => Ok(Some(Self {
                base_url: base_url.trim_end_matches('/').to_string(),
                api_key,
                bucket,
                max_retries,
            })),
            _ => Err(AppError::Configuration(
                "STORAGE_BASE_URL, STORAGE_API_KEY and STORAGE_BUCKET must be set together"
                    .to_string(),
            )),
        }
    }
}
