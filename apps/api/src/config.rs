//! API configuration

use std::env;
use std::time::Duration;

use blogql_shared_config::{
    get_required_env, parse_env, parse_optional_env, CommonConfig, ConfigError, ConfigResult,
    Environment,
};

use crate::error::ApiResult;
use crate::graphql::LoaderOptions;
use crate::pagination::{PaginationConfig, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// API configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Common configuration shared with other services
    pub common: CommonConfig,

    /// Page sizing for `paginatedPosts`
    pub pagination: PaginationConfig,

    /// Batching applied to every request's loaders
    pub loader_options: LoaderOptions,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Reads `.env` first when present. In production `DATABASE_URL` must be
    /// set explicitly; elsewhere a local default is used.
    pub fn from_env() -> ApiResult<Self> {
        dotenvy::dotenv().ok();

        let environment: Environment = env::var("ENVIRONMENT")
            .unwrap_or_else(|_| "development".to_string())
            .parse()
            .unwrap_or_default();

        if environment.is_production() {
            Self::validate_database_url()?;
        }

        let common = CommonConfig::from_env()?;

        Ok(Self {
            common,
            pagination: Self::load_pagination()?,
            loader_options: Self::load_loader_options()?,
        })
    }

    /// Load and validate page sizing
    fn load_pagination() -> ConfigResult<PaginationConfig> {
        let max_page_size: i32 = parse_env("MAX_PAGE_SIZE", MAX_PAGE_SIZE)?;
        let default_page_size: i32 = parse_env("DEFAULT_PAGE_SIZE", DEFAULT_PAGE_SIZE)?;

        PaginationConfig::new(default_page_size, max_page_size)
    }

    /// Load optional batching overrides
    fn load_loader_options() -> ConfigResult<LoaderOptions> {
        let delay = parse_optional_env::<u64>("LOADER_BATCH_DELAY_MS")?.map(Duration::from_millis);
        let max_batch_size = parse_optional_env::<usize>("LOADER_MAX_BATCH_SIZE")?;

        if max_batch_size == Some(0) {
            return Err(ConfigError::ValidationError(
                "LOADER_MAX_BATCH_SIZE must be at least 1".to_string(),
            ));
        }

        Ok(LoaderOptions {
            delay,
            max_batch_size,
        })
    }

    /// Validate that DATABASE_URL is explicitly set in production
    fn validate_database_url() -> ConfigResult<()> {
        let url = get_required_env("DATABASE_URL")?;
        if url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "DATABASE_URL must not be empty in production".to_string(),
            ));
        }
        Ok(())
    }
}
