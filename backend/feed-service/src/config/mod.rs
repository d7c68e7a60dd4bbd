/// Configuration management for Feed Service
///
/// Loads settings from environment variables, reading a `.env` file first
/// when one is present.
use serde::{Deserialize, Serialize};

const DEV_JWT_SECRET: &str = "proconnect-dev-secret";

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    /// Feed ranking weights and page sizes
    pub feed: FeedConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development, staging, production)
    pub env: String,
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    /// Apply bundled migrations on startup
    pub run_migrations: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HS256 secret shared with the identity provider
    #[serde(skip_serializing)]
    pub jwt_secret: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    pub content_similarity_weight: f64,
    pub decay_rate_per_day: f64,
    pub view_weight: f64,
    pub like_weight: f64,
    pub save_weight: f64,
    pub default_page_size: u32,
    pub max_page_size: u32,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            content_similarity_weight: 10.0,
            decay_rate_per_day: 0.1,
            view_weight: 0.1,
            like_weight: 0.3,
            save_weight: 0.4,
            default_page_size: 50,
            max_page_size: 100,
        }
    }
}

impl AppConfig {
    pub fn is_production(&self) -> bool {
        self.env.eq_ignore_ascii_case("production")
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        dotenvy::dotenv().ok();

        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());
        let is_production = app_env.eq_ignore_ascii_case("production");

        let defaults = FeedConfig::default();

        Ok(Config {
            app: AppConfig {
                env: app_env,
                host: std::env::var("FEED_SERVICE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_env_or_default("FEED_SERVICE_PORT", 8085)?,
            },
            database: DatabaseConfig {
                url: std::env::var("DATABASE_URL")
                    .unwrap_or_else(|_| "postgresql://localhost/proconnect".to_string()),
                max_connections: parse_env_or_default("DATABASE_MAX_CONNECTIONS", 10)?,
                run_migrations: parse_env_or_default("DATABASE_RUN_MIGRATIONS", false)?,
            },
            auth: AuthConfig {
                jwt_secret: match std::env::var("JWT_SECRET") {
                    Ok(secret) if !secret.trim().is_empty() => secret,
                    _ if is_production => {
                        return Err("JWT_SECRET must be set in production".to_string())
                    }
                    _ => DEV_JWT_SECRET.to_string(),
                },
            },
            feed: {
                let feed = FeedConfig {
                    content_similarity_weight: parse_env_or_default(
                        "FEED_CONTENT_SIMILARITY_WEIGHT",
                        defaults.content_similarity_weight,
                    )?,
                    decay_rate_per_day: parse_env_or_default(
                        "FEED_DECAY_RATE_PER_DAY",
                        defaults.decay_rate_per_day,
                    )?,
                    view_weight: parse_env_or_default("FEED_VIEW_WEIGHT", defaults.view_weight)?,
                    like_weight: parse_env_or_default("FEED_LIKE_WEIGHT", defaults.like_weight)?,
                    save_weight: parse_env_or_default("FEED_SAVE_WEIGHT", defaults.save_weight)?,
                    default_page_size: parse_env_or_default(
                        "FEED_DEFAULT_PAGE_SIZE",
                        defaults.default_page_size,
                    )?,
                    max_page_size: parse_env_or_default(
                        "FEED_MAX_PAGE_SIZE",
                        defaults.max_page_size,
                    )?,
                };
                feed.validate()?;
                feed
            },
        })
    }
}

impl FeedConfig {
    /// Weights must be finite and non-negative; decay must be strictly positive.
    fn validate(&self) -> Result<(), String> {
        let weights = [
            ("FEED_CONTENT_SIMILARITY_WEIGHT", self.content_similarity_weight),
            ("FEED_VIEW_WEIGHT", self.view_weight),
            ("FEED_LIKE_WEIGHT", self.like_weight),
            ("FEED_SAVE_WEIGHT", self.save_weight),
        ];
        for (key, value) in weights {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{} must be a finite, non-negative number", key));
            }
        }
        if !self.decay_rate_per_day.is_finite() || self.decay_rate_per_day <= 0.0 {
            return Err("FEED_DECAY_RATE_PER_DAY must be a finite, positive number".to_string());
        }
        if self.max_page_size == 0 {
            return Err("FEED_MAX_PAGE_SIZE must be at least 1".to_string());
        }
        Ok(())
    }
}

fn parse_env_or_default<T>(key: &str, default: T) -> Result<T, String>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(val) => val
            .trim()
            .parse()
            .map_err(|e| format!("Failed to parse {}='{}': {}", key, val, e)),
        Err(_) => Ok(default),
    }
}
