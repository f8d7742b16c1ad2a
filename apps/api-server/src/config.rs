//! Application configuration loaded from environment variables.
//!
//! Everything that used to live in ambient process state (signing
//! secret, token lifetime, upload limits) is collected here once at
//! startup into an immutable struct and passed down by reference.

use std::env;

use quill_infra::JwtConfig;
use quill_infra::database::DatabaseConfig;

const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Upload handling configuration.
#[derive(Debug, Clone)]
pub struct UploadConfig {
    pub dir: String,
    pub max_bytes: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            dir: "uploads".to_string(),
            max_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub jwt: JwtConfig,
    pub upload: UploadConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(100),
            min_connections: env::var("DB_MIN_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),
        });

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            database,
            jwt: Self::jwt_from_env(),
            upload: UploadConfig {
                dir: env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string()),
                max_bytes: env::var("MAX_FILE_SIZE")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
            },
        }
    }

    fn jwt_from_env() -> JwtConfig {
        let defaults = JwtConfig::default();

        let secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("Using default JWT secret. Set JWT_SECRET for production use.");
            defaults.secret.clone()
        });

        let lifetime = env::var("JWT_EXPIRES_IN")
            .ok()
            .and_then(|s| {
                let parsed = JwtConfig::parse_lifetime(&s);
                if parsed.is_none() {
                    tracing::warn!(value = %s, "Unparseable JWT_EXPIRES_IN, using default");
                }
                parsed
            })
            .unwrap_or(defaults.lifetime);

        JwtConfig { secret, lifetime }
    }
}
