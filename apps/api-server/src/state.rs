//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::ports::{
    CommentRepository, ObjectStorage, PasswordService, PostRepository, TokenService,
    UserRepository,
};
use quill_infra::{Argon2PasswordService, JwtConfig, JwtTokenService, LocalDiskStorage};
use quill_infra::database::{
    MemoryCommentRepository, MemoryPostRepository, MemoryUserRepository,
};

use crate::config::{AppConfig, UploadConfig};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub tokens: Arc<dyn TokenService>,
    pub passwords: Arc<dyn PasswordService>,
    pub storage: Arc<dyn ObjectStorage>,
}

fn shared_services(
    jwt: JwtConfig,
    upload: &UploadConfig,
) -> (
    Arc<dyn TokenService>,
    Arc<dyn PasswordService>,
    Arc<dyn ObjectStorage>,
) {
    (
        Arc::new(JwtTokenService::new(jwt)),
        Arc::new(Argon2PasswordService::new()),
        Arc::new(LocalDiskStorage::new(upload.dir.clone(), upload.max_bytes)),
    )
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        #[cfg(feature = "postgres")]
        if let Some(db_config) = &config.database {
            match quill_infra::database::connect(db_config).await {
                Ok(conn) => {
                    let (tokens, passwords, storage) =
                        shared_services(config.jwt.clone(), &config.upload);
                    tracing::info!("Application state initialized (postgres)");
                    return Self {
                        users: Arc::new(quill_infra::PostgresUserRepository::new(conn.clone())),
                        posts: Arc::new(quill_infra::PostgresPostRepository::new(conn.clone())),
                        comments: Arc::new(quill_infra::PostgresCommentRepository::new(conn)),
                        tokens,
                        passwords,
                        storage,
                    };
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                }
            }
        }

        tracing::warn!("DATABASE_URL not set. Running with in-memory repositories.");
        Self::in_memory(config.jwt.clone(), &config.upload)
    }

    /// State backed entirely by in-memory implementations. Used as the
    /// databaseless fallback and by the integration tests.
    pub fn in_memory(jwt: JwtConfig, upload: &UploadConfig) -> Self {
        let (tokens, passwords, storage) = shared_services(jwt, upload);
        Self {
            users: Arc::new(MemoryUserRepository::new()),
            posts: Arc::new(MemoryPostRepository::new()),
            comments: Arc::new(MemoryCommentRepository::new()),
            tokens,
            passwords,
            storage,
        }
    }
}
