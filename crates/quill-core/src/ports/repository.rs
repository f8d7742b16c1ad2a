//! Persistence ports for the three aggregates.

use std::collections::HashMap;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Comment, Post, PostStatus, User};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Persist a new entity. Unique-constraint violations surface as
    /// [`RepoError::Constraint`].
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Persist changes to an existing entity.
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Page window for listings, 1-based.
#[derive(Debug, Clone, Copy)]
pub struct PageRequest {
    pub page: u64,
    pub limit: u64,
}

impl PageRequest {
    pub fn new(page: u64, limit: u64) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
        }
    }

    /// Number of rows to skip before this page.
    pub fn offset(&self) -> u64 {
        (self.page - 1) * self.limit
    }
}

/// Filter applied to post listings. All fields are conjunctive.
#[derive(Debug, Clone, Default)]
pub struct PostFilter {
    pub category: Option<String>,
    pub tag: Option<String>,
    pub author: Option<Uuid>,
    pub status: Option<PostStatus>,
}

/// User repository with identity lookups.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by their (lowercased) email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    /// Find a user holding either the given username or email.
    /// Used for duplicate checks at registration.
    async fn find_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> Result<Option<User>, RepoError>;

    /// Batch lookup for author enrichment of listings.
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, RepoError>;
}

/// Post repository with filtered, paginated listings.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// Page of posts matching `filter`, newest first.
    async fn list(&self, filter: &PostFilter, page: PageRequest) -> Result<Vec<Post>, RepoError>;

    /// Total number of posts matching `filter`.
    async fn count(&self, filter: &PostFilter) -> Result<u64, RepoError>;
}

/// Comment repository, including the per-comment like set.
#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, Uuid> {
    /// Page of comments under a post, newest first.
    async fn find_by_post(
        &self,
        post_id: Uuid,
        page: PageRequest,
    ) -> Result<Vec<Comment>, RepoError>;

    /// Total number of comments under a post.
    async fn count_by_post(&self, post_id: Uuid) -> Result<u64, RepoError>;

    /// Users currently liking a comment.
    async fn likes(&self, comment_id: Uuid) -> Result<Vec<Uuid>, RepoError>;

    /// Like sets for a batch of comments, for listing enrichment.
    async fn likes_for(
        &self,
        comment_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, Vec<Uuid>>, RepoError>;

    /// Set `user_id`'s membership in the like set. Idempotent in either
    /// direction: liking twice or unliking an absent like is a no-op.
    async fn set_liked(
        &self,
        comment_id: Uuid,
        user_id: Uuid,
        liked: bool,
    ) -> Result<(), RepoError>;
}
