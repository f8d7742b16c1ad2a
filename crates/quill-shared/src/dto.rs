//! Data Transfer Objects - request/response types for the API.
//!
//! Request types carry their field constraints as `validator` derives;
//! handlers run `validate()` before touching the domain. Response types
//! render camelCase and always embed author details, joined explicitly
//! by the handlers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use quill_core::domain::{Comment, Post, PostStatus, Role, User};

use crate::response::Pagination;

// ---------------------------------------------------------------------------
// Auth

/// Request to register a new user.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 20, message = "Username must be 3-20 characters"))]
    pub username: String,

    #[validate(email(message = "Please provide a valid email address"))]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

/// Request to log in.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Public identity returned by register/login.
#[derive(Debug, Clone, Serialize)]
pub struct AuthUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: Role,
}

impl From<&User> for AuthUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.role,
        }
    }
}

/// Profile returned by `/auth/me` - adds the avatar.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub avatar: String,
}

impl From<&User> for ProfileUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.role,
            avatar: user.avatar.clone(),
        }
    }
}

/// `data: {user: ...}` payload used by the auth endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct UserData<U> {
    pub user: U,
}

// ---------------------------------------------------------------------------
// Author enrichment

/// Author details embedded in post and comment responses.
#[derive(Debug, Clone, Serialize)]
pub struct AuthorSummary {
    pub id: Uuid,
    pub username: String,
    pub avatar: String,
}

impl From<&User> for AuthorSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            avatar: user.avatar.clone(),
        }
    }
}

impl AuthorSummary {
    /// Stand-in for an author record that no longer exists.
    pub fn unknown(id: Uuid) -> Self {
        Self {
            id,
            username: String::new(),
            avatar: String::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Posts

/// Request to create a post. `author` never comes from the client.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    #[validate(length(min = 2, max = 100, message = "Title must be 2-100 characters"))]
    pub title: String,

    #[validate(length(min = 10, message = "Content must be at least 10 characters"))]
    pub content: String,

    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,

    #[serde(default)]
    pub tags: Option<Vec<String>>,

    #[serde(default)]
    pub cover_image: Option<String>,

    #[serde(default)]
    pub status: Option<PostStatus>,
}

/// Request to update a post - same field constraints as creation.
pub type UpdatePostRequest = CreatePostRequest;

/// Query parameters accepted by the post listing.
#[derive(Debug, Clone, Deserialize)]
pub struct ListPostsQuery {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
    pub category: Option<String>,
    pub tag: Option<String>,
    pub author: Option<Uuid>,
    pub status: Option<PostStatus>,
}

/// Query parameters for paginated comment listings.
#[derive(Debug, Clone, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_page() -> u64 {
    1
}

fn default_limit() -> u64 {
    10
}

/// Post as rendered on the wire.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub author: AuthorSummary,
    pub tags: Vec<String>,
    pub category: String,
    pub cover_image: String,
    pub status: PostStatus,
    pub view_count: i64,
    pub like_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PostResponse {
    pub fn new(post: Post, author: AuthorSummary) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            author,
            tags: post.tags,
            category: post.category,
            cover_image: post.cover_image,
            status: post.status,
            view_count: post.view_count,
            like_count: post.like_count,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

/// `data: {post}` payload.
#[derive(Debug, Clone, Serialize)]
pub struct PostData {
    pub post: PostResponse,
}

/// `data: {posts, pagination}` payload.
#[derive(Debug, Clone, Serialize)]
pub struct PostListData {
    pub posts: Vec<PostResponse>,
    pub pagination: Pagination,
}

/// `data: {likeCount}` payload returned by the post like endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostLikeData {
    pub like_count: i64,
}

// ---------------------------------------------------------------------------
// Comments

/// Request to create a comment against a post id. The post is not
/// checked for existence.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, max = 500, message = "Comment must be 1-500 characters"))]
    pub content: String,

    pub post: Uuid,

    #[serde(default)]
    pub parent_comment: Option<Uuid>,
}

/// Request to update a comment's content.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateCommentRequest {
    #[validate(length(min = 1, max = 500, message = "Comment must be 1-500 characters"))]
    pub content: String,
}

/// Comment as rendered on the wire.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: Uuid,
    pub content: String,
    pub post: Uuid,
    pub author: AuthorSummary,
    pub parent_comment: Option<Uuid>,
    pub likes: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CommentResponse {
    pub fn new(comment: Comment, author: AuthorSummary, likes: Vec<Uuid>) -> Self {
        Self {
            id: comment.id,
            content: comment.content,
            post: comment.post,
            author,
            parent_comment: comment.parent_comment,
            likes,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        }
    }
}

/// `data: {comment}` payload.
#[derive(Debug, Clone, Serialize)]
pub struct CommentData {
    pub comment: CommentResponse,
}

/// `data: {comments, pagination}` payload.
#[derive(Debug, Clone, Serialize)]
pub struct CommentListData {
    pub comments: Vec<CommentResponse>,
    pub pagination: Pagination,
}

/// `data: {likes, hasLiked}` payload returned by the comment like toggle.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentLikeData {
    pub likes: usize,
    pub has_liked: bool,
}

// ---------------------------------------------------------------------------
// Uploads

/// `data: {path}` payload returned by the image upload endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct UploadData {
    pub path: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_request_enforces_field_bounds() {
        let ok = RegisterRequest {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "secret1".to_string(),
        };
        assert!(ok.validate().is_ok());

        let bad = RegisterRequest {
            username: "al".to_string(),
            email: "not-an-email".to_string(),
            password: "short".to_string(),
        };
        let errors = bad.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("username"));
        assert!(errors.field_errors().contains_key("email"));
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn post_request_requires_category() {
        let req = CreatePostRequest {
            title: "Hello World".to_string(),
            content: "This is my first post.".to_string(),
            category: String::new(),
            tags: None,
            cover_image: None,
            status: None,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn comment_bounds_are_1_to_500() {
        let long = "x".repeat(501);
        let req = UpdateCommentRequest { content: long };
        assert!(req.validate().is_err());
        let req = UpdateCommentRequest {
            content: "x".to_string(),
        };
        assert!(req.validate().is_ok());
    }
}
