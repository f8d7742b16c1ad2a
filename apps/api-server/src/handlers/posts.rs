//! Post lifecycle handlers.
//!
//! Every mutation loads the post, asks the access policy, and only then
//! touches persistence. The author field is fixed at creation and never
//! taken from the client.

use std::collections::HashMap;

use actix_web::{HttpResponse, web};
use uuid::Uuid;
use validator::Validate;

use quill_core::domain::Post;
use quill_core::policy::{self, Action};
use quill_core::ports::{BaseRepository, PageRequest, PostFilter, PostRepository, UserRepository};
use quill_shared::dto::{
    AuthorSummary, CreatePostRequest, ListPostsQuery, PostData, PostLikeData, PostListData,
    PostResponse, UpdatePostRequest,
};
use quill_shared::{DataEnvelope, MessageEnvelope, Pagination};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn post_not_found() -> AppError {
    AppError::NotFound("Post not found".to_string())
}

/// Author details for one post, tolerating a vanished author record.
async fn author_summary(state: &AppState, author: Uuid) -> AppResult<AuthorSummary> {
    Ok(state
        .users
        .find_by_id(author)
        .await?
        .map(|u| AuthorSummary::from(&u))
        .unwrap_or_else(|| AuthorSummary::unknown(author)))
}

/// Batch author lookup for listings.
async fn author_summaries(
    state: &AppState,
    posts: &[Post],
) -> AppResult<HashMap<Uuid, AuthorSummary>> {
    let mut ids: Vec<Uuid> = posts.iter().map(|p| p.author).collect();
    ids.sort_unstable();
    ids.dedup();

    let users = state.users.find_by_ids(&ids).await?;
    Ok(users
        .iter()
        .map(|u| (u.id, AuthorSummary::from(u)))
        .collect())
}

/// POST /api/posts
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    let mut post = Post::new(
        identity.id(),
        req.title.trim().to_string(),
        req.content.trim().to_string(),
        req.category.trim().to_string(),
    );
    if let Some(tags) = req.tags {
        post.tags = tags;
    }
    if let Some(cover_image) = req.cover_image {
        post.cover_image = cover_image;
    }
    if let Some(status) = req.status {
        post.status = status;
    }

    let post = state.posts.insert(post).await?;

    tracing::info!(post_id = %post.id, author = %identity.id(), "Post created");

    Ok(HttpResponse::Created().json(DataEnvelope::new(PostData {
        post: PostResponse::new(post, AuthorSummary::from(&identity.user)),
    })))
}

/// GET /api/posts - public, filtered, paginated.
pub async fn list(
    state: web::Data<AppState>,
    query: web::Query<ListPostsQuery>,
) -> AppResult<HttpResponse> {
    let q = query.into_inner();
    let filter = PostFilter {
        category: q.category,
        tag: q.tag,
        author: q.author,
        status: q.status,
    };
    let page = PageRequest::new(q.page, q.limit);

    let posts = state.posts.list(&filter, page).await?;
    let total = state.posts.count(&filter).await?;

    let authors = author_summaries(&state, &posts).await?;
    let posts = posts
        .into_iter()
        .map(|post| {
            let author = authors
                .get(&post.author)
                .cloned()
                .unwrap_or_else(|| AuthorSummary::unknown(post.author));
            PostResponse::new(post, author)
        })
        .collect();

    Ok(HttpResponse::Ok().json(DataEnvelope::new(PostListData {
        posts,
        pagination: Pagination::new(page.page, page.limit, total),
    })))
}

/// GET /api/posts/{id} - public; every hit bumps the view counter,
/// the author's own reads included.
pub async fn get(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let mut post = state.posts.find_by_id(id).await?.ok_or_else(post_not_found)?;

    post.record_view();
    let post = state.posts.update(post).await?;

    let author = author_summary(&state, post.author).await?;
    Ok(HttpResponse::Ok().json(DataEnvelope::new(PostData {
        post: PostResponse::new(post, author),
    })))
}

/// PUT /api/posts/{id} - owner only; admins hold no update privilege.
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    let mut post = state
        .posts
        .find_by_id(path.into_inner())
        .await?
        .ok_or_else(post_not_found)?;

    if !policy::decide(identity.role(), identity.id(), post.author, Action::Update).is_allowed() {
        return Err(AppError::Forbidden(
            "You do not have permission to update this post".to_string(),
        ));
    }

    post.title = req.title.trim().to_string();
    post.content = req.content.trim().to_string();
    post.category = req.category.trim().to_string();
    if let Some(tags) = req.tags {
        post.tags = tags;
    }
    if let Some(cover_image) = req.cover_image {
        post.cover_image = cover_image;
    }
    if let Some(status) = req.status {
        post.status = status;
    }
    post.touch();

    let post = state.posts.update(post).await?;

    let author = author_summary(&state, post.author).await?;
    Ok(HttpResponse::Ok().json(DataEnvelope::new(PostData {
        post: PostResponse::new(post, author),
    })))
}

/// DELETE /api/posts/{id} - owner or admin. Comments under the post
/// are left in place.
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .find_by_id(path.into_inner())
        .await?
        .ok_or_else(post_not_found)?;

    if !policy::decide(identity.role(), identity.id(), post.author, Action::Delete).is_allowed() {
        return Err(AppError::Forbidden(
            "You do not have permission to delete this post".to_string(),
        ));
    }

    state.posts.delete(post.id).await?;

    tracing::info!(post_id = %post.id, actor = %identity.id(), "Post deleted");

    Ok(HttpResponse::Ok().json(MessageEnvelope::new("Post deleted successfully")))
}

/// POST /api/posts/{id}/like - any authenticated user; an unbounded
/// counter rather than a per-user toggle.
pub async fn like(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let mut post = state
        .posts
        .find_by_id(path.into_inner())
        .await?
        .ok_or_else(post_not_found)?;

    post.record_like();
    let post = state.posts.update(post).await?;

    Ok(HttpResponse::Ok().json(DataEnvelope::new(PostLikeData {
        like_count: post.like_count,
    })))
}
