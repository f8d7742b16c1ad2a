//! Comment lifecycle handlers.

use std::collections::HashMap;

use actix_web::{HttpResponse, web};
use uuid::Uuid;
use validator::Validate;

use quill_core::domain::Comment;
use quill_core::policy::{self, Action};
use quill_core::ports::{BaseRepository, CommentRepository, PageRequest, UserRepository};
use quill_shared::dto::{
    AuthorSummary, CommentData, CommentLikeData, CommentListData, CommentResponse,
    CreateCommentRequest, PageQuery, UpdateCommentRequest,
};
use quill_shared::{DataEnvelope, MessageEnvelope, Pagination};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn comment_not_found() -> AppError {
    AppError::NotFound("Comment not found".to_string())
}

async fn author_summary(state: &AppState, author: Uuid) -> AppResult<AuthorSummary> {
    Ok(state
        .users
        .find_by_id(author)
        .await?
        .map(|u| AuthorSummary::from(&u))
        .unwrap_or_else(|| AuthorSummary::unknown(author)))
}

/// POST /api/comments
///
/// The referenced post id is taken at face value: no existence check
/// happens here, so comments can target posts that are gone or never
/// were.
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreateCommentRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    let comment = Comment::new(
        identity.id(),
        req.post,
        req.content.trim().to_string(),
        req.parent_comment,
    );
    let comment = state.comments.insert(comment).await?;

    Ok(HttpResponse::Created().json(DataEnvelope::new(CommentData {
        comment: CommentResponse::new(comment, AuthorSummary::from(&identity.user), Vec::new()),
    })))
}

/// GET /api/comments/post/{post_id} - public, paginated, newest first.
pub async fn list_by_post(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let q = query.into_inner();
    let page = PageRequest::new(q.page, q.limit);

    let comments = state.comments.find_by_post(post_id, page).await?;
    let total = state.comments.count_by_post(post_id).await?;

    let comment_ids: Vec<Uuid> = comments.iter().map(|c| c.id).collect();
    let mut likes = state.comments.likes_for(&comment_ids).await?;

    let mut author_ids: Vec<Uuid> = comments.iter().map(|c| c.author).collect();
    author_ids.sort_unstable();
    author_ids.dedup();
    let authors: HashMap<Uuid, AuthorSummary> = state
        .users
        .find_by_ids(&author_ids)
        .await?
        .iter()
        .map(|u| (u.id, AuthorSummary::from(u)))
        .collect();

    let comments = comments
        .into_iter()
        .map(|comment| {
            let author = authors
                .get(&comment.author)
                .cloned()
                .unwrap_or_else(|| AuthorSummary::unknown(comment.author));
            let likes = likes.remove(&comment.id).unwrap_or_default();
            CommentResponse::new(comment, author, likes)
        })
        .collect();

    Ok(HttpResponse::Ok().json(DataEnvelope::new(CommentListData {
        comments,
        pagination: Pagination::new(page.page, page.limit, total),
    })))
}

/// PUT /api/comments/{id} - owner only.
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<UpdateCommentRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    let mut comment = state
        .comments
        .find_by_id(path.into_inner())
        .await?
        .ok_or_else(comment_not_found)?;

    if !policy::decide(identity.role(), identity.id(), comment.author, Action::Update).is_allowed()
    {
        return Err(AppError::Forbidden(
            "You do not have permission to update this comment".to_string(),
        ));
    }

    comment.content = req.content.trim().to_string();
    comment.touch();
    let comment = state.comments.update(comment).await?;

    let author = author_summary(&state, comment.author).await?;
    let likes = state.comments.likes(comment.id).await?;
    Ok(HttpResponse::Ok().json(DataEnvelope::new(CommentData {
        comment: CommentResponse::new(comment, author, likes),
    })))
}

/// DELETE /api/comments/{id} - owner or admin.
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let comment = state
        .comments
        .find_by_id(path.into_inner())
        .await?
        .ok_or_else(comment_not_found)?;

    if !policy::decide(identity.role(), identity.id(), comment.author, Action::Delete).is_allowed()
    {
        return Err(AppError::Forbidden(
            "You do not have permission to delete this comment".to_string(),
        ));
    }

    state.comments.delete(comment.id).await?;

    Ok(HttpResponse::Ok().json(MessageEnvelope::new("Comment deleted successfully")))
}

/// POST /api/comments/{id}/like - idempotent per-user toggle. The
/// membership is recomputed and flipped, never blindly appended.
pub async fn like(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    state
        .comments
        .find_by_id(id)
        .await?
        .ok_or_else(comment_not_found)?;

    let has_liked = state
        .comments
        .likes(id)
        .await?
        .contains(&identity.id());

    state.comments.set_liked(id, identity.id(), !has_liked).await?;
    let likes = state.comments.likes(id).await?;

    Ok(HttpResponse::Ok().json(DataEnvelope::new(CommentLikeData {
        likes: likes.len(),
        has_liked: !has_liked,
    })))
}
