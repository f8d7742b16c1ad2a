//! PostgreSQL repository implementations.

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use quill_core::domain::{Comment, Post, User};
use quill_core::error::RepoError;
use quill_core::ports::{CommentRepository, PageRequest, PostFilter, PostRepository, UserRepository};

use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::comment_like::{self, Entity as CommentLikeEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::PostgresBaseRepository;

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// PostgreSQL comment repository.
pub type PostgresCommentRepository = PostgresBaseRepository<CommentEntity>;

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        // Mask the local part when logging to keep PII out of logs.
        let masked = match email.find('@') {
            Some(at) => format!("{}***{}", &email[..at.min(1)], &email[at..]),
            None => "***".to_string(),
        };
        tracing::debug!(user_email = %masked, "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }

    async fn find_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> Result<Option<User>, RepoError> {
        let result = UserEntity::find()
            .filter(
                Condition::any()
                    .add(user::Column::Username.eq(username))
                    .add(user::Column::Email.eq(email)),
            )
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, RepoError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let result = UserEntity::find()
            .filter(user::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

fn post_conditions(filter: &PostFilter) -> Condition {
    let mut cond = Condition::all();
    if let Some(category) = &filter.category {
        cond = cond.add(post::Column::Category.eq(category.clone()));
    }
    if let Some(author) = filter.author {
        cond = cond.add(post::Column::Author.eq(author));
    }
    if let Some(status) = filter.status {
        cond = cond.add(post::Column::Status.eq(status.as_str()));
    }
    if let Some(tag) = &filter.tag {
        // JSON containment over the tags array.
        cond = cond.add(Expr::cust_with_values(
            "\"tags\"::jsonb @> ?::jsonb",
            [serde_json::json!([tag])],
        ));
    }
    cond
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn list(&self, filter: &PostFilter, page: PageRequest) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .filter(post_conditions(filter))
            .order_by_desc(post::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit)
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn count(&self, filter: &PostFilter) -> Result<u64, RepoError> {
        PostEntity::find()
            .filter(post_conditions(filter))
            .count(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn find_by_post(
        &self,
        post_id: Uuid,
        page: PageRequest,
    ) -> Result<Vec<Comment>, RepoError> {
        let result = CommentEntity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .order_by_desc(comment::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit)
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn count_by_post(&self, post_id: Uuid) -> Result<u64, RepoError> {
        CommentEntity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .count(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))
    }

    async fn likes(&self, comment_id: Uuid) -> Result<Vec<Uuid>, RepoError> {
        let rows = CommentLikeEntity::find()
            .filter(comment_like::Column::CommentId.eq(comment_id))
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(rows.into_iter().map(|row| row.user_id).collect())
    }

    async fn likes_for(
        &self,
        comment_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, Vec<Uuid>>, RepoError> {
        if comment_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = CommentLikeEntity::find()
            .filter(comment_like::Column::CommentId.is_in(comment_ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        let mut likes: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
        for row in rows {
            likes.entry(row.comment_id).or_default().push(row.user_id);
        }
        Ok(likes)
    }

    async fn set_liked(
        &self,
        comment_id: Uuid,
        user_id: Uuid,
        liked: bool,
    ) -> Result<(), RepoError> {
        if liked {
            let row = comment_like::ActiveModel {
                comment_id: Set(comment_id),
                user_id: Set(user_id),
            };
            CommentLikeEntity::insert(row)
                .on_conflict(
                    OnConflict::columns([
                        comment_like::Column::CommentId,
                        comment_like::Column::UserId,
                    ])
                    .do_nothing()
                    .to_owned(),
                )
                .exec_without_returning(&self.db)
                .await
                .map_err(|e| RepoError::Query(e.to_string()))?;
        } else {
            CommentLikeEntity::delete_many()
                .filter(comment_like::Column::CommentId.eq(comment_id))
                .filter(comment_like::Column::UserId.eq(user_id))
                .exec(&self.db)
                .await
                .map_err(|e| RepoError::Query(e.to_string()))?;
        }

        Ok(())
    }
}
