#[cfg(test)]
mod tests {
    use crate::database::entity::post;
    use crate::database::postgres_repo::{PostgresCommentRepository, PostgresPostRepository};
    use quill_core::domain::Post;
    use quill_core::ports::{BaseRepository, CommentRepository};
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_find_post_by_id() {
        let post_id = uuid::Uuid::new_v4();
        let author = uuid::Uuid::new_v4();
        let now = chrono::Utc::now();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![post::Model {
                id: post_id,
                title: "Test Post".to_owned(),
                content: "Long enough content".to_owned(),
                author,
                tags: serde_json::json!(["rust"]),
                category: "general".to_owned(),
                cover_image: String::new(),
                status: "draft".to_owned(),
                view_count: 0,
                like_count: 0,
                created_at: now.into(),
                updated_at: now.into(),
            }]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

        assert!(result.is_some());
        let post = result.unwrap();
        assert_eq!(post.title, "Test Post");
        assert_eq!(post.id, post_id);
        assert_eq!(post.author, author);
        assert_eq!(post.tags, vec!["rust".to_string()]);
    }

    #[tokio::test]
    async fn test_likes_collects_user_ids() {
        use crate::database::entity::comment_like;

        let comment_id = uuid::Uuid::new_v4();
        let fan_a = uuid::Uuid::new_v4();
        let fan_b = uuid::Uuid::new_v4();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![
                comment_like::Model {
                    comment_id,
                    user_id: fan_a,
                },
                comment_like::Model {
                    comment_id,
                    user_id: fan_b,
                },
            ]])
            .into_connection();

        let repo = PostgresCommentRepository::new(db);

        let likes = repo.likes(comment_id).await.unwrap();
        assert_eq!(likes, vec![fan_a, fan_b]);
    }
}
