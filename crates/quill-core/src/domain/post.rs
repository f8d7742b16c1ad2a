use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Publication state of a post.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Draft,
    Published,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Published => "published",
        }
    }
}

impl From<&str> for PostStatus {
    fn from(value: &str) -> Self {
        match value {
            "published" => PostStatus::Published,
            _ => PostStatus::Draft,
        }
    }
}

/// Post entity - an authored article.
///
/// `author` is fixed at creation from the authenticated identity and is
/// never reassigned by update operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub author: Uuid,
    pub tags: Vec<String>,
    pub category: String,
    /// Reference path of the cover image, empty when unset.
    pub cover_image: String,
    pub status: PostStatus,
    pub view_count: i64,
    pub like_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new draft post owned by `author`.
    pub fn new(author: Uuid, title: String, content: String, category: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            content,
            author,
            tags: Vec::new(),
            category,
            cover_image: String::new(),
            status: PostStatus::default(),
            view_count: 0,
            like_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Refresh `updated_at`. Every mutating save goes through here.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Bump the view counter. Happens on every read by id, author included.
    pub fn record_view(&mut self) {
        self.view_count += 1;
        self.touch();
    }

    /// Bump the like counter. Plain increment, not a per-user toggle.
    pub fn record_like(&mut self) {
        self.like_count += 1;
        self.touch();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_post_starts_as_unviewed_draft() {
        let author = Uuid::new_v4();
        let post = Post::new(
            author,
            "Hello World".to_string(),
            "This is my first post.".to_string(),
            "general".to_string(),
        );
        assert_eq!(post.author, author);
        assert_eq!(post.status, PostStatus::Draft);
        assert_eq!(post.view_count, 0);
        assert_eq!(post.like_count, 0);
    }

    #[test]
    fn counters_only_grow() {
        let mut post = Post::new(
            Uuid::new_v4(),
            "Title".to_string(),
            "Long enough content".to_string(),
            "general".to_string(),
        );
        post.record_view();
        post.record_view();
        post.record_like();
        assert_eq!(post.view_count, 2);
        assert_eq!(post.like_count, 1);
        assert!(post.updated_at >= post.created_at);
    }
}
