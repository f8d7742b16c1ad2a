use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Comment entity - a reply to a post, optionally threaded under
/// another comment.
///
/// `post` is a plain reference: creation does not verify the post exists,
/// and deleting a post leaves its comments behind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub content: String,
    pub post: Uuid,
    pub author: Uuid,
    pub parent_comment: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(author: Uuid, post: Uuid, content: String, parent_comment: Option<Uuid>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            content,
            post,
            author,
            parent_comment,
            created_at: now,
            updated_at: now,
        }
    }

    /// Refresh `updated_at` on a mutating save.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
