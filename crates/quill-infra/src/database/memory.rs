//! In-memory repository implementations - used when no database is
//! configured and as the persistence double in tests. Data is lost on
//! process restart.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::{Comment, Post, User};
use quill_core::error::RepoError;
use quill_core::ports::{
    BaseRepository, CommentRepository, PageRequest, PostFilter, PostRepository, UserRepository,
};

/// In-memory user repository. Enforces the same username/email
/// uniqueness the database schema does.
#[derive(Default)]
pub struct MemoryUserRepository {
    users: RwLock<HashMap<Uuid, User>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<User, Uuid> for MemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn insert(&self, user: User) -> Result<User, RepoError> {
        let mut users = self.users.write().await;
        let taken = users
            .values()
            .any(|u| u.username == user.username || u.email == user.email);
        if taken {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, RepoError> {
        let mut users = self.users.write().await;
        if !users.contains_key(&user.id) {
            return Err(RepoError::NotFound);
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        match self.users.write().await.remove(&id) {
            Some(_) => Ok(()),
            None => Err(RepoError::NotFound),
        }
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> Result<Option<User>, RepoError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.username == username || u.email == email)
            .cloned())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, RepoError> {
        let users = self.users.read().await;
        Ok(ids.iter().filter_map(|id| users.get(id).cloned()).collect())
    }
}

/// In-memory post repository.
#[derive(Default)]
pub struct MemoryPostRepository {
    posts: RwLock<HashMap<Uuid, Post>>,
}

impl MemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches(post: &Post, filter: &PostFilter) -> bool {
    filter
        .category
        .as_ref()
        .is_none_or(|category| &post.category == category)
        && filter
            .tag
            .as_ref()
            .is_none_or(|tag| post.tags.iter().any(|t| t == tag))
        && filter.author.is_none_or(|author| post.author == author)
        && filter.status.is_none_or(|status| post.status == status)
}

#[async_trait]
impl BaseRepository<Post, Uuid> for MemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.posts.read().await.get(&id).cloned())
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        self.posts.write().await.insert(post.id, post.clone());
        Ok(post)
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let mut posts = self.posts.write().await;
        if !posts.contains_key(&post.id) {
            return Err(RepoError::NotFound);
        }
        posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        match self.posts.write().await.remove(&id) {
            Some(_) => Ok(()),
            None => Err(RepoError::NotFound),
        }
    }
}

#[async_trait]
impl PostRepository for MemoryPostRepository {
    async fn list(&self, filter: &PostFilter, page: PageRequest) -> Result<Vec<Post>, RepoError> {
        let posts = self.posts.read().await;
        let mut matching: Vec<Post> = posts.values().filter(|p| matches(p, filter)).cloned().collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(matching
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit as usize)
            .collect())
    }

    async fn count(&self, filter: &PostFilter) -> Result<u64, RepoError> {
        let posts = self.posts.read().await;
        Ok(posts.values().filter(|p| matches(p, filter)).count() as u64)
    }
}

/// In-memory comment repository, like sets included.
#[derive(Default)]
pub struct MemoryCommentRepository {
    comments: RwLock<HashMap<Uuid, Comment>>,
    likes: RwLock<HashMap<Uuid, HashSet<Uuid>>>,
}

impl MemoryCommentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<Comment, Uuid> for MemoryCommentRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>, RepoError> {
        Ok(self.comments.read().await.get(&id).cloned())
    }

    async fn insert(&self, comment: Comment) -> Result<Comment, RepoError> {
        self.comments
            .write()
            .await
            .insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn update(&self, comment: Comment) -> Result<Comment, RepoError> {
        let mut comments = self.comments.write().await;
        if !comments.contains_key(&comment.id) {
            return Err(RepoError::NotFound);
        }
        comments.insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let removed = self.comments.write().await.remove(&id);
        // Like rows go with the comment, as the schema's cascade does.
        self.likes.write().await.remove(&id);
        match removed {
            Some(_) => Ok(()),
            None => Err(RepoError::NotFound),
        }
    }
}

#[async_trait]
impl CommentRepository for MemoryCommentRepository {
    async fn find_by_post(
        &self,
        post_id: Uuid,
        page: PageRequest,
    ) -> Result<Vec<Comment>, RepoError> {
        let comments = self.comments.read().await;
        let mut matching: Vec<Comment> = comments
            .values()
            .filter(|c| c.post == post_id)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(matching
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit as usize)
            .collect())
    }

    async fn count_by_post(&self, post_id: Uuid) -> Result<u64, RepoError> {
        let comments = self.comments.read().await;
        Ok(comments.values().filter(|c| c.post == post_id).count() as u64)
    }

    async fn likes(&self, comment_id: Uuid) -> Result<Vec<Uuid>, RepoError> {
        Ok(self
            .likes
            .read()
            .await
            .get(&comment_id)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default())
    }

    async fn likes_for(
        &self,
        comment_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, Vec<Uuid>>, RepoError> {
        let likes = self.likes.read().await;
        Ok(comment_ids
            .iter()
            .filter_map(|id| {
                likes
                    .get(id)
                    .map(|set| (*id, set.iter().copied().collect()))
            })
            .collect())
    }

    async fn set_liked(
        &self,
        comment_id: Uuid,
        user_id: Uuid,
        liked: bool,
    ) -> Result<(), RepoError> {
        let mut likes = self.likes.write().await;
        let set = likes.entry(comment_id).or_default();
        if liked {
            set.insert(user_id);
        } else {
            set.remove(&user_id);
        }
        Ok(())
    }
}
