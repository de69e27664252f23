use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{watch, Mutex};
use tracing::debug;
use uuid::Uuid;

use crate::community::models::{sort_comments, Author, Comment, NewPost, Post};
use crate::community::store::{PostSnapshot, PostStore, StoreError, Subscription};

/// Process-local post store.
///
/// All mutations run under a single lock, so like toggles and view increments
/// never lose updates. Every mutation publishes a fresh full snapshot.
pub struct InMemoryPostStore {
    posts: Mutex<HashMap<String, Post>>,
    publisher: watch::Sender<PostSnapshot>,
}

impl Default for InMemoryPostStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryPostStore {
    pub fn new() -> Self {
        let (publisher, _) = watch::channel(Arc::new(Vec::new()));
        Self {
            posts: Mutex::new(HashMap::new()),
            publisher,
        }
    }

    fn publish(&self, posts: &HashMap<String, Post>) {
        let mut snapshot: Vec<Post> = posts.values().cloned().collect();
        snapshot.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        self.publisher.send_replace(Arc::new(snapshot));
    }
}

fn not_found(post_id: &str) -> StoreError {
    StoreError::NotFound(format!("Post {post_id}"))
}

#[async_trait]
impl PostStore for InMemoryPostStore {
    async fn list_posts(&self) -> Result<Vec<Post>, StoreError> {
        Ok(self.posts.lock().await.values().cloned().collect())
    }

    async fn get_post(&self, post_id: &str) -> Result<Post, StoreError> {
        self.posts
            .lock()
            .await
            .get(post_id)
            .cloned()
            .ok_or_else(|| not_found(post_id))
    }

    async fn create_post(&self, draft: NewPost, author: Author) -> Result<Post, StoreError> {
        let now = Utc::now();
        let post = Post {
            id: Uuid::new_v4().to_string(),
            title: draft.title,
            content: draft.content,
            author,
            country: draft.country,
            created_at: now,
            updated_at: now,
            likes: BTreeSet::new(),
            comments: Vec::new(),
            views: 0,
        };

        let mut posts = self.posts.lock().await;
        posts.insert(post.id.clone(), post.clone());
        self.publish(&posts);
        debug!("Created post {}", post.id);
        Ok(post)
    }

    async fn toggle_like(&self, post_id: &str, user_id: &str) -> Result<bool, StoreError> {
        let mut posts = self.posts.lock().await;
        let post = posts.get_mut(post_id).ok_or_else(|| not_found(post_id))?;
        let liked = if post.likes.remove(user_id) {
            false
        } else {
            post.likes.insert(user_id.to_string());
            true
        };
        self.publish(&posts);
        Ok(liked)
    }

    async fn increment_views(&self, post_id: &str) -> Result<u64, StoreError> {
        let mut posts = self.posts.lock().await;
        let post = posts.get_mut(post_id).ok_or_else(|| not_found(post_id))?;
        post.views += 1;
        let views = post.views;
        self.publish(&posts);
        Ok(views)
    }

    async fn delete_post(&self, post_id: &str) -> Result<(), StoreError> {
        let mut posts = self.posts.lock().await;
        posts.remove(post_id).ok_or_else(|| not_found(post_id))?;
        self.publish(&posts);
        Ok(())
    }

    async fn add_comment(
        &self,
        post_id: &str,
        content: String,
        author: Author,
    ) -> Result<Comment, StoreError> {
        let mut posts = self.posts.lock().await;
        let post = posts.get_mut(post_id).ok_or_else(|| not_found(post_id))?;
        let comment = Comment {
            id: Uuid::new_v4().to_string(),
            content,
            author,
            created_at: Utc::now(),
        };
        post.comments.push(comment.clone());
        sort_comments(&mut post.comments);
        self.publish(&posts);
        Ok(comment)
    }

    async fn delete_comment(&self, post_id: &str, comment_id: &str) -> Result<(), StoreError> {
        let mut posts = self.posts.lock().await;
        let post = posts.get_mut(post_id).ok_or_else(|| not_found(post_id))?;
        let before = post.comments.len();
        post.comments.retain(|c| c.id != comment_id);
        if post.comments.len() == before {
            return Err(StoreError::NotFound(format!("Comment {comment_id}")));
        }
        self.publish(&posts);
        Ok(())
    }

    fn subscribe(&self) -> Subscription {
        Subscription::new(self.publisher.subscribe())
    }
}
