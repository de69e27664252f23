//! Post store: the external realtime collection of posts.
//!
//! `PostStore` is the seam; `AppState` holds an `Arc<dyn PostStore>` chosen at
//! startup from `STORE_BACKEND`.

pub mod memory;
pub mod rtdb;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::community::models::{Author, Comment, NewPost, Post};

pub use memory::InMemoryPostStore;
pub use rtdb::RtdbPostStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("store returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("unexpected store payload: {0}")]
    Payload(String),
}

/// Full-collection snapshot pushed to subscribers.
pub type PostSnapshot = Arc<Vec<Post>>;

#[async_trait]
pub trait PostStore: Send + Sync {
    async fn list_posts(&self) -> Result<Vec<Post>, StoreError>;

    async fn get_post(&self, post_id: &str) -> Result<Post, StoreError>;

    /// Appends a post with a generated id, server timestamps, no likes and zero views.
    async fn create_post(&self, draft: NewPost, author: Author) -> Result<Post, StoreError>;

    /// Flips `likes/{user_id}`. Returns whether the user likes the post afterwards.
    async fn toggle_like(&self, post_id: &str, user_id: &str) -> Result<bool, StoreError>;

    /// Returns the view count after the increment.
    async fn increment_views(&self, post_id: &str) -> Result<u64, StoreError>;

    async fn delete_post(&self, post_id: &str) -> Result<(), StoreError>;

    async fn add_comment(
        &self,
        post_id: &str,
        content: String,
        author: Author,
    ) -> Result<Comment, StoreError>;

    async fn delete_comment(&self, post_id: &str, comment_id: &str) -> Result<(), StoreError>;

    /// Starts receiving full snapshots of the collection on every change.
    fn subscribe(&self) -> Subscription;
}

/// Live view of the post collection. Dropping it releases the subscription.
pub struct Subscription {
    receiver: watch::Receiver<PostSnapshot>,
    _worker: Option<AbortOnDrop>,
}

impl Subscription {
    pub(crate) fn new(receiver: watch::Receiver<PostSnapshot>) -> Self {
        Self {
            receiver,
            _worker: None,
        }
    }

    /// Subscription fed by a background task that stops when this is dropped.
    pub(crate) fn with_worker(receiver: watch::Receiver<PostSnapshot>, worker: JoinHandle<()>) -> Self {
        Self {
            receiver,
            _worker: Some(AbortOnDrop(worker)),
        }
    }

    /// The latest snapshot. Each push replaces the previous one wholesale.
    pub fn current(&self) -> PostSnapshot {
        Arc::clone(&self.receiver.borrow())
    }
}

struct AbortOnDrop(JoinHandle<()>);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.abort();
    }
}
