//! Read-through cache over the post store subscription.

use crate::community::store::{PostSnapshot, PostStore, Subscription};

/// Holds the latest full snapshot of the collection. Every push from the store
/// replaces it wholesale; list queries never hit the store directly.
pub struct PostFeed {
    subscription: Subscription,
}

impl PostFeed {
    pub fn new(store: &dyn PostStore) -> Self {
        Self {
            subscription: store.subscribe(),
        }
    }

    pub fn snapshot(&self) -> PostSnapshot {
        self.subscription.current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::community::models::{Author, NewPost};
    use crate::community::store::InMemoryPostStore;

    #[tokio::test]
    async fn test_feed_follows_store_changes() {
        let store = InMemoryPostStore::new();
        let feed = PostFeed::new(&store);
        assert!(feed.snapshot().is_empty());

        let post = store
            .create_post(
                NewPost {
                    title: "Night market".to_string(),
                    content: "Go after 9pm".to_string(),
                    country: "태국".to_string(),
                },
                Author::default(),
            )
            .await
            .unwrap();
        assert_eq!(feed.snapshot()[0].id, post.id);

        store.delete_post(&post.id).await.unwrap();
        assert!(feed.snapshot().is_empty());
    }
}
