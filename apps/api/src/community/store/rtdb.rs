//! Post store backed by a hosted realtime database's REST interface.
//!
//! Paths map one-to-one onto the database tree: `posts/{id}`,
//! `posts/{id}/likes/{uid}`, `posts/{id}/comments/{cid}`, `posts/{id}/views`.
//! Subscriptions poll the collection and push a snapshot whenever it changes.
//!
//! View increments use the database's server-side increment. Like toggles are a
//! read followed by a write, so two users toggling the same like at the same
//! instant can race.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, Method, RequestBuilder};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::community::models::{sort_comments, Author, Comment, NewPost, Post};
use crate::community::store::{PostStore, StoreError, Subscription};

const REQUEST_TIMEOUT_SECS: u64 = 15;

#[derive(Clone)]
pub struct RtdbPostStore {
    client: Client,
    base_url: String,
    auth: Option<String>,
    poll_interval: Duration,
}

impl RtdbPostStore {
    pub fn new(base_url: String, auth: Option<String>, poll_interval: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            base_url: base_url.trim_end_matches('/').to_string(),
            auth,
            poll_interval,
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .client
            .request(method, format!("{}/{}.json", self.base_url, path));
        match &self.auth {
            Some(auth) => builder.query(&[("auth", auth)]),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Value, StoreError> {
        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(StoreError::Status {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response.json().await?)
    }

    async fn read(&self, path: &str) -> Result<Value, StoreError> {
        self.send(self.request(Method::GET, path)).await
    }

    async fn ensure_post_exists(&self, post_id: &str) -> Result<(), StoreError> {
        let shallow = self
            .send(
                self.request(Method::GET, &format!("posts/{post_id}"))
                    .query(&[("shallow", "true")]),
            )
            .await?;
        if shallow.is_null() {
            return Err(StoreError::NotFound(format!("Post {post_id}")));
        }
        Ok(())
    }

    /// Appends under `path` and returns the generated key.
    async fn push(&self, path: &str, body: &Value) -> Result<String, StoreError> {
        let created = self.send(self.request(Method::POST, path).json(body)).await?;
        created
            .get("name")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| StoreError::Payload(format!("push to {path} returned no key")))
    }
}

fn server_timestamp() -> Value {
    json!({ ".sv": "timestamp" })
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct WireComment {
    content: String,
    author: Author,
    created_at: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct WirePost {
    title: String,
    content: String,
    author: Author,
    country: String,
    created_at: Option<i64>,
    updated_at: Option<i64>,
    likes: HashMap<String, Value>,
    comments: HashMap<String, WireComment>,
    views: u64,
}

fn timestamp(millis: Option<i64>) -> DateTime<Utc> {
    millis
        .and_then(DateTime::from_timestamp_millis)
        .unwrap_or(DateTime::UNIX_EPOCH)
}

fn decode<T: for<'de> Deserialize<'de>>(what: &str, value: &Value) -> Result<T, StoreError> {
    T::deserialize(value).map_err(|e| StoreError::Payload(format!("{what}: {e}")))
}

fn comment_from_wire(id: String, wire: WireComment) -> Comment {
    Comment {
        id,
        content: wire.content,
        author: wire.author,
        created_at: timestamp(wire.created_at),
    }
}

pub(crate) fn post_from_value(id: &str, value: &Value) -> Result<Post, StoreError> {
    let wire: WirePost = decode(&format!("post {id}"), value)?;

    let likes = wire
        .likes
        .into_iter()
        .filter(|(_, v)| !v.is_null() && *v != Value::Bool(false))
        .map(|(uid, _)| uid)
        .collect();

    let mut comments: Vec<Comment> = wire
        .comments
        .into_iter()
        .map(|(cid, c)| comment_from_wire(cid, c))
        .collect();
    sort_comments(&mut comments);

    let created_at = timestamp(wire.created_at);
    Ok(Post {
        id: id.to_string(),
        title: wire.title,
        content: wire.content,
        author: wire.author,
        country: wire.country,
        created_at,
        updated_at: wire.updated_at.map_or(created_at, |ms| timestamp(Some(ms))),
        likes,
        comments,
        views: wire.views,
    })
}

/// Decodes the whole `posts` subtree, newest first. `null` is an empty collection.
/// Entries that fail to decode are logged and skipped.
pub(crate) fn posts_from_value(value: &Value) -> Result<Vec<Post>, StoreError> {
    let mut posts = match value {
        Value::Null => Vec::new(),
        Value::Object(entries) => entries
            .iter()
            .filter_map(|(id, post)| match post_from_value(id, post) {
                Ok(post) => Some(post),
                Err(e) => {
                    warn!("Skipping post {id}: {e}");
                    None
                }
            })
            .collect(),
        other => {
            return Err(StoreError::Payload(format!(
                "posts is not an object: {other}"
            )))
        }
    };
    posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(posts)
}

#[async_trait]
impl PostStore for RtdbPostStore {
    async fn list_posts(&self) -> Result<Vec<Post>, StoreError> {
        posts_from_value(&self.read("posts").await?)
    }

    async fn get_post(&self, post_id: &str) -> Result<Post, StoreError> {
        let value = self.read(&format!("posts/{post_id}")).await?;
        if value.is_null() {
            return Err(StoreError::NotFound(format!("Post {post_id}")));
        }
        post_from_value(post_id, &value)
    }

    async fn create_post(&self, draft: NewPost, author: Author) -> Result<Post, StoreError> {
        let body = json!({
            "title": draft.title,
            "content": draft.content,
            "country": draft.country,
            "author": author,
            "createdAt": server_timestamp(),
            "updatedAt": server_timestamp(),
            "views": 0,
        });
        let post_id = self.push("posts", &body).await?;
        debug!("Created post {post_id}");
        self.get_post(&post_id).await
    }

    async fn toggle_like(&self, post_id: &str, user_id: &str) -> Result<bool, StoreError> {
        self.ensure_post_exists(post_id).await?;
        let path = format!("posts/{post_id}/likes/{user_id}");
        let current = self.read(&path).await?;
        if current.is_null() {
            self.send(self.request(Method::PUT, &path).json(&true)).await?;
            Ok(true)
        } else {
            self.send(self.request(Method::DELETE, &path)).await?;
            Ok(false)
        }
    }

    async fn increment_views(&self, post_id: &str) -> Result<u64, StoreError> {
        self.ensure_post_exists(post_id).await?;
        self.send(
            self.request(Method::PATCH, &format!("posts/{post_id}"))
                .json(&json!({ "views": { ".sv": { "increment": 1 } } })),
        )
        .await?;
        let views = self.read(&format!("posts/{post_id}/views")).await?;
        views
            .as_u64()
            .ok_or_else(|| StoreError::Payload(format!("views of post {post_id}: {views}")))
    }

    async fn delete_post(&self, post_id: &str) -> Result<(), StoreError> {
        self.ensure_post_exists(post_id).await?;
        self.send(self.request(Method::DELETE, &format!("posts/{post_id}")))
            .await?;
        Ok(())
    }

    async fn add_comment(
        &self,
        post_id: &str,
        content: String,
        author: Author,
    ) -> Result<Comment, StoreError> {
        self.ensure_post_exists(post_id).await?;
        let path = format!("posts/{post_id}/comments");
        let body = json!({
            "content": content,
            "author": author,
            "createdAt": server_timestamp(),
        });
        let comment_id = self.push(&path, &body).await?;
        let stored = self.read(&format!("{path}/{comment_id}")).await?;
        let wire: WireComment = decode(&format!("comment {comment_id}"), &stored)?;
        Ok(comment_from_wire(comment_id, wire))
    }

    async fn delete_comment(&self, post_id: &str, comment_id: &str) -> Result<(), StoreError> {
        let path = format!("posts/{post_id}/comments/{comment_id}");
        if self.read(&path).await?.is_null() {
            return Err(StoreError::NotFound(format!("Comment {comment_id}")));
        }
        self.send(self.request(Method::DELETE, &path)).await?;
        Ok(())
    }

    fn subscribe(&self) -> Subscription {
        let (publisher, receiver) = watch::channel(Arc::new(Vec::new()));
        let store = self.clone();

        let worker = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(store.poll_interval);
            let mut last_seen: Option<Vec<Post>> = None;
            loop {
                ticker.tick().await;
                let posts = match store.list_posts().await {
                    Ok(posts) => posts,
                    Err(e) => {
                        warn!("Post subscription refresh failed: {e}");
                        continue;
                    }
                };
                if last_seen.as_ref() == Some(&posts) {
                    continue;
                }
                if publisher.send(Arc::new(posts.clone())).is_err() {
                    break;
                }
                last_seen = Some(posts);
            }
        });

        Subscription::with_worker(receiver, worker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn store(server: &MockServer) -> RtdbPostStore {
        RtdbPostStore::new(server.uri(), None, Duration::from_millis(20))
    }

    fn stored_posts() -> Value {
        json!({
            "-Nold": {
                "title": "Old",
                "content": "first",
                "country": "일본",
                "author": { "id": "u1", "name": "Mina", "email": "m@example.com" },
                "createdAt": 1_700_000_000_000_i64,
                "updatedAt": 1_700_000_000_000_i64,
                "views": 4
            },
            "-Nnew": {
                "title": "New",
                "content": "second",
                "country": "미국",
                "author": { "id": "u2", "name": "Joon", "email": "j@example.com" },
                "createdAt": 1_700_000_500_000_i64,
                "likes": { "u1": true, "u3": null },
                "comments": {
                    "-Ca": { "content": "a", "author": { "id": "u1" }, "createdAt": 1_700_000_600_000_i64 },
                    "-Cb": { "content": "b", "author": { "id": "u3" }, "createdAt": 1_700_000_700_000_i64 }
                },
                "views": 2
            }
        })
    }

    #[test]
    fn test_decode_collection() {
        let posts = posts_from_value(&stored_posts()).unwrap();
        assert_eq!(posts[0].id, "-Nnew");
        assert_eq!(posts[0].likes.len(), 1);
        assert!(posts[0].likes.contains("u1"));
        assert_eq!(posts[0].comments[0].id, "-Cb");
        assert_eq!(posts[0].updated_at, posts[0].created_at);
        assert_eq!(posts[1].views, 4);
        assert!(posts_from_value(&Value::Null).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_post_does_not_hide_the_rest() {
        let snapshot = json!({
            "-Ngood": stored_posts()["-Nold"].clone(),
            "-Nbad": { "title": ["not", "a", "string"], "author": { "name": "no id" } },
            "-Nanon": { "title": "No author id", "author": { "name": "Guest" }, "createdAt": 1_700_000_000_000_i64 }
        });
        let posts = posts_from_value(&snapshot).unwrap();
        let ids: Vec<&str> = posts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(posts.len(), 2);
        assert!(ids.contains(&"-Ngood"));
        assert!(ids.contains(&"-Nanon"));
    }

    #[tokio::test]
    async fn test_toggle_like_sets_presence_when_absent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/posts/p1.json"))
            .and(query_param("shallow", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "title": true })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/posts/p1/likes/u9.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(Value::Null))
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/posts/p1/likes/u9.json"))
            .and(body_json(json!(true)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!(true)))
            .expect(1)
            .mount(&server)
            .await;

        assert!(store(&server).toggle_like("p1", "u9").await.unwrap());
    }

    #[tokio::test]
    async fn test_increment_views_uses_server_increment() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/posts/p1.json"))
            .and(query_param("shallow", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "views": true })))
            .mount(&server)
            .await;
        Mock::given(method("PATCH"))
            .and(path("/posts/p1.json"))
            .and(body_json(json!({ "views": { ".sv": { "increment": 1 } } })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/posts/p1/views.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!(8)))
            .mount(&server)
            .await;

        assert_eq!(store(&server).increment_views("p1").await.unwrap(), 8);
    }

    #[tokio::test]
    async fn test_missing_post_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/posts/gone.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(Value::Null))
            .mount(&server)
            .await;

        assert!(matches!(
            store(&server).delete_post("gone").await,
            Err(StoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_create_post_reads_back_generated_key() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/posts.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "name": "-Nnew" })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/posts/-Nnew.json"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(stored_posts()["-Nnew"].clone()),
            )
            .mount(&server)
            .await;

        let post = store(&server)
            .create_post(
                NewPost {
                    title: "New".to_string(),
                    content: "second".to_string(),
                    country: "미국".to_string(),
                },
                Author {
                    id: "u2".to_string(),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(post.id, "-Nnew");
        assert_eq!(post.title, "New");
    }

    #[tokio::test]
    async fn test_store_failure_surfaces_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/posts.json"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Permission denied"))
            .mount(&server)
            .await;

        assert!(matches!(
            store(&server).list_posts().await,
            Err(StoreError::Status { status: 401, .. })
        ));
    }

    #[tokio::test]
    async fn test_subscription_pushes_snapshot() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/posts.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(stored_posts()))
            .mount(&server)
            .await;

        let mut subscription = store(&server).subscribe();
        assert!(subscription.receiver.changed().await.is_ok());
        assert_eq!(subscription.current().len(), 2);
    }
}
