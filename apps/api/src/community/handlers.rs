//! Axum route handlers for the community board.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::AuthUser;
use crate::community::countries::{country_options, CountryOption};
use crate::community::filter::filter_posts;
use crate::community::models::{Comment, NewComment, NewPost, Post};
use crate::community::ranking::{rank_posts, RankMode};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct FeedQuery {
    #[serde(default)]
    pub q: String,
    pub country: Option<String>,
    #[serde(default)]
    pub tab: RankMode,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostView {
    #[serde(flatten)]
    pub post: Post,
    pub like_count: usize,
}

impl From<Post> for PostView {
    fn from(post: Post) -> Self {
        let like_count = post.like_count();
        Self { post, like_count }
    }
}

#[derive(Debug, Serialize)]
pub struct FeedResponse {
    pub tab: RankMode,
    pub posts: Vec<PostView>,
}

#[derive(Debug, Serialize)]
pub struct LikeResponse {
    pub liked: bool,
}

#[derive(Debug, Serialize)]
pub struct ViewsResponse {
    pub views: u64,
}

/// GET /api/v1/posts
pub async fn handle_list_posts(
    State(state): State<AppState>,
    Query(query): Query<FeedQuery>,
) -> Json<FeedResponse> {
    let snapshot = state.feed.snapshot();
    let filtered = filter_posts(&snapshot, &query.q, query.country.as_deref());
    let posts = rank_posts(filtered, query.tab, Utc::now())
        .into_iter()
        .map(|post| PostView::from(post.clone()))
        .collect();

    Json(FeedResponse {
        tab: query.tab,
        posts,
    })
}

/// POST /api/v1/posts
pub async fn handle_create_post(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Json(draft): Json<NewPost>,
) -> Result<(StatusCode, Json<PostView>), AppError> {
    draft.validate()?;
    let draft = NewPost {
        title: draft.title.trim().to_string(),
        content: draft.content.trim().to_string(),
        country: draft.country.trim().to_string(),
    };

    let post = state.store.create_post(draft, identity.as_author()).await?;
    info!("User {} created post {}", identity.uid, post.id);
    Ok((StatusCode::CREATED, Json(post.into())))
}

/// GET /api/v1/posts/:id
pub async fn handle_get_post(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> Result<Json<PostView>, AppError> {
    let post = state.store.get_post(&post_id).await?;
    Ok(Json(post.into()))
}

/// POST /api/v1/posts/:id/views
pub async fn handle_record_view(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> Result<Json<ViewsResponse>, AppError> {
    let views = state.store.increment_views(&post_id).await?;
    Ok(Json(ViewsResponse { views }))
}

/// POST /api/v1/posts/:id/like
pub async fn handle_toggle_like(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Path(post_id): Path<String>,
) -> Result<Json<LikeResponse>, AppError> {
    let liked = state.store.toggle_like(&post_id, &identity.uid).await?;
    Ok(Json(LikeResponse { liked }))
}

/// DELETE /api/v1/posts/:id
pub async fn handle_delete_post(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Path(post_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let post = state.store.get_post(&post_id).await?;
    if !post.is_authored_by(&identity.uid) {
        return Err(AppError::Forbidden(format!(
            "user {} cannot delete post {post_id}",
            identity.uid
        )));
    }

    state.store.delete_post(&post_id).await?;
    info!("User {} deleted post {post_id}", identity.uid);
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/posts/:id/comments
pub async fn handle_add_comment(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Path(post_id): Path<String>,
    Json(draft): Json<NewComment>,
) -> Result<(StatusCode, Json<Comment>), AppError> {
    draft.validate()?;
    let comment = state
        .store
        .add_comment(&post_id, draft.content.trim().to_string(), identity.as_author())
        .await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

/// DELETE /api/v1/posts/:id/comments/:comment_id
pub async fn handle_delete_comment(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Path((post_id, comment_id)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    let post = state.store.get_post(&post_id).await?;
    let comment = post
        .comment(&comment_id)
        .ok_or_else(|| AppError::NotFound(format!("Comment {comment_id} not found")))?;
    if comment.author.id != identity.uid {
        return Err(AppError::Forbidden(format!(
            "user {} cannot delete comment {comment_id}",
            identity.uid
        )));
    }

    state.store.delete_comment(&post_id, &comment_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/countries
pub async fn handle_countries(State(state): State<AppState>) -> Json<Vec<CountryOption>> {
    Json(country_options(&state.feed.snapshot()))
}
