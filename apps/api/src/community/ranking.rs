use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::community::models::Post;

/// How far back the popular tab looks.
pub const POPULAR_WINDOW_DAYS: i64 = 3;
/// Maximum number of posts on the popular tab.
pub const POPULAR_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankMode {
    #[default]
    #[serde(alias = "all")]
    Recent,
    Popular,
}

/// likes × 2 + views
pub fn popularity_score(post: &Post) -> u64 {
    post.like_count() as u64 * 2 + post.views
}

pub fn rank_posts<'a>(mut posts: Vec<&'a Post>, mode: RankMode, now: DateTime<Utc>) -> Vec<&'a Post> {
    match mode {
        RankMode::Recent => {
            posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            posts
        }
        RankMode::Popular => {
            let window_start = now - Duration::days(POPULAR_WINDOW_DAYS);
            let mut popular: Vec<&Post> = posts
                .into_iter()
                .filter(|post| post.created_at >= window_start && post.like_count() > 0)
                .collect();
            popular.sort_by(|a, b| popularity_score(b).cmp(&popularity_score(a)));
            popular.truncate(POPULAR_LIMIT);
            popular
        }
    }
}
