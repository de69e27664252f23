use crate::community::models::Post;

/// Country filter value that matches every post.
pub const ALL_COUNTRIES: &str = "all";

/// Keeps a post when its country matches and the query occurs in its title or content.
///
/// Matching is case-insensitive substring containment; an empty query matches everything.
pub fn matches(post: &Post, query: &str, country: Option<&str>) -> bool {
    let country_ok = match country {
        None => true,
        Some(c) if c == ALL_COUNTRIES => true,
        Some(c) => post.country == c,
    };
    if !country_ok {
        return false;
    }
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    post.title.to_lowercase().contains(&needle) || post.content.to_lowercase().contains(&needle)
}

pub fn filter_posts<'a>(posts: &'a [Post], query: &str, country: Option<&str>) -> Vec<&'a Post> {
    posts
        .iter()
        .filter(|post| matches(post, query, country))
        .collect()
}
