//! Static airport directories: terminal facilities and airline check-in counters.

pub mod airlines;
pub mod facilities;
pub mod handlers;

/// Case-insensitive substring match used by the directory searches.
/// An empty query matches everything.
pub(crate) fn name_matches(name: &str, query: &str) -> bool {
    name.to_lowercase().contains(&query.to_lowercase())
}
