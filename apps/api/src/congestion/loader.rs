//! Tagged loading state machine: `idle -> loading -> success | error`.
//!
//! Every request is tagged with the input that triggered it and carries a
//! generation number. A response is discarded when a newer request for the same
//! tag has been issued. The visible state follows the most recently issued
//! request across all tags.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<K, T> {
    Idle,
    Loading { tag: K },
    Success { tag: K, data: Arc<T> },
    Error { tag: K, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadPhase {
    Idle,
    Loading,
    Success,
    Error,
}

/// Data-free view of a [`LoadState`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadStatus<K> {
    pub phase: LoadPhase,
    pub tag: Option<K>,
    pub message: Option<String>,
}

/// Handle for one issued request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket<K> {
    pub tag: K,
    generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    Stale,
}

#[derive(Debug)]
pub struct Loader<K, T> {
    state: LoadState<K, T>,
    generation: u64,
    /// Latest generation issued per tag.
    issued: HashMap<K, u64>,
    last_good: HashMap<K, Arc<T>>,
}

impl<K, T> Default for Loader<K, T> {
    fn default() -> Self {
        Self {
            state: LoadState::Idle,
            generation: 0,
            issued: HashMap::new(),
            last_good: HashMap::new(),
        }
    }
}

impl<K, T> Loader<K, T>
where
    K: Clone + Eq + Hash,
{
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn state(&self) -> &LoadState<K, T> {
        &self.state
    }

    pub fn status(&self) -> LoadStatus<K> {
        let (phase, tag, message) = match &self.state {
            LoadState::Idle => (LoadPhase::Idle, None, None),
            LoadState::Loading { tag } => (LoadPhase::Loading, Some(tag.clone()), None),
            LoadState::Success { tag, .. } => (LoadPhase::Success, Some(tag.clone()), None),
            LoadState::Error { tag, message } => {
                (LoadPhase::Error, Some(tag.clone()), Some(message.clone()))
            }
        };
        LoadStatus {
            phase,
            tag,
            message,
        }
    }

    /// Issues a new request for `tag`, superseding any in flight for the same tag.
    pub fn begin(&mut self, tag: K) -> Ticket<K> {
        self.generation += 1;
        self.issued.insert(tag.clone(), self.generation);
        self.state = LoadState::Loading { tag: tag.clone() };
        Ticket {
            tag,
            generation: self.generation,
        }
    }

    /// Resolves a request.
    ///
    /// Results superseded by a newer request for the same tag are dropped. A
    /// success is cached for its tag even when another tag has been requested
    /// since; it only becomes the visible state if no later request exists.
    /// A failure never removes previously loaded data.
    pub fn complete(&mut self, ticket: Ticket<K>, result: Result<Arc<T>, String>) -> Completion {
        if self.issued.get(&ticket.tag) != Some(&ticket.generation) {
            return Completion::Stale;
        }
        if let Ok(data) = &result {
            self.last_good.insert(ticket.tag.clone(), Arc::clone(data));
        }
        if ticket.generation == self.generation {
            self.state = match result {
                Ok(data) => LoadState::Success {
                    tag: ticket.tag,
                    data,
                },
                Err(message) => LoadState::Error {
                    tag: ticket.tag,
                    message,
                },
            };
        }
        Completion::Applied
    }

    /// Most recent successfully loaded data for `tag`, if any.
    pub fn latest_for(&self, tag: &K) -> Option<Arc<T>> {
        self.last_good.get(tag).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_idle() {
        let loader: Loader<u8, String> = Loader::new();
        assert_eq!(loader.state(), &LoadState::Idle);
        assert!(loader.latest_for(&1).is_none());
    }

    #[test]
    fn test_success_applies() {
        let mut loader = Loader::new();
        let ticket = loader.begin(1u8);
        assert_eq!(loader.state(), &LoadState::Loading { tag: 1 });
        let outcome = loader.complete(ticket, Ok(Arc::new("day one".to_string())));
        assert_eq!(outcome, Completion::Applied);
        assert!(matches!(loader.state(), LoadState::Success { tag: 1, .. }));
        assert_eq!(loader.latest_for(&1).as_deref().map(String::as_str), Some("day one"));
    }

    #[test]
    fn test_superseded_request_for_same_tag_discarded() {
        let mut loader = Loader::new();
        let first = loader.begin(1u8);
        let second = loader.begin(1u8);

        let outcome = loader.complete(first, Ok(Arc::new("old".to_string())));
        assert_eq!(outcome, Completion::Stale);
        assert_eq!(loader.state(), &LoadState::Loading { tag: 1 });
        assert!(loader.latest_for(&1).is_none());

        loader.complete(second, Ok(Arc::new("fresh".to_string())));
        assert!(matches!(loader.state(), LoadState::Success { tag: 1, .. }));
        assert_eq!(loader.latest_for(&1).as_deref().map(String::as_str), Some("fresh"));
    }

    #[test]
    fn test_interleaved_tags_both_cached() {
        let mut loader = Loader::new();
        let today = loader.begin(1u8);
        let tomorrow = loader.begin(2u8);

        let outcome = loader.complete(today, Ok(Arc::new("fresh today".to_string())));
        assert_eq!(outcome, Completion::Applied);
        assert_eq!(
            loader.latest_for(&1).as_deref().map(String::as_str),
            Some("fresh today")
        );
        // The later request still owns the visible state.
        assert_eq!(loader.state(), &LoadState::Loading { tag: 2 });

        loader.complete(tomorrow, Err("timeout".to_string()));
        assert!(matches!(loader.state(), LoadState::Error { tag: 2, .. }));
        assert!(loader.latest_for(&2).is_none());
        assert!(loader.latest_for(&1).is_some());
    }

    #[test]
    fn test_status_omits_data() {
        let mut loader: Loader<u8, String> = Loader::new();
        assert_eq!(loader.status().phase, LoadPhase::Idle);

        let ticket = loader.begin(3);
        loader.complete(ticket, Err("upstream 503".to_string()));
        assert_eq!(
            loader.status(),
            LoadStatus {
                phase: LoadPhase::Error,
                tag: Some(3),
                message: Some("upstream 503".to_string()),
            }
        );
    }

    #[test]
    fn test_error_keeps_previous_data() {
        let mut loader = Loader::new();
        let ticket = loader.begin(1u8);
        loader.complete(ticket, Ok(Arc::new("good".to_string())));

        let ticket = loader.begin(1u8);
        loader.complete(ticket, Err("timeout".to_string()));

        assert_eq!(
            loader.state(),
            &LoadState::Error {
                tag: 1,
                message: "timeout".to_string()
            }
        );
        assert_eq!(loader.latest_for(&1).as_deref().map(String::as_str), Some("good"));
    }
}
