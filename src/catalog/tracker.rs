use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// Proof that a request was started, used to check whether it is still current.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ticket {
    key: String,
    generation: u64,
}

impl Ticket {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Per-resource generation counters.
///
/// Lazily creates one counter per unique key. Starting a request bumps its
/// key's counter; a completion is applied only while its ticket still holds
/// the latest generation. Both steps run their callback under the same
/// mutex, so "check, then apply" cannot interleave with a newer request.
#[derive(Default)]
pub struct RequestTracker {
    generations: Mutex<HashMap<String, u64>>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a request for `key`, superseding any in flight, then run `on_begin`.
    pub fn begin<F>(&self, key: impl Into<String>, on_begin: F) -> Ticket
    where
        F: FnOnce(),
    {
        let key = key.into();
        let mut generations = self
            .generations
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let generation = generations.entry(key.clone()).or_insert(0);
        *generation += 1;
        let ticket = Ticket {
            key,
            generation: *generation,
        };
        on_begin();
        ticket
    }

    pub fn is_current(&self, ticket: &Ticket) -> bool {
        let generations = self
            .generations
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        generations.get(&ticket.key) == Some(&ticket.generation)
    }

    /// Run `apply` if `ticket` is still the latest for its key.
    pub fn commit_if_current<F, R>(&self, ticket: &Ticket, apply: F) -> Option<R>
    where
        F: FnOnce() -> R,
    {
        let generations = self
            .generations
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if generations.get(&ticket.key) != Some(&ticket.generation) {
            return None;
        }
        Some(apply())
    }
}
