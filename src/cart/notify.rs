use std::sync::{Mutex, PoisonError};

use event_emitter_rs::EventEmitter;
use serde::{Deserialize, Serialize};

use crate::model::ItemId;

/// Event name used for every cart mutation.
pub const CART_CHANGED: &str = "cart.changed";

/// Payload delivered to change listeners, JSON encoded.
///
/// `item_id` is `None` for bulk changes (clear, settle).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartChange {
    pub version: u64,
    pub item_id: Option<ItemId>,
    pub quantity: u32,
    pub total_items: u32,
}

/// Fans cart changes out to in-process listeners.
///
/// Listeners run on emitter threads, so delivery order across changes is not
/// guaranteed; use `version` to discard stale notifications.
pub struct CartNotifier {
    emitter: Mutex<EventEmitter>,
}

impl Default for CartNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl CartNotifier {
    pub fn new() -> Self {
        CartNotifier {
            emitter: Mutex::new(EventEmitter::new()),
        }
    }

    pub fn on_change<F>(&self, listener: F)
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        self.emitter
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .on(CART_CHANGED, listener);
    }

    pub fn notify(&self, change: &CartChange) {
        let payload = match serde_json::to_string(change) {
            Ok(payload) => payload,
            Err(err) => {
                tracing::warn!(error = %err, "failed to encode cart change");
                return;
            }
        };
        self.emitter
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .emit(CART_CHANGED, payload);
    }
}
