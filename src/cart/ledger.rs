use std::sync::{Arc, PoisonError, RwLock, RwLockWriteGuard};

use indexmap::map::Entry;
use tracing::trace;

use super::view::{CartState, CartView};
use super::CartLine;
use crate::model::{CuisineId, Item, ItemId};

#[cfg(feature = "emitter")]
use super::notify::{CartChange, CartNotifier};

/// The user's current order.
///
/// Mutated only through [`add_to_cart`](Self::add_to_cart),
/// [`remove_from_cart`](Self::remove_from_cart) and the checkout helpers.
/// Readers take a [`CartView`]; a view is never affected by later mutations.
/// Cart operations cannot fail: unknown items are no-ops and a poisoned lock
/// is recovered.
pub struct CartLedger {
    state: RwLock<Arc<CartState>>,
    #[cfg(feature = "emitter")]
    notifier: CartNotifier,
}

impl Default for CartLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl CartLedger {
    pub fn new() -> Self {
        CartLedger {
            state: RwLock::new(Arc::new(CartState::default())),
            #[cfg(feature = "emitter")]
            notifier: CartNotifier::new(),
        }
    }

    fn write(&self) -> RwLockWriteGuard<'_, Arc<CartState>> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn current(&self) -> Arc<CartState> {
        Arc::clone(&self.state.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Add one unit of `item`, creating its line on first add. Returns the new quantity.
    pub fn add_to_cart(&self, cuisine_id: &CuisineId, item: &Item) -> u32 {
        let (quantity, _state) = {
            let mut guard = self.write();
            let state = Arc::make_mut(&mut *guard);
            let quantity = match state.lines.entry(item.id) {
                Entry::Occupied(mut entry) => {
                    let line = entry.get_mut();
                    line.quantity = line.quantity.saturating_add(1);
                    line.quantity
                }
                Entry::Vacant(entry) => entry.insert(CartLine::first(cuisine_id, item)).quantity,
            };
            state.version += 1;
            (quantity, Arc::clone(&guard))
        };

        trace!(item_id = %item.id, quantity, "added to cart");
        #[cfg(feature = "emitter")]
        self.notify(&_state, Some(item.id), quantity);
        quantity
    }

    /// Remove one unit of `item_id`, dropping the line when it reaches zero.
    /// Returns the remaining quantity; removing an absent item is a no-op.
    pub fn remove_from_cart(&self, item_id: ItemId) -> u32 {
        let (quantity, _state) = {
            let mut guard = self.write();
            let Some(current) = guard.lines.get(&item_id).map(|line| line.quantity) else {
                return 0;
            };

            let state = Arc::make_mut(&mut *guard);
            let quantity = if current > 1 {
                if let Some(line) = state.lines.get_mut(&item_id) {
                    line.quantity = current - 1;
                }
                current - 1
            } else {
                state.lines.shift_remove(&item_id);
                0
            };
            state.version += 1;
            (quantity, Arc::clone(&guard))
        };

        trace!(item_id = %item_id, quantity, "removed from cart");
        #[cfg(feature = "emitter")]
        self.notify(&_state, Some(item_id), quantity);
        quantity
    }

    pub fn quantity_of(&self, item_id: ItemId) -> u32 {
        self.current().quantity_of(item_id)
    }

    pub fn total_item_count(&self) -> u32 {
        self.current().total_item_count()
    }

    pub fn version(&self) -> u64 {
        self.current().version
    }

    pub fn snapshot(&self) -> CartView {
        CartView::new(self.current())
    }

    /// Drop every line.
    pub fn clear(&self) {
        let _state = {
            let mut guard = self.write();
            if guard.lines.is_empty() {
                return;
            }
            let state = Arc::make_mut(&mut *guard);
            state.lines.clear();
            state.version += 1;
            Arc::clone(&guard)
        };

        #[cfg(feature = "emitter")]
        self.notify(&_state, None, 0);
    }

    /// Subtract the quantities of a paid-for view.
    ///
    /// Units added while the payment was in flight stay in the cart.
    pub fn settle(&self, paid: &CartView) {
        let _state = {
            let mut guard = self.write();
            if !paid.lines().any(|line| guard.lines.contains_key(&line.item_id)) {
                return;
            }

            let state = Arc::make_mut(&mut *guard);
            for paid_line in paid.lines() {
                let remaining = match state.lines.get_mut(&paid_line.item_id) {
                    Some(line) => {
                        line.quantity = line.quantity.saturating_sub(paid_line.quantity);
                        line.quantity
                    }
                    None => continue,
                };
                if remaining == 0 {
                    state.lines.shift_remove(&paid_line.item_id);
                }
            }
            state.version += 1;
            Arc::clone(&guard)
        };

        #[cfg(feature = "emitter")]
        self.notify(&_state, None, 0);
    }

    /// Register a listener called with a JSON [`CartChange`] after every mutation.
    #[cfg(feature = "emitter")]
    pub fn on_change<F>(&self, listener: F)
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        self.notifier.on_change(listener);
    }

    #[cfg(feature = "emitter")]
    fn notify(&self, state: &CartState, item_id: Option<ItemId>, quantity: u32) {
        self.notifier.notify(&CartChange {
            version: state.version,
            item_id,
            quantity,
            total_items: state.total_item_count(),
        });
    }
}
