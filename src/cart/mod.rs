//! Cart Ledger - the user's order as `(item, quantity)` lines.
//!
//! The ledger is the only writer. Readers take a [`CartView`] once per render
//! and answer every question (badge count, per-item quantity, totals) from it.

mod ledger;
mod line;
#[cfg(feature = "emitter")]
mod notify;
mod view;

pub use ledger::CartLedger;
pub use line::CartLine;
#[cfg(feature = "emitter")]
pub use notify::{CartChange, CartNotifier, CART_CHANGED};
pub use view::{CartTotals, CartView, CGST_PER_MILLE, SGST_PER_MILLE};
