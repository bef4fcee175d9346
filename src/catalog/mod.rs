//! Catalog Cache - cuisines, their items and the top dishes, with load status.
//!
//! ## Example
//!
//! ```ignore
//! use dishcart::{CatalogCache, ClientConfig, InMemoryRestaurantApi};
//!
//! let cache = CatalogCache::new(InMemoryRestaurantApi::new(cuisines), &ClientConfig::default());
//! cache.load_catalog().await?;
//! let snapshot = cache.snapshot();
//! for dish in snapshot.top_dishes() { /* ... */ }
//! ```

mod cache;
mod snapshot;
mod tracker;

pub use cache::{CatalogCache, LoadOutcome};
pub use snapshot::{CatalogSnapshot, LoadStatus, TOP_DISH_COUNT};
pub use tracker::{RequestTracker, Ticket};
