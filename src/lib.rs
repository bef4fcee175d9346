//! Cart ledger and catalog cache for restaurant ordering front ends.
//!
//! [`RestaurantStore`] owns both pieces of state and is the only writer. The
//! presentation layer reads [`CatalogSnapshot`]s and [`CartView`]s, and
//! changes state through the store's narrow API. Remote data comes from any
//! [`RestaurantApi`]: `HttpRestaurantApi` (feature `http`) or
//! [`InMemoryRestaurantApi`].

pub mod api;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
mod error;
pub mod model;
mod store;

pub use api::{
    InMemoryRestaurantApi, ItemDetails, ItemFilter, ItemPage, ListedCuisine, ListedItem,
    PriceRange, RestaurantApi,
};
#[cfg(feature = "http")]
pub use api::HttpRestaurantApi;
pub use cart::{CartLedger, CartLine, CartTotals, CartView};
#[cfg(feature = "emitter")]
pub use cart::{CartChange, CART_CHANGED};
pub use catalog::{CatalogCache, CatalogSnapshot, LoadOutcome, LoadStatus, TOP_DISH_COUNT};
pub use checkout::{CheckoutError, PaymentLine, PaymentReceipt, PaymentRequest};
pub use config::{ClientConfig, ConfigError, Language};
pub use error::ApiError;
pub use model::{Cuisine, CuisineId, Item, ItemId, Money};
pub use store::RestaurantStore;
