//! RestaurantStore - the single owner of cart and catalog state.
//!
//! The presentation layer reads immutable snapshots from the store and
//! changes state only through the methods below.
//!
//! ```ignore
//! use dishcart::{ClientConfig, RestaurantStore};
//!
//! let store = RestaurantStore::connect(ClientConfig::default().with_env_overrides())?;
//! store.load_catalog().await?;
//!
//! let catalog = store.catalog();
//! let cart = store.cart();
//! for dish in catalog.top_dishes() {
//!     render(dish, cart.quantity_of(dish.id));
//! }
//! ```

use std::sync::Arc;

use tracing::{info, warn};

use crate::api::{ItemDetails, ItemFilter, ListedCuisine, RestaurantApi};
use crate::cart::{CartLedger, CartView};
use crate::catalog::{CatalogCache, CatalogSnapshot, LoadOutcome};
use crate::checkout::{CheckoutError, PaymentReceipt, PaymentRequest};
use crate::config::{ClientConfig, Language};
use crate::error::ApiError;
use crate::model::{CuisineId, Item, ItemId};

pub struct RestaurantStore<A> {
    catalog: CatalogCache<A>,
    cart: CartLedger,
    config: ClientConfig,
}

#[cfg(feature = "http")]
impl RestaurantStore<crate::api::HttpRestaurantApi> {
    /// A store talking to the partner API described by `config`.
    pub fn connect(config: ClientConfig) -> Result<Self, ApiError> {
        let api = crate::api::HttpRestaurantApi::new(&config)?;
        Ok(Self::new(api, config))
    }
}

impl<A: RestaurantApi> RestaurantStore<A> {
    pub fn new(api: A, config: ClientConfig) -> Self {
        RestaurantStore {
            catalog: CatalogCache::new(api, &config),
            cart: CartLedger::new(),
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Display language the presentation starts with.
    pub fn language(&self) -> Language {
        self.config.language
    }

    pub fn api(&self) -> &A {
        self.catalog.api()
    }

    // Reads

    pub fn catalog(&self) -> Arc<CatalogSnapshot> {
        self.catalog.snapshot()
    }

    pub fn cart(&self) -> CartView {
        self.cart.snapshot()
    }

    pub fn quantity_of(&self, item_id: ItemId) -> u32 {
        self.cart.quantity_of(item_id)
    }

    pub fn total_item_count(&self) -> u32 {
        self.cart.total_item_count()
    }

    pub fn cuisine_of(&self, item_id: ItemId) -> Option<CuisineId> {
        self.catalog
            .snapshot()
            .cuisine_of(item_id)
            .map(|cuisine| cuisine.id.clone())
    }

    // Cart

    pub fn add_to_cart(&self, cuisine_id: &CuisineId, item: &Item) -> u32 {
        self.cart.add_to_cart(cuisine_id, item)
    }

    /// Add an item listed outside its cuisine page, such as a top dish.
    ///
    /// The owning cuisine is looked up in the current catalog; `None` (and no
    /// change) when no loaded cuisine lists the item.
    pub fn add_top_dish_to_cart(&self, item: &Item) -> Option<u32> {
        let cuisine_id = self.cuisine_of(item.id)?;
        Some(self.cart.add_to_cart(&cuisine_id, item))
    }

    pub fn remove_from_cart(&self, item_id: ItemId) -> u32 {
        self.cart.remove_from_cart(item_id)
    }

    #[cfg(feature = "emitter")]
    pub fn on_cart_change<F>(&self, listener: F)
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        self.cart.on_change(listener);
    }

    // Catalog

    pub async fn load_catalog(&self) -> Result<LoadOutcome, ApiError> {
        self.catalog.load_catalog().await
    }

    pub async fn load_cuisine_items(
        &self,
        cuisine_id: &CuisineId,
    ) -> Result<LoadOutcome, ApiError> {
        self.catalog.load_cuisine_items(cuisine_id).await
    }

    pub async fn refresh(&self) -> Result<LoadOutcome, ApiError> {
        self.catalog.refresh().await
    }

    pub async fn item_details(&self, item_id: ItemId) -> Result<ItemDetails, ApiError> {
        self.catalog.item_details(item_id).await
    }

    pub async fn search(&self, filter: &ItemFilter) -> Result<Vec<ListedCuisine>, ApiError> {
        self.catalog.search(filter).await
    }

    // Checkout

    /// Pay for the current cart.
    ///
    /// On success exactly the paid quantities leave the cart. On failure the
    /// cart is untouched and the error is returned; nothing is retried.
    pub async fn checkout(&self) -> Result<PaymentReceipt, CheckoutError> {
        let view = self.cart.snapshot();
        let request = PaymentRequest::from_cart(&view).ok_or(CheckoutError::EmptyCart)?;
        info!(
            total_items = request.total_items,
            total_amount = %request.total_amount,
            "submitting payment"
        );

        let receipt = match self.catalog.api().submit_payment(&request).await {
            Ok(receipt) => receipt,
            Err(err) => {
                warn!(error = %err, "payment failed");
                return Err(err.into());
            }
        };

        self.cart.settle(&view);
        info!(txn_ref_no = %receipt.txn_ref_no, "payment accepted");
        Ok(receipt)
    }
}
