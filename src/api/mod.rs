//! Remote data source boundary.
//!
//! The store only talks to the outside world through [`RestaurantApi`].
//! `HttpRestaurantApi` (feature `http`) speaks the partner JSON API;
//! [`InMemoryRestaurantApi`] serves a fixed catalog for development and tests.

mod in_memory;

#[cfg(feature = "http")]
mod http;
#[cfg(feature = "http")]
mod wire;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::checkout::{PaymentReceipt, PaymentRequest};
use crate::error::ApiError;
use crate::model::{Cuisine, CuisineId, Item, ItemId, Money};

pub use in_memory::InMemoryRestaurantApi;

#[cfg(feature = "http")]
pub use http::{HttpRestaurantApi, ACTION_HEADER, API_KEY_HEADER};

/// One page of the item list, grouped by cuisine.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ItemPage {
    pub page: u32,
    pub total_pages: u32,
    /// Entries across all pages, as reported by the source.
    pub total_items: u32,
    pub cuisines: Vec<Cuisine>,
}

/// A single item together with the cuisine it belongs to.
#[derive(Clone, Debug, PartialEq)]
pub struct ItemDetails {
    pub cuisine_id: CuisineId,
    pub cuisine_name: String,
    pub item: Item,
}

/// An item as a filter listing returned it.
///
/// Listings may leave out the price, rating or image the full item list
/// carries. `None` means the field was absent, not that it is zero.
#[derive(Clone, Debug, PartialEq)]
pub struct ListedItem {
    pub id: ItemId,
    pub name: String,
    pub price: Option<Money>,
    pub rating: Option<f32>,
    pub image_url: Option<String>,
}

impl ListedItem {
    /// Resolve into an [`Item`], taking absent fields from `known`.
    ///
    /// Fields absent from both fall back to zero and an empty image.
    pub fn resolve(self, known: Option<&Item>) -> Item {
        Item {
            id: self.id,
            name: self.name,
            price: self
                .price
                .or(known.map(|item| item.price))
                .unwrap_or(Money::ZERO),
            rating: self
                .rating
                .or(known.map(|item| item.rating))
                .unwrap_or(0.0),
            image_url: self
                .image_url
                .or_else(|| known.map(|item| item.image_url.clone()))
                .unwrap_or_default(),
        }
    }
}

impl From<Item> for ListedItem {
    fn from(item: Item) -> Self {
        ListedItem {
            id: item.id,
            name: item.name,
            price: Some(item.price),
            rating: Some(item.rating),
            image_url: Some(item.image_url),
        }
    }
}

/// A cuisine in a filter response, with only the items that matched.
#[derive(Clone, Debug, PartialEq)]
pub struct ListedCuisine {
    pub id: CuisineId,
    pub name: String,
    pub image_url: String,
    pub items: Vec<ListedItem>,
}

impl From<Cuisine> for ListedCuisine {
    fn from(cuisine: Cuisine) -> Self {
        ListedCuisine {
            id: cuisine.id,
            name: cuisine.name,
            image_url: cuisine.image_url,
            items: cuisine.items.into_iter().map(ListedItem::from).collect(),
        }
    }
}

/// Price bounds in major currency units, inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min_amount: u64,
    pub max_amount: u64,
}

/// Item search criteria. Empty criteria match everything.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemFilter {
    /// Cuisine display names.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cuisine_type: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_range: Option<PriceRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_rating: Option<f32>,
}

impl ItemFilter {
    pub fn cuisine(name: impl Into<String>) -> Self {
        ItemFilter {
            cuisine_type: vec![name.into()],
            ..ItemFilter::default()
        }
    }

    pub fn with_price_range(mut self, min_amount: u64, max_amount: u64) -> Self {
        self.price_range = Some(PriceRange {
            min_amount,
            max_amount,
        });
        self
    }

    pub fn with_min_rating(mut self, min_rating: f32) -> Self {
        self.min_rating = Some(min_rating);
        self
    }

    pub fn matches_cuisine(&self, cuisine: &Cuisine) -> bool {
        self.cuisine_type.is_empty()
            || self
                .cuisine_type
                .iter()
                .any(|name| name.eq_ignore_ascii_case(&cuisine.name))
    }

    pub fn matches_item(&self, item: &Item) -> bool {
        if let Some(range) = self.price_range {
            let major = item.price.minor() / 100;
            if major < range.min_amount || major > range.max_amount {
                return false;
            }
        }
        match self.min_rating {
            Some(min_rating) => item.rating >= min_rating,
            None => true,
        }
    }
}

/// The remote data source consumed by the catalog cache and checkout.
#[async_trait]
pub trait RestaurantApi: Send + Sync {
    async fn fetch_item_list(&self, page: u32, count: u32) -> Result<ItemPage, ApiError>;

    async fn fetch_item_by_id(&self, id: ItemId) -> Result<ItemDetails, ApiError>;

    async fn fetch_items_by_filter(
        &self,
        filter: &ItemFilter,
    ) -> Result<Vec<ListedCuisine>, ApiError>;

    async fn submit_payment(&self, request: &PaymentRequest) -> Result<PaymentReceipt, ApiError>;
}

#[async_trait]
impl<A: RestaurantApi + ?Sized> RestaurantApi for Arc<A> {
    async fn fetch_item_list(&self, page: u32, count: u32) -> Result<ItemPage, ApiError> {
        (**self).fetch_item_list(page, count).await
    }

    async fn fetch_item_by_id(&self, id: ItemId) -> Result<ItemDetails, ApiError> {
        (**self).fetch_item_by_id(id).await
    }

    async fn fetch_items_by_filter(
        &self,
        filter: &ItemFilter,
    ) -> Result<Vec<ListedCuisine>, ApiError> {
        (**self).fetch_items_by_filter(filter).await
    }

    async fn submit_payment(&self, request: &PaymentRequest) -> Result<PaymentReceipt, ApiError> {
        (**self).submit_payment(request).await
    }
}
