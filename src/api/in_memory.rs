//! InMemoryRestaurantApi - fixed catalog data source for testing and development.

use std::collections::VecDeque;
use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;

use super::{ItemDetails, ItemFilter, ItemPage, ListedCuisine, RestaurantApi};
use crate::checkout::{PaymentReceipt, PaymentRequest};
use crate::error::ApiError;
use crate::model::{Cuisine, ItemId};

#[derive(Default)]
struct State {
    cuisines: Vec<Cuisine>,
    failures: VecDeque<ApiError>,
    payments: Vec<PaymentRequest>,
}

/// Data source backed by a `Vec<Cuisine>`.
///
/// Pages are cut over cuisines. Failures queued with [`fail_next`] are
/// returned, in order, by the next calls of any kind. Clone-friendly via Arc.
///
/// [`fail_next`]: InMemoryRestaurantApi::fail_next
#[derive(Clone, Default)]
pub struct InMemoryRestaurantApi {
    state: Arc<RwLock<State>>,
}

impl InMemoryRestaurantApi {
    pub fn new(cuisines: Vec<Cuisine>) -> Self {
        InMemoryRestaurantApi {
            state: Arc::new(RwLock::new(State {
                cuisines,
                ..State::default()
            })),
        }
    }

    /// Replace the served catalog.
    pub fn set_cuisines(&self, cuisines: Vec<Cuisine>) {
        self.write().cuisines = cuisines;
    }

    /// Make the next call fail with `err`.
    pub fn fail_next(&self, err: ApiError) {
        self.write().failures.push_back(err);
    }

    /// Payments accepted so far.
    pub fn payments(&self) -> Vec<PaymentRequest> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .payments
            .clone()
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, State> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn take_failure(&self) -> Result<(), ApiError> {
        match self.write().failures.pop_front() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl RestaurantApi for InMemoryRestaurantApi {
    async fn fetch_item_list(&self, page: u32, count: u32) -> Result<ItemPage, ApiError> {
        self.take_failure()?;
        if page == 0 || count == 0 {
            return Err(ApiError::Rejected {
                code: 400,
                message: "page and count must be positive".into(),
            });
        }

        let state = self.write();
        let total = state.cuisines.len();
        let count = count as usize;
        let start = (page as usize - 1).saturating_mul(count);
        let cuisines = state
            .cuisines
            .iter()
            .skip(start)
            .take(count)
            .cloned()
            .collect();

        Ok(ItemPage {
            page,
            total_pages: total.div_ceil(count) as u32,
            total_items: total as u32,
            cuisines,
        })
    }

    async fn fetch_item_by_id(&self, id: ItemId) -> Result<ItemDetails, ApiError> {
        self.take_failure()?;
        let state = self.write();
        state
            .cuisines
            .iter()
            .find_map(|cuisine| {
                cuisine.item(id).map(|item| ItemDetails {
                    cuisine_id: cuisine.id.clone(),
                    cuisine_name: cuisine.name.clone(),
                    item: item.clone(),
                })
            })
            .ok_or_else(|| ApiError::NotFound(format!("item {}", id)))
    }

    async fn fetch_items_by_filter(
        &self,
        filter: &ItemFilter,
    ) -> Result<Vec<ListedCuisine>, ApiError> {
        self.take_failure()?;
        let state = self.write();
        let cuisines = state
            .cuisines
            .iter()
            .filter(|cuisine| filter.matches_cuisine(cuisine))
            .map(|cuisine| {
                let items = cuisine
                    .items
                    .iter()
                    .filter(|item| filter.matches_item(item))
                    .cloned()
                    .collect();
                ListedCuisine::from(cuisine.clone().with_items(items))
            })
            .filter(|cuisine| !cuisine.items.is_empty())
            .collect();
        Ok(cuisines)
    }

    async fn submit_payment(&self, request: &PaymentRequest) -> Result<PaymentReceipt, ApiError> {
        self.take_failure()?;
        let mut state = self.write();
        state.payments.push(request.clone());
        Ok(PaymentReceipt {
            txn_ref_no: format!("TXN{:06}", state.payments.len()),
            message: "Payment successful".into(),
        })
    }
}
