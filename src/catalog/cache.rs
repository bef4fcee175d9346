use std::sync::Arc;

use arc_swap::ArcSwap;
use tracing::{debug, info, warn};

use super::snapshot::{CatalogSnapshot, LoadStatus};
use super::tracker::{RequestTracker, Ticket};
use crate::api::{ItemDetails, ItemFilter, ListedCuisine, ListedItem, RestaurantApi};
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::model::{CuisineId, ItemId};

const CATALOG_KEY: &str = "catalog";

/// What happened to a completed load.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The result (success or failure) is now in the snapshot.
    Applied,
    /// A newer request for the same resource was started; the result was dropped.
    Superseded,
}

/// Loads the catalog from a [`RestaurantApi`] and publishes immutable snapshots.
///
/// Snapshot writes happen only inside [`RequestTracker`] callbacks, which
/// serializes them; readers never block and never see a partial update.
pub struct CatalogCache<A> {
    api: A,
    page: u32,
    page_size: u32,
    snapshot: ArcSwap<CatalogSnapshot>,
    tracker: RequestTracker,
}

impl<A: RestaurantApi> CatalogCache<A> {
    pub fn new(api: A, config: &ClientConfig) -> Self {
        CatalogCache {
            api,
            page: config.page,
            page_size: config.page_size,
            snapshot: ArcSwap::from_pointee(CatalogSnapshot::default()),
            tracker: RequestTracker::new(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn snapshot(&self) -> Arc<CatalogSnapshot> {
        self.snapshot.load_full()
    }

    fn update<F>(&self, transition: F)
    where
        F: FnOnce(&CatalogSnapshot) -> CatalogSnapshot,
    {
        let current = self.snapshot.load();
        let next = transition(&**current);
        self.snapshot.store(Arc::new(next));
    }

    /// Publish the outcome of `ticket`'s request unless it has been superseded.
    fn finish<T, R, F>(
        &self,
        ticket: &Ticket,
        result: Result<T, ApiError>,
        ready: R,
        failed: F,
    ) -> Result<LoadOutcome, ApiError>
    where
        R: FnOnce(&CatalogSnapshot, T) -> Result<CatalogSnapshot, ApiError>,
        F: FnOnce(&CatalogSnapshot, String) -> CatalogSnapshot,
    {
        let committed = self.tracker.commit_if_current(ticket, || {
            let current = self.snapshot.load_full();
            let next = result.and_then(|value| ready(current.as_ref(), value));
            match next {
                Ok(next) => {
                    self.snapshot.store(Arc::new(next));
                    Ok(LoadOutcome::Applied)
                }
                Err(err) => {
                    warn!(resource = ticket.key(), error = %err, "load failed");
                    self.snapshot
                        .store(Arc::new(failed(current.as_ref(), err.to_string())));
                    Err(err)
                }
            }
        });

        match committed {
            Some(outcome) => outcome,
            None => {
                debug!(
                    resource = ticket.key(),
                    generation = ticket.generation(),
                    "discarding superseded response"
                );
                Ok(LoadOutcome::Superseded)
            }
        }
    }

    /// Fetch cuisines and recompute top dishes. Enters `Ready` or `Failed`.
    pub async fn load_catalog(&self) -> Result<LoadOutcome, ApiError> {
        let ticket = self.tracker.begin(CATALOG_KEY, || {
            self.update(|snapshot| snapshot.with_status(LoadStatus::Loading))
        });
        info!(page = self.page, page_size = self.page_size, "loading catalog");

        let result = self.api.fetch_item_list(self.page, self.page_size).await;
        self.finish(
            &ticket,
            result,
            |snapshot, page| Ok(snapshot.with_catalog(page.cuisines, page.total_pages)),
            |snapshot, message| snapshot.with_status(LoadStatus::Failed(message)),
        )
    }

    /// Re-run [`load_catalog`](Self::load_catalog), superseding a load in flight.
    pub async fn refresh(&self) -> Result<LoadOutcome, ApiError> {
        info!("refreshing catalog");
        self.load_catalog().await
    }

    /// Fetch the item list of one cuisine and merge it into the snapshot.
    pub async fn load_cuisine_items(
        &self,
        cuisine_id: &CuisineId,
    ) -> Result<LoadOutcome, ApiError> {
        let name = self
            .snapshot
            .load()
            .cuisine(cuisine_id)
            .map(|cuisine| cuisine.name.clone());

        let ticket = self.tracker.begin(format!("cuisine:{}", cuisine_id), || {
            self.update(|snapshot| snapshot.with_cuisine_status(cuisine_id, LoadStatus::Loading))
        });
        info!(cuisine_id = %cuisine_id, "loading cuisine items");

        let result = match name {
            Some(name) => self
                .api
                .fetch_items_by_filter(&ItemFilter::cuisine(name))
                .await
                .map(|cuisines| items_of(cuisines, cuisine_id)),
            None => Err(ApiError::NotFound(format!("cuisine {}", cuisine_id))),
        };

        self.finish(
            &ticket,
            result,
            |snapshot, items| snapshot.with_cuisine_items(cuisine_id, items),
            |snapshot, message| {
                snapshot.with_cuisine_status(cuisine_id, LoadStatus::Failed(message))
            },
        )
    }

    pub async fn item_details(&self, item_id: ItemId) -> Result<ItemDetails, ApiError> {
        debug!(item_id = %item_id, "fetching item details");
        self.api.fetch_item_by_id(item_id).await
    }

    pub async fn search(&self, filter: &ItemFilter) -> Result<Vec<ListedCuisine>, ApiError> {
        debug!(?filter, "searching items");
        self.api.fetch_items_by_filter(filter).await
    }
}

/// Items of `cuisine_id` in a filter response. A cuisine the response leaves
/// out has no matching items.
fn items_of(cuisines: Vec<ListedCuisine>, cuisine_id: &CuisineId) -> Vec<ListedItem> {
    cuisines
        .into_iter()
        .find(|cuisine| &cuisine.id == cuisine_id)
        .map(|cuisine| cuisine.items)
        .unwrap_or_default()
}
