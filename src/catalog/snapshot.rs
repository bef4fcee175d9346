use std::collections::{BTreeMap, HashSet};

use crate::api::ListedItem;
use crate::error::ApiError;
use crate::model::{Cuisine, CuisineId, Item, ItemId};

/// Number of highest-rated items surfaced as top dishes.
pub const TOP_DISH_COUNT: usize = 3;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LoadStatus {
    #[default]
    Loading,
    Ready,
    Failed(String),
}

impl LoadStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadStatus::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, LoadStatus::Ready)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadStatus::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// The most recently loaded catalog and its load status.
///
/// Immutable: every transition builds a new snapshot which the cache swaps in
/// whole. Data from the last successful load stays visible while a reload is
/// `Loading` and after it `Failed`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CatalogSnapshot {
    status: LoadStatus,
    cuisines: Vec<Cuisine>,
    top_dishes: Vec<Item>,
    cuisine_status: BTreeMap<CuisineId, LoadStatus>,
    total_pages: u32,
}

impl CatalogSnapshot {
    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn error(&self) -> Option<&str> {
        self.status.error()
    }

    pub fn is_loading(&self) -> bool {
        self.status.is_loading()
    }

    pub fn cuisines(&self) -> &[Cuisine] {
        &self.cuisines
    }

    pub fn top_dishes(&self) -> &[Item] {
        &self.top_dishes
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn cuisine(&self, id: &CuisineId) -> Option<&Cuisine> {
        self.cuisines.iter().find(|cuisine| &cuisine.id == id)
    }

    /// Status of the last item-list load for `id`; `None` if never requested.
    pub fn cuisine_status(&self, id: &CuisineId) -> Option<&LoadStatus> {
        self.cuisine_status.get(id)
    }

    /// The cuisine that lists `item_id`.
    pub fn cuisine_of(&self, item_id: ItemId) -> Option<&Cuisine> {
        self.cuisines.iter().find(|cuisine| cuisine.contains(item_id))
    }

    pub fn item(&self, item_id: ItemId) -> Option<&Item> {
        self.cuisines.iter().find_map(|cuisine| cuisine.item(item_id))
    }

    pub(crate) fn with_status(&self, status: LoadStatus) -> CatalogSnapshot {
        CatalogSnapshot {
            status,
            ..self.clone()
        }
    }

    /// A freshly loaded catalog.
    ///
    /// Finished per-cuisine loads are forgotten. Loads still in flight for a
    /// cuisine the new list keeps stay `Loading`.
    pub(crate) fn with_catalog(
        &self,
        cuisines: Vec<Cuisine>,
        total_pages: u32,
    ) -> CatalogSnapshot {
        let cuisine_status = self
            .cuisine_status
            .iter()
            .filter(|(id, status)| {
                status.is_loading() && cuisines.iter().any(|cuisine| &cuisine.id == *id)
            })
            .map(|(id, status)| (id.clone(), status.clone()))
            .collect();
        let top_dishes = top_dishes(&cuisines);
        CatalogSnapshot {
            status: LoadStatus::Ready,
            cuisines,
            top_dishes,
            cuisine_status,
            total_pages,
        }
    }

    pub(crate) fn with_cuisine_status(
        &self,
        id: &CuisineId,
        status: LoadStatus,
    ) -> CatalogSnapshot {
        let mut next = self.clone();
        next.cuisine_status.insert(id.clone(), status);
        next
    }

    /// Replace the item list of one cuisine, leaving the others untouched.
    ///
    /// Incoming items that lack a price, rating or image keep the values
    /// already known for the same id.
    pub(crate) fn with_cuisine_items(
        &self,
        id: &CuisineId,
        items: Vec<ListedItem>,
    ) -> Result<CatalogSnapshot, ApiError> {
        let mut next = self.clone();
        let cuisine = next
            .cuisines
            .iter_mut()
            .find(|cuisine| &cuisine.id == id)
            .ok_or_else(|| ApiError::NotFound(format!("cuisine {}", id)))?;

        let merged = items
            .into_iter()
            .map(|listed| {
                let known = cuisine.item(listed.id);
                listed.resolve(known)
            })
            .collect();
        cuisine.items = merged;

        next.top_dishes = top_dishes(&next.cuisines);
        next.cuisine_status.insert(id.clone(), LoadStatus::Ready);
        Ok(next)
    }
}

/// Highest rated first, ties broken by ascending id.
fn top_dishes(cuisines: &[Cuisine]) -> Vec<Item> {
    let mut seen = HashSet::new();
    let mut items: Vec<&Item> = cuisines
        .iter()
        .flat_map(|cuisine| cuisine.items.iter())
        .filter(|item| seen.insert(item.id))
        .collect();
    items.sort_by(|a, b| b.rating.total_cmp(&a.rating).then(a.id.cmp(&b.id)));
    items.into_iter().take(TOP_DISH_COUNT).cloned().collect()
}
