//! Catalog domain types shared by the cart, the catalog cache and the data source.

mod item;
mod money;

pub use item::{Cuisine, CuisineId, Item, ItemId};
pub use money::Money;
