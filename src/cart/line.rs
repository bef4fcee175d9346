use serde::{Deserialize, Serialize};

use crate::model::{CuisineId, Item, ItemId, Money};

/// One entry of the cart. `quantity` is never zero; such a line is removed.
///
/// Name and unit price are captured when the line is created so the cart can
/// be priced and paid without the catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub item_id: ItemId,
    pub cuisine_id: CuisineId,
    pub name: String,
    pub unit_price: Money,
    pub quantity: u32,
}

impl CartLine {
    pub(crate) fn first(cuisine_id: &CuisineId, item: &Item) -> Self {
        CartLine {
            item_id: item.id,
            cuisine_id: cuisine_id.clone(),
            name: item.name.clone(),
            unit_price: item.price,
            quantity: 1,
        }
    }

    pub fn line_total(&self) -> Money {
        self.unit_price * self.quantity
    }
}
