use std::fmt;

use serde::{Deserialize, Serialize};

use super::Money;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub i64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ItemId {
    fn from(id: i64) -> Self {
        ItemId(id)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CuisineId(pub String);

impl CuisineId {
    pub fn new(id: impl Into<String>) -> Self {
        CuisineId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CuisineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CuisineId {
    fn from(id: &str) -> Self {
        CuisineId(id.to_string())
    }
}

impl From<String> for CuisineId {
    fn from(id: String) -> Self {
        CuisineId(id)
    }
}

/// A dish as loaded from the data source. Immutable once loaded.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub price: Money,
    pub rating: f32,
    pub image_url: String,
}

impl Item {
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>, price: Money) -> Self {
        Item {
            id: id.into(),
            name: name.into(),
            price,
            rating: 0.0,
            image_url: String::new(),
        }
    }

    pub fn with_rating(mut self, rating: f32) -> Self {
        self.rating = rating;
        self
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = image_url.into();
        self
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cuisine {
    pub id: CuisineId,
    pub name: String,
    pub image_url: String,
    pub items: Vec<Item>,
}

impl Cuisine {
    pub fn new(id: impl Into<CuisineId>, name: impl Into<String>) -> Self {
        Cuisine {
            id: id.into(),
            name: name.into(),
            image_url: String::new(),
            items: Vec::new(),
        }
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = image_url.into();
        self
    }

    pub fn with_items(mut self, items: Vec<Item>) -> Self {
        self.items = items;
        self
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.item(id).is_some()
    }
}
