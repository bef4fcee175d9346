//! JSON payloads of the partner API.
//!
//! The service is loose about number encoding: ids, prices and ratings arrive
//! either as JSON numbers or as numeric strings, so every numeric field goes
//! through a lenient deserializer.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

use super::{ItemDetails, ItemPage, ListedCuisine, ListedItem};
use crate::checkout::{PaymentReceipt, PaymentRequest};
use crate::error::ApiError;
use crate::model::{Cuisine, CuisineId, Item, ItemId, Money};

pub(crate) const SUCCESS: i64 = 200;
const NOT_FOUND: i64 = 404;

#[derive(Deserialize)]
#[serde(untagged)]
enum Lenient {
    Int(i64),
    Float(f64),
    Text(String),
}

fn lenient_i64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    match Lenient::deserialize(deserializer)? {
        Lenient::Int(n) => Ok(n),
        Lenient::Float(f) if f.fract() == 0.0 => Ok(f as i64),
        Lenient::Float(f) => Err(de::Error::custom(format!("expected an integer, got {}", f))),
        Lenient::Text(s) => s.trim().parse().map_err(de::Error::custom),
    }
}

fn lenient_u32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let n = lenient_i64(deserializer)?;
    u32::try_from(n).map_err(de::Error::custom)
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Lenient::deserialize(deserializer)? {
        Lenient::Int(n) => Ok(n.to_string()),
        Lenient::Float(f) => Ok(f.to_string()),
        Lenient::Text(s) => Ok(s),
    }
}

fn lenient_money<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Money>, D::Error> {
    let money = match Option::<Lenient>::deserialize(deserializer)? {
        None => return Ok(None),
        Some(Lenient::Int(n)) => u64::try_from(n).ok().map(Money::from_major),
        Some(Lenient::Float(f)) => Money::from_major_f64(f),
        Some(Lenient::Text(s)) => Money::parse_decimal(&s),
    };
    money
        .map(Some)
        .ok_or_else(|| de::Error::custom("invalid price"))
}

fn lenient_rating<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f32>, D::Error> {
    match Option::<Lenient>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Lenient::Int(n)) => Ok(Some(n as f32)),
        Some(Lenient::Float(f)) => Ok(Some(f as f32)),
        Some(Lenient::Text(s)) => s.trim().parse().map(Some).map_err(de::Error::custom),
    }
}

/// Status fields every response carries.
pub(crate) trait Envelope {
    fn response_code(&self) -> i64;
    fn response_message(&self) -> &str;

    fn check(&self) -> Result<(), ApiError> {
        match self.response_code() {
            SUCCESS => Ok(()),
            NOT_FOUND => Err(ApiError::NotFound(self.response_message().to_string())),
            code => Err(ApiError::Rejected {
                code,
                message: self.response_message().to_string(),
            }),
        }
    }
}

macro_rules! envelope {
    ($ty:ty) => {
        impl Envelope for $ty {
            fn response_code(&self) -> i64 {
                self.response_code
            }

            fn response_message(&self) -> &str {
                &self.response_message
            }
        }
    };
}

#[derive(Serialize)]
pub(crate) struct ItemListRequest {
    pub page: u32,
    pub count: u32,
}

#[derive(Serialize)]
pub(crate) struct ItemByIdRequest {
    pub item_id: i64,
}

#[derive(Deserialize)]
pub(crate) struct ItemDto {
    #[serde(deserialize_with = "lenient_i64")]
    id: i64,
    name: String,
    #[serde(default)]
    image_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_money")]
    price: Option<Money>,
    #[serde(default, deserialize_with = "lenient_rating")]
    rating: Option<f32>,
}

impl From<ItemDto> for ListedItem {
    fn from(dto: ItemDto) -> Self {
        ListedItem {
            id: ItemId(dto.id),
            name: dto.name,
            price: dto.price,
            rating: dto.rating,
            image_url: dto.image_url.filter(|url| !url.is_empty()),
        }
    }
}

impl From<ItemDto> for Item {
    fn from(dto: ItemDto) -> Self {
        ListedItem::from(dto).resolve(None)
    }
}

#[derive(Deserialize)]
pub(crate) struct CuisineDto {
    #[serde(deserialize_with = "lenient_string")]
    cuisine_id: String,
    cuisine_name: String,
    #[serde(default)]
    cuisine_image_url: String,
    #[serde(default)]
    items: Vec<ItemDto>,
}

impl From<CuisineDto> for Cuisine {
    fn from(dto: CuisineDto) -> Self {
        Cuisine {
            id: CuisineId(dto.cuisine_id),
            name: dto.cuisine_name,
            image_url: dto.cuisine_image_url,
            items: dto.items.into_iter().map(Item::from).collect(),
        }
    }
}

impl From<CuisineDto> for ListedCuisine {
    fn from(dto: CuisineDto) -> Self {
        ListedCuisine {
            id: CuisineId(dto.cuisine_id),
            name: dto.cuisine_name,
            image_url: dto.cuisine_image_url,
            items: dto.items.into_iter().map(ListedItem::from).collect(),
        }
    }
}

#[derive(Deserialize)]
pub(crate) struct ItemListResponse {
    #[serde(deserialize_with = "lenient_i64")]
    response_code: i64,
    #[serde(default)]
    response_message: String,
    #[serde(default, deserialize_with = "lenient_u32")]
    page: u32,
    #[serde(default, deserialize_with = "lenient_u32")]
    total_pages: u32,
    #[serde(default, deserialize_with = "lenient_u32")]
    total_items: u32,
    #[serde(default)]
    cuisines: Vec<CuisineDto>,
}

envelope!(ItemListResponse);

impl From<ItemListResponse> for ItemPage {
    fn from(dto: ItemListResponse) -> Self {
        ItemPage {
            page: dto.page,
            total_pages: dto.total_pages,
            total_items: dto.total_items,
            cuisines: dto.cuisines.into_iter().map(Cuisine::from).collect(),
        }
    }
}

#[derive(Deserialize)]
pub(crate) struct ItemByIdResponse {
    #[serde(deserialize_with = "lenient_i64")]
    response_code: i64,
    #[serde(default)]
    response_message: String,
    #[serde(default, deserialize_with = "lenient_string")]
    cuisine_id: String,
    #[serde(default)]
    cuisine_name: String,
    #[serde(default, deserialize_with = "lenient_i64")]
    item_id: i64,
    #[serde(default)]
    item_name: String,
    #[serde(default, deserialize_with = "lenient_money")]
    item_price: Option<Money>,
    #[serde(default, deserialize_with = "lenient_rating")]
    item_rating: Option<f32>,
    #[serde(default)]
    item_image_url: String,
}

envelope!(ItemByIdResponse);

impl From<ItemByIdResponse> for ItemDetails {
    fn from(dto: ItemByIdResponse) -> Self {
        ItemDetails {
            cuisine_id: CuisineId(dto.cuisine_id),
            cuisine_name: dto.cuisine_name,
            item: Item {
                id: ItemId(dto.item_id),
                name: dto.item_name,
                price: dto.item_price.unwrap_or(Money::ZERO),
                rating: dto.item_rating.unwrap_or(0.0),
                image_url: dto.item_image_url,
            },
        }
    }
}

#[derive(Deserialize)]
pub(crate) struct ItemFilterResponse {
    #[serde(deserialize_with = "lenient_i64")]
    response_code: i64,
    #[serde(default)]
    response_message: String,
    #[serde(default)]
    cuisines: Vec<CuisineDto>,
}

envelope!(ItemFilterResponse);

impl ItemFilterResponse {
    pub fn into_cuisines(self) -> Vec<ListedCuisine> {
        self.cuisines.into_iter().map(ListedCuisine::from).collect()
    }
}

#[derive(Serialize)]
pub(crate) struct PaymentLineBody {
    cuisine_id: String,
    item_id: i64,
    item_price: String,
    item_quantity: u32,
}

/// Decimal amounts travel as strings (`"315.00"`) so no precision is lost.
#[derive(Serialize)]
pub(crate) struct PaymentBody {
    total_amount: String,
    total_items: u32,
    data: Vec<PaymentLineBody>,
}

impl From<&PaymentRequest> for PaymentBody {
    fn from(request: &PaymentRequest) -> Self {
        PaymentBody {
            total_amount: request.total_amount.to_string(),
            total_items: request.total_items,
            data: request
                .lines
                .iter()
                .map(|line| PaymentLineBody {
                    cuisine_id: line.cuisine_id.to_string(),
                    item_id: line.item_id.0,
                    item_price: line.unit_price.to_string(),
                    item_quantity: line.quantity,
                })
                .collect(),
        }
    }
}

#[derive(Deserialize)]
pub(crate) struct PaymentResponse {
    #[serde(deserialize_with = "lenient_i64")]
    response_code: i64,
    #[serde(default)]
    response_message: String,
    #[serde(default)]
    txn_ref_no: Option<String>,
}

envelope!(PaymentResponse);

impl PaymentResponse {
    pub fn into_receipt(self) -> Result<PaymentReceipt, ApiError> {
        let txn_ref_no = self
            .txn_ref_no
            .ok_or_else(|| ApiError::Decoding("payment response without txn_ref_no".into()))?;
        Ok(PaymentReceipt {
            txn_ref_no,
            message: self.response_message,
        })
    }
}
