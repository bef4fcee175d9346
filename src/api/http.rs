//! HTTP transport for the partner API.
//!
//! Requires the `http` feature. Uses reqwest.
//!
//! Every action is a `POST {base_url}/{action}` with a JSON body, the partner
//! key in `X-Partner-API-Key` and the action name repeated in
//! `X-Forward-Proxy-Action`.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use super::wire::{
    Envelope, ItemByIdRequest, ItemByIdResponse, ItemFilterResponse, ItemListRequest,
    ItemListResponse, PaymentBody, PaymentResponse,
};
use super::{ItemDetails, ItemFilter, ItemPage, ListedCuisine, RestaurantApi};
use crate::checkout::{PaymentReceipt, PaymentRequest};
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::model::ItemId;

pub const API_KEY_HEADER: &str = "X-Partner-API-Key";
pub const ACTION_HEADER: &str = "X-Forward-Proxy-Action";

const GET_ITEM_LIST: &str = "get_item_list";
const GET_ITEM_BY_ID: &str = "get_item_by_id";
const GET_ITEM_BY_FILTER: &str = "get_item_by_filter";
const MAKE_PAYMENT: &str = "make_payment";

#[derive(Clone)]
pub struct HttpRestaurantApi {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpRestaurantApi {
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;
        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: reqwest::Client, config: &ClientConfig) -> Self {
        HttpRestaurantApi {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn call<B, R>(&self, action: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned + Envelope,
    {
        let url = format!("{}/{}", self.base_url, action);
        debug!(action, %url, "calling restaurant api");

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .header(ACTION_HEADER, action)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(format!("{} ({})", action, url)));
        }
        if !status.is_success() {
            warn!(action, status = status.as_u16(), "restaurant api returned an error status");
            return Err(ApiError::Network(format!("{} returned HTTP {}", action, status)));
        }

        let bytes = response.bytes().await?;
        let decoded: R = serde_json::from_slice(&bytes)?;
        decoded.check()?;
        Ok(decoded)
    }
}

#[async_trait]
impl RestaurantApi for HttpRestaurantApi {
    async fn fetch_item_list(&self, page: u32, count: u32) -> Result<ItemPage, ApiError> {
        let response: ItemListResponse = self
            .call(GET_ITEM_LIST, &ItemListRequest { page, count })
            .await?;
        Ok(response.into())
    }

    async fn fetch_item_by_id(&self, id: ItemId) -> Result<ItemDetails, ApiError> {
        let response: ItemByIdResponse = self
            .call(GET_ITEM_BY_ID, &ItemByIdRequest { item_id: id.0 })
            .await?;
        Ok(response.into())
    }

    async fn fetch_items_by_filter(
        &self,
        filter: &ItemFilter,
    ) -> Result<Vec<ListedCuisine>, ApiError> {
        let response: ItemFilterResponse = self.call(GET_ITEM_BY_FILTER, filter).await?;
        Ok(response.into_cuisines())
    }

    async fn submit_payment(&self, request: &PaymentRequest) -> Result<PaymentReceipt, ApiError> {
        let response: PaymentResponse = self
            .call(MAKE_PAYMENT, &PaymentBody::from(request))
            .await?;
        response.into_receipt()
    }
}
