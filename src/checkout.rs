//! Payment requests built from a cart snapshot.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cart::CartView;
use crate::error::ApiError;
use crate::model::{CuisineId, ItemId, Money};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentLine {
    pub cuisine_id: CuisineId,
    pub item_id: ItemId,
    pub unit_price: Money,
    pub quantity: u32,
}

/// What gets sent to the payment endpoint. `total_amount` includes tax.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRequest {
    pub total_amount: Money,
    pub total_items: u32,
    pub lines: Vec<PaymentLine>,
}

impl PaymentRequest {
    /// Build a request paying for every line of `view`. `None` for an empty cart.
    pub fn from_cart(view: &CartView) -> Option<Self> {
        if view.is_empty() {
            return None;
        }

        let lines = view
            .lines()
            .map(|line| PaymentLine {
                cuisine_id: line.cuisine_id.clone(),
                item_id: line.item_id,
                unit_price: line.unit_price,
                quantity: line.quantity,
            })
            .collect();

        Some(PaymentRequest {
            total_amount: view.totals().grand_total,
            total_items: view.total_item_count(),
            lines,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentReceipt {
    pub txn_ref_no: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    EmptyCart,
    Payment(ApiError),
}

impl fmt::Display for CheckoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckoutError::EmptyCart => write!(f, "cannot check out an empty cart"),
            CheckoutError::Payment(err) => write!(f, "payment failed: {}", err),
        }
    }
}

impl std::error::Error for CheckoutError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CheckoutError::Payment(err) => Some(err),
            CheckoutError::EmptyCart => None,
        }
    }
}

impl From<ApiError> for CheckoutError {
    fn from(err: ApiError) -> Self {
        CheckoutError::Payment(err)
    }
}
