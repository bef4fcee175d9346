use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::CartLine;
use crate::model::{ItemId, Money};

/// Central GST share, in per mille of the net amount.
pub const CGST_PER_MILLE: u64 = 25;
/// State GST share, in per mille of the net amount.
pub const SGST_PER_MILLE: u64 = 25;

#[derive(Clone, Debug, Default)]
pub(crate) struct CartState {
    pub(crate) lines: IndexMap<ItemId, CartLine>,
    pub(crate) version: u64,
}

impl CartState {
    pub(crate) fn total_item_count(&self) -> u32 {
        self.lines
            .values()
            .fold(0u32, |total, line| total.saturating_add(line.quantity))
    }

    pub(crate) fn quantity_of(&self, item_id: ItemId) -> u32 {
        self.lines.get(&item_id).map_or(0, |line| line.quantity)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartTotals {
    pub net: Money,
    pub cgst: Money,
    pub sgst: Money,
    pub grand_total: Money,
}

/// Read-only snapshot of the cart.
///
/// Taken once per render pass; every query on the same view answers from the
/// same ledger state, so a quantity badge and the total can never disagree.
#[derive(Clone, Debug)]
pub struct CartView {
    state: Arc<CartState>,
}

impl CartView {
    pub(crate) fn new(state: Arc<CartState>) -> Self {
        CartView { state }
    }

    /// Number of mutations applied to the ledger when this view was taken.
    pub fn version(&self) -> u64 {
        self.state.version
    }

    /// Lines in first-insertion order.
    pub fn lines(&self) -> impl Iterator<Item = &CartLine> + '_ {
        self.state.lines.values()
    }

    pub fn line(&self, item_id: ItemId) -> Option<&CartLine> {
        self.state.lines.get(&item_id)
    }

    pub fn quantity_of(&self, item_id: ItemId) -> u32 {
        self.state.quantity_of(item_id)
    }

    pub fn total_item_count(&self) -> u32 {
        self.state.total_item_count()
    }

    pub fn len(&self) -> usize {
        self.state.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lines.is_empty()
    }

    pub fn totals(&self) -> CartTotals {
        let net: Money = self.lines().map(CartLine::line_total).sum();
        let cgst = net.per_mille(CGST_PER_MILLE);
        let sgst = net.per_mille(SGST_PER_MILLE);
        CartTotals {
            net,
            cgst,
            sgst,
            grand_total: net + cgst + sgst,
        }
    }
}

impl PartialEq for CartView {
    /// Views are equal when they hold the same lines in the same order,
    /// regardless of how many mutations it took to get there.
    fn eq(&self, other: &Self) -> bool {
        self.state.lines.len() == other.state.lines.len()
            && self.lines().zip(other.lines()).all(|(a, b)| a == b)
    }
}
