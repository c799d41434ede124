//! Order book types for the simulated depth ladder.

use serde::{Deserialize, Serialize};

/// A single price level in an order book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderBookLevel {
    /// Price at this level
    pub price: f64,
    /// Total quantity resting at this price
    pub quantity: u64,
    /// Number of orders making up the quantity
    pub orders: u32,
}

/// Full depth snapshot. Regenerated wholesale every tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderBookSnapshot {
    /// Price the ladder is built around
    pub base_price: f64,
    /// Bid levels (buy orders), sorted by price descending
    pub bids: Vec<OrderBookLevel>,
    /// Ask levels (sell orders), sorted by price ascending
    pub asks: Vec<OrderBookLevel>,
}

impl OrderBookSnapshot {
    /// Create an empty order book for when no levels exist.
    pub fn empty(base_price: f64) -> Self {
        Self {
            base_price,
            bids: Vec::new(),
            asks: Vec::new(),
        }
    }

    /// Best (highest) bid level.
    pub fn best_bid(&self) -> Option<&OrderBookLevel> {
        self.bids.first()
    }

    /// Best (lowest) ask level.
    pub fn best_ask(&self) -> Option<&OrderBookLevel> {
        self.asks.first()
    }

    /// Total bid quantity.
    pub fn bid_total(&self) -> u64 {
        self.bids.iter().map(|l| l.quantity).sum()
    }

    /// Total ask quantity.
    pub fn ask_total(&self) -> u64 {
        self.asks.iter().map(|l| l.quantity).sum()
    }

    /// Whether every price is finite and every ask is strictly above every bid.
    /// Any NaN level makes the book crossed.
    pub fn is_uncrossed(&self) -> bool {
        let finite = self
            .bids
            .iter()
            .chain(self.asks.iter())
            .all(|l| l.price.is_finite());
        finite
            && self
                .asks
                .iter()
                .all(|a| self.bids.iter().all(|b| a.price > b.price))
    }
}
