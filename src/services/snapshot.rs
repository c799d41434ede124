//! Snapshot View
//!
//! Presentation-only values derived from the latest snapshot. Nothing here
//! stores state. Ratios return `None` instead of dividing by zero, and book
//! metrics return `None` for an empty side.

use super::round2;
use crate::types::{
    Holding, OptionContract, OrderBookSnapshot, OrderFlowPoint, PnLPoint, SectorAllocation,
    Strategy, StrategyStatus, VolumeProfileLevel, WatchlistEntry,
};
use std::collections::BTreeMap;

/// Best ask minus best bid.
pub fn spread(book: &OrderBookSnapshot) -> Option<f64> {
    let bid = book.best_bid()?.price;
    let ask = book.best_ask()?.price;
    Some(round2(ask - bid))
}

/// Midpoint of best bid and best ask.
pub fn mid_price(book: &OrderBookSnapshot) -> Option<f64> {
    let bid = book.best_bid()?.price;
    let ask = book.best_ask()?.price;
    Some(round2((bid + ask) / 2.0))
}

/// Order book imbalance: (bid_total - ask_total) / (bid_total + ask_total).
/// Range: -1.0 (all asks) to +1.0 (all bids)
pub fn book_imbalance(book: &OrderBookSnapshot) -> Option<f64> {
    let bid_total = book.bid_total() as f64;
    let ask_total = book.ask_total() as f64;
    let total = bid_total + ask_total;
    if total > 0.0 {
        Some((bid_total - ask_total) / total)
    } else {
        None
    }
}

/// Total call open interest across the chain.
pub fn total_call_oi(chain: &[OptionContract]) -> u64 {
    chain.iter().map(|row| row.call.oi).sum()
}

/// Total put open interest across the chain.
pub fn total_put_oi(chain: &[OptionContract]) -> u64 {
    chain.iter().map(|row| row.put.oi).sum()
}

/// Put-call ratio on open interest. `None` when there is no call OI.
pub fn put_call_ratio(chain: &[OptionContract]) -> Option<f64> {
    let calls = total_call_oi(chain);
    if calls == 0 {
        return None;
    }
    Some(round2(total_put_oi(chain) as f64 / calls as f64))
}

/// Strike nearest to `spot`. Ties resolve to the lower strike.
pub fn atm_strike(chain: &[OptionContract], spot: f64) -> Option<f64> {
    chain
        .iter()
        .map(|row| row.strike)
        .filter(|strike| strike.is_finite())
        .fold(None, |best: Option<f64>, strike| match best {
            None => Some(strike),
            Some(current) => {
                let d_new = (strike - spot).abs();
                let d_cur = (current - spot).abs();
                if d_new < d_cur || (d_new == d_cur && strike < current) {
                    Some(strike)
                } else {
                    Some(current)
                }
            }
        })
}

/// Deepest drawdown over the series (<= 0). Zero for an empty series.
pub fn max_drawdown<'a>(points: impl IntoIterator<Item = &'a PnLPoint>) -> f64 {
    points
        .into_iter()
        .map(|p| p.drawdown)
        .fold(0.0, f64::min)
}

/// Cumulative P&L as a percentage of `capital`. `None` for non-positive capital.
pub fn return_pct(cumulative_pnl: f64, capital: f64) -> Option<f64> {
    if capital > 0.0 {
        Some(round2(cumulative_pnl / capital * 100.0))
    } else {
        None
    }
}

/// Aggregate portfolio figures.
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioSummary {
    /// Market value at current prices
    pub total_value: f64,
    /// Cost basis at average prices
    pub invested: f64,
    /// Unrealized P&L
    pub total_pnl: f64,
    /// Unrealized P&L as a percentage of cost basis
    pub total_pnl_pct: f64,
}

/// Sum the holdings into a portfolio summary.
pub fn portfolio_summary(holdings: &[Holding]) -> PortfolioSummary {
    let total_value: f64 = holdings.iter().map(Holding::market_value).sum();
    let invested: f64 = holdings
        .iter()
        .map(|h| h.quantity as f64 * h.avg_price)
        .sum();
    let total_pnl: f64 = holdings.iter().map(Holding::pnl).sum();
    let total_pnl_pct = if invested > 0.0 {
        total_pnl / invested * 100.0
    } else {
        0.0
    };

    PortfolioSummary {
        total_value: round2(total_value),
        invested: round2(invested),
        total_pnl: round2(total_pnl),
        total_pnl_pct: round2(total_pnl_pct),
    }
}

/// Share of market value per sector, largest first.
pub fn sector_allocation(holdings: &[Holding]) -> Vec<SectorAllocation> {
    let total: f64 = holdings.iter().map(Holding::market_value).sum();
    if total <= 0.0 {
        return Vec::new();
    }

    let mut by_sector: BTreeMap<&str, f64> = BTreeMap::new();
    for holding in holdings {
        *by_sector.entry(holding.sector.as_str()).or_insert(0.0) += holding.market_value();
    }

    let mut allocation: Vec<SectorAllocation> = by_sector
        .into_iter()
        .map(|(sector, value)| SectorAllocation {
            sector: sector.to_string(),
            value: round2(value / total * 100.0),
        })
        .collect();
    allocation.sort_by(|a, b| b.value.total_cmp(&a.value));
    allocation
}

/// Watchlist rows whose symbol contains `query`, case-insensitively.
/// A blank query keeps every row.
pub fn filter_watchlist<'a>(entries: &'a [WatchlistEntry], query: &str) -> Vec<&'a WatchlistEntry> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return entries.iter().collect();
    }
    entries
        .iter()
        .filter(|e| e.symbol.to_lowercase().contains(&query))
        .collect()
}

/// Combined P&L of strategies currently running.
pub fn running_strategy_pnl(strategies: &[Strategy]) -> f64 {
    strategies
        .iter()
        .filter(|s| s.status == StrategyStatus::Running)
        .map(|s| s.pnl)
        .sum()
}

/// Number of strategies currently running.
pub fn active_algos(strategies: &[Strategy]) -> usize {
    strategies
        .iter()
        .filter(|s| s.status == StrategyStatus::Running)
        .count()
}

/// Price of the volume profile's point of control.
pub fn point_of_control(profile: &[VolumeProfileLevel]) -> Option<f64> {
    profile.iter().find(|l| l.poc).map(|l| l.price)
}

/// Sum of buy minus sell volume over the order flow.
pub fn net_delta(flow: &[OrderFlowPoint]) -> i64 {
    flow.iter().map(|p| p.delta).sum()
}
