//! Dashboard page: clock, watchlist search, strategy controls, account
//! summary, intraday chart, order book of the selected stock, risk radar and
//! execution quality.
//!
//! Only the clock ticks. The order book is rebuilt when the selection changes.

use crate::feed::Reducer;
use crate::services::snapshot::{active_algos, filter_watchlist, running_strategy_pnl};
use crate::services::{round2, FeedRng};
use crate::types::{
    AccountSummary, ExecutionQuality, IntradayPoint, OrderBookLevel, OrderBookSnapshot,
    RiskLevel, RiskRadar, Strategy, StrategyStatus, Timeframe, WatchlistEntry,
};
use chrono::{Duration, NaiveDateTime};
use serde::Serialize;
use tracing::{info, warn};

/// Dashboard state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardState {
    pub clock: NaiveDateTime,
    pub watchlist: Vec<WatchlistEntry>,
    pub query: String,
    pub selected_symbol: String,
    pub strategies: Vec<Strategy>,
    pub emergency_stop: bool,
    pub timeframe: Timeframe,
    pub intraday: Vec<IntradayPoint>,
    pub account: AccountSummary,
    pub risk: RiskRadar,
    pub execution: ExecutionQuality,
    /// Book of the selected symbol
    pub order_book: OrderBookSnapshot,
    /// Clock advance per tick (ms).
    #[serde(skip)]
    pub clock_step_ms: i64,
}

impl DashboardState {
    /// Fresh dashboard with the default watchlist and strategies.
    pub fn new(clock: NaiveDateTime, clock_step_ms: i64) -> Self {
        let watchlist = default_watchlist();
        let selected_symbol = watchlist
            .first()
            .map(|e| e.symbol.clone())
            .unwrap_or_default();
        let order_book = symbol_order_book(watchlist.first().map_or(0.0, |e| e.price));

        Self {
            clock,
            watchlist,
            query: String::new(),
            selected_symbol,
            strategies: default_strategies(),
            emergency_stop: false,
            timeframe: Timeframe::M5,
            intraday: default_intraday(),
            account: default_account(),
            risk: RiskRadar {
                var_95: 4.2,
                max_drawdown: -2.1,
                concentration: RiskLevel::Low,
            },
            execution: ExecutionQuality {
                avg_slippage_pct: 0.02,
                fill_rate_pct: 98.7,
                avg_latency_ms: 0.8,
                market_impact_pct: 0.01,
            },
            order_book,
            clock_step_ms,
        }
    }

    /// Watchlist rows matching the current search query.
    pub fn filtered_watchlist(&self) -> Vec<&WatchlistEntry> {
        filter_watchlist(&self.watchlist, &self.query)
    }

    /// Same state with a new search query.
    pub fn with_query(&self, query: &str) -> Self {
        Self {
            query: query.to_string(),
            ..self.clone()
        }
    }

    /// Same state with `symbol` selected, if it is on the watchlist. The
    /// order book moves to the new symbol.
    pub fn select(&self, symbol: &str) -> Self {
        let mut next = self.clone();
        if let Some(entry) = self.watchlist.iter().find(|e| e.symbol == symbol) {
            next.selected_symbol = entry.symbol.clone();
            next.order_book = symbol_order_book(entry.price);
        }
        next
    }

    pub fn next_timeframe(&self) -> Self {
        Self {
            timeframe: self.timeframe.next(),
            ..self.clone()
        }
    }

    /// Strategies currently running.
    pub fn active_algos(&self) -> usize {
        active_algos(&self.strategies)
    }

    /// Flip one strategy between running and paused (stopped resumes).
    /// Ignored while the emergency stop is engaged.
    pub fn toggle_strategy(&self, name: &str) -> Self {
        let mut next = self.clone();
        if self.emergency_stop {
            warn!("Emergency stop active, ignoring toggle of {}", name);
            return next;
        }

        for strategy in next.strategies.iter_mut().filter(|s| s.name == name) {
            strategy.status = strategy.status.toggled();
            info!("Strategy {} is now {}", strategy.name, strategy.status);
        }
        next
    }

    /// Engage or release the emergency stop. Engaging stops every strategy;
    /// releasing leaves them stopped.
    pub fn toggle_emergency_stop(&self) -> Self {
        let mut next = self.clone();
        next.emergency_stop = !self.emergency_stop;

        if next.emergency_stop {
            for strategy in next.strategies.iter_mut() {
                strategy.status = StrategyStatus::Stopped;
            }
            warn!("Emergency stop engaged, {} strategies stopped", next.strategies.len());
        } else {
            info!("Emergency stop released");
        }
        next
    }

    /// Combined P&L of running strategies.
    pub fn running_pnl(&self) -> f64 {
        running_strategy_pnl(&self.strategies)
    }
}

impl Reducer for DashboardState {
    fn tick(&self, _rng: &mut FeedRng) -> Self {
        Self {
            clock: self.clock + Duration::milliseconds(self.clock_step_ms),
            ..self.clone()
        }
    }
}

/// Default watchlist rows.
pub fn default_watchlist() -> Vec<WatchlistEntry> {
    [
        ("RELIANCE", 2503.25, 12.45, 0.5, "2.4M"),
        ("TCS", 3456.8, -23.15, -0.66, "1.8M"),
        ("HDFCBANK", 1678.9, 8.75, 0.52, "3.1M"),
        ("INFY", 1234.5, 15.2, 1.25, "2.7M"),
        ("ICICIBANK", 987.65, -5.3, -0.53, "1.9M"),
    ]
    .into_iter()
    .map(|(symbol, price, change, change_percent, volume)| WatchlistEntry {
        symbol: symbol.to_string(),
        price,
        change,
        change_percent,
        volume: volume.to_string(),
    })
    .collect()
}

/// Five-level book around `price`. The best ask sits on `price` itself and
/// the best bid half a point below it.
pub fn symbol_order_book(price: f64) -> OrderBookSnapshot {
    const ASKS: [(f64, u64, u32); 5] = [
        (0.0, 900, 9),
        (0.55, 2_200, 18),
        (1.0, 1_500, 12),
        (1.5, 800, 6),
        (2.25, 1_200, 10),
    ];
    const BIDS: [(f64, u64, u32); 5] = [
        (0.5, 1_800, 15),
        (1.0, 1_100, 9),
        (1.45, 2_400, 21),
        (2.0, 1_600, 13),
        (2.5, 3_200, 27),
    ];

    let level = |offset: f64, quantity: u64, orders: u32| OrderBookLevel {
        price: round2(price + offset),
        quantity,
        orders,
    };

    OrderBookSnapshot {
        base_price: round2(price),
        bids: BIDS.iter().map(|&(o, q, n)| level(-o, q, n)).collect(),
        asks: ASKS.iter().map(|&(o, q, n)| level(o, q, n)).collect(),
    }
}

/// Intraday portfolio value and volume, every fifteen minutes from the open.
pub fn default_intraday() -> Vec<IntradayPoint> {
    [
        ("09:15", 2_450_000.0, 1_200),
        ("09:30", 2_465_000.0, 1_800),
        ("09:45", 2_478_000.0, 2_100),
        ("10:00", 2_456_000.0, 1_600),
        ("10:15", 2_489_000.0, 2_400),
        ("10:30", 2_501_000.0, 2_800),
    ]
    .into_iter()
    .map(|(time, value, volume)| IntradayPoint {
        time: time.to_string(),
        value,
        volume,
    })
    .collect()
}

pub fn default_account() -> AccountSummary {
    AccountSummary {
        total_equity: 2_545_678.0,
        available_margin: 876_543.0,
        day_pnl: 12_340.0,
        day_pnl_pct: 0.48,
        trades_today: 156,
        active_positions: 23,
        positions_flagged: 5,
    }
}

/// Default automated strategies.
pub fn default_strategies() -> Vec<Strategy> {
    [
        ("Momentum Scalper", StrategyStatus::Running, 12_340.0, 45),
        ("Mean Reversion", StrategyStatus::Paused, -2_150.0, 23),
        ("Arbitrage Bot", StrategyStatus::Running, 8_750.0, 67),
        ("Volatility Harvester", StrategyStatus::Stopped, 4_560.0, 12),
    ]
    .into_iter()
    .map(|(name, status, pnl, trades)| Strategy {
        name: name.to_string(),
        status,
        pnl,
        trades,
    })
    .collect()
}
