//! Series Generator
//!
//! Produces the initial synthetic series a page is seeded with on mount.
//! Each point is derived from the previous one plus a bounded random step:
//! - Candles: random walk on close, wicks widened by noise
//! - Volatility: clamped walk in [5, 50] percentage points
//! - Volatility clustering: regime-switching walk in [5, 40]
//! - P&L: biased trade stream with running sum and drawdown
//! - Order book: fixed-depth ladder around a base price
//! - Options chain: strikes around spot with synthetic quotes
//! - Volume profile and order flow: one-off charts panels, never ticked

use super::{round2, round_to, FeedRng, PnLLog};
use crate::config::MarketConfig;
use crate::types::{
    intraday_label, Candle, MonthlyPnL, OptionContract, OptionQuote, OrderBookLevel,
    OrderBookSnapshot, OrderFlowPoint, PerformancePoint, PnLPoint, SeriesKind, VolSmilePoint,
    VolatilityClusterPoint, VolatilityPoint, VolumeProfileLevel,
};
use chrono::{Duration, NaiveDate};
use serde::Serialize;

/// Lower bound of the volatility walk (percentage points).
pub const VOL_FLOOR: f64 = 5.0;
/// Upper bound of the volatility walk (percentage points).
pub const VOL_CEILING: f64 = 50.0;
/// Upper bound of the clustering walk (percentage points).
pub const CLUSTER_CEILING: f64 = 40.0;
/// Points between regime flips in the clustering series.
pub const CLUSTER_PERIOD: usize = 40;
/// Floor applied to synthetic option premiums.
pub const MIN_PREMIUM: f64 = 0.05;
/// Half of the quoted option spread.
pub const OPTION_HALF_SPREAD: f64 = 0.5;

/// A generated series of any kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Series {
    Candles(Vec<Candle>),
    Volatility(Vec<VolatilityPoint>),
    VolatilityClustering(Vec<VolatilityClusterPoint>),
    PnL(Vec<PnLPoint>),
    OrderBook(OrderBookSnapshot),
    OptionsChain(Vec<OptionContract>),
}

impl Series {
    /// Kind of this series.
    pub fn kind(&self) -> SeriesKind {
        match self {
            Series::Candles(_) => SeriesKind::Candles,
            Series::Volatility(_) => SeriesKind::Volatility,
            Series::VolatilityClustering(_) => SeriesKind::VolatilityClustering,
            Series::PnL(_) => SeriesKind::PnL,
            Series::OrderBook(_) => SeriesKind::OrderBook,
            Series::OptionsChain(_) => SeriesKind::OptionsChain,
        }
    }

    /// Number of points. For an order book this is the depth per side.
    pub fn len(&self) -> usize {
        match self {
            Series::Candles(v) => v.len(),
            Series::Volatility(v) => v.len(),
            Series::VolatilityClustering(v) => v.len(),
            Series::PnL(v) => v.len(),
            Series::OrderBook(book) => book.bids.len().max(book.asks.len()),
            Series::OptionsChain(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Generator for the initial series of every kind.
#[derive(Debug, Clone)]
pub struct SeriesGenerator {
    market: MarketConfig,
}

impl SeriesGenerator {
    /// Create a generator for the given market parameters.
    pub fn new(market: MarketConfig) -> Self {
        Self { market }
    }

    pub fn market(&self) -> &MarketConfig {
        &self.market
    }

    /// Generate `length` points of `kind`.
    ///
    /// For the order book `length` is the depth per side; for the options
    /// chain it is the number of strikes on each side of the base strike.
    pub fn generate(&self, kind: SeriesKind, length: usize, rng: &mut FeedRng) -> Series {
        match kind {
            SeriesKind::Candles => {
                Series::Candles(generate_candles(length, self.market.base_price, rng))
            }
            SeriesKind::Volatility => Series::Volatility(generate_volatility(length, rng)),
            SeriesKind::VolatilityClustering => {
                Series::VolatilityClustering(generate_volatility_clustering(length, rng))
            }
            SeriesKind::PnL => Series::PnL(generate_pnl(length, rng)),
            SeriesKind::OrderBook => Series::OrderBook(generate_order_book(
                self.market.base_price,
                length,
                self.market.book_tick,
                rng,
            )),
            SeriesKind::OptionsChain => Series::OptionsChain(generate_options_chain(
                self.market.spot,
                self.market.strike_step,
                length,
                rng,
            )),
        }
    }
}

/// Candle random walk starting at `start_price`.
pub fn generate_candles(length: usize, start_price: f64, rng: &mut FeedRng) -> Vec<Candle> {
    let mut candles = Vec::with_capacity(length);
    let mut price = round2(start_price);

    for i in 0..length {
        let open = price;
        let close = round2(open + rng.jitter(100.0));
        let high = round2(open.max(close) + rng.scaled(50.0));
        let low = round2(open.min(close) - rng.scaled(50.0));

        candles.push(Candle {
            time: intraday_label(i),
            open,
            high,
            low,
            close,
            volume: rng.int_range(100_000, 1_100_000),
        });
        price = close;
    }

    candles
}

/// Volatility walk clamped to [VOL_FLOOR, VOL_CEILING].
pub fn generate_volatility(length: usize, rng: &mut FeedRng) -> Vec<VolatilityPoint> {
    let mut points = Vec::with_capacity(length);
    let mut vol = 15.0;

    for i in 0..length {
        vol = clamp_vol(vol + rng.jitter(2.0));
        points.push(VolatilityPoint {
            time: intraday_label(i),
            volatility: round2(vol),
            implied_vol: clamp_vol(round2(vol + rng.scaled(2.0))),
            historical_vol: clamp_vol(round2(vol - 1.0 + rng.scaled(2.0))),
        });
    }

    points
}

/// Regime-switching volatility walk. The regime flips sign every
/// CLUSTER_PERIOD points and modulates the walk sinusoidally.
pub fn generate_volatility_clustering(
    length: usize,
    rng: &mut FeedRng,
) -> Vec<VolatilityClusterPoint> {
    let mut points = Vec::with_capacity(length);
    let mut vol: f64 = 15.0;
    let mut phase = 0.0;

    for i in 0..length {
        if i % CLUSTER_PERIOD == 0 {
            phase = if rng.chance(0.5) { 1.0 } else { -1.0 };
        }
        let cluster = phase * 5.0 * (i as f64 * 0.1).sin();
        vol = (vol + rng.jitter(1.0) + cluster).clamp(VOL_FLOOR, CLUSTER_CEILING);

        points.push(VolatilityClusterPoint {
            time: i as u32,
            volatility: round2(vol),
            garch: round2(vol + rng.scaled(1.0)),
            realized: round2(vol - 0.5 + rng.scaled(1.0)),
        });
    }

    points
}

/// Trade stream with a slight positive bias.
pub fn generate_pnl(length: usize, rng: &mut FeedRng) -> Vec<PnLPoint> {
    generate_pnl_log(length, rng).to_vec()
}

/// Trade stream kept as a live log, so later ticks continue from its peak.
pub fn generate_pnl_log(length: usize, rng: &mut FeedRng) -> PnLLog {
    let mut log = PnLLog::new(length);
    for _ in 0..length {
        let trade = rng.step(0.45, 1000.0);
        let unrealized = rng.jitter(500.0);
        log.record(trade, unrealized);
    }
    log
}

/// Order book ladder of `depth` levels per side around `base_price`.
///
/// The base is snapped to the tick grid; bids sit strictly below it and asks
/// strictly above, so the book is never crossed.
pub fn generate_order_book(
    base_price: f64,
    depth: usize,
    tick: f64,
    rng: &mut FeedRng,
) -> OrderBookSnapshot {
    let base = snap_to_tick(base_price, tick);
    let mut bids = Vec::with_capacity(depth);
    let mut asks = Vec::with_capacity(depth);

    for i in 0..depth {
        let offset = (i + 1) as f64 * tick;
        bids.push(OrderBookLevel {
            price: round2(base - offset),
            quantity: rng.int_range(100, 5_100),
            orders: rng.int_range(1, 51) as u32,
        });
        asks.push(OrderBookLevel {
            price: round2(base + offset),
            quantity: rng.int_range(100, 5_100),
            orders: rng.int_range(1, 51) as u32,
        });
    }

    OrderBookSnapshot {
        base_price: round2(base),
        bids,
        asks,
    }
}

/// Options chain of `2 * strikes_per_side + 1` strikes around the strike
/// at or below `spot`.
pub fn generate_options_chain(
    spot: f64,
    strike_step: f64,
    strikes_per_side: usize,
    rng: &mut FeedRng,
) -> Vec<OptionContract> {
    let base_strike = (spot / strike_step).floor() * strike_step;
    let side = strikes_per_side as i64;

    (-side..=side)
        .map(|i| {
            let strike = round2(base_strike + i as f64 * strike_step);
            let skew = i.unsigned_abs() as f64 * 0.5;

            let call_intrinsic = (strike < spot).then(|| spot - strike);
            let put_intrinsic = (strike > spot).then(|| strike - spot);

            OptionContract {
                strike,
                call: generate_quote(call_intrinsic, skew, rng),
                put: generate_quote(put_intrinsic, skew, rng),
            }
        })
        .collect()
}

/// Synthetic quote. In-the-money legs price at intrinsic plus noise.
fn generate_quote(intrinsic: Option<f64>, skew: f64, rng: &mut FeedRng) -> OptionQuote {
    let iv = 15.0 + rng.scaled(10.0) + skew;
    let ltp = match intrinsic {
        Some(value) => value + rng.scaled(20.0),
        None => rng.scaled(30.0),
    }
    .max(MIN_PREMIUM);
    let oi = rng.int_range(1_000, 51_000);
    let volume = rng.int_range(0, 10_000);
    let change = rng.jitter(10.0);

    OptionQuote {
        bid: round2((ltp - OPTION_HALF_SPREAD).max(0.0)),
        ask: round2(ltp + OPTION_HALF_SPREAD),
        ltp: round2(ltp),
        change: round2(change),
        volume,
        oi,
        iv: round2(iv),
    }
}

/// Implied volatility smile across `strikes`: a parabola in moneyness plus noise.
pub fn generate_vol_smile(spot: f64, strikes: &[f64], rng: &mut FeedRng) -> Vec<VolSmilePoint> {
    strikes
        .iter()
        .map(|&strike| {
            let moneyness = strike / spot;
            let iv = 15.0 + ((moneyness - 1.0) * 100.0).powi(2) * 0.02 + rng.scaled(2.0);
            VolSmilePoint {
                strike,
                moneyness: round_to(moneyness, 3),
                iv: round2(iv),
            }
        })
        .collect()
}

/// Daily portfolio value against a benchmark for the `days` days ending on `end`.
pub fn generate_performance(days: usize, end: NaiveDate, rng: &mut FeedRng) -> Vec<PerformancePoint> {
    (0..days)
        .map(|i| {
            let date = end - Duration::days((days - 1 - i) as i64);
            PerformancePoint {
                date: date.format("%Y-%m-%d").to_string(),
                portfolio_value: round2(950_000.0 + rng.scaled(100_000.0)),
                benchmark: round2(950_000.0 + rng.scaled(80_000.0)),
                day_pnl: round2(rng.jitter(20_000.0)),
            }
        })
        .collect()
}

/// Realized, unrealized and dividend P&L for each calendar month.
pub fn generate_monthly_pnl(rng: &mut FeedRng) -> Vec<MonthlyPnL> {
    const MONTHS: [&str; 12] = [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ];

    MONTHS
        .iter()
        .map(|month| MonthlyPnL {
            month: month.to_string(),
            realized: round2(rng.step(0.3, 50_000.0)),
            unrealized: round2(rng.jitter(30_000.0)),
            dividends: round2(rng.scaled(5_000.0)),
        })
        .collect()
}

/// `levels` price levels `step` apart, centred on `center`.
///
/// The level with the highest volume is the point of control; on a tie the
/// lower price wins.
pub fn generate_volume_profile(
    center: f64,
    levels: usize,
    step: f64,
    rng: &mut FeedRng,
) -> Vec<VolumeProfileLevel> {
    let low = center - (levels / 2) as f64 * step;
    let mut profile: Vec<VolumeProfileLevel> = (0..levels)
        .map(|i| VolumeProfileLevel {
            price: round2(low + i as f64 * step),
            volume: rng.int_range(50_000, 550_000),
            poc: false,
        })
        .collect();

    let mut poc: Option<usize> = None;
    for (i, level) in profile.iter().enumerate() {
        if poc.map_or(true, |p| level.volume > profile[p].volume) {
            poc = Some(i);
        }
    }
    if let Some(i) = poc {
        profile[i].poc = true;
    }
    profile
}

/// `length` three-minute order flow readings from 14:00.
pub fn generate_order_flow(length: usize, rng: &mut FeedRng) -> Vec<OrderFlowPoint> {
    (0..length)
        .map(|i| {
            let minutes = (14 * 60 + i * 3) % (24 * 60);
            let buy_volume = rng.int_range(20_000, 120_000);
            let sell_volume = rng.int_range(20_000, 120_000);
            OrderFlowPoint {
                time: format!("{:02}:{:02}", minutes / 60, minutes % 60),
                buy_volume,
                sell_volume,
                delta: buy_volume as i64 - sell_volume as i64,
            }
        })
        .collect()
}

/// Clamp into the volatility band.
pub fn clamp_vol(value: f64) -> f64 {
    value.clamp(VOL_FLOOR, VOL_CEILING)
}

/// Nearest multiple of `tick`.
pub fn snap_to_tick(price: f64, tick: f64) -> f64 {
    (price / tick).round() * tick
}
