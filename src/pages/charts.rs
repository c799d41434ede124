//! Charts page: candles, volatility, order book, P&L and volatility clustering.
//!
//! Every series is seeded on mount. Each tick moves the live candle and the
//! live volatility reading, appends one trade to the P&L log and rebuilds the
//! order book around the latest close. The clustering series, the volume
//! profile and the order flow are generated once and never ticked. Pausing
//! the page cancels its timer; resuming registers a new one.

use crate::config::Config;
use crate::feed::{LiveFeed, Reducer};
use crate::services::generator::{
    generate_candles, generate_order_book, generate_order_flow, generate_pnl_log,
    generate_volatility, generate_volatility_clustering, generate_volume_profile,
};
use crate::services::snapshot::{
    max_drawdown, mid_price, net_delta, point_of_control, return_pct, spread,
};
use crate::services::updater::{tick_candles, tick_order_book, tick_pnl, tick_volatility};
use crate::services::{FeedRng, PnLLog, SeriesWindow};
use crate::types::{
    Candle, OrderBookSnapshot, OrderFlowPoint, Timeframe, VolatilityClusterPoint,
    VolatilityPoint, VolumeProfileLevel,
};
use serde::Serialize;
use tracing::info;

/// Symbols offered by the symbol selector.
pub const CHART_SYMBOLS: [&str; 5] = ["NIFTY", "BANKNIFTY", "RELIANCE", "TCS", "HDFC"];

const PROFILE_LEVELS: usize = 50;
const PROFILE_STEP: f64 = 10.0;
const ORDER_FLOW_POINTS: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartsState {
    pub symbol: String,
    pub timeframe: Timeframe,
    pub live: bool,
    pub candles: SeriesWindow<Candle>,
    pub volatility: SeriesWindow<VolatilityPoint>,
    pub clustering: Vec<VolatilityClusterPoint>,
    pub order_book: OrderBookSnapshot,
    pub pnl: PnLLog,
    pub volume_profile: Vec<VolumeProfileLevel>,
    pub order_flow: Vec<OrderFlowPoint>,
    #[serde(skip)]
    book_depth: usize,
    #[serde(skip)]
    book_tick: f64,
}

impl ChartsState {
    /// Seed every series from `rng`.
    pub fn generate(config: &Config, rng: &mut FeedRng) -> Self {
        let len = config.series_len;
        let market = &config.market;

        let candles = SeriesWindow::from_points(generate_candles(len, market.base_price, rng), len);
        let volatility = SeriesWindow::from_points(generate_volatility(len, rng), len);
        let clustering = generate_volatility_clustering(len, rng);
        let reference = candles.last().map_or(market.base_price, |c| c.close);
        let order_book = generate_order_book(reference, market.book_depth, market.book_tick, rng);
        let pnl = generate_pnl_log(len, rng);
        let volume_profile =
            generate_volume_profile(market.base_price, PROFILE_LEVELS, PROFILE_STEP, rng);
        let order_flow = generate_order_flow(ORDER_FLOW_POINTS, rng);

        Self {
            symbol: CHART_SYMBOLS[0].to_string(),
            timeframe: Timeframe::M1,
            live: true,
            candles,
            volatility,
            clustering,
            order_book,
            pnl,
            volume_profile,
            order_flow,
            book_depth: market.book_depth,
            book_tick: market.book_tick,
        }
    }

    /// Same state with live updates switched on or off.
    pub fn toggle_live(&self) -> Self {
        Self {
            live: !self.live,
            ..self.clone()
        }
    }

    /// Same state with the next symbol selected.
    pub fn next_symbol(&self) -> Self {
        let index = CHART_SYMBOLS
            .iter()
            .position(|s| *s == self.symbol)
            .map_or(0, |i| (i + 1) % CHART_SYMBOLS.len());
        Self {
            symbol: CHART_SYMBOLS[index].to_string(),
            ..self.clone()
        }
    }

    pub fn next_timeframe(&self) -> Self {
        Self {
            timeframe: self.timeframe.next(),
            ..self.clone()
        }
    }

    /// Candle volumes for the volume analysis bars, oldest first.
    pub fn recent_volumes(&self, window: usize) -> Vec<u64> {
        self.candles.tail(window).map(|c| c.volume).collect()
    }

    pub fn point_of_control(&self) -> Option<f64> {
        point_of_control(&self.volume_profile)
    }

    pub fn net_delta(&self) -> i64 {
        net_delta(&self.order_flow)
    }

    pub fn last_close(&self) -> Option<f64> {
        self.candles.last().map(|c| c.close)
    }

    pub fn spread(&self) -> Option<f64> {
        spread(&self.order_book)
    }

    pub fn mid_price(&self) -> Option<f64> {
        mid_price(&self.order_book)
    }

    /// Deepest drawdown in the visible P&L window.
    pub fn max_drawdown(&self) -> f64 {
        max_drawdown(self.pnl.points().iter())
    }

    pub fn return_pct(&self, capital: f64) -> Option<f64> {
        return_pct(self.pnl.cumulative(), capital)
    }
}

impl LiveFeed<ChartsState> {
    /// Flip live updates. Pausing cancels the timer and resuming starts a
    /// new one, so a paused chart has no timer at all.
    pub fn toggle_live(&mut self) {
        self.apply(ChartsState::toggle_live);
        if self.snapshot().live {
            self.resume();
        } else {
            self.pause();
        }
        info!("Charts live updates {}", if self.is_live() { "on" } else { "off" });
    }
}

impl Reducer for ChartsState {
    fn tick(&self, rng: &mut FeedRng) -> Self {
        if !self.live {
            return self.clone();
        }

        let candles = tick_candles(&self.candles, rng);
        let volatility = tick_volatility(&self.volatility, rng);
        let (pnl, _) = tick_pnl(&self.pnl, rng);
        let reference = candles
            .last()
            .map_or(self.order_book.base_price, |c| c.close);
        let order_book = tick_order_book(reference, self.book_depth, self.book_tick, rng);

        Self {
            candles,
            volatility,
            pnl,
            order_book,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            series_len: 20,
            ..Config::default()
        }
    }

    #[test]
    fn test_generate_fills_windows() {
        let s = ChartsState::generate(&config(), &mut FeedRng::seeded(1));
        assert_eq!(s.candles.len(), 20);
        assert_eq!(s.volatility.len(), 20);
        assert_eq!(s.clustering.len(), 20);
        assert_eq!(s.pnl.points().len(), 20);
        assert_eq!(s.order_book.bids.len(), 10);
        assert_eq!(s.spread(), Some(0.5));
        assert_eq!(s.timeframe, Timeframe::M1);
        assert_eq!(s.volume_profile.len(), 50);
        assert_eq!(s.order_flow.len(), 20);
        assert!(s.point_of_control().is_some());
    }

    #[test]
    fn test_tick_keeps_windows_full() {
        let mut rng = FeedRng::seeded(2);
        let mut s = ChartsState::generate(&config(), &mut rng);
        for _ in 0..50 {
            s = s.tick(&mut rng);
        }
        assert_eq!(s.candles.len(), 20);
        assert_eq!(s.pnl.points().len(), 20);
        assert_eq!(s.pnl.trades_recorded(), 70);
        assert!(s.max_drawdown() <= 0.0);
    }

    #[test]
    fn test_book_follows_last_close() {
        let mut rng = FeedRng::seeded(3);
        let s = ChartsState::generate(&config(), &mut rng).tick(&mut rng);
        let close = s.last_close().unwrap();
        assert!((s.order_book.base_price - close).abs() <= 0.125 + 1e-9);
        assert!(s.order_book.is_uncrossed());
    }

    #[test]
    fn test_paused_tick_is_identity() {
        let mut rng = FeedRng::seeded(4);
        let s = ChartsState::generate(&config(), &mut rng).toggle_live();
        assert_eq!(s.tick(&mut rng), s);
    }

    #[test]
    fn test_one_off_panels_not_ticked() {
        let mut rng = FeedRng::seeded(5);
        let s = ChartsState::generate(&config(), &mut rng);
        let next = s.tick(&mut rng);
        assert_eq!(next.clustering, s.clustering);
        assert_eq!(next.volume_profile, s.volume_profile);
        assert_eq!(next.order_flow, s.order_flow);
        assert_eq!(next.net_delta(), s.net_delta());
    }

    #[test]
    fn test_next_timeframe_cycles() {
        let s = ChartsState::generate(&config(), &mut FeedRng::seeded(7));
        assert_eq!(s.next_timeframe().timeframe, Timeframe::M5);
        let mut next = s.clone();
        for _ in 0..Timeframe::all().len() {
            next = next.next_timeframe();
        }
        assert_eq!(next.timeframe, Timeframe::M1);
    }

    #[test]
    fn test_recent_volumes_follow_last_candles() {
        let s = ChartsState::generate(&config(), &mut FeedRng::seeded(8));
        let candles = s.candles.to_vec();

        let volumes = s.recent_volumes(5);
        assert_eq!(volumes.len(), 5);
        assert_eq!(volumes[4], candles[19].volume);
        assert_eq!(volumes[0], candles[15].volume);
        assert_eq!(s.recent_volumes(100).len(), 20);
    }

    #[test]
    fn test_next_symbol_cycles() {
        let s = ChartsState::generate(&config(), &mut FeedRng::seeded(6));
        let mut next = s.clone();
        for _ in 0..CHART_SYMBOLS.len() {
            next = next.next_symbol();
        }
        assert_eq!(next.symbol, s.symbol);
        assert_eq!(s.next_symbol().symbol, "BANKNIFTY");
    }
}
