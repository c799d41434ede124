//! Tick Updater
//!
//! Step functions applied on every timer tick. They operate on a copy owned
//! by the next state, so page reducers stay pure: `tick(&state, rng)` never
//! touches `state`.

use super::generator::{clamp_vol, generate_order_book, snap_to_tick};
use super::{round2, FeedRng, PnLLog, SeriesWindow};
use crate::types::{Candle, OrderBookSnapshot, PnLPoint, VolatilityPoint};

/// Largest close move applied to the live candle per tick.
pub const CANDLE_TICK_SCALE: f64 = 20.0;
/// Largest volatility move per tick.
pub const VOL_TICK_SCALE: f64 = 0.5;
/// Largest implied volatility move per tick.
pub const IMPLIED_VOL_TICK_SCALE: f64 = 0.3;
/// Scale of the trade appended to the P&L log per tick.
pub const PNL_TICK_SCALE: f64 = 100.0;
/// Largest spot move per options tick.
pub const SPOT_TICK_SCALE: f64 = 10.0;

/// Move the live candle's close and widen its range to include it.
pub fn step_candle(candle: &mut Candle, rng: &mut FeedRng) {
    let close = round2(candle.close + rng.jitter(CANDLE_TICK_SCALE));
    candle.close = close;
    candle.high = candle.high.max(close);
    candle.low = candle.low.min(close);
    candle.volume += rng.int_range(0, 10_000);
}

/// Walk the live volatility reading, clamped to the volatility band.
pub fn step_volatility(point: &mut VolatilityPoint, rng: &mut FeedRng) {
    point.volatility = clamp_vol(round2(point.volatility + rng.jitter(VOL_TICK_SCALE)));
    point.implied_vol = clamp_vol(round2(point.implied_vol + rng.jitter(IMPLIED_VOL_TICK_SCALE)));
}

/// Next candle window: the last candle is stepped in place.
pub fn tick_candles(candles: &SeriesWindow<Candle>, rng: &mut FeedRng) -> SeriesWindow<Candle> {
    let mut next = candles.clone();
    if let Some(last) = next.last_mut() {
        step_candle(last, rng);
    }
    next
}

/// Next volatility window: the last reading is stepped in place.
pub fn tick_volatility(
    points: &SeriesWindow<VolatilityPoint>,
    rng: &mut FeedRng,
) -> SeriesWindow<VolatilityPoint> {
    let mut next = points.clone();
    if let Some(last) = next.last_mut() {
        step_volatility(last, rng);
    }
    next
}

/// Next P&L log: one trade appended, oldest trimmed.
pub fn tick_pnl(log: &PnLLog, rng: &mut FeedRng) -> (PnLLog, PnLPoint) {
    let mut next = log.clone();
    let trade = rng.step(0.45, PNL_TICK_SCALE);
    let unrealized = rng.jitter(500.0);
    let point = next.record(trade, unrealized);
    (next, point)
}

/// Fresh order book around `reference_price`.
pub fn tick_order_book(
    reference_price: f64,
    depth: usize,
    tick: f64,
    rng: &mut FeedRng,
) -> OrderBookSnapshot {
    generate_order_book(snap_to_tick(reference_price, tick), depth, tick, rng)
}

/// Next underlying spot for the options page.
pub fn tick_spot(spot: f64, rng: &mut FeedRng) -> f64 {
    round2(spot + rng.jitter(SPOT_TICK_SCALE)).max(0.01)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::generator::{generate_candles, generate_volatility};

    #[test]
    fn test_tick_candles_leaves_input_untouched() {
        let mut rng = FeedRng::seeded(1);
        let candles = SeriesWindow::from_points(generate_candles(10, 19_500.0, &mut rng), 10);
        let before = candles.clone();

        let next = tick_candles(&candles, &mut rng);

        assert_eq!(candles, before);
        assert_eq!(next.len(), candles.len());
        // only the live candle moves
        for i in 0..9 {
            assert_eq!(next.get(i), candles.get(i));
        }
        assert_eq!(next.last().unwrap().open, candles.last().unwrap().open);
    }

    #[test]
    fn test_candle_volume_accumulates() {
        let mut rng = FeedRng::seeded(2);
        let mut candle = generate_candles(1, 19_500.0, &mut rng).remove(0);
        let start = candle.volume;

        for _ in 0..100 {
            step_candle(&mut candle, &mut rng);
        }
        assert!(candle.volume >= start);
        assert!(candle.is_well_formed());
    }

    #[test]
    fn test_volatility_tick_stays_in_band() {
        let mut rng = FeedRng::seeded(3);
        let mut points = SeriesWindow::from_points(generate_volatility(5, &mut rng), 5);

        for _ in 0..5_000 {
            points = tick_volatility(&points, &mut rng);
            let last = points.last().unwrap();
            assert!((5.0..=50.0).contains(&last.volatility));
            assert!((5.0..=50.0).contains(&last.implied_vol));
        }
    }

    #[test]
    fn test_tick_pnl_appends() {
        let mut rng = FeedRng::seeded(4);
        let log = PnLLog::new(3);

        let (log, first) = tick_pnl(&log, &mut rng);
        let (log, second) = tick_pnl(&log, &mut rng);

        assert_eq!(log.points().len(), 2);
        assert_eq!(second.cumulative_pnl, round2(first.cumulative_pnl + second.trade_pnl));
    }

    #[test]
    fn test_tick_order_book_recenters() {
        let mut rng = FeedRng::seeded(5);
        let book = tick_order_book(19_612.37, 10, 0.25, &mut rng);

        assert_eq!(book.base_price, 19_612.25);
        assert_eq!(book.bids[0].price, 19_612.0);
        assert_eq!(book.asks[0].price, 19_612.5);
        assert!(book.is_uncrossed());
    }
}
