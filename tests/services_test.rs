//! Unit tests for services module

use tickboard::services::generator::{
    clamp_vol, generate_candles, generate_options_chain, generate_order_book, generate_pnl,
    generate_volatility, generate_volatility_clustering, CLUSTER_CEILING, VOL_CEILING, VOL_FLOOR,
};
use tickboard::services::snapshot::{atm_strike, max_drawdown, put_call_ratio, spread};
use tickboard::services::updater::{tick_candles, tick_order_book, tick_pnl, tick_volatility};
use tickboard::services::{round2, FeedRng, PnLLog, Series, SeriesGenerator, SeriesWindow};
use tickboard::types::SeriesKind;
use tickboard::MarketConfig;

#[test]
fn test_same_seed_same_series() {
    let generator = SeriesGenerator::new(MarketConfig::default());

    for kind in SeriesKind::all() {
        let a = generator.generate(kind, 20, &mut FeedRng::seeded(99));
        let b = generator.generate(kind, 20, &mut FeedRng::seeded(99));
        assert_eq!(a, b, "{:?} differs for the same seed", kind);
        assert_eq!(a.kind(), kind);
    }
}

#[test]
fn test_different_seed_different_candles() {
    let a = generate_candles(20, 19_500.0, &mut FeedRng::seeded(1));
    let b = generate_candles(20, 19_500.0, &mut FeedRng::seeded(2));
    assert_ne!(a, b);
}

#[test]
fn test_generated_lengths() {
    let generator = SeriesGenerator::new(MarketConfig::default());
    let mut rng = FeedRng::seeded(3);

    assert_eq!(generator.generate(SeriesKind::Candles, 100, &mut rng).len(), 100);
    assert_eq!(generator.generate(SeriesKind::PnL, 0, &mut rng).len(), 0);

    match generator.generate(SeriesKind::OrderBook, 10, &mut rng) {
        Series::OrderBook(book) => {
            assert_eq!(book.bids.len(), 10);
            assert_eq!(book.asks.len(), 10);
        }
        other => panic!("unexpected series {:?}", other.kind()),
    }

    match generator.generate(SeriesKind::OptionsChain, 10, &mut rng) {
        Series::OptionsChain(chain) => assert_eq!(chain.len(), 21),
        other => panic!("unexpected series {:?}", other.kind()),
    }
}

#[test]
fn test_candles_chain_and_stay_well_formed() {
    let candles = generate_candles(200, 19_500.0, &mut FeedRng::seeded(4));

    assert_eq!(candles[0].open, 19_500.0);
    for pair in candles.windows(2) {
        assert_eq!(pair[1].open, pair[0].close);
    }
    assert!(candles.iter().all(|c| c.is_well_formed()));
}

#[test]
fn test_candles_stay_well_formed_after_ticks() {
    let mut rng = FeedRng::seeded(5);
    let mut window = SeriesWindow::from_points(generate_candles(50, 19_500.0, &mut rng), 50);

    for _ in 0..500 {
        window = tick_candles(&window, &mut rng);
        assert_eq!(window.len(), 50);
        assert!(window.iter().all(|c| c.is_well_formed()));
    }
}

#[test]
fn test_volatility_bounded() {
    let mut rng = FeedRng::seeded(6);
    let points = generate_volatility(300, &mut rng);

    let in_range = |v: f64| (VOL_FLOOR..=VOL_CEILING).contains(&v);
    assert!(points
        .iter()
        .all(|p| in_range(p.volatility) && in_range(p.implied_vol) && in_range(p.historical_vol)));

    let mut window = SeriesWindow::from_points(points, 300);
    for _ in 0..500 {
        window = tick_volatility(&window, &mut rng);
    }
    assert!(window
        .iter()
        .all(|p| in_range(p.volatility) && in_range(p.implied_vol) && in_range(p.historical_vol)));
}

#[test]
fn test_volatility_clustering_bounded() {
    let points = generate_volatility_clustering(400, &mut FeedRng::seeded(7));

    assert_eq!(points.len(), 400);
    assert!(points
        .iter()
        .all(|p| p.volatility >= VOL_FLOOR && p.volatility <= CLUSTER_CEILING));
    assert_eq!(points[399].time, 399);
}

#[test]
fn test_clamp_vol() {
    assert_eq!(clamp_vol(1.0), VOL_FLOOR);
    assert_eq!(clamp_vol(80.0), VOL_CEILING);
    assert_eq!(clamp_vol(20.0), 20.0);
}

#[test]
fn test_pnl_cumulative_is_sum_of_trades() {
    let points = generate_pnl(100, &mut FeedRng::seeded(8));

    let mut sum = 0.0;
    let mut peak = f64::NEG_INFINITY;
    for p in &points {
        sum += p.trade_pnl;
        peak = peak.max(p.cumulative_pnl);
        assert_eq!(p.cumulative_pnl, round2(sum));
        assert!((p.drawdown - (p.cumulative_pnl - peak)).abs() < 0.01);
        assert!(p.drawdown <= 0.0);
    }
}

#[test]
fn test_pnl_tick_appends_and_trims() {
    let mut rng = FeedRng::seeded(9);
    let mut log = PnLLog::new(10);
    for _ in 0..10 {
        log.record(rng.jitter(100.0), 0.0);
    }
    let before = log.cumulative();

    let (next, point) = tick_pnl(&log, &mut rng);
    assert_eq!(next.points().len(), 10);
    assert_eq!(next.last(), Some(&point));
    assert_eq!(point.cumulative_pnl, round2(before + point.trade_pnl));
    // the input log is untouched
    assert_eq!(log.cumulative(), before);
}

#[test]
fn test_max_drawdown_matches_points() {
    let points = generate_pnl(100, &mut FeedRng::seeded(10));
    let worst = points.iter().map(|p| p.drawdown).fold(0.0, f64::min);
    assert_eq!(max_drawdown(&points), worst);
}

#[test]
fn test_order_book_uncrossed() {
    let mut rng = FeedRng::seeded(11);
    let book = generate_order_book(19_500.1, 10, 0.25, &mut rng);

    assert!(book.is_uncrossed());
    assert_eq!(book.base_price, 19_500.0);
    assert!(book.bids.windows(2).all(|w| w[0].price > w[1].price));
    assert!(book.asks.windows(2).all(|w| w[0].price < w[1].price));
    assert_eq!(spread(&book), Some(0.5));

    let next = tick_order_book(19_612.4, 10, 0.25, &mut rng);
    assert!(next.is_uncrossed());
    assert_eq!(next.base_price, 19_612.5);
}

#[test]
fn test_options_chain_centered_on_spot() {
    let chain = generate_options_chain(19_650.0, 50.0, 10, &mut FeedRng::seeded(12));

    assert_eq!(chain.len(), 21);
    assert_eq!(chain[0].strike, 19_150.0);
    assert_eq!(chain[20].strike, 20_150.0);
    assert_eq!(atm_strike(&chain, 19_650.0), Some(19_650.0));
    assert!(put_call_ratio(&chain).is_some());
    assert!(chain.iter().all(|c| c.call.ltp >= 0.05 && c.put.ltp >= 0.05));
}
