//! Navigation and page lifecycle tests, run on paused tokio time.

use std::time::Duration;
use tickboard::pages::{Page, Route};
use tickboard::types::StrategyStatus;
use tickboard::{Config, Navigator};
use tokio::time;

async fn step(period: Duration) {
    time::advance(period).await;
    for _ in 0..4 {
        tokio::task::yield_now().await;
    }
}

fn seeded_config(seed: u64) -> Config {
    Config {
        seed: Some(seed),
        series_len: 30,
        ..Config::default()
    }
}

fn charts_candles(nav: &Navigator) -> Vec<tickboard::types::Candle> {
    match nav.page() {
        Page::Charts(feed) => feed.snapshot().candles.to_vec(),
        other => panic!("expected charts, got {:?}", other.route()),
    }
}

#[tokio::test(start_paused = true)]
async fn test_only_active_page_ticks() {
    let config = seeded_config(1);
    let second = config.tick_period();
    let mut nav = Navigator::new(config);

    for route in Route::all() {
        nav.navigate(route);
        let expected = usize::from(route.period(nav.config()).is_some());
        assert_eq!(nav.active_timers(), expected, "{}", route.name());

        step(second).await;
        assert_eq!(nav.active_timers(), expected);
    }

    nav.shutdown();
    assert_eq!(nav.active_timers(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_page_tick_counts() {
    let config = seeded_config(2);
    let second = config.tick_period();
    let mut nav = Navigator::new(config);

    for _ in 0..3 {
        step(second).await;
    }
    assert_eq!(nav.page().ticks(), 3);

    nav.navigate(Route::Options);
    assert_eq!(nav.page().ticks(), 0);
    step(second).await;
    assert_eq!(nav.page().ticks(), 0);
    step(second).await;
    assert_eq!(nav.page().ticks(), 1);

    nav.navigate(Route::Portfolio);
    for _ in 0..5 {
        step(second).await;
    }
    assert_eq!(nav.page().ticks(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_remount_reseeds() {
    let mut nav = Navigator::new(seeded_config(3));

    nav.navigate(Route::Charts);
    let first = charts_candles(&nav);

    nav.navigate(Route::Dashboard);
    nav.navigate(Route::Charts);
    let second = charts_candles(&nav);

    assert_eq!(first.len(), second.len());
    assert_ne!(first, second);
}

#[tokio::test(start_paused = true)]
async fn test_same_seed_same_pages() {
    let mut a = Navigator::new(seeded_config(4));
    let mut b = Navigator::new(seeded_config(4));

    a.navigate(Route::Charts);
    b.navigate(Route::Charts);
    assert_eq!(charts_candles(&a), charts_candles(&b));

    step(Duration::from_secs(1)).await;
    assert_eq!(charts_candles(&a), charts_candles(&b));
}

#[tokio::test(start_paused = true)]
async fn test_paused_chart_holds_still() {
    let mut nav = Navigator::new(seeded_config(5));
    nav.navigate(Route::Charts);
    assert_eq!(nav.active_timers(), 1);

    let Page::Charts(feed) = nav.page_mut() else {
        panic!("expected charts");
    };
    feed.toggle_live();
    assert!(!feed.is_live());
    let before = feed.snapshot();

    for _ in 0..3 {
        step(Duration::from_secs(1)).await;
    }
    assert_eq!(feed.ticks(), 0);
    assert_eq!(*feed.snapshot(), *before);
    assert_eq!(nav.active_timers(), 0);

    let Page::Charts(feed) = nav.page_mut() else {
        panic!("expected charts");
    };
    feed.toggle_live();
    assert!(feed.snapshot().live);
    assert_eq!(nav.active_timers(), 1);

    step(Duration::from_secs(1)).await;
    let Page::Charts(feed) = nav.page() else {
        panic!("expected charts");
    };
    assert_eq!(feed.ticks(), 1);
    assert_ne!(feed.snapshot().candles, before.candles);
}

#[tokio::test(start_paused = true)]
async fn test_leaving_paused_chart_leaves_no_timer() {
    let mut nav = Navigator::new(seeded_config(10));
    nav.navigate(Route::Charts);

    if let Page::Charts(feed) = nav.page_mut() {
        feed.toggle_live();
    }
    nav.navigate(Route::Portfolio);
    assert_eq!(nav.active_timers(), 0);

    nav.navigate(Route::Charts);
    assert_eq!(nav.active_timers(), 1);
    let Page::Charts(feed) = nav.page() else {
        panic!("expected charts");
    };
    assert!(feed.snapshot().live);
}

#[tokio::test(start_paused = true)]
async fn test_dashboard_clock_advances_per_tick() {
    let config = seeded_config(6);
    let second = config.tick_period();
    let nav = Navigator::new(config);

    let Page::Dashboard(feed) = nav.page() else {
        panic!("expected dashboard");
    };
    let start = feed.snapshot().clock;

    step(second).await;
    step(second).await;
    assert_eq!(feed.snapshot().clock - start, chrono::Duration::seconds(2));
}

#[tokio::test(start_paused = true)]
async fn test_emergency_stop_survives_ticks() {
    let config = seeded_config(7);
    let second = config.tick_period();
    let nav = Navigator::new(config);

    let Page::Dashboard(feed) = nav.page() else {
        panic!("expected dashboard");
    };
    feed.apply(|s| s.toggle_emergency_stop());
    step(second).await;

    let state = feed.snapshot();
    assert!(state.emergency_stop);
    assert!(state
        .strategies
        .iter()
        .all(|s| s.status == StrategyStatus::Stopped));
}

#[tokio::test(start_paused = true)]
async fn test_options_spot_moves_on_its_own_period() {
    let config = seeded_config(8);
    let mut nav = Navigator::new(config);
    nav.navigate(Route::Options);

    let Page::Options(feed) = nav.page() else {
        panic!("expected options");
    };
    let before = feed.snapshot();
    assert_eq!(before.atm_strike(), Some(19_650.0));

    step(Duration::from_secs(1)).await;
    assert_eq!(*feed.snapshot(), *before);

    step(Duration::from_secs(1)).await;
    let after = feed.snapshot();
    assert_eq!(after.chain.len(), before.chain.len());
    assert_eq!(after.greeks.len(), after.chain.len());
}

#[tokio::test(start_paused = true)]
async fn test_page_snapshot_json() {
    let mut nav = Navigator::new(seeded_config(9));

    nav.navigate(Route::Charts);
    let json = nav.page().snapshot_json().unwrap();
    assert!(json.contains("\"candles\""));
    assert!(json.contains("\"orderBook\""));

    nav.navigate(Route::Portfolio);
    let json = nav.page().snapshot_json().unwrap();
    assert!(json.contains("\"holdings\""));
}
