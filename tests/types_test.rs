//! Unit tests for types module

use tickboard::types::*;

#[test]
fn test_candle_serializes_plain_fields() {
    let candle = Candle {
        time: "09:00".to_string(),
        open: 100.0,
        high: 110.0,
        low: 95.0,
        close: 105.0,
        volume: 1_000,
    };

    let json = serde_json::to_value(&candle).unwrap();
    assert_eq!(json["time"], "09:00");
    assert_eq!(json["close"], 105.0);
    assert!(candle.is_well_formed());
    assert!(candle.is_bullish());
}

#[test]
fn test_pnl_point_field_names() {
    let point = PnLPoint {
        time: "09:06".to_string(),
        trade_pnl: -50.0,
        cumulative_pnl: 150.0,
        unrealized_pnl: 20.0,
        drawdown: -50.0,
    };

    let json = serde_json::to_string(&point).unwrap();
    assert!(json.contains("\"tradePnL\""));
    assert!(json.contains("\"cumulativePnL\""));
    assert!(json.contains("\"unrealizedPnL\""));
    assert!(json.contains("\"drawdown\""));
}

#[test]
fn test_volatility_point_camel_case() {
    let point = VolatilityPoint {
        time: "09:00".to_string(),
        volatility: 15.0,
        implied_vol: 16.0,
        historical_vol: 14.5,
    };

    let json = serde_json::to_value(&point).unwrap();
    assert_eq!(json["impliedVol"], 16.0);
    assert_eq!(json["historicalVol"], 14.5);
}

#[test]
fn test_greeks_point_camel_case() {
    let point = GreeksPoint {
        strike: 19_650.0,
        call_delta: 0.5,
        put_delta: -0.5,
        gamma: 0.0002,
        theta: -4.2,
        vega: 10.1,
    };

    let json = serde_json::to_value(&point).unwrap();
    assert_eq!(json["callDelta"], 0.5);
    assert_eq!(json["putDelta"], -0.5);
}

#[test]
fn test_order_book_accessors() {
    let book = OrderBookSnapshot {
        base_price: 100.0,
        bids: vec![
            OrderBookLevel { price: 99.75, quantity: 10, orders: 1 },
            OrderBookLevel { price: 99.5, quantity: 20, orders: 2 },
        ],
        asks: vec![
            OrderBookLevel { price: 100.25, quantity: 5, orders: 1 },
            OrderBookLevel { price: 100.5, quantity: 15, orders: 3 },
        ],
    };

    assert_eq!(book.best_bid().map(|l| l.price), Some(99.75));
    assert_eq!(book.best_ask().map(|l| l.price), Some(100.25));
    assert_eq!(book.bid_total(), 30);
    assert_eq!(book.ask_total(), 20);
    assert!(book.is_uncrossed());

    let json = serde_json::to_value(&book).unwrap();
    assert_eq!(json["basePrice"], 100.0);
}

#[test]
fn test_empty_order_book() {
    let book = OrderBookSnapshot::empty(100.0);
    assert!(book.best_bid().is_none());
    assert!(book.best_ask().is_none());
    assert!(book.is_uncrossed());
}

#[test]
fn test_heat_classify() {
    assert_eq!(Heat::classify(3.5), Heat::StrongGain);
    assert_eq!(Heat::classify(2.0), Heat::Gain);
    assert_eq!(Heat::classify(0.1), Heat::Gain);
    assert_eq!(Heat::classify(0.0), Heat::Loss);
    assert_eq!(Heat::classify(-2.0), Heat::StrongLoss);
    assert_eq!(Heat::classify(-5.0), Heat::StrongLoss);
}

#[test]
fn test_strategy_status_toggled() {
    assert_eq!(StrategyStatus::Running.toggled(), StrategyStatus::Paused);
    assert_eq!(StrategyStatus::Paused.toggled(), StrategyStatus::Running);
    assert_eq!(StrategyStatus::Stopped.toggled(), StrategyStatus::Running);
    assert_eq!(StrategyStatus::Running.to_string(), "running");

    let json = serde_json::to_string(&StrategyStatus::Paused).unwrap();
    assert_eq!(json, "\"paused\"");
}

#[test]
fn test_option_contract_itm() {
    let quote = OptionQuote {
        bid: 1.0,
        ask: 2.0,
        ltp: 1.5,
        change: 0.0,
        volume: 0,
        oi: 100,
        iv: 15.0,
    };
    let contract = OptionContract {
        strike: 19_600.0,
        call: quote.clone(),
        put: quote,
    };

    assert!(contract.is_itm(OptionType::Call, 19_650.0));
    assert!(!contract.is_itm(OptionType::Put, 19_650.0));
}

#[test]
fn test_holding_pnl() {
    let holding = Holding::new("TCS", 10, 100.0, 110.0, "IT");

    assert_eq!(holding.market_value(), 1_100.0);
    assert_eq!(holding.pnl(), 100.0);
    assert!((holding.pnl_pct() - 10.0).abs() < 1e-9);
}

#[test]
fn test_intraday_labels() {
    assert_eq!(intraday_label(0), "09:00");
    assert_eq!(intraday_label(1), "09:06");
    assert_eq!(intraday_label(10), "10:00");
}

#[test]
fn test_series_kind_slugs() {
    let json = serde_json::to_string(&SeriesKind::VolatilityClustering).unwrap();
    assert_eq!(json, "\"volatility-clustering\"");
    assert!(SeriesKind::PnL.is_append_only());
    assert!(!SeriesKind::Candles.is_append_only());
    assert!(SeriesKind::OrderBook.is_regenerated());
}

#[test]
fn test_timeframe_cycle() {
    assert_eq!(Timeframe::M5.next(), Timeframe::M15);
    assert_eq!(Timeframe::D1.next(), Timeframe::M1);
    assert_eq!(Timeframe::H1.label(), "1h");
    assert_eq!(serde_json::to_string(&Timeframe::M15).unwrap(), "\"15m\"");
}

#[test]
fn test_risk_radar_gauges() {
    let radar = RiskRadar {
        var_95: 4.2,
        max_drawdown: -2.1,
        concentration: RiskLevel::Low,
    };

    assert_eq!(radar.var_gauge_pct(), 42);
    assert_eq!(radar.drawdown_gauge_pct(), 21);
    assert_eq!(radar.concentration.gauge_pct(), 15);
    assert_eq!(RiskLevel::High.to_string(), "High");

    let json = serde_json::to_value(&radar).unwrap();
    assert_eq!(json["var95"], 4.2);
    assert_eq!(json["concentration"], "low");
}

#[test]
fn test_order_flow_point_camel_case() {
    let point = OrderFlowPoint {
        time: "14:03".to_string(),
        buy_volume: 50_000,
        sell_volume: 60_000,
        delta: -10_000,
    };

    let json = serde_json::to_value(&point).unwrap();
    assert_eq!(json["buyVolume"], 50_000);
    assert_eq!(json["sellVolume"], 60_000);
    assert_eq!(json["delta"], -10_000);
}
