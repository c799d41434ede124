use serde::{Deserialize, Serialize};

/// Kind of series the generator can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SeriesKind {
    Candles,
    Volatility,
    VolatilityClustering,
    PnL,
    OrderBook,
    OptionsChain,
}

impl SeriesKind {
    /// Get all series kinds.
    pub fn all() -> [SeriesKind; 6] {
        [
            SeriesKind::Candles,
            SeriesKind::Volatility,
            SeriesKind::VolatilityClustering,
            SeriesKind::PnL,
            SeriesKind::OrderBook,
            SeriesKind::OptionsChain,
        ]
    }

    /// Whether the tick updater appends to this series rather than mutating it in place.
    pub fn is_append_only(&self) -> bool {
        matches!(self, SeriesKind::PnL)
    }

    /// Whether the tick updater replaces the whole series each tick.
    pub fn is_regenerated(&self) -> bool {
        matches!(self, SeriesKind::OrderBook | SeriesKind::OptionsChain)
    }
}

/// Candlestick (OHLCV) data point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub time: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl Candle {
    /// Whether high and low still bracket the candle body.
    pub fn is_well_formed(&self) -> bool {
        self.high >= self.open.max(self.close) && self.low <= self.open.min(self.close)
    }

    /// Close minus open.
    pub fn body(&self) -> f64 {
        self.close - self.open
    }

    /// Whether the candle closed at or above its open.
    pub fn is_bullish(&self) -> bool {
        self.close >= self.open
    }
}

/// Volatility reading, all values in percentage points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolatilityPoint {
    pub time: String,
    pub volatility: f64,
    pub implied_vol: f64,
    pub historical_vol: f64,
}

/// Volatility clustering reading. `garch` is a label on synthetic data only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolatilityClusterPoint {
    pub time: u32,
    pub volatility: f64,
    pub garch: f64,
    pub realized: f64,
}

/// One entry of the running P&L log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PnLPoint {
    pub time: String,
    #[serde(rename = "tradePnL")]
    pub trade_pnl: f64,
    #[serde(rename = "cumulativePnL")]
    pub cumulative_pnl: f64,
    #[serde(rename = "unrealizedPnL")]
    pub unrealized_pnl: f64,
    /// Distance below the running peak of cumulative P&L (always <= 0).
    pub drawdown: f64,
}

/// Intraday `HH:MM` label for the point at `index`, starting 09:00 with
/// six minutes between points.
pub fn intraday_label(index: usize) -> String {
    let minutes = (9 * 60 + index * 6) % (24 * 60);
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Chart timeframe offered by the dashboard and charts selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "1m")]
    M1,
    #[serde(rename = "5m")]
    M5,
    #[serde(rename = "15m")]
    M15,
    #[serde(rename = "1h")]
    H1,
    #[serde(rename = "1d")]
    D1,
}

impl Timeframe {
    pub fn all() -> [Timeframe; 5] {
        [
            Timeframe::M1,
            Timeframe::M5,
            Timeframe::M15,
            Timeframe::H1,
            Timeframe::D1,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Timeframe::M1 => "1m",
            Timeframe::M5 => "5m",
            Timeframe::M15 => "15m",
            Timeframe::H1 => "1h",
            Timeframe::D1 => "1d",
        }
    }

    /// Following timeframe, wrapping from `1d` back to `1m`.
    pub fn next(&self) -> Timeframe {
        let all = Self::all();
        let index = all.iter().position(|t| t == self).unwrap_or(0);
        all[(index + 1) % all.len()]
    }
}

/// Intraday portfolio value and traded volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntradayPoint {
    pub time: String,
    pub value: f64,
    pub volume: u64,
}

/// Traded volume at one price level. `poc` marks the point of control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeProfileLevel {
    pub price: f64,
    pub volume: u64,
    pub poc: bool,
}

/// Aggressive buy and sell volume over one interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderFlowPoint {
    pub time: String,
    pub buy_volume: u64,
    pub sell_volume: u64,
    /// Buy minus sell volume.
    pub delta: i64,
}
