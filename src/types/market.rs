use serde::{Deserialize, Serialize};
use std::fmt;

/// One tile of the market heatmap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapEntry {
    pub symbol: String,
    /// Percentage change on the day
    pub change: f64,
    pub volume: u64,
    pub sector: String,
    pub price: f64,
}

impl HeatmapEntry {
    /// Create a new heatmap entry.
    pub fn new(symbol: &str, change: f64, volume: u64, sector: &str, price: f64) -> Self {
        Self {
            symbol: symbol.to_string(),
            change,
            volume,
            sector: sector.to_string(),
            price,
        }
    }

    /// Colour bucket for the tile.
    pub fn heat(&self) -> Heat {
        Heat::classify(self.change)
    }
}

/// Heatmap colour bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Heat {
    StrongGain,
    Gain,
    Loss,
    StrongLoss,
}

impl Heat {
    /// Get the bucket for a percentage change.
    pub fn classify(change: f64) -> Self {
        if change > 2.0 {
            Heat::StrongGain
        } else if change > 0.0 {
            Heat::Gain
        } else if change > -2.0 {
            Heat::Loss
        } else {
            Heat::StrongLoss
        }
    }
}

/// Sector performance row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorPerformance {
    pub sector: String,
    pub performance: f64,
    pub stocks: u32,
}

/// Advance/decline counts at a point in the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreadthPoint {
    pub time: String,
    pub advances: u32,
    pub declines: u32,
    pub unchanged: u32,
}

impl BreadthPoint {
    /// Advances divided by declines.
    pub fn advance_decline_ratio(&self) -> Option<f64> {
        if self.declines == 0 {
            None
        } else {
            Some(self.advances as f64 / self.declines as f64)
        }
    }
}

/// Watchlist row on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistEntry {
    pub symbol: String,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub volume: String,
}

/// Run state of an automated strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyStatus {
    Running,
    Paused,
    Stopped,
}

impl StrategyStatus {
    /// Status after the user toggles the strategy.
    pub fn toggled(self) -> Self {
        match self {
            StrategyStatus::Running => StrategyStatus::Paused,
            StrategyStatus::Paused | StrategyStatus::Stopped => StrategyStatus::Running,
        }
    }
}

impl fmt::Display for StrategyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyStatus::Running => write!(f, "running"),
            StrategyStatus::Paused => write!(f, "paused"),
            StrategyStatus::Stopped => write!(f, "stopped"),
        }
    }
}

/// Automated strategy shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Strategy {
    pub name: String,
    pub status: StrategyStatus,
    pub pnl: f64,
    pub trades: u32,
}

/// Headline index on the market overview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexQuote {
    pub name: String,
    pub value: f64,
    pub change: f64,
    pub change_percent: f64,
}

impl IndexQuote {
    pub fn new(name: &str, value: f64, change: f64, change_percent: f64) -> Self {
        Self {
            name: name.to_string(),
            value,
            change,
            change_percent,
        }
    }
}

/// Trading account figures behind the dashboard summary cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSummary {
    pub total_equity: f64,
    pub available_margin: f64,
    #[serde(rename = "dayPnL")]
    pub day_pnl: f64,
    #[serde(rename = "dayPnLPct")]
    pub day_pnl_pct: f64,
    pub trades_today: u32,
    pub active_positions: u32,
    /// Positions needing attention
    pub positions_flagged: u32,
}

/// Coarse risk level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Gauge fill in percent.
    pub fn gauge_pct(self) -> u16 {
        match self {
            RiskLevel::Low => 15,
            RiskLevel::Medium => 50,
            RiskLevel::High => 85,
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "Low"),
            RiskLevel::Medium => write!(f, "Medium"),
            RiskLevel::High => write!(f, "High"),
        }
    }
}

/// Risk radar readings, in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskRadar {
    pub var_95: f64,
    pub max_drawdown: f64,
    pub concentration: RiskLevel,
}

impl RiskRadar {
    pub fn var_gauge_pct(&self) -> u16 {
        gauge_pct(self.var_95)
    }

    pub fn drawdown_gauge_pct(&self) -> u16 {
        gauge_pct(self.max_drawdown)
    }
}

fn gauge_pct(value: f64) -> u16 {
    (value.abs() * 10.0).round().clamp(0.0, 100.0) as u16
}

/// Order execution statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionQuality {
    pub avg_slippage_pct: f64,
    pub fill_rate_pct: f64,
    pub avg_latency_ms: f64,
    pub market_impact_pct: f64,
}
