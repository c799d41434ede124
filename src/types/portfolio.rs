use serde::{Deserialize, Serialize};

/// A position held in the portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub symbol: String,
    pub quantity: u32,
    pub avg_price: f64,
    pub current_price: f64,
    pub sector: String,
}

impl Holding {
    /// Create a new holding.
    pub fn new(symbol: &str, quantity: u32, avg_price: f64, current_price: f64, sector: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            quantity,
            avg_price,
            current_price,
            sector: sector.to_string(),
        }
    }

    /// Market value at the current price.
    pub fn market_value(&self) -> f64 {
        self.quantity as f64 * self.current_price
    }

    /// Unrealized P&L against the average entry price.
    pub fn pnl(&self) -> f64 {
        self.quantity as f64 * (self.current_price - self.avg_price)
    }

    /// Unrealized P&L as a percentage of the average entry price.
    pub fn pnl_pct(&self) -> f64 {
        if self.avg_price > 0.0 {
            (self.current_price - self.avg_price) / self.avg_price * 100.0
        } else {
            0.0
        }
    }
}

/// Daily portfolio value against a benchmark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformancePoint {
    /// ISO date (YYYY-MM-DD)
    pub date: String,
    pub portfolio_value: f64,
    pub benchmark: f64,
    #[serde(rename = "dayPnL")]
    pub day_pnl: f64,
}

/// Monthly P&L breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPnL {
    pub month: String,
    pub realized: f64,
    pub unrealized: f64,
    pub dividends: f64,
}

/// Portfolio risk summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskMetrics {
    pub beta: f64,
    pub sharpe_ratio: f64,
    /// Percentage (negative)
    pub max_drawdown: f64,
    /// Annualized volatility percentage
    pub volatility: f64,
    /// 95% one-day value at risk
    pub var95: f64,
    pub expected_shortfall: f64,
}

impl Default for RiskMetrics {
    fn default() -> Self {
        Self {
            beta: 1.15,
            sharpe_ratio: 1.42,
            max_drawdown: -8.5,
            volatility: 18.2,
            var95: -15_000.0,
            expected_shortfall: -22_000.0,
        }
    }
}

/// Share of portfolio value held in one sector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorAllocation {
    pub sector: String,
    /// Percentage of total market value
    pub value: f64,
}
