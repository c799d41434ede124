//! Portfolio page: holdings, performance, monthly P&L and risk metrics.
//!
//! Generated once on mount. The page registers no timer.

use crate::services::generator::{generate_monthly_pnl, generate_performance};
use crate::services::snapshot::{portfolio_summary, sector_allocation, PortfolioSummary};
use crate::services::FeedRng;
use crate::types::{Holding, MonthlyPnL, PerformancePoint, RiskMetrics, SectorAllocation};
use chrono::NaiveDate;
use serde::Serialize;

/// Days of history in the performance chart.
pub const PERFORMANCE_DAYS: usize = 30;

/// Selectable performance periods.
pub const PERIODS: [&str; 6] = ["1D", "1W", "1M", "3M", "6M", "1Y"];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioState {
    pub holdings: Vec<Holding>,
    pub performance: Vec<PerformancePoint>,
    pub monthly_pnl: Vec<MonthlyPnL>,
    pub risk: RiskMetrics,
    pub period: String,
}

impl PortfolioState {
    /// Build the page with performance history ending on `today`.
    pub fn generate(today: NaiveDate, rng: &mut FeedRng) -> Self {
        Self {
            holdings: default_holdings(),
            performance: generate_performance(PERFORMANCE_DAYS, today, rng),
            monthly_pnl: generate_monthly_pnl(rng),
            risk: RiskMetrics::default(),
            period: "1M".to_string(),
        }
    }

    pub fn summary(&self) -> PortfolioSummary {
        portfolio_summary(&self.holdings)
    }

    pub fn allocation(&self) -> Vec<SectorAllocation> {
        sector_allocation(&self.holdings)
    }

    /// Cycle to the next performance period.
    pub fn next_period(&mut self) {
        let index = PERIODS
            .iter()
            .position(|p| *p == self.period)
            .map_or(0, |i| (i + 1) % PERIODS.len());
        self.period = PERIODS[index].to_string();
    }
}

pub fn default_holdings() -> Vec<Holding> {
    vec![
        Holding::new("RELIANCE", 100, 2400.0, 2456.75, "Energy"),
        Holding::new("TCS", 50, 3200.0, 3234.5, "IT"),
        Holding::new("HDFC", 150, 1500.0, 1567.25, "Banking"),
        Holding::new("INFY", 80, 1400.0, 1456.8, "IT"),
        Holding::new("ICICIBANK", 200, 950.0, 987.45, "Banking"),
        Holding::new("ITC", 300, 450.0, 456.75, "FMCG"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> PortfolioState {
        let today = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        PortfolioState::generate(today, &mut FeedRng::seeded(9))
    }

    #[test]
    fn test_summary_matches_holdings() {
        let summary = state().summary();
        // 245675 + 161725 + 235087.5 + 116544 + 197490 + 137025
        assert_eq!(summary.total_value, 1_093_546.5);
        // 5675 + 1725 + 10087.5 + 4544 + 7490 + 2025
        assert_eq!(summary.total_pnl, 31_546.5);
    }

    #[test]
    fn test_allocation_is_largest_first() {
        let allocation = state().allocation();
        assert_eq!(allocation[0].sector, "Banking");
        assert_eq!(allocation.last().unwrap().sector, "FMCG");
    }

    #[test]
    fn test_period_cycles() {
        let mut s = state();
        assert_eq!(s.period, "1M");
        s.next_period();
        assert_eq!(s.period, "3M");
        for _ in 0..PERIODS.len() {
            s.next_period();
        }
        assert_eq!(s.period, "3M");
    }

    #[test]
    fn test_history_lengths() {
        let s = state();
        assert_eq!(s.performance.len(), PERFORMANCE_DAYS);
        assert_eq!(s.performance.last().unwrap().date, "2024-06-30");
        assert_eq!(s.monthly_pnl.len(), 12);
    }
}
