//! Append-only P&L log with running peak and drawdown.

use super::{round2, SeriesWindow};
use crate::types::{intraday_label, PnLPoint};
use serde::{Serialize, Serializer};

/// Running P&L log.
///
/// The peak of cumulative P&L is carried across window trims, so drawdown
/// stays measured against the true running maximum after old points are
/// dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct PnLLog {
    points: SeriesWindow<PnLPoint>,
    peak: Option<f64>,
    next_index: usize,
}

impl PnLLog {
    /// Create an empty log keeping at most `capacity` points.
    pub fn new(capacity: usize) -> Self {
        Self {
            points: SeriesWindow::new(capacity),
            peak: None,
            next_index: 0,
        }
    }

    /// Append a trade. Returns the recorded point.
    pub fn record(&mut self, trade_pnl: f64, unrealized_pnl: f64) -> PnLPoint {
        let trade_pnl = round2(trade_pnl);
        let previous = self.cumulative();
        let cumulative_pnl = round2(previous + trade_pnl);
        let peak = self.peak.map_or(cumulative_pnl, |p| p.max(cumulative_pnl));
        self.peak = Some(peak);

        let point = PnLPoint {
            time: intraday_label(self.next_index),
            trade_pnl,
            cumulative_pnl,
            unrealized_pnl: round2(unrealized_pnl),
            drawdown: round2(cumulative_pnl - peak),
        };
        self.next_index += 1;
        self.points.push(point.clone());
        point
    }

    /// Latest cumulative P&L, zero before the first trade.
    pub fn cumulative(&self) -> f64 {
        self.points.last().map(|p| p.cumulative_pnl).unwrap_or(0.0)
    }

    /// Highest cumulative P&L seen so far.
    pub fn peak(&self) -> Option<f64> {
        self.peak
    }

    /// Number of trades recorded over the log's lifetime.
    pub fn trades_recorded(&self) -> usize {
        self.next_index
    }

    pub fn points(&self) -> &SeriesWindow<PnLPoint> {
        &self.points
    }

    pub fn last(&self) -> Option<&PnLPoint> {
        self.points.last()
    }

    pub fn to_vec(&self) -> Vec<PnLPoint> {
        self.points.to_vec()
    }
}

impl Serialize for PnLLog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.points.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_accumulates() {
        let mut log = PnLLog::new(10);
        log.record(100.0, 0.0);
        log.record(-40.5, 0.0);
        log.record(10.25, 0.0);

        let points = log.to_vec();
        assert_eq!(points[0].cumulative_pnl, 100.0);
        assert_eq!(points[1].cumulative_pnl, 59.5);
        assert_eq!(points[2].cumulative_pnl, 69.75);
    }

    #[test]
    fn test_drawdown_tracks_peak() {
        let mut log = PnLLog::new(10);
        log.record(100.0, 0.0);
        log.record(-30.0, 0.0);
        log.record(50.0, 0.0);

        let points = log.to_vec();
        assert_eq!(points[0].drawdown, 0.0);
        assert_eq!(points[1].drawdown, -30.0);
        assert_eq!(points[2].drawdown, 0.0);
        assert_eq!(log.peak(), Some(120.0));
    }

    #[test]
    fn test_first_loss_has_zero_drawdown() {
        let mut log = PnLLog::new(10);
        log.record(-25.0, 0.0);
        assert_eq!(log.last().unwrap().drawdown, 0.0);

        log.record(-25.0, 0.0);
        assert_eq!(log.last().unwrap().drawdown, -25.0);
    }

    #[test]
    fn test_peak_survives_trim() {
        let mut log = PnLLog::new(2);
        log.record(500.0, 0.0);
        log.record(-100.0, 0.0);
        log.record(-100.0, 0.0);

        assert_eq!(log.points().len(), 2);
        assert_eq!(log.last().unwrap().drawdown, -200.0);
        assert_eq!(log.trades_recorded(), 3);
        assert_eq!(log.last().unwrap().time, "09:12");
    }
}
