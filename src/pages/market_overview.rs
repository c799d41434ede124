//! Market overview page: index cards, heatmap, sector performance and market
//! breadth.

use crate::feed::Reducer;
use crate::services::FeedRng;
use crate::types::{BreadthPoint, Heat, HeatmapEntry, IndexQuote, SectorPerformance};
use chrono::{Duration, NaiveDateTime};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketOverviewState {
    pub clock: NaiveDateTime,
    pub indices: Vec<IndexQuote>,
    /// Shares traded across the market today
    pub market_volume: u64,
    pub heatmap: Vec<HeatmapEntry>,
    pub sectors: Vec<SectorPerformance>,
    pub breadth: Vec<BreadthPoint>,
    pub selected_sector: Option<String>,
    #[serde(skip)]
    pub clock_step_ms: i64,
}

impl MarketOverviewState {
    pub fn new(clock: NaiveDateTime, clock_step_ms: i64) -> Self {
        Self {
            clock,
            indices: default_indices(),
            market_volume: 2_450_000_000,
            heatmap: default_heatmap(),
            sectors: default_sectors(),
            breadth: default_breadth(),
            selected_sector: None,
            clock_step_ms,
        }
    }

    /// Heatmap tiles, restricted to the selected sector if there is one.
    pub fn visible_heatmap(&self) -> Vec<&HeatmapEntry> {
        self.heatmap
            .iter()
            .filter(|e| {
                self.selected_sector
                    .as_deref()
                    .map_or(true, |sector| e.sector == sector)
            })
            .collect()
    }

    /// Select `sector`, or clear the selection if it is already selected.
    pub fn toggle_sector(&self, sector: &str) -> Self {
        let mut next = self.clone();
        next.selected_sector = match self.selected_sector.as_deref() {
            Some(current) if current == sector => None,
            _ => Some(sector.to_string()),
        };
        next
    }

    /// Cycle the selection through the heatmap's sectors, then back to none.
    pub fn next_sector(&self) -> Self {
        let sectors = self.heatmap_sectors();
        let next = match self.selected_sector.as_deref() {
            None => sectors.first().cloned(),
            Some(current) => sectors
                .iter()
                .position(|s| s == current)
                .and_then(|i| sectors.get(i + 1).cloned()),
        };
        Self {
            selected_sector: next,
            ..self.clone()
        }
    }

    /// Distinct heatmap sectors in first-seen order.
    pub fn heatmap_sectors(&self) -> Vec<String> {
        let mut sectors: Vec<String> = Vec::new();
        for entry in &self.heatmap {
            if !sectors.contains(&entry.sector) {
                sectors.push(entry.sector.clone());
            }
        }
        sectors
    }

    /// Number of tiles in each heat bucket.
    pub fn heat_counts(&self) -> [(Heat, usize); 4] {
        let count = |heat: Heat| self.heatmap.iter().filter(|e| e.heat() == heat).count();
        [
            (Heat::StrongGain, count(Heat::StrongGain)),
            (Heat::Gain, count(Heat::Gain)),
            (Heat::Loss, count(Heat::Loss)),
            (Heat::StrongLoss, count(Heat::StrongLoss)),
        ]
    }

    /// Tile size relative to the busiest symbol, in [0.5, 1.0].
    pub fn tile_weight(&self, entry: &HeatmapEntry) -> f64 {
        let max = self.heatmap.iter().map(|e| e.volume).max().unwrap_or(0);
        if max == 0 {
            return 0.5;
        }
        (entry.volume as f64 / max as f64).max(0.5)
    }

    /// Latest breadth reading.
    pub fn latest_breadth(&self) -> Option<&BreadthPoint> {
        self.breadth.last()
    }
}

impl Reducer for MarketOverviewState {
    fn tick(&self, _rng: &mut FeedRng) -> Self {
        Self {
            clock: self.clock + Duration::milliseconds(self.clock_step_ms),
            ..self.clone()
        }
    }
}

pub fn default_indices() -> Vec<IndexQuote> {
    vec![
        IndexQuote::new("NIFTY 50", 19_674.25, 234.5, 1.21),
        IndexQuote::new("SENSEX", 65_953.48, 789.23, 1.21),
    ]
}

pub fn default_heatmap() -> Vec<HeatmapEntry> {
    vec![
        HeatmapEntry::new("RELIANCE", 2.45, 1_250_000, "Energy", 2456.75),
        HeatmapEntry::new("TCS", -1.23, 890_000, "IT", 3234.5),
        HeatmapEntry::new("HDFC", 3.67, 2_100_000, "Banking", 1567.25),
        HeatmapEntry::new("INFY", -0.89, 1_450_000, "IT", 1456.8),
        HeatmapEntry::new("ICICIBANK", 1.98, 1_800_000, "Banking", 987.45),
        HeatmapEntry::new("BHARTIARTL", -2.34, 950_000, "Telecom", 876.3),
        HeatmapEntry::new("ITC", 0.45, 1_100_000, "FMCG", 456.75),
        HeatmapEntry::new("SBIN", 4.12, 2_300_000, "Banking", 567.9),
        HeatmapEntry::new("LT", -1.56, 780_000, "Infrastructure", 2345.6),
        HeatmapEntry::new("HCLTECH", 2.78, 1_200_000, "IT", 1234.45),
        HeatmapEntry::new("WIPRO", -0.67, 890_000, "IT", 567.8),
        HeatmapEntry::new("MARUTI", 1.89, 650_000, "Auto", 8765.4),
        HeatmapEntry::new("BAJFINANCE", 3.45, 1_400_000, "NBFC", 6789.25),
        HeatmapEntry::new("ASIANPAINT", -1.12, 450_000, "Paints", 3456.7),
        HeatmapEntry::new("NESTLEIND", 0.78, 320_000, "FMCG", 18765.5),
        HeatmapEntry::new("KOTAKBANK", 2.34, 1_600_000, "Banking", 1876.45),
    ]
}

pub fn default_sectors() -> Vec<SectorPerformance> {
    [
        ("Banking", 2.45, 12),
        ("IT", -0.67, 8),
        ("Energy", 1.89, 6),
        ("Auto", 0.45, 5),
        ("FMCG", 1.23, 7),
        ("Pharma", -1.45, 9),
    ]
    .into_iter()
    .map(|(sector, performance, stocks)| SectorPerformance {
        sector: sector.to_string(),
        performance,
        stocks,
    })
    .collect()
}

pub fn default_breadth() -> Vec<BreadthPoint> {
    [
        ("09:15", 1250, 890, 160),
        ("10:00", 1340, 820, 140),
        ("11:00", 1420, 750, 130),
        ("12:00", 1380, 780, 140),
        ("13:00", 1450, 720, 130),
        ("14:00", 1520, 650, 130),
        ("15:00", 1480, 680, 140),
    ]
    .into_iter()
    .map(|(time, advances, declines, unchanged)| BreadthPoint {
        time: time.to_string(),
        advances,
        declines,
        unchanged,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn state() -> MarketOverviewState {
        let clock = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(9, 15, 0)
            .unwrap();
        MarketOverviewState::new(clock, 1000)
    }

    #[test]
    fn test_sector_filter() {
        let s = state().toggle_sector("IT");
        assert_eq!(s.visible_heatmap().len(), 4);

        let cleared = s.toggle_sector("IT");
        assert_eq!(cleared.selected_sector, None);
        assert_eq!(cleared.visible_heatmap().len(), 16);
    }

    #[test]
    fn test_next_sector_wraps_to_none() {
        let mut s = state();
        let sectors = s.heatmap_sectors();
        for expected in &sectors {
            s = s.next_sector();
            assert_eq!(s.selected_sector.as_ref(), Some(expected));
        }
        assert_eq!(s.next_sector().selected_sector, None);
    }

    #[test]
    fn test_heat_counts_cover_heatmap() {
        let s = state();
        let counts = s.heat_counts();
        let total: usize = counts.iter().map(|(_, n)| n).sum();
        assert_eq!(total, s.heatmap.len());
        // SBIN, HDFC, BAJFINANCE, HCLTECH, RELIANCE, KOTAKBANK
        assert_eq!(counts[0], (Heat::StrongGain, 6));
        // BHARTIARTL
        assert_eq!(counts[3], (Heat::StrongLoss, 1));
    }

    #[test]
    fn test_tick_only_moves_clock() {
        let s = state();
        let next = s.tick(&mut FeedRng::seeded(1));
        assert_eq!((next.clock - s.clock).num_milliseconds(), 1000);
        assert_eq!(next.heatmap, s.heatmap);
        assert_eq!(next.breadth, s.breadth);
        assert_eq!(next.indices, s.indices);
    }

    #[test]
    fn test_index_cards() {
        let s = state();
        let names: Vec<&str> = s.indices.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["NIFTY 50", "SENSEX"]);
        assert_eq!(s.indices[0].value, 19_674.25);
        assert_eq!(s.market_volume, 2_450_000_000);

        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["indices"][1]["changePercent"], 1.21);
        assert_eq!(json["marketVolume"], 2_450_000_000u64);
    }
}
