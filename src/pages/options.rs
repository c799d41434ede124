//! Options page: chain, Greeks and volatility smile around a drifting spot.

use crate::config::MarketConfig;
use crate::feed::Reducer;
use crate::services::generator::{generate_options_chain, generate_vol_smile};
use crate::services::snapshot::{atm_strike, put_call_ratio, total_call_oi, total_put_oi};
use crate::services::updater::tick_spot;
use crate::services::{FeedRng, GreeksCalculator};
use crate::types::{GreeksPoint, OptionContract, VolSmilePoint};
use serde::Serialize;

/// Underlyings offered by the symbol selector.
pub const OPTION_SYMBOLS: [&str; 5] = ["NIFTY", "BANKNIFTY", "RELIANCE", "TCS", "HDFC"];

/// Expiries offered by the expiry selector, with days remaining.
pub const EXPIRIES: [(&str, f64); 4] = [
    ("28-DEC-2023", 7.0),
    ("04-JAN-2024", 14.0),
    ("11-JAN-2024", 21.0),
    ("25-JAN-2024", 35.0),
];

/// Which panel of the options page is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionsView {
    Chain,
    Greeks,
    Volatility,
}

impl OptionsView {
    pub fn next(self) -> Self {
        match self {
            OptionsView::Chain => OptionsView::Greeks,
            OptionsView::Greeks => OptionsView::Volatility,
            OptionsView::Volatility => OptionsView::Chain,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            OptionsView::Chain => "Chain",
            OptionsView::Greeks => "Greeks",
            OptionsView::Volatility => "Volatility",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionsState {
    pub symbol: String,
    pub expiry: usize,
    pub view: OptionsView,
    pub spot: f64,
    pub chain: Vec<OptionContract>,
    pub greeks: Vec<GreeksPoint>,
    pub smile: Vec<VolSmilePoint>,
    #[serde(skip)]
    strike_step: f64,
    #[serde(skip)]
    strikes_per_side: usize,
    #[serde(skip)]
    risk_free_rate: f64,
}

impl OptionsState {
    /// Chain around the configured spot, nearest expiry selected.
    pub fn generate(market: &MarketConfig, rng: &mut FeedRng) -> Self {
        let mut state = Self {
            symbol: OPTION_SYMBOLS[0].to_string(),
            expiry: 0,
            view: OptionsView::Chain,
            spot: market.spot,
            chain: Vec::new(),
            greeks: Vec::new(),
            smile: Vec::new(),
            strike_step: market.strike_step,
            strikes_per_side: market.strikes_per_side,
            risk_free_rate: GreeksCalculator::default().risk_free_rate(),
        };
        state.rebuild(rng);
        state
    }

    /// Regenerate chain, Greeks and smile around the current spot.
    fn rebuild(&mut self, rng: &mut FeedRng) {
        self.chain = generate_options_chain(self.spot, self.strike_step, self.strikes_per_side, rng);
        self.greeks = self.calculator().profile(self.spot, &self.chain);
        let strikes: Vec<f64> = self.chain.iter().map(|row| row.strike).collect();
        self.smile = generate_vol_smile(self.spot, &strikes, rng);
    }

    fn calculator(&self) -> GreeksCalculator {
        GreeksCalculator::new(self.risk_free_rate, self.days_to_expiry())
    }

    pub fn expiry_label(&self) -> &'static str {
        EXPIRIES[self.expiry % EXPIRIES.len()].0
    }

    pub fn days_to_expiry(&self) -> f64 {
        EXPIRIES[self.expiry % EXPIRIES.len()].1
    }

    /// Same state with the next expiry selected. The chain is rebuilt
    /// immediately rather than on the next tick.
    pub fn next_expiry(&self, rng: &mut FeedRng) -> Self {
        let mut next = self.clone();
        next.expiry = (self.expiry + 1) % EXPIRIES.len();
        next.rebuild(rng);
        next
    }

    pub fn next_view(&self) -> Self {
        Self {
            view: self.view.next(),
            ..self.clone()
        }
    }

    pub fn next_symbol(&self) -> Self {
        let index = OPTION_SYMBOLS
            .iter()
            .position(|s| *s == self.symbol)
            .map_or(0, |i| (i + 1) % OPTION_SYMBOLS.len());
        Self {
            symbol: OPTION_SYMBOLS[index].to_string(),
            ..self.clone()
        }
    }

    pub fn atm_strike(&self) -> Option<f64> {
        atm_strike(&self.chain, self.spot)
    }

    pub fn put_call_ratio(&self) -> Option<f64> {
        put_call_ratio(&self.chain)
    }

    pub fn total_call_oi(&self) -> u64 {
        total_call_oi(&self.chain)
    }

    pub fn total_put_oi(&self) -> u64 {
        total_put_oi(&self.chain)
    }
}

impl Reducer for OptionsState {
    fn tick(&self, rng: &mut FeedRng) -> Self {
        let mut next = self.clone();
        next.spot = tick_spot(self.spot, rng);
        next.rebuild(rng);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> OptionsState {
        OptionsState::generate(&MarketConfig::default(), &mut FeedRng::seeded(7))
    }

    #[test]
    fn test_generate_centers_on_spot() {
        let s = state();
        assert_eq!(s.chain.len(), 21);
        assert_eq!(s.greeks.len(), 21);
        assert_eq!(s.smile.len(), 21);
        assert_eq!(s.atm_strike(), Some(19_650.0));
        assert!(s.put_call_ratio().is_some());
    }

    #[test]
    fn test_tick_moves_spot_and_rebuilds() {
        let s = state();
        let next = s.tick(&mut FeedRng::seeded(8));

        assert!((next.spot - s.spot).abs() <= 5.0);
        assert_ne!(next.chain, s.chain);
        let base = (next.spot / 50.0).floor() * 50.0;
        assert_eq!(next.chain[10].strike, base);
    }

    #[test]
    fn test_next_expiry_keeps_spot() {
        let mut rng = FeedRng::seeded(9);
        let s = state();
        let next = s.next_expiry(&mut rng);

        assert_eq!(next.expiry_label(), "04-JAN-2024");
        assert_eq!(next.days_to_expiry(), 14.0);
        assert_eq!(next.spot, s.spot);
    }

    #[test]
    fn test_view_cycle() {
        let s = state();
        assert_eq!(s.view, OptionsView::Chain);
        assert_eq!(s.next_view().next_view().next_view().view, OptionsView::Chain);
    }
}
