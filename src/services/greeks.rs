//! Black-Scholes Greeks for the options Greeks view.
//!
//! Each strike is evaluated at its own implied volatility from the chain,
//! so the profile moves with the synthetic quotes.

use super::round_to;
use crate::types::{GreeksPoint, OptionContract, OptionType};
use std::f64::consts::{E, PI};

/// Greeks calculator with a fixed rate and time to expiry.
#[derive(Debug, Clone)]
pub struct GreeksCalculator {
    /// Risk-free interest rate (annual, as decimal)
    risk_free_rate: f64,
    /// Time to expiry in years
    time_years: f64,
}

impl GreeksCalculator {
    /// Create a calculator for the given rate and days to expiry.
    pub fn new(risk_free_rate: f64, days_to_expiry: f64) -> Self {
        Self {
            risk_free_rate,
            time_years: (days_to_expiry / 365.0).max(1.0 / 365.0),
        }
    }

    pub fn risk_free_rate(&self) -> f64 {
        self.risk_free_rate
    }

    fn d1(&self, spot: f64, strike: f64, volatility: f64) -> f64 {
        let r = self.risk_free_rate;
        let t = self.time_years;
        (f64::ln(spot / strike) + (r + volatility.powi(2) / 2.0) * t) / (volatility * t.sqrt())
    }

    /// Delta of one side. Calls in [0, 1], puts in [-1, 0].
    pub fn delta(&self, spot: f64, strike: f64, volatility: f64, option_type: OptionType) -> f64 {
        let d1 = self.d1(spot, strike, volatility);
        match option_type {
            OptionType::Call => norm_cdf(d1),
            OptionType::Put => norm_cdf(d1) - 1.0,
        }
    }

    /// Gamma (same for calls and puts).
    pub fn gamma(&self, spot: f64, strike: f64, volatility: f64) -> f64 {
        let d1 = self.d1(spot, strike, volatility);
        norm_pdf(d1) / (spot * volatility * self.time_years.sqrt())
    }

    /// Call theta per calendar day.
    pub fn theta(&self, spot: f64, strike: f64, volatility: f64) -> f64 {
        let t = self.time_years;
        let r = self.risk_free_rate;
        let d1 = self.d1(spot, strike, volatility);
        let d2 = d1 - volatility * t.sqrt();
        let decay = -(spot * norm_pdf(d1) * volatility) / (2.0 * t.sqrt());
        let carry = r * strike * E.powf(-r * t) * norm_cdf(d2);
        (decay - carry) / 365.0
    }

    /// Vega for a 1 point change in volatility.
    pub fn vega(&self, spot: f64, strike: f64, volatility: f64) -> f64 {
        let d1 = self.d1(spot, strike, volatility);
        spot * self.time_years.sqrt() * norm_pdf(d1) / 100.0
    }

    /// Greeks profile across the chain. Strikes with no usable volatility are skipped.
    pub fn profile(&self, spot: f64, chain: &[OptionContract]) -> Vec<GreeksPoint> {
        if spot <= 0.0 {
            return Vec::new();
        }

        chain
            .iter()
            .filter(|row| row.strike > 0.0)
            .filter_map(|row| {
                let call_vol = row.call.iv / 100.0;
                let put_vol = row.put.iv / 100.0;
                if call_vol <= 0.0 || put_vol <= 0.0 {
                    return None;
                }

                Some(GreeksPoint {
                    strike: row.strike,
                    call_delta: round_to(self.delta(spot, row.strike, call_vol, OptionType::Call), 4),
                    put_delta: round_to(self.delta(spot, row.strike, put_vol, OptionType::Put), 4),
                    gamma: round_to(self.gamma(spot, row.strike, call_vol), 6),
                    theta: round_to(self.theta(spot, row.strike, call_vol), 2),
                    vega: round_to(self.vega(spot, row.strike, call_vol), 2),
                })
            })
            .collect()
    }
}

impl Default for GreeksCalculator {
    fn default() -> Self {
        // 6.5% rate, monthly expiry
        Self::new(0.065, 30.0)
    }
}

/// Standard normal cumulative distribution function.
fn norm_cdf(x: f64) -> f64 {
    0.5 * (1.0 + erf(x / 2.0_f64.sqrt()))
}

/// Standard normal probability density function.
fn norm_pdf(x: f64) -> f64 {
    E.powf(-x.powi(2) / 2.0) / (2.0 * PI).sqrt()
}

fn erf(x: f64) -> f64 {
    // Abramowitz-Stegun 7.1.26
    let a1 = 0.254829592;
    let a2 = -0.284496736;
    let a3 = 1.421413741;
    let a4 = -1.453152027;
    let a5 = 1.061405429;
    let p = 0.3275911;

    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();

    let t = 1.0 / (1.0 + p * x);
    let y = 1.0 - (((((a5 * t + a4) * t) + a3) * t + a2) * t + a1) * t * E.powf(-x * x);

    sign * y
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::generator::generate_options_chain;
    use crate::services::FeedRng;

    #[test]
    fn test_atm_call_delta_near_half() {
        let calc = GreeksCalculator::default();
        let delta = calc.delta(19_650.0, 19_650.0, 0.15, OptionType::Call);
        assert!((delta - 0.5).abs() < 0.05);
    }

    #[test]
    fn test_put_call_delta_parity() {
        let calc = GreeksCalculator::default();
        let call = calc.delta(19_650.0, 19_800.0, 0.2, OptionType::Call);
        let put = calc.delta(19_650.0, 19_800.0, 0.2, OptionType::Put);
        assert!((call - put - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_gamma_peaks_at_the_money() {
        let calc = GreeksCalculator::default();
        let atm = calc.gamma(19_650.0, 19_650.0, 0.15);
        let otm = calc.gamma(19_650.0, 20_650.0, 0.15);
        assert!(atm > otm);
    }

    #[test]
    fn test_theta_is_negative() {
        let calc = GreeksCalculator::default();
        assert!(calc.theta(19_650.0, 19_650.0, 0.15) < 0.0);
    }

    #[test]
    fn test_profile_covers_chain() {
        let mut rng = FeedRng::seeded(6);
        let chain = generate_options_chain(19_650.0, 50.0, 10, &mut rng);
        let profile = GreeksCalculator::default().profile(19_650.0, &chain);

        assert_eq!(profile.len(), chain.len());
        for point in &profile {
            assert!((0.0..=1.0).contains(&point.call_delta));
            assert!((-1.0..=0.0).contains(&point.put_delta));
            assert!(point.gamma >= 0.0);
        }
        // deltas fall as strikes rise
        assert!(profile.first().unwrap().call_delta > profile.last().unwrap().call_delta);
    }
}
