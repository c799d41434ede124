pub mod generator;
pub mod greeks;
pub mod pnl;
pub mod rng;
pub mod snapshot;
pub mod updater;
pub mod window;

pub use generator::{Series, SeriesGenerator};
pub use greeks::GreeksCalculator;
pub use pnl::PnLLog;
pub use rng::FeedRng;
pub use window::SeriesWindow;

/// Round to 2 decimal places, the precision every stored field is kept at.
pub fn round2(value: f64) -> f64 {
    round_to(value, 2)
}

/// Round to `decimals` decimal places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(1.005_1), 1.01);
        assert_eq!(round2(-3.14159), -3.14);
        assert_eq!(round2(19_500.0), 19_500.0);
    }

    #[test]
    fn test_round2_is_idempotent() {
        for v in [0.1, 12.345, -99.999, 19_650.27] {
            let once = round2(v);
            assert_eq!(round2(once), once);
        }
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(0.99237, 3), 0.992);
    }
}
