use crate::error::{AppError, Result};
use std::env;
use std::time::Duration;

/// Parameters of the simulated market.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketConfig {
    /// Opening price of the candle series.
    pub base_price: f64,
    /// Initial underlying spot for the options chain.
    pub spot: f64,
    /// Number of levels per side in the order book.
    pub book_depth: usize,
    /// Price spacing between order book levels.
    pub book_tick: f64,
    /// Spacing between option strikes.
    pub strike_step: f64,
    /// Strikes generated on each side of the base strike.
    pub strikes_per_side: usize,
    /// Capital the return percentage is measured against.
    pub initial_capital: f64,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            base_price: 19_500.0,
            spot: 19_650.0,
            book_depth: 10,
            book_tick: 0.25,
            strike_step: 50.0,
            strikes_per_side: 10,
            initial_capital: 100_000.0,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Tick period of the dashboard, market overview and charts pages (ms).
    pub tick_ms: u64,
    /// Tick period of the options page (ms).
    pub options_tick_ms: u64,
    /// Seed for the random source. `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Points generated per series and kept in each window.
    pub series_len: usize,
    /// Trailing points shown by chart views.
    pub chart_window: usize,
    /// Simulated market parameters.
    pub market: MarketConfig,
    /// Default tracing filter when RUST_LOG is unset.
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_ms: 1000,
            options_tick_ms: 2000,
            seed: None,
            series_len: 100,
            chart_window: 50,
            market: MarketConfig::default(),
            log_filter: "tickboard=info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let market = defaults.market.clone();

        Self {
            tick_ms: env::var("TICKBOARD_TICK_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.tick_ms),
            options_tick_ms: env::var("TICKBOARD_OPTIONS_TICK_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.options_tick_ms),
            seed: env::var("TICKBOARD_SEED").ok().and_then(|v| v.parse().ok()),
            series_len: env::var("TICKBOARD_SERIES_LEN")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.series_len),
            chart_window: env::var("TICKBOARD_CHART_WINDOW")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.chart_window),
            market: MarketConfig {
                base_price: env::var("TICKBOARD_BASE_PRICE")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(market.base_price),
                spot: env::var("TICKBOARD_SPOT")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(market.spot),
                book_depth: env::var("TICKBOARD_BOOK_DEPTH")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(market.book_depth),
                book_tick: env::var("TICKBOARD_BOOK_TICK")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(market.book_tick),
                strike_step: env::var("TICKBOARD_STRIKE_STEP")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(market.strike_step),
                strikes_per_side: env::var("TICKBOARD_STRIKES_PER_SIDE")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(market.strikes_per_side),
                initial_capital: env::var("TICKBOARD_INITIAL_CAPITAL")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(market.initial_capital),
            },
            log_filter: env::var("TICKBOARD_LOG").unwrap_or(defaults.log_filter),
        }
    }

    /// Reject values the feed cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.tick_ms == 0 || self.options_tick_ms == 0 {
            return Err(AppError::Config("tick periods must be greater than zero".to_string()));
        }
        if self.series_len == 0 {
            return Err(AppError::Config("series length must be at least 1".to_string()));
        }
        if self.chart_window == 0 {
            return Err(AppError::Config("chart window must be at least 1".to_string()));
        }
        let market = &self.market;
        let prices = [
            ("base price", market.base_price),
            ("spot", market.spot),
            ("book tick", market.book_tick),
            ("strike step", market.strike_step),
            ("initial capital", market.initial_capital),
        ];
        if let Some((name, value)) = prices.iter().find(|(_, v)| !v.is_finite()) {
            return Err(AppError::Config(format!("{} must be finite, got {}", name, value)));
        }
        if market.base_price <= 0.0 || market.spot <= 0.0 {
            return Err(AppError::Config("prices must be positive".to_string()));
        }
        if market.book_tick < 0.01 {
            return Err(AppError::Config(format!(
                "book tick must be at least 0.01, got {}",
                market.book_tick
            )));
        }
        // the deepest bid sits (depth + 1) ticks under the base in the worst case
        if market.book_tick * (market.book_depth as f64 + 1.0) >= market.base_price {
            return Err(AppError::Config(format!(
                "book of {} levels at tick {} does not fit under base price {}",
                market.book_depth, market.book_tick, market.base_price
            )));
        }
        if market.strike_step <= 0.0 {
            return Err(AppError::Config(format!(
                "strike step must be positive, got {}",
                market.strike_step
            )));
        }
        // the lowest strike sits (strikes + 1) steps under spot in the worst case
        if market.strike_step * (market.strikes_per_side as f64 + 1.0) >= market.spot {
            return Err(AppError::Config(format!(
                "{} strikes at step {} do not fit under spot {}",
                market.strikes_per_side, market.strike_step, market.spot
            )));
        }
        Ok(())
    }

    /// Tick period of the 1 second pages.
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    /// Tick period of the options page.
    pub fn options_tick_period(&self) -> Duration {
        Duration::from_millis(self.options_tick_ms)
    }
}
