//! Pages and navigation.
//!
//! Each route owns an explicit state struct. Navigating unmounts the current
//! page (cancelling its timers) before the next one is mounted and seeded
//! fresh, so only the active page's timers are ever alive and no state
//! survives a remount.

pub mod charts;
pub mod dashboard;
pub mod market_overview;
pub mod options;
pub mod portfolio;

pub use charts::ChartsState;
pub use dashboard::DashboardState;
pub use market_overview::MarketOverviewState;
pub use options::{OptionsState, OptionsView};
pub use portfolio::PortfolioState;

use crate::config::Config;
use crate::feed::LiveFeed;
use crate::scheduler::Scheduler;
use crate::services::FeedRng;
use chrono::Local;
use std::time::Duration;
use tracing::info;

/// Route/View enum for navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Dashboard,
    MarketOverview,
    Charts,
    Portfolio,
    Options,
}

impl Route {
    /// Get all available routes.
    pub fn all() -> [Self; 5] {
        [
            Self::Dashboard,
            Self::MarketOverview,
            Self::Charts,
            Self::Portfolio,
            Self::Options,
        ]
    }

    /// Get the route name.
    pub fn name(&self) -> &str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::MarketOverview => "Market Overview",
            Self::Charts => "Charts",
            Self::Portfolio => "Portfolio",
            Self::Options => "Options",
        }
    }

    /// Get the route path segment.
    pub fn slug(&self) -> &str {
        match self {
            Self::Dashboard => "dashboard",
            Self::MarketOverview => "market-overview",
            Self::Charts => "charts",
            Self::Portfolio => "portfolio",
            Self::Options => "options",
        }
    }

    /// Get the route shortcut key.
    pub fn key(&self) -> char {
        match self {
            Self::Dashboard => '1',
            Self::MarketOverview => '2',
            Self::Charts => '3',
            Self::Portfolio => '4',
            Self::Options => '5',
        }
    }

    /// Route bound to a shortcut key.
    pub fn from_key(key: char) -> Option<Self> {
        Self::all().into_iter().find(|r| r.key() == key)
    }

    /// Tick period of the page, `None` for pages without a timer.
    pub fn period(&self, config: &Config) -> Option<Duration> {
        match self {
            Self::Dashboard | Self::MarketOverview | Self::Charts => Some(config.tick_period()),
            Self::Options => Some(config.options_tick_period()),
            Self::Portfolio => None,
        }
    }
}

/// A mounted page with its state.
#[derive(Debug)]
pub enum Page {
    Dashboard(LiveFeed<DashboardState>),
    MarketOverview(LiveFeed<MarketOverviewState>),
    Charts(LiveFeed<ChartsState>),
    Portfolio(PortfolioState),
    Options(LiveFeed<OptionsState>),
}

impl Page {
    /// Seed `route`'s state and start its timer.
    pub fn mount(route: Route, scheduler: &Scheduler, config: &Config, rng: &mut FeedRng) -> Self {
        let now = Local::now().naive_local();
        let step_ms = config.tick_ms as i64;
        let mut page_rng = rng.fork();

        let page = match route {
            Route::Dashboard => Page::Dashboard(LiveFeed::mount(
                scheduler,
                "dashboard",
                config.tick_period(),
                DashboardState::new(now, step_ms),
                page_rng,
            )),
            Route::MarketOverview => Page::MarketOverview(LiveFeed::mount(
                scheduler,
                "market-overview",
                config.tick_period(),
                MarketOverviewState::new(now, step_ms),
                page_rng,
            )),
            Route::Charts => {
                let initial = ChartsState::generate(config, &mut page_rng);
                Page::Charts(LiveFeed::mount(
                    scheduler,
                    "charts",
                    config.tick_period(),
                    initial,
                    page_rng,
                ))
            }
            Route::Portfolio => Page::Portfolio(PortfolioState::generate(now.date(), &mut page_rng)),
            Route::Options => {
                let initial = OptionsState::generate(&config.market, &mut page_rng);
                Page::Options(LiveFeed::mount(
                    scheduler,
                    "options",
                    config.options_tick_period(),
                    initial,
                    page_rng,
                ))
            }
        };

        info!("Mounted page {}", route.slug());
        page
    }

    pub fn route(&self) -> Route {
        match self {
            Page::Dashboard(_) => Route::Dashboard,
            Page::MarketOverview(_) => Route::MarketOverview,
            Page::Charts(_) => Route::Charts,
            Page::Portfolio(_) => Route::Portfolio,
            Page::Options(_) => Route::Options,
        }
    }

    /// Cancel the page's timer. Its last state stays readable.
    pub fn unmount(&mut self) {
        match self {
            Page::Dashboard(feed) => feed.unmount(),
            Page::MarketOverview(feed) => feed.unmount(),
            Page::Charts(feed) => feed.unmount(),
            Page::Options(feed) => feed.unmount(),
            Page::Portfolio(_) => {}
        }
        info!("Unmounted page {}", self.route().slug());
    }

    /// Ticks applied since mount.
    pub fn ticks(&self) -> u64 {
        match self {
            Page::Dashboard(feed) => feed.ticks(),
            Page::MarketOverview(feed) => feed.ticks(),
            Page::Charts(feed) => feed.ticks(),
            Page::Options(feed) => feed.ticks(),
            Page::Portfolio(_) => 0,
        }
    }

    /// Latest state as JSON.
    pub fn snapshot_json(&self) -> crate::error::Result<String> {
        match self {
            Page::Dashboard(feed) => feed.snapshot_json(),
            Page::MarketOverview(feed) => feed.snapshot_json(),
            Page::Charts(feed) => feed.snapshot_json(),
            Page::Options(feed) => feed.snapshot_json(),
            Page::Portfolio(state) => Ok(serde_json::to_string(state)?),
        }
    }
}

/// Owns the scheduler and the single mounted page.
pub struct Navigator {
    config: Config,
    scheduler: Scheduler,
    rng: FeedRng,
    current: Page,
}

impl Navigator {
    /// Mount the dashboard. Must be called from within a tokio runtime.
    pub fn new(config: Config) -> Self {
        let scheduler = Scheduler::new();
        let mut rng = FeedRng::from_seed(config.seed);
        let current = Page::mount(Route::Dashboard, &scheduler, &config, &mut rng);

        Self {
            config,
            scheduler,
            rng,
            current,
        }
    }

    /// Switch to `route`. Returns false if it is already active.
    pub fn navigate(&mut self, route: Route) -> bool {
        if self.current.route() == route {
            return false;
        }

        info!("Navigating {} -> {}", self.current.route().slug(), route.slug());
        self.current.unmount();
        self.current = Page::mount(route, &self.scheduler, &self.config, &mut self.rng);
        true
    }

    pub fn route(&self) -> Route {
        self.current.route()
    }

    pub fn page(&self) -> &Page {
        &self.current
    }

    pub fn page_mut(&mut self) -> &mut Page {
        &mut self.current
    }

    /// Mounted page together with fresh randomness for user actions that
    /// regenerate data.
    pub fn page_and_rng(&mut self) -> (&mut Page, &mut FeedRng) {
        (&mut self.current, &mut self.rng)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Live timers across all pages.
    pub fn active_timers(&self) -> usize {
        self.scheduler.active_timers()
    }

    /// Stop the current page's timers, e.g. on quit.
    pub fn shutdown(&mut self) {
        self.current.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_keys() {
        for route in Route::all() {
            assert_eq!(Route::from_key(route.key()), Some(route));
        }
        assert_eq!(Route::from_key('9'), None);
        assert_eq!(Route::MarketOverview.slug(), "market-overview");
    }

    #[test]
    fn test_route_periods() {
        let config = Config::default();
        assert_eq!(Route::Charts.period(&config), Some(Duration::from_millis(1000)));
        assert_eq!(Route::Options.period(&config), Some(Duration::from_millis(2000)));
        assert_eq!(Route::Portfolio.period(&config), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_navigate_swaps_timers() {
        let mut nav = Navigator::new(Config::default());
        assert_eq!(nav.active_timers(), 1);

        assert!(nav.navigate(Route::Portfolio));
        assert_eq!(nav.active_timers(), 0);

        assert!(nav.navigate(Route::Options));
        assert_eq!(nav.active_timers(), 1);
        assert!(!nav.navigate(Route::Options));
        assert_eq!(nav.route(), Route::Options);

        nav.shutdown();
        assert_eq!(nav.active_timers(), 0);
    }
}
