//! Tickboard - simulated live market feed and terminal trading dashboard
//!
//! All market data is synthetic: series are generated from a seedable random
//! source when a page mounts and advanced by timer-driven reducers while it
//! stays mounted.

pub mod config;
pub mod error;
pub mod feed;
pub mod pages;
pub mod scheduler;
pub mod services;
pub mod tui;
pub mod types;

pub use config::{Config, MarketConfig};
pub use error::{AppError, Result};
pub use feed::{LiveFeed, Reducer};
pub use pages::{Navigator, Page, Route};
pub use scheduler::{Scheduler, TickHandle};
pub use services::{FeedRng, SeriesGenerator, SeriesWindow};
