pub mod chart;
pub mod market;
pub mod options;
pub mod orderbook;
pub mod portfolio;

pub use chart::*;
pub use market::*;
pub use options::*;
pub use orderbook::*;
pub use portfolio::*;
