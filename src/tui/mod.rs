//! Terminal UI for the simulated trading dashboard.

mod app;
mod charts;
mod dashboard;
mod events;
mod market;
mod options;
mod portfolio;
mod state;
mod theme;

pub use app::{run_tui, App, InputMode};
pub use state::{LogBuffer, LogMakeWriter};
pub use theme::Theme;

use crate::types::OrderBookSnapshot;
use ratatui::layout::Constraint;
use ratatui::widgets::{Block, Borders, Row, Table};

/// Bordered block with the theme's border colour.
fn panel<'a>(title: &'a str, theme: &Theme) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(theme.border())
}

/// Ladder table with asks worst-first above bids best-first, so the spread
/// sits in the middle.
fn order_book_table<'a>(book: &OrderBookSnapshot, title: &'a str, theme: &Theme) -> Table<'a> {
    let row = |price: f64, quantity: u64, orders: u32| {
        Row::new(vec![
            format!("{:.2}", price),
            quantity.to_string(),
            orders.to_string(),
        ])
    };
    let asks = book
        .asks
        .iter()
        .rev()
        .map(|l| row(l.price, l.quantity, l.orders).style(theme.signed(-1.0)));
    let bids = book
        .bids
        .iter()
        .map(|l| row(l.price, l.quantity, l.orders).style(theme.signed(1.0)));

    Table::new(
        asks.chain(bids).collect::<Vec<_>>(),
        [Constraint::Length(10), Constraint::Length(6), Constraint::Length(6)],
    )
    .header(Row::new(vec!["Price", "Qty", "Orders"]).style(theme.header()))
    .block(panel(title, theme))
}

/// Format a signed amount with a leading sign.
fn signed(value: f64) -> String {
    if value >= 0.0 {
        format!("+{:.2}", value)
    } else {
        format!("{:.2}", value)
    }
}

/// Min/max of `values` padded so a flat series still spans the axis.
fn bounds(values: impl IntoIterator<Item = f64>) -> [f64; 2] {
    let (lo, hi) = values
        .into_iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if !lo.is_finite() || !hi.is_finite() {
        return [0.0, 1.0];
    }
    let pad = ((hi - lo) * 0.05).max(0.5);
    [lo - pad, hi + pad]
}
