//! Dashboard view - session, account summary, intraday chart, order book,
//! watchlist, strategies, risk radar and execution quality.

use super::{bounds, order_book_table, panel, signed, Theme};
use crate::pages::DashboardState;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    symbols,
    text::{Line, Span},
    widgets::{Axis, BarChart, Chart, Dataset, Gauge, GraphType, Paragraph, Row, Table},
    Frame,
};

/// Render the dashboard view.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    state: &DashboardState,
    searching: bool,
    cursor: usize,
    theme: &Theme,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),      // Clock & controls
            Constraint::Length(4),      // Portfolio summary
            Constraint::Percentage(40), // Intraday chart & order book
            Constraint::Min(0),         // Watchlist, strategies & risk
        ])
        .split(area);

    render_header(frame, chunks[0], state, theme);
    render_account(frame, chunks[1], state, theme);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(chunks[2]);

    render_intraday(frame, middle[0], state, theme);
    let book_title = format!("Order Book  {}", state.selected_symbol);
    frame.render_widget(order_book_table(&state.order_book, &book_title, theme), middle[1]);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(35),
            Constraint::Percentage(35),
            Constraint::Percentage(30),
        ])
        .split(chunks[3]);

    render_watchlist(frame, bottom[0], state, searching, theme);
    render_strategies(frame, bottom[1], state, cursor, theme);
    render_risk(frame, bottom[2], state, theme);
}

fn render_account(frame: &mut Frame, area: Rect, state: &DashboardState, theme: &Theme) {
    let account = &state.account;
    let lines = vec![
        Line::from(vec![
            Span::styled("Total Equity ", theme.muted()),
            Span::styled(format!("{:.0}  ", account.total_equity), theme.title()),
            Span::styled("Available Margin ", theme.muted()),
            Span::raw(format!("{:.0}  ", account.available_margin)),
            Span::styled("Day's Performance ", theme.muted()),
            Span::styled(
                format!("{} ({}%)", signed(account.day_pnl), signed(account.day_pnl_pct)),
                theme.signed(account.day_pnl),
            ),
        ]),
        Line::from(vec![
            Span::styled("Trades ", theme.muted()),
            Span::raw(format!("{}  ", account.trades_today)),
            Span::styled("Active Positions ", theme.muted()),
            Span::raw(format!("{} ", account.active_positions)),
            Span::styled(format!("({} need attention)  ", account.positions_flagged), theme.warning()),
            Span::styled("Active Algos ", theme.muted()),
            Span::raw(state.active_algos().to_string()),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines).block(panel("Portfolio Summary", theme)), area);
}

fn render_intraday(frame: &mut Frame, area: Rect, state: &DashboardState, theme: &Theme) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(area);

    let value: Vec<(f64, f64)> = state
        .intraday
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.value))
        .collect();
    let y = bounds(value.iter().map(|&(_, v)| v));
    let title = format!("Portfolio Value [{}]  (t timeframe)", state.timeframe.label());

    let chart = Chart::new(vec![Dataset::default()
        .name("value")
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(theme.title())
        .data(&value)])
    .block(panel(&title, theme))
    .x_axis(
        Axis::default()
            .bounds([0.0, value.len().saturating_sub(1).max(1) as f64])
            .style(theme.muted()),
    )
    .y_axis(
        Axis::default()
            .bounds(y)
            .style(theme.muted())
            .labels(vec![
                Span::raw(format!("{:.0}", y[0])),
                Span::raw(format!("{:.0}", y[1])),
            ]),
    );
    frame.render_widget(chart, rows[0]);

    let volume: Vec<(&str, u64)> = state
        .intraday
        .iter()
        .map(|p| (p.time.as_str(), p.volume))
        .collect();
    let bars = BarChart::default()
        .block(panel("Volume", theme))
        .data(volume.as_slice())
        .bar_width(5)
        .bar_gap(1)
        .bar_style(theme.header())
        .value_style(theme.selected());
    frame.render_widget(bars, rows[1]);
}

fn render_risk(frame: &mut Frame, area: Rect, state: &DashboardState, theme: &Theme) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(0)])
        .split(area);

    let radar = panel("Risk Radar", theme);
    let inner = radar.inner(rows[0]);
    frame.render_widget(radar, rows[0]);

    let slots = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1); 3])
        .split(inner);
    let risk = &state.risk;
    let gauges = [
        (format!("VaR (95%) {:.1}%", risk.var_95), risk.var_gauge_pct()),
        (format!("Max Drawdown {:.1}%", risk.max_drawdown), risk.drawdown_gauge_pct()),
        (
            format!("Concentration {}", risk.concentration),
            risk.concentration.gauge_pct(),
        ),
    ];
    for (slot, (label, percent)) in slots.iter().zip(gauges) {
        let gauge = Gauge::default()
            .gauge_style(theme.warning())
            .percent(percent)
            .label(label);
        frame.render_widget(gauge, *slot);
    }

    let execution = &state.execution;
    let lines = vec![
        Line::from(vec![
            Span::styled("Avg Slippage  ", theme.muted()),
            Span::raw(format!("{:.2}%", execution.avg_slippage_pct)),
        ]),
        Line::from(vec![
            Span::styled("Fill Rate     ", theme.muted()),
            Span::styled(format!("{:.1}%", execution.fill_rate_pct), theme.signed(1.0)),
        ]),
        Line::from(vec![
            Span::styled("Latency       ", theme.muted()),
            Span::raw(format!("{:.1}ms", execution.avg_latency_ms)),
        ]),
        Line::from(vec![
            Span::styled("Market Impact ", theme.muted()),
            Span::raw(format!("{:.2}%", execution.market_impact_pct)),
        ]),
    ];
    frame.render_widget(
        Paragraph::new(lines).block(panel("Execution Quality", theme)),
        rows[1],
    );
}

fn render_header(frame: &mut Frame, area: Rect, state: &DashboardState, theme: &Theme) {
    let stop = if state.emergency_stop {
        Span::styled("■ EMERGENCY STOP", theme.heat(crate::types::Heat::StrongLoss))
    } else {
        Span::styled("● Trading", theme.signed(1.0))
    };

    let lines = vec![
        Line::from(vec![
            Span::styled("Time: ", theme.muted()),
            Span::styled(state.clock.format("%H:%M:%S").to_string(), theme.title()),
            Span::raw("   "),
            stop,
        ]),
        Line::from(vec![
            Span::styled("Selected: ", theme.muted()),
            Span::raw(state.selected_symbol.as_str()),
            Span::raw("   "),
            Span::styled("Running P&L: ", theme.muted()),
            Span::styled(signed(state.running_pnl()), theme.signed(state.running_pnl())),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines).block(panel("Session", theme)), area);
}

fn render_watchlist(
    frame: &mut Frame,
    area: Rect,
    state: &DashboardState,
    searching: bool,
    theme: &Theme,
) {
    let rows: Vec<Row> = state
        .filtered_watchlist()
        .into_iter()
        .map(|entry| {
            let style = if entry.symbol == state.selected_symbol {
                theme.selected()
            } else {
                theme.signed(entry.change)
            };
            Row::new(vec![
                entry.symbol.clone(),
                format!("{:.2}", entry.price),
                signed(entry.change),
                format!("{}%", signed(entry.change_percent)),
                entry.volume.clone(),
            ])
            .style(style)
        })
        .collect();

    let title = if searching {
        format!("Watchlist  /{}_", state.query)
    } else if state.query.is_empty() {
        "Watchlist  (/ search, Tab select)".to_string()
    } else {
        format!("Watchlist  /{}", state.query)
    };

    let table = Table::new(
        rows,
        [
            Constraint::Length(11),
            Constraint::Length(9),
            Constraint::Length(8),
            Constraint::Length(8),
            Constraint::Length(6),
        ],
    )
    .header(Row::new(vec!["Symbol", "Price", "Chg", "Chg%", "Vol"]).style(theme.header()))
    .block(panel(&title, theme));

    frame.render_widget(table, area);
}

fn render_strategies(
    frame: &mut Frame,
    area: Rect,
    state: &DashboardState,
    cursor: usize,
    theme: &Theme,
) {
    let rows: Vec<Row> = state
        .strategies
        .iter()
        .enumerate()
        .map(|(i, strategy)| {
            let row = Row::new(vec![
                strategy.name.clone(),
                strategy.status.to_string(),
                signed(strategy.pnl),
                strategy.trades.to_string(),
            ]);
            if i == cursor {
                row.style(theme.selected())
            } else {
                row.style(theme.strategy(strategy.status))
            }
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Min(20),
            Constraint::Length(8),
            Constraint::Length(10),
            Constraint::Length(6),
        ],
    )
    .header(Row::new(vec!["Strategy", "Status", "P&L", "Trades"]).style(theme.header()))
    .block(panel("Strategies  (↑↓ move, Enter toggle, e stop)", theme));

    frame.render_widget(table, area);
}
