//! Portfolio view - holdings, allocation, performance and risk.

use super::{bounds, panel, signed, Theme};
use crate::pages::PortfolioState;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Chart, Dataset, Gauge, GraphType, Paragraph, Row, Table},
    Frame,
};

/// Render the portfolio view.
pub fn render(frame: &mut Frame, area: Rect, state: &PortfolioState, theme: &Theme) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(10), Constraint::Min(0)])
        .split(area);

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(rows[0]);
    render_holdings(frame, top[0], state, theme);
    render_allocation(frame, top[1], state, theme);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Percentage(30),
            Constraint::Percentage(25),
        ])
        .split(rows[1]);
    render_performance(frame, bottom[0], state, theme);
    render_monthly(frame, bottom[1], state, theme);
    render_risk(frame, bottom[2], state, theme);
}

fn render_holdings(frame: &mut Frame, area: Rect, state: &PortfolioState, theme: &Theme) {
    let summary = state.summary();
    let rows: Vec<Row> = state
        .holdings
        .iter()
        .map(|h| {
            Row::new(vec![
                h.symbol.clone(),
                h.quantity.to_string(),
                format!("{:.2}", h.avg_price),
                format!("{:.2}", h.current_price),
                signed(h.pnl()),
                format!("{}%", signed(h.pnl_pct())),
            ])
            .style(theme.signed(h.pnl()))
        })
        .collect();

    let title = format!(
        "Holdings  value {:.2}  P&L {} ({}%)",
        summary.total_value,
        signed(summary.total_pnl),
        signed(summary.total_pnl_pct)
    );

    let table = Table::new(
        rows,
        [
            Constraint::Length(11),
            Constraint::Length(5),
            Constraint::Length(9),
            Constraint::Length(9),
            Constraint::Length(10),
            Constraint::Length(8),
        ],
    )
    .header(Row::new(vec!["Symbol", "Qty", "Avg", "LTP", "P&L", "P&L%"]).style(theme.header()))
    .block(panel(&title, theme));

    frame.render_widget(table, area);
}

fn render_allocation(frame: &mut Frame, area: Rect, state: &PortfolioState, theme: &Theme) {
    let allocation = state.allocation();
    let block = panel("Allocation", theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let slots = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(1); allocation.len()])
        .split(inner);

    for (slot, sector) in slots.iter().zip(allocation.iter()) {
        let gauge = Gauge::default()
            .gauge_style(theme.header())
            .ratio((sector.value / 100.0).clamp(0.0, 1.0))
            .label(format!("{} {:.1}%", sector.sector, sector.value));
        frame.render_widget(gauge, *slot);
    }
}

fn render_performance(frame: &mut Frame, area: Rect, state: &PortfolioState, theme: &Theme) {
    let portfolio: Vec<(f64, f64)> = state
        .performance
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.portfolio_value))
        .collect();
    let benchmark: Vec<(f64, f64)> = state
        .performance
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.benchmark))
        .collect();
    let y = bounds(portfolio.iter().chain(benchmark.iter()).map(|&(_, v)| v));

    let title = format!("Performance [{}]  (p period)", state.period);
    let chart = Chart::new(vec![
        Dataset::default()
            .name("portfolio")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(theme.title())
            .data(&portfolio),
        Dataset::default()
            .name("benchmark")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(theme.muted())
            .data(&benchmark),
    ])
    .block(panel(&title, theme))
    .x_axis(
        Axis::default()
            .bounds([0.0, portfolio.len().saturating_sub(1).max(1) as f64])
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

    frame.render_widget(chart, area);
}

fn render_monthly(frame: &mut Frame, area: Rect, state: &PortfolioState, theme: &Theme) {
    let rows: Vec<Row> = state
        .monthly_pnl
        .iter()
        .map(|m| {
            let total = m.realized + m.unrealized + m.dividends;
            Row::new(vec![
                m.month.clone(),
                format!("{:.0}", m.realized),
                format!("{:.0}", m.unrealized),
                format!("{:.0}", m.dividends),
            ])
            .style(theme.signed(total))
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(4),
            Constraint::Length(8),
            Constraint::Length(8),
            Constraint::Length(6),
        ],
    )
    .header(Row::new(vec!["Mon", "Real", "Unreal", "Div"]).style(theme.header()))
    .block(panel("Monthly P&L", theme));

    frame.render_widget(table, area);
}

fn render_risk(frame: &mut Frame, area: Rect, state: &PortfolioState, theme: &Theme) {
    let risk = &state.risk;
    let metric = |label: &'static str, value: String| {
        Line::from(vec![Span::styled(label, theme.muted()), Span::raw(value)])
    };

    let lines = vec![
        metric("Beta: ", format!("{:.2}", risk.beta)),
        metric("Sharpe: ", format!("{:.2}", risk.sharpe_ratio)),
        metric("Max DD: ", format!("{:.1}%", risk.max_drawdown)),
        metric("Volatility: ", format!("{:.1}%", risk.volatility)),
        metric("VaR 95: ", format!("{:.0}", risk.var95)),
        metric("ES: ", format!("{:.0}", risk.expected_shortfall)),
    ];

    frame.render_widget(Paragraph::new(lines).block(panel("Risk", theme)), area);
}
