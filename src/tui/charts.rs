//! Charts view - price, order book, volume, order flow, volatility and P&L.

use super::{bounds, order_book_table, panel, signed, Theme};
use crate::pages::ChartsState;
use crate::services::SeriesWindow;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    symbols,
    text::{Line, Span},
    widgets::{Axis, BarChart, Chart, Dataset, GraphType, Paragraph, Sparkline},
    Frame,
};

/// Render the charts view. Line charts show the last `window` points.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    state: &ChartsState,
    window: usize,
    capital: f64,
    theme: &Theme,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Percentage(40),
            Constraint::Percentage(30),
            Constraint::Min(0),
        ])
        .split(area);

    render_summary(frame, rows[0], state, capital, theme);

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(rows[1]);
    render_price(frame, top[0], state, window, theme);
    render_order_book(frame, top[1], state, theme);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Percentage(35),
            Constraint::Percentage(35),
        ])
        .split(rows[2]);
    render_volume_profile(frame, middle[0], state, theme);
    render_volume(frame, middle[1], state, window, theme);
    render_order_flow(frame, middle[2], state, theme);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(35),
            Constraint::Percentage(25),
        ])
        .split(rows[3]);
    render_pnl(frame, bottom[0], state, window, theme);
    render_volatility(frame, bottom[1], state, window, theme);
    render_clustering(frame, bottom[2], state, theme);
}

fn render_summary(frame: &mut Frame, area: Rect, state: &ChartsState, capital: f64, theme: &Theme) {
    let na = || "-".to_string();
    let cumulative = state.pnl.cumulative();

    let line = Line::from(vec![
        Span::styled(format!("{} ", state.symbol), theme.title()),
        Span::styled(format!("[{}] ", state.timeframe.label()), theme.header()),
        if state.live {
            Span::styled("● LIVE  ", theme.signed(1.0))
        } else {
            Span::styled("‖ PAUSED  ", theme.warning())
        },
        Span::styled("Last ", theme.muted()),
        Span::raw(state.last_close().map_or_else(na, |v| format!("{:.2}  ", v))),
        Span::styled("Spread ", theme.muted()),
        Span::raw(state.spread().map_or_else(na, |v| format!("{:.2}  ", v))),
        Span::styled("Mid ", theme.muted()),
        Span::raw(state.mid_price().map_or_else(na, |v| format!("{:.2}  ", v))),
        Span::styled("P&L ", theme.muted()),
        Span::styled(format!("{}  ", signed(cumulative)), theme.signed(cumulative)),
        Span::styled("Return ", theme.muted()),
        Span::raw(state.return_pct(capital).map_or_else(na, |v| format!("{}%  ", signed(v)))),
        Span::styled("Max DD ", theme.muted()),
        Span::styled(format!("{:.2}", state.max_drawdown()), theme.signed(state.max_drawdown())),
    ]);

    frame.render_widget(
        Paragraph::new(line).block(panel("Summary  (p pause, t timeframe, n symbol)", theme)),
        area,
    );
}

/// `(index, value)` pairs for the newest `window` points.
fn tail_points<T>(series: &SeriesWindow<T>, window: usize, value: impl Fn(&T) -> f64) -> Vec<(f64, f64)> {
    series
        .tail(window)
        .enumerate()
        .map(|(i, p)| (i as f64, value(p)))
        .collect()
}

fn line_chart<'a>(
    title: &'a str,
    datasets: Vec<Dataset<'a>>,
    x_max: f64,
    y: [f64; 2],
    theme: &Theme,
) -> Chart<'a> {
    Chart::new(datasets)
        .block(panel(title, theme))
        .x_axis(Axis::default().bounds([0.0, x_max.max(1.0)]).style(theme.muted()))
        .y_axis(
            Axis::default()
                .bounds(y)
                .style(theme.muted())
                .labels(vec![
                    Span::raw(format!("{:.1}", y[0])),
                    Span::raw(format!("{:.1}", y[1])),
                ]),
        )
}

fn dataset<'a>(name: &'a str, data: &'a [(f64, f64)], style: Style) -> Dataset<'a> {
    Dataset::default()
        .name(name)
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(style)
        .data(data)
}

fn render_price(frame: &mut Frame, area: Rect, state: &ChartsState, window: usize, theme: &Theme) {
    let close = tail_points(&state.candles, window, |c| c.close);
    let high = tail_points(&state.candles, window, |c| c.high);
    let low = tail_points(&state.candles, window, |c| c.low);
    let y = bounds(low.iter().chain(high.iter()).map(|&(_, v)| v));

    let chart = line_chart(
        "Price",
        vec![
            dataset("high", &high, theme.muted()),
            dataset("low", &low, theme.muted()),
            dataset("close", &close, theme.title()),
        ],
        close.len().saturating_sub(1) as f64,
        y,
        theme,
    );
    frame.render_widget(chart, area);
}

fn render_order_book(frame: &mut Frame, area: Rect, state: &ChartsState, theme: &Theme) {
    frame.render_widget(order_book_table(&state.order_book, "Order Book", theme), area);
}

fn render_pnl(frame: &mut Frame, area: Rect, state: &ChartsState, window: usize, theme: &Theme) {
    let cumulative = tail_points(state.pnl.points(), window, |p| p.cumulative_pnl);
    let drawdown = tail_points(state.pnl.points(), window, |p| p.drawdown);
    let y = bounds(cumulative.iter().chain(drawdown.iter()).map(|&(_, v)| v));

    let chart = line_chart(
        "P&L",
        vec![
            dataset("cumulative", &cumulative, theme.signed(1.0)),
            dataset("drawdown", &drawdown, theme.signed(-1.0)),
        ],
        cumulative.len().saturating_sub(1) as f64,
        y,
        theme,
    );
    frame.render_widget(chart, area);
}

fn render_volatility(frame: &mut Frame, area: Rect, state: &ChartsState, window: usize, theme: &Theme) {
    let realized = tail_points(&state.volatility, window, |p| p.volatility);
    let implied = tail_points(&state.volatility, window, |p| p.implied_vol);
    let historical = tail_points(&state.volatility, window, |p| p.historical_vol);
    let y = bounds(
        realized
            .iter()
            .chain(implied.iter())
            .chain(historical.iter())
            .map(|&(_, v)| v),
    );

    let chart = line_chart(
        "Volatility %",
        vec![
            dataset("vol", &realized, theme.title()),
            dataset("implied", &implied, theme.header()),
            dataset("hist", &historical, theme.muted()),
        ],
        realized.len().saturating_sub(1) as f64,
        y,
        theme,
    );
    frame.render_widget(chart, area);
}

fn render_clustering(frame: &mut Frame, area: Rect, state: &ChartsState, theme: &Theme) {
    // sparkline takes integers, keep one decimal
    let data: Vec<u64> = state
        .clustering
        .iter()
        .map(|p| (p.volatility * 10.0).round() as u64)
        .collect();

    let sparkline = Sparkline::default()
        .block(panel("Vol Clustering", theme))
        .data(&data)
        .style(theme.header());

    frame.render_widget(sparkline, area);
}

fn render_volume_profile(frame: &mut Frame, area: Rect, state: &ChartsState, theme: &Theme) {
    // highest price on top
    let labels: Vec<String> = state
        .volume_profile
        .iter()
        .rev()
        .map(|l| format!("{:.0}{}", l.price, if l.poc { "*" } else { "" }))
        .collect();
    let data: Vec<(&str, u64)> = labels
        .iter()
        .zip(state.volume_profile.iter().rev())
        .map(|(label, level)| (label.as_str(), level.volume))
        .collect();

    let title = match state.point_of_control() {
        Some(poc) => format!("Volume Profile  (POC {:.0})", poc),
        None => "Volume Profile".to_string(),
    };

    let chart = BarChart::default()
        .block(panel(&title, theme))
        .direction(Direction::Horizontal)
        .data(data.as_slice())
        .bar_width(1)
        .bar_gap(0)
        .bar_style(theme.header())
        .value_style(theme.muted());

    frame.render_widget(chart, area);
}

fn render_volume(frame: &mut Frame, area: Rect, state: &ChartsState, window: usize, theme: &Theme) {
    let volumes = state.recent_volumes(window);
    let data: Vec<(&str, u64)> = volumes.iter().map(|&v| ("", v)).collect();

    let chart = BarChart::default()
        .block(panel("Volume Analysis", theme))
        .data(data.as_slice())
        .bar_width(1)
        .bar_gap(0)
        .bar_style(theme.title())
        .value_style(theme.title());

    frame.render_widget(chart, area);
}

fn render_order_flow(frame: &mut Frame, area: Rect, state: &ChartsState, theme: &Theme) {
    let flow = &state.order_flow;
    let buy: Vec<(f64, f64)> = flow
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.buy_volume as f64))
        .collect();
    let sell: Vec<(f64, f64)> = flow
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.sell_volume as f64))
        .collect();
    let delta: Vec<(f64, f64)> = flow
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.delta as f64))
        .collect();
    let y = bounds(buy.iter().chain(sell.iter()).chain(delta.iter()).map(|&(_, v)| v));

    let net = state.net_delta();
    let title = format!("Order Flow & Delta  (net {}{})", if net >= 0 { "+" } else { "" }, net);
    let chart = line_chart(
        &title,
        vec![
            dataset("buy", &buy, theme.signed(1.0)),
            dataset("sell", &sell, theme.signed(-1.0)),
            dataset("delta", &delta, theme.header()),
        ],
        buy.len().saturating_sub(1) as f64,
        y,
        theme,
    );
    frame.render_widget(chart, area);
}
