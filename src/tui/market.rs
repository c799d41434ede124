//! Market overview view - index cards, heatmap, sectors and breadth.

use super::{panel, signed, Theme};
use crate::pages::MarketOverviewState;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{BarChart, Paragraph, Row, Table, Wrap},
    Frame,
};

/// Render the market overview view.
pub fn render(frame: &mut Frame, area: Rect, state: &MarketOverviewState, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Percentage(50),
            Constraint::Min(0),
        ])
        .split(area);

    render_indices(frame, chunks[0], state, theme);
    render_heatmap(frame, chunks[1], state, theme);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(chunks[2]);

    render_sectors(frame, bottom[0], state, theme);
    render_breadth(frame, bottom[1], state, theme);
}

fn render_indices(frame: &mut Frame, area: Rect, state: &MarketOverviewState, theme: &Theme) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    for (card, index) in cards.iter().zip(state.indices.iter()) {
        let lines = vec![
            Line::from(Span::styled(format!("{:.2}", index.value), theme.title())),
            Line::from(Span::styled(
                format!("{} ({}%)", signed(index.change), signed(index.change_percent)),
                theme.signed(index.change),
            )),
        ];
        frame.render_widget(Paragraph::new(lines).block(panel(&index.name, theme)), *card);
    }

    let volume = vec![
        Line::from(Span::styled(
            format!("{:.2}B", state.market_volume as f64 / 1e9),
            theme.title(),
        )),
        Line::from(Span::styled("shares traded", theme.muted())),
    ];
    frame.render_widget(Paragraph::new(volume).block(panel("Volume", theme)), cards[2]);

    let breadth = match state.latest_breadth() {
        Some(p) => vec![
            Line::from(vec![
                Span::styled(p.advances.to_string(), theme.signed(1.0)),
                Span::raw(" / "),
                Span::styled(p.declines.to_string(), theme.signed(-1.0)),
            ]),
            Line::from(Span::styled(
                p.advance_decline_ratio()
                    .map_or_else(|| "ratio -".to_string(), |r| format!("ratio {:.2}", r)),
                theme.muted(),
            )),
        ],
        None => vec![Line::from("-")],
    };
    frame.render_widget(Paragraph::new(breadth).block(panel("Adv / Dec", theme)), cards[3]);
}

fn render_heatmap(frame: &mut Frame, area: Rect, state: &MarketOverviewState, theme: &Theme) {
    let mut spans = Vec::new();
    for entry in state.visible_heatmap() {
        // busier symbols get wider tiles
        let width = (8.0 + 6.0 * state.tile_weight(entry)).round() as usize;
        let label = format!("{} {}", entry.symbol, signed(entry.change));
        let width = width.max(label.len() + 2);
        spans.push(Span::styled(
            format!("{:^width$}", label, width = width),
            theme.heat(entry.heat()),
        ));
        spans.push(Span::raw(" "));
    }

    let title = match &state.selected_sector {
        Some(sector) => format!("Heatmap [{}]  {}  (s sector)", sector, state.clock.format("%H:%M:%S")),
        None => format!("Heatmap  {}  (s sector)", state.clock.format("%H:%M:%S")),
    };

    let heatmap = Paragraph::new(Line::from(spans))
        .wrap(Wrap { trim: false })
        .block(panel(&title, theme));

    frame.render_widget(heatmap, area);
}

fn render_sectors(frame: &mut Frame, area: Rect, state: &MarketOverviewState, theme: &Theme) {
    let rows: Vec<Row> = state
        .sectors
        .iter()
        .map(|s| {
            Row::new(vec![
                s.sector.clone(),
                format!("{}%", signed(s.performance)),
                s.stocks.to_string(),
            ])
            .style(theme.signed(s.performance))
        })
        .collect();

    let table = Table::new(
        rows,
        [Constraint::Min(10), Constraint::Length(8), Constraint::Length(6)],
    )
    .header(Row::new(vec!["Sector", "Perf", "Stocks"]).style(theme.header()))
    .block(panel("Sectors", theme));

    frame.render_widget(table, area);
}

fn render_breadth(frame: &mut Frame, area: Rect, state: &MarketOverviewState, theme: &Theme) {
    let data: Vec<(&str, u64)> = state
        .breadth
        .iter()
        .map(|p| (p.time.as_str(), p.advances as u64))
        .collect();

    let title = match state.latest_breadth().and_then(|p| p.advance_decline_ratio()) {
        Some(ratio) => format!("Advances  (A/D {:.2})", ratio),
        None => "Advances".to_string(),
    };

    let chart = BarChart::default()
        .block(panel(&title, theme))
        .data(data.as_slice())
        .bar_width(5)
        .bar_gap(1)
        .bar_style(theme.signed(1.0))
        .value_style(theme.selected());

    frame.render_widget(chart, area);
}
