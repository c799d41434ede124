//! Options view - chain, Greeks and volatility smile.

use super::{bounds, panel, signed, Theme};
use crate::pages::{OptionsState, OptionsView};
use crate::types::OptionType;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Chart, Dataset, GraphType, Paragraph, Row, Table},
    Frame,
};

/// Render the options view.
pub fn render(frame: &mut Frame, area: Rect, state: &OptionsState, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    render_summary(frame, chunks[0], state, theme);

    match state.view {
        OptionsView::Chain => render_chain(frame, chunks[1], state, theme),
        OptionsView::Greeks => render_greeks(frame, chunks[1], state, theme),
        OptionsView::Volatility => render_smile(frame, chunks[1], state, theme),
    }
}

fn render_summary(frame: &mut Frame, area: Rect, state: &OptionsState, theme: &Theme) {
    let line = Line::from(vec![
        Span::styled(format!("{} ", state.symbol), theme.title()),
        Span::styled(format!("{}  ", state.expiry_label()), theme.header()),
        Span::styled("Spot ", theme.muted()),
        Span::raw(format!("{:.2}  ", state.spot)),
        Span::styled("ATM ", theme.muted()),
        Span::raw(state.atm_strike().map_or("-".to_string(), |s| format!("{:.0}  ", s))),
        Span::styled("PCR ", theme.muted()),
        Span::raw(state.put_call_ratio().map_or("-".to_string(), |r| format!("{:.2}  ", r))),
        Span::styled("Call OI ", theme.muted()),
        Span::raw(format!("{}  ", state.total_call_oi())),
        Span::styled("Put OI ", theme.muted()),
        Span::raw(state.total_put_oi().to_string()),
    ]);

    let title = format!("{}  (v view, x expiry, n symbol)", state.view.name());
    frame.render_widget(Paragraph::new(line).block(panel(&title, theme)), area);
}

fn render_chain(frame: &mut Frame, area: Rect, state: &OptionsState, theme: &Theme) {
    let atm = state.atm_strike();
    let rows: Vec<Row> = state
        .chain
        .iter()
        .map(|row| {
            let call = &row.call;
            let put = &row.put;
            let cells = vec![
                call.oi.to_string(),
                call.volume.to_string(),
                format!("{:.1}", call.iv),
                format!("{:.2}", call.ltp),
                signed(call.change),
                format!("{:.0}", row.strike),
                signed(put.change),
                format!("{:.2}", put.ltp),
                format!("{:.1}", put.iv),
                put.volume.to_string(),
                put.oi.to_string(),
            ];
            let style = if Some(row.strike) == atm {
                theme.selected()
            } else if row.is_itm(OptionType::Call, state.spot) {
                theme.signed(1.0)
            } else if row.is_itm(OptionType::Put, state.spot) {
                theme.signed(-1.0)
            } else {
                theme.muted()
            };
            Row::new(cells).style(style)
        })
        .collect();

    let mut widths = vec![Constraint::Length(7); 11];
    widths[5] = Constraint::Length(8);

    let table = Table::new(rows, widths)
        .header(
            Row::new(vec![
                "C OI", "C Vol", "C IV", "C LTP", "C Chg", "Strike", "P Chg", "P LTP", "P IV",
                "P Vol", "P OI",
            ])
            .style(theme.header()),
        )
        .block(panel("Option Chain", theme));

    frame.render_widget(table, area);
}

fn render_greeks(frame: &mut Frame, area: Rect, state: &OptionsState, theme: &Theme) {
    let atm = state.atm_strike();
    let rows: Vec<Row> = state
        .greeks
        .iter()
        .map(|g| {
            let row = Row::new(vec![
                format!("{:.0}", g.strike),
                format!("{:.4}", g.call_delta),
                format!("{:.4}", g.put_delta),
                format!("{:.6}", g.gamma),
                format!("{:.2}", g.theta),
                format!("{:.2}", g.vega),
            ]);
            if Some(g.strike) == atm {
                row.style(theme.selected())
            } else {
                row
            }
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(8),
            Constraint::Length(10),
            Constraint::Length(10),
            Constraint::Length(10),
            Constraint::Length(8),
            Constraint::Length(8),
        ],
    )
    .header(
        Row::new(vec!["Strike", "Call Δ", "Put Δ", "Gamma", "Theta", "Vega"]).style(theme.header()),
    )
    .block(panel("Greeks", theme));

    frame.render_widget(table, area);
}

fn render_smile(frame: &mut Frame, area: Rect, state: &OptionsState, theme: &Theme) {
    let smile: Vec<(f64, f64)> = state.smile.iter().map(|p| (p.strike, p.iv)).collect();
    let x = match (smile.first(), smile.last()) {
        (Some(first), Some(last)) if last.0 > first.0 => [first.0, last.0],
        _ => [0.0, 1.0],
    };
    let y = bounds(smile.iter().map(|&(_, v)| v));

    let chart = Chart::new(vec![Dataset::default()
        .name("iv")
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(theme.title())
        .data(&smile)])
    .block(panel("Volatility Smile", theme))
    .x_axis(
        Axis::default()
            .bounds(x)
            .style(theme.muted())
            .labels(vec![
                Span::raw(format!("{:.0}", x[0])),
                Span::raw(format!("{:.0}", x[1])),
            ]),
    )
    .y_axis(
        Axis::default()
            .bounds(y)
            .style(theme.muted())
            .labels(vec![
                Span::raw(format!("{:.1}", y[0])),
                Span::raw(format!("{:.1}", y[1])),
            ]),
    );

    frame.render_widget(chart, area);
}
