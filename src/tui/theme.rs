//! Theme and color definitions for the TUI.

use crate::types::{Heat, StrategyStatus};
use ratatui::style::{Color, Modifier, Style};

/// Theme for the TUI with consistent color scheme.
#[derive(Debug, Clone)]
pub struct Theme {
    pub primary: Color,
    pub secondary: Color,
    pub gain: Color,
    pub strong_gain: Color,
    pub loss: Color,
    pub strong_loss: Color,
    pub warning: Color,
    pub muted: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: Color::Cyan,
            secondary: Color::Magenta,
            gain: Color::LightGreen,
            strong_gain: Color::Green,
            loss: Color::LightRed,
            strong_loss: Color::Red,
            warning: Color::Yellow,
            muted: Color::DarkGray,
        }
    }
}

impl Theme {
    /// Get style for titles.
    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Get style for headers.
    pub fn header(&self) -> Style {
        Style::default()
            .fg(self.secondary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn warning(&self) -> Style {
        Style::default().fg(self.warning)
    }

    /// Get style for muted text.
    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    /// Get style for selected items.
    pub fn selected(&self) -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Get style for borders.
    pub fn border(&self) -> Style {
        Style::default().fg(self.primary)
    }

    /// Get style for tabs (active).
    pub fn tab_active(&self) -> Style {
        self.selected()
    }

    /// Get style for tabs (inactive).
    pub fn tab_inactive(&self) -> Style {
        Style::default().fg(self.muted)
    }

    /// Green for non-negative values, red otherwise.
    pub fn signed(&self, value: f64) -> Style {
        if value >= 0.0 {
            Style::default().fg(self.gain)
        } else {
            Style::default().fg(self.loss)
        }
    }

    /// Heatmap tile colour.
    pub fn heat(&self, heat: Heat) -> Style {
        let bg = match heat {
            Heat::StrongGain => self.strong_gain,
            Heat::Gain => self.gain,
            Heat::Loss => self.loss,
            Heat::StrongLoss => self.strong_loss,
        };
        Style::default().fg(Color::Black).bg(bg)
    }

    pub fn strategy(&self, status: StrategyStatus) -> Style {
        match status {
            StrategyStatus::Running => Style::default().fg(self.gain),
            StrategyStatus::Paused => self.warning(),
            StrategyStatus::Stopped => Style::default().fg(self.loss),
        }
    }
}
