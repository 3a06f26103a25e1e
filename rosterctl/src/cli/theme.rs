//! Style tokens for the console.

use ratatui::style::{Color, Modifier, Style};
use roster_core::domains::ui::ToastKind;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub accent: Color,
    pub text: Color,
    pub muted: Color,
    pub success: Color,
    pub error: Color,
    pub info: Color,
    pub skeleton: Color,
}

pub const THEME: Theme = Theme {
    accent: Color::Cyan,
    text: Color::White,
    muted: Color::DarkGray,
    success: Color::Green,
    error: Color::Red,
    info: Color::Blue,
    skeleton: Color::Rgb(60, 60, 60),
};

impl Theme {
    pub fn title(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub fn text(&self) -> Style {
        Style::default().fg(self.text)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn error_text(&self) -> Style {
        Style::default().fg(self.error)
    }

    pub fn selection(&self) -> Style {
        Style::default()
            .bg(self.accent)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.accent)
        } else {
            Style::default().fg(self.muted)
        }
    }

    pub fn skeleton(&self) -> Style {
        Style::default().fg(self.skeleton)
    }

    /// Buttons render dimmed while disabled.
    pub fn button(&self, enabled: bool, primary: bool) -> Style {
        match (enabled, primary) {
            (false, _) => self.muted(),
            (true, true) => Style::default()
                .fg(Color::Black)
                .bg(self.accent)
                .add_modifier(Modifier::BOLD),
            (true, false) => self.text(),
        }
    }

    pub fn danger_button(&self, enabled: bool) -> Style {
        if enabled {
            Style::default()
                .fg(Color::White)
                .bg(self.error)
                .add_modifier(Modifier::BOLD)
        } else {
            self.muted()
        }
    }

    pub fn toast(&self, kind: ToastKind) -> Style {
        let color = match kind {
            ToastKind::Success => self.success,
            ToastKind::Error => self.error,
            ToastKind::Info => self.info,
        };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }
}
