use picpay_tui::domain::theme::Theme;
use ratatui::style::{Color, Modifier, Style};

/// Colors for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub foreground: Color,
    pub muted: Color,
    pub accent: Color,
    pub editing: Color,
    pub highlight: Color,
    pub success: Color,
    pub error: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                background: Color::Rgb(250, 250, 250),
                foreground: Color::Rgb(33, 37, 41),
                muted: Color::Rgb(108, 117, 125),
                accent: Color::Rgb(17, 199, 111),
                editing: Color::Rgb(191, 120, 0),
                highlight: Color::Rgb(222, 226, 230),
                success: Color::Rgb(25, 135, 84),
                error: Color::Rgb(220, 53, 69),
            },
            Theme::Dark => Self {
                background: Color::Rgb(18, 18, 18),
                foreground: Color::Rgb(230, 230, 230),
                muted: Color::Rgb(140, 140, 140),
                accent: Color::Rgb(33, 194, 94),
                editing: Color::Yellow,
                highlight: Color::Rgb(48, 48, 48),
                success: Color::Rgb(72, 199, 116),
                error: Color::Rgb(255, 99, 99),
            },
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.foreground).bg(self.background)
    }

    pub fn text(&self) -> Style {
        Style::default().fg(self.foreground)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn border(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.accent)
        } else {
            self.muted()
        }
    }

    pub fn selected(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .bg(self.highlight)
            .add_modifier(Modifier::BOLD)
    }
}
