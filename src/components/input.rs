//! Widgets shared by the form components.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::tui::Frame;

use super::palette::Palette;

/// How an input box is drawn.
pub struct InputView<'a> {
    pub label: &'a str,
    pub value: &'a str,
    pub placeholder: &'a str,
    pub focused: bool,
    pub editing: bool,
    pub masked: bool,
}

pub fn draw_input(f: &mut Frame, area: Rect, input: InputView<'_>, palette: &Palette) {
    let value_style = match (input.focused, input.editing) {
        (true, true) => Style::default().fg(palette.editing),
        (true, false) => Style::default().fg(palette.accent),
        _ => palette.text(),
    };

    let mut display = if input.value.is_empty() {
        if input.focused {
            String::new()
        } else {
            input.placeholder.to_string()
        }
    } else if input.masked {
        "•".repeat(input.value.chars().count())
    } else {
        input.value.to_string()
    };
    if input.editing && input.focused {
        display.push('│');
    }

    let style = if input.value.is_empty() && !input.focused {
        palette.muted()
    } else {
        value_style
    };

    let title = if input.focused {
        format!("> {}", input.label)
    } else {
        format!("  {}", input.label)
    };

    let widget = Paragraph::new(Line::from(Span::styled(display, style))).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(palette.border(input.focused)),
    );
    f.render_widget(widget, area);
}

/// Submit button. Dimmed while the form would be rejected.
pub fn draw_submit(
    f: &mut Frame,
    area: Rect,
    label: &str,
    focused: bool,
    enabled: bool,
    palette: &Palette,
) {
    let style = match (focused, enabled) {
        (true, true) => Style::default()
            .fg(palette.background)
            .bg(palette.accent)
            .add_modifier(Modifier::BOLD),
        (false, true) => Style::default().fg(palette.accent),
        (true, false) => palette.muted().add_modifier(Modifier::REVERSED),
        (false, false) => palette.muted(),
    };

    let widget = Paragraph::new(Line::from(Span::styled(format!("  [ {label} ]  "), style)))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(palette.border(focused)),
        );
    f.render_widget(widget, area);
}

/// Help line for forms.
pub fn help_line(editing: bool) -> &'static str {
    if editing {
        "[Esc] Stop editing  [Tab/↓] Next field  [Shift+Tab/↑] Prev field"
    } else {
        "[Enter/e] Edit field  [↓/j] Next  [↑/k] Prev  [c] Clear form  [Enter on button] Submit"
    }
}
