//! Form for transferring funds between two wallets.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use picpay_tui::domain::forms::{MIN_TRANSFER_VALUE, TransferField, TransferForm};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tokio::sync::mpsc::UnboundedSender;

use crate::{action::Action, tui::Frame};

use super::{
    Component,
    input::{InputView, draw_input, draw_submit, help_line},
    palette::Palette,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferFocus {
    Field(TransferField),
    Submit,
}

impl TransferFocus {
    fn next(self) -> Self {
        match self {
            TransferFocus::Field(TransferField::PayerId) => {
                TransferFocus::Field(TransferField::PayeeId)
            }
            TransferFocus::Field(TransferField::PayeeId) => {
                TransferFocus::Field(TransferField::Value)
            }
            TransferFocus::Field(TransferField::Value) => TransferFocus::Submit,
            TransferFocus::Submit => TransferFocus::Field(TransferField::PayerId),
        }
    }

    fn prev(self) -> Self {
        match self {
            TransferFocus::Field(TransferField::PayerId) => TransferFocus::Submit,
            TransferFocus::Field(TransferField::PayeeId) => {
                TransferFocus::Field(TransferField::PayerId)
            }
            TransferFocus::Field(TransferField::Value) => {
                TransferFocus::Field(TransferField::PayeeId)
            }
            TransferFocus::Submit => TransferFocus::Field(TransferField::Value),
        }
    }
}

pub struct TransferComponent {
    action_tx: UnboundedSender<Action>,
    pub focus: TransferFocus,
    pub is_editing: bool,
}

impl TransferComponent {
    pub fn new(action_tx: UnboundedSender<Action>) -> Self {
        Self {
            action_tx,
            focus: TransferFocus::Field(TransferField::PayerId),
            is_editing: false,
        }
    }

    fn focused_field(&self) -> Option<TransferField> {
        match self.focus {
            TransferFocus::Field(field) => Some(field),
            TransferFocus::Submit => None,
        }
    }

    fn handle_char(&mut self, c: char, form: &mut TransferForm) {
        match self.focused_field() {
            Some(TransferField::Value) => {
                let has_separator = form.value.contains(['.', ',']);
                if c.is_ascii_digit() || (matches!(c, '.' | ',') && !has_separator) {
                    // Replace the untouched default instead of appending to it
                    if form.value == "0" && c.is_ascii_digit() {
                        form.value.clear();
                    }
                    form.value.push(c);
                }
            }
            Some(field) => form.value_mut(field).push(c),
            None => {}
        }
    }
}

impl Component for TransferComponent {
    type State = TransferForm;

    fn is_editing(&self) -> bool {
        self.is_editing
    }

    fn paste(&mut self, text: &str, form: &mut TransferForm) {
        if self.focused_field().is_some() {
            for c in text.trim().chars() {
                self.handle_char(c, form);
            }
            self.is_editing = true;
        }
    }

    fn handle_key_event(&mut self, key: KeyEvent, form: &mut TransferForm) -> Result<()> {
        let on_input_field = self.focused_field().is_some();

        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.is_editing = false;
                self.focus = self.focus.next();
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.is_editing = false;
                self.focus = self.focus.prev();
            }
            KeyCode::Esc => {
                self.is_editing = false;
            }
            KeyCode::Enter => {
                if self.focus == TransferFocus::Submit {
                    self.action_tx.send(Action::Transfer)?;
                } else {
                    self.is_editing = !self.is_editing;
                }
            }
            KeyCode::Char(c) => {
                if self.is_editing && on_input_field {
                    self.handle_char(c, form);
                } else if !self.is_editing {
                    match c {
                        'j' => self.focus = self.focus.next(),
                        'k' => self.focus = self.focus.prev(),
                        'c' => {
                            form.reset();
                            self.focus = TransferFocus::Field(TransferField::PayerId);
                        }
                        'e' if on_input_field => self.is_editing = true,
                        _ => {}
                    }
                }
            }
            KeyCode::Backspace => {
                if self.is_editing
                    && let Some(field) = self.focused_field()
                {
                    form.value_mut(field).pop();
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn draw(&self, f: &mut Frame, area: Rect, form: &TransferForm, palette: &Palette) {
        let chunks = Layout::vertical([
            Constraint::Length(3), // Payer
            Constraint::Length(3), // Payee
            Constraint::Length(3), // Value
            Constraint::Length(3), // Submit
            Constraint::Min(0),    // Help
        ])
        .split(area);

        for (i, field) in TransferField::ALL.into_iter().enumerate() {
            draw_input(
                f,
                chunks[i],
                InputView {
                    label: field.label(),
                    value: form.value(field),
                    placeholder: match field {
                        TransferField::PayerId => "Carteira de origem (p na lista)",
                        TransferField::PayeeId => "Carteira de destino (y na lista)",
                        TransferField::Value => "0,00",
                    },
                    focused: self.focus == TransferFocus::Field(field),
                    editing: self.is_editing,
                    masked: false,
                },
                palette,
            );
        }

        draw_submit(
            f,
            chunks[3],
            "Transferir",
            self.focus == TransferFocus::Submit,
            form.is_valid(),
            palette,
        );

        let help = Paragraph::new(vec![
            Line::from(Span::styled(help_line(self.is_editing), palette.muted())),
            Line::from(Span::styled(
                format!("Valor mínimo: {MIN_TRANSFER_VALUE:.2}"),
                palette.muted(),
            )),
        ])
        .block(
            Block::default()
                .title("Help")
                .borders(Borders::ALL)
                .border_style(palette.border(false)),
        );
        f.render_widget(help, chunks[4]);
    }
}
