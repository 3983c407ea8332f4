//! Form for creating a wallet.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use picpay_tui::domain::{
    forms::{WalletField, WalletForm},
    wallet::{AccountType, USER, parse_int_prefix},
};
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
pub enum WalletFocus {
    Field(WalletField),
    Submit,
}

impl WalletFocus {
    const ORDER: [WalletFocus; 7] = [
        WalletFocus::Field(WalletField::FullName),
        WalletFocus::Field(WalletField::Cpf),
        WalletFocus::Field(WalletField::Email),
        WalletFocus::Field(WalletField::Password),
        WalletFocus::Field(WalletField::AccountType),
        WalletFocus::Field(WalletField::InitialBalance),
        WalletFocus::Submit,
    ];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    fn prev(self) -> Self {
        let pos = self.position();
        Self::ORDER[if pos == 0 { Self::ORDER.len() - 1 } else { pos - 1 }]
    }
}

pub struct CreateWalletComponent {
    action_tx: UnboundedSender<Action>,
    pub focus: WalletFocus,
    pub is_editing: bool,
}

impl CreateWalletComponent {
    pub fn new(action_tx: UnboundedSender<Action>) -> Self {
        Self {
            action_tx,
            focus: WalletFocus::Field(WalletField::FullName),
            is_editing: false,
        }
    }

    fn focused_text_field(&self) -> Option<WalletField> {
        match self.focus {
            WalletFocus::Field(WalletField::AccountType) | WalletFocus::Submit => None,
            WalletFocus::Field(field) => Some(field),
        }
    }

    fn handle_char(&mut self, c: char, form: &mut WalletForm) {
        let Some(field) = self.focused_text_field() else {
            return;
        };
        let value = form.value_mut(field);
        if field == WalletField::InitialBalance {
            // Only allow digits and a single decimal separator
            let has_separator = value.contains(['.', ',']);
            if c.is_ascii_digit() || (matches!(c, '.' | ',') && !has_separator) {
                if *value == "0" && c.is_ascii_digit() {
                    value.clear();
                }
                value.push(c);
            }
        } else {
            value.push(c);
        }
    }

    fn toggle_account_type(form: &mut WalletForm) {
        let current = parse_int_prefix(&form.account_type)
            .and_then(AccountType::from_code)
            .unwrap_or(AccountType::Shopkeeper);
        form.account_type = current.toggled().code().to_string();
    }
}

impl Component for CreateWalletComponent {
    type State = WalletForm;

    fn is_editing(&self) -> bool {
        self.is_editing
    }

    fn paste(&mut self, text: &str, form: &mut WalletForm) {
        if self.focused_text_field().is_some() {
            for c in text.trim().chars() {
                self.handle_char(c, form);
            }
            self.is_editing = true;
        }
    }

    fn handle_key_event(&mut self, key: KeyEvent, form: &mut WalletForm) -> Result<()> {
        let on_text_field = self.focused_text_field().is_some();

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
            KeyCode::Enter => match self.focus {
                WalletFocus::Submit => {
                    self.action_tx.send(Action::CreateWallet)?;
                }
                WalletFocus::Field(WalletField::AccountType) => {
                    Self::toggle_account_type(form);
                }
                _ => {
                    self.is_editing = !self.is_editing;
                }
            },
            KeyCode::Left | KeyCode::Right | KeyCode::Char(' ')
                if self.focus == WalletFocus::Field(WalletField::AccountType) =>
            {
                Self::toggle_account_type(form);
            }
            KeyCode::Char(c) => {
                if self.is_editing && on_text_field {
                    self.handle_char(c, form);
                } else if !self.is_editing {
                    match c {
                        'j' => self.focus = self.focus.next(),
                        'k' => self.focus = self.focus.prev(),
                        'c' => {
                            form.reset();
                            self.focus = WalletFocus::Field(WalletField::FullName);
                        }
                        'e' if on_text_field => self.is_editing = true,
                        _ => {}
                    }
                }
            }
            KeyCode::Backspace => {
                if self.is_editing
                    && let Some(field) = self.focused_text_field()
                {
                    form.value_mut(field).pop();
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn draw(&self, f: &mut Frame, area: Rect, form: &WalletForm, palette: &Palette) {
        let chunks = Layout::vertical([
            Constraint::Length(3), // Full name
            Constraint::Length(3), // CPF
            Constraint::Length(3), // Email
            Constraint::Length(3), // Password
            Constraint::Length(3), // Account type
            Constraint::Length(3), // Initial balance
            Constraint::Length(3), // Submit
            Constraint::Min(0),    // Help
        ])
        .split(area);

        for (i, field) in WalletField::ALL.into_iter().enumerate() {
            let focused = self.focus == WalletFocus::Field(field);
            let type_display;
            let value = if field == WalletField::AccountType {
                let code = parse_int_prefix(&form.account_type).unwrap_or(USER);
                type_display = match AccountType::from_code(code) {
                    Some(kind) => format!("◀ {} ▶", kind.label()),
                    None => format!("◀ Tipo {code} ▶"),
                };
                type_display.as_str()
            } else {
                form.value(field)
            };

            draw_input(
                f,
                chunks[i],
                InputView {
                    label: field.label(),
                    value,
                    placeholder: placeholder(field),
                    focused,
                    editing: self.is_editing,
                    masked: field == WalletField::Password,
                },
                palette,
            );
        }

        draw_submit(
            f,
            chunks[6],
            "Criar Carteira",
            self.focus == WalletFocus::Submit,
            form.is_valid(),
            palette,
        );

        let help = Paragraph::new(vec![
            Line::from(Span::styled(help_line(self.is_editing), palette.muted())),
            Line::from(Span::styled(
                "[Space/←/→ on Tipo de conta] Switch between Lojista and Usuário",
                palette.muted(),
            )),
        ])
        .block(
            Block::default()
                .title("Help")
                .borders(Borders::ALL)
                .border_style(palette.border(false)),
        );
        f.render_widget(help, chunks[7]);
    }
}

fn placeholder(field: WalletField) -> &'static str {
    match field {
        WalletField::FullName => "Nome e sobrenome",
        WalletField::Cpf => "000.000.000-00",
        WalletField::Email => "voce@exemplo.com",
        WalletField::Password => "Senha de acesso",
        WalletField::AccountType => "",
        WalletField::InitialBalance => "0,00",
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_typing_into_fields() {
        let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
        let mut component = CreateWalletComponent::new(tx);
        let mut form = WalletForm::default();

        component.handle_key_event(key(KeyCode::Enter), &mut form).unwrap();
        for c in "Ana".chars() {
            component.handle_key_event(key(KeyCode::Char(c)), &mut form).unwrap();
        }
        component.handle_key_event(key(KeyCode::Backspace), &mut form).unwrap();
        assert_eq!(form.full_name, "An");

        // Balance field only takes digits and one separator.
        component.focus = WalletFocus::Field(WalletField::InitialBalance);
        component.is_editing = true;
        form.initial_balance.clear();
        for c in "1a2.5.0".chars() {
            component.handle_key_event(key(KeyCode::Char(c)), &mut form).unwrap();
        }
        assert_eq!(form.initial_balance, "12.50");
    }

    #[test]
    fn test_balance_digit_replaces_default() {
        let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
        let mut component = CreateWalletComponent::new(tx);
        let mut form = WalletForm::default();
        component.focus = WalletFocus::Field(WalletField::InitialBalance);
        component.is_editing = true;

        component.handle_key_event(key(KeyCode::Char('5')), &mut form).unwrap();
        assert_eq!(form.initial_balance, "5");

        form.reset();
        for c in ",5".chars() {
            component.handle_key_event(key(KeyCode::Char(c)), &mut form).unwrap();
        }
        assert_eq!(form.initial_balance, "0,5");
    }

    #[test]
    fn test_account_type_toggles() {
        let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
        let mut component = CreateWalletComponent::new(tx);
        let mut form = WalletForm::default();
        component.focus = WalletFocus::Field(WalletField::AccountType);

        component.handle_key_event(key(KeyCode::Char(' ')), &mut form).unwrap();
        assert_eq!(form.account_type, "1");
        component.handle_key_event(key(KeyCode::Enter), &mut form).unwrap();
        assert_eq!(form.account_type, "0");
        assert!(!component.is_editing);
    }

    #[test]
    fn test_submit_sends_action() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let mut component = CreateWalletComponent::new(tx);
        let mut form = WalletForm::default();
        component.focus = WalletFocus::Field(WalletField::InitialBalance);

        component.handle_key_event(key(KeyCode::Down), &mut form).unwrap();
        assert_eq!(component.focus, WalletFocus::Submit);
        component.handle_key_event(key(KeyCode::Enter), &mut form).unwrap();
        assert_eq!(rx.try_recv().unwrap(), Action::CreateWallet);
    }
}
