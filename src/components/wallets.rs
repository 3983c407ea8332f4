//! Wallet list with a detail panel.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use picpay_tui::domain::wallet::Wallet;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use tokio::sync::mpsc::UnboundedSender;

use crate::{action::Action, tui::Frame};

use super::{Component, palette::Palette};

pub struct WalletsComponent {
    action_tx: UnboundedSender<Action>,
    pub selected_index: usize,
}

impl WalletsComponent {
    pub fn new(action_tx: UnboundedSender<Action>) -> Self {
        Self {
            action_tx,
            selected_index: 0,
        }
    }

    /// Selected row, clamped to a list that may have shrunk since.
    fn selected(&self, len: usize) -> usize {
        self.selected_index.min(len.saturating_sub(1))
    }

    fn next(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.selected_index = (self.selected_index.min(len - 1) + 1) % len;
    }

    fn previous(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let current = self.selected_index.min(len - 1);
        self.selected_index = if current == 0 { len - 1 } else { current - 1 };
    }
}

impl Component for WalletsComponent {
    type State = Vec<Wallet>;

    fn handle_key_event(&mut self, key: KeyEvent, wallets: &mut Vec<Wallet>) -> Result<()> {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.next(wallets.len()),
            KeyCode::Up | KeyCode::Char('k') => self.previous(wallets.len()),
            KeyCode::Char('p') if !wallets.is_empty() => {
                let index = self.selected(wallets.len());
                self.action_tx.send(Action::UseAsPayer(index))?;
            }
            KeyCode::Char('y') if !wallets.is_empty() => {
                let index = self.selected(wallets.len());
                self.action_tx.send(Action::UseAsPayee(index))?;
            }
            _ => {}
        }
        Ok(())
    }

    fn draw(&self, f: &mut Frame, area: Rect, wallets: &Vec<Wallet>, palette: &Palette) {
        let chunks = Layout::horizontal([Constraint::Length(44), Constraint::Min(0)]).split(area);
        let selected_index = self.selected(wallets.len());

        let items: Vec<ListItem> = wallets
            .iter()
            .map(|wallet| {
                let kind_style = if wallet.is_shopkeeper() {
                    Style::default().fg(palette.editing)
                } else {
                    palette.muted()
                };
                ListItem::new(Line::from(vec![
                    Span::styled(wallet.full_name.clone(), palette.text()),
                    Span::raw(" "),
                    Span::styled(format!("[{}]", wallet.type_label()), kind_style),
                    Span::raw(" - "),
                    Span::styled(format_brl(wallet.balance), Style::default().fg(palette.success)),
                ]))
            })
            .collect();

        let mut list_state = ListState::default();
        if !wallets.is_empty() {
            list_state.select(Some(selected_index));
        }

        let list = List::new(items)
            .block(
                Block::default()
                    .title(format!("Carteiras ({})", wallets.len()))
                    .borders(Borders::ALL)
                    .border_style(palette.border(true)),
            )
            .highlight_style(palette.selected())
            .highlight_symbol("> ");

        f.render_stateful_widget(list, chunks[0], &mut list_state);

        let right_chunks =
            Layout::vertical([Constraint::Min(0), Constraint::Length(3)]).split(chunks[1]);

        let field = |label: &'static str, value: String| {
            Line::from(vec![
                Span::styled(label, palette.muted()),
                Span::styled(value, palette.text()),
            ])
        };

        let details = match wallets.get(selected_index) {
            Some(wallet) => vec![
                field("Nome: ", wallet.full_name.clone()),
                Line::from(""),
                field("ID: ", wallet.id.clone().unwrap_or_else(|| "-".to_string())),
                field("CPF: ", wallet.cpf.clone()),
                field("Email: ", wallet.email.clone()),
                field("Tipo: ", wallet.type_label()),
                Line::from(""),
                Line::from(vec![
                    Span::styled("Saldo: ", palette.muted()),
                    Span::styled(
                        format_brl(wallet.balance),
                        Style::default()
                            .fg(palette.success)
                            .add_modifier(Modifier::BOLD),
                    ),
                ]),
            ],
            None => vec![
                Line::from(Span::styled(
                    "Nenhuma carteira cadastrada",
                    Style::default().fg(palette.editing),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    "Crie uma carteira na aba Criar Carteira (2).",
                    palette.muted(),
                )),
            ],
        };

        let details_widget = Paragraph::new(details).block(
            Block::default()
                .title("Detalhes")
                .borders(Borders::ALL)
                .border_style(palette.border(false)),
        );
        f.render_widget(details_widget, right_chunks[0]);

        let help_widget = Paragraph::new(Line::from(Span::styled(
            "Up/Down: Navigate | p: Use as payer | y: Use as payee | r: Reload",
            palette.muted(),
        )))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(palette.border(false)),
        );
        f.render_widget(help_widget, right_chunks[1]);
    }
}

/// Format an amount in reais, e.g. `R$ 1.234,56`.
pub fn format_brl(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (int, frac) = fixed.split_once('.').unwrap_or((&fixed, "00"));

    let mut grouped = String::with_capacity(int.len() + int.len() / 3);
    for (i, c) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}R$ {grouped},{frac}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_brl() {
        assert_eq!(format_brl(0.0), "R$ 0,00");
        assert_eq!(format_brl(12.5), "R$ 12,50");
        assert_eq!(format_brl(1234.567), "R$ 1.234,57");
        assert_eq!(format_brl(1_000_000.0), "R$ 1.000.000,00");
        assert_eq!(format_brl(-3.0), "-R$ 3,00");
    }

    #[test]
    fn test_selection_wraps() {
        let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
        let mut component = WalletsComponent::new(tx);
        component.next(3);
        component.next(3);
        component.next(3);
        assert_eq!(component.selected_index, 0);
        component.previous(3);
        assert_eq!(component.selected_index, 2);
        component.next(0);
        assert_eq!(component.selected_index, 2);
    }

    #[test]
    fn test_shortcuts_use_row_still_on_screen() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let mut component = WalletsComponent::new(tx);
        component.selected_index = 4;
        let mut wallets: Vec<Wallet> = ["w1", "w2"]
            .into_iter()
            .map(|id| Wallet {
                id: Some(id.to_string()),
                full_name: id.to_uppercase(),
                cpf: "000".into(),
                email: format!("{id}@x.com"),
                account_type: 1,
                balance: 0.0,
            })
            .collect();

        let press = |c| KeyEvent::new(KeyCode::Char(c), crossterm::event::KeyModifiers::NONE);
        component.handle_key_event(press('p'), &mut wallets).unwrap();
        component.handle_key_event(press('y'), &mut wallets).unwrap();
        assert_eq!(rx.try_recv().unwrap(), Action::UseAsPayer(1));
        assert_eq!(rx.try_recv().unwrap(), Action::UseAsPayee(1));
    }
}
