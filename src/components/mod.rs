pub mod create_wallet;
pub mod input;
pub mod palette;
pub mod transfer;
pub mod wallets;

use color_eyre::eyre::Result;
use crossterm::event::KeyEvent;
use ratatui::layout::Rect;

use crate::tui::Frame;
use palette::Palette;

/// A screen section. The data it edits or displays lives in the view
/// controller and is lent to the component for each call.
pub trait Component {
    type State;

    fn handle_key_event(&mut self, key: KeyEvent, state: &mut Self::State) -> Result<()>;
    fn draw(&self, f: &mut Frame, area: Rect, state: &Self::State, palette: &Palette);

    /// Whether the component currently captures all key input.
    fn is_editing(&self) -> bool {
        false
    }

    fn paste(&mut self, _text: &str, _state: &mut Self::State) {}
}
