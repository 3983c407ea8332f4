use picpay_tui::controller::Outcome;
use strum::Display;

/// Actions that can be triggered by user input or internal events.
#[derive(Debug, Clone, PartialEq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Action {
    Tick,
    Suspend,
    Quit,

    // Tab switching
    TabWallets,
    TabCreateWallet,
    TabTransfer,

    // View operations
    LoadWallets,
    CreateWallet,
    Transfer,
    ToggleTheme,
    UseAsPayer(usize),
    UseAsPayee(usize),

    /// An API call finished.
    Completed(Outcome),
}
