//! View controller for the wallet screen.
//!
//! Every operation is split in two: a method that validates, raises the
//! busy flag and hands back a [`Command`], and [`WalletView::apply`], which
//! folds the [`Outcome`] of that command back into the view. The caller is
//! responsible for running commands (see [`dispatch`]); this keeps the view
//! state owned by a single event loop while requests are in flight.

use color_eyre::eyre::Result;
use tracing::{debug, info, warn};

use crate::{
    domain::{
        forms::{TransferForm, WalletForm},
        theme::{THEME_KEY, Theme},
        wallet::{TransferRequest, Wallet, WalletCreationRequest, WalletRecord},
    },
    infra::{
        api::{ApiError, ApiResult, WalletApi},
        store::PreferenceStore,
    },
};

pub const WALLET_CREATED: &str = "Carteira criada com sucesso!";
pub const WALLET_CREATE_FAILED: &str = "Erro ao criar carteira. Tente novamente.";
pub const TRANSFER_COMPLETED: &str = "Transferência realizada com sucesso!";
pub const TRANSFER_FAILED: &str = "Erro ao realizar transferência. Tente novamente.";
pub const WALLETS_LOAD_FAILED: &str = "Erro ao carregar carteiras. Tente novamente.";

/// A remote call the view wants performed.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    LoadWallets,
    CreateWallet(WalletCreationRequest),
    Transfer(TransferRequest),
}

/// Result of running a [`Command`].
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    WalletsLoaded(ApiResult<Vec<WalletRecord>>),
    WalletCreated(ApiResult<()>),
    Transferred(ApiResult<()>),
}

/// Run a command against the API.
pub async fn dispatch<A: WalletApi>(api: &A, command: Command) -> Outcome {
    match command {
        Command::LoadWallets => Outcome::WalletsLoaded(api.list_wallets().await),
        Command::CreateWallet(request) => Outcome::WalletCreated(api.create_wallet(&request).await),
        Command::Transfer(request) => Outcome::Transferred(api.transfer(&request).await),
    }
}

pub struct WalletView {
    pub wallet_form: WalletForm,
    pub transfer_form: TransferForm,
    pub wallets: Vec<Wallet>,
    /// Single busy flag shared by every operation.
    pub loading: bool,
    pub success_message: Option<String>,
    pub error_message: Option<String>,
    theme: Theme,
    preferences: Box<dyn PreferenceStore>,
}

impl WalletView {
    pub fn new(preferences: Box<dyn PreferenceStore>) -> Self {
        Self {
            wallet_form: WalletForm::default(),
            transfer_form: TransferForm::default(),
            wallets: Vec::new(),
            loading: false,
            success_message: None,
            error_message: None,
            theme: Theme::default(),
            preferences,
        }
    }

    /// Startup: load the first wallet list and restore the saved theme.
    pub fn init(&mut self) -> Command {
        let command = self.load_wallets();
        self.load_theme_preference();
        command
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn is_dark_mode(&self) -> bool {
        self.theme.is_dark()
    }

    /// Apply the persisted theme, falling back to light.
    pub fn load_theme_preference(&mut self) {
        let saved = match self.preferences.get(THEME_KEY) {
            Ok(saved) => saved,
            Err(e) => {
                warn!("Failed to read theme preference: {}", e);
                None
            }
        };
        self.theme = Theme::from_preference(saved.as_deref());
        info!("Applied {} theme", self.theme);
    }

    /// Flip the theme and persist it. The new theme stays applied even if
    /// persisting fails. Clears any previous success message.
    pub fn toggle_theme(&mut self) -> Result<Theme> {
        self.success_message = None;
        self.theme = self.theme.toggled();
        debug!("Switched to {} theme", self.theme);
        self.preferences.set(THEME_KEY, self.theme.as_str())?;
        Ok(self.theme)
    }

    pub fn load_wallets(&mut self) -> Command {
        self.loading = true;
        self.error_message = None;
        Command::LoadWallets
    }

    /// Submit the wallet form. Returns `None` without touching any message
    /// when the form is invalid.
    pub fn on_create_wallet(&mut self) -> Option<Command> {
        let request = match self.wallet_form.to_request() {
            Ok(request) => request,
            Err(e) => {
                debug!("Wallet form rejected: {}", e);
                return None;
            }
        };
        self.begin_submit();
        Some(Command::CreateWallet(request))
    }

    /// Submit the transfer form. Invalid forms are ignored silently.
    pub fn on_transfer(&mut self) -> Option<Command> {
        let request = match self.transfer_form.to_request() {
            Ok(request) => request,
            Err(e) => {
                debug!("Transfer form rejected: {}", e);
                return None;
            }
        };
        self.begin_submit();
        Some(Command::Transfer(request))
    }

    /// Fold a command's outcome into the view. A successful submission
    /// returns the wallet reload it triggers.
    pub fn apply(&mut self, outcome: Outcome) -> Option<Command> {
        match outcome {
            Outcome::WalletsLoaded(Ok(records)) => {
                self.wallets = records.into_iter().map(Wallet::from).collect();
                info!("Loaded {} wallets", self.wallets.len());
                self.loading = false;
                None
            }
            Outcome::WalletsLoaded(Err(e)) => {
                self.fail(&e, WALLETS_LOAD_FAILED);
                None
            }
            Outcome::WalletCreated(Ok(())) => {
                self.success_message = Some(WALLET_CREATED.to_string());
                self.wallet_form.reset();
                Some(self.load_wallets())
            }
            Outcome::WalletCreated(Err(e)) => {
                self.fail(&e, WALLET_CREATE_FAILED);
                None
            }
            Outcome::Transferred(Ok(())) => {
                self.success_message = Some(TRANSFER_COMPLETED.to_string());
                self.transfer_form.reset();
                Some(self.load_wallets())
            }
            Outcome::Transferred(Err(e)) => {
                self.fail(&e, TRANSFER_FAILED);
                None
            }
        }
    }

    /// Copy the id of the wallet at `index` into the payer field.
    pub fn use_as_payer(&mut self, index: usize) -> bool {
        self.success_message = None;
        match self.wallets.get(index).and_then(|w| w.id.clone()) {
            Some(id) => {
                self.transfer_form.payer_id = id;
                true
            }
            None => false,
        }
    }

    /// Copy the id of the wallet at `index` into the payee field.
    pub fn use_as_payee(&mut self, index: usize) -> bool {
        self.success_message = None;
        match self.wallets.get(index).and_then(|w| w.id.clone()) {
            Some(id) => {
                self.transfer_form.payee_id = id;
                true
            }
            None => false,
        }
    }

    fn begin_submit(&mut self) {
        self.loading = true;
        self.error_message = None;
        self.success_message = None;
    }

    fn fail(&mut self, error: &ApiError, fallback: &str) {
        warn!("API call failed: {}", error);
        // An empty server message counts as no message.
        self.error_message = Some(
            error
                .message
                .clone()
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| fallback.to_string()),
        );
        self.loading = false;
    }
}
