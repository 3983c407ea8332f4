use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use picpay_tui::{
    config::Config,
    controller::{self, Command, WalletView},
    infra::{api::HttpWalletApi, store::Store},
};
use ratatui::{
    layout::{Constraint, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

use crate::{
    action::Action,
    cli::Args,
    components::{
        Component, create_wallet::CreateWalletComponent, palette::Palette,
        transfer::TransferComponent, wallets::WalletsComponent,
    },
    tui::{Event, Tui},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Wallets,
    CreateWallet,
    Transfer,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Wallets, Tab::CreateWallet, Tab::Transfer];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Wallets => "1 Carteiras",
            Tab::CreateWallet => "2 Criar Carteira",
            Tab::Transfer => "3 Transferir",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Tab::Wallets => 0,
            Tab::CreateWallet => 1,
            Tab::Transfer => 2,
        }
    }

    pub fn from_index(index: usize) -> Tab {
        Self::ALL[index % Self::ALL.len()]
    }
}

pub struct App {
    pub should_quit: bool,
    pub should_suspend: bool,
    pub config: Config,
    pub active_tab: Tab,
    pub action_tx: UnboundedSender<Action>,
    pub action_rx: UnboundedReceiver<Action>,
    pub tui: Tui,
    pub api: HttpWalletApi,
    pub view: WalletView,
    pub wallets_component: WalletsComponent,
    pub create_wallet_component: CreateWalletComponent,
    pub transfer_component: TransferComponent,
    pub status_message: String,
}

impl App {
    pub fn new(args: &Args) -> Result<Self> {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let config = Config::new(args.api_url.as_deref(), args.insecure);
        let api = HttpWalletApi::new(config.clone())?;
        let store = Store::new()?;
        let view = WalletView::new(Box::new(store));

        let tui = Tui::new()?
            .tick_rate(args.tick_rate)
            .frame_rate(args.frame_rate)
            .paste(true);

        Ok(Self {
            should_quit: false,
            should_suspend: false,
            config,
            active_tab: Tab::Wallets,
            wallets_component: WalletsComponent::new(action_tx.clone()),
            create_wallet_component: CreateWalletComponent::new(action_tx.clone()),
            transfer_component: TransferComponent::new(action_tx.clone()),
            action_tx,
            action_rx,
            tui,
            api,
            view,
            status_message: "Ready".to_string(),
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        self.tui.enter()?;

        info!("Using wallet service at {}", self.api.base_url());
        let command = self.view.init();
        self.dispatch(command);

        loop {
            // Handle events
            if let Some(event) = self.tui.next().await {
                self.handle_event(event)?;
            }

            // Handle actions
            while let Ok(action) = self.action_rx.try_recv() {
                self.handle_action(action)?;
            }

            if self.should_suspend {
                self.tui.suspend()?;
                self.should_suspend = false;
                self.tui.resume()?;
            }

            if self.should_quit {
                break;
            }
        }

        self.tui.exit()?;
        Ok(())
    }

    /// Run a command on the runtime; its outcome comes back as
    /// [`Action::Completed`].
    fn dispatch(&self, command: Command) {
        debug!("Dispatching {:?}", command);
        let api = self.api.clone();
        let action_tx = self.action_tx.clone();
        tokio::spawn(async move {
            let outcome = controller::dispatch(&api, command).await;
            if action_tx.send(Action::Completed(outcome)).is_err() {
                debug!("App closed before the request finished");
            }
        });
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        match event {
            Event::Tick => {
                self.action_tx.send(Action::Tick)?;
            }
            Event::Render | Event::Resize(_, _) => {
                self.draw_ui()?;
            }
            Event::Key(key_event) => {
                self.handle_key_event(key_event)?;
            }
            Event::Paste(text) => {
                self.handle_paste(&text);
            }
            Event::Init => {
                info!("Application initialized");
            }
            Event::Error => {}
        }
        Ok(())
    }

    fn is_editing(&self) -> bool {
        match self.active_tab {
            Tab::Wallets => false,
            Tab::CreateWallet => self.create_wallet_component.is_editing(),
            Tab::Transfer => self.transfer_component.is_editing(),
        }
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.action_tx.send(Action::Quit)?;
            return Ok(());
        }

        if self.is_editing() {
            return self.forward_key(key);
        }

        match key.code {
            KeyCode::Char('q') if key.modifiers.is_empty() => {
                self.action_tx.send(Action::Quit)?;
            }
            KeyCode::Char('z') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.action_tx.send(Action::Suspend)?;
            }
            KeyCode::Char('t') if key.modifiers.is_empty() => {
                self.action_tx.send(Action::ToggleTheme)?;
            }
            KeyCode::Char('r') if key.modifiers.is_empty() => {
                self.action_tx.send(Action::LoadWallets)?;
            }
            KeyCode::Char('1') => {
                self.action_tx.send(Action::TabWallets)?;
            }
            KeyCode::Char('2') => {
                self.action_tx.send(Action::TabCreateWallet)?;
            }
            KeyCode::Char('3') => {
                self.action_tx.send(Action::TabTransfer)?;
            }
            KeyCode::Tab => {
                self.active_tab = Tab::from_index(self.active_tab.index() + 1);
            }
            KeyCode::BackTab => {
                self.active_tab = Tab::from_index(self.active_tab.index() + Tab::ALL.len() - 1);
            }
            _ => self.forward_key(key)?,
        }
        Ok(())
    }

    fn forward_key(&mut self, key: KeyEvent) -> Result<()> {
        match self.active_tab {
            Tab::Wallets => self
                .wallets_component
                .handle_key_event(key, &mut self.view.wallets),
            Tab::CreateWallet => self
                .create_wallet_component
                .handle_key_event(key, &mut self.view.wallet_form),
            Tab::Transfer => self
                .transfer_component
                .handle_key_event(key, &mut self.view.transfer_form),
        }
    }

    fn handle_paste(&mut self, text: &str) {
        match self.active_tab {
            Tab::CreateWallet => self
                .create_wallet_component
                .paste(text, &mut self.view.wallet_form),
            Tab::Transfer => self
                .transfer_component
                .paste(text, &mut self.view.transfer_form),
            Tab::Wallets => {}
        }
    }

    fn handle_action(&mut self, action: Action) -> Result<()> {
        if action != Action::Tick {
            debug!("Handling action: {}", action);
        }
        match action {
            Action::Tick => {}
            Action::Quit => {
                self.should_quit = true;
            }
            Action::Suspend => {
                self.should_suspend = true;
            }
            Action::TabWallets => self.active_tab = Tab::Wallets,
            Action::TabCreateWallet => self.active_tab = Tab::CreateWallet,
            Action::TabTransfer => self.active_tab = Tab::Transfer,
            Action::LoadWallets => {
                let command = self.view.load_wallets();
                self.dispatch(command);
            }
            Action::CreateWallet => {
                if let Some(command) = self.view.on_create_wallet() {
                    self.dispatch(command);
                }
            }
            Action::Transfer => {
                if let Some(command) = self.view.on_transfer() {
                    self.dispatch(command);
                }
            }
            Action::Completed(outcome) => {
                if let Some(command) = self.view.apply(outcome) {
                    self.dispatch(command);
                }
            }
            Action::ToggleTheme => match self.view.toggle_theme() {
                Ok(theme) => {
                    self.status_message = format!("Tema {}", theme_name(theme.is_dark()));
                }
                Err(e) => {
                    warn!("Failed to save theme preference: {}", e);
                    self.status_message = format!("Falha ao salvar tema: {}", e);
                }
            },
            Action::UseAsPayer(index) => {
                if self.view.use_as_payer(index) {
                    self.status_message = "Pagador definido na transferência".to_string();
                } else {
                    self.status_message = "Carteira sem ID".to_string();
                }
            }
            Action::UseAsPayee(index) => {
                if self.view.use_as_payee(index) {
                    self.status_message = "Recebedor definido na transferência".to_string();
                } else {
                    self.status_message = "Carteira sem ID".to_string();
                }
            }
        }
        Ok(())
    }

    fn draw_ui(&mut self) -> Result<()> {
        let Self {
            tui,
            view,
            config,
            active_tab,
            status_message,
            wallets_component,
            create_wallet_component,
            transfer_component,
            ..
        } = self;
        let palette = Palette::for_theme(view.theme());
        let active_tab = *active_tab;

        tui.draw(|f| {
            // Theme background covers the whole frame
            f.render_widget(Block::default().style(palette.base()), f.area());

            let chunks = Layout::vertical([
                Constraint::Length(3), // Header
                Constraint::Length(3), // Tabs
                Constraint::Min(0),    // Content
                Constraint::Length(3), // Status
            ])
            .split(f.area());

            let mut header_spans = vec![
                Span::styled(
                    "PicPay Simplificado",
                    Style::default()
                        .fg(palette.accent)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled(format!("[{}]", config.api.base_url), palette.muted()),
                Span::raw("  "),
                Span::styled(
                    format!("Tema: {}", theme_name(view.is_dark_mode())),
                    palette.muted(),
                ),
            ];
            if view.loading {
                header_spans.push(Span::raw("  "));
                header_spans.push(Span::styled(
                    "Carregando...",
                    Style::default()
                        .fg(palette.editing)
                        .add_modifier(Modifier::BOLD),
                ));
            }
            let header = Paragraph::new(Line::from(header_spans)).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(palette.border(false)),
            );
            f.render_widget(header, chunks[0]);

            let tabs = Tabs::new(Tab::ALL.iter().map(|t| t.title()))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(palette.border(false)),
                )
                .select(active_tab.index())
                .style(palette.text())
                .highlight_style(
                    Style::default()
                        .fg(palette.accent)
                        .add_modifier(Modifier::BOLD),
                );
            f.render_widget(tabs, chunks[1]);

            match active_tab {
                Tab::Wallets => wallets_component.draw(f, chunks[2], &view.wallets, &palette),
                Tab::CreateWallet => {
                    create_wallet_component.draw(f, chunks[2], &view.wallet_form, &palette)
                }
                Tab::Transfer => {
                    transfer_component.draw(f, chunks[2], &view.transfer_form, &palette)
                }
            }

            let status = if let Some(err) = &view.error_message {
                Span::styled(err.clone(), Style::default().fg(palette.error))
            } else if let Some(success) = &view.success_message {
                Span::styled(success.clone(), Style::default().fg(palette.success))
            } else {
                Span::styled(status_message.clone(), palette.text())
            };
            let status_widget = Paragraph::new(Line::from(vec![
                status,
                Span::raw("  "),
                Span::styled("[t] Tema  [r] Recarregar  [q] Sair", palette.muted()),
            ]))
            .block(
                Block::default()
                    .title("Status")
                    .borders(Borders::ALL)
                    .border_style(palette.border(false)),
            );
            f.render_widget(status_widget, chunks[3]);
        })?;
        Ok(())
    }
}

fn theme_name(dark: bool) -> &'static str {
    if dark { "escuro" } else { "claro" }
}
