use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "picpay-tui")]
#[command(version)]
#[command(about = "A TUI client for creating wallets and transferring funds")]
pub struct Args {
    /// Tick rate in ticks per second
    #[arg(short, long, default_value_t = 4.0)]
    pub tick_rate: f64,

    /// Frame rate in frames per second
    #[arg(short, long, default_value_t = 30.0)]
    pub frame_rate: f64,

    /// Wallet service base URL (defaults to https://localhost:7192)
    #[arg(long)]
    pub api_url: Option<String>,

    /// Accept invalid TLS certificates, e.g. the local dev certificate
    #[arg(long)]
    pub insecure: bool,

    /// Data directory path
    #[arg(long)]
    pub data_dir: Option<String>,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
