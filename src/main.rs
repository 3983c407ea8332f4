use color_eyre::Result;

mod action;
mod app;
mod cli;
mod components;
mod errors;
mod logging;
mod tui;

fn main() -> Result<()> {
    errors::install_hooks()?;

    let args = cli::Args::parse_args();

    if let Some(ref data_dir) = args.data_dir {
        // SAFETY: the tokio runtime is not built yet, so no other threads exist
        unsafe {
            std::env::set_var("PICPAY_TUI_DATA", data_dir);
        }
    }

    logging::init()?;

    tokio::runtime::Runtime::new()?.block_on(async {
        let mut app = app::App::new(&args)?;
        app.run().await
    })
}
