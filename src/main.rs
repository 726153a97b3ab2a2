mod app;
mod config;
mod controls;
mod geometry;
mod gesture;
mod input;
mod overlay;
mod state;
mod system;

use std::thread;

use anyhow::Result;
use signal_hook::consts::{SIGINT, SIGTERM};
use signal_hook::iterator::Signals;

fn main() -> Result<()> {
    init_tracing();

    let settings = config::load_settings()?;
    let events = input::start_stdin_source();
    let mut app = app::App::new(settings, events)?;

    let (shutdown_tx, shutdown_rx) = crossbeam_channel::bounded(1);
    let mut signals = Signals::new([SIGINT, SIGTERM])?;
    thread::spawn(move || {
        if signals.forever().next().is_some() {
            let _ = shutdown_tx.send(());
        }
    });
    app.set_shutdown_channel(shutdown_rx);

    app.run()
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true)
        .compact()
        .try_init();
}
