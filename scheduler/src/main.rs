mod config;
mod scenario;
mod viewer;

use crossterm::{
    execute,
    terminal::{Clear, ClearType},
};
use std::{fs::File, io, process, sync::Mutex};
use tracing::info;
use tracing_subscriber::EnvFilter;
use viewer::{App, SimulationRunner};

fn main() -> Result<(), io::Error> {
    let config = match config::parse_args() {
        Ok(config) => config,
        Err(message) => {
            eprintln!("{message}");
            process::exit(1);
        }
    };

    // The terminal belongs to the viewer, so logs go to a file
    let log_file = File::create(&config.log_file)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("SIM_LOG").unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .init();

    let app = App::new(config).map_err(io::Error::other)?;
    info!(seed = ?app.config().seed, "starting viewer");

    execute!(io::stdout(), Clear(ClearType::All))?;
    let mut runner = SimulationRunner::new(app)?;

    while runner.run() {}

    drop(runner);
    execute!(io::stdout(), Clear(ClearType::All))?;
    Ok(())
}
