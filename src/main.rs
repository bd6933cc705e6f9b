//! Meso: SPC outlooks and NWS forecasts for one location, in the terminal.

mod app;
mod cli;
mod config;
mod constants;
mod core;
mod event;
mod logging;
mod message;
mod state;
mod theme;
mod ui;
mod utils;

use std::path::{Path, PathBuf};

use clap::Parser;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use ratatui::DefaultTerminal;

use crate::app::App;
use crate::cli::args::{Args, Commands};
use crate::cli::commands;
use crate::config::{Config, Overrides};
use crate::core::feed::{self, FeedSettings};
use crate::event::{Event, EventHandler};

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let (config_dir, dir_source) = utils::resolve_config_dir(args.config_dir.as_deref());
    let overrides = args.overrides();
    let loaded = load_config(&config_dir, &overrides);

    let Some(command) = args.command else {
        return run_tui(loaded?, config_dir);
    };

    // A bad config.toml only fails the commands that fetch feeds.
    let log_level = loaded
        .as_ref()
        .map_or(constants::DEFAULT_LOG_LEVEL, |c| c.log_level.as_str());
    logging::init_stderr(log_level)?;
    tracing::debug!(dir = %config_dir.display(), source = dir_source, "config directory");

    match command {
        Commands::Risk { json } => commands::risk(&loaded?, json),
        Commands::Daycast { json } => commands::daycast(&loaded?, json),
        Commands::Products => {
            commands::list_products();
            Ok(())
        }
        Commands::Open { product } => commands::open_product(&product),
        Commands::Config { action } => commands::run_config(action, &config_dir, &overrides),
    }
}

/// Loads config.toml, applies command-line overrides and validates the result.
fn load_config(config_dir: &Path, overrides: &Overrides) -> Result<Config> {
    let mut config = Config::load(config_dir)?;
    config.apply_overrides(overrides);
    config
        .validate()
        .wrap_err("Invalid configuration (check config.toml and command-line flags)")?;
    Ok(config)
}

fn run_tui(config: Config, config_dir: PathBuf) -> Result<()> {
    let log_path = logging::init_file(&config_dir, &config.log_level)?;
    tracing::info!(
        version = constants::APP_VERSION,
        log = %log_path.display(),
        location = %config.location.name,
        "starting dashboard"
    );

    let mut terminal = ratatui::init();
    let result = run_dashboard(&mut terminal, App::new(config, config_dir));
    ratatui::restore();

    if let Err(ref e) = result {
        tracing::error!(error = %e, "dashboard exited with error");
    }
    result
}

fn run_dashboard(terminal: &mut DefaultTerminal, mut app: App) -> Result<()> {
    let events = EventHandler::new(app.config.tick_rate_ms);
    let feed = feed::spawn_feed_worker(FeedSettings::from_config(&app.config), events.sender());
    app.attach_feed(feed);

    while !app.should_quit {
        terminal.draw(|frame| ui::render(frame, &mut app))?;
        match events.next()? {
            Event::Key(key) => app.handle_key(key),
            Event::Tick => app.on_tick(),
            Event::Feed(update) => app.handle_feed(update),
            Event::Resize(_, _) => {}
        }
    }

    tracing::info!("dashboard closed");
    Ok(())
}
