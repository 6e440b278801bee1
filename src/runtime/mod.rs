use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use crate::config::Settings;
use crate::library::load_catalog;
use crate::playback::Session;
use crate::progress::LogProgress;
use crate::remote::LibrarySource;

use cli::{Cli, Command};
use console::{AnnounceAdapter, ConsoleHost};

mod cli;
mod console;
mod event_loop;
mod logging;
mod settings;
mod startup;


pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    let (mut settings, config_problem) = settings::load_settings();
    logging::init(&settings.logging);
    if let Some(problem) = config_problem {
        warn!("{problem}");
    }
    startup::apply_overrides(&mut settings, &cli);

    let command = cli.command.clone().unwrap_or_default();
    if command == Command::Config {
        print!("{}", settings.to_toml().context("failed to render settings")?);
        return Ok(());
    }

    let source = startup::build_source(&mut settings, &cli)
        .context("failed to set up the music library source")?;
    info!(
        source = %source.describe(),
        root = %settings.library.root_path,
        "music library"
    );

    match command {
        Command::Scan { json } => scan(&source, &settings, json).await,
        Command::Play | Command::Config => play(&source, &settings).await,
    }
}

async fn scan(source: &LibrarySource, settings: &Settings, json: bool) -> Result<()> {
    let playlist = load_catalog(source, &settings.library, &LogProgress)
        .await
        .context("music library scan failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&playlist)?);
    } else {
        print!("{}", console::render_playlist(&playlist, None));
    }
    Ok(())
}

async fn play(source: &LibrarySource, settings: &Settings) -> Result<()> {
    let mut session = Session::new(AnnounceAdapter::default(), ConsoleHost, &settings.playback);

    // A failed first scan leaves an empty session; `refresh` can retry.
    if session.refresh(source, &settings.library).await.is_ok() && settings.playback.shuffle {
        session.toggle_shuffle();
    }

    event_loop::run(&mut session, source, &settings.library).await
}
