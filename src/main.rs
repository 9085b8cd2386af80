//! surface-tui - attack-surface dashboard for the terminal
//!
//! Shows the detail report by category and lets the user request a rescan.

mod action;
mod app;
mod component;
mod components;
mod config;
mod error;
mod logging;
mod model;
mod services;
mod tui;

use crate::action::Action;
use crate::app::App;
use crate::component::Component;
use crate::config::Config;
use crate::model::{Category, UserAccount};
use crate::services::SessionStore;
use crate::tui::Tui;
use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::Event;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

/// Terminal attack-surface dashboard
#[derive(Parser, Debug)]
#[command(name = "surface-tui", version, about, long_about = None)]
struct Cli {
    /// State directory holding config.json, scan history and logs
    #[arg(short, long, env = "SURFACE_STATE_DIR")]
    config: Option<PathBuf>,

    /// API base URL (the scan endpoint is `<base>/manual_scan/`)
    #[arg(long)]
    api_base_url: Option<String>,

    /// Dashboard base URL used for "see all" links
    #[arg(long)]
    dashboard_url: Option<String>,

    /// Detail report JSON file
    #[arg(short, long)]
    report: Option<PathBuf>,

    /// Session JSON file with `access_token` and `user`
    #[arg(short, long)]
    session: Option<PathBuf>,

    /// Category to open first
    #[arg(short, long, value_parser = parse_category)]
    tab: Option<Category>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn parse_category(key: &str) -> Result<Category, String> {
    Category::from_key(key).ok_or_else(|| {
        let keys = Category::all().map(|c| c.key());
        format!("expected one of: {}", keys.join(", "))
    })
}

/// Defaults, then config.json, then environment, then flags.
///
/// The first run writes the defaults out so there is a file to edit.
fn resolve_config(cli: &Cli) -> Result<Config> {
    let state_dir = cli.config.clone().unwrap_or_else(Config::default_state_dir);
    let first_run = !Config::config_path(&state_dir).exists();
    let config = Config::load_from(&state_dir)?;
    if first_run {
        config
            .save()
            .with_context(|| format!("Failed to write default config in {}", state_dir.display()))?;
    }
    let mut config = config.with_env();

    if let Some(url) = &cli.api_base_url {
        config.api_base_url = url.clone();
    }
    if let Some(url) = &cli.dashboard_url {
        config.dashboard_url = url.clone();
    }
    if let Some(path) = &cli.report {
        config.report_path = path.clone();
    }
    if let Some(path) = &cli.session {
        config.session_path = path.clone();
    }
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    let _log_guard = logging::init_logging(&config, cli.verbose)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    let session = SessionStore::new(&config.session_path);
    let (account, session_error) = match session.load_account() {
        Ok(account) => (account, None),
        Err(e) => {
            warn!(
                error = %e,
                session = %session.path().display(),
                "No signed-in account, rescans will ask for a domain"
            );
            (UserAccount::default(), Some(e))
        }
    };

    let mut app = App::new(config, account, Arc::new(session), runtime.handle().clone())?;
    app.init()?;
    if let Some(category) = cli.tab {
        app.update(Action::SelectTab(category))?;
    }
    if let Some(e) = session_error {
        app.error.get_or_insert(e);
    }

    let mut tui = Tui::new()?.with_tick_rate(Duration::from_millis(100));
    tui.enter()?;
    let result = run_app(&mut tui, &mut app);
    tui.exit()?;

    if let Err(err) = result {
        error!(error = ?err, "Dashboard exited with an error");
        eprintln!("Error: {:?}", err);
        std::process::exit(1);
    }

    info!("Dashboard closed");
    Ok(())
}

/// Draw, read one event or tick, apply actions until none follow
fn run_app(tui: &mut Tui, app: &mut App) -> Result<()> {
    while !app.should_quit {
        tui.draw(|frame| {
            if let Err(e) = app.draw(frame, frame.area()) {
                error!(error = %e, "Draw failed");
            }
        })?;

        let action = match tui.next_event()? {
            Some(Event::Key(key)) => app.handle_key_event(key)?,
            Some(Event::Resize(w, h)) => Some(Action::Resize(w, h)),
            Some(_) => None,
            None => Some(Action::Tick),
        };

        let mut current_action = action;
        while let Some(a) = current_action {
            current_action = app.update(a)?;
        }
    }

    Ok(())
}
