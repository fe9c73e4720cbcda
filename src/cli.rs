//! Command line interface and configuration layering.
//!
//! Settings are resolved as defaults, then the config file, then the
//! `KIOSKVIEW_URL` environment variable, then command line flags.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use serde_json::Value;

use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::types::errors::{SettingsError, ShellError};

pub const URL_ENV: &str = "KIOSKVIEW_URL";

#[derive(Debug, Parser)]
#[command(name = "kioskview", version, about = "Full-screen single-page web kiosk")]
pub struct Cli {
    /// Config file to use instead of the platform default.
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Page to open, overriding `start_url`.
    #[arg(long)]
    pub url: Option<String>,

    /// Run in a normal decorated window.
    #[arg(long)]
    pub windowed: bool,

    /// Enable the web inspector.
    #[arg(long)]
    pub devtools: bool,

    /// Override any setting for this run, e.g. `--set uploads.max_files=1`.
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub overrides: Vec<(String, Value)>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Inspect or edit the config file.
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the effective settings as JSON.
    Show,
    /// Print the config file location.
    Path,
    /// Set one value by dot-notation key and save.
    Set { key: String, value: String },
    /// Restore defaults and save.
    Reset,
}

/// Parses a value as JSON, falling back to a plain string.
pub fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn parse_key_value(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", raw))?;
    let key = key.trim();
    if key.is_empty() {
        return Err("empty key".to_string());
    }
    Ok((key.to_string(), parse_value(value)))
}

/// Opens the config file without applying any override.
pub fn open_engine(cli: &Cli) -> Result<SettingsEngine, SettingsError> {
    let mut engine = SettingsEngine::new(config_path(cli));
    engine.load()?;
    Ok(engine)
}

/// Applies environment and command line layers on top of the loaded file.
pub fn resolve_settings(
    cli: &Cli,
    env_url: Option<String>,
) -> Result<SettingsEngine, SettingsError> {
    let mut engine = open_engine(cli)?;

    if let Some(url) = env_url.filter(|u| !u.trim().is_empty()) {
        engine.apply_override("start_url", Value::String(url))?;
    }
    if let Some(url) = &cli.url {
        engine.apply_override("start_url", Value::String(url.clone()))?;
    }
    if cli.windowed {
        engine.apply_override("display.immersive", Value::Bool(false))?;
    }
    if cli.devtools {
        engine.apply_override("web.devtools", Value::Bool(true))?;
    }
    for (key, value) in &cli.overrides {
        engine.apply_override(key, value.clone())?;
    }
    Ok(engine)
}

pub fn dispatch(cli: Cli) -> Result<(), ShellError> {
    match &cli.command {
        None => {
            let engine = resolve_settings(&cli, std::env::var(URL_ENV).ok())?;
            launch(engine)
        }
        Some(Command::Config(cmd)) => run_config(&cli, cmd),
    }
}

fn run_config(cli: &Cli, cmd: &ConfigCommand) -> Result<(), ShellError> {
    match cmd {
        ConfigCommand::Show => {
            let engine = resolve_settings(cli, std::env::var(URL_ENV).ok())?;
            let json = serde_json::to_string_pretty(engine.get_settings())
                .map_err(|e| SettingsError::SerializationError(e.to_string()))?;
            println!("{}", json);
        }
        ConfigCommand::Path => {
            println!("{}", SettingsEngine::new(config_path(cli)).get_config_path());
        }
        ConfigCommand::Set { key, value } => {
            let mut engine = open_engine(cli)?;
            engine.set_value(key, parse_value(value))?;
            tracing::info!(key = %key, path = %engine.get_config_path(), "setting saved");
        }
        ConfigCommand::Reset => {
            let mut engine = SettingsEngine::new(config_path(cli));
            engine.reset()?;
            tracing::info!(path = %engine.get_config_path(), "settings reset to defaults");
        }
    }
    Ok(())
}

fn config_path(cli: &Cli) -> Option<String> {
    cli.config.as_ref().map(|p| p.to_string_lossy().to_string())
}

#[cfg(feature = "gui")]
fn launch(engine: SettingsEngine) -> Result<(), ShellError> {
    crate::ui::shell_window::run(crate::app::App::new(engine))
}

#[cfg(not(feature = "gui"))]
fn launch(engine: SettingsEngine) -> Result<(), ShellError> {
    let mut app = crate::app::App::new(engine);
    app.startup();
    tracing::warn!("built without the `gui` feature, nothing to display");
    println!("KioskView v{} (headless build)", env!("CARGO_PKG_VERSION"));
    println!("  URL:        {}", app.settings().start_url);
    println!("  Immersive:  {}", app.settings().display.immersive);
    println!("  Uploads:    {}", app.settings().uploads.enabled);
    println!("  Config:     {}", app.settings_engine.get_config_path());
    app.shutdown();
    Ok(())
}
