//! Page bridge: messages posted by the injected script and the scripts sent back.
//!
//! Kept apart from the window code so it can be unit-tested without a web view.
//! The page talks through `window.ipc.postMessage(JSON.stringify({cmd, ...}))`.

use serde::Deserialize;
use serde_json::json;

use crate::types::display::DisplayMode;
use crate::types::errors::BridgeError;
use crate::types::file_chooser::{ChooserMode, FileChooserParams, SelectedFile};
use crate::types::settings::ShellSettings;

/// Bridge script injected into every page.
pub const SHELL_JS: &str = include_str!("../resources/shell.js");

/// A decoded message from the page.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum BridgeMessage {
    Ready {
        url: String,
    },
    OpenFileChooser {
        token: String,
        #[serde(default)]
        accept: Vec<String>,
        #[serde(default)]
        multiple: bool,
        #[serde(default)]
        capture: Option<String>,
    },
    WakeLockFailed {
        reason: String,
    },
    Log {
        level: String,
        message: String,
    },
}

impl BridgeMessage {
    /// Chooser parameters for an `open_file_chooser` message.
    pub fn chooser_params(&self) -> Option<(String, FileChooserParams)> {
        match self {
            BridgeMessage::OpenFileChooser {
                token,
                accept,
                multiple,
                capture,
            } => Some((
                token.clone(),
                FileChooserParams {
                    accept_types: accept.clone(),
                    mode: if *multiple {
                        ChooserMode::OpenMultiple
                    } else {
                        ChooserMode::Open
                    },
                    capture: capture.clone().filter(|c| !c.is_empty()),
                },
            )),
            _ => None,
        }
    }
}

const KNOWN_COMMANDS: &[&str] = &["ready", "open_file_chooser", "wake_lock_failed", "log"];

pub fn parse_message(body: &str) -> Result<BridgeMessage, BridgeError> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| BridgeError::Malformed(e.to_string()))?;
    let cmd = value
        .get("cmd")
        .and_then(|c| c.as_str())
        .ok_or_else(|| BridgeError::Malformed("missing cmd".to_string()))?;
    if !KNOWN_COMMANDS.contains(&cmd) {
        return Err(BridgeError::UnknownCommand(cmd.to_string()));
    }
    serde_json::from_value(value).map_err(|e| BridgeError::Malformed(e.to_string()))
}

/// Script delivering a chooser result; `None` tells the page the request was cancelled.
pub fn resolve_chooser_script(token: &str, files: Option<&[SelectedFile]>) -> String {
    let files = match files {
        Some(files) if !files.is_empty() => json!(files),
        _ => serde_json::Value::Null,
    };
    format!(
        "if(window.__ks_resolveChooser)window.__ks_resolveChooser({},{})",
        json!(token),
        files
    )
}

/// Initialization script: page config followed by the bridge itself.
pub fn init_script(settings: &ShellSettings, mode: &DisplayMode) -> String {
    let config = json!({
        "uploads": settings.uploads.enabled,
        "keepScreenOn": mode.keep_screen_on,
        "hideCursor": !mode.cursor_visible,
        "background": settings.display.background,
    });
    let mut script = String::with_capacity(SHELL_JS.len() + 256);
    script.push_str("window.__KS_CONFIG=");
    script.push_str(&config.to_string());
    script.push_str(";\n");
    script.push_str(SHELL_JS);
    script
}
