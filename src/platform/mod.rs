// KioskView platform abstraction
// Resolves where settings and web view storage live on Windows, macOS and Linux.

use std::path::PathBuf;

#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "macos")]
mod macos;

#[cfg(target_os = "windows")]
mod windows;

#[cfg(target_os = "linux")]
use linux as native;
#[cfg(target_os = "macos")]
use macos as native;
#[cfg(target_os = "windows")]
use windows as native;

/// Directory that holds `settings.json`.
///
/// - **Linux**: `$XDG_CONFIG_HOME/kioskview` or `~/.config/kioskview`
/// - **macOS**: `~/Library/Application Support/KioskView`
/// - **Windows**: `%APPDATA%/KioskView`
pub fn get_config_dir() -> PathBuf {
    native::get_config_dir()
}

/// Directory for web view storage (cookies, local storage, IndexedDB).
///
/// - **Linux**: `$XDG_DATA_HOME/kioskview/webdata` or `~/.local/share/kioskview/webdata`
/// - **macOS**: `~/Library/Application Support/KioskView/WebData`
/// - **Windows**: `%LOCALAPPDATA%/KioskView/WebData`
pub fn get_web_data_dir() -> PathBuf {
    native::get_web_data_dir()
}
