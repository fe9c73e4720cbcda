use serde::{Deserialize, Serialize};

/// Page loaded when no other URL is configured.
pub const DEFAULT_START_URL: &str = "https://mario1988123.github.io/timelinev2/";

/// Top-level shell settings container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ShellSettings {
    pub start_url: String,
    pub window: WindowSettings,
    pub display: DisplaySettings,
    pub web: WebSettings,
    pub uploads: UploadSettings,
}

impl Default for ShellSettings {
    fn default() -> Self {
        Self {
            start_url: DEFAULT_START_URL.to_string(),
            window: WindowSettings::default(),
            display: DisplaySettings::default(),
            web: WebSettings::default(),
            uploads: UploadSettings::default(),
        }
    }
}

/// Window geometry used when immersive mode is off.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowSettings {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "KioskView".to_string(),
            width: 1280,
            height: 800,
        }
    }
}

/// Immersive display settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplaySettings {
    pub immersive: bool,
    pub keep_screen_on: bool,
    pub hide_cursor: bool,
    pub background: String,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            immersive: true,
            keep_screen_on: true,
            hide_cursor: false,
            background: "#000000".to_string(),
        }
    }
}

impl DisplaySettings {
    /// Parses `background` (`#rgb` or `#rrggbb`) into opaque RGBA.
    pub fn background_rgba(&self) -> Option<(u8, u8, u8, u8)> {
        parse_hex_color(&self.background)
    }
}

/// Embedded web view behaviour.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WebSettings {
    pub devtools: bool,
    pub user_agent: Option<String>,
    pub autoplay: bool,
    pub clipboard: bool,
    /// Keep no cookies or DOM storage between runs.
    pub incognito: bool,
    /// Only allow http(s) navigation on the start URL's origin.
    pub restrict_to_origin: bool,
}

impl Default for WebSettings {
    fn default() -> Self {
        Self {
            devtools: false,
            user_agent: None,
            autoplay: true,
            clipboard: true,
            incognito: false,
            restrict_to_origin: false,
        }
    }
}

/// Limits applied to files handed to the page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UploadSettings {
    pub enabled: bool,
    pub max_files: u32,
    pub max_file_bytes: u64,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            max_files: 16,
            max_file_bytes: 32 * 1024 * 1024,
        }
    }
}

pub fn parse_hex_color(color: &str) -> Option<(u8, u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        3 => {
            let r = channel(&hex[0..1])?;
            let g = channel(&hex[1..2])?;
            let b = channel(&hex[2..3])?;
            Some((r * 17, g * 17, b * 17, 255))
        }
        6 => Some((
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
            255,
        )),
        _ => None,
    }
}
