use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifies one file chooser request issued by the broker.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChooserId(Uuid);

impl ChooserId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ChooserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ChooserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Single or multiple selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChooserMode {
    Open,
    OpenMultiple,
}

/// What the page's upload control asked for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileChooserParams {
    pub accept_types: Vec<String>,
    pub mode: ChooserMode,
    /// Value of the input's `capture` attribute, if any.
    pub capture: Option<String>,
}

impl FileChooserParams {
    pub fn allows_multiple(&self) -> bool {
        self.mode == ChooserMode::OpenMultiple
    }

    pub fn filters(&self) -> Vec<AcceptFilter> {
        accept_filters(&self.accept_types)
    }
}

/// A pending request. `input_token` is the page-side handle of the
/// `<input type=file>` element that receives the result.
#[derive(Debug, Clone, PartialEq)]
pub struct ChooserTicket {
    pub id: ChooserId,
    pub input_token: String,
    pub params: FileChooserParams,
}

/// What the native dialog produced.
#[derive(Debug, Clone, PartialEq)]
pub enum ChooserOutcome {
    Selected(Vec<PathBuf>),
    Cancelled,
}

/// A selected file ready to be handed to the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedFile {
    pub name: String,
    pub mime: String,
    pub size: u64,
    /// Milliseconds since the Unix epoch.
    pub last_modified: u64,
    /// Base64 file contents.
    pub data: String,
}

/// Native dialog filter derived from an `accept` attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptFilter {
    pub name: String,
    pub extensions: Vec<String>,
}

const MIME_TABLE: &[(&str, &str)] = &[
    ("image/png", "png"),
    ("image/jpeg", "jpg"),
    ("image/jpeg", "jpeg"),
    ("image/gif", "gif"),
    ("image/webp", "webp"),
    ("image/bmp", "bmp"),
    ("image/svg+xml", "svg"),
    ("image/heic", "heic"),
    ("audio/mpeg", "mp3"),
    ("audio/wav", "wav"),
    ("audio/ogg", "ogg"),
    ("audio/mp4", "m4a"),
    ("video/mp4", "mp4"),
    ("video/webm", "webm"),
    ("video/quicktime", "mov"),
    ("text/plain", "txt"),
    ("text/csv", "csv"),
    ("text/html", "html"),
    ("application/json", "json"),
    ("application/pdf", "pdf"),
    ("application/zip", "zip"),
    ("application/xml", "xml"),
];

/// MIME type for a file extension, `application/octet-stream` when unknown.
pub fn mime_for_extension(ext: &str) -> &'static str {
    let ext = ext.to_ascii_lowercase();
    MIME_TABLE
        .iter()
        .find(|(_, e)| *e == ext)
        .map(|(m, _)| *m)
        .unwrap_or("application/octet-stream")
}

fn extensions_for_mime(mime: &str) -> Vec<String> {
    if let Some(family) = mime.strip_suffix("/*") {
        let prefix = format!("{}/", family);
        return MIME_TABLE
            .iter()
            .filter(|(m, _)| m.starts_with(&prefix))
            .map(|(_, e)| e.to_string())
            .collect();
    }
    MIME_TABLE
        .iter()
        .filter(|(m, _)| *m == mime)
        .map(|(_, e)| e.to_string())
        .collect()
}

/// Turns `accept` entries into dialog filters.
///
/// `.ext` entries are taken as-is, `type/subtype` and `type/*` go through the
/// MIME table, unknown entries are dropped. All extensions end up in one
/// filter named after the accept list; an empty result means "any file".
pub fn accept_filters(accept: &[String]) -> Vec<AcceptFilter> {
    let mut extensions: Vec<String> = Vec::new();
    let mut labels: Vec<String> = Vec::new();

    for raw in accept {
        let entry = raw.trim().to_ascii_lowercase();
        if entry.is_empty() {
            continue;
        }
        let found = if let Some(ext) = entry.strip_prefix('.') {
            if ext.is_empty() {
                Vec::new()
            } else {
                vec![ext.to_string()]
            }
        } else if entry.contains('/') {
            extensions_for_mime(&entry)
        } else {
            Vec::new()
        };
        if found.is_empty() {
            continue;
        }
        labels.push(entry);
        for ext in found {
            if !extensions.contains(&ext) {
                extensions.push(ext);
            }
        }
    }

    if extensions.is_empty() {
        return Vec::new();
    }
    vec![AcceptFilter {
        name: labels.join(", "),
        extensions,
    }]
}
