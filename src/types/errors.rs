use std::fmt;

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    IoError(String),
    /// Failed to serialize or deserialize settings.
    SerializationError(String),
    /// The provided settings key is invalid.
    InvalidKey(String),
    /// The provided settings value is invalid.
    InvalidValue(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::IoError(msg) => write!(f, "Settings I/O error: {}", msg),
            SettingsError::SerializationError(msg) => {
                write!(f, "Settings serialization error: {}", msg)
            }
            SettingsError::InvalidKey(key) => write!(f, "Invalid settings key: {}", key),
            SettingsError::InvalidValue(msg) => {
                write!(f, "Invalid settings value: {}", msg)
            }
        }
    }
}

impl std::error::Error for SettingsError {}

// === FileChooserError ===

/// Errors raised while brokering a file chooser request for the page.
#[derive(Debug)]
pub enum FileChooserError {
    /// Uploads are turned off in the configuration.
    Disabled,
    /// A result arrived but no request is waiting for one.
    NoPendingRequest,
    /// A result arrived for a request that is no longer the pending one.
    StaleRequest(String),
    /// A selected file could not be read.
    ReadFailed(String),
}

impl fmt::Display for FileChooserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileChooserError::Disabled => write!(f, "File uploads are disabled"),
            FileChooserError::NoPendingRequest => {
                write!(f, "No file chooser request is pending")
            }
            FileChooserError::StaleRequest(id) => {
                write!(f, "Stale file chooser request: {}", id)
            }
            FileChooserError::ReadFailed(msg) => {
                write!(f, "Failed to read selected file: {}", msg)
            }
        }
    }
}

impl std::error::Error for FileChooserError {}

// === BridgeError ===

/// Errors decoding messages posted by the page.
#[derive(Debug)]
pub enum BridgeError {
    /// The message was not valid JSON or missed required fields.
    Malformed(String),
    /// The `cmd` field named a command the shell does not know.
    UnknownCommand(String),
}

impl fmt::Display for BridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BridgeError::Malformed(msg) => write!(f, "Malformed bridge message: {}", msg),
            BridgeError::UnknownCommand(cmd) => write!(f, "Unknown bridge command: {}", cmd),
        }
    }
}

impl std::error::Error for BridgeError {}

// === ShellError ===

/// Errors that stop the shell from starting.
#[derive(Debug)]
pub enum ShellError {
    /// The native window could not be created.
    Window(String),
    /// The embedded web view could not be created.
    WebView(String),
    /// Configuration could not be loaded or applied.
    Settings(SettingsError),
}

impl fmt::Display for ShellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShellError::Window(msg) => write!(f, "Failed to create window: {}", msg),
            ShellError::WebView(msg) => write!(f, "Failed to create web view: {}", msg),
            ShellError::Settings(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ShellError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ShellError::Settings(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SettingsError> for ShellError {
    fn from(err: SettingsError) -> Self {
        ShellError::Settings(err)
    }
}
