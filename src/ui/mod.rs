//! KioskView UI layer.
//!
//! Uses `wry` for the embedded web view:
//! - Windows: WebView2
//! - Linux: WebKitGTK
//! - macOS: WKWebView
//!
//! There is no shell chrome. The window holds one web view showing the
//! configured page, and uploads go through a native dialog opened by `rfd`.

pub mod shell_window;
