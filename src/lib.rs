//! KioskView: a full-screen single-page web kiosk shell.
//!
//! This library crate exposes all modules for use by the binary and integration tests.

pub mod app;
pub mod bridge;
pub mod cli;
pub mod logging;
pub mod platform;
pub mod services;
pub mod types;

#[cfg(feature = "gui")]
pub mod ui;
