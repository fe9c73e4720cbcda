// KioskView shared type definitions
// Each submodule defines types used across the application.

pub mod display;
pub mod errors;
pub mod file_chooser;
pub mod settings;
