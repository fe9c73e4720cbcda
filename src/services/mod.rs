// KioskView services
// Services hold the shell's behaviour: settings, immersive display, file chooser brokering, uploads and navigation.

pub mod file_chooser;
pub mod immersive;
pub mod navigation;
pub mod settings_engine;
pub mod upload_payload;
