//! App Core for KioskView.
//!
//! Owns the settings, the file chooser broker, the immersive controller and the
//! navigation policy. The window layer feeds it bridge messages and lifecycle
//! events and executes the commands it returns.

use crate::bridge::{self, BridgeMessage};
use crate::services::file_chooser::{FileChooserBroker, FileChooserTrait};
use crate::services::immersive::{ImmersiveController, ImmersiveControllerTrait};
use crate::services::navigation::NavigationPolicy;
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::services::upload_payload::collect_selected_files;
use crate::types::display::{DisplayMode, LifecycleEvent};
use crate::types::errors::FileChooserError;
use crate::types::file_chooser::{ChooserId, ChooserOutcome, ChooserTicket};
use crate::types::settings::ShellSettings;

/// Work the window layer has to carry out.
#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    EvalScript(String),
    ShowFileChooser(ChooserTicket),
}

pub struct App {
    pub settings_engine: SettingsEngine,
    pub file_chooser: FileChooserBroker,
    pub immersive: ImmersiveController,
    pub navigation: NavigationPolicy,
    page_url: Option<String>,
}

impl App {
    /// Builds the app from an already loaded settings engine.
    pub fn new(settings_engine: SettingsEngine) -> Self {
        let settings = settings_engine.get_settings().clone();
        Self {
            file_chooser: FileChooserBroker::new(settings.uploads.clone()),
            immersive: ImmersiveController::new(settings.display.clone()),
            navigation: NavigationPolicy::new(&settings.start_url, settings.web.restrict_to_origin),
            settings_engine,
            page_url: None,
        }
    }

    pub fn settings(&self) -> &ShellSettings {
        self.settings_engine.get_settings()
    }

    /// Last URL reported by the page bridge.
    pub fn page_url(&self) -> Option<&str> {
        self.page_url.as_deref()
    }

    pub fn startup(&mut self) {
        let settings = self.settings();
        tracing::info!(
            url = %settings.start_url,
            immersive = settings.display.immersive,
            uploads = settings.uploads.enabled,
            config = %self.settings_engine.get_config_path(),
            "starting kiosk shell"
        );
    }

    /// Cancels any outstanding chooser so the page is not left waiting.
    pub fn shutdown(&mut self) -> Vec<ShellCommand> {
        tracing::info!("shutting down");
        self.file_chooser
            .cancel_pending()
            .map(|ticket| cancel_command(&ticket))
            .into_iter()
            .collect()
    }

    pub fn on_lifecycle(&mut self, event: LifecycleEvent) -> Option<DisplayMode> {
        self.immersive.on_lifecycle(event)
    }

    pub fn allows_navigation(&self, url: &str) -> bool {
        let allowed = self.navigation.allows(url);
        if !allowed {
            tracing::info!(url, "blocked navigation");
        }
        allowed
    }

    /// Handles one IPC message body from the page.
    pub fn handle_ipc(&mut self, body: &str) -> Vec<ShellCommand> {
        let message = match bridge::parse_message(body) {
            Ok(m) => m,
            Err(e) => {
                tracing::warn!("ignoring bridge message: {}", e);
                return Vec::new();
            }
        };

        match message {
            BridgeMessage::Ready { url } => {
                tracing::debug!(%url, "page bridge ready");
                self.page_url = Some(url);
                Vec::new()
            }
            BridgeMessage::WakeLockFailed { reason } => {
                tracing::warn!(%reason, "screen wake lock refused");
                Vec::new()
            }
            BridgeMessage::Log { level, message } => {
                match level.as_str() {
                    "error" => tracing::error!(target: "kioskview::page", "{}", message),
                    "warn" => tracing::warn!(target: "kioskview::page", "{}", message),
                    _ => tracing::info!(target: "kioskview::page", "{}", message),
                }
                Vec::new()
            }
            msg @ BridgeMessage::OpenFileChooser { .. } => {
                let Some((token, params)) = msg.chooser_params() else {
                    return Vec::new();
                };
                match self.file_chooser.open(&token, params) {
                    Ok(opened) => {
                        let mut commands = Vec::with_capacity(2);
                        if let Some(old) = &opened.superseded {
                            commands.push(cancel_command(old));
                        }
                        commands.push(ShellCommand::ShowFileChooser(opened.ticket));
                        commands
                    }
                    Err(FileChooserError::Disabled) => {
                        tracing::info!("file chooser requested while uploads are disabled");
                        vec![ShellCommand::EvalScript(bridge::resolve_chooser_script(
                            &token, None,
                        ))]
                    }
                    Err(e) => {
                        tracing::warn!("file chooser request failed: {}", e);
                        vec![ShellCommand::EvalScript(bridge::resolve_chooser_script(
                            &token, None,
                        ))]
                    }
                }
            }
        }
    }

    /// Whether `id` is still the request waiting for a dialog. Requests
    /// superseded while queued must not open one.
    pub fn chooser_is_current(&self, id: &ChooserId) -> bool {
        self.file_chooser.pending().map(|t| &t.id) == Some(id)
    }

    /// Bridge script for the page, following the current display mode.
    pub fn init_script(&self) -> String {
        bridge::init_script(self.settings(), &self.immersive.current_mode())
    }

    /// Feeds the native dialog outcome back and returns the script answering the page.
    pub fn complete_chooser(
        &mut self,
        id: &ChooserId,
        outcome: ChooserOutcome,
    ) -> Option<ShellCommand> {
        let completed = match self.file_chooser.resolve(id, outcome) {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!("dropping file chooser result: {}", e);
                return None;
            }
        };

        let script = match &completed.outcome {
            ChooserOutcome::Selected(paths) => {
                let files = collect_selected_files(paths, &self.settings().uploads);
                tracing::info!(selected = paths.len(), delivered = files.len(), "files chosen");
                bridge::resolve_chooser_script(&completed.ticket.input_token, Some(&files))
            }
            ChooserOutcome::Cancelled => {
                bridge::resolve_chooser_script(&completed.ticket.input_token, None)
            }
        };
        Some(ShellCommand::EvalScript(script))
    }

    /// The dialog could not be shown; answers the page with a cancellation.
    pub fn abandon_chooser(&mut self, id: &ChooserId) -> Option<ShellCommand> {
        match self.file_chooser.abandon(id) {
            Ok(completed) => Some(cancel_command(&completed.ticket)),
            Err(e) => {
                tracing::warn!("cannot abandon file chooser: {}", e);
                None
            }
        }
    }
}

fn cancel_command(ticket: &ChooserTicket) -> ShellCommand {
    ShellCommand::EvalScript(bridge::resolve_chooser_script(&ticket.input_token, None))
}
