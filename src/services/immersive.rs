//! Immersive display controller.
//!
//! Window managers and the OS can bring chrome back (a focus change, a
//! task switcher, a screen lock). The controller answers each lifecycle
//! event with the display mode that has to be (re)applied, if any.

use crate::types::display::{DisplayMode, LifecycleEvent};
use crate::types::settings::DisplaySettings;

/// Trait defining the immersive controller interface.
pub trait ImmersiveControllerTrait {
    fn on_lifecycle(&mut self, event: LifecycleEvent) -> Option<DisplayMode>;
    fn current_mode(&self) -> DisplayMode;
    fn apply_count(&self) -> u64;
}

pub struct ImmersiveController {
    settings: DisplaySettings,
    applied: u64,
}

impl ImmersiveController {
    pub fn new(settings: DisplaySettings) -> Self {
        Self {
            settings,
            applied: 0,
        }
    }
}

impl ImmersiveControllerTrait for ImmersiveController {
    fn on_lifecycle(&mut self, event: LifecycleEvent) -> Option<DisplayMode> {
        let reapply = match event {
            LifecycleEvent::Created => true,
            LifecycleEvent::Resumed | LifecycleEvent::FocusChanged(true) => {
                self.settings.immersive
            }
            LifecycleEvent::FocusChanged(false) => false,
        };
        if !reapply {
            return None;
        }
        self.applied += 1;
        let mode = self.current_mode();
        tracing::trace!(?event, ?mode, count = self.applied, "applying display mode");
        Some(mode)
    }

    fn current_mode(&self) -> DisplayMode {
        DisplayMode {
            fullscreen: self.settings.immersive,
            decorations: !self.settings.immersive,
            keep_screen_on: self.settings.keep_screen_on,
            cursor_visible: !self.settings.hide_cursor,
        }
    }

    fn apply_count(&self) -> u64 {
        self.applied
    }
}
