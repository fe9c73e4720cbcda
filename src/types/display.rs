/// Host lifecycle events that matter to the display mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// The window and web view were just created.
    Created,
    /// The application came back to the foreground.
    Resumed,
    FocusChanged(bool),
}

/// Window state to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayMode {
    pub fullscreen: bool,
    pub decorations: bool,
    pub keep_screen_on: bool,
    pub cursor_visible: bool,
}

impl DisplayMode {
    pub fn is_immersive(&self) -> bool {
        self.fullscreen && !self.decorations
    }
}
