//! Kiosk window built with `wry` + `tao`.
//!
//! Architecture:
//! - One window, one web view, pointed at `start_url`.
//! - `with_initialization_script` installs the page bridge (`resources/shell.js`)
//!   in every document. It routes `<input type=file>` to the native dialog and
//!   keeps the screen awake.
//! - IPC from JS → Rust via `window.ipc.postMessage()`; work that needs the web
//!   view or the main thread is sent back through the event loop proxy.
//! - Focus gain and resume re-apply the immersive display mode.

use std::sync::{Arc, Mutex, MutexGuard};

use tao::dpi::LogicalSize;
use tao::event::{Event, WindowEvent};
use tao::event_loop::{ControlFlow, EventLoopBuilder, EventLoopProxy};
use tao::window::{Fullscreen, Window, WindowBuilder};
use wry::{WebContext, WebView, WebViewBuilder};

use crate::app::{App, ShellCommand};
use crate::platform;
use crate::types::display::{DisplayMode, LifecycleEvent};
use crate::types::errors::ShellError;
use crate::types::file_chooser::{ChooserOutcome, ChooserTicket};

#[derive(Debug)]
enum UserEvent {
    EvalScript(String),
    LoadUrl(String),
    ShowFileChooser(ChooserTicket),
}

fn lock(app: &Mutex<App>) -> MutexGuard<'_, App> {
    app.lock().unwrap_or_else(|poisoned| {
        tracing::warn!("app state lock was poisoned, continuing");
        poisoned.into_inner()
    })
}

/// Hands commands produced outside the event loop to it.
fn forward(app: &Mutex<App>, proxy: &EventLoopProxy<UserEvent>, commands: Vec<ShellCommand>) {
    for command in commands {
        match command {
            ShellCommand::EvalScript(js) => {
                if proxy.send_event(UserEvent::EvalScript(js)).is_err() {
                    tracing::debug!("event loop closed, dropping script");
                }
            }
            ShellCommand::ShowFileChooser(ticket) => {
                let id = ticket.id.clone();
                if proxy.send_event(UserEvent::ShowFileChooser(ticket)).is_err() {
                    // Nobody is left to show the dialog or hear the answer.
                    let _ = lock(app).abandon_chooser(&id);
                }
            }
        }
    }
}

fn eval(webview: &WebView, js: &str) {
    if let Err(e) = webview.evaluate_script(js) {
        tracing::warn!("script evaluation failed: {}", e);
    }
}

fn apply_display(window: &Window, mode: DisplayMode) {
    if mode.fullscreen {
        if window.fullscreen().is_none() {
            window.set_fullscreen(Some(Fullscreen::Borderless(None)));
        }
    } else if window.fullscreen().is_some() {
        window.set_fullscreen(None);
    }
    window.set_decorations(mode.decorations);
    window.set_cursor_visible(mode.cursor_visible);
}

/// Opens the native dialog for a pending request. Blocks the UI thread
/// until the user picks or dismisses.
fn pick_files(ticket: &ChooserTicket) -> ChooserOutcome {
    let multiple = ticket.params.allows_multiple();
    let mut dialog = rfd::FileDialog::new().set_title(if multiple {
        "Choose files"
    } else {
        "Choose a file"
    });
    for filter in ticket.params.filters() {
        dialog = dialog.add_filter(filter.name.as_str(), filter.extensions.as_slice());
    }
    if let Some(capture) = &ticket.params.capture {
        tracing::debug!(%capture, "capture hint ignored, no camera source on desktop");
    }

    let picked = if multiple {
        dialog.pick_files()
    } else {
        dialog.pick_file().map(|path| vec![path])
    };
    match picked {
        Some(paths) => ChooserOutcome::Selected(paths),
        None => ChooserOutcome::Cancelled,
    }
}

// ─── Main entry point ───

pub fn run(app: App) -> Result<(), ShellError> {
    let settings = app.settings().clone();
    let init_script = app.init_script();
    let background = settings.display.background_rgba().unwrap_or((0, 0, 0, 255));
    let app = Arc::new(Mutex::new(app));
    lock(&app).startup();

    let event_loop = EventLoopBuilder::<UserEvent>::with_user_event().build();
    let proxy = event_loop.create_proxy();

    let window = WindowBuilder::new()
        .with_title(&settings.window.title)
        .with_inner_size(LogicalSize::new(
            f64::from(settings.window.width),
            f64::from(settings.window.height),
        ))
        .build(&event_loop)
        .map_err(|e| ShellError::Window(e.to_string()))?;

    let data_dir = (!settings.web.incognito).then(platform::get_web_data_dir);
    let mut web_context = WebContext::new(data_dir);

    let ipc_app = app.clone();
    let ipc_proxy = proxy.clone();
    let nav_app = app.clone();
    let nw_app = app.clone();
    let nw_proxy = proxy.clone();

    let mut builder = WebViewBuilder::new_with_web_context(&mut web_context)
        .with_url(&settings.start_url)
        .with_initialization_script(&init_script)
        .with_background_color(background)
        .with_devtools(settings.web.devtools)
        .with_autoplay(settings.web.autoplay)
        .with_clipboard(settings.web.clipboard)
        .with_incognito(settings.web.incognito)
        .with_ipc_handler(move |msg: wry::http::Request<String>| {
            let body = msg.body().as_str();
            tracing::trace!("[IPC] {}", body.chars().take(200).collect::<String>());
            let commands = lock(&ipc_app).handle_ipc(body);
            forward(&ipc_app, &ipc_proxy, commands);
        })
        .with_navigation_handler(move |url: String| lock(&nav_app).allows_navigation(&url))
        .with_new_window_req_handler(move |url, _features| {
            tracing::debug!(%url, "new window request, opening in place");
            if lock(&nw_app).allows_navigation(&url) {
                let _ = nw_proxy.send_event(UserEvent::LoadUrl(url));
            }
            wry::NewWindowResponse::Deny
        });
    if let Some(agent) = &settings.web.user_agent {
        builder = builder.with_user_agent(agent);
    }

    #[cfg(target_os = "linux")]
    let webview = {
        use tao::platform::unix::WindowExtUnix;
        use wry::WebViewBuilderExtUnix;
        let vbox = window
            .default_vbox()
            .ok_or_else(|| ShellError::Window("GTK container unavailable".to_string()))?;
        builder
            .build_gtk(vbox)
            .map_err(|e| ShellError::WebView(e.to_string()))?
    };

    #[cfg(not(target_os = "linux"))]
    let webview = builder
        .build(&window)
        .map_err(|e| ShellError::WebView(e.to_string()))?;

    if let Some(mode) = lock(&app).on_lifecycle(LifecycleEvent::Created) {
        apply_display(&window, mode);
    }

    event_loop.run(move |event, _, control_flow| {
        // The web context must outlive the web view.
        let _ = &web_context;
        *control_flow = ControlFlow::Wait;

        match event {
            Event::Resumed => {
                if let Some(mode) = lock(&app).on_lifecycle(LifecycleEvent::Resumed) {
                    apply_display(&window, mode);
                }
            }

            Event::WindowEvent {
                event: WindowEvent::Focused(focused),
                ..
            } => {
                if let Some(mode) = lock(&app).on_lifecycle(LifecycleEvent::FocusChanged(focused)) {
                    apply_display(&window, mode);
                }
            }

            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                for command in lock(&app).shutdown() {
                    if let ShellCommand::EvalScript(js) = command {
                        eval(&webview, &js);
                    }
                }
                *control_flow = ControlFlow::Exit;
            }

            Event::UserEvent(user_event) => match user_event {
                UserEvent::EvalScript(js) => eval(&webview, &js),
                UserEvent::LoadUrl(url) => {
                    tracing::info!(%url, "loading");
                    if let Err(e) = webview.load_url(&url) {
                        tracing::warn!("failed to load {}: {}", url, e);
                    }
                }
                UserEvent::ShowFileChooser(ticket) => {
                    if !lock(&app).chooser_is_current(&ticket.id) {
                        tracing::debug!(id = %ticket.id, "chooser request superseded before display");
                        return;
                    }
                    let outcome = pick_files(&ticket);
                    let command = lock(&app).complete_chooser(&ticket.id, outcome);
                    if let Some(ShellCommand::EvalScript(js)) = command {
                        eval(&webview, &js);
                    }
                    // The dialog took focus away; bring immersive back.
                    if let Some(mode) = lock(&app).on_lifecycle(LifecycleEvent::Resumed) {
                        apply_display(&window, mode);
                    }
                }
            },

            _ => {}
        }
    });
}
