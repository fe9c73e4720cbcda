//! Property-based tests for ShellSettings serialization and persistence.
//!
//! Valid settings must survive JSON serialization and a save/load cycle
//! through the SettingsEngine without data loss.

use kioskview::services::settings_engine::{validate, SettingsEngine, SettingsEngineTrait};
use kioskview::types::settings::{
    DisplaySettings, ShellSettings, UploadSettings, WebSettings, WindowSettings,
};
use proptest::prelude::*;

fn arb_window_settings() -> impl Strategy<Value = WindowSettings> {
    ("[A-Za-z ]{1,20}", 1u32..4000, 1u32..3000).prop_map(|(title, width, height)| {
        WindowSettings {
            title,
            width,
            height,
        }
    })
}

fn arb_display_settings() -> impl Strategy<Value = DisplaySettings> {
    (
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        prop_oneof!["#[0-9a-f]{3}", "#[0-9A-F]{6}"],
    )
        .prop_map(|(immersive, keep_screen_on, hide_cursor, background)| DisplaySettings {
            immersive,
            keep_screen_on,
            hide_cursor,
            background,
        })
}

fn arb_web_settings() -> impl Strategy<Value = WebSettings> {
    (
        any::<bool>(),
        proptest::option::of("[A-Za-z0-9/. ]{1,40}"),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(
            |(devtools, user_agent, autoplay, clipboard, incognito, restrict_to_origin)| {
                WebSettings {
                    devtools,
                    user_agent,
                    autoplay,
                    clipboard,
                    incognito,
                    restrict_to_origin,
                }
            },
        )
}

fn arb_upload_settings() -> impl Strategy<Value = UploadSettings> {
    (any::<bool>(), 1u32..64, 0u64..(1 << 40)).prop_map(|(enabled, max_files, max_file_bytes)| {
        UploadSettings {
            enabled,
            max_files,
            max_file_bytes,
        }
    })
}

fn arb_shell_settings() -> impl Strategy<Value = ShellSettings> {
    (
        "https?://[a-z]{1,12}\\.[a-z]{2,4}/[a-z0-9/]{0,20}",
        arb_window_settings(),
        arb_display_settings(),
        arb_web_settings(),
        arb_upload_settings(),
    )
        .prop_map(|(start_url, window, display, web, uploads)| ShellSettings {
            start_url,
            window,
            display,
            web,
            uploads,
        })
}

proptest! {
    #[test]
    fn settings_json_roundtrip(settings in arb_shell_settings()) {
        let json = serde_json::to_string(&settings).unwrap();
        let back: ShellSettings = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, settings);
    }

    #[test]
    fn generated_settings_are_valid(settings in arb_shell_settings()) {
        prop_assert!(validate(&settings).is_ok());
    }

    #[test]
    fn settings_survive_save_and_load(settings in arb_shell_settings()) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json").to_string_lossy().to_string();

        let mut engine = SettingsEngine::new(Some(path.clone()));
        engine.apply_override("start_url", serde_json::json!(settings.start_url)).unwrap();
        for (key, value) in [
            ("window", serde_json::to_value(&settings.window).unwrap()),
            ("display", serde_json::to_value(&settings.display).unwrap()),
            ("web", serde_json::to_value(&settings.web).unwrap()),
            ("uploads", serde_json::to_value(&settings.uploads).unwrap()),
        ] {
            engine.apply_override(key, value).unwrap();
        }
        engine.save().unwrap();

        let mut reloaded = SettingsEngine::new(Some(path));
        prop_assert_eq!(reloaded.load().unwrap(), settings);
    }
}
