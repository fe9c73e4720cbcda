use kioskview::services::immersive::{ImmersiveController, ImmersiveControllerTrait};
use kioskview::types::display::LifecycleEvent;
use kioskview::types::settings::DisplaySettings;
use rstest::rstest;

fn immersive() -> ImmersiveController {
    ImmersiveController::new(DisplaySettings::default())
}

#[rstest]
#[case(LifecycleEvent::Created, true)]
#[case(LifecycleEvent::Resumed, true)]
#[case(LifecycleEvent::FocusChanged(true), true)]
#[case(LifecycleEvent::FocusChanged(false), false)]
fn test_immersive_reapplied_on(#[case] event: LifecycleEvent, #[case] applies: bool) {
    let mut controller = immersive();
    let mode = controller.on_lifecycle(event);
    assert_eq!(mode.is_some(), applies, "event {:?}", event);
    if let Some(mode) = mode {
        assert!(mode.is_immersive());
        assert!(mode.keep_screen_on);
    }
}

#[test]
fn test_apply_count_tracks_reapplications() {
    let mut controller = immersive();
    controller.on_lifecycle(LifecycleEvent::Created);
    controller.on_lifecycle(LifecycleEvent::FocusChanged(false));
    controller.on_lifecycle(LifecycleEvent::FocusChanged(true));
    controller.on_lifecycle(LifecycleEvent::Resumed);
    assert_eq!(controller.apply_count(), 3);
}

#[test]
fn test_windowed_mode_only_applied_once() {
    let mut controller = ImmersiveController::new(DisplaySettings {
        immersive: false,
        ..DisplaySettings::default()
    });
    let mode = controller.on_lifecycle(LifecycleEvent::Created).unwrap();
    assert!(!mode.is_immersive());
    assert!(controller.on_lifecycle(LifecycleEvent::FocusChanged(true)).is_none());
    assert_eq!(controller.apply_count(), 1);
}

#[test]
fn test_hidden_cursor_setting() {
    let controller = ImmersiveController::new(DisplaySettings {
        hide_cursor: true,
        ..DisplaySettings::default()
    });
    assert!(!controller.current_mode().cursor_visible);
}
