use foundry_rendering::HudAction;
use foundry_rendering_macroquad::HudInputState;

fn run_sequence(sequence: &[Option<HudAction>]) -> Vec<Vec<HudAction>> {
    let mut state = HudInputState::default();
    let mut frames = Vec::new();
    for pressed in sequence {
        frames.push(state.take_actions());
        if let Some(action) = pressed {
            state.register(action.clone());
        }
    }

    frames.push(state.take_actions());
    frames
}

#[test]
fn latched_presses_fire_once_on_the_following_frame() {
    let sequence = [
        None,
        Some(HudAction::TogglePause),
        None,
        Some(HudAction::SelectBuildItem("buildMiner".to_owned())),
    ];

    let frames = run_sequence(&sequence);

    assert_eq!(
        frames,
        vec![
            vec![],
            vec![],
            vec![HudAction::TogglePause],
            vec![],
            vec![HudAction::SelectBuildItem("buildMiner".to_owned())],
        ]
    );
}

#[test]
fn multiple_presses_in_one_frame_keep_order() {
    let mut state = HudInputState::default();
    state.register(HudAction::Resume);
    state.register(HudAction::MainMenu);

    assert_eq!(state.take_actions(), vec![HudAction::Resume, HudAction::MainMenu]);
    assert!(state.take_actions().is_empty());
}
