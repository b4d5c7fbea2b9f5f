//! Frame loop tests: draw order, crossfade progress, delta handling and
//! the tutorial freeze.

mod common;

use common::*;
use proptest::prelude::*;
use radum_engine::prelude::*;

/// Engine settled on the main menu, then switched to a game board that
/// clears with the background colour.
fn crossfading_engine(journal: &Journal, renderer: &mut RecordingRenderer) -> TestEngine {
    let mut engine = engine_with(journal, |key, scene, _| match key {
        GameScene::GameBoard => scene.with_background(ThemeColour::Background),
        _ => scene,
    });
    engine.change_scene(GameScene::MainMenu, None, false).unwrap();
    settle(&mut engine, renderer);
    engine.change_scene(GameScene::GameBoard, None, false).unwrap();
    journal.clear();
    engine
}

// =============================================================================
// Draw Order
// =============================================================================

#[test]
fn test_crossfade_draws_both_scenes_in_order() {
    let journal = Journal::default();
    let mut renderer = RecordingRenderer::new(&journal);
    let mut engine = crossfading_engine(&journal, &mut renderer);

    engine.tick(150.0, &mut renderer).unwrap();

    assert_eq!(
        journal.events(),
        vec![
            Event::Clear(Some(ThemeColour::Background)),
            Event::Alpha(1.0),
            Event::Frame(GameScene::MainMenu, 150.0),
            Event::Draw(GameScene::MainMenu),
            Event::Alpha(0.0),
            Event::Frame(GameScene::GameBoard, 150.0),
            Event::Draw(GameScene::GameBoard),
        ]
    );
    assert_eq!(engine.crossfade(), 0.5);

    journal.clear();
    engine.tick(150.0, &mut renderer).unwrap();

    assert_eq!(
        journal.events(),
        vec![
            Event::Clear(Some(ThemeColour::Background)),
            Event::Alpha(0.5),
            Event::Frame(GameScene::MainMenu, 150.0),
            Event::Draw(GameScene::MainMenu),
            Event::Alpha(0.5),
            Event::Frame(GameScene::GameBoard, 150.0),
            Event::Draw(GameScene::GameBoard),
        ]
    );
}

#[test]
fn test_completed_crossfade_drops_previous_scene() {
    let journal = Journal::default();
    let mut renderer = RecordingRenderer::new(&journal);
    let mut engine = crossfading_engine(&journal, &mut renderer);

    engine.tick(150.0, &mut renderer).unwrap();
    engine.tick(150.0, &mut renderer).unwrap();
    assert_eq!(engine.crossfade(), 1.0);
    assert_eq!(engine.previous_scene(), None);
    assert!(!engine.is_input_locked());

    journal.clear();
    engine.tick(16.0, &mut renderer).unwrap();

    assert_eq!(
        journal.events(),
        vec![
            Event::Clear(Some(ThemeColour::Background)),
            Event::Alpha(1.0),
            Event::Frame(GameScene::GameBoard, 16.0),
            Event::Draw(GameScene::GameBoard),
        ]
    );
}

#[test]
fn test_scene_without_background_clears_plain() {
    let journal = Journal::default();
    let mut renderer = RecordingRenderer::new(&journal);
    let mut engine = engine(&journal);
    engine.change_scene(GameScene::Lobby, None, false).unwrap();
    journal.clear();

    engine.tick(16.0, &mut renderer).unwrap();

    assert_eq!(journal.events()[0], Event::Clear(None));
}

#[test]
fn test_frame_without_active_scene_fails() {
    let journal = Journal::default();
    let mut renderer = RecordingRenderer::new(&journal);
    let mut engine = engine(&journal);

    assert_eq!(engine.tick(16.0, &mut renderer), Err(EngineError::NoActiveScene));
    assert!(journal.events().is_empty());
}

// =============================================================================
// Frame Deltas
// =============================================================================

#[test]
fn test_first_frame_has_zero_delta() {
    let journal = Journal::default();
    let mut renderer = RecordingRenderer::new(&journal);
    let mut engine = engine(&journal);
    engine.change_scene(GameScene::MainMenu, None, false).unwrap();

    engine.frame(1000.0, &mut renderer).unwrap();
    engine.frame(1016.0, &mut renderer).unwrap();

    assert_eq!(journal.count_of(&Event::Frame(GameScene::MainMenu, 0.0)), 1);
    assert_eq!(journal.count_of(&Event::Frame(GameScene::MainMenu, 16.0)), 1);
}

#[test]
fn test_long_gap_is_capped() {
    let journal = Journal::default();
    let mut renderer = RecordingRenderer::new(&journal);
    let mut engine = engine(&journal);
    engine.change_scene(GameScene::MainMenu, None, false).unwrap();

    engine.frame(0.0, &mut renderer).unwrap();
    engine.frame(60_000.0, &mut renderer).unwrap();

    assert_eq!(journal.count_of(&Event::Frame(GameScene::MainMenu, 250.0)), 1);
    // 250 of 300 ms: still fading in.
    assert!(engine.is_input_locked());
}

#[test]
fn test_invalid_deltas_become_zero() {
    let journal = Journal::default();
    let mut renderer = RecordingRenderer::new(&journal);
    let mut engine = engine(&journal);
    engine.change_scene(GameScene::MainMenu, None, false).unwrap();

    engine.tick(-40.0, &mut renderer).unwrap();
    engine.tick(f64::NAN, &mut renderer).unwrap();
    engine.tick(f64::INFINITY, &mut renderer).unwrap();

    assert_eq!(journal.count_of(&Event::Frame(GameScene::MainMenu, 0.0)), 3);
    assert_eq!(engine.crossfade(), 0.0);
}

// =============================================================================
// Tutorial Overlay
// =============================================================================

#[test]
fn test_blocking_tutorial_freezes_both_scenes_but_still_draws() {
    let journal = Journal::default();
    let mut renderer = RecordingRenderer::new(&journal);
    let mut engine = crossfading_engine(&journal, &mut renderer);
    engine.start_tutorial(vec![TutorialStage::new().message(["Tap to begin"])]);

    engine.tick(100.0, &mut renderer).unwrap();

    assert_eq!(journal.count(|e| matches!(e, Event::Frame(..))), 0);
    assert_eq!(journal.count_of(&Event::Draw(GameScene::MainMenu)), 1);
    assert_eq!(journal.count_of(&Event::Draw(GameScene::GameBoard)), 1);
    assert!(journal.count_of(&Event::Primitive) > 0);
    assert_eq!(journal.events().last(), Some(&Event::Alpha(1.0)));

    // The crossfade keeps running underneath the overlay.
    assert!(engine.crossfade() > 0.0);
}

#[test]
fn test_overlay_draws_after_active_scene() {
    let journal = Journal::default();
    let mut renderer = RecordingRenderer::new(&journal);
    let mut engine = engine(&journal);
    engine.change_scene(GameScene::MainMenu, None, false).unwrap();
    settle(&mut engine, &mut renderer);
    engine.start_tutorial(vec![TutorialStage::new().message(["Hello"]).advance_when(|| false)]);
    journal.clear();

    engine.tick(16.0, &mut renderer).unwrap();

    let events = journal.events();
    let draw = events
        .iter()
        .position(|e| *e == Event::Draw(GameScene::MainMenu))
        .unwrap();
    let first_primitive = events.iter().position(|e| *e == Event::Primitive).unwrap();
    assert!(draw < first_primitive);
    assert_eq!(journal.count_of(&Event::Frame(GameScene::MainMenu, 16.0)), 1);
}

#[test]
fn test_frames_resume_once_tutorial_stops_blocking() {
    let journal = Journal::default();
    let mut renderer = RecordingRenderer::new(&journal);
    let mut engine = crossfading_engine(&journal, &mut renderer);
    engine.start_tutorial(vec![TutorialStage::new().message(["Tap to begin"])]);

    engine.tick(50.0, &mut renderer).unwrap();
    engine.tutorial_mut().advance();
    journal.clear();
    engine.tick(50.0, &mut renderer).unwrap();

    assert_eq!(journal.count_of(&Event::Frame(GameScene::MainMenu, 50.0)), 1);
    assert_eq!(journal.count_of(&Event::Frame(GameScene::GameBoard, 50.0)), 1);
}

// =============================================================================
// Commands
// =============================================================================

#[test]
fn test_commands_apply_at_end_of_frame() {
    let journal = Journal::default();
    let mut renderer = RecordingRenderer::new(&journal);
    let mut engine = engine(&journal);
    engine.change_scene(GameScene::MainMenu, None, false).unwrap();
    settle(&mut engine, &mut renderer);
    engine.handle().change_scene(GameScene::Lobby, None, false);
    journal.clear();

    engine.tick(16.0, &mut renderer).unwrap();

    assert_eq!(
        journal.events(),
        vec![
            Event::Clear(None),
            Event::Alpha(1.0),
            Event::Frame(GameScene::MainMenu, 16.0),
            Event::Draw(GameScene::MainMenu),
            Event::Activate(GameScene::Lobby, None),
            Event::Deactivate(GameScene::MainMenu),
        ]
    );
    assert!(engine.is_input_locked());
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn prop_input_locked_exactly_while_fading(
        deltas in proptest::collection::vec(1.0f64..120.0, 1..20)
    ) {
        let journal = Journal::default();
        let mut renderer = RecordingRenderer::new(&journal);
        let mut engine = crossfading_engine(&journal, &mut renderer);
        let mut elapsed = 0.0;
        let mut last_crossfade = engine.crossfade();

        for delta in deltas {
            engine.tick(delta, &mut renderer).unwrap();
            elapsed += delta;

            let crossfade = engine.crossfade();
            prop_assert!(crossfade >= last_crossfade);
            prop_assert!((0.0..=1.0).contains(&crossfade));
            last_crossfade = crossfade;

            if elapsed < 300.0 - 1e-6 {
                prop_assert!(engine.is_input_locked());
                prop_assert_eq!(engine.previous_scene(), Some(GameScene::MainMenu));
                prop_assert_eq!(engine.key_down(KeyCode::Space), Ok(Route::Dropped(DropReason::Locked)));
            } else if elapsed > 300.0 + 1e-6 {
                prop_assert!(!engine.is_input_locked());
                prop_assert_eq!(engine.previous_scene(), None);
            }
        }

        prop_assert_eq!(journal.inputs_for(GameScene::GameBoard), 0);
    }
}
