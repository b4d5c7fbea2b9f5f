//=========================================================================
// Scene System
//=========================================================================
//
// Scene contract, registry and crossfade state.
//
// Architecture:
//   SceneRegistry
//     └─ scenes: HashMap<K, Box<dyn Scene<K, P>>>
//   TransitionState
//     ├─ active:   Option<K>
//     ├─ previous: Option<K>   (fading out)
//     └─ crossfade: f64 in [0, 1]
//
// Flow:
//   change_scene() → registry lookup → reset? → activate() ─┬─ None → commit
//                                                           └─ Redirect → loop
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt::Debug;

//=== Internal Dependencies ===============================================

use crate::core::bot::Bot;
use crate::core::config::{EngineConfig, Millis};
use crate::core::input::{InputPoint, KeyCode, PointerEvent};
use crate::core::render::{Renderer, ThemeColour};
use crate::core::tutorial::TutorialOverlay;

//=== Module Declarations =================================================

mod registry;
mod transition;

//=== Public API ==========================================================

pub use registry::{SceneKey, SceneRegistry};
pub use transition::TransitionState;

//=== Scene Parameters ====================================================

/// Marker trait for payloads forwarded to [`Scene::activate`].
///
/// Automatically implemented for every `Debug + 'static` type.
pub trait SceneParam: Debug + 'static {}

impl<T: Debug + 'static> SceneParam for T {}

//=== Redirect ============================================================

/// A scene declining its own activation in favour of another scene.
///
/// Returned from [`Scene::activate`]. The engine deactivates the declining
/// scene and continues the same transition with these arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct Redirect<K: SceneKey, P> {
    pub scene: K,
    pub param: Option<P>,
    pub reset_first: bool,
}

impl<K: SceneKey, P> Redirect<K, P> {
    /// Redirects to `scene` with no payload and no reset.
    pub fn to(scene: K) -> Self {
        Self {
            scene,
            param: None,
            reset_first: false,
        }
    }

    /// Attaches a payload for the target's `activate`.
    pub fn with_param(mut self, param: P) -> Self {
        self.param = Some(param);
        self
    }

    /// Requests the target's reset hook before activation.
    pub fn reset_first(mut self) -> Self {
        self.reset_first = true;
        self
    }
}

//=== Scene Context =======================================================

/// Read-only engine state visible to scenes during updates and input.
///
/// Scenes that need to change engine state (switch scenes, start the
/// tutorial, enable the bot) use an
/// [`EngineHandle`](crate::core::command::EngineHandle) instead.
pub struct SceneContext<'a> {
    tutorial: &'a TutorialOverlay,
    bot: Option<&'a Bot>,
    config: &'a EngineConfig,
    crossfade: f64,
}

impl<'a> SceneContext<'a> {
    pub(crate) fn new(
        tutorial: &'a TutorialOverlay,
        bot: Option<&'a Bot>,
        config: &'a EngineConfig,
        crossfade: f64,
    ) -> Self {
        Self {
            tutorial,
            bot,
            config,
            crossfade,
        }
    }

    pub fn tutorial(&self) -> &TutorialOverlay {
        self.tutorial
    }

    /// Shorthand for the tutorial's submit gate.
    pub fn can_submit(&self) -> bool {
        self.tutorial.can_submit()
    }

    pub fn bot(&self) -> Option<&Bot> {
        self.bot
    }

    pub fn board_center(&self) -> InputPoint {
        self.config.board_center()
    }

    pub fn board_radius(&self) -> f64 {
        self.config.board_radius
    }

    /// Current crossfade progress in `[0, 1]`.
    pub fn crossfade(&self) -> f64 {
        self.crossfade
    }
}

//=== Scene Trait =========================================================

/// Behaviour shared by every screen of the game.
///
/// Scenes are registered once in the [`SceneRegistry`] and keep their
/// state between activations. Only `do_frame` and `draw_frame` are
/// required; every other hook defaults to a no-op.
///
/// # Minimal Implementation
///
/// ```rust
/// # use radum_engine::prelude::*;
/// # #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// # enum GameScene { Menu }
/// # impl SceneKey for GameScene {}
/// struct MenuScene;
///
/// impl Scene<GameScene> for MenuScene {
///     fn do_frame(&mut self, _delta: f64, _context: &SceneContext) {}
///     fn draw_frame(&mut self, _renderer: &mut dyn Renderer) {}
/// }
/// ```
pub trait Scene<K: SceneKey, P: SceneParam = ()> {
    /// Called when the scene is about to become active.
    ///
    /// Returning a [`Redirect`] declines activation: the engine calls
    /// `on_deactivate` on this scene and activates the redirect target
    /// instead.
    fn activate(&mut self, _param: Option<P>) -> Option<Redirect<K, P>> {
        None
    }

    /// Called exactly once when the scene stops being active.
    fn on_deactivate(&mut self) {}

    /// Full state reset, requested before activation or by `Engine::reset`.
    fn reset(&mut self) {}

    /// Advances scene-internal state by `delta` milliseconds.
    ///
    /// Skipped while a blocking tutorial stage is shown.
    fn do_frame(&mut self, delta: Millis, context: &SceneContext);

    /// Draws the scene at the renderer's current global alpha.
    fn draw_frame(&mut self, renderer: &mut dyn Renderer);

    /// Pointer pressed at a logical board point.
    fn on_input_start(&mut self, _point: InputPoint, _raw: &PointerEvent, _context: &SceneContext) {}

    /// Pointer moved to a logical board point.
    fn on_input_move(&mut self, _point: InputPoint, _raw: &PointerEvent, _context: &SceneContext) {}

    /// Pointer released.
    fn on_input_stop(&mut self, _raw: &PointerEvent, _context: &SceneContext) {}

    /// Physical key pressed.
    fn on_key_down(&mut self, _code: KeyCode) {}

    /// Colour used to clear the surface while this scene is active.
    fn background(&self) -> Option<ThemeColour> {
        None
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum TestScene {
        Board,
        Tutorial,
    }

    impl SceneKey for TestScene {}

    #[test]
    fn redirect_builder_sets_fields() {
        let redirect: Redirect<TestScene, u32> = Redirect::to(TestScene::Tutorial)
            .with_param(1)
            .reset_first();

        assert_eq!(redirect.scene, TestScene::Tutorial);
        assert_eq!(redirect.param, Some(1));
        assert!(redirect.reset_first);
    }

    #[test]
    fn plain_redirect_has_no_payload() {
        let redirect: Redirect<TestScene, ()> = Redirect::to(TestScene::Board);
        assert_eq!(redirect.param, None);
        assert!(!redirect.reset_first);
    }

    #[test]
    fn scene_context_exposes_board_geometry() {
        let config = EngineConfig::default();
        let tutorial = TutorialOverlay::new(&config);
        let context = SceneContext::new(&tutorial, None, &config, 0.5);

        assert_eq!(context.board_center(), InputPoint::new(240.0, 320.0));
        assert_eq!(context.board_radius(), 200.0);
        assert_eq!(context.crossfade(), 0.5);
        assert!(context.can_submit());
        assert!(context.bot().is_none());
    }
}
