//=========================================================================
// Scene Registry
//=========================================================================
//
// Name-to-instance lookup for every scene of the game.
//
// Scenes are stored in a HashMap by key and live for the lifetime of the
// engine. The transition engine only ever holds keys, so a scene keeps
// its state between activations.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::{Scene, SceneParam};
use crate::core::error::EngineError;

//=== Scene Key Trait =====================================================

/// Marker trait for scene identifiers.
///
/// Scene keys uniquely identify scenes in the registry. Typically
/// implemented by a game-specific enum (`MainMenu`, `GameBoard`, ...).
pub trait SceneKey: Clone + Copy + Eq + Hash + Debug + Send + 'static {}

//=== Scene Registry ======================================================

/// Owns every registered scene, keyed by [`SceneKey`].
pub struct SceneRegistry<K: SceneKey, P: SceneParam = ()> {
    scenes: HashMap<K, Box<dyn Scene<K, P>>>,
}

impl<K: SceneKey, P: SceneParam> SceneRegistry<K, P> {
    //--- Construction -----------------------------------------------------

    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            scenes: HashMap::new(),
        }
    }

    //--- Registration -----------------------------------------------------

    /// Registers a scene under `key`.
    ///
    /// The scene is automatically boxed for storage. Registering a key
    /// twice replaces the earlier scene.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use radum_engine::prelude::*;
    /// # #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    /// # enum GameScene { Menu }
    /// # impl SceneKey for GameScene {}
    /// # struct MenuScene;
    /// # impl Scene<GameScene> for MenuScene {
    /// #     fn do_frame(&mut self, _delta: f64, _ctx: &SceneContext) {}
    /// #     fn draw_frame(&mut self, _renderer: &mut dyn Renderer) {}
    /// # }
    /// let mut registry = SceneRegistry::<GameScene>::new();
    /// registry.register_scene(GameScene::Menu, MenuScene);
    /// assert!(registry.contains(GameScene::Menu));
    /// ```
    pub fn register_scene<T>(&mut self, key: K, scene: T)
    where
        T: Scene<K, P> + 'static,
    {
        if self.scenes.insert(key, Box::new(scene)).is_some() {
            warn!(target: "engine::scene", "Scene {:?} was already registered and has been replaced", key);
        } else {
            debug!(target: "engine::scene", "Registered scene {:?}", key);
        }
    }

    //--- Lookup -----------------------------------------------------------

    /// Returns the scene registered under `key`.
    ///
    /// # Errors
    ///
    /// [`EngineError::UnknownScene`] if nothing is registered under `key`.
    pub fn get_mut(&mut self, key: K) -> Result<&mut (dyn Scene<K, P> + 'static), EngineError<K>> {
        self.scenes
            .get_mut(&key)
            .map(|scene| scene.as_mut())
            .ok_or(EngineError::UnknownScene(key))
    }

    pub fn contains(&self, key: K) -> bool {
        self.scenes.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }
}

impl<K: SceneKey, P: SceneParam> Default for SceneRegistry<K, P> {
    fn default() -> Self {
        Self::new()
    }
}

//=== Tests ===============================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    use crate::core::config::Millis;
    use crate::core::render::Renderer;
    use crate::core::scene::SceneContext;

    #[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
    enum TestScene {
        Menu,
        Board,
    }

    impl SceneKey for TestScene {}

    struct Counter {
        resets: Rc<Cell<u32>>,
    }

    impl Counter {
        fn new() -> Self {
            Self { resets: Rc::new(Cell::new(0)) }
        }
    }

    impl Scene<TestScene> for Counter {
        fn reset(&mut self) {
            self.resets.set(self.resets.get() + 1);
        }

        fn do_frame(&mut self, _delta: Millis, _context: &SceneContext) {}

        fn draw_frame(&mut self, _renderer: &mut dyn Renderer) {}
    }

    #[test]
    fn new_registry_is_empty() {
        let registry = SceneRegistry::<TestScene>::new();
        assert!(registry.is_empty());
        assert!(!registry.contains(TestScene::Menu));
    }

    #[test]
    fn registered_scene_is_resolvable() {
        let mut registry = SceneRegistry::<TestScene>::new();
        registry.register_scene(TestScene::Menu, Counter::new());

        assert!(registry.contains(TestScene::Menu));
        assert!(registry.get_mut(TestScene::Menu).is_ok());
    }

    #[test]
    fn unknown_key_is_typed_error() {
        let mut registry = SceneRegistry::<TestScene>::new();
        registry.register_scene(TestScene::Menu, Counter::new());

        let err = registry.get_mut(TestScene::Board).err();
        assert_eq!(err, Some(EngineError::UnknownScene(TestScene::Board)));
    }

    #[test]
    fn re_registering_replaces_scene() {
        let mut registry = SceneRegistry::<TestScene>::new();
        registry.register_scene(TestScene::Menu, Counter::new());
        registry.register_scene(TestScene::Menu, Counter::new());

        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn scene_state_survives_lookups() {
        let scene = Counter::new();
        let resets = Rc::clone(&scene.resets);
        let mut registry = SceneRegistry::<TestScene>::new();
        registry.register_scene(TestScene::Board, scene);

        registry.get_mut(TestScene::Board).unwrap().reset();
        registry.get_mut(TestScene::Board).unwrap().reset();

        assert_eq!(resets.get(), 2);
    }
}
