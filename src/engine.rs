//=========================================================================
// Radum Engine
//
// Main entry point and coordinator for the engine.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──run()──>  [winit Platform]
//         │                          │
//         ├─ with_crossfade_duration()├─ change_scene()   (transitions)
//         ├─ with_input_interval()   ├─ frame() / tick() (frame loop)
//         └─ with_loading_scene()    └─ input_*()        (dispatch)
// ```
//
// Frame order:
//   clear(background) → previous scene (1 - crossfade) → active scene
//   (crossfade) → tutorial overlay → crossfade advance → command drain
//
//=========================================================================

//=== External Dependencies ===============================================

use std::marker::PhantomData;

use log::{debug, info, trace, warn};

//=== Internal Dependencies ===============================================

use crate::core::command::CommandQueue;
use crate::core::input::{KeyCode, PointerEvent};
use crate::core::{
    Bot, EngineCommand, EngineConfig, EngineError, EngineHandle, InputDispatcher, Millis,
    Renderer, Route, Scaler, SceneContext, SceneKey, SceneParam, SceneRegistry,
    TransitionState, TutorialOverlay, TutorialStage,
};
use crate::platform::{Platform, PlatformError};

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// Provides a fluent API for setting engine parameters before construction.
///
/// # Default Values
///
/// - **Crossfade**: 300 ms
/// - **Input interval**: 10 ms per category
/// - **Tutorial animation**: 300 ms
/// - **Max frame delta**: 250 ms
/// - **Max redirects**: 8 hops
/// - **Logical size**: 480 × 640
/// - **Board radius**: 200, **bot difficulty**: 2
///
/// # Examples
///
/// Simple usage with defaults:
/// ```no_run
/// # use radum_engine::prelude::*;
/// # #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// # enum GameScene { Loading, MainMenu }
/// # impl SceneKey for GameScene {}
/// # struct Canvas;
/// # impl Renderer for Canvas {
/// #     fn clear(&mut self, _: Option<ThemeColour>) {}
/// #     fn set_alpha(&mut self, _: f64) {}
/// #     fn rect(&mut self, _: Rect, _: ThemeColour, _: Option<ThemeColour>, _: f64, _: Anchor) {}
/// #     fn text(&mut self, _: &str, _: InputPoint, _: f64, _: ThemeColour, _: Anchor) {}
/// #     fn circle(&mut self, _: InputPoint, _: f64, _: ThemeColour, _: f64, _: Anchor) {}
/// # }
/// EngineBuilder::<GameScene>::new(GameScene::MainMenu)
///     .with_loading_scene(GameScene::Loading)
///     .build()
///     .run(Canvas)?;
/// # Ok::<(), PlatformError>(())
/// ```
///
/// Advanced configuration:
/// ```
/// # use radum_engine::prelude::*;
/// # #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// # enum GameScene { MainMenu }
/// # impl SceneKey for GameScene {}
/// let engine = EngineBuilder::<GameScene>::new(GameScene::MainMenu)
///     .with_crossfade_duration(500.0)   // Slower fades
///     .with_input_interval(16.0)        // One event per frame
///     .with_max_redirects(4)
///     .build();
///
/// assert_eq!(engine.config().crossfade_duration, 500.0);
/// ```
pub struct EngineBuilder<K: SceneKey, P: SceneParam = ()> {
    config: EngineConfig,
    home_scene: K,
    loading_scene: Option<K>,
    _phantom: PhantomData<P>,
}

impl<K: SceneKey, P: SceneParam> EngineBuilder<K, P> {
    /// Creates a new builder with default settings.
    ///
    /// `home_scene` is the scene shown by [`Engine::start`] and returned to
    /// by [`Engine::reset`].
    pub fn new(home_scene: K) -> Self {
        Self {
            config: EngineConfig::default(),
            home_scene,
            loading_scene: None,
            _phantom: PhantomData,
        }
    }

    /// Sets how long a scene crossfade takes.
    ///
    /// Input is locked for the whole crossfade.
    ///
    /// Default: 300.0
    ///
    /// # Panics
    ///
    /// Panics if `millis <= 0.0`.
    pub fn with_crossfade_duration(mut self, millis: Millis) -> Self {
        assert!(millis > 0.0, "Crossfade duration must be positive, got {}", millis);
        self.config.crossfade_duration = millis;
        self
    }

    /// Sets the minimum interval between accepted start, move and stop
    /// events (each category is gated separately).
    ///
    /// Default: 10.0
    ///
    /// # Panics
    ///
    /// Panics if `millis < 0.0`.
    pub fn with_input_interval(mut self, millis: Millis) -> Self {
        assert!(millis >= 0.0, "Input interval must not be negative, got {}", millis);
        self.config.input_interval = millis;
        self
    }

    /// Sets the slide-in time of tutorial message panels.
    ///
    /// Default: 300.0
    ///
    /// # Panics
    ///
    /// Panics if `millis <= 0.0`.
    pub fn with_tutorial_animation(mut self, millis: Millis) -> Self {
        assert!(millis > 0.0, "Tutorial animation must be positive, got {}", millis);
        self.config.tutorial_animation = millis;
        self
    }

    /// Caps the delta handed to a single frame (e.g. after the window was
    /// hidden for a while).
    ///
    /// Default: 250.0
    ///
    /// # Panics
    ///
    /// Panics if `millis <= 0.0`.
    pub fn with_max_frame_delta(mut self, millis: Millis) -> Self {
        assert!(millis > 0.0, "Max frame delta must be positive, got {}", millis);
        self.config.max_frame_delta = millis;
        self
    }

    /// Sets how many `activate` redirects one scene change may follow
    /// before failing with [`EngineError::RedirectLimit`].
    ///
    /// Default: 8
    pub fn with_max_redirects(mut self, hops: usize) -> Self {
        self.config.max_redirects = hops;
        self
    }

    /// Sets the logical canvas size in board coordinates.
    ///
    /// Default: 480 × 640
    ///
    /// # Panics
    ///
    /// Panics if either dimension is not positive.
    pub fn with_logical_size(mut self, width: f64, height: f64) -> Self {
        assert!(width > 0.0 && height > 0.0, "Logical size must be positive, got {}x{}", width, height);
        self.config.logical_size = (width, height);
        self
    }

    /// Default: 200.0
    ///
    /// # Panics
    ///
    /// Panics if `radius <= 0.0`.
    pub fn with_board_radius(mut self, radius: f64) -> Self {
        assert!(radius > 0.0, "Board radius must be positive, got {}", radius);
        self.config.board_radius = radius;
        self
    }

    /// Default: 2
    pub fn with_bot_difficulty(mut self, difficulty: u8) -> Self {
        self.config.bot_difficulty = difficulty;
        self
    }

    /// Default: "Radum"
    pub fn with_window_title(mut self, title: impl Into<String>) -> Self {
        self.config.window_title = title.into();
        self
    }

    /// Scene shown by [`Engine::boot`] before the game starts.
    ///
    /// Without one, `boot` goes straight to the home scene.
    pub fn with_loading_scene(mut self, scene: K) -> Self {
        self.loading_scene = Some(scene);
        self
    }

    /// Builds the engine instance.
    ///
    /// Consumes the builder and produces a configured [`Engine`] with an
    /// empty scene registry. Register scenes with [`Engine::init`].
    pub fn build(self) -> Engine<K, P> {
        info!(
            target: "engine",
            "Building engine (home: {:?}, crossfade: {} ms, input interval: {} ms)",
            self.home_scene,
            self.config.crossfade_duration,
            self.config.input_interval
        );

        Engine {
            input: InputDispatcher::new(&self.config),
            tutorial: TutorialOverlay::new(&self.config),
            scenes: SceneRegistry::new(),
            transition: TransitionState::new(),
            commands: CommandQueue::new(),
            bot: None,
            keyboard_open: false,
            last_frame: None,
            home_scene: self.home_scene,
            loading_scene: self.loading_scene,
            config: self.config,
        }
    }
}

//=== Engine ==============================================================

/// Radum engine runtime.
///
/// Owns the scene registry, the crossfade state, the input dispatcher,
/// the tutorial overlay and the optional AI bot. Everything runs on the
/// caller's thread; `frame`/`tick` and the `input_*` methods are expected
/// to be called from one event loop.
///
/// # Examples
///
/// Driving the engine by hand (tests, custom hosts):
/// ```
/// # use radum_engine::prelude::*;
/// # #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// # enum GameScene { MainMenu }
/// # impl SceneKey for GameScene {}
/// # struct Menu;
/// # impl Scene<GameScene> for Menu {
/// #     fn do_frame(&mut self, _: f64, _: &SceneContext) {}
/// #     fn draw_frame(&mut self, _: &mut dyn Renderer) {}
/// # }
/// # struct Canvas;
/// # impl Renderer for Canvas {
/// #     fn clear(&mut self, _: Option<ThemeColour>) {}
/// #     fn set_alpha(&mut self, _: f64) {}
/// #     fn rect(&mut self, _: Rect, _: ThemeColour, _: Option<ThemeColour>, _: f64, _: Anchor) {}
/// #     fn text(&mut self, _: &str, _: InputPoint, _: f64, _: ThemeColour, _: Anchor) {}
/// #     fn circle(&mut self, _: InputPoint, _: f64, _: ThemeColour, _: f64, _: Anchor) {}
/// # }
/// let mut engine = EngineBuilder::<GameScene>::new(GameScene::MainMenu)
///     .build()
///     .init(|scenes, _handle| scenes.register_scene(GameScene::MainMenu, Menu));
///
/// engine.start()?;
/// assert!(engine.is_input_locked());
///
/// let mut canvas = Canvas;
/// engine.frame(0.0, &mut canvas)?;
/// engine.frame(200.0, &mut canvas)?;
/// engine.frame(400.0, &mut canvas)?;
/// assert!(!engine.is_input_locked());
/// # Ok::<(), EngineError<GameScene>>(())
/// ```
pub struct Engine<K: SceneKey, P: SceneParam = ()> {
    config: EngineConfig,
    home_scene: K,
    loading_scene: Option<K>,
    scenes: SceneRegistry<K, P>,
    transition: TransitionState<K>,
    input: InputDispatcher,
    tutorial: TutorialOverlay,
    bot: Option<Bot>,
    keyboard_open: bool,
    last_frame: Option<Millis>,
    commands: CommandQueue<K, P>,
}

impl<K: SceneKey, P: SceneParam> Engine<K, P> {
    //--- Initialization ---------------------------------------------------

    /// Registers scenes before execution.
    ///
    /// The closure receives the scene registry and a handle that scenes
    /// can keep for issuing [`EngineCommand`]s later.
    pub fn init<F>(mut self, init_fn: F) -> Self
    where
        F: FnOnce(&mut SceneRegistry<K, P>, &EngineHandle<K, P>),
    {
        info!(target: "engine", "Initializing engine scenes");

        let handle = self.commands.handle();
        init_fn(&mut self.scenes, &handle);

        info!(target: "engine", "Engine initialization complete ({} scenes)", self.scenes.len());
        self
    }

    /// Returns a new command handle.
    pub fn handle(&self) -> EngineHandle<K, P> {
        self.commands.handle()
    }

    //--- Lifecycle --------------------------------------------------------

    /// Activates the loading scene, or the home scene when none is set.
    pub fn boot(&mut self) -> Result<K, EngineError<K>> {
        let first = self.loading_scene.unwrap_or(self.home_scene);
        info!(target: "engine", "Booting into {:?}", first);
        self.change_scene(first, None, false)
    }

    /// Switches to the home scene.
    pub fn start(&mut self) -> Result<K, EngineError<K>> {
        self.change_scene(self.home_scene, None, false)
    }

    /// Resets the active scene, discards the AI bot and returns home.
    pub fn reset(&mut self) -> Result<K, EngineError<K>> {
        if let Some(active) = self.transition.active() {
            self.scenes.get_mut(active)?.reset();
        }
        if self.bot.take().is_some() {
            debug!(target: "engine", "AI bot discarded on reset");
        }
        self.change_scene(self.home_scene, None, false)
    }

    //--- Scene Transitions ------------------------------------------------

    /// Makes `scene` the active scene and starts a crossfade.
    ///
    /// The target may redirect from its `activate` hook; redirects are
    /// followed within the same transition (the crossfade is restarted
    /// once, and only the redirect's own `reset_first` applies to its
    /// target). Returns the scene that ended up active.
    ///
    /// # Errors
    ///
    /// - [`EngineError::UnknownScene`] if a scene in the chain is not
    ///   registered.
    /// - [`EngineError::RedirectLimit`] if the chain follows more than
    ///   `max_redirects` redirects.
    ///
    /// On error the active scene and crossfade are left untouched.
    pub fn change_scene(&mut self, scene: K, param: Option<P>, reset_first: bool) -> Result<K, EngineError<K>> {
        let mut target = scene;
        let mut param = param;
        let mut reset_first = reset_first;
        let mut chain = vec![scene];
        let active = self.transition.active();

        loop {
            let next = self.scenes.get_mut(target)?;
            if reset_first {
                next.reset();
            }

            let Some(redirect) = next.activate(param) else {
                break;
            };
            // The active scene is deactivated once, as the outgoing scene.
            if Some(target) != active {
                next.on_deactivate();
            }
            debug!(target: "engine::scene", "Scene {:?} redirected to {:?}", target, redirect.scene);

            chain.push(redirect.scene);
            if chain.len() - 1 > self.config.max_redirects {
                return Err(EngineError::RedirectLimit {
                    limit: self.config.max_redirects,
                    chain,
                });
            }

            target = redirect.scene;
            param = redirect.param;
            reset_first = redirect.reset_first;
        }

        self.transition.begin();
        if let Some(outgoing) = self.transition.commit(target) {
            self.scenes.get_mut(outgoing)?.on_deactivate();
            debug!(target: "engine::scene", "Deactivated {:?}", outgoing);
        }

        debug!(target: "engine::scene", "Activated {:?}", target);
        Ok(target)
    }

    //--- Frame Loop -------------------------------------------------------

    /// Runs one frame at host timestamp `now`.
    ///
    /// The first frame has a delta of zero.
    pub fn frame(&mut self, now: Millis, renderer: &mut dyn Renderer) -> Result<(), EngineError<K>> {
        let delta = self.last_frame.map_or(0.0, |last| now - last);
        self.last_frame = Some(now);
        self.tick(delta, renderer)
    }

    /// Runs one frame with an explicit `delta`.
    ///
    /// Negative or non-finite deltas become zero; large ones are capped
    /// at `max_frame_delta`.
    pub fn tick(&mut self, delta: Millis, renderer: &mut dyn Renderer) -> Result<(), EngineError<K>> {
        let delta = if delta.is_finite() {
            delta.clamp(0.0, self.config.max_frame_delta)
        } else {
            0.0
        };

        let active = self.transition.active().ok_or(EngineError::NoActiveScene)?;
        let crossfade = self.transition.crossfade();
        let frozen = self.tutorial.is_active() && self.tutorial.is_blocking();

        renderer.clear(self.scenes.get_mut(active)?.background());

        //--- 1. Outgoing scene --------------------------------------------
        if let Some(previous) = self.transition.previous() {
            renderer.set_alpha(1.0 - crossfade);
            let scene = self.scenes.get_mut(previous)?;
            if !frozen {
                let context = SceneContext::new(&self.tutorial, self.bot.as_ref(), &self.config, crossfade);
                scene.do_frame(delta, &context);
            }
            scene.draw_frame(renderer);
        }

        //--- 2. Active scene ----------------------------------------------
        renderer.set_alpha(crossfade);
        let scene = self.scenes.get_mut(active)?;
        if !frozen {
            let context = SceneContext::new(&self.tutorial, self.bot.as_ref(), &self.config, crossfade);
            scene.do_frame(delta, &context);
        }
        scene.draw_frame(renderer);

        //--- 3. Tutorial overlay ------------------------------------------
        if self.tutorial.is_active() {
            self.tutorial.update(delta);
            self.tutorial.draw(renderer);
        }

        //--- 4. Crossfade -------------------------------------------------
        if self.transition.advance(delta, self.config.crossfade_duration) {
            debug!(target: "engine::scene", "Crossfade into {:?} complete", active);
        }

        self.drain_commands()
    }

    //--- Input Dispatch ---------------------------------------------------

    /// Dispatches a pointer press (mouse down / touch start).
    pub fn input_start(&mut self, event: &PointerEvent, now: Millis) -> Result<Route, EngineError<K>> {
        let blocking = self.tutorial.is_active() && self.tutorial.is_blocking();
        let route = self
            .input
            .route_start(event, now, self.transition.is_locked(), blocking);

        match route {
            Route::Tutorial => self.tutorial.advance(),
            Route::Scene(point) => {
                let scene = self.scenes.get_mut(self.transition.active().ok_or(EngineError::NoActiveScene)?)?;
                let context = SceneContext::new(&self.tutorial, self.bot.as_ref(), &self.config, self.transition.crossfade());
                scene.on_input_start(point, event, &context);
            }
            Route::Dropped(_) | Route::SceneRaw => {}
        }

        self.drain_commands()?;
        Ok(route)
    }

    /// Dispatches pointer motion.
    pub fn input_move(&mut self, event: &PointerEvent, now: Millis) -> Result<Route, EngineError<K>> {
        let route = self.input.route_move(event, now, self.transition.is_locked());

        if let Route::Scene(point) = route {
            let scene = self.scenes.get_mut(self.transition.active().ok_or(EngineError::NoActiveScene)?)?;
            let context = SceneContext::new(&self.tutorial, self.bot.as_ref(), &self.config, self.transition.crossfade());
            scene.on_input_move(point, event, &context);
        }

        self.drain_commands()?;
        Ok(route)
    }

    /// Dispatches a pointer release (mouse up / touch end).
    pub fn input_stop(&mut self, event: &PointerEvent, now: Millis) -> Result<Route, EngineError<K>> {
        let route = self.input.route_stop(now, self.transition.is_locked());

        if route == Route::SceneRaw {
            let scene = self.scenes.get_mut(self.transition.active().ok_or(EngineError::NoActiveScene)?)?;
            let context = SceneContext::new(&self.tutorial, self.bot.as_ref(), &self.config, self.transition.crossfade());
            scene.on_input_stop(event, &context);
        }

        self.drain_commands()?;
        Ok(route)
    }

    /// Forwards a key press to the active scene (not rate-gated).
    pub fn key_down(&mut self, code: KeyCode) -> Result<Route, EngineError<K>> {
        let route = self.input.route_key(code, self.transition.is_locked());

        if route == Route::SceneRaw {
            trace!(target: "engine::input", "key {:?} forwarded", code);
            self.scenes
                .get_mut(self.transition.active().ok_or(EngineError::NoActiveScene)?)?
                .on_key_down(code);
        }

        self.drain_commands()?;
        Ok(route)
    }

    //--- Commands ---------------------------------------------------------

    /// Applies queued [`EngineCommand`]s.
    ///
    /// Called automatically after every frame and input dispatch.
    pub fn drain_commands(&mut self) -> Result<(), EngineError<K>> {
        for _ in 0..CommandQueue::<K, P>::MAX_PER_DRAIN {
            let Some(command) = self.commands.next() else {
                return Ok(());
            };
            self.apply(command)?;
        }

        let pending = self.commands.len();
        if pending > 0 {
            warn!(target: "engine", "Command backlog: {} commands deferred to next drain", pending);
        }
        Ok(())
    }

    fn apply(&mut self, command: EngineCommand<K, P>) -> Result<(), EngineError<K>> {
        trace!(target: "engine", "Applying {:?}", command);
        match command {
            EngineCommand::ChangeScene {
                scene,
                param,
                reset_first,
            } => self.change_scene(scene, param, reset_first).map(|_| ()),
            EngineCommand::Start => self.start().map(|_| ()),
            EngineCommand::Reset => self.reset().map(|_| ()),
            EngineCommand::SetBot(enabled) => {
                self.set_bot(enabled);
                Ok(())
            }
            EngineCommand::ToggleKeyboard(open) => {
                self.toggle_keyboard(open);
                Ok(())
            }
            EngineCommand::StartTutorial(stages) => {
                self.start_tutorial(stages);
                Ok(())
            }
            EngineCommand::AdvanceTutorial => {
                self.tutorial.advance();
                Ok(())
            }
            EngineCommand::EndTutorial => {
                self.end_tutorial();
                Ok(())
            }
        }
    }

    //--- AI Bot -----------------------------------------------------------

    /// Creates a fresh AI bot, or discards the current one.
    pub fn set_bot(&mut self, enabled: bool) {
        self.bot = enabled.then(|| {
            Bot::new(
                self.config.bot_difficulty,
                self.config.board_radius,
                self.config.board_center(),
            )
        });
        debug!(target: "engine", "AI bot {}", if enabled { "created" } else { "removed" });
    }

    pub fn bot(&self) -> Option<&Bot> {
        self.bot.as_ref()
    }

    //--- Keyboard Proxy & Resize ------------------------------------------

    /// Closes any open on-screen keyboard, then opens one if requested.
    ///
    /// Resizes are ignored while the keyboard is open.
    pub fn toggle_keyboard(&mut self, open: bool) {
        if self.keyboard_open {
            debug!(target: "engine", "Keyboard proxy closed");
            self.keyboard_open = false;
        }
        if open {
            debug!(target: "engine", "Keyboard proxy opened");
            self.keyboard_open = true;
        }
    }

    pub fn is_keyboard_open(&self) -> bool {
        self.keyboard_open
    }

    /// Refits the input scaler to a new window size.
    ///
    /// Returns `false` when the resize was suppressed by the keyboard proxy.
    pub fn resize(&mut self, window_width: f64, window_height: f64) -> bool {
        if self.keyboard_open {
            trace!(target: "engine", "Resize to {}x{} suppressed by keyboard", window_width, window_height);
            return false;
        }
        self.input.fit(window_width, window_height);
        true
    }

    //--- Tutorial ---------------------------------------------------------

    pub fn start_tutorial(&mut self, stages: Vec<TutorialStage>) {
        self.tutorial.init(stages);
    }

    pub fn end_tutorial(&mut self) {
        self.tutorial.deactivate();
    }

    pub fn tutorial(&self) -> &TutorialOverlay {
        &self.tutorial
    }

    pub fn tutorial_mut(&mut self) -> &mut TutorialOverlay {
        &mut self.tutorial
    }

    //--- Queries ----------------------------------------------------------

    pub fn active_scene(&self) -> Option<K> {
        self.transition.active()
    }

    /// Scene currently fading out, if a crossfade is in flight.
    pub fn previous_scene(&self) -> Option<K> {
        self.transition.previous()
    }

    pub fn crossfade(&self) -> f64 {
        self.transition.crossfade()
    }

    /// `true` while a crossfade holds the input lock.
    pub fn is_input_locked(&self) -> bool {
        self.transition.is_locked()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn scaler(&self) -> &Scaler {
        self.input.scaler()
    }

    pub fn scenes(&self) -> &SceneRegistry<K, P> {
        &self.scenes
    }

    //--- Execution --------------------------------------------------------

    /// Opens a window and runs the engine until it is closed.
    ///
    /// Boots the engine first if no scene is active yet. Frames are driven
    /// by the window's redraw requests and drawn through `renderer`.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if booting fails or the event loop cannot
    /// be created.
    pub fn run<R: Renderer>(mut self, renderer: R) -> Result<(), PlatformError> {
        info!(target: "engine", "Starting engine runtime");

        if self.active_scene().is_none() {
            self.boot().map_err(|err| PlatformError::Engine(err.to_string()))?;
        }

        let result = Platform::new(self, renderer).run();

        info!(target: "engine", "Engine shutdown complete");
        result
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
