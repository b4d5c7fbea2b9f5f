//=========================================================================
// Platform Subsystem
//
// Hosts the engine inside a Winit window on the main thread.
//
// Architecture:
// ```text
//  Main Thread:
//  ┌────────────────────────────────────────────┐
//  │  Winit Event Loop                          │
//  │   ↓                                        │
//  │  InputProcessor                            │
//  │   ├─ Converts Winit → PointerEvent/KeyCode │
//  │   └─ Tracks cursor position                │
//  │   ↓                                        │
//  │  Engine::input_start / move / stop / key   │
//  │                                            │
//  │  RedrawRequested                           │
//  │   ↓                                        │
//  │  Engine::frame(now, renderer)              │
//  │   ↓                                        │
//  │  window.request_redraw()  (next frame)     │
//  └────────────────────────────────────────────┘
// ```
//
// Key Design Decisions:
// - **RedrawRequested = frame boundary**: each redraw runs one engine
//   frame and immediately requests the next one
// - **Single thread**: input handlers and frames never overlap
// - **Fatal engine errors exit the loop**: an unknown scene or a redirect
//   cycle is logged and the window closes
// - **Main thread requirement**: Winit mandates main thread on macOS/iOS,
//   so this runs on the thread that called `Engine::run()`
//
// Responsibilities:
// - Create and manage OS window
// - Convert Winit input to engine pointer and key events
// - Refit the engine's scaler on resize
// - Mirror the engine's keyboard proxy onto IME enablement
//
//=========================================================================

//=== Submodules ==========================================================

mod input_processor;

//=== External Crates =====================================================

use std::time::Instant;

use log::*;
use thiserror::Error;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    error::EventLoopError,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

//=== Internal Imports ====================================================

use crate::core::input::PointerEvent;
use crate::core::{EngineError, Millis, Renderer, SceneKey, SceneParam};
use crate::engine::Engine;
use input_processor::{InputProcessor, PointerPhase};

//=== PlatformError =======================================================

/// Platform initialization and runtime errors.
///
/// These are fatal - if the event loop can't be created or the engine
/// cannot boot, there is nothing to run.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// Failed to create event loop (rare, indicates OS-level issue).
    #[error("Event loop creation failed: {0}")]
    EventLoopCreation(#[source] EventLoopError),

    /// Event loop execution error (rare, indicates corruption).
    #[error("Event loop error: {0}")]
    EventLoopExecution(#[source] EventLoopError),

    /// The engine failed to activate its first scene.
    #[error("Engine failed to boot: {0}")]
    Engine(String),
}

//=== Platform ============================================================

/// Window host driving an [`Engine`] from Winit events.
///
/// # Lifecycle
///
/// 1. **Construction**: `Platform::new(engine, renderer)`
/// 2. **Execution**: `platform.run()` - starts event loop (blocks)
/// 3. **Event processing**: Winit calls `ApplicationHandler` methods
/// 4. **Shutdown**: User closes window or a fatal engine error occurs
///
/// # Fields
///
/// - `window`: Created lazily in `resumed()` (mobile compatibility)
/// - `engine`: The engine being hosted
/// - `renderer`: Drawing surface handed to every frame
/// - `input_processor`: Converts Winit events → engine events
/// - `started`: Clock origin for frame and input timestamps
pub(crate) struct Platform<K: SceneKey, P: SceneParam, R: Renderer> {
    window: Option<Window>,
    engine: Engine<K, P>,
    renderer: R,
    input_processor: InputProcessor,
    started: Instant,
    ime_allowed: bool,
}

impl<K: SceneKey, P: SceneParam, R: Renderer> Platform<K, P, R> {
    //--- Construction -----------------------------------------------------

    /// Wraps an engine. Does not create the window yet.
    pub fn new(engine: Engine<K, P>, renderer: R) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            window: None,
            engine,
            renderer,
            input_processor: InputProcessor::new(),
            started: Instant::now(),
            ime_allowed: false,
        }
    }

    //--- Execution --------------------------------------------------------

    /// Starts the event loop and blocks until it exits.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the event loop cannot be created or
    /// fails while running.
    ///
    /// # Panics
    ///
    /// Panics if called off the main thread (macOS/iOS Winit requirement).
    pub fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting Winit event loop");

        let event_loop = EventLoop::new().map_err(PlatformError::EventLoopCreation)?;

        event_loop
            .run_app(&mut self)
            .map_err(PlatformError::EventLoopExecution)
    }

    //--- Internal Helpers -------------------------------------------------

    /// Milliseconds since the platform was created.
    fn now(&self) -> Millis {
        self.started.elapsed().as_secs_f64() * 1000.0
    }

    /// Routes one pointer event to the matching engine handler.
    fn dispatch_pointer(&mut self, phase: PointerPhase, event: PointerEvent) -> Result<(), EngineError<K>> {
        let now = self.now();
        let route = match phase {
            PointerPhase::Start => self.engine.input_start(&event, now)?,
            PointerPhase::Move => self.engine.input_move(&event, now)?,
            PointerPhase::Stop => self.engine.input_stop(&event, now)?,
        };
        trace!(target: "platform::input", "{:?} routed to {:?}", phase, route);
        Ok(())
    }

    /// Runs one engine frame and keeps the IME in step with the keyboard
    /// proxy.
    fn redraw(&mut self) -> Result<(), EngineError<K>> {
        let now = self.now();
        self.engine.frame(now, &mut self.renderer)?;

        let keyboard_open = self.engine.is_keyboard_open();
        if keyboard_open != self.ime_allowed {
            if let Some(window) = &self.window {
                window.set_ime_allowed(keyboard_open);
            }
            self.ime_allowed = keyboard_open;
        }

        Ok(())
    }

    fn handle_result(result: Result<(), EngineError<K>>, event_loop: &ActiveEventLoop) {
        if let Err(err) = result {
            error!(target: "platform", "Engine error, shutting down: {}", err);
            event_loop.exit();
        }
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    pub(crate) fn window(&self) -> Option<&Window> {
        self.window.as_ref()
    }
}

//=== Winit Integration ===================================================

impl<K: SceneKey, P: SceneParam, R: Renderer> ApplicationHandler for Platform<K, P, R> {
    /// Called when app becomes active (startup or mobile resume).
    ///
    /// Creates the window if it doesn't exist yet. On mobile, this may be
    /// called multiple times (suspend/resume cycle).
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        let config = self.engine.config();
        let (width, height) = config.logical_size;
        let attrs = WindowAttributes::default()
            .with_title(config.window_title.clone())
            .with_inner_size(LogicalSize::new(width, height));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                let size = window.inner_size();
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    size.width,
                    size.height,
                    window.scale_factor()
                );
                self.engine.resize(f64::from(size.width), f64::from(size.height));
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                event_loop.exit();
            }
        }
    }

    /// Handles per-window events.
    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if !self.engine.resize(f64::from(size.width), f64::from(size.height)) {
                    debug!(target: "platform", "Resize ignored while keyboard is open");
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                let pointer = self.input_processor.process_cursor_moved(position.x, position.y);
                let result = self.dispatch_pointer(PointerPhase::Move, pointer);
                Self::handle_result(result, event_loop);
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let (phase, pointer) = self.input_processor.process_mouse_button(button, state);
                let result = self.dispatch_pointer(phase, pointer);
                Self::handle_result(result, event_loop);
            }

            WindowEvent::Touch(touch) => {
                let (phase, pointer) = self.input_processor.process_touch(
                    touch.id,
                    touch.location.x,
                    touch.location.y,
                    touch.phase,
                );
                let result = self.dispatch_pointer(phase, pointer);
                Self::handle_result(result, event_loop);
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                match self.input_processor.process_key_event(&key_event) {
                    Some(code) => {
                        let result = self.engine.key_down(code).map(|_| ());
                        Self::handle_result(result, event_loop);
                    }
                    None => trace!(target: "platform::input", "Unmapped key or release ignored"),
                }
            }

            WindowEvent::RedrawRequested => {
                let result = self.redraw();
                Self::handle_result(result, event_loop);

                // Request next frame
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {
                // Ignore: Focused, ScaleFactorChanged, etc.
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{InputPoint, PointerEvent};
    use crate::core::render::{Anchor, Rect, ThemeColour};
    use crate::core::{Route, Scene, SceneContext};
    use crate::engine::EngineBuilder;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum TestScene {
        Main,
    }

    impl SceneKey for TestScene {}

    struct Idle;

    impl Scene<TestScene> for Idle {
        fn do_frame(&mut self, _delta: Millis, _context: &SceneContext) {}
        fn draw_frame(&mut self, _renderer: &mut dyn Renderer) {}
    }

    struct NullRenderer;

    impl Renderer for NullRenderer {
        fn clear(&mut self, _: Option<ThemeColour>) {}
        fn set_alpha(&mut self, _: f64) {}
        fn rect(&mut self, _: Rect, _: ThemeColour, _: Option<ThemeColour>, _: f64, _: Anchor) {}
        fn text(&mut self, _: &str, _: InputPoint, _: f64, _: ThemeColour, _: Anchor) {}
        fn circle(&mut self, _: InputPoint, _: f64, _: ThemeColour, _: f64, _: Anchor) {}
    }

    fn platform() -> Platform<TestScene, (), NullRenderer> {
        let engine = EngineBuilder::new(TestScene::Main)
            .build()
            .init(|scenes, _| scenes.register_scene(TestScene::Main, Idle));
        Platform::new(engine, NullRenderer)
    }

    //=====================================================================
    // Platform Tests
    //=====================================================================

    #[test]
    fn platform_creation() {
        let platform = platform();
        assert!(platform.window().is_none(), "Window should be created lazily");
    }

    #[test]
    fn clock_is_monotonic() {
        let platform = platform();
        let first = platform.now();
        let second = platform.now();
        assert!(second >= first);
    }

    #[test]
    fn redraw_without_active_scene_is_an_error() {
        let mut platform = platform();
        assert_eq!(platform.redraw(), Err(EngineError::NoActiveScene));
    }

    #[test]
    fn redraw_tracks_keyboard_proxy_without_window() {
        let mut platform = platform();
        platform.engine.boot().unwrap();
        platform.engine.toggle_keyboard(true);

        assert!(platform.redraw().is_ok());
        assert!(platform.ime_allowed);
    }

    #[test]
    fn pointer_dispatch_respects_transition_lock() {
        let mut platform = platform();
        platform.engine.boot().unwrap();

        assert!(platform.dispatch_pointer(PointerPhase::Start, PointerEvent::mouse(1.0, 1.0)).is_ok());
        assert_eq!(
            platform.engine.input_stop(&PointerEvent::mouse(1.0, 1.0), 1_000.0).unwrap(),
            Route::Dropped(crate::core::DropReason::Locked)
        );
    }

    //=====================================================================
    // PlatformError Tests
    //=====================================================================

    #[test]
    fn platform_error_is_error_trait() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<PlatformError>();
    }

    #[test]
    fn platform_error_display_format() {
        let err = PlatformError::Engine(String::from("scene Main is not registered"));
        assert_eq!(err.to_string(), "Engine failed to boot: scene Main is not registered");
    }
}
