//! Shared test doubles: a scene and a renderer that append every call to
//! one ordered journal.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use radum_engine::prelude::*;

// =============================================================================
// Scene Keys & Params
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameScene {
    Loading,
    MainMenu,
    GameBoard,
    Tutorial,
    Lobby,
}

impl SceneKey for GameScene {}

pub const ALL_SCENES: [GameScene; 5] = [
    GameScene::Loading,
    GameScene::MainMenu,
    GameScene::GameBoard,
    GameScene::Tutorial,
    GameScene::Lobby,
];

#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    Mode(&'static str),
    Step(u32),
}

pub type TestEngine = Engine<GameScene, Param>;

// =============================================================================
// Journal
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Activate(GameScene, Option<Param>),
    Deactivate(GameScene),
    Reset(GameScene),
    Frame(GameScene, f64),
    Draw(GameScene),
    Start(GameScene, InputPoint),
    Move(GameScene, InputPoint),
    Stop(GameScene),
    Key(GameScene, KeyCode),
    Clear(Option<ThemeColour>),
    Alpha(f64),
    Primitive,
}

#[derive(Clone, Default)]
pub struct Journal(Rc<RefCell<Vec<Event>>>);

impl Journal {
    pub fn push(&self, event: Event) {
        self.0.borrow_mut().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.borrow().clone()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    pub fn count(&self, predicate: impl Fn(&Event) -> bool) -> usize {
        self.0.borrow().iter().filter(|event| predicate(event)).count()
    }

    pub fn count_of(&self, event: &Event) -> usize {
        self.count(|e| e == event)
    }

    /// Events a scene received through its input hooks.
    pub fn inputs_for(&self, key: GameScene) -> usize {
        self.count(|e| {
            matches!(e,
                Event::Start(k, _) | Event::Move(k, _) | Event::Stop(k) | Event::Key(k, _)
                if *k == key)
        })
    }
}

// =============================================================================
// RecordingScene
// =============================================================================

pub struct RecordingScene {
    key: GameScene,
    journal: Journal,
    redirect: Option<Redirect<GameScene, Param>>,
    redirect_after: usize,
    activations: usize,
    background: Option<ThemeColour>,
    on_start: Option<Box<dyn FnMut()>>,
}

impl RecordingScene {
    pub fn new(key: GameScene, journal: &Journal) -> Self {
        Self {
            key,
            journal: journal.clone(),
            redirect: None,
            redirect_after: 0,
            activations: 0,
            background: None,
            on_start: None,
        }
    }

    /// Declines every activation in favour of `redirect`.
    pub fn redirecting(mut self, redirect: Redirect<GameScene, Param>) -> Self {
        self.redirect = Some(redirect);
        self
    }

    /// Accepts the first `accepted` activations, then redirects.
    pub fn redirecting_after(mut self, accepted: usize, redirect: Redirect<GameScene, Param>) -> Self {
        self.redirect_after = accepted;
        self.redirect = Some(redirect);
        self
    }

    pub fn with_background(mut self, colour: ThemeColour) -> Self {
        self.background = Some(colour);
        self
    }

    /// Runs `hook` after recording each input start.
    pub fn on_start(mut self, hook: impl FnMut() + 'static) -> Self {
        self.on_start = Some(Box::new(hook));
        self
    }
}

impl Scene<GameScene, Param> for RecordingScene {
    fn activate(&mut self, param: Option<Param>) -> Option<Redirect<GameScene, Param>> {
        self.journal.push(Event::Activate(self.key, param));
        self.activations += 1;
        if self.activations > self.redirect_after {
            self.redirect.clone()
        } else {
            None
        }
    }

    fn on_deactivate(&mut self) {
        self.journal.push(Event::Deactivate(self.key));
    }

    fn reset(&mut self) {
        self.journal.push(Event::Reset(self.key));
    }

    fn do_frame(&mut self, delta: Millis, _context: &SceneContext) {
        self.journal.push(Event::Frame(self.key, delta));
    }

    fn draw_frame(&mut self, _renderer: &mut dyn Renderer) {
        self.journal.push(Event::Draw(self.key));
    }

    fn on_input_start(&mut self, point: InputPoint, _raw: &PointerEvent, _context: &SceneContext) {
        self.journal.push(Event::Start(self.key, point));
        if let Some(hook) = self.on_start.as_mut() {
            hook();
        }
    }

    fn on_input_move(&mut self, point: InputPoint, _raw: &PointerEvent, _context: &SceneContext) {
        self.journal.push(Event::Move(self.key, point));
    }

    fn on_input_stop(&mut self, _raw: &PointerEvent, _context: &SceneContext) {
        self.journal.push(Event::Stop(self.key));
    }

    fn on_key_down(&mut self, code: KeyCode) {
        self.journal.push(Event::Key(self.key, code));
    }

    fn background(&self) -> Option<ThemeColour> {
        self.background
    }
}

// =============================================================================
// RecordingRenderer
// =============================================================================

pub struct RecordingRenderer {
    journal: Journal,
}

impl RecordingRenderer {
    pub fn new(journal: &Journal) -> Self {
        Self {
            journal: journal.clone(),
        }
    }
}

impl Renderer for RecordingRenderer {
    fn clear(&mut self, background: Option<ThemeColour>) {
        self.journal.push(Event::Clear(background));
    }

    fn set_alpha(&mut self, alpha: f64) {
        self.journal.push(Event::Alpha(alpha));
    }

    fn rect(&mut self, _: Rect, _: ThemeColour, _: Option<ThemeColour>, _: f64, _: Anchor) {
        self.journal.push(Event::Primitive);
    }

    fn text(&mut self, _: &str, _: InputPoint, _: f64, _: ThemeColour, _: Anchor) {
        self.journal.push(Event::Primitive);
    }

    fn circle(&mut self, _: InputPoint, _: f64, _: ThemeColour, _: f64, _: Anchor) {
        self.journal.push(Event::Primitive);
    }
}

// =============================================================================
// Engine Setup
// =============================================================================

/// Engine with one plain recording scene per key, home = `MainMenu`.
pub fn engine(journal: &Journal) -> TestEngine {
    engine_with(journal, |_, scene, _| scene)
}

/// Like [`engine`], but lets the caller customise each scene. The
/// customiser also receives the engine handle for scenes that issue
/// commands.
pub fn engine_with(
    journal: &Journal,
    mut customise: impl FnMut(GameScene, RecordingScene, &EngineHandle<GameScene, Param>) -> RecordingScene,
) -> TestEngine {
    EngineBuilder::new(GameScene::MainMenu)
        .with_loading_scene(GameScene::Loading)
        .build()
        .init(|scenes, handle| {
            for key in ALL_SCENES {
                scenes.register_scene(key, customise(key, RecordingScene::new(key, journal), handle));
            }
        })
}

/// Runs frames until the crossfade completes.
pub fn settle(engine: &mut TestEngine, renderer: &mut RecordingRenderer) {
    while engine.is_input_locked() {
        engine
            .tick(50.0, renderer)
            .expect("frame should succeed");
    }
}
