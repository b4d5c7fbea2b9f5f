//=========================================================================
// Tutorial Overlay
//=========================================================================
//
// Modal, stage-based tutorial drawn on top of the active scene.
//
// Responsibilities:
// - Own the stage sequence and the cursor into it
// - Evaluate reverse/advance predicates once per update tick
// - Animate the message panel between stages
// - Report blocking/submit state to the engine and scenes
//
// States:
//   inactive ──init()──► active ──advance past end──► active, no stage
//       ▲                  │                               │
//       └──deactivate()────┴───────────────────────────────┘
//
// While the current stage has no advance predicate the overlay is
// *blocking*: the engine freezes scene updates and routes input starts
// to `advance()` instead of the scene.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use crate::core::config::{EngineConfig, Millis};
use crate::core::input::InputPoint;
use crate::core::render::{Anchor, Rect, Renderer, ThemeColour};

//=== Module Declarations =================================================

mod prompt;
mod stage;

//=== Public API ==========================================================

pub use prompt::TouchPrompt;
pub use stage::{StageHook, StageTest, TutorialStage};

//=== Panel Layout ========================================================

const PANEL_HEIGHT: f64 = 200.0;
const PANEL_MARGIN: f64 = 20.0;
const PANEL_OPACITY: f64 = 0.9;
const TEXT_SIZE: f64 = 32.0;
const LINE_SPACING: f64 = 34.0;
const TEXT_BASELINE: f64 = 50.0;
const PROMPT_OFFSET: f64 = 40.0;

//=== TutorialOverlay =====================================================

/// Stage-driven tutorial layered over the active scene.
///
/// ```rust
/// # use radum_engine::prelude::*;
/// let config = EngineConfig::default();
/// let mut tutorial = TutorialOverlay::new(&config);
///
/// tutorial.init(vec![TutorialStage::new().message(["Tap anywhere"])]);
/// assert!(tutorial.is_blocking());
///
/// tutorial.advance();
/// assert!(tutorial.is_active());
/// assert!(!tutorial.is_blocking());
///
/// tutorial.deactivate();
/// assert!(!tutorial.is_active());
/// ```
#[derive(Debug)]
pub struct TutorialOverlay {
    stages: Option<Vec<TutorialStage>>,
    current: usize,
    last_stage: Option<usize>,
    transition: f64,
    animation_duration: Millis,
    width: f64,
    prompt: TouchPrompt,
}

impl TutorialOverlay {
    /// Creates an inactive overlay sized to the configured logical canvas.
    pub fn new(config: &EngineConfig) -> Self {
        let width = config.logical_size.0;
        Self {
            stages: None,
            current: 0,
            last_stage: None,
            transition: 1.0,
            animation_duration: config.tutorial_animation,
            width,
            prompt: TouchPrompt::new(
                InputPoint::new(width / 2.0, PROMPT_OFFSET),
                ThemeColour::Negative,
                Anchor::Bottom,
            ),
        }
    }

    //--- Lifecycle --------------------------------------------------------

    /// Starts the tutorial at its first stage.
    pub fn init(&mut self, stages: Vec<TutorialStage>) {
        debug!(target: "engine::tutorial", "Tutorial started with {} stages", stages.len());
        self.stages = Some(stages);
        self.current = 0;
        self.last_stage = None;
        self.transition = 0.0;
    }

    /// Ends the tutorial and returns to the inactive state.
    pub fn deactivate(&mut self) {
        if self.stages.take().is_some() {
            debug!(target: "engine::tutorial", "Tutorial deactivated");
        }
        self.current = 0;
        self.last_stage = None;
        self.transition = 1.0;
    }

    //--- Stage Navigation -------------------------------------------------

    /// Moves to the next stage.
    ///
    /// Fires the departed stage's `on_advance` then the new stage's
    /// `on_activate`. No-op when there is no current stage.
    pub fn advance(&mut self) {
        let from = self.current;
        let Some(stages) = self.stages.as_mut() else {
            return;
        };
        let Some(departed) = stages.get_mut(from) else {
            return;
        };

        departed.fire_advance();
        self.move_to(from + 1);
    }

    /// Moves back to the previous stage. No-op on the first stage.
    pub fn reverse(&mut self) {
        if self.current == 0 || self.current_stage().is_none() {
            return;
        }
        self.move_to(self.current - 1);
    }

    fn move_to(&mut self, index: usize) {
        debug!(target: "engine::tutorial", "Tutorial stage {} -> {}", self.current, index);
        self.last_stage = Some(self.current);
        self.current = index;
        self.transition = 0.0;

        if let Some(stage) = self.current_stage_mut() {
            stage.fire_activate();
        }
    }

    //--- Frame Update -----------------------------------------------------

    /// Advances the panel animation and evaluates the current stage's
    /// predicates (reverse first, then advance).
    pub fn update(&mut self, delta: Millis) {
        if self.transition < 1.0 {
            self.transition = (self.transition + delta / self.animation_duration).min(1.0);
        }
        self.prompt.update(delta);

        let Some(stage) = self.current_stage_mut() else {
            return;
        };

        if stage.should_reverse() {
            self.reverse();
        } else if stage.should_advance() {
            self.advance();
        }
    }

    //--- Rendering --------------------------------------------------------

    /// Draws the outgoing and current stage panels, plus the tap prompt
    /// under a settled blocking stage.
    pub fn draw(&self, renderer: &mut dyn Renderer) {
        let Some(stage) = self.current_stage() else {
            return;
        };

        if self.transition < 1.0 {
            if let Some(lines) = self.last_stage().and_then(TutorialStage::lines) {
                renderer.set_alpha(1.0 - self.transition);
                self.draw_panel(renderer, lines, 1.0 - self.transition);
            }
        }

        if let Some(lines) = stage.lines() {
            renderer.set_alpha(self.transition);
            self.draw_panel(renderer, lines, self.transition);

            if self.transition >= 1.0 && stage.is_blocking() {
                self.prompt.draw(renderer);
            }
        }

        renderer.set_alpha(1.0);
    }

    fn draw_panel(&self, renderer: &mut dyn Renderer, lines: &[String], slide: f64) {
        let top = PANEL_HEIGHT * slide;
        renderer.rect(
            Rect {
                x: PANEL_MARGIN,
                y: top - 2.0,
                width: self.width - 2.0 * PANEL_MARGIN,
                height: PANEL_HEIGHT,
            },
            ThemeColour::Negative,
            Some(ThemeColour::Menu),
            PANEL_OPACITY,
            Anchor::Bottom,
        );

        for (idx, line) in lines.iter().enumerate() {
            renderer.text(
                line,
                InputPoint::new(self.width / 2.0, top - TEXT_BASELINE - idx as f64 * LINE_SPACING),
                TEXT_SIZE,
                ThemeColour::Negative,
                Anchor::Bottom,
            );
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn is_active(&self) -> bool {
        self.stages.is_some()
    }

    /// `true` while the current stage waits for an explicit advance.
    pub fn is_blocking(&self) -> bool {
        self.current_stage().is_some_and(TutorialStage::is_blocking)
    }

    /// Whether the underlying scene may accept a submit action.
    pub fn can_submit(&self) -> bool {
        self.current_stage().map_or(true, TutorialStage::can_submit)
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Panel animation progress in `[0, 1]`.
    pub fn transition_progress(&self) -> f64 {
        self.transition
    }

    pub fn current_stage(&self) -> Option<&TutorialStage> {
        self.stages.as_ref()?.get(self.current)
    }

    fn current_stage_mut(&mut self) -> Option<&mut TutorialStage> {
        self.stages.as_mut()?.get_mut(self.current)
    }

    /// The stage most recently departed, kept for its fade-out.
    pub fn last_stage(&self) -> Option<&TutorialStage> {
        self.stages.as_ref()?.get(self.last_stage?)
    }

    pub fn stage_count(&self) -> usize {
        self.stages.as_ref().map_or(0, Vec::len)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
