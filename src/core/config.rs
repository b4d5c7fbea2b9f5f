//=========================================================================
// Engine Configuration
//=========================================================================
//
// Tunable timings and board geometry shared by the engine subsystems.
//
// All durations are expressed in milliseconds (`Millis`), the same unit
// the frame loop and the input dispatcher use for timestamps.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::input::InputPoint;

//=== Time Unit ===========================================================

/// Milliseconds, as used by every timestamp and duration in the engine.
pub type Millis = f64;

//=== Defaults ============================================================

/// Length of a scene crossfade.
pub const CROSSFADE_DURATION: Millis = 300.0;

/// Minimum spacing between two accepted input events of the same category.
pub const INPUT_INTERVAL: Millis = 10.0;

/// Length of the tutorial panel slide/fade animation.
pub const TUTORIAL_ANIMATION: Millis = 300.0;

/// Upper bound applied to a single frame delta.
pub const MAX_FRAME_DELTA: Millis = 250.0;

/// Maximum number of redirects a single `change_scene` may follow.
pub const MAX_REDIRECTS: usize = 8;

//=== EngineConfig ========================================================

/// Engine-wide configuration.
///
/// Usually assembled through [`crate::EngineBuilder`]; the defaults match
/// the shipped game.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub crossfade_duration: Millis,
    pub input_interval: Millis,
    pub tutorial_animation: Millis,
    pub max_frame_delta: Millis,
    pub max_redirects: usize,

    /// Logical canvas size (board coordinates), width then height.
    pub logical_size: (f64, f64),

    pub board_radius: f64,
    pub bot_difficulty: u8,
    pub window_title: String,
}

impl EngineConfig {
    /// Centre of the board in logical coordinates.
    pub fn board_center(&self) -> InputPoint {
        InputPoint::new(self.logical_size.0 / 2.0, self.logical_size.1 / 2.0)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            crossfade_duration: CROSSFADE_DURATION,
            input_interval: INPUT_INTERVAL,
            tutorial_animation: TUTORIAL_ANIMATION,
            max_frame_delta: MAX_FRAME_DELTA,
            max_redirects: MAX_REDIRECTS,
            logical_size: (480.0, 640.0),
            board_radius: 200.0,
            bot_difficulty: 2,
            window_title: String::from("Radum"),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
