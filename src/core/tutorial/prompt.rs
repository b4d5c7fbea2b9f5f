//=========================================================================
// Touch Prompt
//=========================================================================
//
// The pulsing "tap to continue" marker shown under a blocking tutorial
// stage once its panel has finished sliding in.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::config::Millis;
use crate::core::input::InputPoint;
use crate::core::render::{Anchor, Renderer, ThemeColour};

//=== Constants ===========================================================

/// Length of one full pulse.
const PULSE_PERIOD: Millis = 1000.0;

const BASE_RADIUS: f64 = 12.0;
const PULSE_AMPLITUDE: f64 = 4.0;

//=== TouchPrompt =========================================================

#[derive(Debug, Clone, PartialEq)]
pub struct TouchPrompt {
    position: InputPoint,
    colour: ThemeColour,
    anchor: Anchor,
    phase: Millis,
}

impl TouchPrompt {
    pub fn new(position: InputPoint, colour: ThemeColour, anchor: Anchor) -> Self {
        Self {
            position,
            colour,
            anchor,
            phase: 0.0,
        }
    }

    /// Advances the pulse animation.
    pub fn update(&mut self, delta: Millis) {
        self.phase = (self.phase + delta) % PULSE_PERIOD;
    }

    /// Current pulse level in `[0, 1]`.
    pub fn pulse(&self) -> f64 {
        let angle = self.phase / PULSE_PERIOD * std::f64::consts::TAU;
        (1.0 - angle.cos()) / 2.0
    }

    pub fn position(&self) -> InputPoint {
        self.position
    }

    pub fn draw(&self, renderer: &mut dyn Renderer) {
        let pulse = self.pulse();
        renderer.circle(
            self.position,
            BASE_RADIUS + PULSE_AMPLITUDE * pulse,
            self.colour,
            1.0 - 0.5 * pulse,
            self.anchor,
        );
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
