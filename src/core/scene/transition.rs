//=========================================================================
// Transition State
//=========================================================================
//
// Tracks which scene is active, which one is fading out, and how far the
// crossfade between them has progressed.
//
// Invariant: `crossfade == 1` implies `previous == None`.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::trace;

//=== Internal Dependencies ===============================================

use super::SceneKey;
use crate::core::config::Millis;

//=== TransitionState =====================================================

/// Active/previous scene pair plus crossfade progress.
///
/// Holds keys only; the scenes themselves live in the
/// [`SceneRegistry`](super::SceneRegistry).
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionState<K: SceneKey> {
    previous: Option<K>,
    active: Option<K>,
    crossfade: f64,
}

impl<K: SceneKey> TransitionState<K> {
    /// Creates an idle state: no scenes, crossfade complete.
    pub fn new() -> Self {
        Self {
            previous: None,
            active: None,
            crossfade: 1.0,
        }
    }

    //--- Transition Lifecycle ---------------------------------------------

    /// Restarts the crossfade; input stays locked until it completes.
    pub fn begin(&mut self) {
        self.crossfade = 0.0;
    }

    /// Makes `target` the active scene.
    ///
    /// Returns the outgoing active scene, which the caller must deactivate.
    /// Re-activating the current scene returns `None` and leaves nothing
    /// to fade out.
    pub fn commit(&mut self, target: K) -> Option<K> {
        match self.active.replace(target) {
            Some(outgoing) if outgoing == target => {
                self.previous = None;
                None
            }
            outgoing => {
                self.previous = outgoing;
                outgoing
            }
        }
    }

    /// Advances the crossfade by `delta` over a fade of `duration`.
    ///
    /// Returns `true` on the frame the crossfade completes; the previous
    /// scene is dropped at that point.
    pub fn advance(&mut self, delta: Millis, duration: Millis) -> bool {
        if self.crossfade >= 1.0 {
            return false;
        }

        self.crossfade += delta / duration;
        if self.crossfade >= 1.0 {
            self.crossfade = 1.0;
            if let Some(previous) = self.previous.take() {
                trace!(target: "engine::scene", "Crossfade complete, dropped {:?}", previous);
            }
            return true;
        }

        false
    }

    //--- Queries ----------------------------------------------------------

    pub fn active(&self) -> Option<K> {
        self.active
    }

    pub fn previous(&self) -> Option<K> {
        self.previous
    }

    pub fn crossfade(&self) -> f64 {
        self.crossfade
    }

    /// `true` while a crossfade is in flight.
    pub fn is_locked(&self) -> bool {
        self.crossfade < 1.0
    }
}

impl<K: SceneKey> Default for TransitionState<K> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
