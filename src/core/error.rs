//=========================================================================
// Engine Errors
//=========================================================================
//
// Fatal conditions raised by the scene transition engine.
//
// Dropped or duplicate input is not an error and never shows up here;
// those paths return `false` or simply do nothing.
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::scene::SceneKey;

//=== EngineError =========================================================

/// Errors returned by scene transitions and the frame loop.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError<K: SceneKey> {
    /// The scene registry has no scene under this key.
    #[error("scene {0:?} is not registered")]
    UnknownScene(K),

    /// A chain of `activate` redirects exceeded the configured hop limit.
    ///
    /// `chain` holds every scene visited, starting with the one originally
    /// requested.
    #[error("scene redirect chain exceeded {limit} hops: {chain:?}")]
    RedirectLimit { limit: usize, chain: Vec<K> },

    /// Frame or input processing was requested before any scene was
    /// activated.
    #[error("no scene is active")]
    NoActiveScene,
}

//=========================================================================
// Unit Tests
//=========================================================================
