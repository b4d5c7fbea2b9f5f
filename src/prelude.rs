//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use radum_engine::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine core
pub use crate::engine::{Engine, EngineBuilder};
pub use crate::platform::PlatformError;

// Configuration and errors
pub use crate::core::config::{EngineConfig, Millis};
pub use crate::core::error::EngineError;

// Scene system
pub use crate::core::scene::{Redirect, Scene, SceneContext, SceneKey, SceneParam, SceneRegistry};

// Input
pub use crate::core::input::{DevicePoint, DropReason, InputPoint, KeyCode, MouseButton, PointerEvent, Route};

// Rendering
pub use crate::core::render::{Anchor, Rect, Renderer, Scaler, ThemeColour};

// Tutorial overlay
pub use crate::core::tutorial::{TutorialOverlay, TutorialStage};

// Commands and AI bot
pub use crate::core::bot::Bot;
pub use crate::core::command::{EngineCommand, EngineHandle};
