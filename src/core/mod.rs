//=========================================================================
// Core Systems
//
// Platform-independent building blocks of the engine.
//
// Responsibilities:
// - Scene contract, registry and crossfade state (`scene`)
// - Input gating, normalization and routing (`input`)
// - Modal tutorial overlay (`tutorial`)
// - Rendering contract and coordinate scaling (`render`)
// - Deferred engine commands issued by scenes (`command`)
// - Configuration, errors and the AI bot handle
//
// Notes:
// Nothing in here touches winit. The `Engine` facade wires these pieces
// together and the platform layer feeds it window events.
//
//=========================================================================

//=== Submodules ==========================================================
pub mod bot;
pub mod command;
pub mod config;
pub mod error;
pub mod input;
pub mod render;
pub mod scene;
pub mod tutorial;

//=== Re-exports ==========================================================
pub use bot::Bot;
pub use command::{EngineCommand, EngineHandle};
pub use config::{EngineConfig, Millis};
pub use error::EngineError;
pub use input::{DropReason, InputDispatcher, Route};
pub use render::{Anchor, Rect, Renderer, Scaler, ThemeColour};
pub use scene::{Redirect, Scene, SceneContext, SceneKey, SceneParam, SceneRegistry, TransitionState};
pub use tutorial::{TutorialOverlay, TutorialStage};
