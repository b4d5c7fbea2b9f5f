//=========================================================================
// Radum Engine: Library Root
//
// This crate defines the public API surface of the Radum engine: the
// runtime harness of a canvas board game.
//
// Responsibilities:
// - Expose the engine facade (`Engine`, `EngineBuilder`)
// - Keep the Winit host (`platform`) hidden from end users
// - Provide clean separation between the high-level engine facade
//   and the lower-level subsystems (scenes, input, tutorial, rendering)
//
// Typical usage:
// ```no_run
// use radum_engine::prelude::*;
//
// fn main() -> Result<(), PlatformError> {
//     EngineBuilder::<GameScene>::new(GameScene::MainMenu)
//         .build()
//         .init(|scenes, handle| { /* register scenes */ })
//         .run(MyCanvas::new())
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` contains the engine subsystems (scene transitions, input
// dispatch, tutorial overlay, rendering contract). It is exposed publicly
// for scene implementations, but normal application code will mostly use
// the top-level `Engine` facade and the prelude.
//
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` contains the Winit integration (window, event loop, input
// conversion) and is kept private, as it is not part of the public API
// surface.
//
// `engine` defines the main engine entry point and the frame loop.
//
mod platform;
mod engine;

//--- Public Exports ------------------------------------------------------
//
// Re-exports the engine facade so applications can simply
// `use radum_engine::{Engine, EngineBuilder};`.
//
pub use engine::{Engine, EngineBuilder};
pub use platform::PlatformError;
