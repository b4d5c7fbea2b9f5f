//=========================================================================
// Engine Commands
//=========================================================================
//
// Deferred engine mutations requested from inside scenes and callbacks.
//
// Scenes only ever see a read-only `SceneContext`. To switch scenes,
// reset, or drive the tutorial they send an `EngineCommand` through a
// cloneable `EngineHandle`; the engine drains the queue after every
// input dispatch and every frame.
//
// Architecture:
//   EngineHandle ──Sender──► [unbounded channel] ──Receiver──► CommandQueue
//                                                                  │
//                                       Engine::drain_commands() ◄─┘
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError};
use log::warn;

//=== Internal Dependencies ===============================================

use crate::core::scene::{SceneKey, SceneParam};
use crate::core::tutorial::TutorialStage;

//=== EngineCommand =======================================================

/// A request for the engine, applied at the next drain point.
#[derive(Debug)]
pub enum EngineCommand<K: SceneKey, P: SceneParam = ()> {
    ChangeScene {
        scene: K,
        param: Option<P>,
        reset_first: bool,
    },
    /// Switch to the home scene, e.g. once loading has finished.
    Start,
    Reset,
    SetBot(bool),
    ToggleKeyboard(bool),
    StartTutorial(Vec<TutorialStage>),
    AdvanceTutorial,
    EndTutorial,
}

//=== EngineHandle ========================================================

/// Cloneable sender for [`EngineCommand`]s.
///
/// Obtained from [`Engine::handle`](crate::Engine::handle) and usually
/// stored inside scenes at registration time.
///
/// ```rust
/// # use radum_engine::prelude::*;
/// # #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// # enum GameScene { Menu, Board }
/// # impl SceneKey for GameScene {}
/// struct MenuScene {
///     engine: EngineHandle<GameScene>,
/// }
///
/// impl Scene<GameScene> for MenuScene {
///     fn do_frame(&mut self, _delta: f64, _context: &SceneContext) {}
///     fn draw_frame(&mut self, _renderer: &mut dyn Renderer) {}
///
///     fn on_input_start(&mut self, _point: InputPoint, _raw: &PointerEvent, _context: &SceneContext) {
///         self.engine.change_scene(GameScene::Board, None, true);
///     }
/// }
/// ```
pub struct EngineHandle<K: SceneKey, P: SceneParam = ()> {
    sender: Sender<EngineCommand<K, P>>,
}

impl<K: SceneKey, P: SceneParam> EngineHandle<K, P> {
    /// Queues a command. Returns `false` if the engine has been dropped.
    pub fn send(&self, command: EngineCommand<K, P>) -> bool {
        match self.sender.send(command) {
            Ok(()) => true,
            Err(err) => {
                warn!(target: "engine", "Engine is gone, dropped command {:?}", err.into_inner());
                false
            }
        }
    }

    pub fn change_scene(&self, scene: K, param: Option<P>, reset_first: bool) -> bool {
        self.send(EngineCommand::ChangeScene {
            scene,
            param,
            reset_first,
        })
    }

    pub fn start(&self) -> bool {
        self.send(EngineCommand::Start)
    }

    pub fn reset(&self) -> bool {
        self.send(EngineCommand::Reset)
    }

    pub fn set_bot(&self, enabled: bool) -> bool {
        self.send(EngineCommand::SetBot(enabled))
    }

    pub fn toggle_keyboard(&self, open: bool) -> bool {
        self.send(EngineCommand::ToggleKeyboard(open))
    }

    pub fn start_tutorial(&self, stages: Vec<TutorialStage>) -> bool {
        self.send(EngineCommand::StartTutorial(stages))
    }

    pub fn advance_tutorial(&self) -> bool {
        self.send(EngineCommand::AdvanceTutorial)
    }

    pub fn end_tutorial(&self) -> bool {
        self.send(EngineCommand::EndTutorial)
    }
}

impl<K: SceneKey, P: SceneParam> Clone for EngineHandle<K, P> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

//=== CommandQueue ========================================================

/// Engine-side end of the command channel.
///
/// Keeps one sender alive so handles can be minted at any time and the
/// channel never reports disconnection while the engine exists.
pub(crate) struct CommandQueue<K: SceneKey, P: SceneParam = ()> {
    handle: EngineHandle<K, P>,
    receiver: Receiver<EngineCommand<K, P>>,
}

impl<K: SceneKey, P: SceneParam> CommandQueue<K, P> {
    /// Upper bound on commands applied per drain.
    ///
    /// A scene that re-queues a command on every activation would
    /// otherwise keep the drain loop alive forever.
    pub(crate) const MAX_PER_DRAIN: usize = 64;

    pub(crate) fn new() -> Self {
        let (sender, receiver) = unbounded();
        Self {
            handle: EngineHandle { sender },
            receiver,
        }
    }

    pub(crate) fn handle(&self) -> EngineHandle<K, P> {
        self.handle.clone()
    }

    /// Pops the next pending command, if any.
    pub(crate) fn next(&self) -> Option<EngineCommand<K, P>> {
        match self.receiver.try_recv() {
            Ok(command) => Some(command),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.receiver.len()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
