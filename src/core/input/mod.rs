//=========================================================================
// Input Dispatcher
//
// Decides where each raw pointer or keyboard event goes.
//
// Responsibilities:
// - Rate-gate start, move and stop events independently
// - Swallow all input while a scene transition holds the lock
// - Normalize mouse and touch events to one device coordinate pair
// - Drop move events that did not actually move
// - Hand input starts to a blocking tutorial instead of the scene
//
// Routing order per pointer event:
// ```text
//   RateGate ──► lock ──► normalize ──► (dedup | tutorial) ──► Route
// ```
//
// Notes:
// The dispatcher never calls scenes itself. It returns a `Route` and the
// engine performs the call, so dispatch stays testable without scenes.
// Every drop is silent: it is logged at trace level only.
//
//=========================================================================

//=== Submodules ==========================================================
pub mod event;
mod rate_gate;

//=== Public API ==========================================================
pub use event::{DevicePoint, InputPoint, KeyCode, MouseButton, PointerEvent, Touch};
pub use rate_gate::RateGate;

//=== Internal Imports ====================================================
use crate::core::config::{EngineConfig, Millis};
use crate::core::render::Scaler;

//=== External Crates =====================================================
use log::trace;

//=== Route ===============================================================

/// Why an input event was discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// Arrived inside the category's minimum interval.
    RateLimited,

    /// A scene transition is in flight.
    Locked,

    /// A touch event without any changed contact.
    Malformed,

    /// A move event at the same raw coordinates as the last one.
    Duplicate,
}

/// Destination of a dispatched input event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Route {
    /// Discarded, never forwarded.
    Dropped(DropReason),

    /// Consumed by the tutorial overlay as an `advance()`.
    Tutorial,

    /// Forwarded to the active scene at this logical point.
    Scene(InputPoint),

    /// Forwarded to the active scene with the raw event only.
    SceneRaw,
}

impl Route {
    /// Returns `true` if the event reached a scene or the tutorial.
    pub fn is_delivered(&self) -> bool {
        !matches!(self, Route::Dropped(_))
    }
}

//=== InputDispatcher =====================================================
//
// Owns the per-category gates, the last raw move position and the scaler
// that maps device coordinates to board coordinates.
//
pub struct InputDispatcher {
    start_gate: RateGate,
    move_gate: RateGate,
    stop_gate: RateGate,
    last_move: Option<DevicePoint>,
    scaler: Scaler,
}

impl InputDispatcher {
    //--- Construction -----------------------------------------------------
    pub fn new(config: &EngineConfig) -> Self {
        let (width, height) = config.logical_size;
        Self {
            start_gate: RateGate::new(config.input_interval),
            move_gate: RateGate::new(config.input_interval),
            stop_gate: RateGate::new(config.input_interval),
            last_move: None,
            scaler: Scaler::new(width, height),
        }
    }

    //--- route_start() ----------------------------------------------------
    //
    // Records the press as the last move position before the tutorial
    // check, so a tap that advances the tutorial still seeds move dedup.
    //
    pub fn route_start(
        &mut self,
        event: &PointerEvent,
        now: Millis,
        locked: bool,
        tutorial_blocking: bool,
    ) -> Route {
        let device = match self.admit("start", Gate::Start, event, now, locked) {
            Ok(device) => device,
            Err(route) => return route,
        };

        self.last_move = Some(device);

        if tutorial_blocking {
            trace!(target: "engine::input", "start intercepted by tutorial");
            return Route::Tutorial;
        }

        Route::Scene(self.scaler.scale_coords(device))
    }

    //--- route_move() -----------------------------------------------------
    pub fn route_move(&mut self, event: &PointerEvent, now: Millis, locked: bool) -> Route {
        let device = match self.admit("move", Gate::Move, event, now, locked) {
            Ok(device) => device,
            Err(route) => return route,
        };

        if self.last_move == Some(device) {
            trace!(target: "engine::input", "move dropped: duplicate of ({}, {})", device.x, device.y);
            return Route::Dropped(DropReason::Duplicate);
        }

        self.last_move = Some(device);
        Route::Scene(self.scaler.scale_coords(device))
    }

    //--- route_stop() -----------------------------------------------------
    //
    // Stop events are forwarded raw; they never need coordinates.
    //
    pub fn route_stop(&mut self, now: Millis, locked: bool) -> Route {
        if !self.stop_gate.try_accept(now) {
            trace!(target: "engine::input", "stop dropped: rate limited");
            return Route::Dropped(DropReason::RateLimited);
        }
        if locked {
            trace!(target: "engine::input", "stop dropped: transition lock");
            return Route::Dropped(DropReason::Locked);
        }
        Route::SceneRaw
    }

    //--- route_key() ------------------------------------------------------
    //
    // Keys are not rate-gated but still respect the transition lock.
    //
    pub fn route_key(&self, code: KeyCode, locked: bool) -> Route {
        if locked {
            trace!(target: "engine::input", "key {:?} dropped: transition lock", code);
            return Route::Dropped(DropReason::Locked);
        }
        Route::SceneRaw
    }

    //--- Shared Admission -------------------------------------------------
    fn admit(
        &mut self,
        kind: &str,
        gate: Gate,
        event: &PointerEvent,
        now: Millis,
        locked: bool,
    ) -> Result<DevicePoint, Route> {
        let gate = match gate {
            Gate::Start => &mut self.start_gate,
            Gate::Move => &mut self.move_gate,
        };

        if !gate.try_accept(now) {
            trace!(target: "engine::input", "{} dropped: rate limited", kind);
            return Err(Route::Dropped(DropReason::RateLimited));
        }
        if locked {
            trace!(target: "engine::input", "{} dropped: transition lock", kind);
            return Err(Route::Dropped(DropReason::Locked));
        }

        event.normalize().ok_or_else(|| {
            trace!(target: "engine::input", "{} dropped: malformed event {:?}", kind, event);
            Route::Dropped(DropReason::Malformed)
        })
    }

    //--- Accessors --------------------------------------------------------

    /// Last accepted raw pointer position.
    pub fn last_move(&self) -> Option<DevicePoint> {
        self.last_move
    }

    pub fn scaler(&self) -> &Scaler {
        &self.scaler
    }

    /// Refits the scaler to a new window size in device pixels.
    pub fn fit(&mut self, window_width: f64, window_height: f64) {
        self.scaler.fit(window_width, window_height);
    }
}

#[derive(Clone, Copy)]
enum Gate {
    Start,
    Move,
}

//=========================================================================
// Unit Tests
//=========================================================================
