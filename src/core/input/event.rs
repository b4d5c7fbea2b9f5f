//=========================================================================
// Input Event Types
//
// Engine-level representation of pointer, touch and keyboard input.
//
// This module abstracts away platform-specific input (e.g. Winit) into a
// unified format consumed by the input dispatcher.
//
// Responsibilities:
// - Represent mouse and touch pointers in a portable way
// - Normalize both into a single device-space coordinate pair
// - Carry logical (board-space) points to scenes
// - Identify physical keys independently of keyboard layout
//
// Event Flow:
// ```text
// Platform Layer (Winit)
//         ↓
//    PointerEvent / KeyCode (this module)
//         ↓
//    InputDispatcher (gates, dedup, routing)
//         ↓
//    Tutorial overlay or active Scene
// ```
//
//=========================================================================

//=== DevicePoint =========================================================

/// A position in raw device coordinates (window pixels, top-left origin).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DevicePoint {
    pub x: f64,
    pub y: f64,
}

impl DevicePoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

//=== InputPoint ==========================================================

/// A position in logical board coordinates.
///
/// Produced by the [`Scaler`](crate::core::render::Scaler) from a
/// [`DevicePoint`] for every accepted pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InputPoint {
    pub x: f64,
    pub y: f64,
}

impl InputPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another logical point.
    pub fn distance_to(&self, other: InputPoint) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

//=== MouseButton =========================================================

/// Physical mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button (typically left).
    Left,

    /// Secondary button (typically right).
    Right,

    /// Middle button (wheel click).
    Middle,

    /// Any other button (side buttons, thumb buttons, macro keys).
    Other,
}

//=== Touch ===============================================================

/// One contact point reported by a touch event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Touch {
    pub id: u64,
    pub position: DevicePoint,
}

//=== PointerEvent ========================================================

/// Raw pointer event as delivered by the host.
///
/// Touch events may report several changed contacts at once; only the
/// first one is used when the event is normalized. A touch event with no
/// changed contacts is malformed and normalizes to `None`.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerEvent {
    /// Mouse press, release or motion at `position`.
    ///
    /// `button` is `None` for plain motion.
    Mouse {
        position: DevicePoint,
        button: Option<MouseButton>,
    },

    /// Touch start, move or end.
    Touch { changed: Vec<Touch> },
}

impl PointerEvent {
    /// Mouse event without an associated button (motion).
    pub fn mouse(x: f64, y: f64) -> Self {
        Self::Mouse {
            position: DevicePoint::new(x, y),
            button: None,
        }
    }

    /// Mouse event for a specific button.
    pub fn mouse_button(x: f64, y: f64, button: MouseButton) -> Self {
        Self::Mouse {
            position: DevicePoint::new(x, y),
            button: Some(button),
        }
    }

    /// Touch event with a single changed contact.
    pub fn touch(id: u64, x: f64, y: f64) -> Self {
        Self::Touch {
            changed: vec![Touch {
                id,
                position: DevicePoint::new(x, y),
            }],
        }
    }

    /// Reduces the event to a single device-space coordinate pair.
    pub fn normalize(&self) -> Option<DevicePoint> {
        match self {
            Self::Mouse { position, .. } => Some(*position),
            Self::Touch { changed } => changed.first().map(|touch| touch.position),
        }
    }

    /// Returns `true` if the event originated from a touch surface.
    pub fn is_touch(&self) -> bool {
        matches!(self, Self::Touch { .. })
    }
}

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Represents the physical key location, not the character produced.
/// For example, `KeyA` is always the same physical key regardless of
/// keyboard layout (QWERTY vs AZERTY).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Numeric Keys -----------------------------------------------------

    /// Number row: 0-9
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    //--- Alphabetic Keys --------------------------------------------------

    /// Letter keys: A-Z (physical location, not character)
    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Arrow Keys -------------------------------------------------------

    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    //--- Special Keys -----------------------------------------------------

    Space,
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,

    /// Fallback for keys not explicitly mapped by the platform layer.
    Unidentified,
}

//=========================================================================
// Unit Tests
//=========================================================================
