//=========================================================================
// Input Processor
//=========================================================================
//
// Converts platform-specific Winit events into engine pointer events.
//
// Architecture:
//   Winit Events → InputProcessor → (PointerPhase, PointerEvent) → Engine
//
// Stateful cursor tracking: winit reports button presses without a
// position, so the last `CursorMoved` position is cached and attached to
// every mouse button event. Unmapped keys (F13-F24, exotic keyboards)
// are filtered (returns None).
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::{
    event::{ElementState, KeyEvent, MouseButton as WinitMouseButton, TouchPhase},
    keyboard::{KeyCode as WinitKeyCode, PhysicalKey},
};

//=== Internal Dependencies ===============================================

use crate::core::input::{DevicePoint, KeyCode, MouseButton, PointerEvent};

//=== PointerPhase ========================================================

/// Which dispatcher category a pointer event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PointerPhase {
    Start,
    Move,
    Stop,
}

//=== InputProcessor ======================================================

/// Converts Winit events to engine pointer events with cursor tracking.
pub(crate) struct InputProcessor {
    cursor: DevicePoint,
}

impl InputProcessor {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new() -> Self {
        Self {
            cursor: DevicePoint::default(),
        }
    }

    //--- Cursor State -----------------------------------------------------

    pub(crate) fn cursor(&self) -> DevicePoint {
        self.cursor
    }

    //--- Event Processing -------------------------------------------------

    /// Records the cursor position and returns a move event.
    pub(crate) fn process_cursor_moved(&mut self, x: f64, y: f64) -> PointerEvent {
        self.cursor = DevicePoint::new(x, y);
        PointerEvent::mouse(x, y)
    }

    /// Converts a button press/release at the cached cursor position.
    pub(crate) fn process_mouse_button(
        &self,
        button: WinitMouseButton,
        state: ElementState,
    ) -> (PointerPhase, PointerEvent) {
        let event = PointerEvent::mouse_button(self.cursor.x, self.cursor.y, MouseButton::from(button));

        match state {
            ElementState::Pressed => (PointerPhase::Start, event),
            ElementState::Released => (PointerPhase::Stop, event),
        }
    }

    /// Converts one touch contact update.
    pub(crate) fn process_touch(&self, id: u64, x: f64, y: f64, phase: TouchPhase) -> (PointerPhase, PointerEvent) {
        let phase = match phase {
            TouchPhase::Started => PointerPhase::Start,
            TouchPhase::Moved => PointerPhase::Move,
            TouchPhase::Ended | TouchPhase::Cancelled => PointerPhase::Stop,
        };
        (phase, PointerEvent::touch(id, x, y))
    }

    /// Converts a key press to an engine key code.
    ///
    /// Releases and unmapped keys return `None`.
    pub(crate) fn process_key_event(&self, key_event: &KeyEvent) -> Option<KeyCode> {
        if key_event.state != ElementState::Pressed {
            return None;
        }
        key_code(key_event.physical_key)
    }
}

/// Maps a physical key, filtering keys the engine does not know.
fn key_code(physical_key: PhysicalKey) -> Option<KeyCode> {
    let code = match physical_key {
        PhysicalKey::Code(code) => KeyCode::from(code),
        _ => return None,
    };

    (code != KeyCode::Unidentified).then_some(code)
}

//=========================================================================
// Winit Conversions
//=========================================================================

/// Converts Winit physical key codes to engine key codes.
///
/// Maps A-Z, 0-9, arrows, and common special keys. Unmapped keys (F13-F24,
/// numpad, media keys) return `KeyCode::Unidentified`.
impl From<WinitKeyCode> for KeyCode {
    fn from(code: WinitKeyCode) -> Self {
        use WinitKeyCode::*;
        match code {
            //--- Digits -------------------------------------------------------

            Digit0 => KeyCode::Digit0,
            Digit1 => KeyCode::Digit1,
            Digit2 => KeyCode::Digit2,
            Digit3 => KeyCode::Digit3,
            Digit4 => KeyCode::Digit4,
            Digit5 => KeyCode::Digit5,
            Digit6 => KeyCode::Digit6,
            Digit7 => KeyCode::Digit7,
            Digit8 => KeyCode::Digit8,
            Digit9 => KeyCode::Digit9,

            //--- Letters ------------------------------------------------------

            KeyA => KeyCode::KeyA,
            KeyB => KeyCode::KeyB,
            KeyC => KeyCode::KeyC,
            KeyD => KeyCode::KeyD,
            KeyE => KeyCode::KeyE,
            KeyF => KeyCode::KeyF,
            KeyG => KeyCode::KeyG,
            KeyH => KeyCode::KeyH,
            KeyI => KeyCode::KeyI,
            KeyJ => KeyCode::KeyJ,
            KeyK => KeyCode::KeyK,
            KeyL => KeyCode::KeyL,
            KeyM => KeyCode::KeyM,
            KeyN => KeyCode::KeyN,
            KeyO => KeyCode::KeyO,
            KeyP => KeyCode::KeyP,
            KeyQ => KeyCode::KeyQ,
            KeyR => KeyCode::KeyR,
            KeyS => KeyCode::KeyS,
            KeyT => KeyCode::KeyT,
            KeyU => KeyCode::KeyU,
            KeyV => KeyCode::KeyV,
            KeyW => KeyCode::KeyW,
            KeyX => KeyCode::KeyX,
            KeyY => KeyCode::KeyY,
            KeyZ => KeyCode::KeyZ,

            //--- Arrows -------------------------------------------------------

            ArrowUp => KeyCode::ArrowUp,
            ArrowDown => KeyCode::ArrowDown,
            ArrowLeft => KeyCode::ArrowLeft,
            ArrowRight => KeyCode::ArrowRight,

            //--- Special ------------------------------------------------------

            Space => KeyCode::Space,
            Enter => KeyCode::Enter,
            Escape => KeyCode::Escape,
            Tab => KeyCode::Tab,
            Backspace => KeyCode::Backspace,
            Delete => KeyCode::Delete,

            //--- Unmapped (return Unidentified) -------------------------------

            _ => KeyCode::Unidentified,
        }
    }
}

/// Converts Winit mouse buttons to engine buttons.
///
/// Left/Right/Middle mapped directly; Back/Forward/Other → Other.
impl From<WinitMouseButton> for MouseButton {
    fn from(button: WinitMouseButton) -> Self {
        match button {
            WinitMouseButton::Left => MouseButton::Left,
            WinitMouseButton::Right => MouseButton::Right,
            WinitMouseButton::Middle => MouseButton::Middle,
            _ => MouseButton::Other,
        }
    }
}

//=========================================================================
// Tests
//=========================================================================
