//=========================================================================
// Rendering Contract
//=========================================================================
//
// The engine does not draw pixels itself. It drives an external
// `Renderer` (canvas, wgpu, test recorder, ...) through the small set of
// primitives below, and converts device input into board coordinates via
// the `Scaler`.
//
// Architecture:
// ```text
//   Engine::frame()
//     ├─ Renderer::set_alpha(1 - crossfade) → previous scene draws
//     ├─ Renderer::set_alpha(crossfade)     → active scene draws
//     └─ TutorialOverlay::draw()            → panel + prompt on top
//
//   InputDispatcher ── DevicePoint ──► Scaler::scale_coords ──► InputPoint
// ```
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::input::{DevicePoint, InputPoint};

//=== ThemeColour =========================================================

/// Named colour slots resolved by the renderer's active theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemeColour {
    Background,
    Positive,
    Negative,
    Menu,
    Highlight,
}

//=== Geometry ============================================================

/// Vertical reference edge for a primitive's `y` coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Anchor {
    /// `y` grows downwards from the top edge.
    #[default]
    Top,

    /// `y` grows upwards from the bottom edge.
    Bottom,
}

/// Axis-aligned rectangle in logical coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

//=== Renderer Trait ======================================================

/// Drawing surface consumed by the engine, scenes and tutorial overlay.
///
/// All coordinates are logical; implementations apply their own device
/// scaling. `set_alpha` sets the global opacity multiplied into every
/// subsequent primitive.
pub trait Renderer {
    /// Clears the surface, optionally filling it with a theme colour.
    fn clear(&mut self, background: Option<ThemeColour>);

    /// Sets the global alpha for subsequent primitives.
    fn set_alpha(&mut self, alpha: f64);

    /// Draws a rectangle outline in `border`, optionally filled.
    fn rect(
        &mut self,
        area: Rect,
        border: ThemeColour,
        fill: Option<ThemeColour>,
        opacity: f64,
        anchor: Anchor,
    );

    /// Draws centred text of the given font size.
    fn text(&mut self, text: &str, at: InputPoint, size: f64, colour: ThemeColour, anchor: Anchor);

    /// Draws a filled circle.
    fn circle(&mut self, center: InputPoint, radius: f64, colour: ThemeColour, opacity: f64, anchor: Anchor);
}

//=== Scaler ==============================================================

/// Maps device pixels to logical board coordinates.
///
/// The logical canvas is letter-boxed into the window: it is scaled
/// uniformly by the smaller of the two axis ratios and centred.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scaler {
    logical: (f64, f64),
    scale: f64,
    offset: (f64, f64),
}

impl Scaler {
    /// Creates a 1:1 scaler for a logical canvas of the given size.
    pub fn new(logical_width: f64, logical_height: f64) -> Self {
        Self {
            logical: (logical_width, logical_height),
            scale: 1.0,
            offset: (0.0, 0.0),
        }
    }

    /// Refits the logical canvas into a window of the given pixel size.
    ///
    /// Degenerate window sizes (zero or negative) are ignored.
    pub fn fit(&mut self, window_width: f64, window_height: f64) {
        if window_width <= 0.0 || window_height <= 0.0 {
            return;
        }

        let scale = (window_width / self.logical.0).min(window_height / self.logical.1);
        self.scale = scale;
        self.offset = (
            (window_width - self.logical.0 * scale) / 2.0,
            (window_height - self.logical.1 * scale) / 2.0,
        );
    }

    /// Converts a device point to logical coordinates.
    pub fn scale_coords(&self, point: DevicePoint) -> InputPoint {
        InputPoint::new(
            (point.x - self.offset.0) / self.scale,
            (point.y - self.offset.1) / self.scale,
        )
    }

    /// Converts a logical point back to device pixels.
    pub fn scale_point(&self, point: InputPoint) -> DevicePoint {
        DevicePoint::new(
            point.x * self.scale + self.offset.0,
            point.y * self.scale + self.offset.1,
        )
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn logical_size(&self) -> (f64, f64) {
        self.logical
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
