//=========================================================================
// Input Event Types
//
// Defines the portable representation of input events the scene and
// widget layers consume.
//
// This module abstracts away platform-specific input (e.g. winit, SDL)
// into a unified, engine-friendly format.
//
// Responsibilities:
// - Represent keyboard and mouse inputs in a stable, portable way
// - Carry cursor coordinates on pointer events so hit-testing needs no
//   global mouse query
// - Represent the terminate-window request (`Event::Quit`)
//
// Event Flow:
// ```text
// Platform Layer (winit)
//         ↓
//      Event (this module)
//         ↓
//  Scene::process_event → widget tree → signal emissions
// ```
//
//=========================================================================

//=== MouseButton =========================================================

/// Physical mouse button identifier.
///
/// The `Other` variant covers side buttons, macro buttons, and any
/// non-standard inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button (typically left).
    Left,

    /// Secondary button (typically right).
    Right,

    /// Middle button (wheel click).
    Middle,

    /// Any other button.
    Other,
}

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Represents the physical key location, not the character produced.
/// Additional keys can be added without breaking existing code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Numeric Keys -----------------------------------------------------

    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    //--- Alphabetic Keys --------------------------------------------------

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

    /// Fallback for keys not explicitly mapped by the platform layer.
    Unidentified,
}

//=== Event ===============================================================

/// A single input event dispatched to the active scene each tick.
///
/// Pointer events carry the cursor position in canvas pixels (top-left
/// origin) at the time of the event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// The window was asked to close (user close button, OS shutdown).
    ///
    /// The default scene handling sets the quit flag and invalidates the
    /// scene; this is the engine's sole cancellation path.
    Quit,

    /// Key pressed down.
    KeyDown { key: KeyCode },

    /// Key released.
    KeyUp { key: KeyCode },

    /// Mouse button pressed at the given cursor position.
    MouseButtonDown {
        button: MouseButton,
        x: i32,
        y: i32,
    },

    /// Mouse button released at the given cursor position.
    MouseButtonUp {
        button: MouseButton,
        x: i32,
        y: i32,
    },

    /// Mouse cursor moved to a new position.
    MouseMoved { x: i32, y: i32 },
}

//=========================================================================
// Unit Tests
//=========================================================================
