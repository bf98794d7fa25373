//=========================================================================
// Platform Event Mapper
//
// Converts Winit input events to the engine's `Event` type. Provides a
// clean separation between OS-specific input and the engine's internal
// event representation.
//
// Responsibilities:
// - Translate keyboard and mouse events
// - Attach the tracked cursor position to pointer events
// - Provide fallbacks (`Unidentified`) for unmapped inputs
//
//=========================================================================

use winit::event::{ElementState, MouseButton as WinitMouseButton};
use winit::keyboard::KeyCode as WinitKeyCode;
use winit::keyboard::PhysicalKey;

use crate::core::event::{Event, KeyCode, MouseButton};

//=== Key Conversion ======================================================
//
// Maps `WinitKeyCode` values to the engine's internal `KeyCode` enum.
// Only a subset of codes is supported; all others map to `Unidentified`.
//

impl From<WinitKeyCode> for KeyCode {
    fn from(code: WinitKeyCode) -> Self {
        use WinitKeyCode::*;
        match code {
            //--- Numeric keys -----------------------------------------------------
            Digit0 => KeyCode::Digit0, Digit1 => KeyCode::Digit1,
            Digit2 => KeyCode::Digit2, Digit3 => KeyCode::Digit3,
            Digit4 => KeyCode::Digit4, Digit5 => KeyCode::Digit5,
            Digit6 => KeyCode::Digit6, Digit7 => KeyCode::Digit7,
            Digit8 => KeyCode::Digit8, Digit9 => KeyCode::Digit9,

            //--- Alphabetic keys --------------------------------------------------
            KeyA => KeyCode::KeyA, KeyB => KeyCode::KeyB, KeyC => KeyCode::KeyC,
            KeyD => KeyCode::KeyD, KeyE => KeyCode::KeyE, KeyF => KeyCode::KeyF,
            KeyG => KeyCode::KeyG, KeyH => KeyCode::KeyH, KeyI => KeyCode::KeyI,
            KeyJ => KeyCode::KeyJ, KeyK => KeyCode::KeyK, KeyL => KeyCode::KeyL,
            KeyM => KeyCode::KeyM, KeyN => KeyCode::KeyN, KeyO => KeyCode::KeyO,
            KeyP => KeyCode::KeyP, KeyQ => KeyCode::KeyQ, KeyR => KeyCode::KeyR,
            KeyS => KeyCode::KeyS, KeyT => KeyCode::KeyT, KeyU => KeyCode::KeyU,
            KeyV => KeyCode::KeyV, KeyW => KeyCode::KeyW, KeyX => KeyCode::KeyX,
            KeyY => KeyCode::KeyY, KeyZ => KeyCode::KeyZ,

            //--- Arrow keys -------------------------------------------------------
            ArrowDown => KeyCode::ArrowDown, ArrowLeft => KeyCode::ArrowLeft,
            ArrowRight => KeyCode::ArrowRight, ArrowUp => KeyCode::ArrowUp,

            //--- Special keys -----------------------------------------------------
            Space => KeyCode::Space,
            Enter => KeyCode::Enter,
            Escape => KeyCode::Escape,

            //--- Fallback ---------------------------------------------------------
            _ => KeyCode::Unidentified
        }
    }
}

//=== Mouse Conversion ====================================================
//
// Maps Winit mouse button identifiers to internal mouse button types.
//

impl From<WinitMouseButton> for MouseButton {
    fn from(button: WinitMouseButton) -> Self {
        match button {
            WinitMouseButton::Left => MouseButton::Left,
            WinitMouseButton::Right => MouseButton::Right,
            WinitMouseButton::Middle => MouseButton::Middle,
            _ => MouseButton::Other
        }
    }
}

//=== Event Builders ======================================================
//
// Pointer events need the tracked cursor position because Winit only
// reports it on `CursorMoved`.
//

pub(crate) fn map_key(physical_key: PhysicalKey, state: ElementState) -> Event {
    let key = match physical_key {
        PhysicalKey::Code(code) => KeyCode::from(code),
        _ => KeyCode::Unidentified,
    };
    match state {
        ElementState::Pressed => Event::KeyDown { key },
        ElementState::Released => Event::KeyUp { key },
    }
}

pub(crate) fn map_mouse_button(
    button: WinitMouseButton,
    state: ElementState,
    cursor: (i32, i32),
) -> Event {
    let button = MouseButton::from(button);
    let (x, y) = cursor;
    match state {
        ElementState::Pressed => Event::MouseButtonDown { button, x, y },
        ElementState::Released => Event::MouseButtonUp { button, x, y },
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letter_keys_map_across() {
        assert_eq!(KeyCode::from(WinitKeyCode::KeyW), KeyCode::KeyW);
        assert_eq!(KeyCode::from(WinitKeyCode::Space), KeyCode::Space);
    }

    #[test]
    fn unmapped_keys_fall_back_to_unidentified() {
        assert_eq!(KeyCode::from(WinitKeyCode::F24), KeyCode::Unidentified);
    }

    #[test]
    fn key_state_picks_the_event_variant() {
        let down = map_key(
            PhysicalKey::Code(WinitKeyCode::Escape),
            ElementState::Pressed,
        );
        assert_eq!(
            down,
            Event::KeyDown {
                key: KeyCode::Escape
            }
        );

        let up = map_key(
            PhysicalKey::Code(WinitKeyCode::Escape),
            ElementState::Released,
        );
        assert_eq!(up, Event::KeyUp { key: KeyCode::Escape });
    }

    #[test]
    fn mouse_events_carry_the_tracked_cursor() {
        let event = map_mouse_button(WinitMouseButton::Left, ElementState::Pressed, (12, 34));
        assert_eq!(
            event,
            Event::MouseButtonDown {
                button: MouseButton::Left,
                x: 12,
                y: 34,
            }
        );
    }

    #[test]
    fn side_buttons_map_to_other() {
        let event = map_mouse_button(WinitMouseButton::Back, ElementState::Released, (0, 0));
        assert_eq!(
            event,
            Event::MouseButtonUp {
                button: MouseButton::Other,
                x: 0,
                y: 0,
            }
        );
    }
}
