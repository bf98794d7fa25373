//=========================================================================
// Button Widget
//=========================================================================
//
// The clickable widget: tracks pressed and hovering state and announces
// transitions over five declared signal channels. State changes only in
// response to processed input events, never on polling.
//
// Event contract (hit-rect = image bounds at current position):
//  - down inside, not pressed      → pressed=true, emit `pressed`
//  - up inside while pressed       → pressed=false, emit `clicked`
//  - up outside while pressed     → pressed=false, no `clicked`
//  - any up while a rect exists    → emit `released`, exactly once,
//                                    even off-target (drag-release)
//  - motion crossing into the rect → hovering=true, emit `hover_enter`
//  - motion crossing out           → hovering=false, emit `hover_exit`
//
// A button with no image has no hit-rect and ignores pointer events.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::cell::RefCell;
use std::rc::Rc;

//=== Internal Dependencies ===============================================

use crate::core::event::Event;
use crate::core::gfx::{Canvas, Image, Point};
use crate::core::signal::SignalError;

use super::{Widget, WidgetBase};

//=== Button ==============================================================

/// A widget with press and hover state machines.
///
/// Subscribe to its channels before attaching it to the tree:
///
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use umbra_engine::core::gfx::{Canvas, Image, Point, WHITE};
/// use umbra_engine::core::widget::Button;
///
/// let canvas = Rc::new(RefCell::new(Canvas::new(64, 64)));
/// let play = Button::new(
///     "play",
///     canvas,
///     Some(Image::filled(16, 16, WHITE)),
///     Point::new(8, 8),
/// );
/// play.connect(Button::CLICKED, "start_level", |_: &()| {
///     // kick off the level
/// }).unwrap();
/// ```
pub struct Button {
    base: WidgetBase,
    pressed: bool,
    hovering: bool,
}

impl Button {
    //--- Channel Names ----------------------------------------------------

    /// Button-down landed inside the rect.
    pub const PRESSED: &'static str = "pressed";

    /// Any button-up while the button has a rect.
    pub const RELEASED: &'static str = "released";

    /// Button-up inside the rect completing a press.
    pub const CLICKED: &'static str = "clicked";

    /// Cursor crossed into the rect.
    pub const HOVER_ENTER: &'static str = "hover_enter";

    /// Cursor crossed out of the rect.
    pub const HOVER_EXIT: &'static str = "hover_exit";

    //--- Construction -----------------------------------------------------

    pub fn new(
        name: impl Into<String>,
        canvas: Rc<RefCell<Canvas>>,
        image: Option<Image>,
        position: Point,
    ) -> Self {
        let mut base = WidgetBase::new(name, canvas, image, position);

        let signals = base.object_mut().signals_mut();
        signals.declare::<()>(Self::PRESSED);
        signals.declare::<()>(Self::RELEASED);
        signals.declare::<()>(Self::CLICKED);
        signals.declare::<()>(Self::HOVER_ENTER);
        signals.declare::<()>(Self::HOVER_EXIT);

        Self {
            base,
            pressed: false,
            hovering: false,
        }
    }

    //--- Accessors --------------------------------------------------------

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    /// Connects `slot` to one of the button's channels.
    pub fn connect(
        &self,
        channel: &str,
        key: impl Into<String>,
        slot: impl FnMut(&()) + 'static,
    ) -> Result<bool, SignalError> {
        self.base.object().signals().connect(channel, key, slot)
    }

    /// Disconnects the slot registered under `key` from `channel`.
    pub fn disconnect(&self, channel: &str, key: &str) -> Result<bool, SignalError> {
        self.base.object().signals().disconnect::<()>(channel, key)
    }

    //--- Internal Helpers -------------------------------------------------

    // Channels are declared in `new`, so emission cannot fail.
    fn emit(&self, channel: &str) {
        self.base
            .object()
            .signals()
            .emit(channel, &())
            .expect("button channel declared at construction");
    }

    fn on_button_down(&mut self, x: i32, y: i32) {
        let Some(rect) = self.base.rect() else {
            return;
        };
        if rect.contains(x, y) && !self.pressed {
            self.pressed = true;
            self.emit(Self::PRESSED);
        }
    }

    fn on_button_up(&mut self, x: i32, y: i32) {
        let Some(rect) = self.base.rect() else {
            return;
        };

        if self.pressed {
            self.pressed = false;
            if rect.contains(x, y) {
                self.emit(Self::CLICKED);
            }
        }

        // Fires on any button-up the widget sees, even off-target, so
        // drag-release is observable.
        self.emit(Self::RELEASED);
    }

    fn on_motion(&mut self, x: i32, y: i32) {
        let Some(rect) = self.base.rect() else {
            return;
        };

        let inside = rect.contains(x, y);
        if inside && !self.hovering {
            self.hovering = true;
            self.emit(Self::HOVER_ENTER);
        } else if !inside && self.hovering {
            self.hovering = false;
            self.emit(Self::HOVER_EXIT);
        }
    }
}

impl Widget for Button {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn process_event(&mut self, event: &Event) {
        match *event {
            Event::MouseButtonDown { x, y, .. } => self.on_button_down(x, y),
            Event::MouseButtonUp { x, y, .. } => self.on_button_up(x, y),
            Event::MouseMoved { x, y } => self.on_motion(x, y),
            _ => {}
        }
        self.base.propagate_event(event);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::event::MouseButton;
    use crate::core::gfx::WHITE;

    /// A 10x10 button at (10, 10) recording every emission into a trace.
    fn traced_button() -> (Button, Rc<RefCell<Vec<&'static str>>>) {
        let canvas = Rc::new(RefCell::new(Canvas::new(64, 64)));
        let button = Button::new(
            "test_button",
            canvas,
            Some(Image::filled(10, 10, WHITE)),
            Point::new(10, 10),
        );

        let trace: Rc<RefCell<Vec<&'static str>>> = Rc::new(RefCell::new(Vec::new()));
        for channel in [
            Button::PRESSED,
            Button::RELEASED,
            Button::CLICKED,
            Button::HOVER_ENTER,
            Button::HOVER_EXIT,
        ] {
            let t = trace.clone();
            button
                .connect(channel, "trace", move |_: &()| t.borrow_mut().push(channel))
                .unwrap();
        }
        (button, trace)
    }

    fn down(x: i32, y: i32) -> Event {
        Event::MouseButtonDown {
            button: MouseButton::Left,
            x,
            y,
        }
    }

    fn up(x: i32, y: i32) -> Event {
        Event::MouseButtonUp {
            button: MouseButton::Left,
            x,
            y,
        }
    }

    fn moved(x: i32, y: i32) -> Event {
        Event::MouseMoved { x, y }
    }

    #[test]
    fn down_then_up_inside_is_a_click() {
        let (mut button, trace) = traced_button();

        button.process_event(&down(15, 15));
        assert!(button.is_pressed());
        button.process_event(&up(15, 15));

        assert!(!button.is_pressed());
        assert_eq!(*trace.borrow(), vec!["pressed", "clicked", "released"]);
    }

    #[test]
    fn down_inside_up_outside_releases_without_click() {
        let (mut button, trace) = traced_button();

        button.process_event(&down(15, 15));
        button.process_event(&up(50, 50));

        assert!(!button.is_pressed());
        assert_eq!(*trace.borrow(), vec!["pressed", "released"]);
    }

    #[test]
    fn up_without_prior_press_still_releases() {
        let (mut button, trace) = traced_button();

        button.process_event(&up(50, 50));

        assert_eq!(*trace.borrow(), vec!["released"]);
    }

    #[test]
    fn down_outside_does_nothing() {
        let (mut button, trace) = traced_button();

        button.process_event(&down(50, 50));

        assert!(!button.is_pressed());
        assert!(trace.borrow().is_empty());
    }

    #[test]
    fn repeated_downs_inside_press_once() {
        let (mut button, trace) = traced_button();

        button.process_event(&down(15, 15));
        button.process_event(&down(12, 12));

        assert_eq!(*trace.borrow(), vec!["pressed"]);
    }

    #[test]
    fn hover_is_edge_triggered() {
        let (mut button, trace) = traced_button();

        button.process_event(&moved(15, 15));
        assert!(button.is_hovering());
        button.process_event(&moved(16, 16)); // still inside, no re-fire
        button.process_event(&moved(50, 50));
        assert!(!button.is_hovering());
        button.process_event(&moved(51, 51)); // still outside, no re-fire

        assert_eq!(*trace.borrow(), vec!["hover_enter", "hover_exit"]);
    }

    #[test]
    fn imageless_button_ignores_pointer_events() {
        let canvas = Rc::new(RefCell::new(Canvas::new(64, 64)));
        let mut button = Button::new("ghost", canvas, None, Point::ZERO);

        let fired = Rc::new(RefCell::new(false));
        let f = fired.clone();
        button
            .connect(Button::RELEASED, "watch", move |_: &()| *f.borrow_mut() = true)
            .unwrap();

        button.process_event(&down(0, 0));
        button.process_event(&up(0, 0));
        button.process_event(&moved(0, 0));

        assert!(!button.is_pressed());
        assert!(!button.is_hovering());
        assert!(!*fired.borrow());
    }

    #[test]
    fn keyboard_events_do_not_touch_pointer_state() {
        let (mut button, trace) = traced_button();

        button.process_event(&Event::KeyDown {
            key: crate::core::event::KeyCode::Space,
        });

        assert!(trace.borrow().is_empty());
    }
}
