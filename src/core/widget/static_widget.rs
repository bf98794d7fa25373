//=========================================================================
// Static Widget
//=========================================================================
//
// The plain image widget: no input handling of its own, standard update
// and draw recursion. Backgrounds, frames, and decorative sprites are
// all StaticWidgets; it also serves as a structural container when built
// without an image.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::cell::RefCell;
use std::rc::Rc;

//=== Internal Dependencies ===============================================

use crate::core::gfx::{Canvas, Image, Point};

use super::{Widget, WidgetBase};

//=== StaticWidget ========================================================

/// A widget that just shows its image (or nothing) and hosts children.
pub struct StaticWidget {
    base: WidgetBase,
}

impl StaticWidget {
    pub fn new(
        name: impl Into<String>,
        canvas: Rc<RefCell<Canvas>>,
        image: Option<Image>,
        position: Point,
    ) -> Self {
        Self {
            base: WidgetBase::new(name, canvas, image, position),
        }
    }
}

impl Widget for StaticWidget {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::gfx::{TRANSPARENT, WHITE};
    use crate::core::widget::Occluder;

    #[test]
    fn draws_its_image_onto_the_shared_canvas() {
        let canvas = Rc::new(RefCell::new(Canvas::new(4, 4)));
        let mut widget = StaticWidget::new(
            "backdrop",
            Rc::clone(&canvas),
            Some(Image::filled(2, 2, WHITE)),
            Point::new(1, 1),
        );

        widget.update(&Occluder::NONE);
        widget.draw();

        let canvas = canvas.borrow();
        assert_eq!(canvas.image().get(1, 1), Some(WHITE));
        assert_eq!(canvas.image().get(0, 0), Some(TRANSPARENT));
    }

    #[test]
    fn inactive_widget_hides_its_subtree() {
        let canvas = Rc::new(RefCell::new(Canvas::new(4, 4)));
        let mut widget = StaticWidget::new(
            "backdrop",
            Rc::clone(&canvas),
            Some(Image::filled(2, 2, WHITE)),
            Point::ZERO,
        );
        widget.base_mut().object_mut().set_active(false);

        widget.update(&Occluder::NONE);
        widget.draw();

        assert_eq!(canvas.borrow().image().get(0, 0), Some(TRANSPARENT));
    }

    #[test]
    fn children_paint_over_the_parent() {
        let canvas = Rc::new(RefCell::new(Canvas::new(4, 4)));
        let mut parent = StaticWidget::new(
            "backdrop",
            Rc::clone(&canvas),
            Some(Image::filled(4, 4, WHITE)),
            Point::ZERO,
        );

        const RED: [u8; 4] = [255, 0, 0, 255];
        let child = StaticWidget::new(
            "marker",
            Rc::clone(&canvas),
            Some(Image::filled(1, 1, RED)),
            Point::new(2, 2),
        );
        parent.base_mut().add_widget(Box::new(child));

        parent.update(&Occluder::NONE);
        parent.draw();

        let canvas = canvas.borrow();
        assert_eq!(canvas.image().get(2, 2), Some(RED));
        assert_eq!(canvas.image().get(0, 0), Some(WHITE));
    }
}
