//=========================================================================
// Canvas
//=========================================================================
//
// The backend drawing surface every widget in a scene shares. Only draw
// calls on the single loop thread mutate it, so no locking is involved;
// it is shared as `Rc<RefCell<Canvas>>`.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::{Image, Point, Rgba};

//=== Canvas ==============================================================

/// A software framebuffer with blit and fill operations.
///
/// Created by the backend's `create_canvas`; presented once per tick by
/// the game loop. Integrators without a renderer can read the pixels back
/// via [`Canvas::image`].
#[derive(Debug, Clone)]
pub struct Canvas {
    image: Image,
}

impl Canvas {
    /// Creates a transparent canvas of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: Image::new(width, height),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// The current framebuffer contents.
    pub fn image(&self) -> &Image {
        &self.image
    }

    /// Fills the whole canvas with one color.
    pub fn fill(&mut self, color: Rgba) {
        self.image.fill(color);
    }

    /// Alpha-over blit of `src` at `at`.
    pub fn blit(&mut self, src: &Image, at: Point) {
        self.image.blit(src, at);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::super::{TRANSPARENT, WHITE};
    use super::*;

    #[test]
    fn fill_covers_everything() {
        let mut canvas = Canvas::new(2, 2);
        canvas.fill(WHITE);
        assert_eq!(canvas.image().get(0, 0), Some(WHITE));
        assert_eq!(canvas.image().get(1, 1), Some(WHITE));
    }

    #[test]
    fn blit_lands_at_position() {
        let mut canvas = Canvas::new(4, 4);
        let sprite = Image::filled(1, 1, WHITE);

        canvas.blit(&sprite, Point::new(2, 1));

        assert_eq!(canvas.image().get(2, 1), Some(WHITE));
        assert_eq!(canvas.image().get(0, 0), Some(TRANSPARENT));
    }
}
