//=========================================================================
// Sprite Component
//=========================================================================
//
// The drawable component a widget composes: an optional source image,
// the opacity mask derived from it, and the overlap mask recomputed each
// tick against the widget's occluder.
//
// The overlap mask is the region of this sprite covered by the occluder;
// when present, only that region is painted. A sprite with no image is
// inert.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::gfx::{Canvas, Image, Mask, Point, TRANSPARENT, WHITE};

use super::Occluder;

//=== Sprite ==============================================================

/// Image + mask compositing state for one widget.
pub struct Sprite {
    image: Option<Image>,
    mask: Option<Mask>,
    overlap: Option<Mask>,
}

impl Sprite {
    /// Creates the component; the opacity mask is derived from the image
    /// immediately.
    pub fn new(image: Option<Image>) -> Self {
        let mask = image.as_ref().map(Mask::from_image);
        Self {
            image,
            mask,
            overlap: None,
        }
    }

    //--- Accessors --------------------------------------------------------

    pub fn image(&self) -> Option<&Image> {
        self.image.as_ref()
    }

    pub fn mask(&self) -> Option<&Mask> {
        self.mask.as_ref()
    }

    /// The overlap mask from the most recent `update_overlap`, if an
    /// occluder was in effect.
    pub fn overlap(&self) -> Option<&Mask> {
        self.overlap.as_ref()
    }

    /// Replaces the source image; the mask is rederived and any stale
    /// overlap mask is discarded until the next update.
    pub fn set_image(&mut self, image: Option<Image>) {
        self.mask = image.as_ref().map(Mask::from_image);
        self.image = image;
        self.overlap = None;
    }

    /// Installs an overlap mask directly.
    ///
    /// For widgets driven outside the standard update recursion; a later
    /// `update_overlap` with a live occluder overwrites it.
    pub fn set_overlap(&mut self, overlap: Option<Mask>) {
        self.overlap = overlap;
    }

    //--- Per-Tick Work ----------------------------------------------------

    /// Recomputes the overlap mask from the current relative offset
    /// between this sprite and its occluder.
    ///
    /// With no occluder mask (or no image of our own) the overlap mask is
    /// cleared and the full image draws.
    pub fn update_overlap(&mut self, position: Point, occluder: &Occluder<'_>) {
        self.overlap = match (&self.mask, occluder.mask) {
            (Some(mask), Some(other)) => {
                let offset = occluder.position - position;
                Some(mask.overlap_mask(other, offset))
            }
            _ => None,
        };
    }

    /// Paints the sprite's visible region at `position`.
    ///
    /// Without an overlap mask the full image blits directly. With one,
    /// the mask renders as a white-on-transparent stencil, the image is
    /// multiplied into it, and the result blits — pixels outside the
    /// overlap stay fully transparent.
    pub fn draw(&self, canvas: &mut Canvas, position: Point) {
        let Some(image) = &self.image else {
            return;
        };

        match &self.overlap {
            None => canvas.blit(image, position),
            Some(overlap) => {
                let mut visible = overlap.to_image(TRANSPARENT, WHITE);
                visible.blit_multiply(image, Point::ZERO);
                canvas.blit(&visible, position);
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
