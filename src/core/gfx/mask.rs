//=========================================================================
// Mask
//=========================================================================
//
// A per-pixel opacity bitmap derived from an image's alpha channel, used
// to compute the overlapping (visible) region between a widget and its
// designated occluder.
//
// Cost note: `overlap_mask` walks every bit, so recomputing it per moving
// widget pair per tick is O(mask pixel count). Callers needing higher
// widget counts must shard or cache.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::{Image, Point, Rgba};

//=== Constants ===========================================================

/// Alpha values strictly above this set the mask bit.
const ALPHA_THRESHOLD: u8 = 127;

//=== Mask ================================================================

/// Per-pixel opacity bitmap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl Mask {
    //--- Construction -----------------------------------------------------

    /// Creates an all-clear mask.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits: vec![false; (width * height) as usize],
        }
    }

    /// Creates an all-set mask.
    pub fn solid(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits: vec![true; (width * height) as usize],
        }
    }

    /// Derives a mask from an image: bits are set where alpha > 127.
    pub fn from_image(image: &Image) -> Self {
        let width = image.width();
        let height = image.height();
        let bits = image
            .pixels()
            .iter()
            .map(|pixel| pixel[3] > ALPHA_THRESHOLD)
            .collect();
        Self {
            width,
            height,
            bits,
        }
    }

    //--- Accessors --------------------------------------------------------

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bit at (x, y); clear outside the mask.
    pub fn get(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return false;
        }
        self.bits[(y as u32 * self.width + x as u32) as usize]
    }

    /// Sets the bit at (x, y); out-of-bounds writes are ignored.
    pub fn set(&mut self, x: i32, y: i32, value: bool) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        self.bits[(y as u32 * self.width + x as u32) as usize] = value;
    }

    /// Number of set bits.
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|bit| **bit).count()
    }

    //--- Overlap ----------------------------------------------------------

    /// Returns the mask of this mask's set bits that overlap `other`, with
    /// `other` positioned at `offset` relative to this mask.
    ///
    /// The result has this mask's dimensions. The caller computes the
    /// offset as `occluder.position − self.position`.
    pub fn overlap_mask(&self, other: &Mask, offset: Point) -> Mask {
        let mut result = Mask::new(self.width, self.height);
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                if self.get(x, y) && other.get(x - offset.x, y - offset.y) {
                    result.set(x, y, true);
                }
            }
        }
        result
    }

    //--- Rendering --------------------------------------------------------

    /// Renders the mask as an image stencil: `set` where bits are set,
    /// `unset` elsewhere.
    pub fn to_image(&self, unset: Rgba, set: Rgba) -> Image {
        let pixels = self
            .bits
            .iter()
            .map(|bit| if *bit { set } else { unset })
            .collect();
        Image::from_pixels(self.width, self.height, pixels)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
