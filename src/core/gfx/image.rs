//=========================================================================
// Image
//=========================================================================
//
// An owned RGBA8 pixel buffer with the two blend operations the widget
// compositor needs: alpha-over (ordinary draw) and per-channel multiply
// (stencil application).
//
// Blits clip against the destination; sources may hang off any edge.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::{Point, Rgba, TRANSPARENT};

//=== Image ===============================================================

/// An RGBA8 pixel buffer, row-major, top-left origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl Image {
    //--- Construction -----------------------------------------------------

    /// Creates a fully transparent image.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, TRANSPARENT)
    }

    /// Creates an image filled with one color.
    pub fn filled(width: u32, height: u32, color: Rgba) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; (width * height) as usize],
        }
    }

    /// Wraps an existing pixel buffer; `pixels.len()` must equal
    /// `width * height`.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Rgba>) -> Self {
        debug_assert_eq!(pixels.len(), (width * height) as usize);
        Self {
            width,
            height,
            pixels,
        }
    }

    //--- Accessors --------------------------------------------------------

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Pixel at (x, y), or `None` outside the buffer.
    pub fn get(&self, x: i32, y: i32) -> Option<Rgba> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(self.pixels[(y as u32 * self.width + x as u32) as usize])
    }

    /// Writes the pixel at (x, y); out-of-bounds writes are ignored.
    pub fn set(&mut self, x: i32, y: i32, color: Rgba) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        self.pixels[(y as u32 * self.width + x as u32) as usize] = color;
    }

    /// Fills every pixel with one color.
    pub fn fill(&mut self, color: Rgba) {
        self.pixels.fill(color);
    }

    //--- Blits ------------------------------------------------------------

    /// Alpha-over blit of `src` at `at`, clipped to this image.
    pub fn blit(&mut self, src: &Image, at: Point) {
        self.blit_with(src, at, blend_over);
    }

    /// Per-channel multiply blit of `src` at `at` (`dst = dst * src / 255`),
    /// clipped to this image. Used to apply a stencil rendered from a mask.
    pub fn blit_multiply(&mut self, src: &Image, at: Point) {
        self.blit_with(src, at, blend_multiply);
    }

    //--- Internal Helpers -------------------------------------------------

    /// Clipped row-wise blit with a per-pixel blend function.
    fn blit_with(&mut self, src: &Image, at: Point, blend: fn(Rgba, Rgba) -> Rgba) {
        let x0 = at.x.max(0);
        let y0 = at.y.max(0);
        let x1 = (at.x + src.width as i32).min(self.width as i32);
        let y1 = (at.y + src.height as i32).min(self.height as i32);

        for dy in y0..y1 {
            let sy = (dy - at.y) as u32;
            for dx in x0..x1 {
                let sx = (dx - at.x) as u32;
                let sp = src.pixels[(sy * src.width + sx) as usize];
                let index = (dy as u32 * self.width + dx as u32) as usize;
                self.pixels[index] = blend(self.pixels[index], sp);
            }
        }
    }
}

//--- Blend Functions ------------------------------------------------------

/// Source-over compositing with straight alpha.
fn blend_over(dst: Rgba, src: Rgba) -> Rgba {
    let sa = src[3] as u32;
    if sa == 255 {
        return src;
    }
    if sa == 0 {
        return dst;
    }

    let inv = 255 - sa;
    let mut out = [0u8; 4];
    for channel in 0..3 {
        out[channel] = ((src[channel] as u32 * sa + dst[channel] as u32 * inv) / 255) as u8;
    }
    out[3] = (sa + dst[3] as u32 * inv / 255) as u8;
    out
}

/// Per-channel multiply, alpha included.
fn blend_multiply(dst: Rgba, src: Rgba) -> Rgba {
    [
        (dst[0] as u32 * src[0] as u32 / 255) as u8,
        (dst[1] as u32 * src[1] as u32 / 255) as u8,
        (dst[2] as u32 * src[2] as u32 / 255) as u8,
        (dst[3] as u32 * src[3] as u32 / 255) as u8,
    ]
}

//=========================================================================
// Unit Tests
//=========================================================================
