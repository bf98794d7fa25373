//=========================================================================
// Graphics Substrate
//=========================================================================
//
// The software pixel primitives the widget compositor runs on.
//
// Architecture:
//   Point / Rect — integer screen-space geometry
//   Image        — RGBA8 pixel buffer with alpha-over and multiply blits
//   Mask         — per-pixel opacity bitmap with overlap computation
//   Canvas       — the shared drawing surface widgets blit onto
//
// Coordinates are pixels, top-left origin, y down.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::ops::{Add, Sub};

//=== Module Declarations =================================================

mod canvas;
mod image;
mod mask;

//=== Public API ==========================================================

pub use canvas::Canvas;
pub use image::Image;
pub use mask::Mask;

/// RGBA8 color, in memory order `[r, g, b, a]`.
pub type Rgba = [u8; 4];

/// Fully transparent black.
pub const TRANSPARENT: Rgba = [0, 0, 0, 0];

/// Fully opaque white.
pub const WHITE: Rgba = [255, 255, 255, 255];

//=== Point ===============================================================

/// A 2D screen-space coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

//=== Rect ================================================================

/// An axis-aligned rectangle, used for hit tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rect covering `image` placed at `origin`.
    pub fn from_image(origin: Point, image: &Image) -> Self {
        Self::new(
            origin.x,
            origin.y,
            image.width() as i32,
            image.height() as i32,
        )
    }

    /// Point-in-rect test; edges on the far side are exclusive.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
