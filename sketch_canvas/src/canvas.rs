//! Fixed-size RGB drawing surface.

use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, BresenhamLineIter};

pub const CANVAS_WIDTH:  u32 = 640;
pub const CANVAS_HEIGHT: u32 = 480;

pub const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
pub const INK_RED:    Rgb<u8> = Rgb([255, 0, 0]);

/// The user's drawing.  Its dimensions are set at construction and never
/// change; only [`Canvas::draw_line`] and [`Canvas::clear`] mutate it.
#[derive(Clone, Debug)]
pub struct Canvas {
    image: RgbImage,
}

impl Default for Canvas {
    fn default() -> Self {
        Canvas::new(CANVAS_WIDTH, CANVAS_HEIGHT)
    }
}

impl Canvas {
    /// All-white canvas.
    pub fn new(width: u32, height: u32) -> Self {
        Canvas { image: RgbImage::from_pixel(width, height, BACKGROUND) }
    }

    pub fn width(&self)  -> u32 { self.image.width() }
    pub fn height(&self) -> u32 { self.image.height() }

    pub fn pixel(&self, x: u32, y: u32) -> Rgb<u8> {
        *self.image.get_pixel(x, y)
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    /// Solid line at most `thickness` pixels wide, with round caps.
    ///
    /// A disc is stamped at every Bresenham step, so a zero-length line still
    /// leaves a dot and consecutive segments join without notches.  Discs
    /// have odd diameters: an even `thickness` paints one pixel less.
    /// Anything off-canvas is clipped.
    pub fn draw_line(&mut self, from: (u32, u32), to: (u32, u32), color: Rgb<u8>, thickness: u32) {
        let radius = (thickness.max(1) - 1) as i32 / 2;
        let start  = (from.0 as f32, from.1 as f32);
        let end    = (to.0 as f32, to.1 as f32);
        for (x, y) in BresenhamLineIter::new(start, end) {
            draw_filled_circle_mut(&mut self.image, (x, y), radius, color);
        }
    }

    /// Back to all-white.
    pub fn clear(&mut self) {
        for p in self.image.pixels_mut() {
            *p = BACKGROUND;
        }
    }

    /// True when every pixel is background.
    pub fn is_blank(&self) -> bool {
        self.image.pixels().all(|p| *p == BACKGROUND)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
