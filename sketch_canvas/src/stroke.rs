//! Stroke cursor: turns per-frame positions into connected line segments.

use image::Rgb;

use crate::canvas::{Canvas, BACKGROUND, INK_RED};

// ════════════════════════════════════════════════════════════════════════════
// StrokeMode / Brush
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrokeMode {
    Draw,
    Erase,
}

/// Pen settings.  Erasing paints with the canvas background.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Brush {
    pub ink:              Rgb<u8>,
    pub brush_thickness:  u32,
    pub eraser_thickness: u32,
}

impl Default for Brush {
    fn default() -> Self {
        Brush {
            ink:              INK_RED,
            brush_thickness:  8,
            eraser_thickness: 80,
        }
    }
}

impl Brush {
    /// `(color, thickness)` for a mode.
    pub fn style(&self, mode: StrokeMode) -> (Rgb<u8>, u32) {
        match mode {
            StrokeMode::Draw  => (self.ink, self.brush_thickness),
            StrokeMode::Erase => (BACKGROUND, self.eraser_thickness),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Segment
// ════════════════════════════════════════════════════════════════════════════

/// A line actually painted onto the canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub from:      (u32, u32),
    pub to:        (u32, u32),
    pub color:     Rgb<u8>,
    pub thickness: u32,
}

// ════════════════════════════════════════════════════════════════════════════
// StrokeTracker
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq)]
struct Cursor {
    point: (u32, u32),
    mode:  StrokeMode,
}

/// Holds the previous point of the stroke in progress.
///
/// The cursor is absent at start, after [`reset`](Self::reset) or
/// [`clear_all`](Self::clear_all), and when the mode flips between draw and
/// erase.  An absent cursor means the next point only starts a stroke.
#[derive(Clone, Debug, Default)]
pub struct StrokeTracker {
    cursor: Option<Cursor>,
    brush:  Brush,
}

impl StrokeTracker {
    pub fn new(brush: Brush) -> Self {
        StrokeTracker { cursor: None, brush }
    }

    pub fn brush(&self) -> &Brush {
        &self.brush
    }

    /// Last stroke point, if a stroke is in progress.
    pub fn cursor(&self) -> Option<(u32, u32)> {
        self.cursor.map(|c| c.point)
    }

    /// Extend the stroke to `point`.
    ///
    /// Returns the segment painted, or `None` if this call only started a
    /// new stroke.  `point` must lie inside the canvas.
    pub fn begin_or_continue(
        &mut self,
        canvas: &mut Canvas,
        point:  (u32, u32),
        mode:   StrokeMode,
    ) -> Option<Segment> {
        debug_assert!(point.0 < canvas.width() && point.1 < canvas.height());

        let prev = self.cursor.replace(Cursor { point, mode });
        match prev {
            Some(Cursor { point: from, mode: prev_mode }) if prev_mode == mode => {
                let (color, thickness) = self.brush.style(mode);
                canvas.draw_line(from, point, color, thickness);
                Some(Segment { from, to: point, color, thickness })
            }
            _ => None,
        }
    }

    /// Lift the pen without touching the canvas.
    pub fn reset(&mut self) {
        self.cursor = None;
    }

    /// Wipe the canvas and lift the pen.
    pub fn clear_all(&mut self, canvas: &mut Canvas) {
        canvas.clear();
        self.cursor = None;
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
