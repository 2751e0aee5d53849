//! # sketch_canvas
//!
//! The drawing surface of the air-drawing app.
//!
//! * [`Canvas`]: a fixed-size RGB raster, white until painted.
//! * [`StrokeTracker`]: remembers the last point so per-frame fingertip
//!   positions become connected segments, with separate brush and eraser
//!   widths.
//! * [`Exporter`]: writes the canvas to `drawings/drawing_<timestamp>.jpg`.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use sketch_canvas::{Canvas, Exporter, StrokeMode, StrokeTracker};
//!
//! let mut canvas = Canvas::default();
//! let mut stroke = StrokeTracker::default();
//!
//! stroke.begin_or_continue(&mut canvas, (10, 10), StrokeMode::Draw); // sets the cursor
//! stroke.begin_or_continue(&mut canvas, (30, 10), StrokeMode::Draw); // paints 10→30
//!
//! let path = Exporter::default().export(&canvas).unwrap();
//! println!("saved {}", path.display());
//! ```

pub mod canvas;
pub mod stroke;
pub mod export;
pub mod error;

pub use canvas::{Canvas, BACKGROUND, CANVAS_HEIGHT, CANVAS_WIDTH, INK_RED};
pub use stroke::{Brush, Segment, StrokeMode, StrokeTracker};
pub use export::{Exporter, DEFAULT_OUTPUT_DIR, DEFAULT_QUALITY};
pub use error::ExportError;
