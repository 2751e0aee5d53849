//! # air_draw
//!
//! Draw in the air with one hand.  Each camera frame is mirrored, passed to a
//! hand-landmark provider, classified into a gesture, and the gesture drives
//! a persistent 640×480 canvas shown beside the camera feed.
//!
//! ## Gesture → Action mapping
//!
//! | Gesture | Action |
//! |---|---|
//! | Index finger up, others curled | Draw a red line following the fingertip |
//! | Middle finger up, others curled | Clear the canvas |
//! | All four fingers curled (fist) | Erase along the index fingertip |
//! | Anything else / no hand | Lift the pen |
//!
//! ## Screens
//!
//! `Idle` (Draw button) → `CameraActive` (feed + canvas) → `DownloadPrompt`
//! (canvas + Download JPEG button) → `Idle`.  Closing the camera window moves
//! to the download prompt; Escape exits from anywhere.
//!
//! ## Feature flags
//!
//! * (default): **Simulation mode**: a synthetic camera backdrop and a
//!   keyboard/mouse driven hand.
//! * `webcam`: **Hardware mode**: the system camera via `nokhwa`.
//!
//! Real landmark detection runs out of process; pass `--detector <cmd>`.
//!
//! ### Keys
//!
//! | Key | Effect |
//! |---|---|
//! | `S` | Save the canvas as JPEG (camera screen) |
//! | `Escape` | Exit |
//! | `D` held | Simulated hand points (draw) |
//! | `E` held | Simulated fist (erase) |
//! | `C` held | Simulated middle finger (clear) |
//! | `U` held | Simulated open palm (no action) |
//!
//! The simulated index fingertip follows the mouse over the camera pane.

pub mod error;
pub mod camera;
pub mod landmarks;
pub mod font;
pub mod render;
pub mod session;
pub mod visualizer;
pub mod app;

pub use app::{run, run_with, AppConfig};
pub use error::{AppError, CaptureError, ProviderError};
pub use session::{InputEvent, Key, Screen, Session, SessionSettings, Tick, View};
