//! Software-rendered windows using `minifb`.
//!
//! One window per screen, opened when the session first shows that screen
//! and closed when it moves on:
//!
//! ```text
//! Idle            "Virtual Drawing App"                  400×200
//! CameraActive    "Camera Feed & Drawing Canvas"        1280×480
//! DownloadPrompt  "Drawing Canvas - Click to Download"   640×480
//! ```
//!
//! While the camera screen is up, the simulation keys and the pointer over
//! the camera pane are forwarded to the simulated hand as [`SimInput`].

use std::sync::mpsc::Sender;
use std::time::Duration;

use hand_gesture::{HandPose, Keypoint};
use image::RgbImage;
use minifb::{Key as WinKey, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

use crate::error::AppError;
use crate::landmarks::SimInput;
use crate::session::{InputEvent, Key, Screen, View};

/// Title of the window showing `screen`.
pub fn window_title(screen: Screen) -> &'static str {
    match screen {
        Screen::Idle           => "Virtual Drawing App",
        Screen::CameraActive   => "Camera Feed & Drawing Canvas",
        Screen::DownloadPrompt => "Drawing Canvas - Click to Download",
    }
}

/// Pose keys, checked in this order.
const POSE_KEYS: [(WinKey, HandPose); 4] = [
    (WinKey::D, HandPose::Pointing),
    (WinKey::E, HandPose::Fist),
    (WinKey::C, HandPose::MiddleUp),
    (WinKey::U, HandPose::OpenPalm),
];

/// Input gathered from the window since the last poll.
#[derive(Debug, Default)]
pub struct WindowInput {
    pub events: Vec<InputEvent>,
    /// The user closed the window.
    pub closed: bool,
}

// ════════════════════════════════════════════════════════════════════════════
// Visualizer
// ════════════════════════════════════════════════════════════════════════════

struct Open {
    screen: Screen,
    window: Window,
    size:   (usize, usize),
}

pub struct Visualizer {
    open:     Option<Open>,
    buf:      Vec<u32>,
    /// Present only when the hand is simulated.
    sim_tx:   Option<Sender<SimInput>>,
    interval: Duration,

    camera_pane: Option<(u32, u32)>,
    mouse_was_down: bool,
}

impl Visualizer {
    pub fn new(sim_tx: Option<Sender<SimInput>>, interval: Duration) -> Self {
        Visualizer {
            open: None,
            buf: Vec::new(),
            sim_tx,
            interval,
            camera_pane: None,
            mouse_was_down: false,
        }
    }

    /// Screen of the window currently open, if any.
    pub fn screen(&self) -> Option<Screen> {
        self.open.as_ref().map(|o| o.screen)
    }

    /// Close the current window.  The next [`present`](Self::present) opens
    /// a fresh one.
    pub fn close(&mut self) {
        if let Some(o) = self.open.take() {
            log::debug!("closing window \"{}\"", window_title(o.screen));
        }
        self.mouse_was_down = false;
    }

    /// Collect key presses and clicks, and forward the simulated hand.
    pub fn poll_input(&mut self) -> WindowInput {
        let mut input = WindowInput::default();
        let Some(open) = self.open.as_ref() else { return input };
        let window = &open.window;

        if !window.is_open() {
            input.closed = true;
            return input;
        }

        if window.is_key_pressed(WinKey::Escape, KeyRepeat::No) {
            input.events.push(InputEvent::Key(Key::Escape));
        }
        if window.is_key_pressed(WinKey::S, KeyRepeat::No) {
            input.events.push(InputEvent::Key(Key::Char('s')));
        }

        // Press edge only: holding the button is one click.
        let down = window.get_mouse_down(MouseButton::Left);
        if down && !self.mouse_was_down {
            if let Some((x, y)) = window.get_mouse_pos(MouseMode::Discard) {
                input.events.push(InputEvent::Click { x: x as i32, y: y as i32 });
            }
        }
        self.mouse_was_down = down;

        if let (Screen::CameraActive, Some(tx)) = (open.screen, self.sim_tx.as_ref()) {
            let pose = POSE_KEYS
                .iter()
                .find(|(k, _)| window.is_key_down(*k))
                .map(|&(_, p)| p);
            let at = match (self.camera_pane, window.get_mouse_pos(MouseMode::Discard)) {
                (Some(pane), Some(pos)) => pane_point(pane, pos),
                _ => None,
            };
            if tx.send(SimInput::Hand { pose, at }).is_err() {
                log::debug!("simulated hand is gone");
            }
        }

        input
    }

    /// Show `view`, switching windows if the screen changed.
    pub fn present(&mut self, view: &View) -> Result<(), AppError> {
        let size = (view.image.width() as usize, view.image.height() as usize);
        let stale = match &self.open {
            Some(o) => o.screen != view.screen || o.size != size,
            None    => true,
        };
        if stale {
            self.close();
            self.open = Some(self.open_window(view.screen, size)?);
        }
        self.camera_pane = view.camera_pane;

        fill_buffer(&mut self.buf, &view.image);
        if let Some(o) = self.open.as_mut() {
            o.window
                .update_with_buffer(&self.buf, size.0, size.1)
                .map_err(|e| AppError::Window(e.to_string()))?;
        }
        Ok(())
    }

    fn open_window(&self, screen: Screen, size: (usize, usize)) -> Result<Open, AppError> {
        let title = window_title(screen);
        let mut window = Window::new(
            title,
            size.0, size.1,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        )
        .map_err(|e| AppError::Window(e.to_string()))?;
        window.limit_update_rate(Some(self.interval));

        log::debug!("opened window \"{}\" {}x{}", title, size.0, size.1);
        Ok(Open { screen, window, size })
    }
}

/// Pack RGB pixels as `0x00RRGGBB` words.
fn fill_buffer(buf: &mut Vec<u32>, image: &RgbImage) {
    buf.clear();
    buf.extend(image.pixels().map(|p| {
        let [r, g, b] = p.0;
        (r as u32) << 16 | (g as u32) << 8 | b as u32
    }));
}

/// Normalize a window position over the camera pane.  `None` outside it.
fn pane_point(pane: (u32, u32), (x, y): (f32, f32)) -> Option<Keypoint> {
    let (w, h) = (pane.0 as f32, pane.1 as f32);
    if w <= 0.0 || h <= 0.0 || x < 0.0 || y < 0.0 || x >= w || y >= h {
        return None;
    }
    Some(Keypoint::new(x / w, y / h))
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
