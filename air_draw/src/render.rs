//! Screen composition.
//!
//! Layouts:
//!
//! ```text
//! Idle (400×200)              CameraActive (frame + canvas)
//! ┌──────────────────┐        ┌────────────────────┬────────────────────┐
//! │                  │        │ Drawing Mode       │           [status] │
//! │    [  Draw  ]    │        │   mirrored camera  │      canvas        │
//! │                  │        │   + hand skeleton  │                    │
//! └──────────────────┘        │ Press 'S' to Save | ESC to Exit         │
//!                             └────────────────────┴────────────────────┘
//! DownloadPrompt (canvas)
//! ┌────────────────────┐
//! │      canvas        │
//! │ [Download JPEG]    │
//! └────────────────────┘
//! ```
//!
//! Nothing here touches the canvas itself; views are fresh images.

use hand_gesture::{Gesture, KeypointSet, HAND_CONNECTIONS};
use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};
use imageproc::drawing::{
    draw_filled_circle_mut, draw_filled_rect_mut, draw_hollow_circle_mut,
    draw_hollow_rect_mut, draw_line_segment_mut,
};
use imageproc::rect::Rect;
use sketch_canvas::Canvas;

use crate::font::{draw_text, text_height, text_width};

// ════════════════════════════════════════════════════════════════════════════
// Layout constants
// ════════════════════════════════════════════════════════════════════════════

pub const PANEL_W: u32 = 400;
pub const PANEL_H: u32 = 200;
const PANEL_BG:    Rgb<u8> = Rgb([50, 50, 50]);

const WHITE:       Rgb<u8> = Rgb([255, 255, 255]);
const RED:         Rgb<u8> = Rgb([255, 0, 0]);
const GREEN:       Rgb<u8> = Rgb([0, 255, 0]);
const BLUE:        Rgb<u8> = Rgb([0, 0, 255]);
const BONE:        Rgb<u8> = Rgb([225, 225, 225]);
const JOINT:       Rgb<u8> = Rgb([230, 40, 40]);
const STATUS_FG:   Rgb<u8> = Rgb([70, 70, 70]);

const LABEL_SCALE:  u32 = 3;
const FOOTER_SCALE: u32 = 2;
const BUTTON_SCALE: u32 = 2;

const FOOTER_TEXT: &str = "Press 'S' to Save | ESC to Exit";

// ════════════════════════════════════════════════════════════════════════════
// Button
// ════════════════════════════════════════════════════════════════════════════

/// A labelled rectangle that can be hit-tested.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Button {
    pub x:     u32,
    pub y:     u32,
    pub w:     u32,
    pub h:     u32,
    pub label: &'static str,
    pub fill:  Rgb<u8>,
}

/// Start button on the Idle panel.
pub const DRAW_BUTTON: Button = Button {
    x: 100, y: 70, w: 200, h: 60,
    label: "Draw",
    fill:  Rgb([100, 100, 100]),
};

/// Save button on the DownloadPrompt screen.
pub const DOWNLOAD_BUTTON: Button = Button {
    x: 220, y: 400, w: 200, h: 60,
    label: "Download JPEG",
    fill:  Rgb([0, 150, 0]),
};

impl Button {
    /// Inclusive on all four edges: `(x, y)` through `(x + w, y + h)`.
    pub fn contains(&self, px: i32, py: i32) -> bool {
        let (x0, y0) = (self.x as i32, self.y as i32);
        let (x1, y1) = (x0 + self.w as i32, y0 + self.h as i32);
        px >= x0 && px <= x1 && py >= y0 && py <= y1
    }

    pub fn draw(&self, img: &mut RgbImage) {
        let rect = Rect::at(self.x as i32, self.y as i32).of_size(self.w + 1, self.h + 1);
        draw_filled_rect_mut(img, rect, self.fill);
        draw_hollow_rect_mut(img, rect, WHITE);
        let inner = Rect::at(self.x as i32 + 1, self.y as i32 + 1).of_size(self.w - 1, self.h - 1);
        draw_hollow_rect_mut(img, inner, WHITE);

        let tw = text_width(self.label, BUTTON_SCALE) as i32;
        let th = text_height(BUTTON_SCALE) as i32;
        let tx = self.x as i32 + (self.w as i32 - tw) / 2;
        let ty = self.y as i32 + (self.h as i32 - th) / 2;
        draw_text(img, self.label, tx, ty, BUTTON_SCALE, WHITE);
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Screens
// ════════════════════════════════════════════════════════════════════════════

/// Idle screen: dark panel with the Draw button.
pub fn control_panel() -> RgbImage {
    let mut img = RgbImage::from_pixel(PANEL_W, PANEL_H, PANEL_BG);
    DRAW_BUTTON.draw(&mut img);
    img
}

/// DownloadPrompt screen: the canvas with the Download button on top.
pub fn download_view(canvas: &Canvas, status: Option<&str>) -> RgbImage {
    let mut img = canvas.image().clone();
    DOWNLOAD_BUTTON.draw(&mut img);
    if let Some(s) = status {
        draw_text(&mut img, s, 10, 10, FOOTER_SCALE, STATUS_FG);
    }
    img
}

/// CameraActive screen: annotated frame on the left, canvas on the right,
/// key hints along the bottom.
///
/// A frame whose height differs from the canvas is resized to match.
pub fn camera_view(frame: &RgbImage, canvas: &Canvas, status: Option<&str>) -> RgbImage {
    let height = canvas.height();
    let resized;
    let frame = if frame.height() == height {
        frame
    } else {
        let width = (frame.width() as u64 * height as u64 / frame.height().max(1) as u64) as u32;
        resized = imageops::resize(frame, width.max(1), height, FilterType::Triangle);
        &resized
    };

    let mut out = RgbImage::new(frame.width() + canvas.width(), height);
    imageops::replace(&mut out, frame, 0, 0);
    imageops::replace(&mut out, canvas.image(), frame.width() as i64, 0);

    let footer_y = (height - text_height(FOOTER_SCALE) - 10) as i32;
    draw_text(&mut out, FOOTER_TEXT, 10, footer_y, FOOTER_SCALE, WHITE);

    if let Some(s) = status {
        let x = out.width() as i32 - text_width(s, FOOTER_SCALE) as i32 - 10;
        draw_text(&mut out, s, x.max(frame.width() as i32 + 10), 10, FOOTER_SCALE, STATUS_FG);
    }
    out
}

// ════════════════════════════════════════════════════════════════════════════
// Frame overlay
// ════════════════════════════════════════════════════════════════════════════

/// Draw the hand skeleton, the gesture marker and the gesture label onto
/// the camera frame.
///
/// Keypoints are scaled by the *frame* size here, whereas strokes on the
/// canvas are scaled by the canvas size.
pub fn overlay_hand(frame: &mut RgbImage, hand: Option<&KeypointSet>, gesture: Gesture) {
    let (w, h) = frame.dimensions();

    if let Some(hand) = hand {
        let px = |i: usize| {
            let (x, y) = hand.get(i).to_pixel(w, h);
            (x as i32, y as i32)
        };

        for (a, b) in HAND_CONNECTIONS {
            let (pa, pb) = (px(a), px(b));
            draw_line_segment_mut(
                frame,
                (pa.0 as f32, pa.1 as f32),
                (pb.0 as f32, pb.1 as f32),
                BONE,
            );
        }
        for i in 0..hand.points().len() {
            draw_filled_circle_mut(frame, px(i), 3, JOINT);
        }

        match gesture {
            Gesture::Clear => {
                let (x, y) = hand.middle_tip().to_pixel(w, h);
                draw_filled_circle_mut(frame, (x as i32, y as i32), 15, RED);
            }
            Gesture::Draw => {
                let (x, y) = hand.index_tip().to_pixel(w, h);
                draw_filled_circle_mut(frame, (x as i32, y as i32), 10, GREEN);
            }
            Gesture::Erase => {
                let (x, y) = hand.index_tip().to_pixel(w, h);
                draw_hollow_circle_mut(frame, (x as i32, y as i32), 20, BLUE);
                draw_hollow_circle_mut(frame, (x as i32, y as i32), 19, BLUE);
            }
            Gesture::Unknown | Gesture::NoHand => {}
        }
    }

    draw_text(frame, gesture.label(), 10, 10, LABEL_SCALE, GREEN);
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
