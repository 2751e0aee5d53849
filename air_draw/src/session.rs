//! Screen state machine.
//!
//! `Session` owns the canvas, the stroke cursor, the open camera and the
//! landmark provider.  The driver feeds it the input events collected each
//! tick; the session routes them to the handler for the current screen and
//! returns the [`View`] to display.
//!
//! ```text
//!            click Draw                 stop_camera()
//!   Idle ─────────────────▶ CameraActive ─────────────▶ DownloadPrompt
//!    ▲                        │  S = save                    │
//!    └────────────────────────┼──────────────────────────────┘
//!                             │              click Download (saved)
//!        Escape from any screen ends the session
//! ```

use hand_gesture::{classify_hand, Gesture, Keypoint, KeypointSet};
use image::imageops;
use image::RgbImage;
use sketch_canvas::{Brush, Canvas, Exporter, StrokeMode, StrokeTracker};

use crate::camera::{Camera, CameraOpener};
use crate::error::{AppError, CaptureError};
use crate::landmarks::LandmarkProvider;
use crate::render::{self, DOWNLOAD_BUTTON, DRAW_BUTTON};

// ════════════════════════════════════════════════════════════════════════════
// Input / output types
// ════════════════════════════════════════════════════════════════════════════

/// Which screen is showing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Screen {
    Idle,
    CameraActive,
    DownloadPrompt,
}

/// Keys the session reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Escape,
    Char(char),
}

/// One discrete user action, in the coordinates of the current window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Click { x: i32, y: i32 },
    Key(Key),
}

/// What to put on screen this tick.
#[derive(Clone, Debug)]
pub struct View {
    pub screen: Screen,
    pub image:  RgbImage,
    /// Size of the camera pane at the left of `image` (CameraActive only).
    pub camera_pane: Option<(u32, u32)>,
}

#[derive(Debug)]
pub enum Tick {
    Continue(View),
    Exit,
}

/// Startup settings for a [`Session`].
#[derive(Clone, Debug)]
pub struct SessionSettings {
    pub camera_index: u32,
    pub brush:        Brush,
    pub exporter:     Exporter,
}

impl Default for SessionSettings {
    fn default() -> Self {
        SessionSettings {
            camera_index: 0,
            brush:        Brush::default(),
            exporter:     Exporter::default(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Session
// ════════════════════════════════════════════════════════════════════════════

pub struct Session {
    screen:   Screen,
    opener:   Box<dyn CameraOpener>,
    provider: Box<dyn LandmarkProvider>,
    camera:   Option<Box<dyn Camera>>,

    canvas:   Canvas,
    stroke:   StrokeTracker,
    exporter: Exporter,
    camera_index: u32,

    gesture:  Gesture,
    /// Outcome of the last save, shown on screen.
    status:   Option<String>,
}

impl Session {
    pub fn new(
        opener:   Box<dyn CameraOpener>,
        provider: Box<dyn LandmarkProvider>,
        settings: SessionSettings,
    ) -> Self {
        Session {
            screen: Screen::Idle,
            opener,
            provider,
            camera: None,
            canvas: Canvas::default(),
            stroke: StrokeTracker::new(settings.brush),
            exporter: settings.exporter,
            camera_index: settings.camera_index,
            gesture: Gesture::NoHand,
            status: None,
        }
    }

    // ── accessors ─────────────────────────────────────────────────────────

    pub fn screen(&self)        -> Screen              { self.screen }
    pub fn canvas(&self)        -> &Canvas             { &self.canvas }
    pub fn gesture(&self)       -> Gesture             { self.gesture }
    pub fn stroke_cursor(&self) -> Option<(u32, u32)>  { self.stroke.cursor() }
    pub fn status(&self)        -> Option<&str>        { self.status.as_deref() }
    pub fn camera_open(&self)   -> bool                { self.camera.is_some() }

    // ── per-tick entry point ──────────────────────────────────────────────

    /// Handle this tick's input in order, then render the current screen.
    ///
    /// Escape ends the session at once; later events and the render are
    /// skipped.  Events after a screen change belong to the old window and
    /// are dropped, apart from Escape.  A camera that fails to open or to
    /// deliver a frame is fatal.
    pub fn tick(&mut self, events: &[InputEvent]) -> Result<Tick, AppError> {
        let shown = self.screen;
        for &event in events {
            if event == InputEvent::Key(Key::Escape) {
                log::info!("escape pressed, exiting");
                self.shutdown();
                return Ok(Tick::Exit);
            }
            if self.screen == shown {
                self.dispatch(event)?;
            }
        }

        let view = match self.screen {
            Screen::Idle => View {
                screen: Screen::Idle,
                image:  render::control_panel(),
                camera_pane: None,
            },
            Screen::CameraActive => self.camera_tick()?,
            Screen::DownloadPrompt => View {
                screen: Screen::DownloadPrompt,
                image:  render::download_view(&self.canvas, self.status.as_deref()),
                camera_pane: None,
            },
        };
        Ok(Tick::Continue(view))
    }

    fn dispatch(&mut self, event: InputEvent) -> Result<(), AppError> {
        match (self.screen, event) {
            (Screen::Idle, InputEvent::Click { x, y }) if DRAW_BUTTON.contains(x, y) => {
                self.start_camera()?;
            }
            (Screen::CameraActive, InputEvent::Key(Key::Char('s' | 'S'))) => {
                self.save();
            }
            (Screen::DownloadPrompt, InputEvent::Click { x, y }) if DOWNLOAD_BUTTON.contains(x, y) => {
                if self.save() {
                    self.status = None;
                    self.screen = Screen::Idle;
                }
            }
            _ => {}
        }
        Ok(())
    }

    // ── transitions ───────────────────────────────────────────────────────

    /// Open the camera on a fresh white canvas.
    pub fn start_camera(&mut self) -> Result<(), AppError> {
        let camera = self.opener.open(self.camera_index)?;
        self.camera = Some(camera);
        self.canvas = Canvas::default();
        self.stroke.reset();
        self.gesture = Gesture::NoHand;
        self.status = None;
        self.screen = Screen::CameraActive;

        log::info!("camera started ({}); use gestures to draw:", self.provider.name());
        log::info!("  index finger up  → draw");
        log::info!("  middle finger up → clear the canvas");
        log::info!("  fist             → erase");
        log::info!("  S saves, Esc exits");
        Ok(())
    }

    /// Release the camera and offer the drawing for download.  No effect
    /// outside [`Screen::CameraActive`].
    pub fn stop_camera(&mut self) {
        if self.screen != Screen::CameraActive {
            return;
        }
        self.camera = None;
        self.stroke.reset();
        self.screen = Screen::DownloadPrompt;
        log::info!("camera stopped");
    }

    /// Release the camera, if open.
    pub fn shutdown(&mut self) {
        if self.camera.take().is_some() {
            log::debug!("camera released");
        }
    }

    /// Export the canvas.  Failures are logged and shown, never fatal.
    fn save(&mut self) -> bool {
        match self.exporter.export(&self.canvas) {
            Ok(path) => {
                self.status = Some(format!("Saved {}", path.display()));
                true
            }
            Err(e) => {
                log::error!("save failed: {}", e);
                self.status = Some("Save failed".to_string());
                false
            }
        }
    }

    // ── camera screen ─────────────────────────────────────────────────────

    fn camera_tick(&mut self) -> Result<View, AppError> {
        let camera = self.camera.as_mut().ok_or(CaptureError::NotOpen)?;
        let frame = match camera.read_frame() {
            Ok(f) => f,
            Err(e) => {
                log::error!("{}", e);
                self.shutdown();
                return Err(e.into());
            }
        };
        Ok(self.process_frame(frame))
    }

    /// Run one frame through the pipeline: mirror, detect, classify, update
    /// the canvas, render.
    pub fn process_frame(&mut self, mut frame: RgbImage) -> View {
        imageops::flip_horizontal_in_place(&mut frame);

        let first: Option<Vec<Keypoint>> = match self.provider.detect(&frame) {
            Ok(hands) => hands.into_iter().next(),
            Err(e) => {
                log::warn!("{}: {}", self.provider.name(), e);
                None
            }
        };
        let gesture = classify_hand(first.as_deref());
        let hand = first.as_deref().and_then(KeypointSet::from_slice);
        if first.is_some() && hand.is_none() {
            log::debug!("ignoring malformed hand with {} points", first.as_ref().map_or(0, Vec::len));
        }

        self.apply_gesture(gesture, hand.as_ref());

        render::overlay_hand(&mut frame, hand.as_ref(), gesture);
        let image = render::camera_view(&frame, &self.canvas, self.status.as_deref());
        // The frame is scaled to the canvas height, so report the pane as
        // displayed rather than as captured.
        let pane = (image.width() - self.canvas.width(), image.height());
        View {
            screen: Screen::CameraActive,
            image,
            camera_pane: Some(pane),
        }
    }

    /// Canvas side of a gesture.  Points are scaled by the canvas size.
    fn apply_gesture(&mut self, gesture: Gesture, hand: Option<&KeypointSet>) {
        if gesture != self.gesture {
            log::debug!("gesture: {:?} → {:?}", self.gesture, gesture);
        }
        self.gesture = gesture;

        let (mode, hand) = match (gesture, hand) {
            (Gesture::Clear, _) => {
                self.stroke.clear_all(&mut self.canvas);
                return;
            }
            (Gesture::Draw, Some(h))  => (StrokeMode::Draw, h),
            (Gesture::Erase, Some(h)) => (StrokeMode::Erase, h),
            _ => {
                self.stroke.reset();
                return;
            }
        };
        let point = hand.index_tip().to_pixel(self.canvas.width(), self.canvas.height());
        self.stroke.begin_or_continue(&mut self.canvas, point, mode);
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.shutdown();
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::SyntheticOpener;
    use crate::error::ProviderError;
    use crate::landmarks::{SimInput, SimulatedHand};
    use hand_gesture::{synthesize, HandPose};
    use image::Rgb;
    use sketch_canvas::{BACKGROUND, INK_RED};
    use std::collections::VecDeque;
    use std::sync::mpsc::{self, Sender};

    // ── fakes ─────────────────────────────────────────────────────────────

    /// Camera that yields `frames` frames and then fails.
    struct CountdownCamera { frames: usize }

    impl Camera for CountdownCamera {
        fn read_frame(&mut self) -> Result<RgbImage, CaptureError> {
            if self.frames == 0 {
                return Err(CaptureError::Read("device unplugged".into()));
            }
            self.frames -= 1;
            Ok(RgbImage::new(640, 480))
        }
    }

    struct CountdownOpener { frames: usize }

    impl CameraOpener for CountdownOpener {
        fn open(&mut self, _index: u32) -> Result<Box<dyn Camera>, CaptureError> {
            Ok(Box::new(CountdownCamera { frames: self.frames }))
        }
    }

    struct NoCamera;

    impl CameraOpener for NoCamera {
        fn open(&mut self, index: u32) -> Result<Box<dyn Camera>, CaptureError> {
            Err(CaptureError::Open { index, reason: "no such device".into() })
        }
    }

    /// Provider replaying canned detections.
    struct Scripted { frames: VecDeque<Result<Vec<Vec<Keypoint>>, ProviderError>> }

    impl LandmarkProvider for Scripted {
        fn detect(&mut self, _f: &RgbImage) -> Result<Vec<Vec<Keypoint>>, ProviderError> {
            self.frames.pop_front().unwrap_or_else(|| Ok(Vec::new()))
        }
        fn name(&self) -> &str { "scripted" }
    }

    // ── helpers ───────────────────────────────────────────────────────────

    fn settings(dir: &std::path::Path) -> SessionSettings {
        SessionSettings { exporter: Exporter::new(dir), ..SessionSettings::default() }
    }

    fn sim_session(dir: &std::path::Path) -> (Session, Sender<SimInput>) {
        let (tx, rx) = mpsc::channel();
        let session = Session::new(
            Box::new(SyntheticOpener),
            Box::new(SimulatedHand::new(rx)),
            settings(dir),
        );
        (session, tx)
    }

    /// Normalized point landing on canvas pixel `(x, y)`.
    fn at_px(x: u32, y: u32) -> Keypoint {
        Keypoint::new((x as f32 + 0.5) / 640.0, (y as f32 + 0.5) / 480.0)
    }

    fn hold(tx: &Sender<SimInput>, pose: Option<HandPose>, x: u32, y: u32) {
        tx.send(SimInput::Hand { pose, at: Some(at_px(x, y)) }).unwrap();
    }

    const CLICK_DRAW: InputEvent     = InputEvent::Click { x: 150, y: 100 };
    const CLICK_DOWNLOAD: InputEvent = InputEvent::Click { x: 300, y: 430 };
    const ESC: InputEvent            = InputEvent::Key(Key::Escape);
    const SAVE: InputEvent           = InputEvent::Key(Key::Char('s'));

    fn files_in(dir: &std::path::Path) -> usize {
        std::fs::read_dir(dir).map(|d| d.count()).unwrap_or(0)
    }

    // ── screens ───────────────────────────────────────────────────────────

    #[test]
    fn starts_idle_with_control_panel() {
        let tmp = tempfile::tempdir().unwrap();
        let (mut s, _tx) = sim_session(tmp.path());
        match s.tick(&[]).unwrap() {
            Tick::Continue(v) => {
                assert_eq!(v.screen, Screen::Idle);
                assert_eq!(v.image.dimensions(), (400, 200));
            }
            Tick::Exit => panic!("unexpected exit"),
        }
    }

    #[test]
    fn click_inside_draw_button_starts_camera() {
        let tmp = tempfile::tempdir().unwrap();
        let (mut s, _tx) = sim_session(tmp.path());
        s.tick(&[CLICK_DRAW]).unwrap();
        assert_eq!(s.screen(), Screen::CameraActive);
        assert!(s.camera_open());
        assert!(s.canvas().is_blank());
    }

    #[test]
    fn click_outside_draw_button_does_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let (mut s, _tx) = sim_session(tmp.path());
        s.tick(&[InputEvent::Click { x: 0, y: 0 }]).unwrap();
        assert_eq!(s.screen(), Screen::Idle);
        assert!(!s.camera_open());
    }

    #[test]
    fn camera_view_is_frame_and_canvas() {
        let tmp = tempfile::tempdir().unwrap();
        let (mut s, _tx) = sim_session(tmp.path());
        match s.tick(&[CLICK_DRAW]).unwrap() {
            Tick::Continue(v) => {
                assert_eq!(v.screen, Screen::CameraActive);
                assert_eq!(v.image.dimensions(), (1280, 480));
                assert_eq!(v.camera_pane, Some((640, 480)));
            }
            Tick::Exit => panic!("unexpected exit"),
        }
    }

    #[test]
    fn escape_exits_from_every_screen() {
        let tmp = tempfile::tempdir().unwrap();

        let (mut s, _tx) = sim_session(tmp.path());
        assert!(matches!(s.tick(&[ESC]).unwrap(), Tick::Exit));

        let (mut s, _tx) = sim_session(tmp.path());
        s.tick(&[CLICK_DRAW]).unwrap();
        assert!(matches!(s.tick(&[ESC]).unwrap(), Tick::Exit));
        assert!(!s.camera_open());

        let (mut s, _tx) = sim_session(tmp.path());
        s.tick(&[CLICK_DRAW]).unwrap();
        s.stop_camera();
        assert!(matches!(s.tick(&[ESC]).unwrap(), Tick::Exit));
    }

    #[test]
    fn escape_skips_later_events() {
        let tmp = tempfile::tempdir().unwrap();
        let (mut s, _tx) = sim_session(tmp.path());
        assert!(matches!(s.tick(&[ESC, CLICK_DRAW]).unwrap(), Tick::Exit));
        assert_eq!(s.screen(), Screen::Idle);
    }

    // ── drawing ───────────────────────────────────────────────────────────

    #[test]
    fn draw_frames_paint_a_horizontal_line() {
        let tmp = tempfile::tempdir().unwrap();
        let (mut s, tx) = sim_session(tmp.path());
        s.tick(&[CLICK_DRAW]).unwrap();

        for x in [10, 20, 30] {
            hold(&tx, Some(HandPose::Pointing), x, 10);
            s.tick(&[]).unwrap();
            assert_eq!(s.gesture(), Gesture::Draw);
        }

        let c = s.canvas();
        for x in 10..=30 {
            assert_eq!(c.pixel(x, 10), INK_RED, "x = {}", x);
        }
        // An 8 px brush paints 7 rows: 3 either side of the centre line.
        assert_eq!(c.pixel(20, 13), INK_RED);
        assert_eq!(c.pixel(20, 14), BACKGROUND);
        assert_eq!(c.pixel(20, 20), BACKGROUND);
        assert_eq!(c.pixel(60, 10), BACKGROUND);
        assert_eq!(s.stroke_cursor(), Some((30, 10)));
    }

    #[test]
    fn first_draw_frame_does_not_connect_from_origin() {
        let tmp = tempfile::tempdir().unwrap();
        let (mut s, tx) = sim_session(tmp.path());
        s.tick(&[CLICK_DRAW]).unwrap();

        hold(&tx, Some(HandPose::Pointing), 300, 200);
        s.tick(&[]).unwrap();
        // The cursor is set but nothing is joined to it yet.
        assert_eq!(s.canvas().pixel(150, 100), BACKGROUND);
        assert_eq!(s.canvas().pixel(0, 0), BACKGROUND);
    }

    #[test]
    fn unknown_gesture_breaks_the_stroke() {
        let tmp = tempfile::tempdir().unwrap();
        let (mut s, tx) = sim_session(tmp.path());
        s.tick(&[CLICK_DRAW]).unwrap();

        hold(&tx, Some(HandPose::Pointing), 100, 100);
        s.tick(&[]).unwrap();
        hold(&tx, Some(HandPose::OpenPalm), 200, 100);
        s.tick(&[]).unwrap();
        assert_eq!(s.gesture(), Gesture::Unknown);
        assert_eq!(s.stroke_cursor(), None);
        hold(&tx, Some(HandPose::Pointing), 300, 100);
        s.tick(&[]).unwrap();

        assert!(s.canvas().is_blank());
        assert_eq!(s.stroke_cursor(), Some((300, 100)));
    }

    #[test]
    fn losing_the_hand_breaks_the_stroke() {
        let tmp = tempfile::tempdir().unwrap();
        let (mut s, tx) = sim_session(tmp.path());
        s.tick(&[CLICK_DRAW]).unwrap();

        hold(&tx, Some(HandPose::Pointing), 100, 100);
        s.tick(&[]).unwrap();
        hold(&tx, None, 200, 100);
        s.tick(&[]).unwrap();
        assert_eq!(s.gesture(), Gesture::NoHand);
        hold(&tx, Some(HandPose::Pointing), 300, 100);
        s.tick(&[]).unwrap();

        assert!(s.canvas().is_blank());
    }

    #[test]
    fn fist_erases_and_middle_finger_clears() {
        let tmp = tempfile::tempdir().unwrap();
        let (mut s, tx) = sim_session(tmp.path());
        s.tick(&[CLICK_DRAW]).unwrap();

        hold(&tx, Some(HandPose::Pointing), 100, 240);
        s.tick(&[]).unwrap();
        hold(&tx, Some(HandPose::Pointing), 500, 240);
        s.tick(&[]).unwrap();
        assert_eq!(s.canvas().pixel(300, 240), INK_RED);

        hold(&tx, Some(HandPose::Fist), 280, 240);
        s.tick(&[]).unwrap();
        hold(&tx, Some(HandPose::Fist), 320, 240);
        s.tick(&[]).unwrap();
        assert_eq!(s.gesture(), Gesture::Erase);
        assert_eq!(s.canvas().pixel(300, 240), BACKGROUND);
        assert_eq!(s.canvas().pixel(120, 240), INK_RED);

        hold(&tx, Some(HandPose::MiddleUp), 320, 240);
        s.tick(&[]).unwrap();
        assert_eq!(s.gesture(), Gesture::Clear);
        assert!(s.canvas().is_blank());
        assert_eq!(s.stroke_cursor(), None);
    }

    #[test]
    fn malformed_and_failed_detections_are_no_hand() {
        let tmp = tempfile::tempdir().unwrap();
        let full = synthesize(HandPose::Pointing, at_px(50, 50)).points().to_vec();
        let script = VecDeque::from(vec![
            Ok(vec![full.clone()]),
            Ok(vec![full[..20].to_vec()]),
            Err(ProviderError::Protocol("hiccup".into())),
            Ok(vec![full]),
        ]);
        let mut s = Session::new(
            Box::new(SyntheticOpener),
            Box::new(Scripted { frames: script }),
            settings(tmp.path()),
        );
        s.start_camera().unwrap();

        s.tick(&[]).unwrap();
        assert_eq!(s.gesture(), Gesture::Draw);
        s.tick(&[]).unwrap();
        assert_eq!(s.gesture(), Gesture::NoHand);
        assert_eq!(s.stroke_cursor(), None);
        s.tick(&[]).unwrap();
        assert_eq!(s.gesture(), Gesture::NoHand);
        s.tick(&[]).unwrap();
        assert_eq!(s.gesture(), Gesture::Draw);
    }

    #[test]
    fn only_first_hand_is_used() {
        let tmp = tempfile::tempdir().unwrap();
        let fist  = synthesize(HandPose::Fist, at_px(50, 50)).points().to_vec();
        let point = synthesize(HandPose::Pointing, at_px(50, 50)).points().to_vec();
        let script = VecDeque::from(vec![Ok(vec![fist, point])]);
        let mut s = Session::new(
            Box::new(SyntheticOpener),
            Box::new(Scripted { frames: script }),
            settings(tmp.path()),
        );
        s.start_camera().unwrap();
        s.tick(&[]).unwrap();
        assert_eq!(s.gesture(), Gesture::Erase);
    }

    #[test]
    fn overlay_does_not_touch_canvas() {
        let tmp = tempfile::tempdir().unwrap();
        let (mut s, tx) = sim_session(tmp.path());
        s.tick(&[CLICK_DRAW]).unwrap();
        hold(&tx, Some(HandPose::OpenPalm), 320, 240);
        s.tick(&[]).unwrap();
        assert!(s.canvas().is_blank());
    }

    // ── saving ────────────────────────────────────────────────────────────

    #[test]
    fn s_key_saves_without_leaving_camera() {
        let tmp = tempfile::tempdir().unwrap();
        let (mut s, _tx) = sim_session(tmp.path());
        s.tick(&[CLICK_DRAW]).unwrap();
        s.tick(&[SAVE]).unwrap();
        assert_eq!(s.screen(), Screen::CameraActive);
        assert_eq!(files_in(tmp.path()), 1);
        assert!(s.status().unwrap().starts_with("Saved"));
    }

    #[test]
    fn events_after_a_screen_change_are_dropped() {
        let tmp = tempfile::tempdir().unwrap();
        let (mut s, _tx) = sim_session(tmp.path());
        s.tick(&[CLICK_DRAW]).unwrap();
        s.stop_camera();
        // The second click lands where the Draw button would be on Idle.
        s.tick(&[CLICK_DOWNLOAD, CLICK_DRAW]).unwrap();
        assert_eq!(s.screen(), Screen::Idle);
        assert!(!s.camera_open());
    }

    #[test]
    fn s_key_is_ignored_on_idle() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("drawings");
        let (mut s, _tx) = sim_session(&out);
        s.tick(&[SAVE, InputEvent::Key(Key::Char('S'))]).unwrap();
        assert_eq!(files_in(&out), 0);
    }

    #[test]
    fn stop_then_download_returns_to_idle() {
        let tmp = tempfile::tempdir().unwrap();
        let (mut s, _tx) = sim_session(tmp.path());
        s.tick(&[CLICK_DRAW]).unwrap();
        s.stop_camera();
        assert_eq!(s.screen(), Screen::DownloadPrompt);
        assert!(!s.camera_open());

        // Outside the button: no-op.
        s.tick(&[InputEvent::Click { x: 5, y: 5 }]).unwrap();
        assert_eq!(s.screen(), Screen::DownloadPrompt);

        s.tick(&[CLICK_DOWNLOAD]).unwrap();
        assert_eq!(s.screen(), Screen::Idle);
        assert_eq!(files_in(tmp.path()), 1);
    }

    #[test]
    fn stop_camera_is_a_no_op_when_idle() {
        let tmp = tempfile::tempdir().unwrap();
        let (mut s, _tx) = sim_session(tmp.path());
        s.stop_camera();
        assert_eq!(s.screen(), Screen::Idle);
    }

    #[test]
    fn failed_download_keeps_the_prompt() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("drawings");
        std::fs::write(&blocker, b"file, not dir").unwrap();
        let (mut s, _tx) = sim_session(&blocker);

        s.tick(&[CLICK_DRAW]).unwrap();
        s.tick(&[SAVE]).unwrap();
        assert_eq!(s.screen(), Screen::CameraActive);
        assert_eq!(s.status(), Some("Save failed"));

        s.stop_camera();
        s.tick(&[CLICK_DOWNLOAD]).unwrap();
        assert_eq!(s.screen(), Screen::DownloadPrompt);
    }

    #[test]
    fn restart_gives_a_fresh_canvas() {
        let tmp = tempfile::tempdir().unwrap();
        let (mut s, tx) = sim_session(tmp.path());
        s.tick(&[CLICK_DRAW]).unwrap();
        hold(&tx, Some(HandPose::Pointing), 100, 100);
        s.tick(&[]).unwrap();
        hold(&tx, Some(HandPose::Pointing), 200, 100);
        s.tick(&[]).unwrap();
        assert!(!s.canvas().is_blank());

        s.stop_camera();
        s.tick(&[CLICK_DOWNLOAD]).unwrap();
        hold(&tx, None, 0, 0);
        s.tick(&[CLICK_DRAW]).unwrap();
        assert_eq!(s.screen(), Screen::CameraActive);
        assert!(s.canvas().is_blank());
    }

    // ── failures ──────────────────────────────────────────────────────────

    #[test]
    fn camera_that_will_not_open_is_fatal() {
        let tmp = tempfile::tempdir().unwrap();
        let (_tx, rx) = mpsc::channel();
        let mut s = Session::new(Box::new(NoCamera), Box::new(SimulatedHand::new(rx)), settings(tmp.path()));
        let err = s.tick(&[CLICK_DRAW]).unwrap_err();
        assert!(matches!(err, AppError::Capture(CaptureError::Open { index: 0, .. })));
        assert_eq!(s.screen(), Screen::Idle);
    }

    #[test]
    fn lost_frame_is_fatal() {
        let tmp = tempfile::tempdir().unwrap();
        let (_tx, rx) = mpsc::channel();
        let mut s = Session::new(
            Box::new(CountdownOpener { frames: 2 }),
            Box::new(SimulatedHand::new(rx)),
            settings(tmp.path()),
        );
        assert!(s.tick(&[CLICK_DRAW]).is_ok());
        assert!(s.tick(&[]).is_ok());
        let err = s.tick(&[]).unwrap_err();
        assert!(matches!(err, AppError::Capture(CaptureError::Read(_))));
        assert!(!s.camera_open());
    }

    #[test]
    fn camera_pane_matches_the_scaled_frame() {
        let tmp = tempfile::tempdir().unwrap();
        let (mut s, _tx) = sim_session(tmp.path());
        s.start_camera().unwrap();

        let view = s.process_frame(RgbImage::new(1280, 720));
        // 1280×720 scaled to the 480 px canvas height is 853 px wide.
        assert_eq!(view.image.dimensions(), (853 + 640, 480));
        assert_eq!(view.camera_pane, Some((853, 480)));
    }

    #[test]
    fn camera_frame_is_mirrored_before_detection() {
        struct LeftMarked;
        impl Camera for LeftMarked {
            fn read_frame(&mut self) -> Result<RgbImage, CaptureError> {
                let mut f = RgbImage::new(640, 480);
                f.put_pixel(0, 479, Rgb([255, 255, 0]));
                Ok(f)
            }
        }
        struct Opener;
        impl CameraOpener for Opener {
            fn open(&mut self, _: u32) -> Result<Box<dyn Camera>, CaptureError> {
                Ok(Box::new(LeftMarked))
            }
        }
        struct SeesRightEdge;
        impl LandmarkProvider for SeesRightEdge {
            fn detect(&mut self, f: &RgbImage) -> Result<Vec<Vec<Keypoint>>, ProviderError> {
                assert_eq!(*f.get_pixel(639, 479), Rgb([255, 255, 0]));
                Ok(Vec::new())
            }
            fn name(&self) -> &str { "mirror check" }
        }

        let tmp = tempfile::tempdir().unwrap();
        let mut s = Session::new(Box::new(Opener), Box::new(SeesRightEdge), settings(tmp.path()));
        s.tick(&[CLICK_DRAW]).unwrap();
    }
}
