//! Configuration and the main loop.
//!
//! `run` wires a camera opener, a landmark provider and the visualizer to a
//! [`Session`] and drives it one frame per iteration until Escape, a closed
//! window, or a fatal error.

use std::path::PathBuf;
use std::sync::mpsc::{self, Sender};
use std::time::Duration;

use sketch_canvas::{Brush, Exporter, DEFAULT_OUTPUT_DIR, DEFAULT_QUALITY, INK_RED};

use crate::camera::{default_opener, CameraOpener};
use crate::error::{AppError, ProviderError};
use crate::landmarks::{LandmarkProvider, ProcessLandmarker, SimInput, SimulatedHand, DEFAULT_MIN_CONFIDENCE};
use crate::session::{Screen, Session, SessionSettings, Tick};
use crate::visualizer::Visualizer;

// ════════════════════════════════════════════════════════════════════════════
// AppConfig
// ════════════════════════════════════════════════════════════════════════════

/// Configuration for the full application.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub camera_index:   u32,
    pub brush:          Brush,
    pub output_dir:     PathBuf,
    pub jpeg_quality:   u8,
    /// External detector command (program, then arguments).  `None` uses the
    /// keyboard/mouse simulated hand.
    pub detector:       Option<Vec<String>>,
    pub min_confidence: f32,
    /// Minimum time between window updates.
    pub frame_interval: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            camera_index:   0,
            brush:          Brush { ink: INK_RED, brush_thickness: 8, eraser_thickness: 80 },
            output_dir:     PathBuf::from(DEFAULT_OUTPUT_DIR),
            jpeg_quality:   DEFAULT_QUALITY,
            detector:       None,
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            frame_interval: Duration::from_millis(16),
        }
    }
}

impl AppConfig {
    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            camera_index: self.camera_index,
            brush:        self.brush,
            exporter:     Exporter::new(self.output_dir.clone()).with_quality(self.jpeg_quality),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// run(): the main application loop
// ════════════════════════════════════════════════════════════════════════════

/// The configured landmark provider.  The sender feeds the simulated hand
/// and is `None` when an external detector is used.
pub fn hand_provider(
    cfg: &AppConfig,
) -> Result<(Box<dyn LandmarkProvider>, Option<Sender<SimInput>>), ProviderError> {
    if let Some(cmd) = &cfg.detector {
        let detector: Box<dyn LandmarkProvider> =
            Box::new(ProcessLandmarker::spawn(cmd, cfg.min_confidence)?);
        return Ok((detector, None));
    }
    let (tx, rx) = mpsc::channel();
    let simulated: Box<dyn LandmarkProvider> = Box::new(SimulatedHand::new(rx));
    Ok((simulated, Some(tx)))
}

/// Run the application with the build's default camera.
pub fn run(cfg: AppConfig) -> Result<(), AppError> {
    run_with(cfg, default_opener())
}

/// Run the application with a specific camera opener.
pub fn run_with(cfg: AppConfig, opener: Box<dyn CameraOpener>) -> Result<(), AppError> {
    let (provider, sim_tx) = hand_provider(&cfg)?;
    log::info!("hand landmarks from: {}", provider.name());

    let mut vis = Visualizer::new(sim_tx, cfg.frame_interval);
    let mut session = Session::new(opener, provider, cfg.session_settings());

    loop {
        // 1. Window input
        let input = vis.poll_input();
        if input.closed {
            // Closing the camera window stops the camera; any other window
            // ends the program.
            if vis.screen() == Some(Screen::CameraActive) {
                vis.close();
                session.stop_camera();
            } else {
                log::info!("window closed, exiting");
                break;
            }
        }

        // 2. Session step
        let view = match session.tick(&input.events) {
            Ok(Tick::Continue(view)) => view,
            Ok(Tick::Exit)           => break,
            Err(e) => {
                log::error!("{}", e);
                return Err(e);
            }
        };

        // 3. Render
        vis.present(&view)?;
    }

    session.shutdown();
    Ok(())
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
