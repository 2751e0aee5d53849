//! Hand-landmark providers: an external detector process and a
//! keyboard/mouse simulation.
//!
//! The session only sees [`LandmarkProvider`]; it does not know whether the
//! keypoints came from a real model or from the simulator.

use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::sync::mpsc::Receiver;

use hand_gesture::{synthesize, HandPose, Keypoint};
use image::RgbImage;
use serde::Deserialize;

use crate::error::ProviderError;

// ════════════════════════════════════════════════════════════════════════════
// LandmarkProvider
// ════════════════════════════════════════════════════════════════════════════

/// Anything that can find hands in a frame.
pub trait LandmarkProvider {
    /// Keypoints for every hand found, best first.  Each inner list should
    /// hold 21 normalized points; callers reject any that do not.
    fn detect(&mut self, frame: &RgbImage) -> Result<Vec<Vec<Keypoint>>, ProviderError>;

    fn name(&self) -> &str;
}

// ════════════════════════════════════════════════════════════════════════════
// SimulatedHand: keyboard/mouse simulation (always available)
// ════════════════════════════════════════════════════════════════════════════

/// Raw input from the simulation window, sent once per tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SimInput {
    /// Pose held on the keyboard (if any) and pointer position over the
    /// camera pane in normalized coordinates (if inside it).
    Hand {
        pose: Option<HandPose>,
        at:   Option<Keypoint>,
    },
}

/// Provider driven by [`SimInput`] from the visualizer.
///
/// Input arrives over a channel and is drained without blocking on every
/// `detect`, so the window loop and this provider stay on one thread.  A hand
/// is reported only while a pose key is held and the pointer is over the
/// camera pane; its index fingertip follows the pointer.
pub struct SimulatedHand {
    rx:   Receiver<SimInput>,
    pose: Option<HandPose>,
    at:   Option<Keypoint>,
}

impl SimulatedHand {
    pub fn new(rx: Receiver<SimInput>) -> Self {
        SimulatedHand { rx, pose: None, at: None }
    }
}

impl LandmarkProvider for SimulatedHand {
    fn detect(&mut self, _frame: &RgbImage) -> Result<Vec<Vec<Keypoint>>, ProviderError> {
        for input in self.rx.try_iter() {
            match input {
                SimInput::Hand { pose, at } => {
                    self.pose = pose;
                    self.at   = at;
                }
            }
        }
        Ok(match (self.pose, self.at) {
            (Some(pose), Some(at)) => vec![synthesize(pose, at).points().to_vec()],
            _ => Vec::new(),
        })
    }

    fn name(&self) -> &str {
        "simulated hand"
    }
}

// ════════════════════════════════════════════════════════════════════════════
// ProcessLandmarker: external detector over stdin/stdout
// ════════════════════════════════════════════════════════════════════════════

/// Minimum hand confidence accepted by default.
pub const DEFAULT_MIN_CONFIDENCE: f32 = 0.85;

#[derive(Deserialize, Debug)]
struct PointJson {
    x: f32,
    y: f32,
    #[serde(default)]
    #[allow(dead_code)]
    z: f32,
}

#[derive(Deserialize, Debug)]
struct HandJson {
    #[serde(default)]
    handedness: String,
    score:      f32,
    landmarks:  Vec<PointJson>,
}

#[derive(Deserialize, Debug)]
struct DetectionReply {
    hands: Vec<HandJson>,
    #[serde(default)]
    error: Option<String>,
}

/// Hand detector running as a child process.
///
/// # Protocol
///
/// * On start the process prints `READY` on its own line.
/// * Per frame it reads a 12-byte header (width, height, channel count as
///   little-endian `u32`) followed by `width × height × 3` RGB bytes.
/// * It answers with one JSON line:
///   `{"hands":[{"handedness":"Right","score":0.97,"landmarks":[{"x":0.5,"y":0.4,"z":0.0}, …]}],"error":null}`
///
/// Hands scoring under the confidence threshold are dropped.  A reply with a
/// non-null `error` counts as "no hands" for that frame.
pub struct ProcessLandmarker {
    process:        Child,
    stdin:          ChildStdin,
    stdout:         BufReader<ChildStdout>,
    min_confidence: f32,
    label:          String,
}

impl ProcessLandmarker {
    /// Start `command` (program followed by its arguments) and wait for it
    /// to report `READY`.
    pub fn spawn(command: &[String], min_confidence: f32) -> Result<Self, ProviderError> {
        let (program, args) = command
            .split_first()
            .ok_or_else(|| ProviderError::Protocol("empty detector command".into()))?;
        let label = command.join(" ");

        log::info!("starting hand detector: {}", label);
        let mut process = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| ProviderError::Spawn { command: label.clone(), source })?;

        let (stdin, stdout) = match (process.stdin.take(), process.stdout.take()) {
            (Some(i), Some(o)) => (i, o),
            _ => {
                let _ = process.kill();
                return Err(ProviderError::Protocol("detector pipes unavailable".into()));
            }
        };

        let mut this = ProcessLandmarker {
            process,
            stdin,
            stdout: BufReader::new(stdout),
            min_confidence: min_confidence.clamp(0.0, 1.0),
            label,
        };

        let ready = this.read_line()?;
        if ready.trim() != "READY" {
            return Err(ProviderError::Protocol(format!(
                "expected READY from detector, got {:?}", ready.trim()
            )));
        }
        log::info!("hand detector ready");
        Ok(this)
    }

    fn read_line(&mut self) -> Result<String, ProviderError> {
        let mut line = String::new();
        if self.stdout.read_line(&mut line)? == 0 {
            return Err(ProviderError::Protocol("detector closed its output".into()));
        }
        Ok(line)
    }
}

impl LandmarkProvider for ProcessLandmarker {
    fn detect(&mut self, frame: &RgbImage) -> Result<Vec<Vec<Keypoint>>, ProviderError> {
        let (width, height) = frame.dimensions();
        self.stdin.write_all(&width.to_le_bytes())?;
        self.stdin.write_all(&height.to_le_bytes())?;
        self.stdin.write_all(&3u32.to_le_bytes())?;
        self.stdin.write_all(frame.as_raw())?;
        self.stdin.flush()?;

        let reply = self.read_line()?;
        parse_reply(&reply, self.min_confidence)
    }

    fn name(&self) -> &str {
        &self.label
    }
}

impl Drop for ProcessLandmarker {
    fn drop(&mut self) {
        let _ = self.process.kill();
        let _ = self.process.wait();
    }
}

/// Decode one detector reply, keeping hands at or above `min_confidence`.
pub fn parse_reply(line: &str, min_confidence: f32) -> Result<Vec<Vec<Keypoint>>, ProviderError> {
    let reply: DetectionReply = serde_json::from_str(line.trim())?;

    if let Some(error) = reply.error {
        log::warn!("detector reported: {}", error);
        return Ok(Vec::new());
    }

    Ok(reply
        .hands
        .into_iter()
        .filter(|h| h.score >= min_confidence)
        .map(|h| {
            log::debug!("{} hand, score {:.2}, {} points", h.handedness, h.score, h.landmarks.len());
            h.landmarks.into_iter().map(|p| Keypoint::new(p.x, p.y)).collect()
        })
        .collect())
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
