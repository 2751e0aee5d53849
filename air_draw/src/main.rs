//! air_draw: interactive entry point.

use std::path::PathBuf;

use air_draw::app::{run, AppConfig};
use anyhow::Context;
use clap::Parser;
use sketch_canvas::Brush;

/// Draw on a canvas with hand gestures in front of a camera.
#[derive(Parser, Debug)]
#[command(name = "air_draw", version, about)]
struct Args {
    /// Camera device index.
    #[arg(long, default_value_t = 0)]
    camera: u32,

    /// Directory saved drawings are written to.
    #[arg(long, default_value = sketch_canvas::DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// JPEG quality, 1-100.
    #[arg(long, default_value_t = sketch_canvas::DEFAULT_QUALITY,
          value_parser = clap::value_parser!(u8).range(1..=100))]
    quality: u8,

    /// External hand detector command line (split on whitespace).  Without
    /// it the hand is simulated with the keyboard and mouse.
    #[arg(long, value_name = "CMD")]
    detector: Option<String>,

    /// Minimum detector confidence for a hand to count.
    #[arg(long, default_value_t = air_draw::landmarks::DEFAULT_MIN_CONFIDENCE)]
    min_confidence: f32,

    /// Pen thickness in pixels.
    #[arg(long, default_value_t = 8)]
    brush: u32,

    /// Eraser thickness in pixels.
    #[arg(long, default_value_t = 80)]
    eraser: u32,
}

impl Args {
    fn into_config(self) -> anyhow::Result<AppConfig> {
        let detector = match self.detector {
            Some(cmd) => {
                let parts: Vec<String> = cmd.split_whitespace().map(str::to_string).collect();
                anyhow::ensure!(!parts.is_empty(), "--detector needs a command");
                Some(parts)
            }
            None => None,
        };

        let defaults = AppConfig::default();
        Ok(AppConfig {
            camera_index:   self.camera,
            output_dir:     self.output_dir,
            jpeg_quality:   self.quality,
            detector,
            min_confidence: self.min_confidence.clamp(0.0, 1.0),
            brush: Brush {
                brush_thickness:  self.brush.max(1),
                eraser_thickness: self.eraser.max(1),
                ..defaults.brush
            },
            ..defaults
        })
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║            Air Draw — Gesture-Controlled Canvas              ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    #[cfg(feature = "webcam")]
    println!("  Camera: system webcam {}", args.camera);
    #[cfg(not(feature = "webcam"))]
    println!("  Camera: synthetic backdrop  (use --features webcam for hardware)");
    match &args.detector {
        Some(cmd) => println!("  Hands:  detector `{}`", cmd),
        None      => println!("  Hands:  simulated, hold D/E/C/U and move the mouse over the feed"),
    }
    println!();

    let cfg = args.into_config()?;
    log::debug!("{:?}", cfg);

    run(cfg).context("air_draw stopped")
}
