//! Timestamped JPEG export.
//!
//! Files are named `drawing_<YYYYMMDD_HHMMSS>.jpg`.  The image is encoded to
//! a hidden `.part` sibling first and renamed into place, so a reader never
//! sees a half-written drawing.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use image::codecs::jpeg::JpegEncoder;
use image::ColorType;

use crate::canvas::Canvas;
use crate::error::ExportError;

pub const DEFAULT_OUTPUT_DIR: &str = "drawings";
pub const DEFAULT_QUALITY:    u8   = 95;

const FILE_PREFIX:    &str = "drawing_";
const FILE_EXTENSION: &str = "jpg";
const STAMP_FORMAT:   &str = "%Y%m%d_%H%M%S";

/// Writes canvases into one output directory.
#[derive(Clone, Debug)]
pub struct Exporter {
    dir:     PathBuf,
    quality: u8,
}

impl Default for Exporter {
    fn default() -> Self {
        Exporter::new(DEFAULT_OUTPUT_DIR)
    }
}

impl Exporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Exporter { dir: dir.into(), quality: DEFAULT_QUALITY }
    }

    /// JPEG quality, clamped to 1–100.
    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = quality.clamp(1, 100);
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn quality(&self) -> u8 {
        self.quality
    }

    /// `drawing_20240131_235959.jpg`
    pub fn file_name(stamp: &NaiveDateTime) -> String {
        format!("{}{}.{}", FILE_PREFIX, stamp.format(STAMP_FORMAT), FILE_EXTENSION)
    }

    /// Save `canvas` stamped with the current local time.
    pub fn export(&self, canvas: &Canvas) -> Result<PathBuf, ExportError> {
        self.export_at(canvas, Local::now().naive_local())
    }

    /// Save `canvas` under the name derived from `stamp`.
    ///
    /// Two exports within the same second share a name; the later one
    /// replaces the earlier.
    pub fn export_at(&self, canvas: &Canvas, stamp: NaiveDateTime) -> Result<PathBuf, ExportError> {
        fs::create_dir_all(&self.dir).map_err(|source| ExportError::CreateDir {
            path: self.dir.clone(),
            source,
        })?;

        let name    = Self::file_name(&stamp);
        let path    = self.dir.join(&name);
        let partial = self.dir.join(format!(".{}.part", name));

        if let Err(e) = self.write_jpeg(canvas, &partial).and_then(|()| {
            fs::rename(&partial, &path).map_err(|source| ExportError::Write {
                path: path.clone(),
                source,
            })
        }) {
            let _ = fs::remove_file(&partial);
            return Err(e);
        }

        log::info!("drawing saved as {}", path.display());
        Ok(path)
    }

    fn write_jpeg(&self, canvas: &Canvas, path: &Path) -> Result<(), ExportError> {
        let write_err = |source| ExportError::Write { path: path.to_path_buf(), source };

        let file = File::create(path).map_err(write_err)?;
        let mut out = BufWriter::new(file);
        let img = canvas.image();
        JpegEncoder::new_with_quality(&mut out, self.quality)
            .encode(img.as_raw(), img.width(), img.height(), ColorType::Rgb8)?;
        out.flush().map_err(write_err)?;
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{BACKGROUND, INK_RED};
    use chrono::NaiveDate;

    fn stamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 7)
            .unwrap()
            .and_hms_opt(9, 5, 42)
            .unwrap()
    }

    fn close(a: image::Rgb<u8>, b: image::Rgb<u8>, tol: u8) -> bool {
        a.0.iter().zip(b.0.iter()).all(|(x, y)| x.abs_diff(*y) <= tol)
    }

    #[test]
    fn file_name_format() {
        assert_eq!(Exporter::file_name(&stamp()), "drawing_20240307_090542.jpg");
    }

    #[test]
    fn quality_is_clamped() {
        assert_eq!(Exporter::default().with_quality(0).quality(), 1);
        assert_eq!(Exporter::default().with_quality(250).quality(), 100);
    }

    #[test]
    fn creates_missing_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("nested").join("drawings");
        let path = Exporter::new(&dir).export_at(&Canvas::default(), stamp()).unwrap();
        assert!(dir.is_dir());
        assert_eq!(path, dir.join("drawing_20240307_090542.jpg"));
        assert!(path.is_file());
    }

    #[test]
    fn existing_directory_is_fine() {
        let tmp = tempfile::tempdir().unwrap();
        let exporter = Exporter::new(tmp.path());
        exporter.export_at(&Canvas::default(), stamp()).unwrap();
        exporter.export(&Canvas::default()).unwrap();
    }

    #[test]
    fn round_trip_keeps_size_and_colors() {
        let tmp = tempfile::tempdir().unwrap();
        let mut canvas = Canvas::default();
        canvas.draw_line((100, 240), (540, 240), INK_RED, 40);

        let path = Exporter::new(tmp.path()).export_at(&canvas, stamp()).unwrap();
        let back = image::open(&path).unwrap().to_rgb8();

        assert_eq!(back.dimensions(), (640, 480));
        assert!(close(*back.get_pixel(320, 240), INK_RED, 40));
        assert!(close(*back.get_pixel(320, 60), BACKGROUND, 8));
    }

    #[test]
    fn no_partial_file_left_behind() {
        let tmp = tempfile::tempdir().unwrap();
        Exporter::new(tmp.path()).export_at(&Canvas::default(), stamp()).unwrap();
        let names: Vec<_> = fs::read_dir(tmp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["drawing_20240307_090542.jpg".to_string()]);
    }

    #[test]
    fn unwritable_directory_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        // A regular file where the directory should be.
        let blocker = tmp.path().join("drawings");
        fs::write(&blocker, b"not a dir").unwrap();
        let err = Exporter::new(&blocker).export_at(&Canvas::default(), stamp()).unwrap_err();
        assert!(matches!(err, ExportError::CreateDir { .. }));
    }
}
