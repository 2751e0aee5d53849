//! Frame capture.
//!
//! [`CameraOpener`] opens a device by index and hands back a [`Camera`];
//! dropping the camera releases the device.  The default build uses
//! [`SyntheticOpener`], which needs no hardware; `--features webcam` adds
//! [`WebcamOpener`] backed by `nokhwa`.

use image::{Rgb, RgbImage};

use crate::error::CaptureError;

/// Requested capture size.
pub const FRAME_WIDTH:  u32 = 640;
pub const FRAME_HEIGHT: u32 = 480;

// ════════════════════════════════════════════════════════════════════════════
// Traits
// ════════════════════════════════════════════════════════════════════════════

/// An open capture device.  `read_frame` blocks until a frame is available.
pub trait Camera {
    fn read_frame(&mut self) -> Result<RgbImage, CaptureError>;
}

/// Opens capture devices by index.
pub trait CameraOpener {
    fn open(&mut self, index: u32) -> Result<Box<dyn Camera>, CaptureError>;
}

/// The opener this build should use.
pub fn default_opener() -> Box<dyn CameraOpener> {
    #[cfg(feature = "webcam")]
    {
        Box::new(WebcamOpener::new(FRAME_WIDTH, FRAME_HEIGHT))
    }
    #[cfg(not(feature = "webcam"))]
    {
        Box::new(SyntheticOpener)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// SyntheticCamera: always available
// ════════════════════════════════════════════════════════════════════════════

/// Opens [`SyntheticCamera`]s regardless of index.
#[derive(Clone, Copy, Debug, Default)]
pub struct SyntheticOpener;

impl CameraOpener for SyntheticOpener {
    fn open(&mut self, index: u32) -> Result<Box<dyn Camera>, CaptureError> {
        log::info!("camera {}: synthetic {}x{} backdrop", index, FRAME_WIDTH, FRAME_HEIGHT);
        Ok(Box::new(SyntheticCamera::new(FRAME_WIDTH, FRAME_HEIGHT)))
    }
}

/// Stand-in camera producing a static backdrop: a dark vertical gradient
/// with a faint grid, so the overlay has something to sit on.
pub struct SyntheticCamera {
    backdrop: RgbImage,
}

impl SyntheticCamera {
    pub fn new(width: u32, height: u32) -> Self {
        let backdrop = RgbImage::from_fn(width, height, |x, y| {
            if x % 40 == 0 || y % 40 == 0 {
                return Rgb([52, 60, 72]);
            }
            let t = y as f32 / height.max(1) as f32;
            let shade = |top: f32, bottom: f32| (top + (bottom - top) * t) as u8;
            Rgb([shade(28.0, 44.0), shade(34.0, 58.0), shade(46.0, 70.0)])
        });
        SyntheticCamera { backdrop }
    }
}

impl Camera for SyntheticCamera {
    fn read_frame(&mut self) -> Result<RgbImage, CaptureError> {
        Ok(self.backdrop.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// WebcamCamera: real hardware (feature = "webcam")
// ════════════════════════════════════════════════════════════════════════════

#[cfg(feature = "webcam")]
pub use webcam::{WebcamCamera, WebcamOpener};

#[cfg(feature = "webcam")]
mod webcam {
    use image::RgbImage;
    use nokhwa::pixel_format::RgbFormat;
    use nokhwa::utils::{
        CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType, Resolution,
    };

    use super::{Camera, CameraOpener};
    use crate::error::CaptureError;

    /// Opens the system webcam, asking for the closest MJPEG mode to the
    /// requested size.
    pub struct WebcamOpener {
        width:  u32,
        height: u32,
    }

    impl WebcamOpener {
        pub fn new(width: u32, height: u32) -> Self {
            WebcamOpener { width, height }
        }
    }

    impl CameraOpener for WebcamOpener {
        fn open(&mut self, index: u32) -> Result<Box<dyn Camera>, CaptureError> {
            let open_err = |e: nokhwa::NokhwaError| CaptureError::Open { index, reason: e.to_string() };

            let format = RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(
                CameraFormat::new(Resolution::new(self.width, self.height), FrameFormat::MJPEG, 30),
            ));
            let mut inner = nokhwa::Camera::new(CameraIndex::Index(index), format).map_err(open_err)?;
            inner.open_stream().map_err(open_err)?;

            let res = inner.resolution();
            log::info!(
                "camera {}: {} at {}x{}",
                index, inner.info().human_name(), res.width(), res.height()
            );
            Ok(Box::new(WebcamCamera { inner }))
        }
    }

    pub struct WebcamCamera {
        inner: nokhwa::Camera,
    }

    impl Camera for WebcamCamera {
        fn read_frame(&mut self) -> Result<RgbImage, CaptureError> {
            let buffer = self.inner.frame().map_err(|e| CaptureError::Read(e.to_string()))?;
            buffer
                .decode_image::<RgbFormat>()
                .map_err(|e| CaptureError::Read(e.to_string()))
        }
    }

    impl Drop for WebcamCamera {
        fn drop(&mut self) {
            if let Err(e) = self.inner.stop_stream() {
                log::warn!("camera did not stop cleanly: {}", e);
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
