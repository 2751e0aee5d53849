use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Why a drawing could not be saved.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("cannot create output directory {}: {source}", .path.display())]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("cannot encode drawing: {0}")]
    Encode(#[from] image::ImageError),

    #[error("cannot write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
}
