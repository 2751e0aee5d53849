use thiserror::Error;

/// Camera could not be opened or stopped delivering frames.
#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("cannot open camera {index}: {reason}")]
    Open { index: u32, reason: String },

    #[error("failed to grab frame: {0}")]
    Read(String),

    #[error("camera is not open")]
    NotOpen,
}

/// Landmark detector failure.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("cannot start detector `{command}`: {source}")]
    Spawn { command: String, source: std::io::Error },

    #[error("detector i/o: {0}")]
    Io(#[from] std::io::Error),

    #[error("detector protocol: {0}")]
    Protocol(String),

    #[error("detector sent malformed JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Conditions that end the session.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Capture(#[from] CaptureError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("window: {0}")]
    Window(String),
}
