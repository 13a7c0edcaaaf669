use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecodeError {
    /// Thresholding needs at least one sample.
    #[error("cannot threshold an empty signal")]
    EmptySignal,
    /// Every complete tone has the same length, so dots and dashes look alike.
    #[error("every tone lasts {0} frames; cannot tell dots from dashes")]
    UniformTones(u32),
    #[error("video file not found: {}", .0.display())]
    VideoNotFound(PathBuf),
    #[error("ffmpeg error: {0}")]
    Ffmpeg(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("ffprobe output error: {0}")]
    StreamInfo(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DecodeError>;
