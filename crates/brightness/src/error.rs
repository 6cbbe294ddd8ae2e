use {std::fmt, video::VideoError};

#[derive(Debug)]
pub enum PipelineError {
    /// Rejected at construction; no pipeline was created.
    InvalidConfiguration(String),
    /// Operation not allowed in the pipeline's current state.
    InvalidState(String),
    /// The capture device failed. The device has been released.
    Capture(VideoError),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::InvalidConfiguration(msg) => write!(f, "invalid configuration: {msg}"),
            PipelineError::InvalidState(msg) => write!(f, "invalid state: {msg}"),
            PipelineError::Capture(err) => write!(f, "capture failed: {err}"),
        }
    }
}

impl std::error::Error for PipelineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PipelineError::Capture(err) => Some(err),
            _ => None,
        }
    }
}

impl From<VideoError> for PipelineError {
    fn from(err: VideoError) -> Self {
        match err {
            VideoError::Config(msg) => PipelineError::InvalidConfiguration(msg),
            other => PipelineError::Capture(other),
        }
    }
}
