use std::fmt;

#[derive(Debug)]
pub enum VideoError {
    /// Invalid source configuration, detected before any device is touched.
    Config(String),
    /// The capture device failed to open, read or configure.
    Device(String),
    /// A frame could not be produced from what the device returned.
    Stream(String),
    Decode(crates_image::ImageError),
    /// The source was closed or the device reached the end of its stream.
    SourceClosed,
}

impl fmt::Display for VideoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VideoError::Config(msg) => write!(f, "invalid configuration: {msg}"),
            VideoError::Device(msg) => write!(f, "device error: {msg}"),
            VideoError::Stream(msg) => write!(f, "stream error: {msg}"),
            VideoError::Decode(err) => write!(f, "decode error: {err}"),
            VideoError::SourceClosed => write!(f, "source closed"),
        }
    }
}

impl std::error::Error for VideoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            VideoError::Decode(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for VideoError {
    fn from(err: std::io::Error) -> Self {
        VideoError::Device(err.to_string())
    }
}

impl From<crates_image::ImageError> for VideoError {
    fn from(err: crates_image::ImageError) -> Self {
        VideoError::Decode(err)
    }
}
