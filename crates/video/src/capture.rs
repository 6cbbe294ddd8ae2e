use crate::{RawFormat, RawFrame, VideoError};

/// What a device reports after opening.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceInfo {
    pub width: usize,
    pub height: usize,
    pub format: RawFormat,
    pub frame_rate: f32,
}

/// Blocking capture backend.
///
/// A `FrameSource` calls these from tokio's blocking pool, one call at a
/// time, and never calls `read` before a successful `open` or after `close`.
pub trait CaptureDevice: Send + 'static {
    /// Open device `device_id` and report the negotiated configuration.
    fn open(&mut self, device_id: u32) -> Result<DeviceInfo, VideoError>;

    /// Block until the next frame is available. `Ok(None)` marks the end of
    /// the stream.
    fn read(&mut self) -> Result<Option<RawFrame>, VideoError>;

    /// Release the device.
    fn close(&mut self);
}
