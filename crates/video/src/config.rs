use crate::VideoError;

/// Configuration of a `FrameSource`.
#[derive(Clone, Debug)]
pub struct SourceConfig {
    device_id: u32,
    scale: f32,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            device_id: 0,
            scale: 1.0,
        }
    }
}

impl SourceConfig {
    /// Set the device index (0 = first camera).
    pub fn with_device_id(mut self, device_id: u32) -> Self {
        self.device_id = device_id;
        self
    }

    /// Set the down-sampling factor applied to every frame, in `(0, 1]`.
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn device_id(&self) -> u32 {
        self.device_id
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn validate(&self) -> Result<(), VideoError> {
        if !self.scale.is_finite() || self.scale <= 0.0 || self.scale > 1.0 {
            return Err(VideoError::Config(format!(
                "scale must be in (0, 1], got {}",
                self.scale
            )));
        }
        Ok(())
    }
}
