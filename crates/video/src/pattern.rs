use {
    crate::{CaptureDevice, DeviceInfo, PixelFormat, RawFrame, VideoError},
    std::time::Duration,
};

/// Synthetic capture device producing uniformly lit BGR frames.
///
/// Frame `n` has every sample set to `levels[n % levels.len()]`, so its
/// intensity is exactly that level. Useful without a camera attached.
#[derive(Debug, Clone)]
pub struct PatternDevice {
    width: usize,
    height: usize,
    levels: Vec<u8>,
    frame_limit: Option<u64>,
    frame_interval: Option<Duration>,
    produced: u64,
    open: bool,
}

impl PatternDevice {
    /// Cycle through `levels`. An empty list produces black frames.
    pub fn new(width: usize, height: usize, levels: Vec<u8>) -> Self {
        let levels = if levels.is_empty() { vec![0] } else { levels };
        Self {
            width,
            height,
            levels,
            frame_limit: None,
            frame_interval: None,
            produced: 0,
            open: false,
        }
    }

    /// Triangle wave from black to white and back, 8 levels per step.
    pub fn sweep(width: usize, height: usize) -> Self {
        let up = (0..=255u32).step_by(8).map(|v| v as u8);
        let down = (8..248u32).step_by(8).rev().map(|v| v as u8);
        Self::new(width, height, up.chain(down).collect())
    }

    /// End the stream after `limit` frames.
    pub fn with_frame_limit(mut self, limit: u64) -> Self {
        self.frame_limit = Some(limit);
        self
    }

    /// Pace reads to `fps` frames per second, like a real camera.
    pub fn with_frame_rate(mut self, fps: f32) -> Self {
        self.frame_interval = (fps.is_finite() && fps > 0.0).then(|| Duration::from_secs_f32(1.0 / fps));
        self
    }

    pub fn frames_produced(&self) -> u64 {
        self.produced
    }
}

impl CaptureDevice for PatternDevice {
    fn open(&mut self, device_id: u32) -> Result<DeviceInfo, VideoError> {
        log::debug!("pattern device {} open with {} levels", device_id, self.levels.len());
        self.open = true;
        Ok(DeviceInfo {
            width: self.width,
            height: self.height,
            format: PixelFormat::Bgr8.into(),
            frame_rate: self
                .frame_interval
                .map(|interval| 1.0 / interval.as_secs_f32())
                .unwrap_or(0.0),
        })
    }

    fn read(&mut self) -> Result<Option<RawFrame>, VideoError> {
        if !self.open {
            return Err(VideoError::Device("pattern device is not open".to_string()));
        }
        if self.frame_limit.is_some_and(|limit| self.produced >= limit) {
            return Ok(None);
        }
        if let Some(interval) = self.frame_interval {
            std::thread::sleep(interval);
        }
        let level = self.levels[(self.produced % self.levels.len() as u64) as usize];
        self.produced += 1;
        Ok(Some(RawFrame {
            width: self.width,
            height: self.height,
            format: PixelFormat::Bgr8.into(),
            data: vec![level; self.width * self.height * 3],
        }))
    }

    fn close(&mut self) {
        self.open = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sweep_is_symmetric() {
        let device = PatternDevice::sweep(1, 1);
        assert_eq!(device.levels.first(), Some(&0));
        assert_eq!(device.levels.iter().max(), Some(&248));
        assert_eq!(device.levels.last(), Some(&8));
    }

    #[test]
    fn test_read_requires_open() {
        let mut device = PatternDevice::new(2, 2, vec![10]);
        assert!(matches!(device.read(), Err(VideoError::Device(_))));
    }

    #[test]
    fn test_frame_limit_ends_stream() {
        let mut device = PatternDevice::new(2, 1, vec![10, 20]).with_frame_limit(2);
        device.open(0).unwrap();
        assert_eq!(device.read().unwrap().unwrap().data, vec![10; 6]);
        assert_eq!(device.read().unwrap().unwrap().data, vec![20; 6]);
        assert!(device.read().unwrap().is_none());
        assert_eq!(device.frames_produced(), 2);
    }
}
