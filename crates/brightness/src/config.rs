use {crate::PipelineError, std::time::Duration, video::SourceConfig};

/// Configuration of a brightness `Pipeline`.
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    device_id: u32,
    scale: f32,
    window_capacity: usize,
    threshold: f64,
    max_runtime: Option<Duration>,
    pull_timeout: Option<Duration>,
    compute_display: bool,
    compute_intensity: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            device_id: 0,
            scale: 1.0,
            window_capacity: 50,
            threshold: 40.0,
            max_runtime: None,
            pull_timeout: None,
            compute_display: true,
            compute_intensity: true,
        }
    }
}

impl PipelineConfig {
    /// Set the capture device index.
    pub fn with_device_id(mut self, device_id: u32) -> Self {
        self.device_id = device_id;
        self
    }

    /// Set the frame down-sampling factor, in `(0, 1]`.
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Set how many readings the history window keeps.
    pub fn with_window_capacity(mut self, window_capacity: usize) -> Self {
        self.window_capacity = window_capacity;
        self
    }

    /// Set the intensity below which readings are tagged `Below`.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Stop after running this long. Checked between frames.
    pub fn with_max_runtime(mut self, max_runtime: Option<Duration>) -> Self {
        self.max_runtime = max_runtime;
        self
    }

    /// Stop if a single frame takes longer than this to arrive.
    pub fn with_pull_timeout(mut self, pull_timeout: Option<Duration>) -> Self {
        self.pull_timeout = pull_timeout;
        self
    }

    pub fn with_compute_display(mut self, compute_display: bool) -> Self {
        self.compute_display = compute_display;
        self
    }

    pub fn with_compute_intensity(mut self, compute_intensity: bool) -> Self {
        self.compute_intensity = compute_intensity;
        self
    }

    // Getters
    pub fn device_id(&self) -> u32 {
        self.device_id
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn window_capacity(&self) -> usize {
        self.window_capacity
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn max_runtime(&self) -> Option<Duration> {
        self.max_runtime
    }

    pub fn pull_timeout(&self) -> Option<Duration> {
        self.pull_timeout
    }

    pub fn compute_display(&self) -> bool {
        self.compute_display
    }

    pub fn compute_intensity(&self) -> bool {
        self.compute_intensity
    }

    /// The part of the configuration the frame source needs.
    pub fn source_config(&self) -> SourceConfig {
        SourceConfig::default()
            .with_device_id(self.device_id)
            .with_scale(self.scale)
    }

    pub fn validate(&self) -> Result<(), PipelineError> {
        let invalid =
            |msg: String| -> Result<(), PipelineError> { Err(PipelineError::InvalidConfiguration(msg)) };

        self.source_config().validate()?;
        if self.window_capacity == 0 {
            return invalid("window capacity must be at least 1".to_string());
        }
        if !self.threshold.is_finite() {
            return invalid(format!("threshold must be finite, got {}", self.threshold));
        }
        if self.max_runtime == Some(Duration::ZERO) {
            return invalid("max runtime must be positive".to_string());
        }
        if self.pull_timeout == Some(Duration::ZERO) {
            return invalid("pull timeout must be positive".to_string());
        }
        if !self.compute_display && !self.compute_intensity {
            return invalid("at least one of display or intensity must be computed".to_string());
        }
        Ok(())
    }
}
