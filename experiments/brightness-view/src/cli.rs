use {
    brightness::{PipelineConfig, PipelineError},
    clap::Parser,
    log::LevelFilter,
    std::{path::PathBuf, time::Duration},
    video::{CaptureDevice, PatternDevice},
};

// size and pace of the synthetic camera
const PATTERN_WIDTH: usize = 320;
const PATTERN_HEIGHT: usize = 240;
const PATTERN_FPS: f32 = 30.0;

/// Live camera brightness against a threshold.
#[derive(Parser, Debug, Clone)]
#[command(about = "Track mean camera brightness and flag frames below a threshold")]
pub struct Args {
    /// Capture device index (/dev/video{N})
    #[arg(short, long, default_value_t = 0)]
    pub device: u32,

    /// Down-sampling factor in (0, 1]
    #[arg(short, long, default_value_t = 1.0)]
    pub scale: f32,

    /// Number of readings kept in the trace
    #[arg(short, long, default_value_t = 50)]
    pub window: usize,

    /// Intensity below which a frame is flagged
    #[arg(short, long, default_value_t = 40.0)]
    pub threshold: f64,

    /// Stop after this many seconds
    #[arg(long)]
    pub max_runtime: Option<f64>,

    /// Stop when a single frame takes longer than this many seconds
    #[arg(long)]
    pub pull_timeout: Option<f64>,

    /// Use a synthetic brightness sweep instead of a camera
    #[arg(long)]
    pub pattern: bool,

    /// Write logs to dated files in this directory instead of stdout
    #[arg(long)]
    pub log_dir: Option<PathBuf>,

    /// error, warn, info, debug or trace
    #[arg(long)]
    pub log_level: Option<String>,
}

fn seconds(name: &str, value: Option<f64>) -> Result<Option<Duration>, PipelineError> {
    value
        .map(|secs| {
            Duration::try_from_secs_f64(secs).map_err(|_| {
                PipelineError::InvalidConfiguration(format!("{name} must be a positive number of seconds, got {secs}"))
            })
        })
        .transpose()
}

impl Args {
    pub fn to_config(&self) -> Result<PipelineConfig, PipelineError> {
        let config = PipelineConfig::default()
            .with_device_id(self.device)
            .with_scale(self.scale)
            .with_window_capacity(self.window)
            .with_threshold(self.threshold)
            .with_max_runtime(seconds("max runtime", self.max_runtime)?)
            .with_pull_timeout(seconds("pull timeout", self.pull_timeout)?);
        config.validate()?;
        Ok(config)
    }

    pub fn level(&self) -> Result<LevelFilter, String> {
        match &self.log_level {
            None => Ok(base::default_level()),
            Some(name) => base::parse_level(name).ok_or_else(|| format!("unknown log level: {name}")),
        }
    }

    /// Install the stdout or file logger.
    pub fn init_logging(&self) -> Result<(), Box<dyn std::error::Error>> {
        let level = self.level()?;
        match &self.log_dir {
            Some(dir) => base::init_file_logger(dir.clone(), level)?,
            None => base::init_stdout_logger(level),
        }
        Ok(())
    }

    /// The capture device to stream from.
    pub fn open_device(&self) -> Box<dyn CaptureDevice> {
        if self.pattern {
            return Box::new(pattern_device());
        }
        camera()
    }
}

fn pattern_device() -> PatternDevice {
    PatternDevice::sweep(PATTERN_WIDTH, PATTERN_HEIGHT).with_frame_rate(PATTERN_FPS)
}

#[cfg(feature = "v4l2")]
fn camera() -> Box<dyn CaptureDevice> {
    Box::new(video::V4l2Device::new())
}

#[cfg(not(feature = "v4l2"))]
fn camera() -> Box<dyn CaptureDevice> {
    log::warn!("built without v4l2 support, using the synthetic pattern");
    Box::new(pattern_device())
}
