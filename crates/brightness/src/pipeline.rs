use {
    crate::{
        ClassifiedReading, Control, Crossing, PipelineConfig, PipelineError, Reading, RenderView,
        Renderer, Tag, Window,
    },
    base::CancelToken,
    std::{
        fmt,
        time::{Duration, Instant},
    },
    video::{CaptureDevice, DeviceInfo, FrameSource, VideoError, intensity, to_display},
};

/// Why a pipeline stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// `stop()` was called or the renderer returned `Control::Stop`.
    Requested,
    /// The cancel token was raised.
    Cancelled,
    /// The device reported end of stream.
    SourceClosed,
    /// The configured maximum runtime elapsed.
    MaxRuntime,
    /// A single frame took longer than the pull timeout.
    PullTimeout,
    /// Opening or reading the device failed.
    Failed,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            StopReason::Requested => "requested",
            StopReason::Cancelled => "cancelled",
            StopReason::SourceClosed => "source closed",
            StopReason::MaxRuntime => "max runtime reached",
            StopReason::PullTimeout => "pull timed out",
            StopReason::Failed => "failed",
        };
        write!(f, "{}", text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    Running,
    /// Terminal. The source has been closed.
    Stopped(StopReason),
}

/// Result of a single `Pipeline::step`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    Stopped(StopReason),
}

/// Statistics of a finished run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub frames: u64,
    pub elapsed: Duration,
    pub stop_reason: StopReason,
}

impl RunSummary {
    /// Processed frames per second, 0 when no time elapsed.
    pub fn fps(&self) -> f64 {
        let seconds = self.elapsed.as_secs_f64();
        if seconds > 0.0 { self.frames as f64 / seconds } else { 0.0 }
    }
}

/// Drives frames from a capture device through intensity analysis into a
/// `Renderer`, one frame per `step`.
///
/// ```text
/// Idle --start--> Running --step*--> Stopped(reason)
///   \____________________stop______________^
/// ```
///
/// Every transition into `Stopped` closes the frame source first, so the
/// device is released exactly once whichever way the run ends.
pub struct Pipeline<R: Renderer> {
    config: PipelineConfig,
    source: FrameSource,
    window: Window<Reading>,
    renderer: R,
    state: PipelineState,
    cancel: CancelToken,
    started_at: Option<Instant>,
    elapsed: Duration,
    frames: u64,
    last_tag: Option<Tag>,
}

impl<R: Renderer> fmt::Debug for Pipeline<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("config", &self.config)
            .field("source", &self.source)
            .field("window_len", &self.window.len())
            .field("state", &self.state)
            .field("cancelled", &self.cancel.is_cancelled())
            .field("frames", &self.frames)
            .finish()
    }
}

impl<R: Renderer> Pipeline<R> {
    /// Validate `config` and assemble an idle pipeline. Nothing is opened
    /// yet.
    pub fn new(
        config: PipelineConfig,
        device: Box<dyn CaptureDevice>,
        renderer: R,
    ) -> Result<Self, PipelineError> {
        config.validate()?;
        let source = FrameSource::new(config.source_config(), device)?;
        let window = Window::new(config.window_capacity())?;
        Ok(Self {
            config,
            source,
            window,
            renderer,
            state: PipelineState::Idle,
            cancel: CancelToken::new(),
            started_at: None,
            elapsed: Duration::ZERO,
            frames: 0,
            last_tag: None,
        })
    }

    /// Open the capture device and start running.
    pub async fn start(&mut self) -> Result<(), PipelineError> {
        if self.state != PipelineState::Idle {
            return Err(PipelineError::InvalidState(format!(
                "start called in state {:?}",
                self.state
            )));
        }
        if let Err(error) = self.source.open().await {
            self.finish(StopReason::Failed).await;
            return Err(error.into());
        }
        log::info!(
            "pipeline running: window {}, threshold {}",
            self.window.capacity(),
            self.config.threshold()
        );
        self.started_at = Some(Instant::now());
        self.state = PipelineState::Running;
        Ok(())
    }

    /// Process one frame.
    ///
    /// Stop conditions are checked before the pull and cancellation again
    /// after rendering. A device error stops the pipeline with
    /// `StopReason::Failed` and is returned once the device is closed.
    pub async fn step(&mut self) -> Result<Step, PipelineError> {
        match self.state {
            PipelineState::Running => {}
            PipelineState::Stopped(reason) => return Ok(Step::Stopped(reason)),
            PipelineState::Idle => {
                return Err(PipelineError::InvalidState("step called before start".to_string()));
            }
        }

        if self.cancel.is_cancelled() {
            return Ok(self.finish(StopReason::Cancelled).await);
        }
        if let Some(max_runtime) = self.config.max_runtime() {
            if self.running_time() >= max_runtime {
                return Ok(self.finish(StopReason::MaxRuntime).await);
            }
        }

        let pulled = match self.config.pull_timeout() {
            Some(limit) => match tokio::time::timeout(limit, self.source.next_frame()).await {
                Ok(pulled) => pulled,
                Err(_) => {
                    log::warn!("no frame within {:?}", limit);
                    return Ok(self.finish(StopReason::PullTimeout).await);
                }
            },
            None => self.source.next_frame().await,
        };
        let frame = match pulled {
            Ok(frame) => frame,
            Err(VideoError::SourceClosed) => return Ok(self.finish(StopReason::SourceClosed).await),
            Err(error) => {
                log::error!("capture failed: {}", error);
                self.finish(StopReason::Failed).await;
                return Err(PipelineError::Capture(error));
            }
        };
        self.frames += 1;

        let threshold = self.config.threshold();
        let display = self.config.compute_display().then(|| to_display(&frame));
        let mut crossing = Crossing::None;
        if self.config.compute_intensity() {
            let value = intensity(&frame);
            let tag = Tag::classify(value, threshold);
            self.window.push(Reading::new(frame.index(), value));
            crossing = Crossing::between(self.last_tag.replace(tag), tag);
            match crossing {
                Crossing::FellBelow => {
                    log::warn!("frame {}: intensity {:.2} fell below {}", frame.index(), value, threshold)
                }
                Crossing::RoseAbove => {
                    log::info!("frame {}: intensity {:.2} back above {}", frame.index(), value, threshold)
                }
                // per-frame readings are the renderer's to report
                Crossing::None => {}
            }
        }

        let readings: Vec<ClassifiedReading> = self.window.classify(threshold);
        let view = RenderView {
            frame_index: frame.index(),
            display: display.as_ref(),
            readings: &readings,
            threshold,
            capacity: self.window.capacity(),
            crossing,
        };
        if self.renderer.render(&view) == Control::Stop {
            return Ok(self.finish(StopReason::Requested).await);
        }

        if self.cancel.is_cancelled() {
            return Ok(self.finish(StopReason::Cancelled).await);
        }
        Ok(Step::Continue)
    }

    /// Start if idle, then step until the pipeline stops.
    pub async fn run(&mut self) -> Result<RunSummary, PipelineError> {
        if self.state == PipelineState::Idle {
            self.start().await?;
        }
        while let Step::Continue = self.step().await? {}
        self.summary()
            .ok_or_else(|| PipelineError::InvalidState("run ended while still running".to_string()))
    }

    /// Stop with `StopReason::Requested`. No-op once stopped.
    pub async fn stop(&mut self) {
        if let PipelineState::Stopped(_) = self.state {
            return;
        }
        self.finish(StopReason::Requested).await;
    }

    async fn finish(&mut self, reason: StopReason) -> Step {
        self.source.close().await;
        self.elapsed = self.running_time();
        self.state = PipelineState::Stopped(reason);
        let summary = RunSummary {
            frames: self.frames,
            elapsed: self.elapsed,
            stop_reason: reason,
        };
        log::info!(
            "pipeline stopped ({}): {} frames in {:.2}s, {:.2} fps",
            reason,
            summary.frames,
            summary.elapsed.as_secs_f64(),
            summary.fps()
        );
        Step::Stopped(reason)
    }

    fn running_time(&self) -> Duration {
        match self.state {
            PipelineState::Stopped(_) => self.elapsed,
            _ => self.started_at.map(|started| started.elapsed()).unwrap_or_default(),
        }
    }

    // Getters
    pub fn state(&self) -> PipelineState {
        self.state
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Token that stops the pipeline at the next frame boundary when
    /// raised. Clones share the flag.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn window(&self) -> &Window<Reading> {
        &self.window
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Device configuration, once started.
    pub fn device_info(&self) -> Option<&DeviceInfo> {
        self.source.info()
    }

    pub fn frames_processed(&self) -> u64 {
        self.frames
    }

    /// `Some` once the pipeline has stopped.
    pub fn summary(&self) -> Option<RunSummary> {
        match self.state {
            PipelineState::Stopped(stop_reason) => Some(RunSummary {
                frames: self.frames,
                elapsed: self.elapsed,
                stop_reason,
            }),
            _ => None,
        }
    }
}
