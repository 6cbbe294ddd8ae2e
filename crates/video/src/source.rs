use {
    crate::{CaptureDevice, DeviceInfo, Frame, RawFrame, SourceConfig, VideoError},
    futures_core::Stream,
    std::{
        fmt,
        future::{Future, poll_fn},
        pin::Pin,
        task::{Context, Poll},
    },
    tokio::task::{JoinError, JoinHandle, spawn_blocking},
};

type ReadOutcome = (DeviceGuard, Result<Option<RawFrame>, VideoError>);

// Owns the device and closes it at most once, at the latest when dropped.
// A read still running on the blocking pool keeps the guard alive, so the
// device is released when that read returns.
struct DeviceGuard {
    device: Box<dyn CaptureDevice>,
    open: bool,
}

impl DeviceGuard {
    fn new(device: Box<dyn CaptureDevice>) -> Self {
        Self { device, open: false }
    }

    /// Returns `true` if this call closed the device.
    fn release(&mut self) -> bool {
        if !self.open {
            return false;
        }
        self.open = false;
        self.device.close();
        true
    }
}

impl Drop for DeviceGuard {
    fn drop(&mut self) {
        self.release();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceState {
    /// Created, device not opened yet.
    Unopened,
    /// Device open, frames can be pulled.
    Open,
    /// Device reported end of stream; still holds the handle until `close`.
    Exhausted,
    /// Handle released (or never acquired). Terminal.
    Closed,
}

/// Pull-based frame stream over one `CaptureDevice`.
///
/// Each pull moves the device onto tokio's blocking pool for a single `read`
/// and takes it back when the read completes, so there is never more than
/// one outstanding read and nothing is captured ahead of demand. A pull
/// abandoned half way (for instance by a timeout) leaves its read in flight;
/// the next pull picks the result up.
///
/// The device is released exactly once. `close` releases it immediately, or
/// as soon as a read still in flight returns. Dropping an unclosed source
/// does the same, with a warning.
pub struct FrameSource {
    config: SourceConfig,
    device: Option<DeviceGuard>,
    pending: Option<JoinHandle<ReadOutcome>>,
    state: SourceState,
    info: Option<DeviceInfo>,
    next_index: u64,
}

impl fmt::Debug for FrameSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameSource")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("info", &self.info)
            .field("read_in_flight", &self.pending.is_some())
            .field("next_index", &self.next_index)
            .finish()
    }
}

impl FrameSource {
    pub fn new(config: SourceConfig, device: Box<dyn CaptureDevice>) -> Result<Self, VideoError> {
        config.validate()?;
        Ok(Self {
            config,
            device: Some(DeviceGuard::new(device)),
            pending: None,
            state: SourceState::Unopened,
            info: None,
            next_index: 0,
        })
    }

    /// Open the device. A source can be opened once; if opening fails the
    /// source is closed and the device is never asked to release anything.
    pub async fn open(&mut self) -> Result<DeviceInfo, VideoError> {
        if self.state != SourceState::Unopened {
            return Err(VideoError::Device(format!(
                "cannot open a source in state {:?}",
                self.state
            )));
        }
        let mut guard = self
            .device
            .take()
            .ok_or_else(|| VideoError::Device("capture device unavailable".to_string()))?;

        // opening may block (device negotiation), keep it off the async thread
        let device_id = self.config.device_id();
        let joined = spawn_blocking(move || {
            let result = guard.device.open(device_id);
            guard.open = result.is_ok();
            (guard, result)
        })
        .await;

        let (guard, result) = match joined {
            Ok(outcome) => outcome,
            Err(error) => {
                self.state = SourceState::Closed;
                return Err(VideoError::Device(format!("open worker failed: {error}")));
            }
        };
        self.device = Some(guard);

        match result {
            Ok(info) => {
                log::info!(
                    "device {} open: {}x{} {} at {:.2} fps",
                    device_id,
                    info.width,
                    info.height,
                    info.format,
                    info.frame_rate
                );
                self.state = SourceState::Open;
                self.info = Some(info.clone());
                Ok(info)
            }
            Err(error) => {
                log::error!("device {} failed to open: {}", device_id, error);
                self.state = SourceState::Closed;
                Err(error)
            }
        }
    }

    /// Pull the next frame.
    ///
    /// Fails with `VideoError::SourceClosed` after `close` or once the device
    /// has reported end of stream. Device and decode errors are returned
    /// unchanged and leave the source open; the caller decides whether to
    /// continue.
    pub async fn next_frame(&mut self) -> Result<Frame, VideoError> {
        poll_fn(|cx| self.poll_frame(cx)).await
    }

    /// Poll-based form of `next_frame`.
    pub fn poll_frame(&mut self, cx: &mut Context<'_>) -> Poll<Result<Frame, VideoError>> {
        loop {
            if let Some(pending) = self.pending.as_mut() {
                let joined = match Pin::new(pending).poll(cx) {
                    Poll::Pending => return Poll::Pending,
                    Poll::Ready(joined) => joined,
                };
                self.pending = None;
                return Poll::Ready(self.finish_read(joined));
            }

            match self.state {
                SourceState::Open => {}
                SourceState::Unopened => {
                    return Poll::Ready(Err(VideoError::Stream("source is not open".to_string())));
                }
                SourceState::Exhausted | SourceState::Closed => {
                    return Poll::Ready(Err(VideoError::SourceClosed));
                }
            }

            let Some(mut guard) = self.device.take() else {
                return Poll::Ready(Err(VideoError::SourceClosed));
            };
            self.pending = Some(spawn_blocking(move || {
                let result = guard.device.read();
                (guard, result)
            }));
        }
    }

    fn finish_read(&mut self, joined: Result<ReadOutcome, JoinError>) -> Result<Frame, VideoError> {
        let (guard, result) = match joined {
            Ok(outcome) => outcome,
            Err(error) => {
                // the guard released the device while the worker unwound
                self.state = SourceState::Closed;
                return Err(VideoError::Device(format!("capture worker failed: {error}")));
            }
        };
        self.device = Some(guard);

        match result? {
            Some(raw) => {
                let index = self.next_index;
                self.next_index += 1;
                raw.into_frame(index, self.config.scale())
            }
            None => {
                log::info!("capture device reached end of stream after {} frames", self.next_index);
                self.state = SourceState::Exhausted;
                Err(VideoError::SourceClosed)
            }
        }
    }

    /// Release the device and move to `Closed` right away. A read still in
    /// flight cannot be interrupted; the device is then closed as soon as it
    /// returns, and its result is discarded. Calling it again is a no-op.
    pub async fn close(&mut self) {
        if self.state == SourceState::Closed {
            return;
        }
        self.state = SourceState::Closed;

        if let Some(pending) = self.pending.take() {
            log::info!("closing with a read in flight, device released when it returns");
            let frames = self.next_index;
            tokio::spawn(async move {
                match pending.await {
                    Ok((mut guard, _)) => {
                        if guard.release() {
                            log::info!("capture device released after {} frames", frames);
                        }
                    }
                    Err(error) => log::error!("capture worker failed before close: {}", error),
                }
            });
            return;
        }

        if let Some(guard) = self.device.as_mut() {
            if guard.release() {
                log::info!("capture device released after {} frames", self.next_index);
            }
        }
    }

    pub fn state(&self) -> SourceState {
        self.state
    }

    pub fn is_closed(&self) -> bool {
        self.state == SourceState::Closed
    }

    /// Configuration reported by the device on open.
    pub fn info(&self) -> Option<&DeviceInfo> {
        self.info.as_ref()
    }

    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    /// Number of frames handed out so far.
    pub fn frames_emitted(&self) -> u64 {
        self.next_index
    }
}

impl Stream for FrameSource {
    type Item = Result<Frame, VideoError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        match self.get_mut().poll_frame(cx) {
            Poll::Pending => Poll::Pending,
            Poll::Ready(Err(VideoError::SourceClosed)) => Poll::Ready(None),
            Poll::Ready(result) => Poll::Ready(Some(result)),
        }
    }
}

impl Drop for FrameSource {
    fn drop(&mut self) {
        if self.state == SourceState::Closed {
            return;
        }
        // the guards close the device, here or when the pending read returns
        if self.pending.is_some() {
            log::warn!("frame source dropped during a read, device released when it returns");
        } else if self.device.as_ref().is_some_and(|guard| guard.open) {
            log::warn!("frame source dropped without close, releasing device");
        }
    }
}
