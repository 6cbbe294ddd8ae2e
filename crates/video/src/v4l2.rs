use {
    crate::{CaptureDevice, DeviceInfo, RawFormat, RawFrame, VideoError},
    v4l::{
        Device, Format, FourCC, buffer::Type, io::mmap::Stream as MmapStream,
        io::traits::CaptureStream, video::Capture,
    },
};

// buffers queued in the kernel
const BUFFER_COUNT: u32 = 4;

/// Webcam capture through Video4Linux2 (`/dev/video{id}`).
///
/// Negotiates the requested size (or the device's current one) and prefers
/// YUYV, falling back to MJPG when the device only offers that.
pub struct V4l2Device {
    stream: Option<MmapStream<'static>>,
    size: Option<(usize, usize)>,
    frame_rate: Option<f32>,
    negotiated: Option<DeviceInfo>,
}

impl std::fmt::Debug for V4l2Device {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("V4l2Device")
            .field("stream", &self.stream.is_some())
            .field("size", &self.size)
            .field("frame_rate", &self.frame_rate)
            .field("negotiated", &self.negotiated)
            .finish()
    }
}

impl Default for V4l2Device {
    fn default() -> Self {
        Self::new()
    }
}

impl V4l2Device {
    pub fn new() -> Self {
        Self {
            stream: None,
            size: None,
            frame_rate: None,
            negotiated: None,
        }
    }

    /// Request a capture size instead of the device's current one.
    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.size = Some((width, height));
        self
    }

    /// Request a frame rate instead of the device's current one.
    pub fn with_frame_rate(mut self, frame_rate: f32) -> Self {
        self.frame_rate = Some(frame_rate);
        self
    }
}

fn raw_format(fourcc: &FourCC) -> Result<RawFormat, VideoError> {
    match &fourcc.repr {
        b"YUYV" => Ok(RawFormat::Yuyv),
        b"MJPG" => Ok(RawFormat::Jpeg),
        _ => Err(VideoError::Device(format!("unsupported pixel format: {}", fourcc))),
    }
}

impl CaptureDevice for V4l2Device {
    fn open(&mut self, device_id: u32) -> Result<DeviceInfo, VideoError> {
        self.stream.take();

        let device = Device::new(device_id as usize)?;
        let current = Capture::format(&device)?;
        let (width, height) = self
            .size
            .unwrap_or((current.width as usize, current.height as usize));

        // try YUYV first, the device answers with what it actually set
        let mut actual = Capture::set_format(
            &device,
            &Format::new(width as u32, height as u32, FourCC::new(b"YUYV")),
        )?;
        if raw_format(&actual.fourcc).is_err() {
            actual = Capture::set_format(
                &device,
                &Format::new(width as u32, height as u32, FourCC::new(b"MJPG")),
            )?;
        }
        let format = raw_format(&actual.fourcc)?;

        let desired_rate = match self.frame_rate {
            Some(rate) => rate,
            None => {
                let params = Capture::params(&device)?;
                params.interval.denominator as f32 / params.interval.numerator as f32
            }
        };
        let params = Capture::set_params(
            &device,
            &v4l::video::capture::Parameters::with_fps(desired_rate.round() as u32),
        )?;
        let frame_rate = params.interval.denominator as f32 / params.interval.numerator as f32;

        let stream = MmapStream::with_buffers(&device, Type::VideoCapture, BUFFER_COUNT)
            .map_err(|error| VideoError::Stream(error.to_string()))?;
        self.stream = Some(stream);

        let info = DeviceInfo {
            width: actual.width as usize,
            height: actual.height as usize,
            format,
            frame_rate,
        };
        self.negotiated = Some(info.clone());
        Ok(info)
    }

    fn read(&mut self) -> Result<Option<RawFrame>, VideoError> {
        let (Some(stream), Some(info)) = (self.stream.as_mut(), self.negotiated.as_ref()) else {
            return Err(VideoError::Device("v4l2 device is not open".to_string()));
        };
        // the buffer is only valid until the next call, copy it out
        let (data, _metadata) =
            CaptureStream::next(stream).map_err(|error| VideoError::Stream(error.to_string()))?;
        Ok(Some(RawFrame {
            width: info.width,
            height: info.height,
            format: info.format,
            data: data.to_vec(),
        }))
    }

    fn close(&mut self) {
        self.stream.take();
        self.negotiated.take();
    }
}
