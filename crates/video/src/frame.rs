use crate::{
    PixelFormat, RawFormat, VideoError,
    convert::{decode_jpeg, resize, yuyv_to_rgb},
};

/// A frame as delivered by a `CaptureDevice`, before normalisation.
#[derive(Debug, Clone)]
pub struct RawFrame {
    pub width: usize,
    pub height: usize,
    pub format: RawFormat,
    pub data: Vec<u8>,
}

impl RawFrame {
    /// Turn the raw buffer into frame `index`: packed and compressed layouts
    /// are decoded to RGB, then the image is down-sampled by `scale`.
    pub fn into_frame(self, index: u64, scale: f32) -> Result<Frame, VideoError> {
        let (width, height, format, data) = match self.format {
            RawFormat::Pixels(format) => (self.width, self.height, format, self.data),
            RawFormat::Yuyv => {
                let rgb = yuyv_to_rgb(&self.data, self.width, self.height).ok_or_else(|| {
                    VideoError::Stream(format!(
                        "short or odd-width YUYV buffer for {}x{}",
                        self.width, self.height
                    ))
                })?;
                (self.width, self.height, PixelFormat::Rgb8, rgb)
            }
            RawFormat::Jpeg => {
                let (width, height, rgb) = decode_jpeg(&self.data)?;
                (width, height, PixelFormat::Rgb8, rgb)
            }
        };
        // validate the full-size buffer before resampling it
        let frame = Frame::new(index, width, height, format, data)?;
        if scale == 1.0 {
            return Ok(frame);
        }
        let (width, height, data) = resize(width, height, format.channels(), frame.into_data(), scale)?;
        Frame::new(index, width, height, format, data)
    }
}

/// An immutable `height x width x channels` grid of samples captured at one
/// point in time.
///
/// Frames are identified only by their position in the stream that produced
/// them.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    index: u64,
    width: usize,
    height: usize,
    format: PixelFormat,
    data: Vec<u8>,
}

impl Frame {
    /// Build a frame, checking that `data` holds exactly
    /// `width * height * channels` samples.
    pub fn new(
        index: u64,
        width: usize,
        height: usize,
        format: PixelFormat,
        data: Vec<u8>,
    ) -> Result<Self, VideoError> {
        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(format.channels()))
            .ok_or_else(|| VideoError::Stream(format!("frame size {width}x{height} overflows")))?;
        if data.len() != expected {
            return Err(VideoError::Stream(format!(
                "{width}x{height} {format} frame needs {expected} bytes, got {}",
                data.len()
            )));
        }
        Ok(Self {
            index,
            width,
            height,
            format,
            data,
        })
    }

    pub fn index(&self) -> u64 {
        self.index
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn channels(&self) -> usize {
        self.format.channels()
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}

/// A frame ready for presentation: packed RGB, 3 bytes per pixel.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayFrame {
    pub index: u64,
    pub width: usize,
    pub height: usize,
    pub rgb: Vec<u8>,
}
