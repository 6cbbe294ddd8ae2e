use std::fmt;

/// Sample layout of a `Frame`: one byte per sample, the samples of a pixel
/// stored contiguously.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    Gray8,
    Rgb8,
    Bgr8,
}

impl PixelFormat {
    pub fn channels(&self) -> usize {
        match self {
            PixelFormat::Gray8 => 1,
            PixelFormat::Rgb8 | PixelFormat::Bgr8 => 3,
        }
    }
}

/// Layout of a `RawFrame` as a device delivers it. Packed and compressed
/// layouts are converted to `PixelFormat::Rgb8` by the `FrameSource`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawFormat {
    Pixels(PixelFormat),
    Yuyv,
    Jpeg,
}

impl From<PixelFormat> for RawFormat {
    fn from(format: PixelFormat) -> Self {
        RawFormat::Pixels(format)
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PixelFormat::Gray8 => "GRAY8",
            PixelFormat::Rgb8 => "RGB8",
            PixelFormat::Bgr8 => "BGR8",
        })
    }
}

impl fmt::Display for RawFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawFormat::Pixels(format) => format.fmt(f),
            RawFormat::Yuyv => f.write_str("YUYV"),
            RawFormat::Jpeg => f.write_str("MJPG"),
        }
    }
}
