//! Pull-based frame capture.
//!
//! A `CaptureDevice` is the blocking, hardware-facing collaborator. A
//! `FrameSource` owns one device, pulls raw frames from it on demand,
//! normalises them into `Frame`s and guarantees the device is released
//! exactly once. The `transform` module holds the pure per-frame reductions.

pub mod capture;
pub mod config;
pub mod convert;
pub mod error;
pub mod format;
pub mod frame;
pub mod pattern;
pub mod source;
pub mod transform;

#[cfg(feature = "v4l2")]
pub mod v4l2;

pub use capture::{CaptureDevice, DeviceInfo};
pub use config::SourceConfig;
pub use error::VideoError;
pub use format::{PixelFormat, RawFormat};
pub use frame::{DisplayFrame, Frame, RawFrame};
pub use pattern::PatternDevice;
pub use source::FrameSource;
pub use transform::{intensity, to_display};

#[cfg(feature = "v4l2")]
pub use v4l2::V4l2Device;
