//! Pure per-frame reductions. Neither function depends on the other, so a
//! caller may run either or both.

use crate::{
    DisplayFrame, Frame, PixelFormat,
    convert::{gray_to_rgb, swap_red_blue},
};

/// Normalise a frame to packed RGB for presentation.
pub fn to_display(frame: &Frame) -> DisplayFrame {
    let rgb = match frame.format() {
        PixelFormat::Rgb8 => frame.data().to_vec(),
        PixelFormat::Bgr8 => swap_red_blue(frame.data()),
        PixelFormat::Gray8 => gray_to_rgb(frame.data()),
    };
    DisplayFrame {
        index: frame.index(),
        width: frame.width(),
        height: frame.height(),
        rgb,
    }
}

/// Arithmetic mean over every sample of the frame, `0.0` for an empty frame.
pub fn intensity(frame: &Frame) -> f64 {
    let data = frame.data();
    if data.is_empty() {
        return 0.0;
    }
    let sum: u64 = data.iter().map(|&s| s as u64).sum();
    sum as f64 / data.len() as f64
}
