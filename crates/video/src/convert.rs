use {
    crate::VideoError,
    crates_image::{
        ImageBuffer, ImageFormat, Luma, Rgb,
        imageops::{self, FilterType},
    },
};

// BT.601 YUV-to-RGB conversion for a single pixel (fixed-point, shift 8)
fn yuv_to_rgb(y: u8, u: u8, v: u8) -> [u8; 3] {
    let y = y as i32;
    let u = u as i32 - 128;
    let v = v as i32 - 128;
    let r = (y + ((359 * v) >> 8)).clamp(0, 255) as u8;
    let g = (y - ((88 * u + 183 * v) >> 8)).clamp(0, 255) as u8;
    let b = (y + ((454 * u) >> 8)).clamp(0, 255) as u8;
    [r, g, b]
}

/// Converts packed YUYV (`[Y0, U, Y1, V, ...]`, two pixels share U and V)
/// to packed RGB.
///
/// Returns `None` if `data` is shorter than `width * height * 2` bytes or the
/// width is odd.
pub fn yuyv_to_rgb(data: &[u8], width: usize, height: usize) -> Option<Vec<u8>> {
    if width % 2 != 0 {
        return None;
    }
    let pixel_count = width.checked_mul(height)?;
    let expected = pixel_count.checked_mul(2)?;
    if data.len() < expected {
        return None;
    }

    let mut rgb = Vec::with_capacity(pixel_count * 3);
    for chunk in data[..expected].chunks_exact(4) {
        rgb.extend_from_slice(&yuv_to_rgb(chunk[0], chunk[1], chunk[3]));
        rgb.extend_from_slice(&yuv_to_rgb(chunk[2], chunk[1], chunk[3]));
    }
    Some(rgb)
}

/// Swaps the first and third sample of every 3-byte pixel (BGR <-> RGB).
pub fn swap_red_blue(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len());
    for px in data.chunks_exact(3) {
        out.extend_from_slice(&[px[2], px[1], px[0]]);
    }
    out
}

/// Replicates every gray sample into an RGB triple.
pub fn gray_to_rgb(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len() * 3);
    for &g in data {
        out.extend_from_slice(&[g, g, g]);
    }
    out
}

/// Decodes a JPEG buffer to `(width, height, rgb)`.
pub fn decode_jpeg(data: &[u8]) -> Result<(usize, usize, Vec<u8>), VideoError> {
    let rgb = crates_image::load_from_memory_with_format(data, ImageFormat::Jpeg)?.to_rgb8();
    let (width, height) = rgb.dimensions();
    Ok((width as usize, height as usize, rgb.into_raw()))
}

/// Dimension after scaling by `scale`, never below 1.
pub fn scaled_dimension(dim: usize, scale: f32) -> usize {
    ((dim as f64 * scale as f64).round() as usize).max(1)
}

/// Bilinear down-sampling of an unpacked 1- or 3-channel buffer.
///
/// Returns the new `(width, height, data)`. A `scale` of 1.0 or an empty
/// buffer returns the input unchanged.
pub fn resize(
    width: usize,
    height: usize,
    channels: usize,
    data: Vec<u8>,
    scale: f32,
) -> Result<(usize, usize, Vec<u8>), VideoError> {
    if scale == 1.0 || width == 0 || height == 0 {
        return Ok((width, height, data));
    }
    let new_width = scaled_dimension(width, scale);
    let new_height = scaled_dimension(height, scale);
    let (w, h, nw, nh) = (width as u32, height as u32, new_width as u32, new_height as u32);
    let too_short = || VideoError::Stream(format!("buffer too short for {width}x{height}x{channels}"));

    let resized = match channels {
        1 => {
            let img = ImageBuffer::<Luma<u8>, _>::from_raw(w, h, data).ok_or_else(too_short)?;
            imageops::resize(&img, nw, nh, FilterType::Triangle).into_raw()
        }
        // the filter treats channels independently, so BGR passes through Rgb
        3 => {
            let img = ImageBuffer::<Rgb<u8>, _>::from_raw(w, h, data).ok_or_else(too_short)?;
            imageops::resize(&img, nw, nh, FilterType::Triangle).into_raw()
        }
        _ => {
            return Err(VideoError::Stream(format!(
                "cannot resize {channels}-channel frames"
            )));
        }
    };
    Ok((new_width, new_height, resized))
}
