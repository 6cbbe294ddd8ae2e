use {
    crates_image::ImageEncoder,
    video::{Frame, PixelFormat, RawFormat, RawFrame, VideoError, convert},
};

#[test]
fn test_frame_rejects_wrong_length() {
    let result = Frame::new(0, 2, 2, PixelFormat::Rgb8, vec![0; 11]);
    assert!(matches!(result, Err(VideoError::Stream(_))));
}

#[test]
fn test_frame_rejects_overflowing_size() {
    let result = Frame::new(0, usize::MAX, 2, PixelFormat::Gray8, vec![]);
    assert!(matches!(result, Err(VideoError::Stream(_))));
}

#[test]
fn test_yuyv_raw_frame_becomes_rgb() {
    // two gray pixels with neutral chroma
    let raw = RawFrame {
        width: 2,
        height: 1,
        format: RawFormat::Yuyv,
        data: vec![50, 128, 200, 128],
    };
    let frame = raw.into_frame(4, 1.0).unwrap();
    assert_eq!(frame.index(), 4);
    assert_eq!(frame.format(), PixelFormat::Rgb8);
    assert_eq!(frame.data(), &[50, 50, 50, 200, 200, 200]);
}

#[test]
fn test_short_yuyv_buffer_is_an_error() {
    let raw = RawFrame {
        width: 4,
        height: 2,
        format: RawFormat::Yuyv,
        data: vec![0; 8],
    };
    assert!(matches!(raw.into_frame(0, 1.0), Err(VideoError::Stream(_))));
}

#[test]
fn test_jpeg_raw_frame_is_decoded() {
    let mut jpeg = Vec::new();
    let img = crates_image::RgbImage::from_pixel(16, 8, crates_image::Rgb([128, 128, 128]));
    crates_image::codecs::jpeg::JpegEncoder::new(&mut jpeg)
        .write_image(img.as_raw(), 16, 8, crates_image::ExtendedColorType::Rgb8)
        .unwrap();

    let raw = RawFrame {
        width: 0,
        height: 0,
        format: RawFormat::Jpeg,
        data: jpeg,
    };
    let frame = raw.into_frame(0, 0.5).unwrap();
    assert_eq!((frame.width(), frame.height()), (8, 4));
    assert_eq!(frame.format(), PixelFormat::Rgb8);
}

#[test]
fn test_corrupt_jpeg_is_a_decode_error() {
    let raw = RawFrame {
        width: 0,
        height: 0,
        format: RawFormat::Jpeg,
        data: vec![0xFF, 0xD8, 0x00],
    };
    assert!(matches!(raw.into_frame(0, 1.0), Err(VideoError::Decode(_))));
}

#[test]
fn test_oversized_raw_buffer_is_rejected_before_resize() {
    let raw = RawFrame {
        width: 2,
        height: 2,
        format: PixelFormat::Gray8.into(),
        data: vec![0; 5],
    };
    assert!(raw.into_frame(0, 0.5).is_err());
}

#[test]
fn test_convert_helpers() {
    assert_eq!(convert::swap_red_blue(&[1, 2, 3]), vec![3, 2, 1]);
    assert_eq!(convert::gray_to_rgb(&[9]), vec![9, 9, 9]);
    assert_eq!(convert::yuyv_to_rgb(&[0; 4], 3, 1), None);
}

#[test]
fn test_error_display() {
    assert!(VideoError::Config("scale".to_string()).to_string().contains("scale"));
    assert_eq!(VideoError::SourceClosed.to_string(), "source closed");
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no /dev/video0");
    match VideoError::from(io) {
        VideoError::Device(msg) => assert!(msg.contains("/dev/video0")),
        other => panic!("expected VideoError::Device, got {:?}", other),
    }
}
