use video::{Frame, PixelFormat, intensity, to_display};

#[test]
fn test_bgr_display_swaps_channels() {
    let frame = Frame::new(7, 2, 1, PixelFormat::Bgr8, vec![255, 0, 0, 1, 2, 3]).unwrap();
    let display = to_display(&frame);
    assert_eq!(display.index, 7);
    assert_eq!((display.width, display.height), (2, 1));
    assert_eq!(display.rgb, vec![0, 0, 255, 3, 2, 1]);
}

#[test]
fn test_rgb_display_is_copied() {
    let frame = Frame::new(0, 1, 1, PixelFormat::Rgb8, vec![10, 20, 30]).unwrap();
    assert_eq!(to_display(&frame).rgb, vec![10, 20, 30]);
}

#[test]
fn test_gray_display_is_replicated() {
    let frame = Frame::new(0, 2, 1, PixelFormat::Gray8, vec![5, 200]).unwrap();
    assert_eq!(to_display(&frame).rgb, vec![5, 5, 5, 200, 200, 200]);
}

#[test]
fn test_intensity_is_mean_of_all_samples() {
    let frame = Frame::new(0, 2, 1, PixelFormat::Bgr8, vec![0, 30, 60, 90, 120, 150]).unwrap();
    assert_eq!(intensity(&frame), 75.0);
}

#[test]
fn test_intensity_ignores_channel_order() {
    let data = vec![1, 2, 3, 250, 251, 252];
    let bgr = Frame::new(0, 2, 1, PixelFormat::Bgr8, data.clone()).unwrap();
    let rgb = Frame::new(0, 2, 1, PixelFormat::Rgb8, data).unwrap();
    assert_eq!(intensity(&bgr), intensity(&rgb));
}

#[test]
fn test_intensity_of_empty_frame_is_zero() {
    let frame = Frame::new(0, 0, 0, PixelFormat::Rgb8, vec![]).unwrap();
    assert_eq!(intensity(&frame), 0.0);
}

#[test]
fn test_transforms_do_not_disturb_each_other() {
    let frame = Frame::new(3, 2, 2, PixelFormat::Bgr8, (0..12).collect()).unwrap();
    let before = intensity(&frame);
    let display = to_display(&frame);
    assert_eq!(intensity(&frame), before);
    assert_eq!(to_display(&frame), display);
}
