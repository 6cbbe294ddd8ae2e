use {
    brightness::{ClassifiedReading, Crossing, RenderView, Tag},
    brightness_view::{
        Layout,
        plot::{ABOVE, BACKGROUND, BELOW, NO_IMAGE, THRESHOLD, draw_trace, draw_view, pack_rgb},
    },
    video::DisplayFrame,
};

fn reading(frame_index: u64, value: f64, tag: Tag) -> ClassifiedReading {
    ClassifiedReading { frame_index, value, tag }
}

fn small_layout() -> Layout {
    Layout {
        panel_width: 100,
        panel_height: 80,
    }
}

#[test]
fn test_pack_rgb() {
    assert_eq!(pack_rgb(255, 0, 0), 0x00FF0000);
    assert_eq!(pack_rgb(0x12, 0x34, 0x56), 0x00123456);
    assert_eq!(pack_rgb(0, 0, 255), ABOVE);
}

#[test]
fn test_newest_reading_at_right_edge() {
    let layout = small_layout();
    let newest = reading(60, 0.0, Tag::Below);
    let oldest = reading(11, 255.0, Tag::Above);

    let (x_new, y_new) = layout.trace_point(&newest, 60, 50);
    let (x_old, y_old) = layout.trace_point(&oldest, 60, 50);
    assert_eq!(x_new, 188);
    assert_eq!(x_old, 112);
    assert_eq!(y_new, 68);
    assert_eq!(y_old, 12);
}

#[test]
fn test_axis_width_fixed_while_filling() {
    // a half full window still uses the full x range for one window
    let layout = small_layout();
    let first = reading(0, 10.0, Tag::Below);
    let (x, _) = layout.trace_point(&first, 0, 50);
    assert_eq!(x, 188);

    let (x, _) = layout.trace_point(&first, 49, 50);
    assert_eq!(x, 112);
}

#[test]
fn test_markers_colored_by_tag() {
    let layout = small_layout();
    let mut canvas = layout.canvas();
    let readings = [reading(0, 200.0, Tag::Above), reading(1, 20.0, Tag::Below)];
    draw_trace(&mut canvas, &layout, &readings, 40.0, 2);

    let (x, y) = layout.trace_point(&readings[0], 1, 2);
    assert_eq!(canvas.get(x as usize, y as usize), Some(ABOVE));
    let (x, y) = layout.trace_point(&readings[1], 1, 2);
    assert_eq!(canvas.get(x as usize, y as usize), Some(BELOW));
}

#[test]
fn test_threshold_line_drawn() {
    let layout = small_layout();
    let mut canvas = layout.canvas();
    draw_trace(&mut canvas, &layout, &[], 255.0, 10);
    // top of the plot area
    assert_eq!(canvas.get(120, 12), Some(THRESHOLD));
}

#[test]
fn test_view_without_display() {
    let layout = small_layout();
    let mut canvas = layout.canvas();
    let view = RenderView {
        frame_index: 0,
        display: None,
        readings: &[],
        threshold: 40.0,
        capacity: 10,
        crossing: Crossing::None,
    };
    draw_view(&mut canvas, &layout, &view);
    assert_eq!(canvas.get(50, 40), Some(NO_IMAGE));
    assert_eq!(canvas.get(150, 5), Some(BACKGROUND));
}

#[test]
fn test_frame_stretched_over_left_panel() {
    let layout = small_layout();
    let mut canvas = layout.canvas();
    // left half green, right half blue
    let frame = DisplayFrame {
        index: 0,
        width: 2,
        height: 1,
        rgb: vec![0, 255, 0, 0, 0, 255],
    };
    let view = RenderView {
        frame_index: 0,
        display: Some(&frame),
        readings: &[],
        threshold: 40.0,
        capacity: 10,
        crossing: Crossing::None,
    };
    draw_view(&mut canvas, &layout, &view);
    assert_eq!(canvas.get(0, 0), Some(0x0000FF00));
    assert_eq!(canvas.get(49, 79), Some(0x0000FF00));
    assert_eq!(canvas.get(50, 0), Some(0x000000FF));
    assert_eq!(canvas.get(99, 79), Some(0x000000FF));
}

#[test]
fn test_canvas_clips() {
    let mut canvas = small_layout().canvas();
    canvas.line((-10, -10), (500, 500), 0x00123456);
    canvas.set(-1, 3, 0);
    assert_eq!(canvas.get(0, 0), Some(0x00123456));
    assert_eq!(canvas.get(200, 0), None);
    assert_eq!(canvas.pixels().len(), 200 * 80);
}
