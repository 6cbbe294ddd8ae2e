use {
    brightness::{ClassifiedReading, RenderView, Tag},
    video::DisplayFrame,
};

pub const BACKGROUND: u32 = 0x00FFFFFF;
pub const NO_IMAGE: u32 = 0x00202020;
pub const AXIS: u32 = 0x00404040;
pub const TRACE: u32 = 0x00A0A0A0;
pub const THRESHOLD: u32 = 0x0000A000;
pub const BELOW: u32 = 0x00FF0000;
pub const ABOVE: u32 = 0x000000FF;

/// Highest intensity on the trace's y axis.
pub const MAX_INTENSITY: f64 = 255.0;

const MARGIN: usize = 12;

/// Pack one RGB pixel into the 0RGB layout minifb expects.
pub fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

/// Packed 0RGB pixel buffer with clipped drawing.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<u32>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![BACKGROUND; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn get(&self, x: usize, y: usize) -> Option<u32> {
        (x < self.width && y < self.height).then(|| self.pixels[y * self.width + x])
    }

    /// Points outside the canvas are ignored.
    pub fn set(&mut self, x: i64, y: i64, color: u32) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        self.pixels[y as usize * self.width + x as usize] = color;
    }

    pub fn fill_rect(&mut self, x: usize, y: usize, width: usize, height: usize, color: u32) {
        for row in y..(y + height).min(self.height) {
            for col in x..(x + width).min(self.width) {
                self.pixels[row * self.width + col] = color;
            }
        }
    }

    /// Bresenham line, both ends included.
    pub fn line(&mut self, from: (i64, i64), to: (i64, i64), color: u32) {
        let (mut x, mut y) = from;
        let dx = (to.0 - x).abs();
        let dy = -(to.1 - y).abs();
        let sx = if x < to.0 { 1 } else { -1 };
        let sy = if y < to.1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.set(x, y, color);
            if (x, y) == to {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    fn dot(&mut self, (x, y): (i64, i64), color: u32) {
        for oy in -1..=1 {
            for ox in -1..=1 {
                self.set(x + ox, y + oy, color);
            }
        }
    }

    fn star(&mut self, (x, y): (i64, i64), color: u32) {
        self.line((x - 2, y), (x + 2, y), color);
        self.line((x, y - 2), (x, y + 2), color);
        self.line((x - 2, y - 2), (x + 2, y + 2), color);
        self.line((x - 2, y + 2), (x + 2, y - 2), color);
    }
}

/// Side-by-side panels: camera image on the left, intensity trace on the
/// right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub panel_width: usize,
    pub panel_height: usize,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            panel_width: 480,
            panel_height: 360,
        }
    }
}

impl Layout {
    pub fn width(&self) -> usize {
        self.panel_width * 2
    }

    pub fn height(&self) -> usize {
        self.panel_height
    }

    pub fn canvas(&self) -> Canvas {
        Canvas::new(self.width(), self.height())
    }

    /// Pixel position of `reading` in the trace panel.
    ///
    /// The x axis always spans `capacity` frames ending at `newest`, so the
    /// trace scrolls left while the axis keeps a fixed width.
    pub fn trace_point(&self, reading: &ClassifiedReading, newest: u64, capacity: usize) -> (i64, i64) {
        let plot_width = self.panel_width.saturating_sub(2 * MARGIN) as f64;
        let plot_height = self.panel_height.saturating_sub(2 * MARGIN) as f64;

        let age = newest.saturating_sub(reading.frame_index) as f64;
        let span = capacity.saturating_sub(1).max(1) as f64;
        let slot = (span - age).max(0.0);
        let x = self.panel_width + MARGIN + (slot / span * plot_width).round() as usize;

        let y = MARGIN as f64 + plot_height * (1.0 - self.intensity_fraction(reading.value));
        (x as i64, y.round() as i64)
    }

    fn intensity_fraction(&self, value: f64) -> f64 {
        (value / MAX_INTENSITY).clamp(0.0, 1.0)
    }

    fn threshold_row(&self, threshold: f64) -> i64 {
        let plot_height = self.panel_height.saturating_sub(2 * MARGIN) as f64;
        (MARGIN as f64 + plot_height * (1.0 - self.intensity_fraction(threshold))).round() as i64
    }
}

/// Nearest-neighbour blit of `frame` stretched over the left panel.
pub fn draw_frame(canvas: &mut Canvas, layout: &Layout, frame: &DisplayFrame) {
    if frame.width == 0 || frame.height == 0 || frame.rgb.len() < frame.width * frame.height * 3 {
        canvas.fill_rect(0, 0, layout.panel_width, layout.panel_height, NO_IMAGE);
        return;
    }
    for y in 0..layout.panel_height {
        let src_y = y * frame.height / layout.panel_height;
        for x in 0..layout.panel_width {
            let src_x = x * frame.width / layout.panel_width;
            let idx = (src_y * frame.width + src_x) * 3;
            let color = pack_rgb(frame.rgb[idx], frame.rgb[idx + 1], frame.rgb[idx + 2]);
            canvas.set(x as i64, y as i64, color);
        }
    }
}

/// Intensity trace: connecting line, threshold, then one marker per reading
/// (red star below the threshold, blue dot above).
pub fn draw_trace(
    canvas: &mut Canvas,
    layout: &Layout,
    readings: &[ClassifiedReading],
    threshold: f64,
    capacity: usize,
) {
    canvas.fill_rect(layout.panel_width, 0, layout.panel_width, layout.panel_height, BACKGROUND);

    let left = (layout.panel_width + MARGIN) as i64;
    let right = layout.width().saturating_sub(MARGIN) as i64;
    let bottom = layout.panel_height.saturating_sub(MARGIN) as i64;
    canvas.line((left, MARGIN as i64), (left, bottom), AXIS);
    canvas.line((left, bottom), (right, bottom), AXIS);

    let row = layout.threshold_row(threshold);
    for x in (left..=right).step_by(4) {
        canvas.line((x, row), ((x + 1).min(right), row), THRESHOLD);
    }

    let Some(newest) = readings.last().map(|reading| reading.frame_index) else {
        return;
    };
    let points: Vec<(i64, i64)> = readings
        .iter()
        .map(|reading| layout.trace_point(reading, newest, capacity))
        .collect();
    for pair in points.windows(2) {
        canvas.line(pair[0], pair[1], TRACE);
    }
    for (reading, point) in readings.iter().zip(points) {
        match reading.tag {
            Tag::Below => canvas.star(point, BELOW),
            Tag::Above => canvas.dot(point, ABOVE),
        }
    }
}

/// Full composition of one rendered frame.
pub fn draw_view(canvas: &mut Canvas, layout: &Layout, view: &RenderView<'_>) {
    match view.display {
        Some(frame) => draw_frame(canvas, layout, frame),
        None => canvas.fill_rect(0, 0, layout.panel_width, layout.panel_height, NO_IMAGE),
    }
    draw_trace(canvas, layout, view.readings, view.threshold, view.capacity);
}
