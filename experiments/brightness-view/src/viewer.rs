use {
    crate::plot::{Canvas, Layout, draw_view},
    brightness::{Control, RenderView, Renderer},
    minifb::{Key, Window, WindowOptions},
};

/// Live window showing the camera image next to the intensity trace.
///
/// Returns `Control::Stop` when ESC is pressed or the window is closed.
pub struct ViewerRenderer {
    window: Window,
    layout: Layout,
    canvas: Canvas,
}

impl ViewerRenderer {
    pub fn new(layout: Layout) -> Result<Self, minifb::Error> {
        let mut window = Window::new(
            "Frame Number 0 - ESC to exit",
            layout.width(),
            layout.height(),
            WindowOptions::default(),
        )?;
        window.set_target_fps(30);
        Ok(Self {
            window,
            layout,
            canvas: layout.canvas(),
        })
    }
}

impl Renderer for ViewerRenderer {
    fn render(&mut self, view: &RenderView<'_>) -> Control {
        if !self.window.is_open() || self.window.is_key_down(Key::Escape) {
            return Control::Stop;
        }

        draw_view(&mut self.canvas, &self.layout, view);
        self.window.set_title(&format!("Frame Number {}", view.frame_index));
        if let Err(error) =
            self.window
                .update_with_buffer(self.canvas.pixels(), self.canvas.width(), self.canvas.height())
        {
            log::error!("window update failed: {}", error);
            return Control::Stop;
        }
        Control::Continue
    }
}
