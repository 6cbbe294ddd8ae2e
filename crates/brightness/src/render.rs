use {
    crate::{ClassifiedReading, Crossing, Tag},
    video::DisplayFrame,
};

/// What a renderer asks the pipeline to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Stop,
}

/// Everything a renderer gets for one frame.
///
/// `readings` is a fresh copy of the window, oldest first; the live window
/// is never exposed.
#[derive(Debug)]
pub struct RenderView<'a> {
    pub frame_index: u64,
    /// `None` when display conversion is turned off.
    pub display: Option<&'a DisplayFrame>,
    pub readings: &'a [ClassifiedReading],
    pub threshold: f64,
    /// Window capacity, the width of the trace's x axis.
    pub capacity: usize,
    pub crossing: Crossing,
}

impl RenderView<'_> {
    /// Reading produced by this frame, if intensity is computed.
    pub fn latest(&self) -> Option<&ClassifiedReading> {
        self.readings
            .last()
            .filter(|reading| reading.frame_index == self.frame_index)
    }
}

/// Presentation collaborator, called once per frame.
pub trait Renderer {
    fn render(&mut self, view: &RenderView<'_>) -> Control;
}

impl<F> Renderer for F
where
    F: FnMut(&RenderView<'_>) -> Control,
{
    fn render(&mut self, view: &RenderView<'_>) -> Control {
        self(view)
    }
}

/// Headless renderer writing one log line per frame.
#[derive(Debug, Default)]
pub struct LogRenderer;

impl Renderer for LogRenderer {
    fn render(&mut self, view: &RenderView<'_>) -> Control {
        match view.latest() {
            Some(reading) => {
                let marker = match reading.tag {
                    Tag::Below => " (below threshold)",
                    Tag::Above => "",
                };
                log::info!("frame {}: intensity {:.2}{}", view.frame_index, reading.value, marker);
            }
            None => log::info!("frame {}", view.frame_index),
        }
        Control::Continue
    }
}
