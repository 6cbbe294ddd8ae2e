//! Bounded brightness streaming.
//!
//! A `Pipeline` pulls frames from a `video::FrameSource`, reduces each one to
//! a mean intensity, keeps the most recent readings in a fixed-capacity
//! `Window`, classifies them against a threshold and hands the result to a
//! `Renderer`.

pub mod config;
pub mod error;
pub mod pipeline;
pub mod render;
pub mod window;

pub use config::PipelineConfig;
pub use error::PipelineError;
pub use pipeline::{Pipeline, PipelineState, RunSummary, Step, StopReason};
pub use render::{Control, LogRenderer, RenderView, Renderer};
pub use window::{ClassifiedReading, Crossing, Reading, Tag, Window};
