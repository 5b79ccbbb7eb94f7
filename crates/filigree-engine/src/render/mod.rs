//! Per-frame rendering: the abstract canvas sink and the frame driver.

pub mod canvas;
pub mod renderer;

pub use canvas::{Canvas, DrawCall, RecordingCanvas};
pub use renderer::{RenderSettings, Renderer};
