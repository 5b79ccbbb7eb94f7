//! The canvas seam between the render driver and whatever actually draws.
//!
//! The driver never talks to a toolkit: it emits points, lines, polygons,
//! and text through [`Canvas`]. [`RecordingCanvas`] captures the calls as
//! data, which is what the tests and the headless example assert against.

use filigree_geometry::point::WindowPoint;

// ---------------------------------------------------------------------------
// Canvas
// ---------------------------------------------------------------------------

/// A draw sink in viewport coordinates.
pub trait Canvas {
    fn point(&mut self, at: WindowPoint, color: &str, thickness: f64);
    fn line(&mut self, start: WindowPoint, end: WindowPoint, color: &str, thickness: f64);
    fn polygon(&mut self, points: &[WindowPoint], fill: Option<&str>, outline: &str, thickness: f64);
    fn text(&mut self, at: WindowPoint, content: &str, color: &str);
}

// ---------------------------------------------------------------------------
// RecordingCanvas
// ---------------------------------------------------------------------------

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Point {
        at: WindowPoint,
        color: String,
        thickness: f64,
    },
    Line {
        start: WindowPoint,
        end: WindowPoint,
        color: String,
        thickness: f64,
    },
    Polygon {
        points: Vec<WindowPoint>,
        fill: Option<String>,
        outline: String,
        thickness: f64,
    },
    Text {
        at: WindowPoint,
        content: String,
        color: String,
    },
}

/// A canvas that records every call for later assertions.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub calls: Vec<DrawCall>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawCall> {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Line { .. }))
    }

    pub fn count_lines(&self) -> usize {
        self.lines().count()
    }

    pub fn count_points(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Point { .. }))
            .count()
    }

    pub fn count_polygons(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Polygon { .. }))
            .count()
    }
}

impl Canvas for RecordingCanvas {
    fn point(&mut self, at: WindowPoint, color: &str, thickness: f64) {
        self.calls.push(DrawCall::Point {
            at,
            color: color.to_owned(),
            thickness,
        });
    }

    fn line(&mut self, start: WindowPoint, end: WindowPoint, color: &str, thickness: f64) {
        self.calls.push(DrawCall::Line {
            start,
            end,
            color: color.to_owned(),
            thickness,
        });
    }

    fn polygon(
        &mut self,
        points: &[WindowPoint],
        fill: Option<&str>,
        outline: &str,
        thickness: f64,
    ) {
        self.calls.push(DrawCall::Polygon {
            points: points.to_vec(),
            fill: fill.map(str::to_owned),
            outline: outline.to_owned(),
            thickness,
        });
    }

    fn text(&mut self, at: WindowPoint, content: &str, color: &str) {
        self.calls.push(DrawCall::Text {
            at,
            content: content.to_owned(),
            color: color.to_owned(),
        });
    }
}
