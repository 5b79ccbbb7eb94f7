//! 2D clipping against the padded viewport rectangle.
//!
//! Points are tested for containment; lines go through Cohen-Sutherland or
//! Liang-Barsky (runtime-selected); polygons through Sutherland-Hodgman.
//! Curves and surfaces never reach this module in native form: the
//! evaluators lower them to line runs first, so the line path covers them.
//!
//! Clipping never fails; total rejection is `None`. Non-finite coordinates
//! (the perspective degeneracy sentinel) are rejected outright.

use filigree_geometry::point::{WindowObject, WindowPoint};

// ---------------------------------------------------------------------------
// ClippingAlgorithm
// ---------------------------------------------------------------------------

/// The selectable line-clipping algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum ClippingAlgorithm {
    #[default]
    CohenSutherland,
    LiangBarsky,
}

impl ClippingAlgorithm {
    /// Decode the preferences integer (0/1).
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(ClippingAlgorithm::CohenSutherland),
            1 => Some(ClippingAlgorithm::LiangBarsky),
            _ => None,
        }
    }

    /// The preferences integer.
    pub fn index(self) -> u8 {
        match self {
            ClippingAlgorithm::CohenSutherland => 0,
            ClippingAlgorithm::LiangBarsky => 1,
        }
    }
}

impl std::fmt::Display for ClippingAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClippingAlgorithm::CohenSutherland => write!(f, "Cohen-Sutherland"),
            ClippingAlgorithm::LiangBarsky => write!(f, "Liang-Barsky"),
        }
    }
}

// ---------------------------------------------------------------------------
// ClipBounds
// ---------------------------------------------------------------------------

/// The axis-aligned clipping rectangle, inclusive on all four boundaries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipBounds {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

// Region-code bits for Cohen-Sutherland.
const INSIDE: u8 = 0b0000;
const LEFT: u8 = 0b0001;
const RIGHT: u8 = 0b0010;
const BOTTOM: u8 = 0b0100;
const TOP: u8 = 0b1000;

impl ClipBounds {
    pub fn new(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        Self {
            xmin,
            ymin,
            xmax,
            ymax,
        }
    }

    pub fn contains(&self, p: WindowPoint) -> bool {
        self.region_code(p) == INSIDE
    }

    /// The 4-bit outside code of a point (left/right/bottom/top).
    fn region_code(&self, p: WindowPoint) -> u8 {
        let mut code = INSIDE;
        if p.x < self.xmin {
            code |= LEFT;
        } else if p.x > self.xmax {
            code |= RIGHT;
        }
        if p.y < self.ymin {
            code |= BOTTOM;
        } else if p.y > self.ymax {
            code |= TOP;
        }
        code
    }
}

// ---------------------------------------------------------------------------
// Clipper
// ---------------------------------------------------------------------------

/// Clips window objects against a rectangle with a selected line algorithm.
#[derive(Debug, Clone, Copy)]
pub struct Clipper {
    pub bounds: ClipBounds,
    pub algorithm: ClippingAlgorithm,
}

impl Clipper {
    pub fn new(bounds: ClipBounds, algorithm: ClippingAlgorithm) -> Self {
        Self { bounds, algorithm }
    }

    /// Clip one object. `None` means fully outside (or unclippable, for the
    /// patch-grid variant, which has no native path).
    pub fn clip(&self, object: WindowObject) -> Option<WindowObject> {
        match object {
            WindowObject::Point(p) => self.bounds.contains(p).then_some(WindowObject::Point(p)),

            WindowObject::Line { start, end } => self
                .clip_line(start, end)
                .map(|(start, end)| WindowObject::Line { start, end }),

            WindowObject::Polygon { points, fill } => self
                .clip_polygon(&points)
                .map(|points| WindowObject::Polygon { points, fill }),

            WindowObject::SurfaceGrid { .. } => {
                tracing::warn!("no clip path for patch grids; dropping the object");
                None
            }
        }
    }

    /// Clip a segment with the selected algorithm.
    pub fn clip_line(
        &self,
        start: WindowPoint,
        end: WindowPoint,
    ) -> Option<(WindowPoint, WindowPoint)> {
        if !start.is_finite() || !end.is_finite() {
            return None;
        }
        match self.algorithm {
            ClippingAlgorithm::CohenSutherland => self.cohen_sutherland(start, end),
            ClippingAlgorithm::LiangBarsky => self.liang_barsky(start, end),
        }
    }

    fn cohen_sutherland(
        &self,
        mut p0: WindowPoint,
        mut p1: WindowPoint,
    ) -> Option<(WindowPoint, WindowPoint)> {
        let b = self.bounds;
        let mut code0 = b.region_code(p0);
        let mut code1 = b.region_code(p1);

        loop {
            if code0 | code1 == INSIDE {
                return Some((p0, p1));
            }
            if code0 & code1 != INSIDE {
                return None;
            }

            // Push the endpoint that is outside onto the boundary it crosses,
            // testing boundaries in top/bottom/right/left order.
            let outside = if code0 != INSIDE { code0 } else { code1 };
            let crossing = if outside & TOP != 0 {
                WindowPoint::new(
                    p0.x + (p1.x - p0.x) * (b.ymax - p0.y) / (p1.y - p0.y),
                    b.ymax,
                )
            } else if outside & BOTTOM != 0 {
                WindowPoint::new(
                    p0.x + (p1.x - p0.x) * (b.ymin - p0.y) / (p1.y - p0.y),
                    b.ymin,
                )
            } else if outside & RIGHT != 0 {
                WindowPoint::new(
                    b.xmax,
                    p0.y + (p1.y - p0.y) * (b.xmax - p0.x) / (p1.x - p0.x),
                )
            } else {
                WindowPoint::new(
                    b.xmin,
                    p0.y + (p1.y - p0.y) * (b.xmin - p0.x) / (p1.x - p0.x),
                )
            };

            if outside == code0 {
                p0 = crossing;
                code0 = b.region_code(p0);
            } else {
                p1 = crossing;
                code1 = b.region_code(p1);
            }
        }
    }

    fn liang_barsky(
        &self,
        p0: WindowPoint,
        p1: WindowPoint,
    ) -> Option<(WindowPoint, WindowPoint)> {
        let b = self.bounds;
        let d = p1 - p0;
        let p = [-d.x, d.x, -d.y, d.y];
        let q = [p0.x - b.xmin, b.xmax - p0.x, p0.y - b.ymin, b.ymax - p0.y];

        let mut t_enter: f64 = 0.0;
        let mut t_exit: f64 = 1.0;

        for i in 0..4 {
            if p[i] == 0.0 {
                if q[i] < 0.0 {
                    return None;
                }
            } else {
                let t = q[i] / p[i];
                if p[i] < 0.0 {
                    t_enter = t_enter.max(t);
                } else {
                    t_exit = t_exit.min(t);
                }
            }
        }

        if t_enter > t_exit {
            return None;
        }
        Some((p0 + d * t_enter, p0 + d * t_exit))
    }

    /// Sutherland-Hodgman: clip against each boundary in turn (left, top,
    /// right, bottom). Fewer than three surviving vertices after any pass
    /// rejects the polygon.
    pub fn clip_polygon(&self, points: &[WindowPoint]) -> Option<Vec<WindowPoint>> {
        if points.len() < 3 || points.iter().any(|p| !p.is_finite()) {
            return None;
        }

        let mut current = points.to_vec();
        for boundary in [Boundary::Left, Boundary::Top, Boundary::Right, Boundary::Bottom] {
            current = self.clip_against(&current, boundary);
            if current.len() < 3 {
                return None;
            }
        }
        Some(current)
    }

    /// One Sutherland-Hodgman pass over a single boundary.
    fn clip_against(&self, points: &[WindowPoint], boundary: Boundary) -> Vec<WindowPoint> {
        let mut output = Vec::with_capacity(points.len() + 4);
        for i in 0..points.len() {
            let prev = points[(i + points.len() - 1) % points.len()];
            let curr = points[i];
            let prev_inside = boundary.inside(self.bounds, prev);
            let curr_inside = boundary.inside(self.bounds, curr);

            if curr_inside {
                if !prev_inside {
                    output.push(boundary.intersect(self.bounds, prev, curr));
                }
                output.push(curr);
            } else if prev_inside {
                output.push(boundary.intersect(self.bounds, prev, curr));
            }
        }
        output
    }
}

/// One clipping boundary of the rectangle, with its inclusive inside
/// predicate and segment/boundary intersection.
#[derive(Debug, Clone, Copy)]
enum Boundary {
    Left,
    Top,
    Right,
    Bottom,
}

impl Boundary {
    fn inside(self, b: ClipBounds, p: WindowPoint) -> bool {
        match self {
            Boundary::Left => p.x >= b.xmin,
            Boundary::Top => p.y <= b.ymax,
            Boundary::Right => p.x <= b.xmax,
            Boundary::Bottom => p.y >= b.ymin,
        }
    }

    fn intersect(self, b: ClipBounds, from: WindowPoint, to: WindowPoint) -> WindowPoint {
        match self {
            Boundary::Left => {
                let y = from.y + (to.y - from.y) * (b.xmin - from.x) / (to.x - from.x);
                WindowPoint::new(b.xmin, y)
            }
            Boundary::Right => {
                let y = from.y + (to.y - from.y) * (b.xmax - from.x) / (to.x - from.x);
                WindowPoint::new(b.xmax, y)
            }
            Boundary::Top => {
                let x = from.x + (to.x - from.x) * (b.ymax - from.y) / (to.y - from.y);
                WindowPoint::new(x, b.ymax)
            }
            Boundary::Bottom => {
                let x = from.x + (to.x - from.x) * (b.ymin - from.y) / (to.y - from.y);
                WindowPoint::new(x, b.ymin)
            }
        }
    }
}
