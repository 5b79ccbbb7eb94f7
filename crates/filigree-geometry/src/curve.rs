//! Parametric curve evaluation: generalized Bezier and cubic uniform
//! B-spline by forward differences.
//!
//! Curves store *indices* into the owning wireframe's vertex list; evaluation
//! happens after projection, on window-plane control points. The output of
//! both evaluators is an ordered polyline; adjacent samples become the line
//! primitives the clipper and canvas consume.
//!
//! The `start`/`end` fields are carried for round-trip fidelity with the
//! object text format; evaluation always covers the full `[0, 1]` range.

use glam::DVec4;

use crate::point::{WindowObject, WindowPoint};
use crate::transform::{binomial, bspline_basis};
use crate::GeometryError;

// ---------------------------------------------------------------------------
// CurveKind
// ---------------------------------------------------------------------------

/// The supported curve families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum CurveKind {
    /// Interpolates its end control points; tangent to the control polygon.
    #[default]
    Bezier,
    /// Cubic uniform B-spline; approximates the control polygon.
    BSpline,
}

impl CurveKind {
    /// Parse the type token used by `ctype` records.
    pub fn from_obj_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "bezier" => Some(CurveKind::Bezier),
            "bspline" => Some(CurveKind::BSpline),
            _ => None,
        }
    }

    /// The type token emitted into `ctype` records.
    pub fn obj_name(self) -> &'static str {
        match self {
            CurveKind::Bezier => "bezier",
            CurveKind::BSpline => "bspline",
        }
    }
}

impl std::fmt::Display for CurveKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CurveKind::Bezier => write!(f, "Bézier"),
            CurveKind::BSpline => write!(f, "B-Spline"),
        }
    }
}

// ---------------------------------------------------------------------------
// Curve
// ---------------------------------------------------------------------------

/// A parametric curve over control points of the owning wireframe.
///
/// `degree` is the number of control points consumed per segment (4 for a
/// cubic). The Bezier evaluator slides its window by `degree - 1` so that
/// consecutive segments share a joint point; the B-spline evaluator always
/// consumes overlapping windows of 4.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    pub kind: CurveKind,
    /// Indices into the owning wireframe's vertex list.
    pub control_points: Vec<usize>,
    /// Serialized parameter range start (not used by evaluation).
    pub start: f64,
    /// Serialized parameter range end (not used by evaluation).
    pub end: f64,
    /// Control points per segment.
    pub degree: usize,
}

impl Curve {
    /// A cubic curve over the full parameter range.
    pub fn new(kind: CurveKind, control_points: Vec<usize>) -> Self {
        Self {
            kind,
            control_points,
            start: 0.0,
            end: 1.0,
            degree: 4,
        }
    }

    /// Sample the curve into an ordered polyline.
    ///
    /// `steps` is the number of straight segments per curve segment; each
    /// segment contributes `steps + 1` samples (joints deduplicated for
    /// Bezier).
    pub fn sample(
        &self,
        control: &[WindowPoint],
        steps: usize,
    ) -> Result<Vec<WindowPoint>, GeometryError> {
        let steps = steps.max(1);
        match self.kind {
            CurveKind::Bezier => sample_bezier(control, self.degree, steps),
            CurveKind::BSpline => sample_bspline(control, steps),
        }
    }

    /// The line primitives tracing the curve.
    pub fn window_objects(
        &self,
        control: &[WindowPoint],
        steps: usize,
    ) -> Result<Vec<WindowObject>, GeometryError> {
        let points = self.sample(control, steps)?;
        Ok(points
            .windows(2)
            .map(|pair| WindowObject::Line {
                start: pair[0],
                end: pair[1],
            })
            .collect())
    }
}

// ---------------------------------------------------------------------------
// Bezier
// ---------------------------------------------------------------------------

/// Evaluate one Bernstein-form Bezier point at `t` for any number of control
/// points >= 2 (two points degenerate to linear interpolation).
pub fn bezier_point(t: f64, control: &[WindowPoint]) -> WindowPoint {
    let n = control.len();
    let mut point = WindowPoint::ZERO;
    for (k, p) in control.iter().enumerate() {
        let weight = binomial(n - 1, k) * (1.0 - t).powi((n - 1 - k) as i32) * t.powi(k as i32);
        point += *p * weight;
    }
    point
}

fn sample_bezier(
    control: &[WindowPoint],
    degree: usize,
    steps: usize,
) -> Result<Vec<WindowPoint>, GeometryError> {
    if degree < 2 {
        return Err(GeometryError::InsufficientControlPoints {
            needed: 2,
            got: degree,
        });
    }

    let mut points = Vec::new();
    let mut window_start = 0;
    while window_start + degree <= control.len() {
        let segment = &control[window_start..window_start + degree];
        // Skip the first sample of follow-on segments: it duplicates the
        // previous segment's joint.
        let first = if points.is_empty() { 0 } else { 1 };
        for i in first..=steps {
            let t = i as f64 / steps as f64;
            points.push(bezier_point(t, segment));
        }
        window_start += degree - 1;
    }
    Ok(points)
}

// ---------------------------------------------------------------------------
// B-spline (forward differences)
// ---------------------------------------------------------------------------

fn sample_bspline(control: &[WindowPoint], steps: usize) -> Result<Vec<WindowPoint>, GeometryError> {
    if control.len() < 4 {
        return Err(GeometryError::InsufficientControlPoints {
            needed: 4,
            got: control.len(),
        });
    }

    let basis = bspline_basis();
    let h = 1.0 / steps as f64;
    let (h2, h3) = (h * h, h * h * h);

    let mut points = Vec::with_capacity((control.len() - 3) * (steps + 1));
    for window in control.windows(4) {
        let gx = DVec4::new(window[0].x, window[1].x, window[2].x, window[3].x);
        let gy = DVec4::new(window[0].y, window[1].y, window[2].y, window[3].y);
        let cx = basis * gx;
        let cy = basis * gy;

        // Value and forward differences of the cubic at t = 0.
        let mut x = cx.w;
        let mut dx = cx.z * h + cx.y * h2 + cx.x * h3;
        let mut d2x = 2.0 * cx.y * h2 + 6.0 * cx.x * h3;
        let d3x = 6.0 * cx.x * h3;

        let mut y = cy.w;
        let mut dy = cy.z * h + cy.y * h2 + cy.x * h3;
        let mut d2y = 2.0 * cy.y * h2 + 6.0 * cy.x * h3;
        let d3y = 6.0 * cy.x * h3;

        for _ in 0..=steps {
            points.push(WindowPoint::new(x, y));

            x += dx;
            dx += d2x;
            d2x += d3x;

            y += dy;
            dy += d2y;
            d2y += d3y;
        }
    }
    Ok(points)
}
