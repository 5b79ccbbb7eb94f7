//! World- and window-space point types and the drawable primitive sum type.
//!
//! World geometry lives in homogeneous coordinates ([`WorldPoint`], `w = 1`
//! for affine points) so that every affine transform composes as a single
//! `DMat4` multiply. Window-plane geometry is plain 2D ([`WindowPoint`]); the
//! homogeneous coordinate is dropped at projection time and never reappears.

use glam::{DVec2, DVec4};

/// A point in world space, homogeneous. Affine points carry `w = 1`; the
/// documented transform matrices preserve that.
pub type WorldPoint = DVec4;

/// A point on the window plane (or, after viewport mapping, in viewport
/// pixels). Componentwise arithmetic comes from glam.
pub type WindowPoint = DVec2;

/// A color tag. Colors are opaque tokens handed through to the canvas sink
/// (and to the `usemtl` records of the object format); no color math is done.
pub type Color = String;

/// Build an affine world point (`w = 1`).
#[inline]
pub fn world_point(x: f64, y: f64, z: f64) -> WorldPoint {
    DVec4::new(x, y, z, 1.0)
}

// ---------------------------------------------------------------------------
// WindowObject
// ---------------------------------------------------------------------------

/// A drawable primitive on the window plane.
///
/// Every wireframe lowers to a list of these per frame; the clipper rewrites
/// or rejects them and the render driver forwards survivors to the canvas.
#[derive(Debug, Clone, PartialEq)]
pub enum WindowObject {
    /// A single point mark.
    Point(WindowPoint),
    /// A straight segment between two points.
    Line { start: WindowPoint, end: WindowPoint },
    /// A closed polygon (last vertex connects to the first). `fill` is the
    /// face's color tag; when `None` the polygon is outlined, not filled.
    Polygon {
        points: Vec<WindowPoint>,
        fill: Option<Color>,
    },
    /// A tessellated `(steps + 1) x (steps + 1)` patch grid in row-major
    /// order. Only used for filled (textured) patches; plain surfaces lower
    /// straight to [`WindowObject::Line`] runs.
    SurfaceGrid {
        points: Vec<WindowPoint>,
        steps: usize,
    },
}
