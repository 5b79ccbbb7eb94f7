//! Filigree Geometry -- wireframe data model and tessellation kernel.
//!
//! This crate provides the world-space side of the Filigree modeler: points in
//! homogeneous coordinates, the [`Wireframe`](wireframe::Wireframe) composite
//! (vertices, edges, faces, curves, surfaces), in-place affine transforms, and
//! the curve/surface evaluators that lower parametric geometry to window-plane
//! polylines.
//!
//! Everything here is pure data and arithmetic: no canvas, no camera, no I/O.
//! The viewing crate projects vertices to the window plane and hands the
//! projected slice back to [`Wireframe::window_objects`](wireframe::Wireframe::window_objects),
//! which assembles the drawable primitives.
//!
//! # Quick Start
//!
//! ```
//! use filigree_geometry::prelude::*;
//!
//! let mut tri = Wireframe::new(0, "triangle");
//! tri.vertices = vec![
//!     world_point(0.0, 0.0, 0.0),
//!     world_point(10.0, 0.0, 0.0),
//!     world_point(0.0, 10.0, 0.0),
//! ];
//! tri.edges = vec![(0, 1), (1, 2), (2, 0)];
//!
//! tri.translate(3.0, 0.0, 0.0);
//! assert!((tri.centroid().x - (10.0 / 3.0 + 3.0)).abs() < 1e-9);
//! ```

#![deny(unsafe_code)]

pub mod curve;
pub mod point;
pub mod surface;
pub mod transform;
pub mod wireframe;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors produced by geometry constructors and evaluators.
///
/// Evaluators never fail on degenerate numeric input (colinear control
/// points, zero-length vectors); these variants cover structural problems
/// only.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeometryError {
    /// A curve was asked to evaluate with fewer control points (or a lower
    /// degree) than its basis supports.
    #[error("insufficient control points: need at least {needed}, got {got}")]
    InsufficientControlPoints { needed: usize, got: usize },

    /// A surface's control grid does not satisfy its degree constraints.
    #[error("degree constraint violated: {detail}")]
    DegreeConstraint { detail: String },

    /// An edge, face, curve, or surface referenced a vertex index outside
    /// the owning wireframe's vertex list.
    #[error("vertex index {index} out of range for {len} vertices")]
    IndexOutOfRange { index: usize, len: usize },
}

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::curve::{Curve, CurveKind};
    pub use crate::point::{world_point, Color, WindowObject, WindowPoint, WorldPoint};
    pub use crate::surface::{Surface, SurfaceAlgorithm, SurfaceDomain, SurfaceKind};
    pub use crate::wireframe::{Appearance, Face, Wireframe, WireframeKind};
    pub use crate::GeometryError;
}
